//! Property search query builder.
//!
//! [`build_property_query`] turns a [`FilterCriteria`] and a result limit into
//! a [`QueryPlan`]: SQL text plus the ordered values bound to it.
//!
//! Rules enforced:
//! 1. Every placeholder is produced by binding a value, so `$N` always refers
//!    to the Nth entry of the parameter list.
//! 2. Row-level filters are joined as `WHERE a AND b ...`; aggregate filters
//!    (average rating) go after `GROUP BY` as `HAVING a AND b ...`.
//! 3. Criteria are applied in a fixed order (city, minimum price, maximum
//!    price, owner, rating) and the limit is always bound last.
//!
//! The builder never fails. Values are validated by the caller before they
//! reach this module.

use crate::models::Cents;

/// Result count used when the caller does not ask for one.
pub const DEFAULT_LIMIT: i64 = 10;

const SELECT_PROPERTIES: &str = "SELECT properties.*, AVG(rating)::float8 AS average_rating
FROM properties
LEFT JOIN property_reviews ON properties.id = property_reviews.property_id";

// ---------------------------------------------------------------------------
// Inputs and outputs
// ---------------------------------------------------------------------------

/// Optional property search constraints. All fields `None` means no filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Substring of the city name, matched case-insensitively.
    pub city: Option<String>,
    pub minimum_price_per_night: Option<Cents>,
    pub maximum_price_per_night: Option<Cents>,
    /// Lower bound on the average review rating.
    pub minimum_rating: Option<f64>,
    pub owner_id: Option<i32>,
}

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i32),
    BigInt(i64),
    Float(f64),
}

/// SQL text paired with its ordered bound parameters.
///
/// Fields are private: a plan can only be produced by the builder, which keeps
/// the placeholders and the parameter list in step.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    sql: String,
    params: Vec<SqlParam>,
}

impl QueryPlan {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the property search query for `criteria`, returning at most `limit`
/// rows ordered by nightly cost.
pub fn build_property_query(criteria: &FilterCriteria, limit: i64) -> QueryPlan {
    let mut builder = PropertyQueryBuilder::default();

    if let Some(city) = &criteria.city {
        builder.filter_rows("city ILIKE", SqlParam::Text(contains_pattern(city)));
    }
    if let Some(min) = criteria.minimum_price_per_night {
        builder.filter_rows("cost_per_night >=", SqlParam::Int(min.get()));
    }
    if let Some(max) = criteria.maximum_price_per_night {
        builder.filter_rows("cost_per_night <=", SqlParam::Int(max.get()));
    }
    if let Some(owner_id) = criteria.owner_id {
        builder.filter_rows("owner_id =", SqlParam::Int(owner_id));
    }
    if let Some(rating) = criteria.minimum_rating {
        builder.filter_groups("AVG(rating) >=", SqlParam::Float(rating));
    }

    builder.finish(limit)
}

#[derive(Debug, Default)]
struct PropertyQueryBuilder {
    params: Vec<SqlParam>,
    /// Fragments for the `WHERE` clause.
    row_filters: Vec<String>,
    /// Fragments for the `HAVING` clause.
    group_filters: Vec<String>,
}

impl PropertyQueryBuilder {
    /// Append `value` to the parameter list and return its placeholder.
    fn bind(&mut self, value: SqlParam) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }

    fn filter_rows(&mut self, condition: &str, value: SqlParam) {
        let placeholder = self.bind(value);
        self.row_filters.push(format!("{condition} {placeholder}"));
    }

    fn filter_groups(&mut self, condition: &str, value: SqlParam) {
        let placeholder = self.bind(value);
        self.group_filters.push(format!("{condition} {placeholder}"));
    }

    fn finish(mut self, limit: i64) -> QueryPlan {
        let mut sql = String::from(SELECT_PROPERTIES);
        push_clause(&mut sql, "WHERE", &self.row_filters);
        sql.push_str("\nGROUP BY properties.id");
        push_clause(&mut sql, "HAVING", &self.group_filters);
        sql.push_str("\nORDER BY cost_per_night, properties.id");

        let placeholder = self.bind(SqlParam::BigInt(limit));
        sql.push_str("\nLIMIT ");
        sql.push_str(&placeholder);
        sql.push(';');

        QueryPlan {
            sql,
            params: self.params,
        }
    }
}

/// `KEYWORD a AND b AND c`, or nothing when there are no fragments.
fn push_clause(sql: &mut String, keyword: &str, fragments: &[String]) {
    if fragments.is_empty() {
        return;
    }
    sql.push('\n');
    sql.push_str(keyword);
    sql.push(' ');
    sql.push_str(&fragments.join(" AND "));
}

/// `%needle%` with LIKE metacharacters in `needle` escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(major: f64) -> Option<Cents> {
        Cents::from_major(major)
    }

    /// Placeholder numbers in order of appearance.
    fn placeholders(sql: &str) -> Vec<usize> {
        let mut found = Vec::new();
        for (i, _) in sql.match_indices('$') {
            let digits: String = sql[i + 1..].chars().take_while(|d| d.is_ascii_digit()).collect();
            if !digits.is_empty() {
                found.push(digits.parse().unwrap());
            }
        }
        found
    }

    #[test]
    fn no_filters_binds_only_the_limit() {
        let plan = build_property_query(&FilterCriteria::default(), DEFAULT_LIMIT);

        assert_eq!(plan.params(), &[SqlParam::BigInt(10)]);
        assert!(!plan.sql().contains("WHERE"));
        assert!(!plan.sql().contains("HAVING"));
        assert!(plan.sql().contains("GROUP BY properties.id"));
        assert!(plan.sql().ends_with("LIMIT $1;"));
    }

    #[test]
    fn all_filters_bind_in_fixed_order() {
        let criteria = FilterCriteria {
            city: Some("Vancouver".into()),
            minimum_price_per_night: cents(50.0),
            maximum_price_per_night: cents(150.0),
            minimum_rating: Some(4.0),
            owner_id: None,
        };
        let plan = build_property_query(&criteria, 5);

        assert_eq!(
            plan.params(),
            &[
                SqlParam::Text("%Vancouver%".into()),
                SqlParam::Int(5000),
                SqlParam::Int(15000),
                SqlParam::Float(4.0),
                SqlParam::BigInt(5),
            ]
        );
        assert!(plan
            .sql()
            .contains("WHERE city ILIKE $1 AND cost_per_night >= $2 AND cost_per_night <= $3"));
        assert!(plan.sql().contains("HAVING AVG(rating) >= $4"));
        assert!(plan.sql().ends_with("LIMIT $5;"));
    }

    #[test]
    fn rating_only_uses_having_without_where() {
        let criteria = FilterCriteria {
            minimum_rating: Some(3.0),
            ..Default::default()
        };
        let plan = build_property_query(&criteria, DEFAULT_LIMIT);

        assert!(!plan.sql().contains("WHERE"));
        assert!(plan.sql().contains("HAVING AVG(rating) >= $1"));
        assert!(plan.sql().contains("LIMIT $2"));
        assert_eq!(plan.params(), &[SqlParam::Float(3.0), SqlParam::BigInt(10)]);
    }

    #[test]
    fn owner_filter_after_maximum_price() {
        let criteria = FilterCriteria {
            maximum_price_per_night: cents(99.5),
            owner_id: Some(7),
            ..Default::default()
        };
        let plan = build_property_query(&criteria, 3);

        assert!(plan.sql().contains("WHERE cost_per_night <= $1 AND owner_id = $2"));
        assert_eq!(
            plan.params(),
            &[SqlParam::Int(9950), SqlParam::Int(7), SqlParam::BigInt(3)]
        );
    }

    #[test]
    fn minimum_price_is_bound_in_cents() {
        let criteria = FilterCriteria {
            minimum_price_per_night: cents(20.0),
            ..Default::default()
        };
        let plan = build_property_query(&criteria, DEFAULT_LIMIT);

        assert_eq!(plan.params()[0], SqlParam::Int(2000));
        assert!(!plan.params().contains(&SqlParam::Int(20)));
    }

    #[test]
    fn every_filter_subset_keeps_placeholders_in_step() {
        for mask in 0u8..32 {
            let criteria = FilterCriteria {
                city: (mask & 1 != 0).then(|| "Toronto".to_string()),
                minimum_price_per_night: if mask & 2 != 0 { cents(10.0) } else { None },
                maximum_price_per_night: if mask & 4 != 0 { cents(500.0) } else { None },
                owner_id: (mask & 8 != 0).then_some(3),
                minimum_rating: (mask & 16 != 0).then_some(2.5),
            };
            let plan = build_property_query(&criteria, 25);
            let numbers = placeholders(plan.sql());
            let n = plan.params().len();

            assert_eq!(numbers, (1..=n).collect::<Vec<_>>(), "mask {mask:#07b}: {}", plan.sql());
            assert_eq!(plan.params().last(), Some(&SqlParam::BigInt(25)));
            assert_eq!(n, mask.count_ones() as usize + 1);
            assert_eq!(plan.sql().contains("WHERE"), mask & 0b1111 != 0);
            assert_eq!(plan.sql().contains("HAVING"), mask & 16 != 0);
            assert!(plan.sql().matches("WHERE").count() <= 1);
        }
    }

    #[test]
    fn building_twice_yields_identical_plans() {
        let criteria = FilterCriteria {
            city: Some("Sotboske".into()),
            minimum_rating: Some(4.5),
            owner_id: Some(12),
            ..Default::default()
        };
        assert_eq!(
            build_property_query(&criteria, 8),
            build_property_query(&criteria, 8)
        );
    }

    #[test]
    fn like_metacharacters_in_city_are_escaped() {
        let criteria = FilterCriteria {
            city: Some(r"100%_real\city".into()),
            ..Default::default()
        };
        let plan = build_property_query(&criteria, 1);
        assert_eq!(
            plan.params()[0],
            SqlParam::Text(r"%100\%\_real\\city%".into())
        );
    }
}

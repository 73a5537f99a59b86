//! Parsing of `--filter` expressions into typed filters.
//!
//! Accepted forms mirror the API's own query syntax:
//!
//! | expression | operator |
//! |---|---|
//! | `name` | Exists |
//! | `!name` | NotExists |
//! | `name=value` | Match (In when the value has commas, Regex when it is `/.../`) |
//! | `name!=value` | NotMatch (NotIn / NotRegex likewise) |
//! | `field>n`, `field>=n`, `field<n`, `field<=n` | comparisons |
//!
//! Field names may be given as Rust names (`runtime_in_minutes`) or wire
//! names (`runtimeInMinutes`).

use fellowship::model::{FieldSelector, Model};
use fellowship::{Filter, FilterError, FilterOperator};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterExprError {
    #[error("empty filter expression")]
    Empty,

    #[error("filter expression '{0}' has no field name")]
    MissingField(String),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Parses one expression into a filter over `M`.
pub fn parse_filter<M: Model>(expr: &str) -> Result<Filter<M>, FilterExprError> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(FilterExprError::Empty);
    }

    let Some(idx) = expr.find(['!', '=', '<', '>']) else {
        return Ok(Filter::new(FieldSelector::name(expr.to_string()), FilterOperator::Exists, None)?);
    };

    if idx == 0 {
        let field = expr.trim_start_matches('!');
        if field.is_empty() || !expr.starts_with('!') {
            return Err(FilterExprError::MissingField(expr.to_string()));
        }
        return Ok(Filter::new(FieldSelector::name(field.to_string()), FilterOperator::NotExists, None)?);
    }

    let (field, rest) = expr.split_at(idx);
    let (operator, value) = split_operator(rest);
    let operator = refine(operator, value);

    Ok(Filter::new(FieldSelector::name(field.trim().to_string()), operator, Some(value))?)
}

/// Splits `>=160` into `(GreaterThanOrEqual, "160")`.
fn split_operator(rest: &str) -> (FilterOperator, &str) {
    const TOKENS: [(&str, FilterOperator); 6] = [
        ("!=", FilterOperator::NotMatch),
        (">=", FilterOperator::GreaterThanOrEqual),
        ("<=", FilterOperator::LessThanOrEqual),
        ("=", FilterOperator::Match),
        (">", FilterOperator::GreaterThan),
        ("<", FilterOperator::LessThan),
    ];

    for (token, operator) in TOKENS {
        if let Some(value) = rest.strip_prefix(token) {
            return (operator, value);
        }
    }

    // A lone `!` after the field name reads as "not equal"
    (FilterOperator::NotMatch, rest.trim_start_matches('!'))
}

/// Picks the list or regex variant of an (in)equality from its value.
fn refine(operator: FilterOperator, value: &str) -> FilterOperator {
    let is_regex = value.len() > 1 && value.starts_with('/') && value[1..].contains('/');

    match operator {
        FilterOperator::Match if is_regex => FilterOperator::Regex,
        FilterOperator::NotMatch if is_regex => FilterOperator::NotRegex,
        FilterOperator::Match if value.contains(',') => FilterOperator::In,
        FilterOperator::NotMatch if value.contains(',') => FilterOperator::NotIn,
        other => other,
    }
}

//! Typed query filters.
//!
//! A [`Filter`] pairs a resolved model field with a [`FilterOperator`] and
//! an optional value. It is validated once, when built, and renders to a
//! single query-string fragment such as `runtimeInMinutes>=160`.

mod operator;
mod pattern;

pub use operator::FilterOperator;

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use crate::error::FilterError;
use crate::model::{resolve_field, FieldSelector, Model};

/// An immutable filter over one field of model `M`.
///
/// The model parameter keeps filters from being sent to the wrong
/// resource: a `Filter<Movie>` cannot be passed to the quotes endpoint.
///
/// ## Examples
///
/// ```rust
/// use fellowship::{Filter, FilterOperator};
/// use fellowship::model::{Movie, MovieField, Quote, QuoteField};
///
/// let long = Filter::<Movie>::new(MovieField::RuntimeInMinutes, FilterOperator::GreaterThanOrEqual, Some("160"))?;
/// assert_eq!(long.to_string(), "runtimeInMinutes>=160");
///
/// let ring = Filter::<Quote>::new(QuoteField::Dialog, FilterOperator::Regex, Some("/ring/i"))?;
/// assert_eq!(ring.to_string(), "dialog=/ring/i");
/// # Ok::<(), fellowship::FilterError>(())
/// ```
pub struct Filter<M: Model> {
    field: &'static str,
    operator: FilterOperator,
    value: Option<String>,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> Filter<M> {
    /// Builds a filter, resolving the field and validating regex values.
    ///
    /// ## Errors
    ///
    /// - [`FilterError::InvalidFieldSelector`] if `field` does not resolve
    ///   to a declared field of `M`
    /// - [`FilterError::InvalidRegexPattern`] if `operator` is Regex or
    ///   NotRegex and `value` does not compile
    pub fn new(
        field: impl Into<FieldSelector<M::Field>>,
        operator: FilterOperator,
        value: Option<&str>,
    ) -> Result<Self, FilterError> {
        let field = resolve_field::<M>(&field.into())?;

        if operator.is_regex()
            && let Some(literal) = value
        {
            pattern::validate_regex(literal)?;
        }

        Ok(Self {
            field,
            operator,
            value: value.map(str::to_string),
            _model: PhantomData,
        })
    }

    /// `field=a,b,...`: matches any of `values`.
    pub fn one_of<I, S>(field: impl Into<FieldSelector<M::Field>>, values: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(field, FilterOperator::In, Some(&join_values(values)))
    }

    /// `field!=a,b,...`: matches none of `values`.
    pub fn none_of<I, S>(field: impl Into<FieldSelector<M::Field>>, values: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(field, FilterOperator::NotIn, Some(&join_values(values)))
    }

    /// `field`: the field is present.
    pub fn exists(field: impl Into<FieldSelector<M::Field>>) -> Result<Self, FilterError> {
        Self::new(field, FilterOperator::Exists, None)
    }

    /// `!field`: the field is absent.
    pub fn not_exists(field: impl Into<FieldSelector<M::Field>>) -> Result<Self, FilterError> {
        Self::new(field, FilterOperator::NotExists, None)
    }

    /// The wire name of the filtered field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Renders the fragment, passing the field name and value through
    /// `escape`. Operator tokens are never escaped.
    pub(crate) fn render_with<'a>(&'a self, escape: impl Fn(&'a str) -> Cow<'a, str>) -> String {
        let field = escape(self.field);

        match self.operator {
            FilterOperator::Exists => field.into_owned(),
            FilterOperator::NotExists => format!("!{field}"),
            op => {
                let value = escape(self.value.as_deref().unwrap_or_default());
                format!("{field}{}{value}", op.token())
            }
        }
    }
}

fn join_values<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders the raw fragment, without any escaping.
impl<M: Model> fmt::Display for Filter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(Cow::Borrowed))
    }
}

impl<M: Model> fmt::Debug for Filter<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("model", &M::NAME)
            .field("field", &self.field)
            .field("operator", &self.operator)
            .field("value", &self.value)
            .finish()
    }
}

impl<M: Model> Clone for Filter<M> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            operator: self.operator,
            value: self.value.clone(),
            _model: PhantomData,
        }
    }
}

impl<M: Model> PartialEq for Filter<M> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.operator == other.operator && self.value == other.value
    }
}

impl<M: Model> Eq for Filter<M> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Movie, MovieField, Quote, QuoteField};

    fn movie(field: MovieField, op: FilterOperator, value: Option<&str>) -> String {
        Filter::<Movie>::new(field, op, value).unwrap().to_string()
    }

    #[test]
    fn test_constructor_resolves_wire_name() {
        let filter = Filter::<Movie>::new(MovieField::Name, FilterOperator::Match, Some("test")).unwrap();
        assert_eq!(filter.field(), "name");
        assert_eq!(filter.operator(), FilterOperator::Match);
        assert_eq!(filter.value(), Some("test"));

        let by_id = Filter::<Movie>::new(MovieField::Id, FilterOperator::Match, Some("test-id")).unwrap();
        assert_eq!(by_id.field(), "_id");
    }

    #[test]
    fn test_rendering_table() {
        use FilterOperator::*;

        assert_eq!(movie(MovieField::Name, Match, Some("Fellowship")), "name=Fellowship");
        assert_eq!(movie(MovieField::Name, NotMatch, Some("Hobbit")), "name!=Hobbit");
        assert_eq!(
            movie(MovieField::Name, In, Some("Fellowship,Two Towers")),
            "name=Fellowship,Two Towers"
        );
        assert_eq!(movie(MovieField::Name, NotIn, Some("Hobbit")), "name!=Hobbit");
        assert_eq!(movie(MovieField::Name, Exists, None), "name");
        assert_eq!(movie(MovieField::Name, NotExists, None), "!name");
        assert_eq!(movie(MovieField::RuntimeInMinutes, GreaterThan, Some("120")), "runtimeInMinutes>120");
        assert_eq!(
            movie(MovieField::RuntimeInMinutes, GreaterThanOrEqual, Some("120")),
            "runtimeInMinutes>=120"
        );
        assert_eq!(movie(MovieField::RuntimeInMinutes, LessThan, Some("180")), "runtimeInMinutes<180");
        assert_eq!(
            movie(MovieField::RuntimeInMinutes, LessThanOrEqual, Some("180")),
            "runtimeInMinutes<=180"
        );

        let regex = Filter::<Quote>::new(QuoteField::Dialog, Regex, Some("/ring/i")).unwrap();
        assert_eq!(regex.to_string(), "dialog=/ring/i");
        let not_regex = Filter::<Quote>::new(QuoteField::Dialog, NotRegex, Some("/ring/i")).unwrap();
        assert_eq!(not_regex.to_string(), "dialog!=/ring/i");
    }

    #[test]
    fn test_exists_ignores_value() {
        assert_eq!(movie(MovieField::Name, FilterOperator::Exists, Some("ignored")), "name");
        assert_eq!(movie(MovieField::Name, FilterOperator::NotExists, Some("ignored")), "!name");
    }

    #[test]
    fn test_missing_value_renders_empty() {
        assert_eq!(movie(MovieField::Name, FilterOperator::Match, None), "name=");
    }

    #[test]
    fn test_regex_validation() {
        assert!(Filter::<Quote>::new(QuoteField::Dialog, FilterOperator::Regex, Some("/test/i")).is_ok());
        assert!(Filter::<Quote>::new(QuoteField::Dialog, FilterOperator::Regex, Some("test.*")).is_ok());

        let err = Filter::<Quote>::new(QuoteField::Dialog, FilterOperator::Regex, Some("[invalid")).unwrap_err();
        assert!(matches!(err, FilterError::InvalidRegexPattern { .. }));
        assert!(err.to_string().starts_with("Invalid regex pattern: [invalid"));

        let err = Filter::<Quote>::new(QuoteField::Dialog, FilterOperator::NotRegex, Some("(")).unwrap_err();
        assert!(matches!(err, FilterError::InvalidRegexPattern { .. }));
    }

    #[test]
    fn test_non_regex_operators_skip_validation() {
        let filter = Filter::<Quote>::new(QuoteField::Dialog, FilterOperator::Match, Some("[invalid")).unwrap();
        assert_eq!(filter.to_string(), "dialog=[invalid");
    }

    #[test]
    fn test_regex_without_value_is_accepted() {
        let filter = Filter::<Quote>::new(QuoteField::Dialog, FilterOperator::Regex, None).unwrap();
        assert_eq!(filter.to_string(), "dialog=");
    }

    #[test]
    fn test_invalid_field_selector() {
        let err = Filter::<Movie>::new(FieldSelector::name("constant"), FilterOperator::Match, Some("test"))
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidFieldSelector { .. }));
        assert!(err.to_string().starts_with("Invalid field selector"));
    }

    #[test]
    fn test_field_error_wins_over_regex_error() {
        let err = Filter::<Quote>::new(FieldSelector::name("a.b"), FilterOperator::Regex, Some("[invalid"))
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidFieldSelector { .. }));
    }

    #[test]
    fn test_list_helpers() {
        let any = Filter::<Movie>::one_of(MovieField::Name, ["Fellowship", "Two Towers"]).unwrap();
        assert_eq!(any.operator(), FilterOperator::In);
        assert_eq!(any.to_string(), "name=Fellowship,Two Towers");

        let none = Filter::<Movie>::none_of(MovieField::Name, vec!["Hobbit".to_string()]).unwrap();
        assert_eq!(none.to_string(), "name!=Hobbit");

        assert_eq!(Filter::<Movie>::exists(MovieField::Name).unwrap().to_string(), "name");
        assert_eq!(Filter::<Movie>::not_exists(MovieField::Name).unwrap().to_string(), "!name");
    }

    #[test]
    fn test_render_with_escapes_field_and_value_only() {
        let filter = Filter::<Movie>::new(MovieField::Name, FilterOperator::NotMatch, Some("a b")).unwrap();
        let rendered = filter.render_with(|s| Cow::Owned(s.replace(' ', "%20")));
        assert_eq!(rendered, "name!=a%20b");
    }
}

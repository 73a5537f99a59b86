//! Field descriptors and selector resolution.
//!
//! Every [`Model`] declares a static table of [`FieldDescriptor`]s. Filters
//! name a field through a [`FieldSelector`], which [`resolve_field`] turns
//! into the field's wire name with a table lookup.

use std::borrow::Cow;
use std::fmt;

use super::Model;
use crate::error::FilterError;

/// Static metadata for one queryable model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor<F> {
    /// Symbolic field identifier.
    pub field: F,
    /// In-language (Rust) field name.
    pub name: &'static str,
    /// Name used by the API, when it differs from `name`.
    pub wire_name: Option<&'static str>,
}

impl<F> FieldDescriptor<F> {
    /// Declares a field whose wire name equals its Rust name.
    pub const fn new(field: F, name: &'static str) -> Self {
        Self {
            field,
            name,
            wire_name: None,
        }
    }

    /// Declares a field with an explicit wire name.
    pub const fn renamed(field: F, name: &'static str, wire_name: &'static str) -> Self {
        Self {
            field,
            name,
            wire_name: Some(wire_name),
        }
    }

    /// The name used in payloads and query strings.
    pub fn wire_name(&self) -> &'static str {
        self.wire_name.unwrap_or(self.name)
    }
}

/// A reference to one field of a model.
///
/// `Field` is checked by the compiler. `Name` is looked up at filter
/// construction time and accepts either the Rust name or the wire name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector<F> {
    Field(F),
    Name(Cow<'static, str>),
}

impl<F> FieldSelector<F> {
    pub fn name(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Name(name.into())
    }
}

impl<F> From<F> for FieldSelector<F> {
    fn from(field: F) -> Self {
        Self::Field(field)
    }
}

impl<F: fmt::Debug> fmt::Display for FieldSelector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => write!(f, "{field:?}"),
            Self::Name(name) => write!(f, "'{name}'"),
        }
    }
}

/// Resolves a selector to the model's wire name for that field.
///
/// ## Errors
///
/// Returns [`FilterError::InvalidFieldSelector`] if the selector is not a
/// plain identifier (empty, a nested path such as `a.b`, an expression) or
/// does not name a declared field of `M`.
///
/// ## Examples
///
/// ```rust
/// use fellowship::model::{resolve_field, FieldSelector, Movie, MovieField};
///
/// assert_eq!(resolve_field::<Movie>(&MovieField::Id.into()).unwrap(), "_id");
/// assert_eq!(
///     resolve_field::<Movie>(&FieldSelector::name("runtime_in_minutes")).unwrap(),
///     "runtimeInMinutes"
/// );
/// assert!(resolve_field::<Movie>(&FieldSelector::name("name.first")).is_err());
/// ```
pub fn resolve_field<M: Model>(
    selector: &FieldSelector<M::Field>,
) -> Result<&'static str, FilterError> {
    let found = match selector {
        FieldSelector::Field(field) => M::FIELDS.iter().find(|d| d.field == *field),
        FieldSelector::Name(name) if is_identifier(name) => M::FIELDS
            .iter()
            .find(|d| d.name == name.as_ref() || d.wire_name() == name.as_ref()),
        FieldSelector::Name(_) => None,
    };

    found
        .map(FieldDescriptor::wire_name)
        .ok_or_else(|| FilterError::InvalidFieldSelector {
            selector: format!("{selector} on {}", M::NAME),
        })
}

/// A single field projection: a non-empty run of alphanumerics and `_`
/// that does not start with a digit.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Movie, MovieField, Quote, QuoteField};

    #[test]
    fn test_identity_field_resolves_to_underscore_id() {
        assert_eq!(resolve_field::<Movie>(&MovieField::Id.into()).unwrap(), "_id");
        assert_eq!(resolve_field::<Quote>(&QuoteField::Id.into()).unwrap(), "_id");
    }

    #[test]
    fn test_every_declared_field_resolves() {
        for descriptor in Movie::FIELDS {
            let resolved = resolve_field::<Movie>(&descriptor.field.into()).unwrap();
            assert_eq!(resolved, descriptor.wire_name());
            assert!(!resolved.is_empty());
        }
        for descriptor in Quote::FIELDS {
            let resolved = resolve_field::<Quote>(&descriptor.field.into()).unwrap();
            assert_eq!(resolved, descriptor.wire_name());
        }
    }

    #[test]
    fn test_wire_name_falls_back_to_rust_name() {
        assert_eq!(resolve_field::<Movie>(&MovieField::Name.into()).unwrap(), "name");
        assert_eq!(resolve_field::<Quote>(&QuoteField::Dialog.into()).unwrap(), "dialog");
    }

    #[test]
    fn test_name_selector_accepts_rust_or_wire_name() {
        let by_rust = resolve_field::<Movie>(&FieldSelector::name("rotten_tomatoes_score"));
        let by_wire = resolve_field::<Movie>(&FieldSelector::name("rottenTomatoesScore"));
        assert_eq!(by_rust.unwrap(), "rottenTomatoesScore");
        assert_eq!(by_wire.unwrap(), "rottenTomatoesScore");

        assert_eq!(resolve_field::<Quote>(&FieldSelector::name("id")).unwrap(), "_id");
        assert_eq!(resolve_field::<Quote>(&FieldSelector::name("_id")).unwrap(), "_id");
    }

    #[test]
    fn test_invalid_selectors() {
        for bad in ["", "constant value", "name.first", "1st", "len(name)", "unknown"] {
            let result = resolve_field::<Movie>(&FieldSelector::name(bad));
            assert!(
                matches!(result, Err(FilterError::InvalidFieldSelector { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_error_names_model_and_selector() {
        let err = resolve_field::<Quote>(&FieldSelector::name("runtime")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid field selector: 'runtime' on Quote");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("name"));
        assert!(is_identifier("_id"));
        assert!(is_identifier("runtimeInMinutes"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("a.b"));
    }
}

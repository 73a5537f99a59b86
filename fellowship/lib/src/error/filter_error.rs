use thiserror::Error;

/// Errors raised while constructing a [`Filter`](crate::Filter).
///
/// Both variants are programmer errors and are reported when the filter is
/// built, never at request time.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The selector does not name a declared field of the model.
    #[error("Invalid field selector: {selector}")]
    InvalidFieldSelector { selector: String },

    /// A Regex/NotRegex value does not compile.
    #[error("Invalid regex pattern: {pattern}")]
    InvalidRegexPattern {
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },
}

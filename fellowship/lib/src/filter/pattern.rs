//! Validation of regex filter values.

use fancy_regex::RegexBuilder;

use crate::error::FilterError;

/// Checks that a Regex/NotRegex value compiles.
///
/// Lookaround and backreferences are accepted, matching the server's
/// PCRE-style dialect.
///
/// Accepts a bare pattern (`test.*`) or a slash-delimited literal with an
/// optional `i` flag (`/ring/i`). Any other text after the closing slash
/// is read as "no flags".
pub(crate) fn validate_regex(literal: &str) -> Result<(), FilterError> {
    let (pattern, case_insensitive) = split_literal(literal);

    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map(|_| ())
        .map_err(|source| FilterError::InvalidRegexPattern {
            pattern: literal.to_string(),
            source,
        })
}

/// Splits `/pattern/flags` into `(pattern, ignore_case)`.
fn split_literal(literal: &str) -> (&str, bool) {
    if let Some(rest) = literal.strip_prefix('/')
        && let Some(end) = rest.rfind('/')
    {
        let (pattern, flags) = (&rest[..end], &rest[end + 1..]);
        return (pattern, flags == "i");
    }

    (literal, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_literal() {
        assert_eq!(split_literal("/ring/i"), ("ring", true));
        assert_eq!(split_literal("/ring/"), ("ring", false));
        assert_eq!(split_literal("/ring/gx"), ("ring", false));
        assert_eq!(split_literal("test.*"), ("test.*", false));
        assert_eq!(split_literal("/a/b/i"), ("a/b", true));
        // No closing slash: the whole literal is the pattern
        assert_eq!(split_literal("/ring"), ("/ring", false));
    }

    #[test]
    fn test_valid_patterns() {
        assert!(validate_regex("/ring/i").is_ok());
        assert!(validate_regex("test.*").is_ok());
        assert!(validate_regex("^Frodo").is_ok());
    }

    #[test]
    fn test_lookaround_is_accepted() {
        assert!(validate_regex("/^(?!Frodo)/i").is_ok());
        assert!(validate_regex(r"(?<=Mr\. )Frodo").is_ok());
        assert!(validate_regex(r"/(?<!Sam)wise/").is_ok());
    }

    #[test]
    fn test_backreference_is_accepted() {
        assert!(validate_regex(r"(a)\1").is_ok());
        assert!(validate_regex(r"/(\w+) \1/i").is_ok());
    }

    #[test]
    fn test_invalid_pattern_carries_literal() {
        let err = validate_regex("[invalid").unwrap_err();
        match &err {
            FilterError::InvalidRegexPattern { pattern, .. } => assert_eq!(pattern, "[invalid"),
            other => panic!("Expected InvalidRegexPattern, got {other:?}"),
        }
        assert!(err.to_string().contains("[invalid"));
    }

    #[test]
    fn test_invalid_pattern_inside_slashes() {
        let err = validate_regex("/(unclosed/i").unwrap_err();
        assert!(err.to_string().starts_with("Invalid regex pattern: /(unclosed/i"));
    }
}

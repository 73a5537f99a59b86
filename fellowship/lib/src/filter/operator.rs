//! Comparison operators understood by the API's filter syntax.

use strum::{Display, EnumIter, EnumString};

/// Comparison applied by a [`Filter`](crate::Filter).
///
/// ## Examples
///
/// ```rust
/// use fellowship::FilterOperator;
///
/// let op = FilterOperator::GreaterThanOrEqual;
/// assert_eq!(op.token(), ">=");
/// assert!(op.takes_value());
/// assert!(!FilterOperator::Exists.takes_value());
///
/// let parsed: FilterOperator = "NotRegex".parse().unwrap();
/// assert_eq!(parsed, FilterOperator::NotRegex);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum FilterOperator {
    /// `field=value`
    Match,
    /// `field!=value`
    NotMatch,
    /// `field=a,b,c`
    In,
    /// `field!=a,b,c`
    NotIn,
    /// `field`
    Exists,
    /// `!field`
    NotExists,
    /// `field=/pattern/i`
    Regex,
    /// `field!=/pattern/i`
    NotRegex,
    /// `field>value`
    GreaterThan,
    /// `field>=value`
    GreaterThanOrEqual,
    /// `field<value`
    LessThan,
    /// `field<=value`
    LessThanOrEqual,
}

impl FilterOperator {
    /// The token placed between field and value.
    ///
    /// Empty for [`Exists`](Self::Exists); `!` (a prefix) for
    /// [`NotExists`](Self::NotExists).
    pub fn token(self) -> &'static str {
        match self {
            Self::Match | Self::In | Self::Regex => "=",
            Self::NotMatch | Self::NotIn | Self::NotRegex => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Exists => "",
            Self::NotExists => "!",
        }
    }

    /// Returns `true` if the rendered fragment includes a value.
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::Exists | Self::NotExists)
    }

    /// Returns `true` for operators whose value is a regular expression.
    pub fn is_regex(self) -> bool {
        matches!(self, Self::Regex | Self::NotRegex)
    }
}

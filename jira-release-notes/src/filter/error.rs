//! Filter validation error types.

use thiserror::Error;

/// Errors raised while validating user input, before any request is made.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required option was missing or empty.
    #[error("No {field} given")]
    MissingField { field: &'static str },

    /// The Jira base URL could not be parsed.
    #[error("Invalid Jira url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Both an exact version and a version pattern were supplied.
    #[error("'version' must be either a plain string or a pattern, not both")]
    ConflictingVersion,

    /// The version pattern is not a valid regular expression.
    #[error("Invalid version pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The result cap must be positive.
    #[error("'max_results' must be greater than zero")]
    ZeroMaxResults,
}

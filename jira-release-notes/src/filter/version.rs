//! Fix-version selection.

use super::ValidationError;
use regex::Regex;
use std::fmt;

/// Selects which fix-versions a query targets.
#[derive(Debug, Clone, Default)]
pub enum VersionSelector {
    /// No version restriction.
    #[default]
    None,

    /// A single version matched by name.
    Exact(String),

    /// Every project version whose name matches the pattern.
    Pattern(Regex),
}

impl VersionSelector {
    /// Builds a selector from an optional exact name and an optional pattern.
    ///
    /// An empty exact name or an empty pattern is treated the same as no
    /// version at all, so an empty pattern never restricts the search and
    /// never conflicts with an exact name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ConflictingVersion`] if both are given, or
    /// [`ValidationError::InvalidPattern`] if the pattern does not compile.
    pub fn from_options(
        exact: Option<&str>,
        pattern: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let exact = exact.filter(|v| !v.is_empty());
        let pattern = pattern.filter(|p| !p.is_empty());

        match (exact, pattern) {
            (Some(_), Some(_)) => Err(ValidationError::ConflictingVersion),
            (Some(version), None) => Ok(Self::Exact(version.to_string())),
            (None, Some(pattern)) => Regex::new(pattern)
                .map(Self::Pattern)
                .map_err(|source| ValidationError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                }),
            (None, None) => Ok(Self::None),
        }
    }

    /// Returns true if no version clause would be produced.
    #[must_use]
    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            Self::Exact(version) => version.is_empty(),
            Self::Pattern(_) => false,
        }
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Exact(version) => f.write_str(version),
            Self::Pattern(pattern) => write!(f, "/{}/", pattern.as_str()),
        }
    }
}

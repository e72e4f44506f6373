//! Output format selection.

use std::fmt;

/// How fetched issues are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One `- title (KEY)` line per issue.
    #[default]
    Plain,

    /// An HTML unordered list linking each issue.
    Html,

    /// The issues themselves, unformatted.
    Raw,
}

impl OutputFormat {
    /// Parses a format name.
    ///
    /// `"plain"` and `"html"` select their formats; any other value selects
    /// [`OutputFormat::Raw`].
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "plain" => Self::Plain,
            "html" => Self::Html,
            _ => Self::Raw,
        }
    }

    /// Returns the format name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Html => "html",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Release notes formatting.
//!
//! Turns fetched issues into plain text, an HTML list, or passes them
//! through untouched.

mod error;
mod format;
mod renderer;

pub use error::NotesError;
pub use format::OutputFormat;
pub use renderer::{browse_url, NotesRenderer};

use crate::jira::Issue;

/// Release notes produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseNotes {
    /// Formatted plain text or HTML.
    Text(String),

    /// Unformatted issues.
    Issues(Vec<Issue>),
}

impl ReleaseNotes {
    /// Returns the formatted text, if this is a text result.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Issues(_) => None,
        }
    }
}

/// Formats issues as release notes.
///
/// `site` is the Jira base URL used for issue links in HTML output.
///
/// # Errors
///
/// Returns [`NotesError`] if the HTML template fails to render.
pub fn format_issues(
    renderer: &NotesRenderer,
    issues: Vec<Issue>,
    format: OutputFormat,
    site: &str,
) -> Result<ReleaseNotes, NotesError> {
    match format {
        OutputFormat::Plain => Ok(ReleaseNotes::Text(renderer.render_plain(&issues))),
        OutputFormat::Html => Ok(ReleaseNotes::Text(renderer.render_html(&issues, site)?)),
        OutputFormat::Raw => Ok(ReleaseNotes::Issues(issues)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_passes_issues_through() {
        let renderer = NotesRenderer::new().unwrap();
        let issues = vec![Issue::new("ABC-1", "Fix bug"), Issue::new("ABC-2", "Add")];

        let notes =
            format_issues(&renderer, issues.clone(), OutputFormat::Raw, "https://x").unwrap();

        assert_eq!(notes, ReleaseNotes::Issues(issues));
        assert_eq!(notes.as_text(), None);
    }

    #[test]
    fn plain_returns_text() {
        let renderer = NotesRenderer::new().unwrap();
        let issues = vec![Issue::new("ABC-1", "Fix bug")];

        let notes = format_issues(&renderer, issues, OutputFormat::Plain, "https://x").unwrap();

        assert_eq!(notes.as_text(), Some("- Fix bug (ABC-1)"));
    }
}

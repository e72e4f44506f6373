//! Runner error types.

/// Errors that can occur during a release notes run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Invalid or missing options.
    #[error(transparent)]
    Validation(#[from] crate::filter::ValidationError),

    /// Config file loading errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Jira request errors.
    #[error(transparent)]
    Jira(#[from] crate::jira::JiraError),

    /// Rendering errors.
    #[error(transparent)]
    Notes(#[from] crate::notes::NotesError),
}

impl RunnerError {
    /// Returns true if the error was caused by user input rather than Jira.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Config(_))
    }
}

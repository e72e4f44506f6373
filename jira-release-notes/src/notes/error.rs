//! Release notes rendering error types.

/// Release notes rendering error.
#[derive(Debug, thiserror::Error)]
pub enum NotesError {
    /// Handlebars rendering error.
    #[error("Release notes rendering error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    /// Template registration error.
    #[error("Release notes template error: {0}")]
    RegistrationError(#[from] handlebars::TemplateError),
}

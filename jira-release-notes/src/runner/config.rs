//! Runner configuration.

use crate::filter::FilterSpec;
use crate::jira::JiraCredentials;
use crate::notes::OutputFormat;

/// Validated options for a release notes run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Jira connection settings.
    credentials: JiraCredentials,
    /// Issue filter.
    filter: FilterSpec,
    /// Output format.
    format: OutputFormat,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(credentials: JiraCredentials, filter: FilterSpec, format: OutputFormat) -> Self {
        Self {
            credentials,
            filter,
            format,
        }
    }

    /// Returns the Jira connection settings.
    pub fn credentials(&self) -> &JiraCredentials {
        &self.credentials
    }

    /// Returns the issue filter.
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Returns the output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

//! Orchestrates a release notes run: compile the query, fetch, format.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::filter::FilterSpec;
use crate::jira::{IssueFetcher, JiraClient, VersionResolver};
use crate::notes::{format_issues, NotesRenderer, OutputFormat, ReleaseNotes};
use crate::query::compile_query;
use tracing::{info, info_span, Instrument};

/// Runs the release notes pipeline against a Jira instance.
pub struct Runner {
    config: RunnerConfig,
    client: JiraClient,
    renderer: NotesRenderer,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the HTTP client or templates can't be set up.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let client = JiraClient::new(config.credentials().clone())?;
        Ok(Self {
            config,
            client,
            renderer: NotesRenderer::new()?,
        })
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Fetches the issues and renders the release notes.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Jira`] if any Jira request fails.
    pub async fn run(&self) -> Result<ReleaseNotes, RunnerError> {
        generate_release_notes(
            &self.client,
            &self.client,
            &self.renderer,
            self.config.filter(),
            self.config.format(),
            self.client.credentials().site(),
        )
        .await
    }
}

/// Compiles the filter, fetches matching issues once and formats them.
///
/// `site` is the Jira base URL used for issue links.
///
/// # Errors
///
/// Returns [`RunnerError`] if the version lookup, the search or rendering fails.
pub async fn generate_release_notes(
    fetcher: &dyn IssueFetcher,
    resolver: &dyn VersionResolver,
    renderer: &NotesRenderer,
    filter: &FilterSpec,
    format: OutputFormat,
    site: &str,
) -> Result<ReleaseNotes, RunnerError> {
    let span = info_span!(
        "release_notes",
        project = %filter.project(),
        version = %filter.version(),
        format = %format
    );

    async {
        info!("Fetching issues from Jira");

        let jql = compile_query(filter, resolver).await?;
        info!(jql = %jql, "Compiled query");

        let issues = fetcher.search_issues(&jql, filter.max_results()).await?;
        info!(
            count = issues.len(),
            status = ?filter.status(),
            components = ?filter.components(),
            "Fetched issues"
        );

        Ok(format_issues(renderer, issues, format, site)?)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ValidationError;
    use crate::jira::{JiraCredentials, TransportError};

    #[test]
    fn classifies_input_errors() {
        let validation = RunnerError::from(ValidationError::ZeroMaxResults);
        assert!(validation.is_input_error());

        let transport = RunnerError::from(crate::jira::JiraError::from(
            TransportError::from_response(500, "Internal Server Error", None, ""),
        ));
        assert!(!transport.is_input_error());
    }

    #[test]
    fn links_use_client_site() {
        let credentials =
            JiraCredentials::new("https://jira.example.com/", "user", "token").unwrap();
        let filter = FilterSpec::builder("ABC").build().unwrap();
        let config = RunnerConfig::new(credentials, filter, OutputFormat::Html);

        let runner = Runner::new(config).unwrap();

        assert_eq!(runner.client.credentials().site(), "https://jira.example.com");
        assert_eq!(runner.config().format(), OutputFormat::Html);
        assert_eq!(runner.config().filter().project(), "ABC");
    }
}

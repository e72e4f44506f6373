//! Jira access.
//!
//! The rest of the crate only depends on the [`IssueFetcher`] and
//! [`VersionResolver`] capabilities; [`JiraClient`] implements both against
//! the Jira REST API.

mod client;
mod credentials;
mod error;
mod issue;

pub use client::JiraClient;
pub use credentials::JiraCredentials;
pub use error::{JiraError, TransportError};
pub use issue::{Issue, IssueFields, NamedField, VersionCandidate};

pub(crate) use issue::SearchResponse;

use async_trait::async_trait;

/// Runs a JQL query and returns the matching issues.
///
/// Implementations must be reentrant if shared between concurrent runs.
#[async_trait]
pub trait IssueFetcher: Send + Sync {
    /// Returns at most `max_results` issues matching `jql`, in server order.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] if the request fails.
    async fn search_issues(&self, jql: &str, max_results: u32) -> Result<Vec<Issue>, JiraError>;
}

/// Lists the known fix-versions of a project.
#[async_trait]
pub trait VersionResolver: Send + Sync {
    /// Returns every version of `project`, in server order.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] if the request fails.
    async fn project_versions(&self, project: &str) -> Result<Vec<VersionCandidate>, JiraError>;
}

#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod filter;
pub mod jira;
pub mod notes;
pub mod query;
pub mod rate_limit;
pub mod runner;

pub use config::{ConfigError, ReleaseNotesConfig};
pub use filter::{FilterBuilder, FilterSpec, ValidationError, VersionSelector, DEFAULT_MAX_RESULTS};
pub use jira::{
    Issue, IssueFetcher, IssueFields, JiraClient, JiraCredentials, JiraError, NamedField,
    TransportError, VersionCandidate, VersionResolver,
};
pub use notes::{browse_url, format_issues, NotesError, NotesRenderer, OutputFormat, ReleaseNotes};
pub use query::{compile_query, render_query};
pub use runner::{generate_release_notes, Runner, RunnerConfig, RunnerError};

//! CLI for Jira release notes.
//!
//! Fetches issues for a Jira project and version filter and prints them as
//! plain text, HTML, or JSON.

use clap::Parser;
use jira_release_notes::{ReleaseNotes, ReleaseNotesConfig, Runner, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Jira Release Notes - Fetch issues from Jira and print them as release notes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// URL for the Jira instance.
    #[arg(long, env = "FL_JIRA_SITE")]
    url: Option<String>,

    /// Username for the Jira instance.
    #[arg(long, env = "FL_JIRA_USERNAME")]
    username: Option<String>,

    /// Password or API token for Jira.
    #[arg(long, env = "FL_JIRA_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Jira project key.
    #[arg(long, env = "FL_JIRA_PROJECT")]
    project: Option<String>,

    /// Exact fix-version name.
    #[arg(long, env = "FL_JIRA_PROJECT_VERSION")]
    version: Option<String>,

    /// Regular expression matched against the project's fix-version names.
    #[arg(long, env = "FL_JIRA_PROJECT_VERSION_PATTERN")]
    version_pattern: Option<String>,

    /// Comma-separated issue statuses.
    #[arg(long, env = "FL_JIRA_STATUS", value_delimiter = ',')]
    status: Vec<String>,

    /// Comma-separated issue components.
    #[arg(long, env = "FL_JIRA_COMPONENTS", value_delimiter = ',')]
    components: Vec<String>,

    /// Search every unreleased fix-version; `--version` is ignored.
    #[arg(
        long,
        env = "FL_IN_LAST_UNRELEASED",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    in_last_unreleased: Option<bool>,

    /// Return only issues in a currently open sprint.
    #[arg(
        long,
        env = "FL_IN_OPEN_SPRINT",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    in_open_sprint: Option<bool>,

    /// Output format: plain, html, or anything else for JSON.
    #[arg(long, env = "FL_JIRA_RELEASE_NOTES_FORMAT")]
    format: Option<String>,

    /// Maximum number of issues.
    #[arg(long, env = "FL_JIRA_RELEASE_NOTES_MAX_RESULTS")]
    max_results: Option<u32>,

    /// Path to a release-notes.toml file with default options.
    #[arg(long, env = "FL_JIRA_RELEASE_NOTES_CONFIG")]
    config: Option<PathBuf>,
}

impl Args {
    /// Converts the arguments into config overrides. Unset flags stay `None`.
    fn into_overrides(self) -> (Option<PathBuf>, ReleaseNotesConfig) {
        let overrides = ReleaseNotesConfig {
            url: self.url,
            username: self.username,
            password: self.password,
            project: self.project,
            version: self.version,
            version_pattern: self.version_pattern,
            status: non_empty(self.status),
            components: non_empty(self.components),
            in_last_unreleased: self.in_last_unreleased,
            in_open_sprint: self.in_open_sprint,
            format: self.format,
            max_results: self.max_results,
        };
        (self.config, overrides)
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    let values: Vec<String> = values
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .collect();
    (!values.is_empty()).then_some(values)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(notes) => match print_notes(&notes) {
            Ok(()) => ExitCode::from(0),
            Err(e) => {
                error!(error = %e, "Failed to print release notes");
                ExitCode::from(2)
            }
        },
        Err(e) => {
            error!(error = %e, "Failed to build release notes");
            if e.is_input_error() {
                ExitCode::from(1)
            } else {
                ExitCode::from(2)
            }
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr so that stdout only carries the release notes. The level
/// is taken from `RUST_LOG`, defaulting to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<ReleaseNotes, RunnerError> {
    let (config_path, overrides) = args.into_overrides();

    let base = match config_path {
        Some(path) => ReleaseNotesConfig::load(&path)?,
        None => ReleaseNotesConfig::default(),
    };

    let config = base.merge(overrides).into_runner_config()?;
    let runner = Runner::new(config)?;
    info!(
        project = %runner.config().filter().project(),
        format = %runner.config().format(),
        "Starting release notes run"
    );
    let notes = runner.run().await?;

    if let ReleaseNotes::Issues(issues) = &notes {
        info!(count = issues.len(), "Returning raw issues");
    }
    Ok(notes)
}

/// Prints the release notes to stdout.
fn print_notes(notes: &ReleaseNotes) -> Result<(), serde_json::Error> {
    match notes {
        ReleaseNotes::Text(text) => println!("{text}"),
        ReleaseNotes::Issues(issues) => println!("{}", serde_json::to_string_pretty(issues)?),
    }
    Ok(())
}

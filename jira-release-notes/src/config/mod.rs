//! Release notes configuration.
//!
//! Options come from an optional `release-notes.toml` file and from the
//! command line / environment. Every field is optional at this stage;
//! [`ReleaseNotesConfig::into_runner_config`] validates the merged result.
//!
//! ```toml
//! url = "https://jira.example.com"
//! username = "release-bot"
//! project = "ABC"
//! version-pattern = '^1\.'
//! status = ["Done", "Closed"]
//! components = ["iOS"]
//! in-open-sprint = false
//! format = "html"
//! max-results = 100
//! ```

mod error;

pub use error::ConfigError;

use crate::filter::{FilterSpec, ValidationError, VersionSelector};
use crate::jira::JiraCredentials;
use crate::notes::OutputFormat;
use crate::runner::RunnerConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Partially specified release notes options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReleaseNotesConfig {
    /// Jira base URL.
    pub url: Option<String>,

    /// Jira username.
    pub username: Option<String>,

    /// Jira password or API token.
    pub password: Option<String>,

    /// Jira project key.
    pub project: Option<String>,

    /// Exact fix-version name.
    pub version: Option<String>,

    /// Regular expression matched against fix-version names.
    pub version_pattern: Option<String>,

    /// Statuses to include.
    pub status: Option<Vec<String>>,

    /// Components to include.
    pub components: Option<Vec<String>>,

    /// Select issues from every unreleased version, ignoring `version`.
    pub in_last_unreleased: Option<bool>,

    /// Select only issues in currently open sprints.
    pub in_open_sprint: Option<bool>,

    /// Output format: `plain`, `html`, anything else for raw issues.
    pub format: Option<String>,

    /// Maximum number of issues.
    pub max_results: Option<u32>,
}

impl ReleaseNotesConfig {
    /// Loads options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable or invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading config");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Overlays `overrides` on top of `self`; set values in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            url: overrides.url.or(self.url),
            username: overrides.username.or(self.username),
            password: overrides.password.or(self.password),
            project: overrides.project.or(self.project),
            version: overrides.version.or(self.version),
            version_pattern: overrides.version_pattern.or(self.version_pattern),
            status: overrides.status.or(self.status),
            components: overrides.components.or(self.components),
            in_last_unreleased: overrides.in_last_unreleased.or(self.in_last_unreleased),
            in_open_sprint: overrides.in_open_sprint.or(self.in_open_sprint),
            format: overrides.format.or(self.format),
            max_results: overrides.max_results.or(self.max_results),
        }
    }

    /// Validates the options and builds a runner configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for missing credentials or project, an
    /// ambiguous or invalid version, or a zero result cap.
    pub fn into_runner_config(self) -> Result<RunnerConfig, ValidationError> {
        let credentials = JiraCredentials::new(
            self.url.as_deref().unwrap_or_default(),
            self.username.as_deref().unwrap_or_default(),
            self.password.as_deref().unwrap_or_default(),
        )?;

        let version = VersionSelector::from_options(
            self.version.as_deref(),
            self.version_pattern.as_deref(),
        )?;

        let mut filter = FilterSpec::builder(self.project.unwrap_or_default())
            .version(version)
            .status(self.status.unwrap_or_default())
            .components(self.components.unwrap_or_default())
            .unreleased_window(self.in_last_unreleased.unwrap_or(false))
            .open_sprint(self.in_open_sprint.unwrap_or(false));
        if let Some(max_results) = self.max_results {
            filter = filter.max_results(max_results);
        }

        let format = self
            .format
            .as_deref()
            .map_or(OutputFormat::Plain, OutputFormat::parse);

        Ok(RunnerConfig::new(credentials, filter.build()?, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DEFAULT_MAX_RESULTS;
    use std::fs;
    use tempfile::TempDir;

    fn complete() -> ReleaseNotesConfig {
        ReleaseNotesConfig {
            url: Some("https://jira.example.com".to_string()),
            username: Some("user".to_string()),
            password: Some("token".to_string()),
            project: Some("ABC".to_string()),
            ..ReleaseNotesConfig::default()
        }
    }

    #[test]
    fn can_load_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("release-notes.toml");
        fs::write(
            &path,
            r#"
url = "https://jira.example.com"
project = "ABC"
version-pattern = '^1\.'
status = ["Open", "Done"]
in-open-sprint = true
max-results = 10
"#,
        )
        .unwrap();

        let config = ReleaseNotesConfig::load(&path).unwrap();

        assert_eq!(config.url.as_deref(), Some("https://jira.example.com"));
        assert_eq!(config.version_pattern.as_deref(), Some(r"^1\."));
        assert_eq!(
            config.status,
            Some(vec!["Open".to_string(), "Done".to_string()])
        );
        assert_eq!(config.in_open_sprint, Some(true));
        assert_eq!(config.max_results, Some(10));
        assert_eq!(config.username, None);
    }

    #[test]
    fn load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = ReleaseNotesConfig::load(&temp.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("release-notes.toml");
        fs::write(&path, "projects = \"ABC\"\n").unwrap();

        let result = ReleaseNotesConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn overrides_win() {
        let file = ReleaseNotesConfig {
            project: Some("ABC".to_string()),
            format: Some("html".to_string()),
            max_results: Some(10),
            ..ReleaseNotesConfig::default()
        };
        let cli = ReleaseNotesConfig {
            project: Some("XYZ".to_string()),
            ..ReleaseNotesConfig::default()
        };

        let merged = file.merge(cli);

        assert_eq!(merged.project.as_deref(), Some("XYZ"));
        assert_eq!(merged.format.as_deref(), Some("html"));
        assert_eq!(merged.max_results, Some(10));
    }

    #[test]
    fn builds_runner_config_with_defaults() {
        let config = complete().into_runner_config().unwrap();

        assert_eq!(config.filter().project(), "ABC");
        assert_eq!(config.filter().max_results(), DEFAULT_MAX_RESULTS);
        assert_eq!(config.format(), OutputFormat::Plain);
        assert_eq!(config.credentials().username(), "user");
    }

    #[test]
    fn unknown_format_is_raw() {
        let config = ReleaseNotesConfig {
            format: Some("none".to_string()),
            ..complete()
        };
        assert_eq!(config.into_runner_config().unwrap().format(), OutputFormat::Raw);
    }

    #[test]
    fn missing_project_is_rejected() {
        let config = ReleaseNotesConfig {
            project: None,
            ..complete()
        };
        assert!(matches!(
            config.into_runner_config(),
            Err(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn missing_password_is_rejected() {
        let config = ReleaseNotesConfig {
            password: None,
            ..complete()
        };
        assert!(matches!(
            config.into_runner_config(),
            Err(ValidationError::MissingField { field: "password" })
        ));
    }

    #[test]
    fn conflicting_version_is_rejected() {
        let config = ReleaseNotesConfig {
            version: Some("1.0".to_string()),
            version_pattern: Some("^1".to_string()),
            ..complete()
        };
        assert!(matches!(
            config.into_runner_config(),
            Err(ValidationError::ConflictingVersion)
        ));
    }
}

//! Issue and version records returned by Jira.

use serde::{Deserialize, Serialize};

/// A Jira issue as returned by the search API.
///
/// Only `key` is required; every other field defaults when Jira omits it so
/// that formatting can degrade gracefully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Numeric issue id, as a string.
    #[serde(default)]
    pub id: String,

    /// Issue key (e.g., "ABC-1").
    pub key: String,

    /// REST URL of the issue.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,

    /// Requested issue fields.
    #[serde(default)]
    pub fields: IssueFields,
}

/// Subset of issue fields used for release notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IssueFields {
    /// Issue title.
    pub summary: Option<String>,

    /// Issue type (e.g., "Bug").
    #[serde(rename = "issuetype")]
    pub issue_type: Option<NamedField>,

    /// Workflow status (e.g., "Done").
    pub status: Option<NamedField>,

    /// Fix versions the issue is targeted for.
    pub fix_versions: Vec<NamedField>,

    /// Components the issue belongs to.
    pub components: Vec<NamedField>,
}

/// A Jira object identified by its display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedField {
    /// Display name.
    #[serde(default)]
    pub name: String,
}

impl Issue {
    /// Creates an issue with only a key and a summary.
    pub fn new(key: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            key: key.into(),
            self_url: None,
            fields: IssueFields {
                summary: Some(summary.into()),
                ..IssueFields::default()
            },
        }
    }

    /// Returns the issue title, or an empty string if Jira sent none.
    #[must_use]
    pub fn title(&self) -> &str {
        self.fields.summary.as_deref().unwrap_or("")
    }

    /// Returns the issue type name, or an empty string.
    #[must_use]
    pub fn issue_type(&self) -> &str {
        self.fields
            .issue_type
            .as_ref()
            .map_or("", |field| field.name.as_str())
    }

    /// Returns the status name, or an empty string.
    #[must_use]
    pub fn status(&self) -> &str {
        self.fields
            .status
            .as_ref()
            .map_or("", |field| field.name.as_str())
    }
}

/// A project version as returned by `GET /project/{key}/versions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCandidate {
    /// Version name (e.g., "1.2.0").
    pub name: String,

    /// Whether the version has been released.
    #[serde(default)]
    pub released: bool,

    /// Whether the version has been archived.
    #[serde(default)]
    pub archived: bool,
}

impl VersionCandidate {
    /// Creates an unreleased candidate with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            released: false,
            archived: false,
        }
    }
}

/// Body of a `GET /search` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub(crate) issues: Vec<Issue>,

    #[serde(default)]
    pub(crate) total: Option<u64>,
}

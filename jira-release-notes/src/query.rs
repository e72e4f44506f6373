//! JQL query compilation.
//!
//! Turns a [`FilterSpec`] into a single JQL string. Clauses are always emitted
//! in the same order (project, fix version, status, component, sprint) and
//! joined with `AND`.
//!
//! Values are quoted but not escaped: a project, version, status or component
//! containing JQL quotes or parentheses produces a malformed query, which Jira
//! rejects server-side.

use crate::filter::{FilterSpec, VersionSelector};
use crate::jira::{JiraError, VersionCandidate, VersionResolver};
use tracing::{debug, warn};

const UNRELEASED_VERSIONS_CLAUSE: &str = "fixVersion in unreleasedVersions()";
const OPEN_SPRINTS_CLAUSE: &str = "sprint in openSprints()";

/// Compiles a filter into JQL, resolving project versions when needed.
///
/// The resolver is called once, and only when the version selector is a
/// pattern and the unreleased window is disabled.
///
/// # Errors
///
/// Returns [`JiraError`] only if the version lookup fails.
pub async fn compile_query(
    filter: &FilterSpec,
    resolver: &dyn VersionResolver,
) -> Result<String, JiraError> {
    let candidates = if needs_versions(filter) {
        resolver.project_versions(filter.project()).await?
    } else {
        Vec::new()
    };

    Ok(render_query(filter, &candidates))
}

/// Renders the JQL for a filter given the project's versions.
///
/// `candidates` is only consulted for [`VersionSelector::Pattern`]. A pattern
/// matching no candidate yields `fixVersion in ()`, which matches nothing.
#[must_use]
pub fn render_query(filter: &FilterSpec, candidates: &[VersionCandidate]) -> String {
    let mut clauses = vec![format!("PROJECT = '{}'", filter.project())];

    if let Some(clause) = version_clause(filter, candidates) {
        clauses.push(clause);
    }

    if !filter.status().is_empty() {
        clauses.push(format!("status in ({})", filter.status().join(", ")));
    }

    if !filter.components().is_empty() {
        let components = filter
            .components()
            .iter()
            .map(|component| format!("\"{component}\""))
            .collect::<Vec<_>>()
            .join(", ");
        clauses.push(format!("component in ({components})"));
    }

    if filter.use_open_sprint() {
        clauses.push(OPEN_SPRINTS_CLAUSE.to_string());
    }

    clauses.join(" AND ")
}

fn needs_versions(filter: &FilterSpec) -> bool {
    !filter.use_unreleased_window() && matches!(filter.version(), VersionSelector::Pattern(_))
}

fn version_clause(filter: &FilterSpec, candidates: &[VersionCandidate]) -> Option<String> {
    if filter.use_unreleased_window() {
        return Some(UNRELEASED_VERSIONS_CLAUSE.to_string());
    }

    match filter.version() {
        VersionSelector::Pattern(pattern) => {
            let matched: Vec<String> = candidates
                .iter()
                .filter(|candidate| pattern.is_match(&candidate.name))
                .map(|candidate| format!("'{}'", candidate.name))
                .collect();

            if matched.is_empty() {
                warn!(
                    pattern = %pattern,
                    candidates = candidates.len(),
                    "Version pattern matched no project versions, query will return no issues"
                );
            } else {
                debug!(matched = matched.len(), "Resolved version pattern");
            }

            Some(format!("fixVersion in ({})", matched.join(", ")))
        }
        VersionSelector::Exact(version) if !version.is_empty() => {
            Some(format!("fixVersion = '{version}'"))
        }
        VersionSelector::Exact(_) | VersionSelector::None => None,
    }
}

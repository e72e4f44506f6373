//! Release notes renderer.

use super::NotesError;
use crate::jira::Issue;
use handlebars::Handlebars;
use serde_json::{json, Value};

const HTML_TEMPLATE_NAME: &str = "html";

/// Each title and link is HTML-escaped by the registry's default escape function.
const HTML_TEMPLATE: &str =
    r#"<ul>{{#each issues}}<li><a href="{{url}}">{{title}}</a></li>{{/each}}</ul>"#;

/// Renders issue lists as release notes.
pub struct NotesRenderer {
    handlebars: Handlebars<'static>,
}

impl NotesRenderer {
    /// Creates a renderer with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn new() -> Result<Self, NotesError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_template_string(HTML_TEMPLATE_NAME, HTML_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Renders issues as `- title (KEY)` lines, in order.
    ///
    /// Returns an empty string for an empty list.
    #[must_use]
    pub fn render_plain(&self, issues: &[Issue]) -> String {
        issues
            .iter()
            .map(|issue| format!("- {} ({})", issue.title(), issue.key))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Renders issues as an HTML list linking to `{site}/browse/{key}`.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_html(&self, issues: &[Issue], site: &str) -> Result<String, NotesError> {
        let data = html_context(issues, site);
        Ok(self.handlebars.render(HTML_TEMPLATE_NAME, &data)?)
    }
}

/// Returns the browser URL of an issue.
#[must_use]
pub fn browse_url(site: &str, key: &str) -> String {
    format!("{}/browse/{}", site.trim_end_matches('/'), key)
}

fn html_context(issues: &[Issue], site: &str) -> Value {
    let issues: Vec<Value> = issues
        .iter()
        .map(|issue| {
            json!({
                "key": issue.key,
                "title": issue.title(),
                "url": browse_url(site, &issue.key)
            })
        })
        .collect();

    json!({ "issues": issues })
}

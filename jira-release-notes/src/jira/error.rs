//! Jira client error types and transport error translation.

use thiserror::Error;

/// Errors that can occur while talking to Jira.
#[derive(Debug, Error)]
pub enum JiraError {
    /// The request failed or Jira answered with an error status.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The configured base URL can't have API paths appended to it.
    #[error("Jira url '{url}' cannot be used as a base url")]
    InvalidBaseUrl { url: String },

    /// The response body was not the expected JSON.
    #[error("Failed to decode Jira {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A failed Jira request, reduced to what a user needs to see.
///
/// `code` is the HTTP status, or `0` if the request never got a response.
/// `body` is only kept when the server answered with JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Jira request failed: {}", describe(.code, .message, .body))]
pub struct TransportError {
    /// HTTP status code.
    pub code: u16,
    /// Short reason, e.g. "Not Found".
    pub message: String,
    /// Raw JSON error body, if any.
    pub body: Option<String>,
}

impl TransportError {
    /// Translates an error response.
    ///
    /// The body is attached only when `content_type` is `application/json`.
    #[must_use]
    pub fn from_response(code: u16, message: &str, content_type: Option<&str>, body: &str) -> Self {
        let body = is_json(content_type).then(|| body.to_string());
        Self {
            code,
            message: message.to_string(),
            body,
        }
    }

    /// Translates a failure raised by the HTTP client itself.
    #[must_use]
    pub fn from_request(error: &reqwest::Error) -> Self {
        Self {
            code: error.status().map_or(0, |status| status.as_u16()),
            message: error.to_string(),
            body: None,
        }
    }
}

fn describe(code: &u16, message: &str, body: &Option<String>) -> String {
    let mut fields = vec![code.to_string(), message.to_string()];
    if let Some(body) = body {
        fields.push(body.clone());
    }
    fields.join(", ")
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

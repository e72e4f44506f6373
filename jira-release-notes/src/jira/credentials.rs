//! Jira connection settings.

use crate::filter::ValidationError;
use std::fmt;
use url::Url;

/// Base URL and basic-auth credentials for a Jira instance.
#[derive(Clone)]
pub struct JiraCredentials {
    base_url: Url,
    username: String,
    password: String,
}

impl JiraCredentials {
    /// Validates and creates connection settings.
    ///
    /// `password` may be an account password or an API token.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if any value is empty or the URL is invalid.
    pub fn new(url: &str, username: &str, password: &str) -> Result<Self, ValidationError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingField {
                field: "url for Jira",
            });
        }
        if username.is_empty() {
            return Err(ValidationError::MissingField { field: "username" });
        }
        if password.is_empty() {
            return Err(ValidationError::MissingField { field: "password" });
        }

        let base_url = Url::parse(url).map_err(|source| ValidationError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        Ok(Self {
            base_url,
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Returns the Jira base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the base URL as a string without a trailing slash.
    pub fn site(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for JiraCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraCredentials")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

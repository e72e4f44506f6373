//! Issue filter model.
//!
//! A [`FilterSpec`] describes which issues to fetch. It is built once through
//! [`FilterBuilder`], validated, and then only read.

mod error;
mod version;

pub use error::ValidationError;
pub use version::VersionSelector;

/// Default cap on the number of fetched issues.
pub const DEFAULT_MAX_RESULTS: u32 = 50;

/// Validated description of the issues to fetch.
#[derive(Debug, Clone)]
pub struct FilterSpec {
    project: String,
    version: VersionSelector,
    status: Vec<String>,
    components: Vec<String>,
    use_unreleased_window: bool,
    use_open_sprint: bool,
    max_results: u32,
}

impl FilterSpec {
    /// Starts building a filter for the given project key.
    pub fn builder(project: impl Into<String>) -> FilterBuilder {
        FilterBuilder {
            project: project.into(),
            version: VersionSelector::None,
            status: Vec::new(),
            components: Vec::new(),
            use_unreleased_window: false,
            use_open_sprint: false,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Returns the Jira project key.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Returns the fix-version selector.
    ///
    /// Ignored by the query compiler when the unreleased window is enabled.
    pub fn version(&self) -> &VersionSelector {
        &self.version
    }

    /// Returns the requested statuses, in order.
    pub fn status(&self) -> &[String] {
        &self.status
    }

    /// Returns the requested components, in order.
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Returns whether issues are selected from all unreleased versions.
    pub fn use_unreleased_window(&self) -> bool {
        self.use_unreleased_window
    }

    /// Returns whether only issues in open sprints are selected.
    pub fn use_open_sprint(&self) -> bool {
        self.use_open_sprint
    }

    /// Returns the maximum number of issues to fetch.
    pub fn max_results(&self) -> u32 {
        self.max_results
    }
}

/// Builder for [`FilterSpec`].
#[derive(Debug, Clone)]
#[must_use]
pub struct FilterBuilder {
    project: String,
    version: VersionSelector,
    status: Vec<String>,
    components: Vec<String>,
    use_unreleased_window: bool,
    use_open_sprint: bool,
    max_results: u32,
}

impl FilterBuilder {
    /// Sets the fix-version selector.
    pub fn version(mut self, version: VersionSelector) -> Self {
        self.version = version;
        self
    }

    /// Sets the statuses to match. Blank entries are dropped.
    pub fn status<I, S>(mut self, status: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.status = clean_list(status);
        self
    }

    /// Sets the components to match. Blank entries are dropped.
    pub fn components<I, S>(mut self, components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components = clean_list(components);
        self
    }

    /// Selects issues from every unreleased version, ignoring the version selector.
    pub fn unreleased_window(mut self, enabled: bool) -> Self {
        self.use_unreleased_window = enabled;
        self
    }

    /// Restricts the query to issues in currently open sprints.
    pub fn open_sprint(mut self, enabled: bool) -> Self {
        self.use_open_sprint = enabled;
        self
    }

    /// Sets the result cap.
    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Validates and builds the filter.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the project is blank or the result cap is zero.
    pub fn build(self) -> Result<FilterSpec, ValidationError> {
        let project = self.project.trim().to_string();
        if project.is_empty() {
            return Err(ValidationError::MissingField {
                field: "Jira project name",
            });
        }
        if self.max_results == 0 {
            return Err(ValidationError::ZeroMaxResults);
        }

        Ok(FilterSpec {
            project,
            version: self.version,
            status: self.status,
            components: self.components,
            use_unreleased_window: self.use_unreleased_window,
            use_open_sprint: self.use_open_sprint,
            max_results: self.max_results,
        })
    }
}

fn clean_list<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .map(Into::into)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

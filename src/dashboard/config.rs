//! Controller configuration.

use crate::ordering::domain::WorkContext;
use serde::Deserialize;

/// Settings for a [`super::services::TaskListController`].
///
/// Deserializes from JSON; missing fields take their defaults.
///
/// ```
/// use taskdeck::dashboard::config::TaskListConfig;
///
/// let config = TaskListConfig::from_json(r#"{ "work_context": "home" }"#)?;
/// assert_eq!(config.work_context().as_str(), "home");
/// assert!(config.expand_new_subtask_parents());
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskListConfig {
    work_context: WorkContext,
    expand_new_subtask_parents: bool,
}

impl TaskListConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] for malformed JSON, unknown fields or an
    /// invalid work context.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Sets the work context.
    #[must_use]
    pub fn with_work_context(mut self, work_context: WorkContext) -> Self {
        self.work_context = work_context;
        self
    }

    /// Sets whether adding a nested subtask expands its parent.
    #[must_use]
    pub const fn with_expand_new_subtask_parents(mut self, expand: bool) -> Self {
        self.expand_new_subtask_parents = expand;
        self
    }

    /// Returns the work context.
    #[must_use]
    pub const fn work_context(&self) -> &WorkContext {
        &self.work_context
    }

    /// Returns whether adding a nested subtask expands its parent.
    #[must_use]
    pub const fn expand_new_subtask_parents(&self) -> bool {
        self.expand_new_subtask_parents
    }
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            work_context: WorkContext::default(),
            expand_new_subtask_parents: true,
        }
    }
}

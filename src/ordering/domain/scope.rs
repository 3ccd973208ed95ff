//! Storage scope for persisted task orders.

use super::OrderingDomainError;
use chrono::NaiveDate;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the workspace a task list belongs to, such as `work` or `home`.
///
/// Work contexts become part of storage keys, so they are restricted to
/// ASCII letters, digits, `-`, `_` and `.`, and may not start with a dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkContext(String);

impl WorkContext {
    /// Creates a validated work context.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingDomainError::EmptyWorkContext`] for blank input and
    /// [`OrderingDomainError::InvalidWorkContext`] when the name contains
    /// characters outside the allowed set.
    pub fn new(value: impl Into<String>) -> Result<Self, OrderingDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(OrderingDomainError::EmptyWorkContext);
        }
        let is_valid = trimmed
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
        if !is_valid || trimmed.starts_with('.') {
            return Err(OrderingDomainError::InvalidWorkContext(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the context name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WorkContext {
    fn default() -> Self {
        Self("default".to_owned())
    }
}

impl TryFrom<String> for WorkContext {
    type Error = OrderingDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WorkContext> for String {
    fn from(value: WorkContext) -> Self {
        value.0
    }
}

impl fmt::Display for WorkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The (work context, calendar day) pair a task order is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderScope {
    context: WorkContext,
    date: NaiveDate,
}

impl OrderScope {
    /// Suffix of every task order storage key.
    pub const KEY_SUFFIX: &'static str = "taskOrder";

    /// Creates a scope for an explicit date.
    #[must_use]
    pub const fn new(context: WorkContext, date: NaiveDate) -> Self {
        Self { context, date }
    }

    /// Creates a scope for the clock's current local date.
    #[must_use]
    pub fn today(context: WorkContext, clock: &impl Clock) -> Self {
        Self::new(context, clock.local().date_naive())
    }

    /// Returns the work context.
    #[must_use]
    pub const fn context(&self) -> &WorkContext {
        &self.context
    }

    /// Returns the calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Key the order is persisted under: `{context}-{yyyy-MM-dd}-taskOrder`.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!(
            "{}-{}-{}",
            self.context,
            self.date.format("%Y-%m-%d"),
            Self::KEY_SUFFIX
        )
    }
}

impl fmt::Display for OrderScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.context, self.date)
    }
}

//! Task list presentation preference.

use super::{ParseViewModeError, WorkContext};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the task list is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Flat, user-ordered list.
    #[default]
    List,
    /// Columns grouped by status.
    Kanban,
}

impl ViewMode {
    /// Suffix of every view mode storage key.
    pub const KEY_SUFFIX: &'static str = "viewMode";

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Kanban => "kanban",
        }
    }

    /// Key the preference is persisted under: `{context}-viewMode`.
    #[must_use]
    pub fn storage_key(context: &WorkContext) -> String {
        format!("{context}-{}", Self::KEY_SUFFIX)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ViewMode {
    type Error = ParseViewModeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "list" => Ok(Self::List),
            "kanban" | "board" => Ok(Self::Kanban),
            _ => Err(ParseViewModeError(value.to_owned())),
        }
    }
}

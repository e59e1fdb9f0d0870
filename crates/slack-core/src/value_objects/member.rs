//! Workspace members as listed by `users.list`

use std::fmt;

use serde::Deserialize;

/// Presence state of a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Presence {
    Active,
    /// Anything Slack reports that is not `active`, including no report at all.
    #[default]
    Away,
}

impl Presence {
    /// Normalize a presence string reported by the API
    pub fn from_api(value: Option<&str>) -> Self {
        match value {
            Some("active") => Self::Active,
            _ => Self::Away,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Away => "away",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of the `members` array
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub is_bot: bool,
    /// Only present when the list was requested with `presence=true`
    #[serde(default)]
    pub presence: Option<String>,
}

impl Member {
    /// Deleted and bot accounts are excluded from name lookups
    pub fn is_ignored(&self) -> bool {
        self.deleted || self.is_bot
    }

    pub fn presence(&self) -> Presence {
        Presence::from_api(self.presence.as_deref())
    }
}

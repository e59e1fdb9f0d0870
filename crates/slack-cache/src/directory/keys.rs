//! Cache key derivation.

/// Default key namespace
pub const DEFAULT_PREFIX: &str = "SLACKCACHE";

/// Separator between the prefix and each key atom
const SEPARATOR: &str = ":";

const PRESENCE_ATOM: &str = "PRESENCE";
const USERS_ATOM: &str = "USERS";
const IGNORED_ATOM: &str = "IGNORED";
const PROFILE_ATOM: &str = "PROFILE";
const CHANNEL_ATOM: &str = "CHANNEL";

/// Builds store keys under one prefix
///
/// Keys are `prefix:atom1:atom2...` with no escaping, so distinct atom
/// sequences map to distinct keys as long as atoms contain no `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    prefix: String,
}

impl Default for CacheKeys {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl CacheKeys {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Join the prefix and `atoms` in order
    pub fn key(&self, atoms: &[&str]) -> String {
        let mut key = self.prefix.clone();
        for atom in atoms {
            key.push_str(SEPARATOR);
            key.push_str(atom);
        }
        key
    }

    /// Hash of user id to presence state
    pub fn presence(&self) -> String {
        self.key(&[PRESENCE_ATOM])
    }

    /// Hash of user id to user name
    pub fn users(&self) -> String {
        self.key(&[USERS_ATOM])
    }

    /// Set of user ids excluded from name lookups
    pub fn ignored(&self) -> String {
        self.key(&[IGNORED_ATOM])
    }

    /// Hash of profile fields for one user
    pub fn profile(&self, user_id: &str) -> String {
        self.key(&[PROFILE_ATOM, user_id])
    }

    /// Set of member ids for one channel
    pub fn channel(&self, channel_id: &str) -> String {
        self.key(&[CHANNEL_ATOM, channel_id])
    }
}

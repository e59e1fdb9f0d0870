//! Test fixtures
//!
//! Slack Web API payloads shaped like the documented responses.

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Key prefix that no other test uses
pub fn unique_prefix() -> String {
    format!("SLACKCACHE_TEST_{}_{}", std::process::id(), unique_suffix())
}

/// `users.list` with one ordinary member
pub fn single_user_list() -> Value {
    json!({
        "ok": true,
        "members": [
            {"id": "U1", "name": "alice", "deleted": false}
        ]
    })
}

/// `users.list?presence=true` for a small workspace
///
/// Covers an active user, an away user, a deleted account, a bot, and
/// Slackbot (which does not report itself as a bot).
pub fn workspace_user_list() -> Value {
    json!({
        "ok": true,
        "members": [
            {"id": "U023BECGF", "name": "bobby", "deleted": false, "presence": "active",
             "profile": {"real_name": "Bobby Tables"}},
            {"id": "U061F7AUR", "name": "egon", "deleted": false, "presence": "away"},
            {"id": "U0GONE000", "name": "former", "deleted": true, "presence": "away"},
            {"id": "B0DEPLOY0", "name": "deploybot", "deleted": false, "is_bot": true,
             "presence": "active"},
            {"id": "USLACKBOT", "name": "slackbot", "deleted": false, "is_bot": false,
             "presence": "active"}
        ],
        "cache_ts": 1_498_777_272
    })
}

/// `users.info` for Egon Spengler
pub fn spengler_info() -> Value {
    json!({
        "ok": true,
        "user": {
            "id": "U061F7AUR",
            "name": "egon",
            "profile": {
                "avatar_hash": "ge3b51ca72de",
                "status_text": "Print is dead",
                "status_emoji": ":books:",
                "status_expiration": 0,
                "real_name": "Egon Spengler",
                "display_name": "spengler",
                "real_name_normalized": "Egon Spengler",
                "display_name_normalized": "spengler",
                "email": "spengler@ghostbusters.example.com",
                "image_original": "https://avatars.example.com/e3b51ca72dee_original.jpg",
                "image_24": "https://avatars.example.com/e3b51ca72dee_24.jpg",
                "image_32": "https://avatars.example.com/e3b51ca72dee_32.jpg",
                "image_48": "https://avatars.example.com/e3b51ca72dee_48.jpg",
                "image_72": "https://avatars.example.com/e3b51ca72dee_72.jpg",
                "image_192": "https://avatars.example.com/e3b51ca72dee_192.jpg",
                "image_512": "https://avatars.example.com/e3b51ca72dee_512.jpg",
                "fields": {"Xf0111": {"value": "Ghostbusters HQ", "alt": ""}},
                "team": "T012AB3C4"
            }
        }
    })
}

/// `conversations.members` for a three-person channel
pub fn conversation_members() -> Value {
    json!({
        "ok": true,
        "members": ["U023BECGF", "U061F7AUR", "W012A3CDE"],
        "response_metadata": {"next_cursor": ""}
    })
}

/// `channels.info` for the same channel
pub fn channel_info() -> Value {
    json!({
        "ok": true,
        "channel": {
            "id": "C1H9RESGL",
            "name": "busting",
            "members": ["W012A3CDE", "U023BECGF", "U061F7AUR"]
        }
    })
}

/// A failed call with the given Slack error code
pub fn slack_error(code: &str) -> Value {
    json!({"ok": false, "error": code})
}

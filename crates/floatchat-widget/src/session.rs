#![forbid(unsafe_code)]

//! Conversation state: the bounded message list and the session id.
//!
//! The session id is an opaque token for server-side isolation. A client
//! generated id (`client-` + random base36 suffix) is used until the server
//! supplies its own, which then replaces the stored one. History is bounded
//! in memory (`max_messages`) and persisted as a smaller tail
//! (`history_limit`).

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{Limits, StorageKeys};
use crate::storage::{KeyValueStore, load_json, remove_keys, store_json};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry, in the persisted wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMessage {
    #[serde(rename = "type")]
    pub role: Role,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(rename = "contextType", skip_serializing_if = "Option::is_none", default)]
    pub context_type: Option<String>,
    #[serde(rename = "imageData", skip_serializing_if = "Option::is_none", default)]
    pub image_data: Option<String>,
}

impl StoredMessage {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp,
            context_type: None,
            image_data: None,
        }
    }
}

/// Current wall-clock time in epoch milliseconds.
#[must_use]
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current wall-clock time as an ISO 8601 UTC string with millisecond
/// precision, the format the server logs expect.
#[must_use]
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn random_client_id() -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    let suffix: String = (0..9)
        .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
        .collect();
    format!("client-{suffix}")
}

/// Conversation state plus its persistence rules.
#[derive(Debug)]
pub struct ChatSession {
    session_id: String,
    messages: Vec<StoredMessage>,
    typing: bool,
    limits: Limits,
    keys: StorageKeys,
}

impl ChatSession {
    /// Load (or initialize) a session. A missing session id is generated and
    /// persisted immediately so reloads keep talking to the same server
    /// session.
    pub fn load(store: &mut dyn KeyValueStore, keys: StorageKeys, limits: Limits) -> Self {
        let session_id = match load_json::<Option<String>>(store, &keys.session_id, None) {
            Some(id) if !id.is_empty() => id,
            _ => {
                let id = random_client_id();
                store_json(store, &keys.session_id, &id);
                id
            }
        };
        let messages = load_json(store, &keys.history, Vec::new());
        tracing::debug!(%session_id, restored = messages.len(), "session loaded");
        Self {
            session_id,
            messages,
            typing: false,
            limits,
            keys,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub fn messages(&self) -> &[StoredMessage] {
        &self.messages
    }

    /// Whether a send is in flight. While typing, further sends are no-ops.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn set_typing(&mut self, typing: bool) {
        self.typing = typing;
    }

    /// Append a message, persist the tail, and trim the in-memory list.
    pub fn push_message(&mut self, store: &mut dyn KeyValueStore, message: StoredMessage) {
        self.messages.push(message);
        self.save_history(store);
        if self.messages.len() > self.limits.max_messages {
            self.messages.remove(0);
        }
    }

    /// Persist the trailing `history_limit` messages.
    pub fn save_history(&self, store: &mut dyn KeyValueStore) {
        let tail_start = self.messages.len().saturating_sub(self.limits.history_limit);
        store_json(store, &self.keys.history, &self.messages[tail_start..]);
    }

    /// Adopt a server-provided session id if it differs from the current one.
    /// Returns whether it changed.
    pub fn adopt_session_id(&mut self, store: &mut dyn KeyValueStore, id: &str) -> bool {
        if id.is_empty() || id == self.session_id {
            return false;
        }
        tracing::debug!(old = %self.session_id, new = id, "adopting server session id");
        self.session_id = id.to_owned();
        store_json(store, &self.keys.session_id, &self.session_id);
        true
    }

    /// Start over: drop persisted id and history, generate a fresh client id,
    /// clear the transcript.
    pub fn reset(&mut self, store: &mut dyn KeyValueStore) {
        remove_keys(store, &[&self.keys.session_id, &self.keys.history]);
        self.session_id = random_client_id();
        store_json(store, &self.keys.session_id, &self.session_id);
        self.messages.clear();
        self.typing = false;
        tracing::debug!(session_id = %self.session_id, "session reset");
    }
}

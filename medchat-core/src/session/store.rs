//! Session data structures

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to sessions created without an explicit one
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Human,
    Assistant,
}

/// A single transcript entry. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Opaque id, unique within the owning session
    pub id: Uuid,
    /// Message body
    pub text: String,
    /// Message author
    pub sender: Sender,
    /// Wall-clock time-of-day label
    pub timestamp: String,
}

impl Message {
    /// Create a new message stamped with the current time
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            sender,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

/// One named conversation with an ordered transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque id, unique across the collection
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Human-readable creation date label
    pub created: String,
    /// Transcript in insertion order
    pub messages: Vec<Message>,
}

impl Session {
    /// Create a new empty session
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            created: Local::now().format("%m/%d/%Y").to_string(),
            messages: Vec::new(),
        }
    }
}

/// The full set of sessions plus which one is currently active.
///
/// Only `sessions` is persisted; `active_id` is ephemeral selection
/// state and is repointed at the first session on load.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    /// Sessions, newest first
    pub sessions: Vec<Session>,
    /// Id of the currently active session
    pub active_id: Uuid,
}

impl Collection {
    /// Create a collection holding one default session, which is active
    pub fn with_default_session() -> Self {
        let session = Session::new(DEFAULT_SESSION_TITLE);
        Self {
            active_id: session.id,
            sessions: vec![session],
        }
    }

    /// Look up a session by id
    pub fn find(&self, id: Uuid) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Look up a session by id, mutably
    pub fn find_mut(&mut self, id: Uuid) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// The currently active session, if the active id resolves
    pub fn active(&self) -> Option<&Session> {
        self.find(self.active_id)
    }

    /// Re-point `active_id` at the first session when it no longer
    /// resolves to a member. No-op on an empty collection.
    pub fn repair_active(&mut self) {
        if self.active().is_none() {
            if let Some(first) = self.sessions.first() {
                self.active_id = first.id;
            }
        }
    }
}

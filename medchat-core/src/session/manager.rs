//! Session store: the single mutation boundary for the collection
//!
//! All transcript mutations go through this type so the collection
//! invariants (unique ids, valid active pointer) are enforced in one
//! place. Durable mutations serialize the whole collection before
//! returning; a storage failure is logged and never rolls back the
//! in-memory change.

use tracing::{debug, error, warn};
use uuid::Uuid;

use super::persist::CollectionStorage;
use super::store::{Collection, Message, Sender, Session, DEFAULT_SESSION_TITLE};

/// Owns the in-memory session collection and its persistence backend
pub struct SessionStore {
    storage: Box<dyn CollectionStorage>,
    collection: Collection,
}

impl SessionStore {
    /// Load the persisted collection, or synthesize a fresh one.
    ///
    /// Non-empty persisted state is used verbatim with the first
    /// session active. Absent, corrupt, or empty state yields a single
    /// default session instead. Never writes to storage.
    pub fn initialize(storage: Box<dyn CollectionStorage>) -> Self {
        let collection = match storage.load() {
            Some(sessions) if !sessions.is_empty() => {
                debug!("Loaded {} persisted session(s)", sessions.len());
                let active_id = sessions[0].id;
                Collection {
                    sessions,
                    active_id,
                }
            }
            _ => {
                debug!("No persisted sessions, starting with a default one");
                Collection::with_default_session()
            }
        };

        Self {
            storage,
            collection,
        }
    }

    /// The current collection
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// Create a new empty session at the front of the list and make it
    /// active
    pub fn create_session(&mut self, title: Option<&str>) -> &Collection {
        let session = Session::new(title.unwrap_or(DEFAULT_SESSION_TITLE));
        self.collection.active_id = session.id;
        self.collection.sessions.insert(0, session);
        self.persist();
        &self.collection
    }

    /// Set the active session. Membership is not validated and the
    /// selection is not persisted.
    pub fn select_session(&mut self, id: Uuid) -> &Collection {
        self.collection.active_id = id;
        &self.collection
    }

    /// Replace a session's title. Empty or whitespace-only titles and
    /// unknown ids are silent no-ops.
    pub fn rename_session(&mut self, id: Uuid, new_title: &str) -> &Collection {
        let title = new_title.trim();
        if title.is_empty() {
            debug!("Ignoring empty title for session {}", id);
            return &self.collection;
        }
        match self.collection.find_mut(id) {
            Some(session) => {
                session.title = title.to_string();
                self.persist();
            }
            None => debug!("Rename of unknown session {}", id),
        }
        &self.collection
    }

    /// Append a message to a session's transcript
    pub fn append_message(&mut self, session_id: Uuid, text: &str, sender: Sender) -> &Collection {
        match self.collection.find_mut(session_id) {
            Some(session) => {
                session.messages.push(Message::new(text, sender));
                self.persist();
            }
            None => warn!("Append to unknown session {}", session_id),
        }
        &self.collection
    }

    /// Serialize the collection. A storage failure is reported through
    /// the log and the in-memory state stands.
    fn persist(&mut self) {
        self.collection.repair_active();
        if let Err(e) = self.storage.save(&self.collection.sessions) {
            error!("Failed to persist sessions: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::persist::JsonFileStorage;
    use crate::Result;
    use tempfile::TempDir;

    struct FailingStorage;

    impl CollectionStorage for FailingStorage {
        fn load(&self) -> Option<Vec<Session>> {
            None
        }

        fn save(&self, _sessions: &[Session]) -> Result<()> {
            Err(crate::Error::Serialization("quota exceeded".to_string()))
        }
    }

    fn store_in(dir: &TempDir) -> (SessionStore, std::path::PathBuf) {
        let path = dir.path().join("chat_sessions.json");
        let store = SessionStore::initialize(Box::new(JsonFileStorage::new(&path)));
        (store, path)
    }

    #[test]
    fn test_initialize_synthesizes_default_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let (store, path) = store_in(&temp_dir);

        let collection = store.collection();
        assert_eq!(collection.sessions.len(), 1);
        assert_eq!(collection.sessions[0].title, DEFAULT_SESSION_TITLE);
        assert!(collection.sessions[0].messages.is_empty());
        assert_eq!(collection.active_id, collection.sessions[0].id);
        assert!(!path.exists(), "initialize must not persist");
    }

    #[test]
    fn test_initialize_loads_persisted_sessions() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, path) = store_in(&temp_dir);
        store.create_session(Some("Saved"));
        let saved = store.collection().clone();

        let reloaded = SessionStore::initialize(Box::new(JsonFileStorage::new(&path)));
        assert_eq!(reloaded.collection().sessions, saved.sessions);
        assert_eq!(
            reloaded.collection().active_id,
            saved.sessions[0].id,
            "first session becomes active on load"
        );
    }

    #[test]
    fn test_initialize_recovers_from_corrupt_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chat_sessions.json");
        std::fs::write(&path, "{{{").unwrap();

        let store = SessionStore::initialize(Box::new(JsonFileStorage::new(&path)));
        assert_eq!(store.collection().sessions.len(), 1);
        assert_eq!(store.collection().sessions[0].title, DEFAULT_SESSION_TITLE);
    }

    #[test]
    fn test_initialize_replaces_empty_persisted_state() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("chat_sessions.json");
        std::fs::write(&path, "[]").unwrap();

        let store = SessionStore::initialize(Box::new(JsonFileStorage::new(&path)));
        assert_eq!(store.collection().sessions.len(), 1);
    }

    #[test]
    fn test_create_session_prepends_and_activates() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, _path) = store_in(&temp_dir);

        let collection = store.create_session(Some("Second"));
        assert_eq!(collection.sessions.len(), 2);
        assert_eq!(collection.sessions[0].title, "Second");
        assert_eq!(collection.active_id, collection.sessions[0].id);
    }

    #[test]
    fn test_append_targets_one_session() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, _path) = store_in(&temp_dir);
        store.create_session(Some("Second"));

        let first_id = store.collection().sessions[1].id;
        let second_id = store.collection().sessions[0].id;

        store.append_message(first_id, "hello", Sender::Human);
        let collection = store.collection();
        assert_eq!(collection.find(first_id).unwrap().messages.len(), 1);
        assert_eq!(collection.find(second_id).unwrap().messages.len(), 0);
    }

    #[test]
    fn test_back_to_back_appends_get_distinct_ids() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, _path) = store_in(&temp_dir);
        let id = store.collection().active_id;

        store.append_message(id, "one", Sender::Human);
        store.append_message(id, "two", Sender::Human);

        let messages = &store.collection().find(id).unwrap().messages;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "one");
        assert_eq!(messages[1].text, "two");
        assert_ne!(messages[0].id, messages[1].id);
    }

    #[test]
    fn test_append_to_unknown_session_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, _path) = store_in(&temp_dir);

        store.append_message(Uuid::new_v4(), "lost", Sender::Human);
        assert!(store.collection().sessions[0].messages.is_empty());
    }

    #[test]
    fn test_rename_session() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, path) = store_in(&temp_dir);
        let id = store.collection().active_id;

        store.rename_session(id, "  Check-in notes  ");
        assert_eq!(store.collection().sessions[0].title, "Check-in notes");
        assert!(path.exists(), "rename persists");
    }

    #[test]
    fn test_rename_rejects_blank_titles() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, _path) = store_in(&temp_dir);
        let id = store.collection().active_id;

        store.rename_session(id, "");
        store.rename_session(id, "   ");
        assert_eq!(store.collection().sessions[0].title, DEFAULT_SESSION_TITLE);
    }

    #[test]
    fn test_rename_unknown_session_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, _path) = store_in(&temp_dir);

        store.rename_session(Uuid::new_v4(), "Elsewhere");
        assert_eq!(store.collection().sessions[0].title, DEFAULT_SESSION_TITLE);
    }

    #[test]
    fn test_select_session_skips_validation_and_persistence() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, path) = store_in(&temp_dir);

        let stray = Uuid::new_v4();
        store.select_session(stray);
        assert_eq!(store.collection().active_id, stray);
        assert!(!path.exists(), "selection is ephemeral");
    }

    #[test]
    fn test_storage_failure_keeps_in_memory_mutation() {
        let mut store = SessionStore::initialize(Box::new(FailingStorage));
        let id = store.collection().active_id;

        store.append_message(id, "still here", Sender::Human);
        assert_eq!(store.collection().find(id).unwrap().messages.len(), 1);
    }
}

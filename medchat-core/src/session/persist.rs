//! Persistence backend for the session collection
//!
//! The persisted slot holds the serialized session array only; the
//! active-session pointer is ephemeral. Any backend that returns
//! "absent" on a parse failure instead of raising satisfies the
//! contract.

use std::path::{Path, PathBuf};

use tracing::warn;

use super::store::Session;
use crate::Result;

/// Load/save capability for the full session collection
pub trait CollectionStorage: Send {
    /// Load previously persisted sessions.
    ///
    /// Returns `None` when no state exists or the state cannot be
    /// deserialized. A parse failure must never raise.
    fn load(&self) -> Option<Vec<Session>>;

    /// Serialize the full session array, replacing any previous state.
    fn save(&self, sessions: &[Session]) -> Result<()>;
}

/// File-backed storage: one JSON document holding the session array
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create storage backed by the given file path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CollectionStorage for JsonFileStorage {
    fn load(&self) -> Option<Vec<Session>> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&content) {
            Ok(sessions) => Some(sessions),
            Err(e) => {
                warn!(
                    "Discarding unreadable session file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn save(&self, sessions: &[Session]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(sessions)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

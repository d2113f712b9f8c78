//! Conversation controller: one send/receive round trip
//!
//! Each turn moves Idle -> AwaitingReply -> Idle. The human message is
//! recorded synchronously before the provider call; the provider call
//! is the only suspension point, and its outcome (reply or diagnostic)
//! is recorded against the session id the turn started with, so a
//! reply still lands in the right transcript when the user has
//! switched sessions meanwhile.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use medchat_core::session::{Sender, SessionStore};
use medchat_core::utils::truncate;
use medchat_providers::CompletionProvider;

/// Orchestrates chat turns against a completion provider
pub struct ConversationController {
    store: Arc<Mutex<SessionStore>>,
    provider: Arc<dyn CompletionProvider>,
}

impl ConversationController {
    /// Create a new controller over a shared store and provider
    pub fn new(store: Arc<Mutex<SessionStore>>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { store, provider }
    }

    /// The shared session store
    pub fn store(&self) -> Arc<Mutex<SessionStore>> {
        self.store.clone()
    }

    /// Run one conversation turn.
    ///
    /// Empty or whitespace-only text is a silent no-op. A provider
    /// failure is not an error here: it becomes an assistant-sender
    /// transcript entry carrying the diagnostic.
    pub async fn send(&self, session_id: Uuid, text: &str) {
        if text.trim().is_empty() {
            debug!("Ignoring empty message for session {}", session_id);
            return;
        }

        info!("Sending turn for session {}: {}", session_id, truncate(text, 80));
        {
            let mut store = self.store.lock().await;
            store.append_message(session_id, text, Sender::Human);
        }

        match self.provider.generate(text).await {
            Ok(reply) => {
                let mut store = self.store.lock().await;
                store.append_message(session_id, &reply, Sender::Assistant);
            }
            Err(err) => {
                warn!("Completion failed for session {}: {}", session_id, err);
                let mut store = self.store.lock().await;
                store.append_message(session_id, &format!("Error: {}", err), Sender::Assistant);
            }
        }
    }
}

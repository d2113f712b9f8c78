//! Chat session storage
//!
//! Sessions hold ordered human/assistant transcripts. The whole
//! collection is serialized to a single JSON slot after every durable
//! mutation so a crash never loses more than ephemeral selection state.

pub mod manager;
pub mod persist;
pub mod store;

pub use manager::SessionStore;
pub use persist::{CollectionStorage, JsonFileStorage};
pub use store::{Collection, Message, Sender, Session, DEFAULT_SESSION_TITLE};

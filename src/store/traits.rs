//! Backend-agnostic `SessionStore` trait.

use async_trait::async_trait;

use crate::error::StorageError;

/// Namespaced state slots persisted per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Profile,
    Learning,
    Conversation,
    EmergencyContacts,
    Addresses,
}

impl StateKey {
    /// Storage key string for this slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Learning => "learning-data",
            Self::Conversation => "conversation-context",
            Self::EmergencyContacts => "emergency-contacts",
            Self::Addresses => "addresses",
        }
    }
}

/// Durable per-user state storage.
///
/// Values are whole JSON documents; every save replaces the previous value
/// for that (user, key) slot. There are no partial updates — the session
/// engine writes through its full in-memory state after each mutation.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the JSON document for a slot, or `None` if never written.
    async fn load(
        &self,
        user_id: &str,
        key: StateKey,
    ) -> Result<Option<serde_json::Value>, StorageError>;

    /// Replace the JSON document for a slot.
    async fn save(
        &self,
        user_id: &str,
        key: StateKey,
        value: &serde_json::Value,
    ) -> Result<(), StorageError>;
}

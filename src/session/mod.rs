//! Assistant session orchestration.
//!
//! One `AssistantSession` per user. `process_input` takes `&mut self`, so a
//! session's request stream is serialized by construction; independent user
//! sessions share no state and run concurrently.

pub mod model;
pub mod reply;

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::collab::{Commerce, Location, Messaging};
use crate::config::SessionConfig;
use crate::error::StorageError;
use crate::handlers::HandlerSet;
use crate::intent::IntentClassifier;
use crate::session::model::{
    ConversationContext, ConversationTurn, EmergencyContact, LearningTable, Role, SavedAddresses,
    UserProfile,
};
use crate::session::reply::SessionReply;
use crate::store::{SessionStore, StateKey};

/// Per-user state loaded at initialization.
struct SessionState {
    profile: UserProfile,
    context: ConversationContext,
    learning: LearningTable,
    contacts: Vec<EmergencyContact>,
    addresses: SavedAddresses,
}

/// An assistant session for a single user.
///
/// Construct with injected collaborators, then call [`initialize`] before
/// processing input. Inputs received earlier fail fast without touching
/// any state.
///
/// [`initialize`]: AssistantSession::initialize
pub struct AssistantSession {
    user_id: String,
    session_id: Uuid,
    config: SessionConfig,
    store: Arc<dyn SessionStore>,
    classifier: IntentClassifier,
    handlers: HandlerSet,
    state: Option<SessionState>,
}

impl AssistantSession {
    pub fn new(
        user_id: impl Into<String>,
        config: SessionConfig,
        store: Arc<dyn SessionStore>,
        commerce: Arc<dyn Commerce>,
        messaging: Arc<dyn Messaging>,
        location: Arc<dyn Location>,
    ) -> Self {
        let classifier = IntentClassifier::new(config.preferred_payment);
        let handlers = HandlerSet::new(commerce, messaging, location, config.clone());
        Self {
            user_id: user_id.into(),
            session_id: Uuid::new_v4(),
            config,
            store,
            classifier,
            handlers,
            state: None,
        }
    }

    /// Load all per-user state and mark the session ready.
    ///
    /// Returns `false` (after logging) if the store cannot be read; the
    /// session stays uninitialized and inputs keep failing fast.
    pub async fn initialize(&mut self) -> bool {
        match self.load_state().await {
            Ok(mut state) => {
                state.profile.usage_stats.sessions_started += 1;
                Self::flush(
                    self.store.as_ref(),
                    &self.user_id,
                    StateKey::Profile,
                    &state.profile,
                )
                .await;

                info!(
                    session = %self.session_id,
                    user = %self.user_id,
                    turns = state.context.len(),
                    contacts = state.contacts.len(),
                    "assistant session initialized"
                );
                self.state = Some(state);
                true
            }
            Err(err) => {
                error!(user = %self.user_id, error = %err, "session initialization failed");
                false
            }
        }
    }

    /// Process one user input and produce a reply.
    ///
    /// The returned `success` means "the session produced a response" —
    /// handler-level failure shows up only in the response text and action.
    pub async fn process_input(&mut self, input: &str, is_voice: bool) -> SessionReply {
        let Some(state) = self.state.as_mut() else {
            debug!(user = %self.user_id, "input received before initialization");
            return SessionReply::not_initialized();
        };

        state.profile.usage_stats.commands_issued += 1;
        state.profile.usage_stats.last_active = Utc::now();
        Self::flush(
            self.store.as_ref(),
            &self.user_id,
            StateKey::Profile,
            &state.profile,
        )
        .await;

        state
            .context
            .push(Role::User, input, self.config.history_limit);
        Self::flush(
            self.store.as_ref(),
            &self.user_id,
            StateKey::Conversation,
            &state.context,
        )
        .await;

        let classification = self.classifier.classify(input);
        debug!(
            intent = classification.intent.label(),
            confidence = classification.confidence as f64,
            is_voice,
            "dispatching input"
        );

        let (response, action) = if classification.confidence < self.config.confidence_threshold {
            (
                "I'm not sure I understood that correctly. Could you please rephrase?".to_string(),
                None,
            )
        } else if classification.intent.has_handler() {
            let outcome = self
                .handlers
                .dispatch(
                    classification.intent,
                    &classification.entities,
                    &state.profile,
                    &state.contacts,
                    &state.addresses,
                )
                .await;

            match outcome {
                Some(outcome) => {
                    state.learning.record_outcome(
                        classification.intent,
                        &classification.entities.observed_values(),
                        outcome.success,
                        Utc::now(),
                    );
                    Self::flush(
                        self.store.as_ref(),
                        &self.user_id,
                        StateKey::Learning,
                        &state.learning,
                    )
                    .await;
                    (outcome.response, outcome.action)
                }
                None => (self.handlers.general_response(input), None),
            }
        } else {
            (self.handlers.general_response(input), None)
        };

        state
            .context
            .push(Role::Assistant, &response, self.config.history_limit);
        Self::flush(
            self.store.as_ref(),
            &self.user_id,
            StateKey::Conversation,
            &state.context,
        )
        .await;

        SessionReply {
            success: true,
            response,
            action,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Conversation turns, oldest first. Empty before initialization.
    pub fn history(&self) -> &[ConversationTurn] {
        self.state
            .as_ref()
            .map(|s| s.context.turns())
            .unwrap_or_default()
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.state.as_ref().map(|s| &s.profile)
    }

    pub fn learning(&self) -> Option<&LearningTable> {
        self.state.as_ref().map(|s| &s.learning)
    }

    // ── Persistence ─────────────────────────────────────────────────

    async fn load_state(&self) -> Result<SessionState, StorageError> {
        Ok(SessionState {
            profile: self.load_json(StateKey::Profile).await?.unwrap_or_default(),
            context: self
                .load_json(StateKey::Conversation)
                .await?
                .unwrap_or_default(),
            learning: self.load_json(StateKey::Learning).await?.unwrap_or_default(),
            contacts: self
                .load_json(StateKey::EmergencyContacts)
                .await?
                .unwrap_or_default(),
            addresses: self
                .load_json(StateKey::Addresses)
                .await?
                .unwrap_or_default(),
        })
    }

    async fn load_json<T: DeserializeOwned>(
        &self,
        key: StateKey,
    ) -> Result<Option<T>, StorageError> {
        match self.store.load(&self.user_id, key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Best-effort write-through flush. A failed save keeps the in-memory
    /// state authoritative; the next flush of the same slot rewrites the
    /// full value.
    async fn flush<T: Serialize>(
        store: &dyn SessionStore,
        user_id: &str,
        key: StateKey,
        value: &T,
    ) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = key.as_str(), error = %err, "state serialization failed");
                return;
            }
        };
        if let Err(err) = store.save(user_id, key, &value).await {
            warn!(
                key = key.as_str(),
                error = %err,
                "state flush failed; continuing on in-memory state"
            );
        }
    }
}

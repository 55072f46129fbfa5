//! Configuration types.

use std::time::Duration;

use crate::collab::{PaymentMethod, Platform};

/// Session engine configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Conversation turns kept in the rolling context window.
    pub history_limit: usize,
    /// Classifications below this confidence get a clarification reply
    /// instead of a handler dispatch.
    pub confidence_threshold: f32,
    /// Platform used when the utterance names none.
    pub preferred_platform: Platform,
    /// Payment method used when the utterance names none.
    pub preferred_payment: PaymentMethod,
    /// Upper bound on any single collaborator call.
    pub collaborator_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: 20,
            confidence_threshold: 0.4,
            preferred_platform: Platform::Amazon,
            preferred_payment: PaymentMethod::Cod,
            collaborator_timeout: Duration::from_secs(12),
        }
    }
}

//! Caller-facing reply types and client actions.

use serde::{Deserialize, Serialize};

use crate::collab::Platform;
use crate::error::SessionError;
use crate::intent::AddressKind;

/// Follow-up the client app should perform, serialized as a tagged object
/// in the action format the mobile clients consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ClientAction {
    /// Order went through; show the confirmation.
    OrderPlaced { order_id: String, platform: Platform },
    /// The requested delivery address is not on file.
    PromptAddress { address_type: AddressKind },
    /// Show tracking detail for an order.
    TrackOrder { order_id: String },
    /// Show search results.
    SearchProduct { query: String, platform: Platform },
    /// SOS broadcast went out.
    SosActivated { contacts_notified: usize },
    /// No emergency contacts are configured.
    PromptEmergencyContacts,
    /// Nobody could be reached; offer to dial emergency services.
    PromptCallEmergency,
    /// Location services are unavailable.
    LocationError,
}

/// What one intent handler produced.
///
/// `success` feeds the learning table; the session-level reply succeeds as
/// long as a response was produced at all.
#[derive(Debug, Clone)]
pub struct HandlerOutcome {
    pub success: bool,
    pub response: String,
    pub action: Option<ClientAction>,
}

impl HandlerOutcome {
    pub fn ok(response: impl Into<String>) -> Self {
        Self {
            success: true,
            response: response.into(),
            action: None,
        }
    }

    pub fn fail(response: impl Into<String>) -> Self {
        Self {
            success: false,
            response: response.into(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: ClientAction) -> Self {
        self.action = Some(action);
        self
    }
}

/// Reply returned to the caller for one processed input.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReply {
    pub success: bool,
    pub response: String,
    pub action: Option<ClientAction>,
}

impl SessionReply {
    /// The fail-fast reply for inputs received before `initialize()`.
    pub fn not_initialized() -> Self {
        Self {
            success: false,
            response: SessionError::NotInitialized.to_string(),
            action: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_in_client_format() {
        let action = ClientAction::OrderPlaced {
            order_id: "AMZ123456".into(),
            platform: Platform::Amazon,
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "ORDER_PLACED");
        assert_eq!(json["orderId"], "AMZ123456");
        assert_eq!(json["platform"], "amazon");

        let prompt = ClientAction::PromptAddress {
            address_type: AddressKind::Work,
        };
        let json = serde_json::to_value(&prompt).unwrap();
        assert_eq!(json["type"], "PROMPT_ADDRESS");
        assert_eq!(json["addressType"], "work");
    }

    #[test]
    fn unit_actions_serialize_tag_only() {
        let json = serde_json::to_value(ClientAction::LocationError).unwrap();
        assert_eq!(json, serde_json::json!({"type": "LOCATION_ERROR"}));
    }

    #[test]
    fn not_initialized_reply_is_a_failure() {
        let reply = SessionReply::not_initialized();
        assert!(!reply.success);
        assert_eq!(reply.response, "System not initialized");
        assert!(reply.action.is_none());
    }
}

//! Collaborator interfaces — commerce, messaging, location, and the
//! vocabulary types they share.
//!
//! Pure I/O seams: the session consumes these through trait objects and
//! never implements business logic inside them. Every method returns a
//! `CollaboratorError` on failure; handlers convert those into user-facing
//! outcomes at the dispatch boundary.

pub mod mock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CollaboratorError;

// ── Vocabulary ──────────────────────────────────────────────────────

/// Supported commerce platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Amazon,
    Flipkart,
}

impl Platform {
    /// First platform named in the (lower-cased) utterance, if any.
    pub fn detect(input: &str) -> Option<Self> {
        if input.contains("amazon") {
            Some(Self::Amazon)
        } else if input.contains("flipkart") {
            Some(Self::Flipkart)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amazon => write!(f, "amazon"),
            Self::Flipkart => write!(f, "flipkart"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = CollaboratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "amazon" => Ok(Self::Amazon),
            "flipkart" => Ok(Self::Flipkart),
            other => Err(CollaboratorError::UnknownPlatform(other.to_string())),
        }
    }
}

/// Payment methods accepted at order time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cod,
    Card,
    Upi,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cod => write!(f, "COD"),
            Self::Card => write!(f, "CARD"),
            Self::Upi => write!(f, "UPI"),
        }
    }
}

// ── Wire types ──────────────────────────────────────────────────────

/// One product returned by a commerce search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductHit {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// Search response from a commerce platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults {
    pub results: Vec<ProductHit>,
}

/// Parameters for placing an order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub product: String,
    pub quantity: u32,
    pub platform: Platform,
    pub address: String,
    pub payment: PaymentMethod,
}

/// Confirmation for a placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: String,
}

/// Tracking state for an existing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingInfo {
    pub status: String,
    pub estimated_delivery: String,
}

/// Delivery confirmation for a sent message or location share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReceipt {
    pub message_id: String,
}

/// A device location fix.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
}

// ── Collaborator traits ─────────────────────────────────────────────

/// E-commerce platform access.
#[async_trait]
pub trait Commerce: Send + Sync {
    async fn search(
        &self,
        query: &str,
        platform: Platform,
    ) -> Result<SearchResults, CollaboratorError>;

    async fn place_order(&self, request: &OrderRequest)
        -> Result<OrderReceipt, CollaboratorError>;

    async fn track_order(&self, order_id: &str) -> Result<TrackingInfo, CollaboratorError>;
}

/// Messaging platform access (alerts and location shares).
#[async_trait]
pub trait Messaging: Send + Sync {
    async fn send_message(&self, to: &str, text: &str)
        -> Result<MessageReceipt, CollaboratorError>;

    async fn share_location(
        &self,
        to: &str,
        latitude: f64,
        longitude: f64,
        label: &str,
    ) -> Result<MessageReceipt, CollaboratorError>;
}

/// Device location access.
#[async_trait]
pub trait Location: Send + Sync {
    async fn current_location(&self) -> Result<LocationFix, CollaboratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_detect_prefers_amazon() {
        assert_eq!(Platform::detect("order on amazon"), Some(Platform::Amazon));
        assert_eq!(
            Platform::detect("buy from flipkart"),
            Some(Platform::Flipkart)
        );
        assert_eq!(Platform::detect("order a phone"), None);
    }

    #[test]
    fn platform_from_str_rejects_unknown() {
        assert_eq!("Amazon".parse::<Platform>().unwrap(), Platform::Amazon);
        let err = "ebay".parse::<Platform>().unwrap_err();
        assert!(matches!(err, CollaboratorError::UnknownPlatform(p) if p == "ebay"));
    }

    #[test]
    fn payment_method_display_matches_wire_format() {
        assert_eq!(PaymentMethod::Cod.to_string(), "COD");
        assert_eq!(
            serde_json::to_value(PaymentMethod::Upi).unwrap(),
            serde_json::json!("UPI")
        );
    }
}

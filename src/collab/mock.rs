//! Mock collaborator adapters — simulated third-party APIs.
//!
//! Stand-ins for the real commerce/messaging/location integrations so the
//! binary runs end-to-end without credentials: small random latency, canned
//! results, platform-prefixed identifiers.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tracing::debug;

use crate::collab::{
    Commerce, Location, LocationFix, MessageReceipt, Messaging, OrderReceipt, OrderRequest,
    Platform, ProductHit, SearchResults, TrackingInfo,
};
use crate::error::CollaboratorError;

/// Simulate network latency for a mocked API call.
async fn simulate_latency() {
    let ms = rand::thread_rng().gen_range(30..120);
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn mock_id(prefix: &str) -> String {
    format!("{}{}", prefix, rand::thread_rng().gen_range(100_000..1_000_000))
}

// ── Commerce ────────────────────────────────────────────────────────

/// Mocked commerce platforms (amazon/flipkart).
#[derive(Debug, Default)]
pub struct MockCommerce;

impl MockCommerce {
    pub fn new() -> Self {
        Self
    }

    fn order_prefix(platform: Platform) -> &'static str {
        match platform {
            Platform::Amazon => "AMZ",
            Platform::Flipkart => "FK",
        }
    }
}

#[async_trait]
impl Commerce for MockCommerce {
    async fn search(
        &self,
        query: &str,
        platform: Platform,
    ) -> Result<SearchResults, CollaboratorError> {
        simulate_latency().await;
        debug!(%platform, query, "mock commerce search");
        let (prefix, base_price) = match platform {
            Platform::Amazon => ("a", 19.99),
            Platform::Flipkart => ("f", 1999.0),
        };
        Ok(SearchResults {
            results: vec![
                ProductHit {
                    id: format!("{prefix}123"),
                    name: "Product 1".to_string(),
                    price: base_price,
                },
                ProductHit {
                    id: format!("{prefix}456"),
                    name: "Product 2".to_string(),
                    price: base_price + 10.0,
                },
            ],
        })
    }

    async fn place_order(
        &self,
        request: &OrderRequest,
    ) -> Result<OrderReceipt, CollaboratorError> {
        simulate_latency().await;
        debug!(
            platform = %request.platform,
            product = %request.product,
            quantity = request.quantity,
            "mock commerce order"
        );
        Ok(OrderReceipt {
            order_id: mock_id(Self::order_prefix(request.platform)),
        })
    }

    async fn track_order(&self, order_id: &str) -> Result<TrackingInfo, CollaboratorError> {
        simulate_latency().await;
        debug!(order_id, "mock commerce tracking");
        let eta = Utc::now() + chrono::Duration::days(3);
        Ok(TrackingInfo {
            status: "In transit".to_string(),
            estimated_delivery: eta.format("%Y-%m-%d").to_string(),
        })
    }
}

// ── Messaging ───────────────────────────────────────────────────────

/// Mocked WhatsApp-style messaging platform.
#[derive(Debug, Default)]
pub struct MockMessaging;

impl MockMessaging {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Messaging for MockMessaging {
    async fn send_message(
        &self,
        to: &str,
        text: &str,
    ) -> Result<MessageReceipt, CollaboratorError> {
        simulate_latency().await;
        debug!(to, chars = text.len(), "mock message send");
        Ok(MessageReceipt {
            message_id: mock_id("WA"),
        })
    }

    async fn share_location(
        &self,
        to: &str,
        latitude: f64,
        longitude: f64,
        label: &str,
    ) -> Result<MessageReceipt, CollaboratorError> {
        simulate_latency().await;
        debug!(to, latitude, longitude, label, "mock location share");
        Ok(MessageReceipt {
            message_id: mock_id("WA"),
        })
    }
}

// ── Location ────────────────────────────────────────────────────────

/// Mocked device location service with a fixed fix.
#[derive(Debug, Default)]
pub struct MockLocation;

impl MockLocation {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Location for MockLocation {
    async fn current_location(&self) -> Result<LocationFix, CollaboratorError> {
        simulate_latency().await;
        Ok(LocationFix {
            latitude: 37.7749,
            longitude: -122.4194,
            accuracy: 10.0,
        })
    }
}

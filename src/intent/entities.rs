//! Regex entity extraction.
//!
//! All patterns operate on the lower-cased utterance and reproduce the
//! shipped matching behavior exactly, including stop-word lists and
//! article handling — downstream learning data depends on these shapes.
//! Extraction never fails: a missing match yields `None` or the documented
//! default.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::collab::{PaymentMethod, Platform};

/// Which saved address an order should ship to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    Home,
    Work,
}

impl std::fmt::Display for AddressKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Work => write!(f, "work"),
        }
    }
}

/// Entities for an order utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEntities {
    pub product: Option<String>,
    pub quantity: u32,
    pub platform: Option<Platform>,
    pub address: AddressKind,
    pub payment: PaymentMethod,
}

/// Entities for a tracking utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackEntities {
    pub order_id: Option<String>,
}

/// Entities for a search utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchEntities {
    pub query: Option<String>,
}

/// Compiled extraction patterns, built once per session.
pub struct EntityExtractor {
    product: Regex,
    quantity: Regex,
    order_id: [Regex; 3],
    query: Regex,
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self {
            product: Regex::new(
                r"(?:order|buy)\s+(?:a|an|some)?\s+(.+?)(?:\s+from|\s+on|\s+at|\s+to|\s+for|\s+with|$)",
            )
            .unwrap(),
            quantity: Regex::new(r"(\d+)\s+(?:of|pieces|units|items)").unwrap(),
            // Tried in order; first match wins.
            order_id: [
                Regex::new(r"#(\w+)").unwrap(),
                Regex::new(r"order (?:id|number|#)?\s*(\w+)").unwrap(),
                Regex::new(r"tracking (?:id|number)?\s*(\w+)").unwrap(),
            ],
            query: Regex::new(
                r"(?:find|search for|look for|search)\s+(.+?)(?:\s+on|\s+in|\s+at|\s+from|$)",
            )
            .unwrap(),
        }
    }

    /// Extract the full order entity bag.
    ///
    /// `default_payment` is the session's preferred method, used when the
    /// utterance names none.
    pub fn order_entities(&self, input: &str, default_payment: PaymentMethod) -> OrderEntities {
        let product = self
            .product
            .captures(input)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|p| !p.is_empty());

        let quantity = self
            .quantity
            .captures(input)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(1);

        let address = if input.contains("work address") || input.contains("to work") {
            AddressKind::Work
        } else {
            AddressKind::Home
        };

        let payment = if input.contains("cod") || input.contains("cash on delivery") {
            PaymentMethod::Cod
        } else if input.contains("card") || input.contains("credit card") {
            PaymentMethod::Card
        } else if input.contains("upi") {
            PaymentMethod::Upi
        } else {
            default_payment
        };

        OrderEntities {
            product,
            quantity,
            platform: Platform::detect(input),
            address,
            payment,
        }
    }

    /// Extract an order identifier, e.g. from "order #123456" or
    /// "tracking number 123456".
    pub fn order_id(&self, input: &str) -> Option<String> {
        self.order_id
            .iter()
            .find_map(|re| re.captures(input))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extract a free-text search query.
    pub fn search_query(&self, input: &str) -> Option<String> {
        self.query
            .captures(input)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|q| !q.is_empty())
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

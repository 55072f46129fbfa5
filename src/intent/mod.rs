//! Intent classification — types shared by the classifier and extractors.

pub mod classifier;
pub mod entities;

pub use classifier::IntentClassifier;
pub use entities::{AddressKind, EntityExtractor, OrderEntities, SearchEntities, TrackEntities};

use serde::{Deserialize, Serialize};

/// Classified purpose of a user utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Order,
    Sos,
    Track,
    Search,
    General,
}

impl Intent {
    /// Short label for logging and learning-table keys.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Sos => "sos",
            Self::Track => "track",
            Self::Search => "search",
            Self::General => "general",
        }
    }

    /// Whether a dedicated handler exists for this intent.
    ///
    /// `General` routes to the canned-response fallback instead and never
    /// touches the learning table.
    pub fn has_handler(&self) -> bool {
        !matches!(self, Self::General)
    }
}

/// Entity bag extracted from one utterance.
///
/// Transient — produced fresh per input and aggregated into the learning
/// table, never persisted directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Entities {
    Order(OrderEntities),
    Track(TrackEntities),
    Search(SearchEntities),
    Empty,
}

impl Entities {
    /// Non-null field values as (field, value) pairs, for learning
    /// aggregation. Field names match the persisted learning-data format.
    pub fn observed_values(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Order(e) => {
                let mut values = Vec::new();
                if let Some(product) = &e.product {
                    values.push(("product", product.clone()));
                }
                values.push(("quantity", e.quantity.to_string()));
                if let Some(platform) = e.platform {
                    values.push(("platform", platform.to_string()));
                }
                values.push(("address", e.address.to_string()));
                values.push(("paymentMethod", e.payment.to_string()));
                values
            }
            Self::Track(e) => e
                .order_id
                .iter()
                .map(|id| ("orderId", id.clone()))
                .collect(),
            Self::Search(e) => e.query.iter().map(|q| ("query", q.clone())).collect(),
            Self::Empty => Vec::new(),
        }
    }
}

/// Classifier output for one utterance.
#[derive(Debug, Clone)]
pub struct Classification {
    pub intent: Intent,
    pub entities: Entities,
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::PaymentMethod;

    #[test]
    fn general_has_no_handler() {
        assert!(!Intent::General.has_handler());
        assert!(Intent::Order.has_handler());
        assert!(Intent::Sos.has_handler());
    }

    #[test]
    fn order_entities_observed_values_skip_missing_fields() {
        let entities = Entities::Order(OrderEntities {
            product: None,
            quantity: 1,
            platform: None,
            address: AddressKind::Home,
            payment: PaymentMethod::Cod,
        });
        let observed = entities.observed_values();
        let fields: Vec<&str> = observed.iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, vec!["quantity", "address", "paymentMethod"]);
    }

    #[test]
    fn track_entities_observed_values() {
        let entities = Entities::Track(TrackEntities {
            order_id: Some("ab123".into()),
        });
        assert_eq!(
            entities.observed_values(),
            vec![("orderId", "ab123".to_string())]
        );
        assert!(Entities::Track(TrackEntities { order_id: None })
            .observed_values()
            .is_empty());
    }
}

//! Keyword intent classification.
//!
//! Deterministic rules evaluated in fixed priority order — first match
//! wins. The SOS rule carries the highest confidence but is checked second:
//! an utterance matching both the order and SOS rules resolves to `Order`.

use tracing::debug;

use crate::collab::PaymentMethod;
use crate::intent::entities::{EntityExtractor, SearchEntities, TrackEntities};
use crate::intent::{Classification, Entities, Intent};

/// Rule-based classifier producing an intent, entity bag, and confidence.
pub struct IntentClassifier {
    extractor: EntityExtractor,
    default_payment: PaymentMethod,
}

impl IntentClassifier {
    pub fn new(default_payment: PaymentMethod) -> Self {
        Self {
            extractor: EntityExtractor::new(),
            default_payment,
        }
    }

    /// Classify a raw utterance.
    pub fn classify(&self, utterance: &str) -> Classification {
        let input = utterance.to_lowercase();

        let classification = if input.contains("order") || input.contains("buy") {
            Classification {
                intent: Intent::Order,
                entities: Entities::Order(
                    self.extractor.order_entities(&input, self.default_payment),
                ),
                confidence: 0.8,
            }
        } else if input.contains("sos")
            || input.contains("emergency")
            || input.contains("help me")
        {
            Classification {
                intent: Intent::Sos,
                entities: Entities::Empty,
                confidence: 0.9,
            }
        } else if input.contains("track")
            && (input.contains("order") || input.contains("package"))
        {
            Classification {
                intent: Intent::Track,
                entities: Entities::Track(TrackEntities {
                    order_id: self.extractor.order_id(&input),
                }),
                confidence: 0.75,
            }
        } else if input.contains("find") || input.contains("search") {
            Classification {
                intent: Intent::Search,
                entities: Entities::Search(SearchEntities {
                    query: self.extractor.search_query(&input),
                }),
                confidence: 0.7,
            }
        } else {
            Classification {
                intent: Intent::General,
                entities: Entities::Empty,
                confidence: 0.5,
            }
        };

        debug!(
            intent = classification.intent.label(),
            confidence = classification.confidence as f64,
            "classified utterance"
        );
        classification
    }
}

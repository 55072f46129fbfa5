//! Intent handlers — the business logic behind each dispatched intent.
//!
//! Handlers receive the entity bag plus the session state they need, call
//! out to collaborators with a bounded timeout, and always return a
//! `HandlerOutcome` — collaborator failures become apologetic responses,
//! never errors.

pub mod general;
pub mod order;
pub mod search;
pub mod sos;
pub mod track;

use std::future::Future;
use std::sync::Arc;

use crate::collab::{Commerce, Location, Messaging};
use crate::config::SessionConfig;
use crate::error::CollaboratorError;
use crate::handlers::general::CannedResponder;
use crate::intent::{Entities, Intent};
use crate::session::model::{EmergencyContact, SavedAddresses, UserProfile};
use crate::session::reply::HandlerOutcome;

/// Handler dependencies, shared across intents.
pub struct HandlerSet {
    pub(crate) commerce: Arc<dyn Commerce>,
    pub(crate) messaging: Arc<dyn Messaging>,
    pub(crate) location: Arc<dyn Location>,
    pub(crate) config: SessionConfig,
    canned: CannedResponder,
}

impl HandlerSet {
    pub fn new(
        commerce: Arc<dyn Commerce>,
        messaging: Arc<dyn Messaging>,
        location: Arc<dyn Location>,
        config: SessionConfig,
    ) -> Self {
        Self {
            commerce,
            messaging,
            location,
            config,
            canned: CannedResponder::new(),
        }
    }

    /// Dispatch a classified intent to its handler.
    ///
    /// Returns `None` for `General` (and any mismatched entity bag, which
    /// the classifier never produces) — the session routes those to the
    /// canned responder without a learning update.
    pub async fn dispatch(
        &self,
        intent: Intent,
        entities: &Entities,
        profile: &UserProfile,
        contacts: &[EmergencyContact],
        addresses: &SavedAddresses,
    ) -> Option<HandlerOutcome> {
        match (intent, entities) {
            (Intent::Order, Entities::Order(e)) => Some(self.handle_order(e, addresses).await),
            (Intent::Sos, _) => Some(self.handle_sos(profile, contacts).await),
            (Intent::Track, Entities::Track(e)) => Some(self.handle_track(e).await),
            (Intent::Search, Entities::Search(e)) => Some(self.handle_search(e).await),
            _ => None,
        }
    }

    /// Canned response for the fallback path.
    pub fn general_response(&self, input: &str) -> String {
        self.canned.respond(input)
    }

    /// Bound a collaborator call to the configured timeout. An elapsed
    /// timeout is a handler failure, never a session failure.
    async fn bounded<T>(
        &self,
        service: &'static str,
        call: impl Future<Output = Result<T, CollaboratorError>>,
    ) -> Result<T, CollaboratorError> {
        match tokio::time::timeout(self.config.collaborator_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CollaboratorError::Timeout {
                service: service.to_string(),
                timeout: self.config.collaborator_timeout,
            }),
        }
    }
}

#[cfg(test)]
pub(crate) mod stubs {
    //! Shared collaborator stubs for handler tests.

    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use crate::collab::{
        Commerce, Location, LocationFix, MessageReceipt, Messaging, OrderReceipt, OrderRequest,
        Platform, ProductHit, SearchResults, TrackingInfo,
    };
    use crate::error::CollaboratorError;

    fn unavailable(service: &str) -> CollaboratorError {
        CollaboratorError::Unavailable {
            service: service.to_string(),
            reason: "stubbed outage".to_string(),
        }
    }

    /// Commerce stub with deterministic answers.
    #[derive(Default)]
    pub struct StubCommerce {
        pub fail: bool,
    }

    #[async_trait]
    impl Commerce for StubCommerce {
        async fn search(
            &self,
            query: &str,
            _platform: Platform,
        ) -> Result<SearchResults, CollaboratorError> {
            if self.fail {
                return Err(unavailable("commerce"));
            }
            Ok(SearchResults {
                results: vec![ProductHit {
                    id: "p1".into(),
                    name: query.to_string(),
                    price: 9.99,
                }],
            })
        }

        async fn place_order(
            &self,
            _request: &OrderRequest,
        ) -> Result<OrderReceipt, CollaboratorError> {
            if self.fail {
                return Err(unavailable("commerce"));
            }
            Ok(OrderReceipt {
                order_id: "STUB1001".into(),
            })
        }

        async fn track_order(&self, _order_id: &str) -> Result<TrackingInfo, CollaboratorError> {
            if self.fail {
                return Err(unavailable("commerce"));
            }
            Ok(TrackingInfo {
                status: "In transit".into(),
                estimated_delivery: "2026-08-10".into(),
            })
        }
    }

    /// Messaging stub counting deliveries; can fail for selected recipients.
    #[derive(Default)]
    pub struct StubMessaging {
        pub sends: AtomicUsize,
        pub shares: AtomicUsize,
        pub failing_recipient: Option<String>,
    }

    #[async_trait]
    impl Messaging for StubMessaging {
        async fn send_message(
            &self,
            to: &str,
            _text: &str,
        ) -> Result<MessageReceipt, CollaboratorError> {
            if self.failing_recipient.as_deref() == Some(to) {
                return Err(unavailable("messaging"));
            }
            self.sends.fetch_add(1, Ordering::SeqCst);
            Ok(MessageReceipt {
                message_id: "m1".into(),
            })
        }

        async fn share_location(
            &self,
            to: &str,
            _latitude: f64,
            _longitude: f64,
            _label: &str,
        ) -> Result<MessageReceipt, CollaboratorError> {
            if self.failing_recipient.as_deref() == Some(to) {
                return Err(unavailable("messaging"));
            }
            self.shares.fetch_add(1, Ordering::SeqCst);
            Ok(MessageReceipt {
                message_id: "m2".into(),
            })
        }
    }

    /// Location stub; optionally failing or hanging.
    #[derive(Default)]
    pub struct StubLocation {
        pub fail: bool,
        pub hang: bool,
    }

    #[async_trait]
    impl Location for StubLocation {
        async fn current_location(&self) -> Result<LocationFix, CollaboratorError> {
            if self.hang {
                tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
            }
            if self.fail {
                return Err(unavailable("location"));
            }
            Ok(LocationFix {
                latitude: 37.7749,
                longitude: -122.4194,
                accuracy: 10.0,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::stubs::{StubCommerce, StubLocation, StubMessaging};
    use super::*;
    use crate::intent::entities::TrackEntities;

    fn handler_set() -> HandlerSet {
        HandlerSet::new(
            Arc::new(StubCommerce::default()),
            Arc::new(StubMessaging::default()),
            Arc::new(StubLocation::default()),
            SessionConfig::default(),
        )
    }

    #[tokio::test]
    async fn general_intent_is_not_dispatched() {
        let handlers = handler_set();
        let outcome = handlers
            .dispatch(
                Intent::General,
                &Entities::Empty,
                &UserProfile::default(),
                &[],
                &SavedAddresses::default(),
            )
            .await;
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn dispatched_intents_produce_outcomes() {
        let handlers = handler_set();
        let outcome = handlers
            .dispatch(
                Intent::Track,
                &Entities::Track(TrackEntities {
                    order_id: Some("x1".into()),
                }),
                &UserProfile::default(),
                &[],
                &SavedAddresses::default(),
            )
            .await;
        assert!(outcome.unwrap().success);
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_converts_elapsed_timeout() {
        let mut config = SessionConfig::default();
        config.collaborator_timeout = std::time::Duration::from_secs(1);
        let handlers = HandlerSet::new(
            Arc::new(StubCommerce::default()),
            Arc::new(StubMessaging::default()),
            Arc::new(StubLocation {
                hang: true,
                ..Default::default()
            }),
            config,
        );

        let result = handlers
            .bounded("location", handlers.location.current_location())
            .await;
        assert!(matches!(
            result,
            Err(CollaboratorError::Timeout { service, .. }) if service == "location"
        ));
    }
}

//! Order tracking handler.

use tracing::warn;

use crate::error::CollaboratorError;
use crate::handlers::HandlerSet;
use crate::intent::TrackEntities;
use crate::session::reply::{ClientAction, HandlerOutcome};

impl HandlerSet {
    pub(super) async fn handle_track(&self, entities: &TrackEntities) -> HandlerOutcome {
        let Some(order_id) = &entities.order_id else {
            return HandlerOutcome::fail(
                "I need an order ID to track your package. Do you have the order number?",
            );
        };

        match self
            .bounded("commerce", self.commerce.track_order(order_id))
            .await
        {
            Ok(info) => HandlerOutcome::ok(format!(
                "Your order {} is currently {}. Estimated delivery: {}.",
                order_id, info.status, info.estimated_delivery
            ))
            .with_action(ClientAction::TrackOrder {
                order_id: order_id.clone(),
            }),
            Err(CollaboratorError::Rejected { reason, .. }) => {
                HandlerOutcome::fail(format!("I couldn't track that order. {reason}"))
            }
            Err(err) => {
                warn!(error = %err, order_id, "order tracking failed");
                HandlerOutcome::fail(
                    "I'm having trouble reaching the tracking service. Please try again later.",
                )
            }
        }
    }
}

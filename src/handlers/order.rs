//! Order placement handler.

use tracing::warn;

use crate::collab::OrderRequest;
use crate::error::CollaboratorError;
use crate::handlers::HandlerSet;
use crate::intent::OrderEntities;
use crate::session::model::SavedAddresses;
use crate::session::reply::{ClientAction, HandlerOutcome};

impl HandlerSet {
    pub(super) async fn handle_order(
        &self,
        entities: &OrderEntities,
        addresses: &SavedAddresses,
    ) -> HandlerOutcome {
        let Some(product) = &entities.product else {
            return HandlerOutcome::fail(
                "I need to know what product you'd like to order. Could you please specify?",
            );
        };

        let platform = entities.platform.unwrap_or(self.config.preferred_platform);

        let Some(address) = addresses.resolve(entities.address) else {
            return HandlerOutcome::fail(format!(
                "I don't have your {} address saved. Would you like to add it now?",
                entities.address
            ))
            .with_action(ClientAction::PromptAddress {
                address_type: entities.address,
            });
        };

        let request = OrderRequest {
            product: product.clone(),
            quantity: entities.quantity,
            platform,
            address: address.to_string(),
            payment: entities.payment,
        };

        match self
            .bounded("commerce", self.commerce.place_order(&request))
            .await
        {
            Ok(receipt) => {
                let response = format!(
                    "I've placed an order for {} {} on {}. It will be delivered to your {} \
                     address with {} payment. Your order ID is {}.",
                    entities.quantity,
                    product,
                    platform,
                    entities.address,
                    entities.payment,
                    receipt.order_id
                );
                HandlerOutcome::ok(response).with_action(ClientAction::OrderPlaced {
                    order_id: receipt.order_id,
                    platform,
                })
            }
            Err(CollaboratorError::Rejected { reason, .. }) => {
                HandlerOutcome::fail(format!("I couldn't complete your order. {reason}"))
            }
            Err(err) => {
                warn!(error = %err, "order placement failed");
                HandlerOutcome::fail(
                    "I'm having trouble connecting to the shopping service. Please try again later.",
                )
            }
        }
    }
}

//! Product search handler.

use tracing::warn;

use crate::error::CollaboratorError;
use crate::handlers::HandlerSet;
use crate::intent::SearchEntities;
use crate::session::reply::{ClientAction, HandlerOutcome};

impl HandlerSet {
    pub(super) async fn handle_search(&self, entities: &SearchEntities) -> HandlerOutcome {
        let Some(query) = &entities.query else {
            return HandlerOutcome::fail("What product would you like me to search for?");
        };

        let platform = self.config.preferred_platform;

        match self
            .bounded("commerce", self.commerce.search(query, platform))
            .await
        {
            Ok(results) => HandlerOutcome::ok(format!(
                "I found {} results for {} on {}.",
                results.results.len(),
                query,
                platform
            ))
            .with_action(ClientAction::SearchProduct {
                query: query.clone(),
                platform,
            }),
            Err(CollaboratorError::Rejected { reason, .. }) => {
                HandlerOutcome::fail(format!("I couldn't search for that. {reason}"))
            }
            Err(err) => {
                warn!(error = %err, query, "product search failed");
                HandlerOutcome::fail(
                    "I'm having trouble connecting to the shopping service. Please try again later.",
                )
            }
        }
    }
}

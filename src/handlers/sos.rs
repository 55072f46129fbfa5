//! SOS broadcast handler.
//!
//! Check order matters: contacts are validated before any collaborator is
//! touched, so a contact-less SOS never reaches the location or messaging
//! services.

use tracing::warn;

use crate::handlers::HandlerSet;
use crate::session::model::{EmergencyContact, UserProfile};
use crate::session::reply::{ClientAction, HandlerOutcome};

impl HandlerSet {
    pub(super) async fn handle_sos(
        &self,
        profile: &UserProfile,
        contacts: &[EmergencyContact],
    ) -> HandlerOutcome {
        if contacts.is_empty() {
            return HandlerOutcome::fail(
                "You don't have any emergency contacts set up. Would you like to add some now?",
            )
            .with_action(ClientAction::PromptEmergencyContacts);
        }

        let fix = match self
            .bounded("location", self.location.current_location())
            .await
        {
            Ok(fix) => fix,
            Err(err) => {
                warn!(error = %err, "location fetch failed during SOS");
                return HandlerOutcome::fail(
                    "I couldn't get your current location. Please make sure location services \
                     are enabled.",
                )
                .with_action(ClientAction::LocationError);
            }
        };

        let alert = format!("EMERGENCY: {} has triggered an SOS alert.", profile.name);
        let mut notified = 0usize;
        for contact in contacts {
            let sent = self
                .bounded("messaging", self.messaging.send_message(&contact.phone, &alert))
                .await;
            let shared = self
                .bounded(
                    "messaging",
                    self.messaging.share_location(
                        &contact.phone,
                        fix.latitude,
                        fix.longitude,
                        "Current location",
                    ),
                )
                .await;

            if sent.is_ok() && shared.is_ok() {
                notified += 1;
            } else {
                warn!(contact = %contact.name, "failed to notify emergency contact");
            }
        }

        if notified > 0 {
            HandlerOutcome::ok(format!(
                "SOS alert sent to {} of {} emergency contacts with your current location.",
                notified,
                contacts.len()
            ))
            .with_action(ClientAction::SosActivated {
                contacts_notified: notified,
            })
        } else {
            HandlerOutcome::fail(
                "I couldn't send SOS messages to any of your emergency contacts. Would you \
                 like me to call emergency services?",
            )
            .with_action(ClientAction::PromptCallEmergency)
        }
    }
}

//! Canned responses for utterances with no dedicated handler.
//!
//! Greeting/farewell/thanks patterns match on the raw input; anything else
//! gets a response from the unknown pool. This path never touches the
//! learning table.

use rand::seq::SliceRandom;
use regex::Regex;

const GREETINGS: [&str; 3] = [
    "Hello! How can I assist you today?",
    "Hi there! I'm Zynthra, your personal AI assistant.",
    "Greetings! What can I help you with?",
];

const FAREWELLS: [&str; 3] = [
    "Goodbye! Have a great day!",
    "See you later! Call me if you need anything.",
    "Bye for now! I'll be here when you need me.",
];

const THANKS: [&str; 3] = [
    "You're welcome! Is there anything else I can help with?",
    "Happy to help! Let me know if you need anything else.",
    "My pleasure! What else can I do for you today?",
];

const UNKNOWN: [&str; 3] = [
    "I'm not sure I understand. Could you rephrase that?",
    "I'm still learning. Could you try asking in a different way?",
    "I don't have information about that yet. Is there something else I can help with?",
];

/// Pattern-matched canned response pools.
pub struct CannedResponder {
    greeting: Regex,
    farewell: Regex,
    thanks: Regex,
}

impl CannedResponder {
    pub fn new() -> Self {
        Self {
            greeting: Regex::new(r"(?i)^(hi|hello|hey|greetings)").unwrap(),
            farewell: Regex::new(r"(?i)^(bye|goodbye|see you|farewell)").unwrap(),
            thanks: Regex::new(r"(?i)^(thanks|thank you|appreciate it)").unwrap(),
        }
    }

    /// Pick a response for the raw input.
    pub fn respond(&self, input: &str) -> String {
        let pool: &[&str] = if self.greeting.is_match(input) {
            &GREETINGS
        } else if self.farewell.is_match(input) {
            &FAREWELLS
        } else if self.thanks.is_match(input) {
            &THANKS
        } else {
            &UNKNOWN
        };

        pool.choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(UNKNOWN[0])
            .to_string()
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_prefix_selects_greeting_pool() {
        let responder = CannedResponder::new();
        let response = responder.respond("Hello there");
        assert!(GREETINGS.contains(&response.as_str()));
    }

    #[test]
    fn farewell_and_thanks_pools() {
        let responder = CannedResponder::new();
        assert!(FAREWELLS.contains(&responder.respond("goodbye now").as_str()));
        assert!(THANKS.contains(&responder.respond("Thank you so much").as_str()));
    }

    #[test]
    fn prefix_matching_only() {
        // "say hello" does not start with a greeting keyword.
        let responder = CannedResponder::new();
        assert!(UNKNOWN.contains(&responder.respond("say hello").as_str()));
    }

    #[test]
    fn unmatched_input_uses_unknown_pool() {
        let responder = CannedResponder::new();
        assert!(UNKNOWN.contains(&responder.respond("what is the meaning of life").as_str()));
    }
}

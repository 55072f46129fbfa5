//! Session state model — profile, conversation context, learning table,
//! emergency contacts, and saved addresses.
//!
//! Everything here serializes with the camelCase field names the mobile
//! clients already persist, so existing state documents load unchanged.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::intent::{AddressKind, Intent};

// ── Conversation context ────────────────────────────────────────────

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the rolling conversation window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Rolling conversation context, bounded to the most recent turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationContext {
    turns: Vec<ConversationTurn>,
}

impl ConversationContext {
    /// Append a turn, evicting the oldest entries down to `limit`.
    pub fn push(&mut self, role: Role, content: &str, limit: usize) {
        self.turns.push(ConversationTurn {
            role,
            content: content.to_string(),
            timestamp: Utc::now(),
        });
        while self.turns.len() > limit {
            self.turns.remove(0);
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

// ── Learning table ──────────────────────────────────────────────────

/// Aggregated per-intent usage statistics. Not machine learning — counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningRecord {
    pub success_count: u64,
    pub failure_count: u64,
    pub last_used: Option<DateTime<Utc>>,
    /// field name → observed value → occurrence count
    pub entities: BTreeMap<String, BTreeMap<String, u64>>,
}

/// Per-intent learning records. Records are never deleted and counts only
/// grow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LearningTable {
    records: BTreeMap<String, LearningRecord>,
}

impl LearningTable {
    /// Record one dispatched handler invocation.
    pub fn record_outcome(
        &mut self,
        intent: Intent,
        observed: &[(&'static str, String)],
        success: bool,
        now: DateTime<Utc>,
    ) {
        let record = self.records.entry(intent.label().to_string()).or_default();
        if success {
            record.success_count += 1;
        } else {
            record.failure_count += 1;
        }
        record.last_used = Some(now);
        for (field, value) in observed {
            *record
                .entities
                .entry((*field).to_string())
                .or_default()
                .entry(value.clone())
                .or_insert(0) += 1;
        }
    }

    pub fn get(&self, intent: Intent) -> Option<&LearningRecord> {
        self.records.get(intent.label())
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── User profile ────────────────────────────────────────────────────

/// Assistant behavior preferences carried in the profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub voice_enabled: bool,
    pub wake_word_enabled: bool,
    pub theme: String,
    pub language: String,
    pub voice_rate: f32,
    pub voice_pitch: f32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            voice_enabled: true,
            wake_word_enabled: true,
            theme: "auto".to_string(),
            language: "en".to_string(),
            voice_rate: 1.0,
            voice_pitch: 1.0,
        }
    }
}

/// Rolling usage counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageStats {
    pub commands_issued: u64,
    pub sessions_started: u64,
    pub last_active: DateTime<Utc>,
}

impl Default for UsageStats {
    fn default() -> Self {
        Self {
            commands_issued: 0,
            sessions_started: 0,
            last_active: Utc::now(),
        }
    }
}

/// Per-user profile, created with defaults on first run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub preferences: Preferences,
    pub usage_stats: UsageStats,
    pub favorite_commands: Vec<String>,
    pub frequent_locations: Vec<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "User".to_string(),
            preferences: Preferences::default(),
            usage_stats: UsageStats::default(),
            favorite_commands: Vec::new(),
            frequent_locations: Vec::new(),
        }
    }
}

// ── Contacts and addresses ──────────────────────────────────────────

/// Someone to notify when an SOS fires.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
}

/// Saved delivery addresses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavedAddresses {
    pub home: Option<String>,
    pub work: Option<String>,
}

impl SavedAddresses {
    pub fn resolve(&self, kind: AddressKind) -> Option<&str> {
        match kind {
            AddressKind::Home => self.home.as_deref(),
            AddressKind::Work => self.work.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_evicts_oldest_first() {
        let mut ctx = ConversationContext::default();
        for i in 0..25 {
            ctx.push(Role::User, &format!("message {i}"), 20);
        }
        assert_eq!(ctx.len(), 20);
        assert_eq!(ctx.turns()[0].content, "message 5");
        assert_eq!(ctx.turns()[19].content, "message 24");
    }

    #[test]
    fn context_stays_bounded_across_role_mix() {
        let mut ctx = ConversationContext::default();
        for i in 0..40 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            ctx.push(role, "turn", 20);
            assert!(ctx.len() <= 20);
        }
        assert_eq!(ctx.len(), 20);
    }

    #[test]
    fn learning_counts_accumulate_monotonically() {
        let mut table = LearningTable::default();
        let observed = vec![("product", "phone".to_string())];

        table.record_outcome(Intent::Order, &observed, true, Utc::now());
        table.record_outcome(Intent::Order, &observed, false, Utc::now());
        table.record_outcome(Intent::Order, &observed, true, Utc::now());

        let record = table.get(Intent::Order).unwrap();
        assert_eq!(record.success_count, 2);
        assert_eq!(record.failure_count, 1);
        assert_eq!(record.entities["product"]["phone"], 3);
        assert!(record.last_used.is_some());
        assert!(table.get(Intent::Sos).is_none());
    }

    #[test]
    fn profile_defaults_match_first_run_shape() {
        let profile = UserProfile::default();
        assert_eq!(profile.name, "User");
        assert_eq!(profile.usage_stats.commands_issued, 0);
        assert!(profile.preferences.voice_enabled);
        assert_eq!(profile.preferences.theme, "auto");
        assert!(profile.favorite_commands.is_empty());
    }

    #[test]
    fn profile_serializes_camel_case() {
        let json = serde_json::to_value(UserProfile::default()).unwrap();
        assert!(json.get("usageStats").is_some());
        assert!(json["usageStats"].get("commandsIssued").is_some());
        assert!(json.get("favoriteCommands").is_some());
    }

    #[test]
    fn learning_record_tolerates_missing_fields() {
        // Old documents may predate some fields; they must still load.
        let record: LearningRecord =
            serde_json::from_value(serde_json::json!({"successCount": 7})).unwrap();
        assert_eq!(record.success_count, 7);
        assert_eq!(record.failure_count, 0);
        assert!(record.entities.is_empty());
    }

    #[test]
    fn addresses_resolve_by_kind() {
        let addresses = SavedAddresses {
            home: Some("221B Baker Street".into()),
            work: None,
        };
        assert_eq!(
            addresses.resolve(AddressKind::Home),
            Some("221B Baker Street")
        );
        assert_eq!(addresses.resolve(AddressKind::Work), None);
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clipboard::SensitiveDataType;

pub const DEFAULT_MAX_HISTORY_ITEMS: usize = 50;
pub const DEFAULT_MAX_PINNED_ITEMS: usize = 20;
pub const DEFAULT_PAUSE_AUTO_RESUME_MINUTES: u32 = 5;

/// What to do with a capture classified as sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SensitivePolicy {
    Allow,
    AutoDelete30s,
    NeverStore,
    /// No prompt exists at this layer; the item is stored with its
    /// sensitive type so a UI can warn.
    AskEachTime,
}

impl SensitivePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            SensitivePolicy::Allow => "allow",
            SensitivePolicy::AutoDelete30s => "autoDelete30s",
            SensitivePolicy::NeverStore => "neverStore",
            SensitivePolicy::AskEachTime => "askEachTime",
        }
    }
}

// Unknown rule strings fall back to askEachTime.
impl From<String> for SensitivePolicy {
    fn from(value: String) -> Self {
        match value.as_str() {
            "allow" => SensitivePolicy::Allow,
            "autoDelete30s" => SensitivePolicy::AutoDelete30s,
            "neverStore" => SensitivePolicy::NeverStore,
            _ => SensitivePolicy::AskEachTime,
        }
    }
}

impl From<SensitivePolicy> for String {
    fn from(policy: SensitivePolicy) -> Self {
        policy.as_str().to_string()
    }
}

/// User preferences, persisted as `preferences.json`.
///
/// Missing keys take their defaults so older files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub launch_at_login: bool,
    pub is_paused: bool,
    /// `None` stays paused until resumed by hand.
    pub pause_auto_resume_minutes: Option<u32>,
    pub sensitive_data_rules: BTreeMap<String, SensitivePolicy>,
    pub max_history_items: usize,
    /// Stored for the UI only; the hard pin cap comes from the engine config.
    pub max_pinned_items: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        let sensitive_data_rules = [
            (SensitiveDataType::CreditCard, SensitivePolicy::Allow),
            (SensitiveDataType::ApiKey, SensitivePolicy::Allow),
            (SensitiveDataType::Password, SensitivePolicy::AutoDelete30s),
            (SensitiveDataType::PrivateKey, SensitivePolicy::NeverStore),
        ]
        .into_iter()
        .map(|(kind, policy)| (kind.as_key().to_string(), policy))
        .collect();

        Self {
            launch_at_login: false,
            is_paused: false,
            pause_auto_resume_minutes: Some(DEFAULT_PAUSE_AUTO_RESUME_MINUTES),
            sensitive_data_rules,
            max_history_items: DEFAULT_MAX_HISTORY_ITEMS,
            max_pinned_items: DEFAULT_MAX_PINNED_ITEMS,
        }
    }
}

impl Preferences {
    /// Rule for a detected category; unmapped categories resolve to
    /// [`SensitivePolicy::AskEachTime`].
    pub fn policy_for(&self, kind: SensitiveDataType) -> SensitivePolicy {
        self.sensitive_data_rules
            .get(kind.as_key())
            .copied()
            .unwrap_or(SensitivePolicy::AskEachTime)
    }

    pub fn set_policy(&mut self, kind: SensitiveDataType, policy: SensitivePolicy) {
        self.sensitive_data_rules
            .insert(kind.as_key().to_string(), policy);
    }
}

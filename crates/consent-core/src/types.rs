//! Core types for the consent engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage key under which the consent record is persisted
pub const CONSENT_STORAGE_KEY: &str = "cookieConsent";

/// Consent policy/schema version written into every saved record
///
/// The version is stamped at save time and is not validated on read; it is
/// a static tag, not a per-save counter.
pub const CONSENT_VERSION: &str = "1.0";

/// Name of the in-page notification emitted after preferences are applied
pub const CONSENT_UPDATED_EVENT: &str = "cookieConsentUpdated";

/// Cookie category a site can ask consent for
///
/// `Necessary` is always granted and never user-settable; the other three
/// are the optional categories shown in the settings view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentCategory {
    Necessary,
    Analytics,
    Marketing,
    Preferences,
}

impl ConsentCategory {
    /// The three categories a user can opt in or out of
    pub const OPTIONAL: [ConsentCategory; 3] = [
        ConsentCategory::Analytics,
        ConsentCategory::Marketing,
        ConsentCategory::Preferences,
    ];

    /// Stable lowercase name, matching the persisted field names
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsentCategory::Necessary => "necessary",
            ConsentCategory::Analytics => "analytics",
            ConsentCategory::Marketing => "marketing",
            ConsentCategory::Preferences => "preferences",
        }
    }
}

impl std::fmt::Display for ConsentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four consent flags
///
/// All fields are required on deserialization: a stored value missing any
/// flag does not parse and is treated as "no consent recorded" by the
/// manager. `necessary` is an invariant, not a choice; constructors and
/// [`normalize`](ConsentPreferences::normalize) keep it `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentPreferences {
    pub necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
    pub preferences: bool,
}

impl ConsentPreferences {
    /// All four categories granted
    pub fn accept_all() -> Self {
        Self {
            necessary: true,
            analytics: true,
            marketing: true,
            preferences: true,
        }
    }

    /// Only the necessary category granted
    pub fn reject_all() -> Self {
        Self {
            necessary: true,
            analytics: false,
            marketing: false,
            preferences: false,
        }
    }

    /// Custom selection over the three optional categories
    ///
    /// `necessary` is forced on regardless of the caller's toggles.
    pub fn custom(analytics: bool, marketing: bool, preferences: bool) -> Self {
        Self {
            necessary: true,
            analytics,
            marketing,
            preferences,
        }
    }

    /// Whether the given category is currently granted
    pub fn is_enabled(&self, category: ConsentCategory) -> bool {
        match category {
            ConsentCategory::Necessary => self.necessary,
            ConsentCategory::Analytics => self.analytics,
            ConsentCategory::Marketing => self.marketing,
            ConsentCategory::Preferences => self.preferences,
        }
    }

    /// Re-establish the `necessary` invariant on a value read from storage
    ///
    /// Hand-edited or out-of-date records may carry `necessary: false`;
    /// every read path passes through here so in-memory state never does.
    pub fn normalize(mut self) -> Self {
        self.necessary = true;
        self
    }
}

impl Default for ConsentPreferences {
    fn default() -> Self {
        Self::reject_all()
    }
}

/// Persisted envelope around a preference set
///
/// Exactly one record exists per store at a time; saves overwrite the whole
/// record (last-write-wins, no merging).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentRecord {
    /// Consent policy version in effect when the record was written
    pub version: String,
    /// Time of last save, RFC 3339 on the wire
    pub timestamp: DateTime<Utc>,
    /// The saved preference set
    pub preferences: ConsentPreferences,
}

impl ConsentRecord {
    /// Create a record for the given preferences, stamped with the current
    /// version constant and save time
    pub fn new(preferences: ConsentPreferences) -> Self {
        Self {
            version: CONSENT_VERSION.to_string(),
            timestamp: Utc::now(),
            preferences,
        }
    }
}

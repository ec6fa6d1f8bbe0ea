//! The per-form session record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// One issued anti-forgery token: the posted parameter name and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsrfToken {
    /// Parameter name the token is posted under.
    pub name: String,
    /// The secret value.
    pub value: String,
}

/// Session data belonging to one form.
///
/// The three slots default to empty collections. An expiration of `0`
/// seconds means the record lives until the browser session ends, so no
/// expire date is tracked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionNamespace {
    /// The namespace key, usually derived from the form id.
    pub name: String,
    /// Submitted values keyed by field name.
    #[serde(default)]
    pub values: serde_json::Map<String, serde_json::Value>,
    /// Validation errors of the last submission, in order.
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    /// Anti-forgery tokens issued for the form.
    #[serde(default)]
    pub csrf: Vec<CsrfToken>,
    #[serde(default)]
    expiration_seconds: u64,
    #[serde(default)]
    expire_date: Option<DateTime<Utc>>,
    /// Whether any slot changed since the namespace was loaded.
    #[serde(skip)]
    pub modified: bool,
}

impl SessionNamespace {
    /// Creates an empty namespace without expiration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: serde_json::Map::new(),
            errors: Vec::new(),
            csrf: Vec::new(),
            expiration_seconds: 0,
            expire_date: None,
            modified: false,
        }
    }

    /// Sets the lifetime of the record, counted from now. `0` removes any
    /// expire date, and so does a lifetime reaching past the last
    /// representable date.
    pub fn set_expiration_seconds(&mut self, seconds: u64) {
        self.expiration_seconds = seconds;
        self.expire_date = if seconds == 0 {
            None
        } else {
            i64::try_from(seconds)
                .ok()
                .and_then(Duration::try_seconds)
                .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        };
        self.modified = true;
    }

    /// Returns the configured lifetime in seconds.
    pub const fn expiration_seconds(&self) -> u64 {
        self.expiration_seconds
    }

    /// Returns the moment the record expires, if it has a lifetime.
    pub const fn expire_date(&self) -> Option<DateTime<Utc>> {
        self.expire_date
    }

    /// Returns `true` if the record has a lifetime and it has passed.
    pub fn is_expired(&self) -> bool {
        self.expire_date.is_some_and(|date| Utc::now() > date)
    }

    /// Replaces the values slot.
    pub fn set_values(&mut self, values: serde_json::Map<String, serde_json::Value>) {
        self.values = values;
        self.modified = true;
    }

    /// Replaces the errors slot.
    pub fn set_errors(&mut self, errors: Vec<serde_json::Value>) {
        self.errors = errors;
        self.modified = true;
    }

    /// Appends an anti-forgery token.
    pub fn push_csrf(&mut self, token: CsrfToken) {
        self.csrf.push(token);
        self.modified = true;
    }

    /// Returns `true` if `name`/`value` matches an issued token.
    pub fn has_csrf(&self, name: &str, value: &str) -> bool {
        self.csrf
            .iter()
            .any(|token| token.name == name && token.value == value)
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.csrf.clear();
        self.modified = true;
    }

    /// Returns `true` if every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.errors.is_empty() && self.csrf.is_empty()
    }
}

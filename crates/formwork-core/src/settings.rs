//! Settings for the formwork framework.
//!
//! [`Settings`] holds the defaults every form inherits unless it overrides
//! them: whether visible fields are required, the delimiter used to derive
//! HTML ids, session expiration, CSRF protection and the form-level error
//! message templates. Settings are passed to forms explicitly; there is no
//! global instance.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Error message code for a missing required value.
pub const ERROR_REQUIRED: &str = "required";
/// Error message code for a submission without any parameters.
pub const ERROR_EMPTY_CONTENT: &str = "empty_content";
/// Error message code for a submission exceeding the body size limit.
pub const ERROR_MAX_POST_SIZE: &str = "max_post_size";
/// Error message code for a failed anti-forgery token check.
pub const ERROR_CSRF: &str = "csrf";

/// The complete set of framework settings.
///
/// # Examples
///
/// ```
/// use formwork_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.default_required);
/// assert_eq!(settings.html_ids_delimiter, "_");
/// assert_eq!(settings.error_message("required"), "Field `{0}` is required.");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,
    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,
    /// The language code used for translations (e.g. "en-us").
    pub language_code: String,

    // ── Fields ───────────────────────────────────────────────────────

    /// Whether visible fields without an explicit `required` flag are required.
    pub default_required: bool,
    /// Delimiter joining form id, field name and option key into HTML ids.
    pub html_ids_delimiter: String,
    /// First tab index handed out to fields configured with an automatic tab index.
    pub base_tab_index: u32,

    // ── Session ──────────────────────────────────────────────────────

    /// Seconds the per-form session record lives. `None` inherits the
    /// authenticated user's expiration or falls back to `0` (until the
    /// browser session ends).
    pub session_expiration: Option<u64>,
    /// Prefix for the session namespace key of each form.
    pub session_namespace_prefix: String,

    // ── Security ─────────────────────────────────────────────────────

    /// Whether forms check an anti-forgery token on submit.
    pub csrf_enabled: bool,

    // ── Messages ─────────────────────────────────────────────────────

    /// Form-level error message templates keyed by error code. Missing codes
    /// fall back to the built-in English templates.
    pub error_messages: HashMap<String, String>,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            // Core
            debug: true,
            log_level: "info".to_string(),
            language_code: "en-us".to_string(),

            // Fields
            default_required: true,
            html_ids_delimiter: "_".to_string(),
            base_tab_index: 0,

            // Session
            session_expiration: None,
            session_namespace_prefix: "formwork.form".to_string(),

            // Security
            csrf_enabled: false,

            // Messages
            error_messages: HashMap::new(),

            // Extra
            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Returns the form-level error template for `code`, preferring a
    /// configured override over the built-in default.
    pub fn error_message(&self, code: &str) -> String {
        self.error_messages
            .get(code)
            .cloned()
            .unwrap_or_else(|| default_error_message(code).to_string())
    }
}

/// Returns the built-in English template for a form-level error code.
pub fn default_error_message(code: &str) -> &'static str {
    match code {
        ERROR_REQUIRED => "Field `{0}` is required.",
        ERROR_EMPTY_CONTENT => "Sent data are empty.",
        ERROR_MAX_POST_SIZE => "Sent data exceeds the limit of {0}.",
        ERROR_CSRF => "Form hash expired, please submit the form again.",
        _ => "Field `{0}` contains an invalid value.",
    }
}

//! Core error type for formwork.
//!
//! [`FormworkError`] covers the failures that abort form setup or session
//! persistence. Invalid end-user input is never an error of this type: it is
//! collected as data by the forms crate and rendered back to the user.

use thiserror::Error;

/// The primary error type for formwork.
///
/// Configuration variants signal programmer mistakes detected while a form
/// is being assembled (missing field name, unresolvable validator bound,
/// unknown validator name). Session variants wrap failures of the external
/// session store.
#[derive(Error, Debug)]
pub enum FormworkError {
    // ── Configuration ────────────────────────────────────────────────

    /// A field, validator or form is missing a required attribute or has
    /// an attribute of the wrong kind.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    /// A settings value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A form or field lookup by id or name found nothing.
    #[error("Not found: {0}")]
    NotFound(String),

    // ── Session ──────────────────────────────────────────────────────

    /// The session store failed to load or persist a namespace.
    #[error("Session error: {0}")]
    SessionError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// Values or errors could not be converted to or from their stored form.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormworkError {
    /// Returns `true` for errors caused by form or field misconfiguration.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ImproperlyConfigured(_) | Self::ConfigurationError(_) | Self::NotFound(_)
        )
    }
}

impl From<serde_json::Error> for FormworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, FormworkError>`.
pub type FormworkResult<T> = Result<T, FormworkError>;

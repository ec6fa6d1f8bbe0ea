//! Validation errors as data, and configuration error helpers.

use formwork_core::FormworkError;
use serde::{Deserialize, Serialize};

/// One form-level error entry: a final, formatted message and the names of
/// the fields it belongs to. Form-wide errors (empty submission, expired
/// anti-forgery token) carry no field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormError {
    /// The translated and formatted message.
    pub message: String,
    /// Names of the fields the error is attached to.
    #[serde(default)]
    pub fields: Vec<String>,
}

impl FormError {
    /// Creates an error attached to the given fields.
    pub fn new(message: impl Into<String>, fields: Vec<String>) -> Self {
        Self {
            message: message.into(),
            fields,
        }
    }

    /// Creates an error attached to one field.
    pub fn for_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(message, vec![field.into()])
    }

    /// Creates a form-wide error.
    pub fn form_wide(message: impl Into<String>) -> Self {
        Self::new(message, Vec::new())
    }

    /// Returns `true` if the error is attached to `field`.
    pub fn concerns(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

/// Builds a configuration error carrying the form and field context.
///
/// The message reads
/// ``[<source>] <msg> (form id: `..`, field name: `..`, field type: `..`)``.
pub fn config_error(
    source: &str,
    msg: impl std::fmt::Display,
    form_id: &str,
    field_name: &str,
    field_type: &str,
) -> FormworkError {
    FormworkError::ImproperlyConfigured(format!(
        "[{source}] {msg} (form id: `{form_id}`, field name: `{field_name}`, field type: `{field_type}`)"
    ))
}

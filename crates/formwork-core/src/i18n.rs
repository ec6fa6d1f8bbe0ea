//! Translation of field labels, option texts and error messages.
//!
//! Forms never translate text themselves. They call a [`Translator`] for
//! every label and message when translation is enabled for a form or field.
//! Any `Fn(&str) -> String` closure is a translator, and
//! [`CatalogTranslator`] provides an in-memory catalog loaded from pairs or
//! from JSON.
//!
//! ## JSON Format
//!
//! ```json
//! {
//!   "messages": {
//!     "Name": "Jméno",
//!     "Field `{0}` is required.": "Pole `{0}` je povinné."
//!   }
//! }
//! ```

use std::collections::HashMap;

use crate::error::FormworkError;
use crate::settings::Settings;

/// Maps a message key (label, option text or message template) to its
/// localized text.
pub trait Translator: Send + Sync {
    /// Returns the translation of `key`, or `key` itself when none is known.
    fn translate(&self, key: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// A translation catalog for a single language.
///
/// # Examples
///
/// ```
/// use formwork_core::i18n::{CatalogTranslator, Translator};
///
/// let catalog = CatalogTranslator::new("cs")
///     .with_messages(vec![("Name", "Jméno")]);
/// assert_eq!(catalog.translate("Name"), "Jméno");
/// assert_eq!(catalog.translate("E-mail"), "E-mail");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    language: String,
    messages: HashMap<String, String>,
}

impl CatalogTranslator {
    /// Creates an empty catalog for `language`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            messages: HashMap::new(),
        }
    }

    /// Creates an empty catalog for the configured `language_code`.
    pub fn for_settings(settings: &Settings) -> Self {
        Self::new(settings.language_code.clone())
    }

    /// Adds `(key, translated)` pairs, overwriting duplicates.
    #[must_use]
    pub fn with_messages(mut self, entries: Vec<(&str, &str)>) -> Self {
        self.register(entries);
        self
    }

    /// Adds `(key, translated)` pairs, overwriting duplicates.
    pub fn register(&mut self, entries: Vec<(&str, &str)>) {
        for (key, translated) in entries {
            self.messages.insert(key.to_string(), translated.to_string());
        }
    }

    /// Merges the `messages` object of a JSON document into the catalog.
    ///
    /// Non-string entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`FormworkError::ConfigurationError`] if the JSON is invalid.
    pub fn load_from_json(&mut self, json_str: &str) -> Result<(), FormworkError> {
        let value: serde_json::Value = serde_json::from_str(json_str).map_err(|e| {
            FormworkError::ConfigurationError(format!(
                "Invalid translation catalog for '{}': {e}",
                self.language
            ))
        })?;

        if let Some(messages) = value.get("messages").and_then(|v| v.as_object()) {
            for (key, translated) in messages {
                if let Some(t) = translated.as_str() {
                    self.messages.insert(key.clone(), t.to_string());
                }
            }
        }
        tracing::debug!(
            language = %self.language,
            count = self.messages.len(),
            "translation catalog loaded"
        );
        Ok(())
    }

    /// Returns the language code of this catalog.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Returns the number of known messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the catalog holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup_and_fallback() {
        let catalog = CatalogTranslator::new("de").with_messages(vec![("Hello", "Hallo")]);
        assert_eq!(catalog.translate("Hello"), "Hallo");
        assert_eq!(catalog.translate("Goodbye"), "Goodbye");
        assert_eq!(catalog.language(), "de");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_for_settings_uses_language_code() {
        let settings = Settings {
            language_code: "cs".to_string(),
            ..Settings::default()
        };
        let catalog = CatalogTranslator::for_settings(&settings);
        assert_eq!(catalog.language(), "cs");
        assert!(catalog.is_empty());
        assert_eq!(CatalogTranslator::for_settings(&Settings::default()).language(), "en-us");
    }

    #[test]
    fn test_register_overwrites() {
        let mut catalog = CatalogTranslator::new("fr");
        catalog.register(vec![("Yes", "Oui")]);
        catalog.register(vec![("Yes", "Si")]);
        assert_eq!(catalog.translate("Yes"), "Si");
    }

    #[test]
    fn test_load_from_json() {
        let mut catalog = CatalogTranslator::new("cs");
        catalog
            .load_from_json(r#"{"messages": {"Name": "Jméno", "bad": 5}}"#)
            .unwrap();
        assert_eq!(catalog.translate("Name"), "Jméno");
        assert_eq!(catalog.translate("bad"), "bad");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_from_json_invalid() {
        let mut catalog = CatalogTranslator::new("cs");
        assert!(catalog.load_from_json("{oops").is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_closure_translator() {
        let upper = |key: &str| key.to_uppercase();
        assert_eq!(upper.translate("name"), "NAME");
    }
}

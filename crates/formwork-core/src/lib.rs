//! # formwork-core
//!
//! Core types shared by every formwork crate. This crate has no framework
//! dependencies and provides the foundation for the session and forms crates.
//!
//! ## Modules
//!
//! - [`error`] - Error type and result alias
//! - [`settings`] - Form framework settings
//! - [`settings_loader`] - Loading settings from TOML, JSON and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`i18n`] - The translator collaborator and an in-memory catalog

pub mod error;
pub mod i18n;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{FormworkError, FormworkResult};
pub use i18n::{CatalogTranslator, Translator};
pub use settings::Settings;

//! # formwork
//!
//! Server-side HTML forms for Rust.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `formwork` to get the entire library, or depend on
//! individual crates for finer-grained control.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use formwork::prelude::*;
//!
//! let store = Arc::new(InMemorySessionStore::new());
//! let mut form = Form::new("newsletter", store)
//!     .with_field(Text::email("email").label("E-mail"))
//!     .unwrap()
//!     .with_field(SubmitButton::new("subscribe"))
//!     .unwrap();
//!
//! let params = RequestParams::parse("email=ann%40example.com&subscribe=Submit");
//! assert_eq!(form.submit(&params).unwrap(), FormResult::Success);
//! ```

/// Core types, settings, logging, translation and error types.
pub use formwork_core as core;

/// Per-form session records and session stores.
pub use formwork_session as session;

/// Fields, validators, forms and rendering.
pub use formwork_forms as forms;

// Third-party re-exports
pub use chrono;
pub use serde;
pub use serde_json;
pub use tracing;
pub use tracing_subscriber;

/// Glob-importable set of the types most applications need.
pub mod prelude {
    pub use formwork_core::{FormworkError, FormworkResult, Settings, Translator};
    pub use formwork_forms::prelude::*;
    pub use formwork_session::{FileSessionStore, InMemorySessionStore, SessionStore};
}

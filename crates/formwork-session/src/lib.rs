//! # formwork-session
//!
//! Session persistence for formwork. Every form owns one
//! [`SessionNamespace`] keyed by its id, holding the submitted values, the
//! validation errors and the issued CSRF tokens so they survive a
//! redirect-after-submit cycle.
//!
//! ## Modules
//!
//! - [`namespace`] - The per-form session record
//! - [`store`] - The [`SessionStore`] trait
//! - [`memory`] - An in-memory store, suitable for tests and single processes
//! - [`file`] - A JSON-file store
//! - [`auth`] - The authentication collaborator used for session expiration

pub mod auth;
pub mod file;
pub mod memory;
pub mod namespace;
pub mod store;

pub use auth::{resolve_expiration, Authentication};
pub use file::FileSessionStore;
pub use memory::InMemorySessionStore;
pub use namespace::{CsrfToken, SessionNamespace};
pub use store::SessionStore;

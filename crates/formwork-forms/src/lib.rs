//! # formwork-forms
//!
//! Server-side HTML forms: typed fields, ordered validator pipelines, form
//! submission orchestration with session persistence, and natural
//! rendering of controls and errors.
//!
//! ## Modules
//!
//! - [`value`] - Typed field values
//! - [`params`] - Submitted request parameters
//! - [`field`] - The `Field` trait, shared attributes, attach and submit protocols
//! - [`fields`] - Concrete field kinds
//! - [`validators`] - The `Validator` trait, built-ins and the name registry
//! - [`form`] - The `Form` orchestrator
//! - [`registry`] - Request-scoped registry of forms
//! - [`csrf`] - Anti-forgery tokens
//! - [`view`] - Template formatting
//! - [`rendering`] - Control, label and error markup
//! - [`date_format`] - Single-letter date format tokens
//! - [`error`] - Validation errors as data

pub mod csrf;
pub mod date_format;
pub mod error;
pub mod field;
pub mod fields;
pub mod form;
pub mod params;
pub mod registry;
pub mod rendering;
pub mod validators;
pub mod value;
pub mod view;

pub use error::FormError;
pub use field::{Field, FieldBuilder, FieldCore, TabIndex};
pub use form::{DispatchState, Form, FormResult};
pub use params::{RawValue, RequestParams};
pub use registry::FormRegistry;
pub use validators::{Validator, ValidatorRegistry};
pub use value::Value;

/// Glob-importable set of the types most forms need.
pub mod prelude {
    pub use crate::error::FormError;
    pub use crate::field::{Field, FieldBuilder, TabIndex};
    pub use crate::fields::{
        Checkbox, Date, DateKind, FieldOption, FieldsGroup, Hidden, Number, ResetInput,
        SubmitButton, Text, Textarea,
    };
    pub use crate::form::{DispatchState, Form, FormResult, SharedTranslator};
    pub use crate::params::{RawValue, RequestParams};
    pub use crate::registry::FormRegistry;
    pub use crate::validators::{ClosureValidator, Validator, ValidatorRegistry};
    pub use crate::value::Value;
    pub use crate::view::{DefaultView, View};
}

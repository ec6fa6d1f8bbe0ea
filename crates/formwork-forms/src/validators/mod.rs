//! Validators transforming submitted values.
//!
//! A [`Validator`] receives the value accumulated so far by a field's
//! pipeline and returns the next one. It registers problems through
//! [`ValidationContext::add_error`] and signals an unrecoverable parse
//! failure by returning [`Value::Null`]. Configuration shared with the field
//! (format, bounds, maximum length, pattern, option keys) is reconciled once
//! in [`Validator::set_field`] when the field is attached to its form.
//!
//! Validators are referenced by name in field definitions and resolved
//! through a [`ValidatorRegistry`]. [`ValidatorRegistry::builtin`] knows
//! every validator shipped with this crate.

pub mod choice;
pub mod closure;
pub mod date;
pub mod number;
pub mod string;

use std::collections::HashMap;
use std::fmt;

use formwork_core::{FormworkError, FormworkResult};

use crate::field::{Field, ValidationContext};
use crate::value::Value;

pub use choice::{CheckboxValidator, ValueInOptions};
pub use closure::ClosureValidator;
pub use date::{DateStepChecker, DateValidator};
pub use number::NumberValidator;
pub use string::{EmailValidator, MaxLength, PatternValidator, SafeString};

/// A single stage of a field's validation pipeline.
pub trait Validator: Send + Sync + fmt::Debug {
    /// Returns the name the validator is registered under.
    fn name(&self) -> &str;

    /// Reconciles validator configuration with `field` on attach.
    fn set_field(&mut self, _field: &mut dyn Field) -> FormworkResult<()> {
        Ok(())
    }

    /// Transforms `value`, registering errors through `ctx`.
    fn validate(&self, value: Value, ctx: &mut ValidationContext<'_>) -> Value;
}

/// A validator as configured on a field: either a registry name resolved on
/// attach, or a ready instance.
#[derive(Debug)]
pub enum ValidatorSpec {
    /// Resolved through the form's [`ValidatorRegistry`].
    Named(String),
    /// A configured validator.
    Instance(Box<dyn Validator>),
}

impl ValidatorSpec {
    /// Returns the validator name.
    pub fn name(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Instance(validator) => validator.name(),
        }
    }
}

impl From<&str> for ValidatorSpec {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for ValidatorSpec {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Box<dyn Validator>> for ValidatorSpec {
    fn from(validator: Box<dyn Validator>) -> Self {
        Self::Instance(validator)
    }
}

impl<V: Validator + 'static> From<V> for ValidatorSpec {
    fn from(validator: V) -> Self {
        Self::Instance(Box::new(validator))
    }
}

type Factory = Box<dyn Fn() -> Box<dyn Validator> + Send + Sync>;

/// Maps validator names to factories.
///
/// # Examples
///
/// ```
/// use formwork_forms::validators::ValidatorRegistry;
///
/// let registry = ValidatorRegistry::builtin();
/// assert!(registry.contains("Date"));
/// assert!(registry.create("Nope").is_err());
/// ```
#[derive(Default)]
pub struct ValidatorRegistry {
    factories: HashMap<String, Factory>,
}

impl ValidatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in validator.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("SafeString", || Box::new(SafeString));
        registry.register("MaxLength", || Box::new(MaxLength::default()));
        registry.register("Pattern", || Box::new(PatternValidator::default()));
        registry.register("Email", || Box::new(EmailValidator));
        registry.register("Number", || Box::new(NumberValidator::default()));
        registry.register("Date", || Box::new(DateValidator::default()));
        registry.register("ValueInOptions", || Box::new(ValueInOptions::default()));
        registry.register("Checkbox", || Box::new(CheckboxValidator));
        registry
    }

    /// Registers a factory under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Validator> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    /// Returns `true` if a factory is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Creates a fresh validator instance.
    pub fn create(&self, name: &str) -> FormworkResult<Box<dyn Validator>> {
        self.factories.get(name).map(|factory| factory()).ok_or_else(|| {
            FormworkError::ImproperlyConfigured(format!("Unknown validator `{name}`."))
        })
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ValidatorRegistry")
            .field("validators", &names)
            .finish()
    }
}

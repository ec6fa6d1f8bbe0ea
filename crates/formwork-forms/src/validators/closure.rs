//! Inline validators built from closures.

use std::fmt;

use crate::field::ValidationContext;
use crate::validators::Validator;
use crate::value::Value;

type ValidateFn = Box<dyn Fn(Value, &mut ValidationContext<'_>) -> Value + Send + Sync>;

/// A validator backed by a closure.
///
/// # Examples
///
/// ```
/// use formwork_forms::field::{Field, FieldBuilder};
/// use formwork_forms::fields::Text;
/// use formwork_forms::validators::ClosureValidator;
/// use formwork_forms::value::Value;
///
/// let field = Text::new("nick").validator(ClosureValidator::new("NoAdmin", |value, ctx| {
///     if value.as_str() == Some("admin") {
///         ctx.add_error("Field '{0}' cannot be `admin`.", &[]);
///         return Value::Null;
///     }
///     value
/// }));
/// assert!(field.core().has_validator("NoAdmin"));
/// ```
pub struct ClosureValidator {
    name: String,
    validate_fn: ValidateFn,
}

impl ClosureValidator {
    /// Creates a validator registered under `name`.
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Value, &mut ValidationContext<'_>) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            validate_fn: Box::new(f),
        }
    }
}

impl fmt::Debug for ClosureValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Validator for ClosureValidator {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, value: Value, ctx: &mut ValidationContext<'_>) -> Value {
        (self.validate_fn)(value, ctx)
    }
}

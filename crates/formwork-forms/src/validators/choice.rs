//! Validators for option groups and checkboxes.

use formwork_core::{FormworkError, FormworkResult};

use crate::field::{Field, ValidationContext};
use crate::validators::Validator;
use crate::value::Value;

/// Restricts values to the option keys declared on the field.
///
/// A list keeps only its known keys; one error is registered if any key
/// was dropped.
#[derive(Debug, Clone, Default)]
pub struct ValueInOptions {
    keys: Vec<String>,
}

impl ValueInOptions {
    /// Creates a validator with an explicit keyspace, used when the field
    /// does not declare options.
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// Returns the accepted keys.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    fn is_known(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    fn reject(ctx: &mut ValidationContext<'_>) {
        ctx.add_error("Field '{0}' requires a value from the available options.", &[]);
    }
}

impl Validator for ValueInOptions {
    fn name(&self) -> &str {
        "ValueInOptions"
    }

    fn set_field(&mut self, field: &mut dyn Field) -> FormworkResult<()> {
        if let Some(options) = field.as_options() {
            let keys = options.option_keys();
            if !keys.is_empty() {
                self.keys = keys;
            }
        }
        if self.keys.is_empty() {
            return Err(FormworkError::ImproperlyConfigured(
                "No `options` property defined in current validator or in field.".into(),
            ));
        }
        Ok(())
    }

    fn validate(&self, value: Value, ctx: &mut ValidationContext<'_>) -> Value {
        match value {
            Value::String(key) if key.is_empty() || self.is_known(&key) => Value::String(key),
            Value::String(_) => {
                Self::reject(ctx);
                Value::Null
            }
            Value::List(items) => {
                let total = items.len();
                let known: Vec<Value> = items
                    .into_iter()
                    .filter(|item| self.is_known(&item.to_form_string()))
                    .collect();
                if known.len() != total {
                    Self::reject(ctx);
                }
                Value::List(known)
            }
            other => other,
        }
    }
}

/// Converts a checkbox submission into a flag: a missing value becomes
/// `false`, any non-empty value `true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxValidator;

impl Validator for CheckboxValidator {
    fn name(&self) -> &str {
        "Checkbox"
    }

    fn validate(&self, value: Value, _ctx: &mut ValidationContext<'_>) -> Value {
        match value {
            Value::Bool(_) => value,
            other => Value::Bool(!other.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{FieldsGroup, Text};
    use crate::validators::testing::run;

    fn colors() -> ValueInOptions {
        ValueInOptions::new(vec!["red".into(), "blue".into()])
    }

    #[test]
    fn test_known_key_passes() {
        let (out, errors) = run(&colors(), Value::from("red"), "Color");
        assert_eq!(out, Value::from("red"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let (out, errors) = run(&colors(), Value::from("green"), "Color");
        assert_eq!(out, Value::Null);
        assert_eq!(
            errors,
            vec!["Field 'Color' requires a value from the available options.".to_string()]
        );
    }

    #[test]
    fn test_list_filtered() {
        let input = Value::from(vec!["red".to_string(), "green".to_string()]);
        let (out, errors) = run(&colors(), input, "Colors");
        assert_eq!(out, Value::from(vec!["red".to_string()]));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_null_passes() {
        let (out, errors) = run(&colors(), Value::Null, "Color");
        assert_eq!(out, Value::Null);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_keys_from_field() {
        let mut group = FieldsGroup::radio("size").option("s", "Small").option("m", "Medium");
        let mut validator = ValueInOptions::default();
        validator.set_field(&mut group).unwrap();
        assert_eq!(validator.keys(), ["s".to_string(), "m".to_string()]);
    }

    #[test]
    fn test_no_options_is_configuration_error() {
        let mut field = Text::new("x");
        assert!(ValueInOptions::default().set_field(&mut field).is_err());
    }

    #[test]
    fn test_checkbox() {
        assert_eq!(run(&CheckboxValidator, Value::Null, "Agree").0, Value::Bool(false));
        assert_eq!(run(&CheckboxValidator, Value::from("on"), "Agree").0, Value::Bool(true));
        assert_eq!(run(&CheckboxValidator, Value::from(""), "Agree").0, Value::Bool(false));
    }
}

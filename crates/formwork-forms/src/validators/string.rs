//! Text validators.

use std::sync::OnceLock;

use regex::Regex;

use formwork_core::{FormworkError, FormworkResult};

use crate::field::{reconcile, Field, ValidationContext};
use crate::validators::Validator;
use crate::value::Value;

fn is_safe_char(c: char) -> bool {
    !c.is_control() || matches!(c, '\t' | '\r' | '\n')
}

fn clean(s: &str) -> String {
    s.chars()
        .filter(|c| is_safe_char(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

// ── SafeString ───────────────────────────────────────────────────────

/// Strips control characters other than tab, CR and LF, then trims.
///
/// Lists are cleaned element-wise. Other values pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafeString;

impl Validator for SafeString {
    fn name(&self) -> &str {
        "SafeString"
    }

    fn validate(&self, value: Value, _ctx: &mut ValidationContext<'_>) -> Value {
        match value {
            Value::String(s) => Value::String(clean(&s)),
            Value::List(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => Value::String(clean(&s)),
                        other => other,
                    })
                    .collect(),
            ),
            other => other,
        }
    }
}

// ── MaxLength ────────────────────────────────────────────────────────

/// Truncates strings longer than the field's `maxlength`.
#[derive(Debug, Clone, Default)]
pub struct MaxLength {
    max_length: Option<usize>,
}

impl MaxLength {
    /// Creates a validator with an explicit limit, which wins over the
    /// field's own `maxlength`.
    pub const fn new(max_length: usize) -> Self {
        Self {
            max_length: Some(max_length),
        }
    }

    /// Returns the reconciled limit.
    pub const fn max_length(&self) -> Option<usize> {
        self.max_length
    }
}

impl Validator for MaxLength {
    fn name(&self) -> &str {
        "MaxLength"
    }

    fn set_field(&mut self, field: &mut dyn Field) -> FormworkResult<()> {
        match field.as_max_length_mut() {
            Some(cap) => {
                let mut field_value = cap.max_length();
                reconcile(&mut self.max_length, &mut field_value, "maxlength", true)?;
                cap.set_max_length(field_value);
                Ok(())
            }
            None => reconcile(&mut self.max_length, &mut None, "maxlength", true),
        }
    }

    fn validate(&self, value: Value, ctx: &mut ValidationContext<'_>) -> Value {
        let Some(limit) = self.max_length else {
            return value;
        };
        match value {
            Value::String(s) if s.chars().count() > limit => {
                ctx.add_error(
                    "Field '{0}' requires no more than {1} characters.",
                    &[limit.to_string()],
                );
                Value::String(s.chars().take(limit).collect())
            }
            other => other,
        }
    }
}

// ── Pattern ──────────────────────────────────────────────────────────

/// Requires non-empty strings to match the field's pattern as a whole.
#[derive(Debug, Clone, Default)]
pub struct PatternValidator {
    pattern: Option<String>,
    regex: Option<Regex>,
}

impl PatternValidator {
    /// Creates a validator with an explicit pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            regex: None,
        }
    }

    fn compile(&mut self) -> FormworkResult<()> {
        if let Some(pattern) = &self.pattern {
            let anchored = format!("^(?:{pattern})$");
            let regex = Regex::new(&anchored).map_err(|e| {
                FormworkError::ImproperlyConfigured(format!("Invalid pattern `{pattern}`: {e}"))
            })?;
            self.regex = Some(regex);
        }
        Ok(())
    }
}

impl Validator for PatternValidator {
    fn name(&self) -> &str {
        "Pattern"
    }

    fn set_field(&mut self, field: &mut dyn Field) -> FormworkResult<()> {
        match field.as_pattern_mut() {
            Some(cap) => {
                let mut field_value = cap.pattern().map(str::to_string);
                reconcile(&mut self.pattern, &mut field_value, "pattern", true)?;
                cap.set_pattern(field_value);
            }
            None => reconcile(&mut self.pattern, &mut None, "pattern", true)?,
        }
        self.compile()
    }

    fn validate(&self, value: Value, ctx: &mut ValidationContext<'_>) -> Value {
        let (Some(regex), Value::String(s)) = (&self.regex, &value) else {
            return value;
        };
        if s.is_empty() || regex.is_match(s) {
            return value;
        }
        ctx.add_error(
            "Field '{0}' does not match the required pattern '{1}'.",
            &[self.pattern.clone().unwrap_or_default()],
        );
        Value::Null
    }
}

// ── Email ────────────────────────────────────────────────────────────

fn email_regex() -> Option<&'static Regex> {
    static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").ok())
        .as_ref()
}

/// Cleans the value like [`SafeString`] and requires a well-formed e-mail
/// address when it is not empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl Validator for EmailValidator {
    fn name(&self) -> &str {
        "Email"
    }

    fn validate(&self, value: Value, ctx: &mut ValidationContext<'_>) -> Value {
        let Value::String(raw) = value else {
            return value;
        };
        let email = clean(&raw);
        if email.is_empty() {
            return Value::String(email);
        }
        match email_regex() {
            Some(re) if !re.is_match(&email) => {
                ctx.add_error("Field '{0}' requires a valid email format.", &[]);
                Value::Null
            }
            _ => Value::String(email),
        }
    }
}

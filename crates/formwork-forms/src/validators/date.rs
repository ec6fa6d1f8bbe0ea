//! Date, time, month and week validation.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use formwork_core::FormworkResult;

use crate::date_format;
use crate::field::{reconcile, Field, ValidationContext};
use crate::validators::Validator;
use crate::value::Value;

/// Message registered when the value does not match the format.
pub const DATE_INVALID: &str = "Field '{0}' requires a valid date format: '{1}'.";
/// Message registered when the value is below the lower bound.
pub const DATE_TOO_LOW: &str = "Field '{0}' requires date higher or equal to '{1}'.";
/// Message registered when the value is above the upper bound.
pub const DATE_TOO_HIGH: &str = "Field '{0}' requires date lower or equal to '{1}'.";
/// Message registered when the installed step checker rejects the value.
pub const DATE_STEP: &str = "Field '{0}' requires date in step '{1}'.";

/// Decides whether a parsed date lies on the configured step.
///
/// Any `Fn(&NaiveDateTime, Option<&NaiveDateTime>, f64) -> bool` closure
/// implements this trait.
pub trait DateStepChecker: Send + Sync {
    /// Returns `true` if `value` is on a step of `step` counted from `min`.
    fn check(&self, value: &NaiveDateTime, min: Option<&NaiveDateTime>, step: f64) -> bool;
}

impl<F> DateStepChecker for F
where
    F: Fn(&NaiveDateTime, Option<&NaiveDateTime>, f64) -> bool + Send + Sync,
{
    fn check(&self, value: &NaiveDateTime, min: Option<&NaiveDateTime>, step: f64) -> bool {
        self(value, min, step)
    }
}

/// Parses submitted dates against the field format and checks bounds.
///
/// The raw value is trimmed and characters outside `[a-zA-Z0-9:.\-,/ ]`
/// are stripped. If anything was stripped, or the value does not parse,
/// [`DATE_INVALID`] is registered and [`Value::Null`] returned. Date, month
/// and week fields are normalized to midnight. Bounds are checked
/// independently and inclusively, and the parsed value is returned even
/// when a bound fails.
///
/// Step checking is delegated to an optional [`DateStepChecker`]. Without
/// one, every value passes the step check.
#[derive(Clone, Default)]
pub struct DateValidator {
    format: Option<String>,
    min: Option<NaiveDateTime>,
    max: Option<NaiveDateTime>,
    step: Option<f64>,
    step_checker: Option<Arc<dyn DateStepChecker>>,
}

impl DateValidator {
    /// Creates a validator that takes its configuration from the field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the format, which wins over the field's format.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the lower bound.
    #[must_use]
    pub const fn with_min(mut self, min: NaiveDateTime) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound.
    #[must_use]
    pub const fn with_max(mut self, max: NaiveDateTime) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the step.
    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Installs a step checker.
    #[must_use]
    pub fn with_step_checker(mut self, checker: impl DateStepChecker + 'static) -> Self {
        self.step_checker = Some(Arc::new(checker));
        self
    }

    /// Returns the reconciled format.
    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    fn is_allowed(c: char) -> bool {
        c.is_ascii_alphanumeric() || matches!(c, ':' | '.' | '-' | ',' | '/' | ' ')
    }

    fn check_bounds(&self, date: &NaiveDateTime, format: &str, ctx: &mut ValidationContext<'_>) {
        if let Some(min) = &self.min {
            if date < min {
                ctx.add_error(DATE_TOO_LOW, &[date_format::format(min, format)]);
            }
        }
        if let Some(max) = &self.max {
            if date > max {
                ctx.add_error(DATE_TOO_HIGH, &[date_format::format(max, format)]);
            }
        }
    }

    fn check_step(&self, date: &NaiveDateTime, ctx: &mut ValidationContext<'_>) {
        let (Some(step), Some(checker)) = (self.step, &self.step_checker) else {
            return;
        };
        if !checker.check(date, self.min.as_ref(), step) {
            ctx.add_error(DATE_STEP, &[step.to_string()]);
        }
    }
}

impl fmt::Debug for DateValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateValidator")
            .field("format", &self.format)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .field("step_checker", &self.step_checker.is_some())
            .finish()
    }
}

impl Validator for DateValidator {
    fn name(&self) -> &str {
        "Date"
    }

    fn set_field(&mut self, field: &mut dyn Field) -> FormworkResult<()> {
        match field.as_format_mut() {
            Some(cap) => {
                let mut format = cap.format().map(str::to_string);
                reconcile(&mut self.format, &mut format, "format", true)?;
                cap.set_format(format);
            }
            None => reconcile(&mut self.format, &mut None, "format", true)?,
        }
        if let Some(cap) = field.as_date_bounds_mut() {
            let (mut min, mut max, mut step) = (cap.min(), cap.max(), cap.step());
            reconcile(&mut self.min, &mut min, "min", false)?;
            reconcile(&mut self.max, &mut max, "max", false)?;
            reconcile(&mut self.step, &mut step, "step", false)?;
            cap.set_min(min);
            cap.set_max(max);
            cap.set_step(step);
        }
        Ok(())
    }

    fn validate(&self, value: Value, ctx: &mut ValidationContext<'_>) -> Value {
        let raw = match value {
            Value::String(s) => s,
            Value::DateTime(_) | Value::Null => return value,
            other => other.to_form_string(),
        };
        let Some(format) = self.format.as_deref() else {
            return Value::Null;
        };
        let trimmed = raw.trim();
        let safe: String = trimmed.chars().filter(|c| Self::is_allowed(*c)).collect();
        let parsed = if safe.chars().count() == trimmed.chars().count() {
            date_format::parse(&safe, format)
        } else {
            None
        };
        let Some(mut date) = parsed else {
            ctx.add_error(DATE_INVALID, &[format.to_string()]);
            return Value::Null;
        };
        if matches!(ctx.field().field_type.as_str(), "date" | "week" | "month") {
            if let Some(midnight) = date.date().and_hms_opt(0, 0, 0) {
                date = midnight;
            }
        }
        self.check_bounds(&date, format, ctx);
        self.check_step(&date, ctx);
        Value::DateTime(date)
    }
}

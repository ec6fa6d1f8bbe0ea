//! Numeric validation.

use formwork_core::FormworkResult;

use crate::field::{reconcile, Field, ValidationContext};
use crate::validators::Validator;
use crate::value::Value;

const STEP_TOLERANCE: f64 = 1e-9;

/// Parses numbers and checks inclusive bounds and step.
///
/// Integers become [`Value::Int`], other numbers [`Value::Float`]. An
/// unparseable value yields [`Value::Null`] with an error; a value outside
/// the bounds or off-step is returned along with its errors.
#[derive(Debug, Clone, Default)]
pub struct NumberValidator {
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
}

impl NumberValidator {
    /// Creates a validator without bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lower bound.
    #[must_use]
    pub const fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound.
    #[must_use]
    pub const fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the step.
    #[must_use]
    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    fn parse(raw: &str) -> Option<Value> {
        if let Ok(i) = raw.parse::<i64>() {
            return Some(Value::Int(i));
        }
        raw.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float)
    }

    #[allow(clippy::cast_precision_loss)]
    fn check(&self, number: f64, ctx: &mut ValidationContext<'_>) {
        if let Some(min) = self.min {
            if number < min {
                ctx.add_error(
                    "Field '{0}' requires number higher or equal to '{1}'.",
                    &[min.to_string()],
                );
            }
        }
        if let Some(max) = self.max {
            if number > max {
                ctx.add_error(
                    "Field '{0}' requires number lower or equal to '{1}'.",
                    &[max.to_string()],
                );
            }
        }
        if let Some(step) = self.step.filter(|s| *s > 0.0) {
            let steps = (number - self.min.unwrap_or(0.0)) / step;
            if (steps - steps.round()).abs() > STEP_TOLERANCE {
                ctx.add_error(
                    "Field '{0}' requires number in step '{1}'.",
                    &[step.to_string()],
                );
            }
        }
    }
}

impl Validator for NumberValidator {
    fn name(&self) -> &str {
        "Number"
    }

    fn set_field(&mut self, field: &mut dyn Field) -> FormworkResult<()> {
        let Some(cap) = field.as_number_bounds_mut() else {
            return Ok(());
        };
        let (mut min, mut max, mut step) = (cap.min(), cap.max(), cap.step());
        reconcile(&mut self.min, &mut min, "min", false)?;
        reconcile(&mut self.max, &mut max, "max", false)?;
        reconcile(&mut self.step, &mut step, "step", false)?;
        cap.set_min(min);
        cap.set_max(max);
        cap.set_step(step);
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn validate(&self, value: Value, ctx: &mut ValidationContext<'_>) -> Value {
        let parsed = match value {
            Value::String(s) => {
                let raw = s.trim();
                if raw.is_empty() {
                    return Value::Null;
                }
                match Self::parse(raw) {
                    Some(number) => number,
                    None => {
                        ctx.add_error("Field '{0}' requires a valid number.", &[]);
                        return Value::Null;
                    }
                }
            }
            number @ (Value::Int(_) | Value::Float(_)) => number,
            other => return other,
        };
        let number = match parsed {
            Value::Int(i) => i as f64,
            Value::Float(f) => f,
            _ => return parsed,
        };
        self.check(number, ctx);
        parsed
    }
}

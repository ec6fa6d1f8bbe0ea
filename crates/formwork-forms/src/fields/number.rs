//! Numeric inputs.

use crate::field::{Field, FieldCore, HasDataList, HasMinMaxStep};
use crate::fields::kind_attrs;
use crate::rendering::{render_input, RenderContext};

/// The HTML type of a [`Number`] input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberKind {
    /// `number`
    #[default]
    Number,
    /// `range`
    Range,
}

/// A `number` or `range` input validated by `Number`.
#[derive(Debug)]
pub struct Number {
    core: FieldCore,
    kind: NumberKind,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
    list: Option<String>,
}

impl Number {
    /// Creates a `number` input.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name, NumberKind::Number)
    }

    /// Creates a `range` input.
    pub fn range(name: impl Into<String>) -> Self {
        Self::with_kind(name, NumberKind::Range)
    }

    fn with_kind(name: impl Into<String>, kind: NumberKind) -> Self {
        Self {
            core: FieldCore::new(name, &["Number"]),
            kind,
            min: None,
            max: None,
            step: None,
            list: None,
        }
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

    /// Binds the input to a `<datalist>` element.
    #[must_use]
    pub fn with_list(mut self, list: impl Into<String>) -> Self {
        self.list = Some(list.into());
        self
    }
}

impl Field for Number {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn field_type(&self) -> &str {
        match self.kind {
            NumberKind::Number => "number",
            NumberKind::Range => "range",
        }
    }

    fn render_control(&self, ctx: &RenderContext<'_>) -> String {
        let attrs = kind_attrs(&[
            ("min", self.min.map(|v| v.to_string())),
            ("max", self.max.map(|v| v.to_string())),
            ("step", self.step.map(|v| v.to_string())),
            ("list", self.list.clone()),
        ]);
        let value = self.core.value.to_form_string();
        render_input(self, ctx, self.field_type(), &value, attrs)
    }

    fn as_number_bounds_mut(&mut self) -> Option<&mut dyn HasMinMaxStep<f64>> {
        Some(self)
    }

    fn as_data_list(&self) -> Option<&dyn HasDataList> {
        Some(self)
    }
}

impl HasMinMaxStep<f64> for Number {
    fn min(&self) -> Option<f64> {
        self.min
    }

    fn max(&self) -> Option<f64> {
        self.max
    }

    fn step(&self) -> Option<f64> {
        self.step
    }

    fn set_min(&mut self, min: Option<f64>) {
        self.min = min;
    }

    fn set_max(&mut self, max: Option<f64>) {
        self.max = max;
    }

    fn set_step(&mut self, step: Option<f64>) {
        self.step = step;
    }
}

impl HasDataList for Number {
    fn list(&self) -> Option<&str> {
        self.list.as_deref()
    }
}

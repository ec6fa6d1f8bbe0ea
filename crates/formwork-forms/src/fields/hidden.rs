//! Hidden inputs.

use crate::field::{Field, FieldCore};
use crate::rendering::{render_input, RenderContext};

/// A `hidden` input. Hidden fields are not visible, so they never inherit
/// the form's `required` default.
#[derive(Debug)]
pub struct Hidden {
    core: FieldCore,
}

impl Hidden {
    /// Creates a hidden input.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: FieldCore::new(name, &["SafeString"]),
        }
    }
}

impl Field for Hidden {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn field_type(&self) -> &str {
        "hidden"
    }

    fn is_visible(&self) -> bool {
        false
    }

    fn render_control(&self, ctx: &RenderContext<'_>) -> String {
        let value = self.core.value.to_form_string();
        render_input(self, ctx, "hidden", &value, Default::default())
    }
}

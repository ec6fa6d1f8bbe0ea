//! Single checkboxes.

use std::collections::BTreeMap;

use crate::field::{Field, FieldCore};
use crate::rendering::{render_input, RenderContext};
use crate::value::Value;

/// A single `checkbox` input.
///
/// An unchecked checkbox submits nothing, so the field always runs its
/// validators and the `Checkbox` validator turns a missing value into
/// `false`.
#[derive(Debug)]
pub struct Checkbox {
    core: FieldCore,
}

impl Checkbox {
    /// Creates a checkbox.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: FieldCore::new(name, &["Checkbox"]),
        }
    }

    /// Returns `true` if the current value checks the box.
    pub fn is_checked(&self) -> bool {
        match &self.core.value {
            Value::Bool(checked) => *checked,
            other => !other.is_empty() && other.as_str() != Some("0"),
        }
    }
}

impl Field for Checkbox {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn field_type(&self) -> &str {
        "checkbox"
    }

    fn always_validate(&self) -> bool {
        true
    }

    fn render_control(&self, ctx: &RenderContext<'_>) -> String {
        let mut attrs = BTreeMap::new();
        if self.is_checked() {
            attrs.insert("checked".to_string(), "checked".to_string());
        }
        render_input(self, ctx, "checkbox", "1", attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldBuilder;
    use crate::view::DefaultView;

    #[test]
    fn test_checked_state() {
        assert!(!Checkbox::new("a").is_checked());
        assert!(Checkbox::new("a").value(true).is_checked());
        assert!(Checkbox::new("a").value("on").is_checked());
        assert!(!Checkbox::new("a").value("0").is_checked());
    }

    #[test]
    fn test_render_checked() {
        let ctx = RenderContext {
            form_id: "f",
            delimiter: "_",
            base_tab_index: 0,
            view: &DefaultView,
        };
        let field = Checkbox::new("agree").id("f_agree").value(true);
        assert_eq!(
            field.render_control(&ctx),
            r#"<input id="f_agree" name="agree" type="checkbox" value="1" checked="checked" class="agree checkbox" />"#
        );
    }
}

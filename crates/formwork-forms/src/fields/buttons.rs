//! Action buttons.
//!
//! Buttons take part in submission only to tell which action was pressed.
//! Their values are never stored among the form values.

use formwork_core::{FormworkError, FormworkResult, Translator};

use crate::field::{AttachContext, Field, FieldCore};
use crate::fields::translate_in_place;
use crate::form::FormResult;
use crate::rendering::{attrs_suffix, build_attrs, render_input, RenderContext};
use crate::value::Value;
use crate::view::escape_html;

const BUTTON_TEMPLATE: &str = r#"<button id="{id}" name="{name}" type="{type}"{attrs}>{value}</button>"#;

fn button_text(core: &FieldCore) -> String {
    core.value.to_form_string()
}

fn translate_value(core: &mut FieldCore, translator: Option<&dyn Translator>) {
    if let Value::String(text) = &mut core.value {
        translate_in_place(text, translator);
    }
}

// ── SubmitButton ─────────────────────────────────────────────────────

/// A `<button type="submit">`.
///
/// When pressed, the button may decide the submission result, which lets
/// multi-step forms offer "previous" and "next" buttons.
#[derive(Debug)]
pub struct SubmitButton {
    core: FieldCore,
    result_state: Option<FormResult>,
}

impl SubmitButton {
    /// Creates a submit button labelled "Submit".
    pub fn new(name: impl Into<String>) -> Self {
        let mut core = FieldCore::new(name, &[]);
        core.value = Value::from("Submit");
        core.required = Some(false);
        Self {
            core,
            result_state: None,
        }
    }

    /// Sets the result a submission triggered by this button produces.
    #[must_use]
    pub const fn with_result_state(mut self, result: FormResult) -> Self {
        self.result_state = Some(result);
        self
    }
}

impl Field for SubmitButton {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn field_type(&self) -> &str {
        "submit"
    }

    fn is_action(&self) -> bool {
        true
    }

    fn result_state(&self) -> Option<FormResult> {
        self.result_state
    }

    fn on_pre_dispatch(&mut self, translator: Option<&dyn Translator>) {
        translate_value(&mut self.core, translator);
    }

    fn render_control(&self, ctx: &RenderContext<'_>) -> String {
        let attrs = build_attrs(self, ctx, Default::default(), true);
        let id = escape_html(self.core.id_or_name());
        let name = escape_html(&self.core.name);
        let value = escape_html(&button_text(&self.core));
        let attrs = attrs_suffix(ctx.view, &attrs);
        ctx.view.format(
            BUTTON_TEMPLATE,
            &[
                ("id", id.as_str()),
                ("name", name.as_str()),
                ("type", "submit"),
                ("value", value.as_str()),
                ("attrs", attrs.as_str()),
            ],
        )
    }
}

// ── ResetInput ───────────────────────────────────────────────────────

/// An `<input type="reset">`. Attaching fails when the button has no value.
#[derive(Debug)]
pub struct ResetInput {
    core: FieldCore,
}

impl ResetInput {
    /// Creates a reset button labelled "Reset".
    pub fn new(name: impl Into<String>) -> Self {
        let mut core = FieldCore::new(name, &[]);
        core.value = Value::from("Reset");
        core.required = Some(false);
        Self { core }
    }
}

impl Field for ResetInput {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn field_type(&self) -> &str {
        "reset"
    }

    fn is_action(&self) -> bool {
        true
    }

    fn on_attach(&mut self, _ctx: &AttachContext<'_>) -> FormworkResult<()> {
        if self.core.value.is_empty() {
            return Err(FormworkError::ImproperlyConfigured(
                "No button `value` defined.".into(),
            ));
        }
        Ok(())
    }

    fn on_pre_dispatch(&mut self, translator: Option<&dyn Translator>) {
        translate_value(&mut self.core, translator);
    }

    fn render_control(&self, ctx: &RenderContext<'_>) -> String {
        render_input(self, ctx, "reset", &button_text(&self.core), Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{attach, FieldBuilder};
    use crate::validators::ValidatorRegistry;
    use crate::view::DefaultView;

    fn ctx() -> RenderContext<'static> {
        RenderContext {
            form_id: "f",
            delimiter: "_",
            base_tab_index: 0,
            view: &DefaultView,
        }
    }

    #[test]
    fn test_submit_button_render() {
        let button = SubmitButton::new("send").id("f_send").value("Send");
        assert_eq!(
            button.render_control(&ctx()),
            r#"<button id="f_send" name="send" type="submit" class="send submit">Send</button>"#
        );
        assert!(button.is_action());
    }

    #[test]
    fn test_submit_button_result_state() {
        let button = SubmitButton::new("next").with_result_state(FormResult::SuccessNextStep);
        assert_eq!(button.result_state(), Some(FormResult::SuccessNextStep));
    }

    #[test]
    fn test_reset_requires_value() {
        let registry = ValidatorRegistry::builtin();
        let ctx = AttachContext {
            form_id: "f",
            delimiter: "_",
            default_required: true,
            translate: false,
            validators: &registry,
        };
        let mut reset = ResetInput::new("clear").value(Value::Null);
        let err = attach(&mut reset, &ctx).unwrap_err();
        assert!(err.to_string().contains("No button `value` defined."));

        let mut reset = ResetInput::new("clear");
        attach(&mut reset, &ctx).unwrap();
        assert_eq!(reset.core().required, Some(false));
    }

    #[test]
    fn test_reset_value_translated() {
        let mut reset = ResetInput::new("clear");
        let translator: &dyn Translator = &|key: &str| key.to_uppercase();
        reset.on_pre_dispatch(Some(translator));
        assert_eq!(reset.core().value, Value::from("RESET"));
        assert!(reset
            .render_control(&ctx())
            .contains(r#"type="reset" value="RESET""#));
    }
}

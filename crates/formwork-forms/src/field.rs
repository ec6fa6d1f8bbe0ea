//! Form fields and the field submission protocol.
//!
//! Every concrete field kind embeds a [`FieldCore`] holding the attributes
//! shared by all fields (name, id, label, value, flags, validators, errors)
//! and implements the [`Field`] trait. Kind-specific configuration that
//! validators need to see (format, bounds, options, maximum length, pattern)
//! is exposed through capability traits instead of dynamic property access.
//!
//! Two free functions drive a field through its life inside a form:
//!
//! - [`attach`] binds the field to a form: it derives the id, resolves the
//!   `required` and `translate` defaults, resolves named validators and lets
//!   each validator reconcile its configuration with the field.
//! - [`submit`] runs the submission protocol for one request.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

use formwork_core::{FormworkError, FormworkResult, Translator};

use crate::error::{config_error, FormError};
use crate::form::FormResult;
use crate::params::{RawValue, RequestParams};
use crate::rendering::RenderContext;
use crate::validators::{Validator, ValidatorRegistry, ValidatorSpec};
use crate::value::Value;
use crate::view::{format_positional, View};

// ============================================================
// FieldCore
// ============================================================

/// How a field takes part in keyboard navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    /// Assigned in registration order when the form is pre-dispatched.
    Auto,
    /// A fixed index, offset by the form's base tab index when rendered.
    Fixed(i32),
}

/// Attributes shared by every field kind.
#[derive(Debug, Default)]
pub struct FieldCore {
    /// The field name, unique within its form.
    pub name: String,
    /// The HTML id. Derived as `form_id + delimiter + name` on attach when unset.
    pub id: Option<String>,
    /// Human-readable label.
    pub label: Option<String>,
    /// Tooltip text.
    pub title: Option<String>,
    /// The current value.
    pub value: Value,
    /// Whether an empty value is an error. Visible fields inherit the form
    /// default on attach when unset.
    pub required: Option<bool>,
    /// Read-only fields keep their value on submit.
    pub read_only: bool,
    /// Disabled fields keep their value on submit.
    pub disabled: bool,
    /// Whether labels and messages are translated. Inherited from the form when unset.
    pub translate: Option<bool>,
    /// Whether the control receives focus when the page loads.
    pub auto_focus: bool,
    /// Ordered validator pipeline.
    pub validators: Vec<ValidatorSpec>,
    /// Error messages registered against this field.
    pub errors: Vec<String>,
    /// Keyboard navigation order.
    pub tab_index: Option<TabIndex>,
    /// Extra CSS classes for the control and its label.
    pub css_classes: Vec<String>,
    /// Extra HTML attributes for the control.
    pub control_attrs: BTreeMap<String, String>,
}

impl FieldCore {
    /// Creates a core with the given name and default validators.
    pub fn new(name: impl Into<String>, validators: &[&str]) -> Self {
        Self {
            name: name.into(),
            validators: validators
                .iter()
                .map(|v| ValidatorSpec::Named((*v).to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Returns the id, or the name when the field is not attached yet.
    pub fn id_or_name(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.name)
    }

    /// Returns the resolved `required` flag.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// Returns the resolved `translate` flag.
    pub fn is_translated(&self) -> bool {
        self.translate.unwrap_or(false)
    }

    /// Returns `true` if a validator named `name` is configured.
    pub fn has_validator(&self, name: &str) -> bool {
        self.validators.iter().any(|spec| spec.name() == name)
    }
}

// ============================================================
// Capabilities
// ============================================================

/// A field with a date format.
pub trait HasFormat {
    /// Returns the configured format.
    fn format(&self) -> Option<&str>;
    /// Sets the format.
    fn set_format(&mut self, format: Option<String>);
}

/// A field with lower and upper bounds and a step.
pub trait HasMinMaxStep<T> {
    /// Returns the lower bound.
    fn min(&self) -> Option<T>;
    /// Returns the upper bound.
    fn max(&self) -> Option<T>;
    /// Returns the step.
    fn step(&self) -> Option<f64>;
    /// Sets the lower bound.
    fn set_min(&mut self, min: Option<T>);
    /// Sets the upper bound.
    fn set_max(&mut self, max: Option<T>);
    /// Sets the step.
    fn set_step(&mut self, step: Option<f64>);
}

/// A field offering a fixed set of option keys.
pub trait HasOptions {
    /// Returns the option keys in declaration order.
    fn option_keys(&self) -> Vec<String>;
    /// Returns `true` if several keys may be selected.
    fn is_multiple(&self) -> bool;
}

/// A field bound to a `<datalist>` element.
pub trait HasDataList {
    /// Returns the datalist element id.
    fn list(&self) -> Option<&str>;
}

/// A field with a maximum length in characters.
pub trait HasMaxLength {
    /// Returns the maximum length.
    fn max_length(&self) -> Option<usize>;
    /// Sets the maximum length.
    fn set_max_length(&mut self, max_length: Option<usize>);
}

/// A field with a regular expression pattern.
pub trait HasPattern {
    /// Returns the pattern.
    fn pattern(&self) -> Option<&str>;
    /// Sets the pattern.
    fn set_pattern(&mut self, pattern: Option<String>);
}

// ============================================================
// Field
// ============================================================

/// Form-level facts a field needs while it is attached.
#[derive(Debug, Clone)]
pub struct AttachContext<'a> {
    /// The owning form id.
    pub form_id: &'a str,
    /// Delimiter joining the form id and field name into HTML ids.
    pub delimiter: &'a str,
    /// Whether visible fields without an explicit flag are required.
    pub default_required: bool,
    /// Whether the form translates labels and messages.
    pub translate: bool,
    /// Registry resolving named validators.
    pub validators: &'a ValidatorRegistry,
}

/// A single named input control.
pub trait Field: Send + Sync + fmt::Debug {
    /// Returns the shared attributes.
    fn core(&self) -> &FieldCore;

    /// Returns the shared attributes mutably.
    fn core_mut(&mut self) -> &mut FieldCore;

    /// Returns the HTML `type` of the control.
    fn field_type(&self) -> &str;

    /// Visible fields inherit the form's `required` default.
    fn is_visible(&self) -> bool {
        true
    }

    /// Fields whose absence from the request is meaningful run their
    /// validators even when no value was submitted.
    fn always_validate(&self) -> bool {
        false
    }

    /// Action buttons are excluded from the submitted values.
    fn is_action(&self) -> bool {
        false
    }

    /// The result a submission triggered by this control produces.
    fn result_state(&self) -> Option<FormResult> {
        None
    }

    /// Kind-specific checks and adjustments run on attach, before validators
    /// are resolved.
    fn on_attach(&mut self, _ctx: &AttachContext<'_>) -> FormworkResult<()> {
        Ok(())
    }

    /// Kind-specific work run when the form is pre-dispatched.
    fn on_pre_dispatch(&mut self, _translator: Option<&dyn Translator>) {}

    /// Converts the submitted raw value into a [`Value`].
    fn resolve_raw(&self, raw: &RawValue) -> Value {
        match raw {
            RawValue::Single(s) => Value::String(s.clone()),
            RawValue::Multiple(items) => Value::from(items.clone()),
        }
    }

    /// Renders the control element.
    fn render_control(&self, ctx: &RenderContext<'_>) -> String;

    /// Returns the format capability.
    fn as_format_mut(&mut self) -> Option<&mut dyn HasFormat> {
        None
    }

    /// Returns the date bounds capability.
    fn as_date_bounds_mut(&mut self) -> Option<&mut dyn HasMinMaxStep<NaiveDateTime>> {
        None
    }

    /// Returns the numeric bounds capability.
    fn as_number_bounds_mut(&mut self) -> Option<&mut dyn HasMinMaxStep<f64>> {
        None
    }

    /// Returns the options capability.
    fn as_options(&self) -> Option<&dyn HasOptions> {
        None
    }

    /// Returns the datalist capability.
    fn as_data_list(&self) -> Option<&dyn HasDataList> {
        None
    }

    /// Returns the maximum length capability.
    fn as_max_length_mut(&mut self) -> Option<&mut dyn HasMaxLength> {
        None
    }

    /// Returns the pattern capability.
    fn as_pattern_mut(&mut self) -> Option<&mut dyn HasPattern> {
        None
    }
}

/// Builder methods available on every field kind.
///
/// # Examples
///
/// ```
/// use formwork_forms::field::{Field, FieldBuilder};
/// use formwork_forms::fields::Text;
///
/// let field = Text::new("name").label("Name").required(true).css_class("wide");
/// assert_eq!(field.core().label.as_deref(), Some("Name"));
/// assert_eq!(field.core().required, Some(true));
/// ```
pub trait FieldBuilder: Field + Sized {
    /// Sets the HTML id.
    #[must_use]
    fn id(mut self, id: impl Into<String>) -> Self {
        self.core_mut().id = Some(id.into());
        self
    }

    /// Sets the label.
    #[must_use]
    fn label(mut self, label: impl Into<String>) -> Self {
        self.core_mut().label = Some(label.into());
        self
    }

    /// Sets the tooltip.
    #[must_use]
    fn title(mut self, title: impl Into<String>) -> Self {
        self.core_mut().title = Some(title.into());
        self
    }

    /// Sets the initial value.
    #[must_use]
    fn value(mut self, value: impl Into<Value>) -> Self {
        self.core_mut().value = value.into();
        self
    }

    /// Sets whether the field is required.
    #[must_use]
    fn required(mut self, required: bool) -> Self {
        self.core_mut().required = Some(required);
        self
    }

    /// Sets whether the field is read-only.
    #[must_use]
    fn read_only(mut self, read_only: bool) -> Self {
        self.core_mut().read_only = read_only;
        self
    }

    /// Sets whether the field is disabled.
    #[must_use]
    fn disabled(mut self, disabled: bool) -> Self {
        self.core_mut().disabled = disabled;
        self
    }

    /// Sets whether labels and messages are translated.
    #[must_use]
    fn translate(mut self, translate: bool) -> Self {
        self.core_mut().translate = Some(translate);
        self
    }

    /// Appends a validator to the pipeline.
    #[must_use]
    fn validator(mut self, validator: impl Into<ValidatorSpec>) -> Self {
        self.core_mut().validators.push(validator.into());
        self
    }

    /// Replaces the validator pipeline.
    #[must_use]
    fn validators(mut self, validators: Vec<ValidatorSpec>) -> Self {
        self.core_mut().validators = validators;
        self
    }

    /// Sets the tab index.
    #[must_use]
    fn tab_index(mut self, tab_index: TabIndex) -> Self {
        self.core_mut().tab_index = Some(tab_index);
        self
    }

    /// Adds a CSS class.
    #[must_use]
    fn css_class(mut self, class: impl Into<String>) -> Self {
        self.core_mut().css_classes.push(class.into());
        self
    }

    /// Adds an HTML attribute to the control.
    #[must_use]
    fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.core_mut().control_attrs.insert(name.into(), value.into());
        self
    }
}

impl<T: Field + Sized> FieldBuilder for T {}

// ============================================================
// Reconciliation
// ============================================================

/// Merges one configuration property shared by a validator and its field.
///
/// The validator's value wins when both sides are set; otherwise the set
/// side is copied to the other. When neither side is set and the property
/// is required, a configuration error is returned. Both sides hold the
/// resolved value afterwards.
///
/// # Examples
///
/// ```
/// use formwork_forms::field::reconcile;
///
/// let mut validator = None;
/// let mut field = Some("Y-m-d".to_string());
/// reconcile(&mut validator, &mut field, "format", true).unwrap();
/// assert_eq!(validator.as_deref(), Some("Y-m-d"));
///
/// let (mut a, mut b) = (None::<f64>, None::<f64>);
/// assert!(reconcile(&mut a, &mut b, "min", false).is_ok());
/// assert!(reconcile(&mut a, &mut b, "max", true).is_err());
/// ```
pub fn reconcile<T: Clone>(
    validator_value: &mut Option<T>,
    field_value: &mut Option<T>,
    property: &str,
    required: bool,
) -> FormworkResult<()> {
    if let Some(value) = validator_value.clone() {
        *field_value = Some(value);
    } else if let Some(value) = field_value.clone() {
        *validator_value = Some(value);
    } else if required {
        return Err(FormworkError::ImproperlyConfigured(format!(
            "No `{property}` property defined in current validator or in field."
        )));
    }
    Ok(())
}

// ============================================================
// Attach
// ============================================================

/// Binds `field` to a form.
///
/// Fails when the field has no name, when the kind-specific attach check
/// fails, when a named validator is unknown, or when a validator cannot
/// reconcile its configuration with the field.
pub fn attach(field: &mut dyn Field, ctx: &AttachContext<'_>) -> FormworkResult<()> {
    let field_type = field.field_type().to_string();
    let visible = field.is_visible();
    let core = field.core_mut();
    if core.name.is_empty() {
        return Err(config_error(
            "Field",
            "No `name` property defined.",
            ctx.form_id,
            "",
            &field_type,
        ));
    }
    if core.id.is_none() {
        core.id = Some(format!("{}{}{}", ctx.form_id, ctx.delimiter, core.name));
    }
    if visible && core.required.is_none() {
        core.required = Some(ctx.default_required);
    }
    if core.translate.is_none() {
        core.translate = Some(ctx.translate);
    }
    let name = core.name.clone();

    field.on_attach(ctx).map_err(|e| match e {
        FormworkError::ImproperlyConfigured(msg) => {
            config_error("Field", msg, ctx.form_id, &name, &field_type)
        }
        other => other,
    })?;

    let specs = std::mem::take(&mut field.core_mut().validators);
    let mut resolved = Vec::with_capacity(specs.len());
    for spec in specs {
        let mut validator: Box<dyn Validator> = match spec {
            ValidatorSpec::Named(validator_name) => ctx
                .validators
                .create(&validator_name)
                .map_err(|e| config_error("Field", e, ctx.form_id, &name, &field_type))?,
            ValidatorSpec::Instance(validator) => validator,
        };
        validator.set_field(field).map_err(|e| match e {
            FormworkError::ImproperlyConfigured(msg) => {
                config_error(validator.name(), msg, ctx.form_id, &name, &field_type)
            }
            other => other,
        })?;
        resolved.push(ValidatorSpec::Instance(validator));
    }
    field.core_mut().validators = resolved;

    tracing::debug!(form = ctx.form_id, field = %name, field_type = %field_type, "field attached");
    Ok(())
}

// ============================================================
// Submit
// ============================================================

/// A snapshot of the field facts validators use for messages.
#[derive(Debug, Clone)]
pub struct FieldMeta {
    /// The field name.
    pub name: String,
    /// The field label.
    pub label: Option<String>,
    /// The HTML `type` of the control.
    pub field_type: String,
    /// Whether messages are translated.
    pub translate: bool,
}

impl FieldMeta {
    /// Captures the facts of `field`.
    pub fn of(field: &dyn Field) -> Self {
        let core = field.core();
        Self {
            name: core.name.clone(),
            label: core.label.clone(),
            field_type: field.field_type().to_string(),
            translate: core.is_translated(),
        }
    }
}

/// Form-level collaborators shared by all fields during one submission.
pub struct SubmitContext<'a> {
    /// Translator, when the form translates.
    pub translator: Option<&'a dyn Translator>,
    /// Message formatter.
    pub view: &'a dyn View,
    /// The form's aggregate error list.
    pub form_errors: &'a mut Vec<FormError>,
    /// Template of the "required" message.
    pub required_message: &'a str,
}

/// The handle a validator uses to register errors against its field.
pub struct ValidationContext<'a> {
    meta: &'a FieldMeta,
    translator: Option<&'a dyn Translator>,
    view: &'a dyn View,
    field_errors: &'a mut Vec<String>,
    form_errors: &'a mut Vec<FormError>,
}

impl<'a> ValidationContext<'a> {
    /// Creates a context appending to the given error lists.
    pub fn new(
        meta: &'a FieldMeta,
        translator: Option<&'a dyn Translator>,
        view: &'a dyn View,
        field_errors: &'a mut Vec<String>,
        form_errors: &'a mut Vec<FormError>,
    ) -> Self {
        Self {
            meta,
            translator,
            view,
            field_errors,
            form_errors,
        }
    }

    /// Returns the facts of the field being validated.
    pub const fn field(&self) -> &FieldMeta {
        self.meta
    }

    /// Returns `true` if the field already has errors.
    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }

    /// Translates `key` when the field translates.
    pub fn translate(&self, key: &str) -> String {
        match self.translator {
            Some(translator) if self.meta.translate => translator.translate(key),
            _ => key.to_string(),
        }
    }

    /// Registers an error against the field.
    ///
    /// The template is translated, the field label (or name) is prepended
    /// to `args` as `{0}`, and the template is formatted when it contains
    /// `{0}` or `{1}`. The message is appended to the field's errors and to
    /// the form's error list tagged with the field name.
    pub fn add_error(&mut self, template: &str, args: &[String]) {
        let template = self.translate(template);
        let label_or_name = match self.meta.label.as_deref() {
            Some(label) if !label.is_empty() => self.translate(label),
            _ => self.meta.name.clone(),
        };
        let mut all_args = Vec::with_capacity(args.len() + 1);
        all_args.push(label_or_name);
        all_args.extend(args.iter().cloned());

        let message = if template.contains("{0}") || template.contains("{1}") {
            format_positional(self.view, &template, &all_args)
        } else {
            template
        };
        self.field_errors.push(message.clone());
        self.form_errors
            .push(FormError::for_field(message, self.meta.name.clone()));
    }
}

/// Runs the submission protocol for one field and returns its new value.
///
/// Read-only and disabled fields return their current value without
/// running validators. Otherwise the raw value is looked up by name and
/// passed through the validator pipeline, which only runs when a value was
/// submitted or the field always validates. A required field that ends
/// with an empty value (or `false` for a field that always validates) and
/// no other error gets one "required" error.
pub fn submit(field: &mut dyn Field, params: &RequestParams, ctx: &mut SubmitContext<'_>) -> Value {
    let core = field.core();
    if core.read_only || core.disabled {
        return core.value.clone();
    }

    let mut value = params
        .get(&core.name)
        .map_or(Value::Null, |raw| field.resolve_raw(raw));
    let always_validate = field.always_validate();
    let run_validators = !value.is_null() || always_validate;
    let meta = FieldMeta::of(field);
    let required = field.core().is_required();

    let validators = std::mem::take(&mut field.core_mut().validators);
    {
        let mut vctx = ValidationContext::new(
            &meta,
            ctx.translator,
            ctx.view,
            &mut field.core_mut().errors,
            ctx.form_errors,
        );
        if run_validators {
            for spec in &validators {
                match spec {
                    ValidatorSpec::Instance(validator) => {
                        value = validator.validate(value, &mut vctx);
                    }
                    ValidatorSpec::Named(name) => {
                        tracing::warn!(field = %meta.name, validator = %name, "unresolved validator skipped");
                    }
                }
            }
        }
        // An unchecked checkbox resolves to `false`.
        let unset = value.is_empty() || (always_validate && value == Value::Bool(false));
        if required && !vctx.has_errors() && unset {
            vctx.add_error(ctx.required_message, &[]);
        }
    }
    field.core_mut().validators = validators;
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{Hidden, Text};
    use crate::validators::ClosureValidator;
    use crate::view::DefaultView;

    fn attach_ctx(registry: &ValidatorRegistry) -> AttachContext<'_> {
        AttachContext {
            form_id: "signup",
            delimiter: "_",
            default_required: true,
            translate: false,
            validators: registry,
        }
    }

    fn run(field: &mut dyn Field, params: &RequestParams) -> (Value, Vec<FormError>) {
        let mut form_errors = Vec::new();
        let mut ctx = SubmitContext {
            translator: None,
            view: &DefaultView,
            form_errors: &mut form_errors,
            required_message: "Field `{0}` is required.",
        };
        let value = submit(field, params, &mut ctx);
        (value, form_errors)
    }

    #[test]
    fn test_attach_derives_id_and_required() {
        let registry = ValidatorRegistry::builtin();
        let mut field = Text::new("email");
        attach(&mut field, &attach_ctx(&registry)).unwrap();
        assert_eq!(field.core().id.as_deref(), Some("signup_email"));
        assert_eq!(field.core().required, Some(true));
        assert_eq!(field.core().translate, Some(false));
    }

    #[test]
    fn test_attach_keeps_explicit_values() {
        let registry = ValidatorRegistry::builtin();
        let mut field = Text::new("email").id("custom").required(false);
        attach(&mut field, &attach_ctx(&registry)).unwrap();
        assert_eq!(field.core().id.as_deref(), Some("custom"));
        assert_eq!(field.core().required, Some(false));
    }

    #[test]
    fn test_attach_hidden_is_not_required() {
        let registry = ValidatorRegistry::builtin();
        let mut field = Hidden::new("token");
        attach(&mut field, &attach_ctx(&registry)).unwrap();
        assert!(!field.core().is_required());
    }

    #[test]
    fn test_attach_requires_name() {
        let registry = ValidatorRegistry::builtin();
        let mut field = Text::new("");
        let err = attach(&mut field, &attach_ctx(&registry)).unwrap_err();
        assert!(err.to_string().contains("No `name` property defined."));
        assert!(err.to_string().contains("form id: `signup`"));
    }

    #[test]
    fn test_attach_unknown_validator() {
        let registry = ValidatorRegistry::builtin();
        let mut field = Text::new("x").validator("Nope");
        let err = attach(&mut field, &attach_ctx(&registry)).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Nope"));
    }

    #[test]
    fn test_missing_value_runs_no_validators() {
        let registry = ValidatorRegistry::builtin();
        let mut field = Text::new("nick").required(false).validator(ClosureValidator::new(
            "Reject",
            |_value, ctx| {
                ctx.add_error("never", &[]);
                Value::Null
            },
        ));
        attach(&mut field, &attach_ctx(&registry)).unwrap();
        let (value, errors) = run(&mut field, &RequestParams::new());
        assert_eq!(value, Value::Null);
        assert!(errors.is_empty());
        assert!(field.core().errors.is_empty());
    }

    #[test]
    fn test_required_empty_yields_one_error() {
        let registry = ValidatorRegistry::builtin();
        let mut field = Text::new("name").label("Name");
        attach(&mut field, &attach_ctx(&registry)).unwrap();
        let params = RequestParams::from_pairs(vec![("name", "   ")]);
        let (value, errors) = run(&mut field, &params);
        assert_eq!(value, Value::String(String::new()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Field `Name` is required.");
        assert_eq!(errors[0].fields, vec!["name".to_string()]);
        assert_eq!(field.core().errors.len(), 1);
    }

    #[test]
    fn test_required_error_suppressed_after_validator_error() {
        let registry = ValidatorRegistry::builtin();
        let mut field = Text::new("code").validator(ClosureValidator::new("Reject", |_v, ctx| {
            ctx.add_error("Field '{0}' is wrong.", &[]);
            Value::Null
        }));
        attach(&mut field, &attach_ctx(&registry)).unwrap();
        let params = RequestParams::from_pairs(vec![("code", "abc")]);
        let (value, errors) = run(&mut field, &params);
        assert_eq!(value, Value::Null);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Field 'code' is wrong.");
    }

    #[test]
    fn test_read_only_passes_through() {
        let registry = ValidatorRegistry::builtin();
        let mut field = Text::new("x").value("keep").read_only(true);
        attach(&mut field, &attach_ctx(&registry)).unwrap();
        let params = RequestParams::from_pairs(vec![("x", "attacker")]);
        let (value, errors) = run(&mut field, &params);
        assert_eq!(value, Value::from("keep"));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_disabled_passes_through() {
        let registry = ValidatorRegistry::builtin();
        let mut field = Text::new("x").disabled(true);
        attach(&mut field, &attach_ctx(&registry)).unwrap();
        let params = RequestParams::from_pairs(vec![("x", "attacker")]);
        let (value, errors) = run(&mut field, &params);
        assert_eq!(value, Value::Null);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_pipeline_feeds_each_stage() {
        let registry = ValidatorRegistry::builtin();
        let mut field = Text::new("x")
            .validators(vec![])
            .validator(ClosureValidator::new("Upper", |v, _| {
                Value::from(v.to_form_string().to_uppercase())
            }))
            .validator(ClosureValidator::new("Suffix", |v, _| {
                Value::from(format!("{}!", v.to_form_string()))
            }));
        attach(&mut field, &attach_ctx(&registry)).unwrap();
        let params = RequestParams::from_pairs(vec![("x", "hi")]);
        let (value, _) = run(&mut field, &params);
        assert_eq!(value, Value::from("HI!"));
    }

    #[test]
    fn test_add_error_translates_message_and_label() {
        let meta = FieldMeta {
            name: "name".into(),
            label: Some("Name".into()),
            field_type: "text".into(),
            translate: true,
        };
        let translator: &dyn Translator = &|key: &str| match key {
            "Name" => "Jméno".to_string(),
            "Field `{0}` is required." => "Pole `{0}` je povinné.".to_string(),
            other => other.to_string(),
        };
        let mut field_errors = Vec::new();
        let mut form_errors = Vec::new();
        let mut ctx = ValidationContext::new(
            &meta,
            Some(translator),
            &DefaultView,
            &mut field_errors,
            &mut form_errors,
        );
        ctx.add_error("Field `{0}` is required.", &[]);
        assert_eq!(field_errors, vec!["Pole `Jméno` je povinné.".to_string()]);
        assert_eq!(form_errors.len(), 1);
    }

    #[test]
    fn test_reconcile_validator_wins() {
        let mut validator = Some(5);
        let mut field = Some(10);
        reconcile(&mut validator, &mut field, "maxlength", true).unwrap();
        assert_eq!(field, Some(5));
        assert_eq!(validator, Some(5));
    }
}

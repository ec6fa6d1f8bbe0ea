//! Groups of radio buttons or checkboxes sharing one name.
//!
//! A [`FieldsGroup`] renders one control and one label per option. Each
//! item id is `form_id + delimiter + field_name + delimiter + option_key`.
//! Radio groups hold a single key, checkbox groups a list of keys.

use std::collections::BTreeMap;

use formwork_core::{FormworkError, FormworkResult, Translator};

use crate::field::{AttachContext, Field, FieldCore, HasOptions};
use crate::fields::translate_in_place;
use crate::params::RawValue;
use crate::rendering::{attrs_suffix, build_item_attrs, RenderContext, LABEL_TEMPLATE};
use crate::value::Value;
use crate::view::escape_html;

const ITEM_TEMPLATE: &str =
    r#"<input id="{id}" name="{name}" type="{type}" value="{value}"{checked}{attrs} />"#;

/// One selectable option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOption {
    /// Label text. The key is shown when empty.
    pub text: String,
    /// Extra CSS classes for this item, space separated.
    pub class: Option<String>,
    /// Extra HTML attributes for this item.
    pub attrs: BTreeMap<String, String>,
}

impl FieldOption {
    /// Creates an option with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the CSS classes.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Adds an HTML attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// A radio or checkbox group.
#[derive(Debug)]
pub struct FieldsGroup {
    core: FieldCore,
    multiple: bool,
    options: Vec<(String, FieldOption)>,
}

impl FieldsGroup {
    /// Creates a single-select radio group.
    pub fn radio(name: impl Into<String>) -> Self {
        Self::with_multiple(name, false)
    }

    /// Creates a multi-select checkbox group.
    pub fn checkboxes(name: impl Into<String>) -> Self {
        Self::with_multiple(name, true)
    }

    fn with_multiple(name: impl Into<String>, multiple: bool) -> Self {
        Self {
            core: FieldCore::new(name, &["ValueInOptions"]),
            multiple,
            options: Vec::new(),
        }
    }

    /// Appends a plain option.
    #[must_use]
    pub fn option(self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.option_with(key, FieldOption::new(text))
    }

    /// Appends an option with its own classes and attributes.
    #[must_use]
    pub fn option_with(mut self, key: impl Into<String>, option: FieldOption) -> Self {
        self.options.push((key.into(), option));
        self
    }

    /// Returns the options in declaration order.
    pub fn options(&self) -> &[(String, FieldOption)] {
        &self.options
    }

    /// Returns the HTML id of the item for `key`.
    pub fn item_id(&self, ctx: &RenderContext<'_>, key: &str) -> String {
        format!(
            "{}{d}{}{d}{}",
            ctx.form_id,
            self.core.name,
            key,
            d = ctx.delimiter
        )
    }

    fn render_item(&self, ctx: &RenderContext<'_>, key: &str, option: &FieldOption) -> String {
        let id = escape_html(&self.item_id(ctx, key));
        let name = if self.multiple {
            format!("{}[]", self.core.name)
        } else {
            self.core.name.clone()
        };
        let name = escape_html(&name);
        let value = escape_html(key);
        let checked = if self.core.value.contains_key(key) {
            r#" checked="checked""#
        } else {
            ""
        };
        let classes: Vec<String> = option
            .class
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let required = !self.multiple && self.core.is_required();
        let control_attrs = build_item_attrs(self, ctx, option.attrs.clone(), &classes, true, required);
        let label_attrs = build_item_attrs(self, ctx, BTreeMap::new(), &classes, false, required);
        let control_attrs = attrs_suffix(ctx.view, &control_attrs);
        let label_attrs = attrs_suffix(ctx.view, &label_attrs);
        let text = if option.text.is_empty() {
            escape_html(key)
        } else {
            escape_html(&option.text)
        };

        let control = ctx.view.format(
            ITEM_TEMPLATE,
            &[
                ("id", id.as_str()),
                ("name", name.as_str()),
                ("type", self.field_type()),
                ("value", value.as_str()),
                ("checked", checked),
                ("attrs", control_attrs.as_str()),
            ],
        );
        let label = ctx.view.format(
            LABEL_TEMPLATE,
            &[
                ("id", id.as_str()),
                ("label", text.as_str()),
                ("attrs", label_attrs.as_str()),
            ],
        );
        control + &label
    }
}

impl Field for FieldsGroup {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn field_type(&self) -> &str {
        if self.multiple {
            "checkbox"
        } else {
            "radio"
        }
    }

    fn always_validate(&self) -> bool {
        self.multiple
    }

    fn on_attach(&mut self, _ctx: &AttachContext<'_>) -> FormworkResult<()> {
        if self.options.is_empty() {
            return Err(FormworkError::ImproperlyConfigured(
                "No `options` property defined.".into(),
            ));
        }
        Ok(())
    }

    fn on_pre_dispatch(&mut self, translator: Option<&dyn Translator>) {
        for (_, option) in &mut self.options {
            translate_in_place(&mut option.text, translator);
        }
    }

    fn resolve_raw(&self, raw: &RawValue) -> Value {
        if self.multiple {
            Value::from(raw.to_vec())
        } else {
            raw.first().map_or(Value::Null, Value::from)
        }
    }

    fn render_control(&self, ctx: &RenderContext<'_>) -> String {
        self.options
            .iter()
            .map(|(key, option)| self.render_item(ctx, key, option))
            .collect()
    }

    fn as_options(&self) -> Option<&dyn HasOptions> {
        Some(self)
    }
}

impl HasOptions for FieldsGroup {
    fn option_keys(&self) -> Vec<String> {
        self.options.iter().map(|(key, _)| key.clone()).collect()
    }

    fn is_multiple(&self) -> bool {
        self.multiple
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
    fn test_resolve_raw_shapes() {
        let radio = FieldsGroup::radio("size").option("s", "S");
        assert_eq!(
            radio.resolve_raw(&RawValue::from(vec!["m", "s"])),
            Value::from("m")
        );
        let boxes = FieldsGroup::checkboxes("tags").option("a", "A");
        assert_eq!(
            boxes.resolve_raw(&RawValue::from("a")),
            Value::from(vec!["a".to_string()])
        );
    }

    #[test]
    fn test_attach_requires_options() {
        let registry = ValidatorRegistry::builtin();
        let ctx = AttachContext {
            form_id: "f",
            delimiter: "_",
            default_required: false,
            translate: false,
            validators: &registry,
        };
        let mut group = FieldsGroup::radio("size");
        let err = attach(&mut group, &ctx).unwrap_err();
        assert!(err.to_string().contains("No `options` property defined."));
    }

    #[test]
    fn test_item_id() {
        let group = FieldsGroup::radio("size").option("s", "Small");
        assert_eq!(group.item_id(&ctx(), "s"), "f_size_s");
    }

    #[test]
    fn test_render_radio_items() {
        let group = FieldsGroup::radio("size")
            .value("m")
            .option("s", "Small")
            .option_with("m", FieldOption::new("Medium").with_class("big"));
        let html = group.render_control(&ctx());
        assert_eq!(
            html,
            concat!(
                r#"<input id="f_size_s" name="size" type="radio" value="s" class="size radio" />"#,
                r#"<label for="f_size_s" class="size radio">Small</label>"#,
                r#"<input id="f_size_m" name="size" type="radio" value="m" checked="checked" class="big size radio" />"#,
                r#"<label for="f_size_m" class="big size radio">Medium</label>"#,
            )
        );
    }

    #[test]
    fn test_render_checkboxes_are_never_required() {
        let group = FieldsGroup::checkboxes("tags")
            .required(true)
            .value(Value::from(vec!["a".to_string()]))
            .option("a", "")
            .option("b", "B");
        let html = group.render_control(&ctx());
        assert!(html.contains(r#"name="tags[]""#));
        assert!(html.contains(r#"value="a" checked="checked""#));
        assert!(!html.contains("required"));
        assert!(html.contains(r#"<label for="f_tags_a" class="tags checkbox">a</label>"#));
    }

    #[test]
    fn test_options_translated() {
        let mut group = FieldsGroup::radio("size").option("s", "Small");
        let translator: &dyn Translator = &|key: &str| format!("{key}!");
        group.on_pre_dispatch(Some(translator));
        assert_eq!(group.options()[0].1.text, "Small!");
    }
}

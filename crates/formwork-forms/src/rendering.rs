//! Natural rendering of fields.
//!
//! Controls, labels and error lists are produced from small templates
//! formatted through the form's [`View`]. Attribute assembly follows fixed
//! rules shared by every kind:
//!
//! - kind-specific attributes (`maxlength`, `min`, `rows`, ...) are passed in
//!   by the field
//! - `autofocus`, `disabled`, `readonly` and `required` on visible fields
//!   become both an attribute and a CSS class
//! - `tabindex` is offset by the form's base tab index, and `title` is
//!   rendered when set
//! - `class` lists the field's CSS classes, then the dashed field name and
//!   the control type

use std::collections::BTreeMap;

use crate::field::{Field, TabIndex};
use crate::view::{escape_html, View};

/// Template of an `<input>` control.
pub const CONTROL_TEMPLATE: &str =
    r#"<input id="{id}" name="{name}" type="{type}" value="{value}"{attrs} />"#;

/// Template of a `<label>` element.
pub const LABEL_TEMPLATE: &str = r#"<label for="{id}"{attrs}>{label}</label>"#;

/// Form-level facts needed while rendering a field.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The owning form id.
    pub form_id: &'a str,
    /// Delimiter joining ids.
    pub delimiter: &'a str,
    /// Offset added to every fixed tab index.
    pub base_tab_index: i32,
    /// Template formatter.
    pub view: &'a dyn View,
}

/// Converts a `PascalCase` or `camelCase` name to `dashed-case`.
///
/// # Examples
///
/// ```
/// use formwork_forms::rendering::dashed;
///
/// assert_eq!(dashed("firstName"), "first-name");
/// assert_eq!(dashed("Email"), "email");
/// ```
pub fn dashed(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Assembles the attribute map of a field's control or label.
pub fn build_attrs(
    field: &dyn Field,
    ctx: &RenderContext<'_>,
    kind_attrs: BTreeMap<String, String>,
    control: bool,
) -> BTreeMap<String, String> {
    build_item_attrs(field, ctx, kind_attrs, &[], control, field.core().is_required())
}

/// Assembles attributes for one control of a field, with extra CSS classes
/// following the field's own and an explicit `required` flag.
pub fn build_item_attrs(
    field: &dyn Field,
    ctx: &RenderContext<'_>,
    kind_attrs: BTreeMap<String, String>,
    extra_classes: &[String],
    control: bool,
    required: bool,
) -> BTreeMap<String, String> {
    let core = field.core();
    let mut attrs = if control {
        core.control_attrs.clone()
    } else {
        BTreeMap::new()
    };
    attrs.extend(kind_attrs);

    let mut classes: Vec<String> = core.css_classes.clone();
    classes.extend(extra_classes.iter().cloned());
    if field.is_visible() {
        let flags = [
            ("autofocus", core.auto_focus),
            ("disabled", core.disabled),
            ("readonly", core.read_only),
            ("required", required),
        ];
        for (name, set) in flags {
            if set {
                if control {
                    attrs.insert(name.to_string(), name.to_string());
                }
                classes.push(name.to_string());
            }
        }
        if control {
            if let Some(TabIndex::Fixed(index)) = core.tab_index {
                attrs.insert("tabindex".into(), (index + ctx.base_tab_index).to_string());
            }
            if let Some(title) = &core.title {
                attrs.insert("title".into(), title.clone());
            }
        }
    }
    classes.push(dashed(&core.name));
    classes.push(field.field_type().to_string());

    let mut unique: Vec<String> = Vec::with_capacity(classes.len());
    for class in classes {
        if !class.is_empty() && !unique.contains(&class) {
            unique.push(class);
        }
    }
    attrs.insert("class".into(), unique.join(" "));
    attrs
}

/// Renders an attribute map with a leading space, or nothing when empty.
pub fn attrs_suffix(view: &dyn View, attrs: &BTreeMap<String, String>) -> String {
    let rendered = view.render_attrs(attrs);
    if rendered.is_empty() {
        rendered
    } else {
        format!(" {rendered}")
    }
}

/// Renders an `<input>` control of the given type and value.
pub fn render_input(
    field: &dyn Field,
    ctx: &RenderContext<'_>,
    input_type: &str,
    value: &str,
    kind_attrs: BTreeMap<String, String>,
) -> String {
    let core = field.core();
    let attrs = build_attrs(field, ctx, kind_attrs, true);
    let id = escape_html(core.id_or_name());
    let name = escape_html(&core.name);
    let value = escape_html(value);
    let attrs = attrs_suffix(ctx.view, &attrs);
    ctx.view.format(
        CONTROL_TEMPLATE,
        &[
            ("id", id.as_str()),
            ("name", name.as_str()),
            ("type", input_type),
            ("value", value.as_str()),
            ("attrs", attrs.as_str()),
        ],
    )
}

/// Renders the field's label, or nothing when it has none.
pub fn render_label(field: &dyn Field, ctx: &RenderContext<'_>) -> String {
    let core = field.core();
    let Some(label) = core.label.as_deref() else {
        return String::new();
    };
    let attrs = build_attrs(field, ctx, BTreeMap::new(), false);
    let id = escape_html(core.id_or_name());
    let label = escape_html(label);
    let attrs = attrs_suffix(ctx.view, &attrs);
    ctx.view.format(
        LABEL_TEMPLATE,
        &[
            ("id", id.as_str()),
            ("label", label.as_str()),
            ("attrs", attrs.as_str()),
        ],
    )
}

/// Renders the field's error messages, or nothing when it has none.
pub fn render_errors(field: &dyn Field) -> String {
    let core = field.core();
    if core.errors.is_empty() {
        return String::new();
    }
    let mut out = String::from(r#"<span class="errors">"#);
    for (i, message) in core.errors.iter().enumerate() {
        out.push_str(&format!(
            r#"<span class="error error-{} error-{i}">{}</span>"#,
            escape_html(&core.name),
            escape_html(message)
        ));
    }
    out.push_str("</span>");
    out
}

/// Renders label, control and errors in that order.
pub fn render_field(field: &dyn Field, ctx: &RenderContext<'_>) -> String {
    let mut out = render_label(field, ctx);
    out.push_str(&field.render_control(ctx));
    out.push_str(&render_errors(field));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldBuilder;
    use crate::fields::{Hidden, Text};
    use crate::view::DefaultView;

    fn ctx() -> RenderContext<'static> {
        RenderContext {
            form_id: "signup",
            delimiter: "_",
            base_tab_index: 100,
            view: &DefaultView,
        }
    }

    #[test]
    fn test_dashed() {
        assert_eq!(dashed("FirstName"), "first-name");
        assert_eq!(dashed("user_name"), "user_name");
    }

    #[test]
    fn test_flags_become_attrs_and_classes() {
        let field = Text::new("firstName")
            .id("signup_firstName")
            .required(true)
            .read_only(true)
            .css_class("wide")
            .tab_index(TabIndex::Fixed(2))
            .title("Your name");
        let attrs = build_attrs(&field, &ctx(), BTreeMap::new(), true);
        assert_eq!(attrs["class"], "wide readonly required first-name text");
        assert_eq!(attrs["required"], "required");
        assert_eq!(attrs["readonly"], "readonly");
        assert_eq!(attrs["tabindex"], "102");
        assert_eq!(attrs["title"], "Your name");
    }

    #[test]
    fn test_label_attrs_have_classes_only() {
        let field = Text::new("name").required(true).title("t");
        let attrs = build_attrs(&field, &ctx(), BTreeMap::new(), false);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["class"], "required name text");
    }

    #[test]
    fn test_hidden_has_no_flags() {
        let field = Hidden::new("token").required(true);
        let attrs = build_attrs(&field, &ctx(), BTreeMap::new(), true);
        assert_eq!(attrs["class"], "token hidden");
        assert!(!attrs.contains_key("required"));
    }

    #[test]
    fn test_render_label() {
        let field = Text::new("name").id("signup_name").label("Name");
        assert_eq!(
            render_label(&field, &ctx()),
            r#"<label for="signup_name" class="name text">Name</label>"#
        );
        assert_eq!(render_label(&Text::new("x"), &ctx()), "");
    }

    #[test]
    fn test_render_errors() {
        let mut field = Text::new("name");
        assert_eq!(render_errors(&field), "");
        field.core_mut().errors = vec!["a".into(), "b".into()];
        assert_eq!(
            render_errors(&field),
            "<span class=\"errors\"><span class=\"error error-name error-0\">a</span>\
             <span class=\"error error-name error-1\">b</span></span>"
        );
    }
}

//! Multi-line text.

use formwork_core::FormworkResult;

use crate::field::{AttachContext, Field, FieldCore, HasMaxLength};
use crate::fields::kind_attrs;
use crate::rendering::{attrs_suffix, build_attrs, RenderContext};
use crate::validators::ValidatorSpec;
use crate::view::escape_html;

const TEXTAREA_TEMPLATE: &str = r#"<textarea id="{id}" name="{name}"{attrs}>{value}</textarea>"#;

/// A `<textarea>` control.
///
/// Setting `maxlength` appends the `MaxLength` validator when the field is
/// attached, unless one is already configured.
#[derive(Debug)]
pub struct Textarea {
    core: FieldCore,
    rows: Option<u32>,
    cols: Option<u32>,
    max_length: Option<usize>,
}

impl Textarea {
    /// Creates a textarea.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: FieldCore::new(name, &["SafeString"]),
            rows: None,
            cols: None,
            max_length: None,
        }
    }

    /// Sets the `rows` attribute.
    #[must_use]
    pub const fn with_rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Sets the `cols` attribute.
    #[must_use]
    pub const fn with_cols(mut self, cols: u32) -> Self {
        self.cols = Some(cols);
        self
    }

    /// Sets the `maxlength` attribute.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

impl Field for Textarea {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn field_type(&self) -> &str {
        "textarea"
    }

    fn on_attach(&mut self, _ctx: &AttachContext<'_>) -> FormworkResult<()> {
        if self.max_length.is_some() && !self.core.has_validator("MaxLength") {
            self.core
                .validators
                .push(ValidatorSpec::Named("MaxLength".into()));
        }
        Ok(())
    }

    fn render_control(&self, ctx: &RenderContext<'_>) -> String {
        let kind = kind_attrs(&[
            ("maxlength", self.max_length.map(|m| m.to_string())),
            ("rows", self.rows.map(|r| r.to_string())),
            ("cols", self.cols.map(|c| c.to_string())),
        ]);
        let attrs = build_attrs(self, ctx, kind, true);
        let id = escape_html(self.core.id_or_name());
        let name = escape_html(&self.core.name);
        let value = escape_html(&self.core.value.to_form_string());
        let attrs = attrs_suffix(ctx.view, &attrs);
        ctx.view.format(
            TEXTAREA_TEMPLATE,
            &[
                ("id", id.as_str()),
                ("name", name.as_str()),
                ("value", value.as_str()),
                ("attrs", attrs.as_str()),
            ],
        )
    }

    fn as_max_length_mut(&mut self) -> Option<&mut dyn HasMaxLength> {
        Some(self)
    }
}

impl HasMaxLength for Textarea {
    fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    fn set_max_length(&mut self, max_length: Option<usize>) {
        self.max_length = max_length;
    }
}

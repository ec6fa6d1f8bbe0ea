//! Single-line text inputs.

use formwork_core::Translator;

use crate::field::{Field, FieldCore, HasDataList, HasMaxLength, HasPattern};
use crate::fields::{kind_attrs, translate_in_place};
use crate::rendering::{render_input, RenderContext};

/// The HTML type of a [`Text`] input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextType {
    /// `text`
    #[default]
    Text,
    /// `email`
    Email,
    /// `password`
    Password,
    /// `search`
    Search,
    /// `tel`
    Tel,
    /// `url`
    Url,
}

impl TextType {
    /// Returns the HTML type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Search => "search",
            Self::Tel => "tel",
            Self::Url => "url",
        }
    }
}

/// A single-line text input.
///
/// Password inputs never render their value back.
#[derive(Debug)]
pub struct Text {
    core: FieldCore,
    text_type: TextType,
    max_length: Option<usize>,
    pattern: Option<String>,
    placeholder: Option<String>,
    list: Option<String>,
}

impl Text {
    /// Creates a `text` input.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_type(name, TextType::Text)
    }

    /// Creates an `email` input validated by `Email`.
    pub fn email(name: impl Into<String>) -> Self {
        Self::with_type(name, TextType::Email)
    }

    /// Creates a `password` input.
    pub fn password(name: impl Into<String>) -> Self {
        Self::with_type(name, TextType::Password)
    }

    /// Creates an input of the given type.
    pub fn with_type(name: impl Into<String>, text_type: TextType) -> Self {
        let validators: &[&str] = match text_type {
            TextType::Email => &["Email"],
            _ => &["SafeString"],
        };
        Self {
            core: FieldCore::new(name, validators),
            text_type,
            max_length: None,
            pattern: None,
            placeholder: None,
            list: None,
        }
    }

    /// Sets the `maxlength` attribute.
    #[must_use]
    pub const fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets the `pattern` attribute.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the `placeholder` attribute.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Binds the input to a `<datalist>` element.
    #[must_use]
    pub fn with_list(mut self, list: impl Into<String>) -> Self {
        self.list = Some(list.into());
        self
    }

    /// Returns the input type.
    pub const fn text_type(&self) -> TextType {
        self.text_type
    }

    /// Returns the placeholder.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }
}

impl Field for Text {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn field_type(&self) -> &str {
        self.text_type.as_str()
    }

    fn on_pre_dispatch(&mut self, translator: Option<&dyn Translator>) {
        if let Some(placeholder) = self.placeholder.as_mut() {
            translate_in_place(placeholder, translator);
        }
    }

    fn render_control(&self, ctx: &RenderContext<'_>) -> String {
        let value = match self.text_type {
            TextType::Password => String::new(),
            _ => self.core.value.to_form_string(),
        };
        let attrs = kind_attrs(&[
            ("maxlength", self.max_length.map(|m| m.to_string())),
            ("pattern", self.pattern.clone()),
            ("placeholder", self.placeholder.clone()),
            ("list", self.list.clone()),
        ]);
        render_input(self, ctx, self.field_type(), &value, attrs)
    }

    fn as_data_list(&self) -> Option<&dyn HasDataList> {
        Some(self)
    }

    fn as_max_length_mut(&mut self) -> Option<&mut dyn HasMaxLength> {
        Some(self)
    }

    fn as_pattern_mut(&mut self) -> Option<&mut dyn HasPattern> {
        Some(self)
    }
}

impl HasMaxLength for Text {
    fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    fn set_max_length(&mut self, max_length: Option<usize>) {
        self.max_length = max_length;
    }
}

impl HasPattern for Text {
    fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    fn set_pattern(&mut self, pattern: Option<String>) {
        self.pattern = pattern;
    }
}

impl HasDataList for Text {
    fn list(&self) -> Option<&str> {
        self.list.as_deref()
    }
}

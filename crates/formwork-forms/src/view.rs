//! The string formatting collaborator used for messages and markup.
//!
//! Forms and fields never build markup or messages with ad-hoc string
//! concatenation. They hand a template with `{key}` placeholders to a
//! [`View`], and attribute maps to [`View::render_attrs`].

use std::collections::BTreeMap;
use std::fmt;

/// Formats templates and HTML attribute strings.
pub trait View: Send + Sync + fmt::Debug {
    /// Replaces every `{key}` placeholder in `template` with the matching
    /// value from `args`. Unknown placeholders are left untouched.
    fn format(&self, template: &str, args: &[(&str, &str)]) -> String;

    /// Renders `attrs` as `key="value"` pairs separated by single spaces,
    /// with values HTML-escaped.
    fn render_attrs(&self, attrs: &BTreeMap<String, String>) -> String;
}

/// The built-in [`View`].
///
/// # Examples
///
/// ```
/// use formwork_forms::view::{DefaultView, View};
///
/// let view = DefaultView;
/// assert_eq!(
///     view.format("Field `{0}` is required.", &[("0", "E-mail")]),
///     "Field `E-mail` is required."
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultView;

impl View for DefaultView {
    fn format(&self, template: &str, args: &[(&str, &str)]) -> String {
        let mut result = template.to_string();
        for (key, value) in args {
            result = result.replace(&format!("{{{key}}}"), value);
        }
        result
    }

    fn render_attrs(&self, attrs: &BTreeMap<String, String>) -> String {
        attrs
            .iter()
            .map(|(k, v)| format!(r#"{k}="{}""#, escape_html(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Formats `template` with positional arguments `{0}`, `{1}`, ...
pub fn format_positional(view: &dyn View, template: &str, args: &[String]) -> String {
    let keys: Vec<String> = (0..args.len()).map(|i| i.to_string()).collect();
    let pairs: Vec<(&str, &str)> = keys
        .iter()
        .map(String::as_str)
        .zip(args.iter().map(String::as_str))
        .collect();
    view.format(template, &pairs)
}

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their HTML entity equivalents.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

//! Date and time inputs.

use chrono::NaiveDateTime;

use crate::date_format;
use crate::field::{Field, FieldCore, HasDataList, HasFormat, HasMinMaxStep};
use crate::fields::kind_attrs;
use crate::rendering::{render_input, RenderContext};
use crate::value::Value;

/// The HTML type of a [`Date`] input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateKind {
    /// `date`
    #[default]
    Date,
    /// `datetime-local`
    DateTimeLocal,
    /// `time`
    Time,
    /// `month`
    Month,
    /// `week`
    Week,
}

impl DateKind {
    /// Returns the HTML type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::DateTimeLocal => "datetime-local",
            Self::Time => "time",
            Self::Month => "month",
            Self::Week => "week",
        }
    }

    /// Returns the format browsers submit for this kind.
    pub const fn default_format(self) -> &'static str {
        match self {
            Self::Date => "Y-m-d",
            Self::DateTimeLocal => "Y-m-d\\TH:i",
            Self::Time => "H:i",
            Self::Month => "Y-m",
            Self::Week => "o-\\WW",
        }
    }
}

/// A date, time, month or week input validated by `Date`.
///
/// Bounds and values are rendered with the field format.
#[derive(Debug)]
pub struct Date {
    core: FieldCore,
    kind: DateKind,
    format: Option<String>,
    min: Option<NaiveDateTime>,
    max: Option<NaiveDateTime>,
    step: Option<f64>,
    list: Option<String>,
}

impl Date {
    /// Creates an input of the given kind with its default format.
    pub fn new(name: impl Into<String>, kind: DateKind) -> Self {
        Self {
            core: FieldCore::new(name, &["Date"]),
            kind,
            format: Some(kind.default_format().to_string()),
            min: None,
            max: None,
            step: None,
            list: None,
        }
    }

    /// Creates a `date` input.
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, DateKind::Date)
    }

    /// Creates a `datetime-local` input.
    pub fn datetime_local(name: impl Into<String>) -> Self {
        Self::new(name, DateKind::DateTimeLocal)
    }

    /// Creates a `time` input.
    pub fn time(name: impl Into<String>) -> Self {
        Self::new(name, DateKind::Time)
    }

    /// Creates a `month` input.
    pub fn month(name: impl Into<String>) -> Self {
        Self::new(name, DateKind::Month)
    }

    /// Creates a `week` input.
    pub fn week(name: impl Into<String>) -> Self {
        Self::new(name, DateKind::Week)
    }

    /// Replaces the format.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the lower bound.
    #[must_use]
    pub const fn with_min(mut self, min: NaiveDateTime) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound.
    #[must_use]
    pub const fn with_max(mut self, max: NaiveDateTime) -> Self {
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

    /// Returns the input kind.
    pub const fn kind(&self) -> DateKind {
        self.kind
    }

    fn format_or_default(&self) -> &str {
        self.format
            .as_deref()
            .unwrap_or_else(|| self.kind.default_format())
    }

    fn render_date(&self, date: &NaiveDateTime) -> String {
        date_format::format(date, self.format_or_default())
    }
}

impl Field for Date {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut FieldCore {
        &mut self.core
    }

    fn field_type(&self) -> &str {
        self.kind.as_str()
    }

    fn render_control(&self, ctx: &RenderContext<'_>) -> String {
        let attrs = kind_attrs(&[
            ("min", self.min.as_ref().map(|d| self.render_date(d))),
            ("max", self.max.as_ref().map(|d| self.render_date(d))),
            ("step", self.step.map(|s| s.to_string())),
            ("list", self.list.clone()),
        ]);
        let value = match &self.core.value {
            Value::DateTime(date) => self.render_date(date),
            other => other.to_form_string(),
        };
        render_input(self, ctx, self.field_type(), &value, attrs)
    }

    fn as_format_mut(&mut self) -> Option<&mut dyn HasFormat> {
        Some(self)
    }

    fn as_date_bounds_mut(&mut self) -> Option<&mut dyn HasMinMaxStep<NaiveDateTime>> {
        Some(self)
    }

    fn as_data_list(&self) -> Option<&dyn HasDataList> {
        Some(self)
    }
}

impl HasFormat for Date {
    fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    fn set_format(&mut self, format: Option<String>) {
        self.format = format;
    }
}

impl HasMinMaxStep<NaiveDateTime> for Date {
    fn min(&self) -> Option<NaiveDateTime> {
        self.min
    }

    fn max(&self) -> Option<NaiveDateTime> {
        self.max
    }

    fn step(&self) -> Option<f64> {
        self.step
    }

    fn set_min(&mut self, min: Option<NaiveDateTime>) {
        self.min = min;
    }

    fn set_max(&mut self, max: Option<NaiveDateTime>) {
        self.max = max;
    }

    fn set_step(&mut self, step: Option<f64>) {
        self.step = step;
    }
}

impl HasDataList for Date {
    fn list(&self) -> Option<&str> {
        self.list.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldBuilder;
    use crate::view::DefaultView;
    use chrono::NaiveDate;

    fn ctx() -> RenderContext<'static> {
        RenderContext {
            form_id: "f",
            delimiter: "_",
            base_tab_index: 0,
            view: &DefaultView,
        }
    }

    #[test]
    fn test_default_formats() {
        assert_eq!(Date::date("d").format(), Some("Y-m-d"));
        assert_eq!(Date::datetime_local("d").format(), Some("Y-m-d\\TH:i"));
        assert_eq!(Date::time("d").format(), Some("H:i"));
        assert_eq!(Date::month("d").format(), Some("Y-m"));
        assert_eq!(Date::week("d").format(), Some("o-\\WW"));
    }

    #[test]
    fn test_render_formats_value_and_bounds() {
        let day = |d| {
            NaiveDate::from_ymd_opt(2024, 3, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        let field = Date::date("born")
            .id("f_born")
            .value(day(15))
            .with_min(day(1))
            .with_list("days");
        assert_eq!(
            field.render_control(&ctx()),
            r#"<input id="f_born" name="born" type="date" value="2024-03-15" class="born date" list="days" min="2024-03-01" />"#
        );
    }

    #[test]
    fn test_render_raw_string_value() {
        let field = Date::month("m").id("f_m").value("2024-13");
        assert!(field.render_control(&ctx()).contains(r#"value="2024-13""#));
    }
}

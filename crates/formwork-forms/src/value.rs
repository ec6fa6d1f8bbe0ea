//! Typed field values.
//!
//! The [`Value`] enum represents every value a field can hold after
//! submission: raw strings, cleaned numbers, parsed dates, checkbox flags
//! and lists of option keys. Values are serde-serializable so forms can
//! persist them into the session between requests.

use std::fmt;

use chrono::NaiveDateTime;

/// A field value.
///
/// # Examples
///
/// ```
/// use formwork_forms::value::Value;
///
/// assert!(Value::Null.is_empty());
/// assert!(Value::from("").is_empty());
/// assert!(!Value::from("x").is_empty());
/// assert_eq!(Value::from(42_i64), Value::Int(42));
/// ```
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Value {
    /// No value submitted, or an unrecoverable parse failure.
    #[default]
    Null,
    /// A boolean flag (checkboxes).
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A UTF-8 string.
    String(String),
    /// A date and time without timezone.
    DateTime(NaiveDateTime),
    /// A list of values (multi-select groups).
    List(Vec<Value>),
}

impl Value {
    /// Returns `true` for `Null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `Null`, an empty string or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Returns the string slice if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items if this is a `List`.
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `true` if this value equals the option key `key`, or, for a
    /// list, contains it.
    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            Self::List(items) => items.iter().any(|item| item.contains_key(key)),
            Self::Null => false,
            other => other.to_form_string() == key,
        }
    }

    /// Renders the value the way it is written back into an HTML control.
    ///
    /// `Null` becomes an empty string, `true` becomes `"1"` and lists are
    /// joined with commas.
    pub fn to_form_string(&self) -> String {
        match self {
            Self::Null | Self::Bool(false) => String::new(),
            Self::Bool(true) => "1".to_string(),
            Self::List(items) => items
                .iter()
                .map(Self::to_form_string)
                .collect::<Vec<_>>()
                .join(","),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::List(vals) => {
                write!(f, "[")?;
                for (i, v) in vals.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
        }
    }
}

// ── Conversions ──────────────────────────────────────────────────────

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items.into_iter().map(Self::String).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

//! Raw request parameters supplied by the host framework.
//!
//! [`RequestParams`] maps a field name to its [`RawValue`]. It can be built
//! from pairs, from a map, or parsed from an
//! `application/x-www-form-urlencoded` body or query string. A key suffixed
//! with `[]`, or a key repeated more than once, yields a
//! [`RawValue::Multiple`].

use std::collections::HashMap;

/// One submitted parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// A single value.
    Single(String),
    /// Several values under one name.
    Multiple(Vec<String>),
}

impl RawValue {
    /// Returns the first submitted string, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Single(s) => Some(s),
            Self::Multiple(items) => items.first().map(String::as_str),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            Self::Multiple(items) => items.push(value),
            Self::Single(first) => {
                *self = Self::Multiple(vec![std::mem::take(first), value]);
            }
        }
    }

    /// Returns all submitted strings.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::Single(s) => vec![s.clone()],
            Self::Multiple(items) => items.clone(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Single(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Single(s)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(items: Vec<&str>) -> Self {
        Self::Multiple(items.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for RawValue {
    fn from(items: Vec<String>) -> Self {
        Self::Multiple(items)
    }
}

/// Parsed request parameters keyed by field name.
///
/// # Examples
///
/// ```
/// use formwork_forms::params::{RawValue, RequestParams};
///
/// let params = RequestParams::parse("name=Ann+Lee&colors[]=red&colors[]=blue");
/// assert_eq!(params.get("name"), Some(&RawValue::Single("Ann Lee".into())));
/// assert_eq!(
///     params.get("colors"),
///     Some(&RawValue::Multiple(vec!["red".into(), "blue".into()]))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    params: HashMap<String, RawValue>,
}

impl RequestParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters from `(key, value)` pairs, applying the `[]`
    /// suffix and repeated-key rules.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.append(key.as_ref(), value.into());
        }
        params
    }

    /// Parses a URL-encoded body or query string.
    pub fn parse(encoded: &str) -> Self {
        Self::from_pairs(
            url::form_urlencoded::parse(encoded.trim_start_matches('?').as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        )
    }

    /// Appends one submitted pair.
    pub fn append(&mut self, key: &str, value: String) {
        let (name, multiple) = key
            .strip_suffix("[]")
            .map_or((key, false), |name| (name, true));
        match self.params.get_mut(name) {
            Some(existing) => existing.push(value),
            None if multiple => {
                self.params
                    .insert(name.to_string(), RawValue::Multiple(vec![value]));
            }
            None => {
                self.params.insert(name.to_string(), RawValue::Single(value));
            }
        }
    }

    /// Sets a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.params.insert(key.into(), value.into());
    }

    /// Returns the raw value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.params.get(name)
    }

    /// Returns `true` if `name` was submitted.
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Returns the number of submitted names.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over the submitted names and values.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawValue)> {
        self.params.iter()
    }
}

impl From<HashMap<String, RawValue>> for RequestParams {
    fn from(params: HashMap<String, RawValue>) -> Self {
        Self { params }
    }
}

//! Ordered query parameters and their canonical string forms
//!
//! The PTV signature covers the exact bytes of the path and query string, so
//! parameters are kept in insertion order and rendered deterministically.

use chrono::{DateTime, SecondsFormat, Utc};
use url::form_urlencoded;

/// Conversion of a parameter value into the canonical form PTV expects
pub trait QueryValue {
    /// Render the value as it appears in the query string (before encoding)
    fn to_query_value(&self) -> String;
}

macro_rules! display_query_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_query_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, f32, f64, str, String);

impl QueryValue for bool {
    fn to_query_value(&self) -> String {
        if *self { "true" } else { "false" }.to_string()
    }
}

/// Renders as `YYYY-MM-DDTHH:MM:SSZ`; sub-second precision is truncated.
impl QueryValue for DateTime<Utc> {
    fn to_query_value(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> String {
        (**self).to_query_value()
    }
}

/// Ordered collection of `(key, value)` query pairs
///
/// Keys may repeat; repeated keys are emitted as separate `key=value` pairs
/// in the order they were pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter set
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a single parameter
    pub fn push(&mut self, key: &str, value: impl QueryValue) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_query_value()));
        self
    }

    /// Append a parameter only when a value is present
    pub fn push_opt<V: QueryValue>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append one pair per value, preserving order (repeatable parameters)
    pub fn push_all<I>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: QueryValue,
    {
        for value in values {
            self.push(key, value);
        }
        self
    }

    /// Builder-style variant of [`QueryParams::push`]
    #[must_use]
    pub fn with(mut self, key: &str, value: impl QueryValue) -> Self {
        self.push(key, value);
        self
    }

    /// All pairs in insertion order
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// First value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether any parameter is stored under `key`
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-encode the pairs (`application/x-www-form-urlencoded`) in order
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl<K: AsRef<str>, V: QueryValue> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key.as_ref(), value);
        }
        params
    }
}

/// Percent-encode a user-supplied value for use as a single path segment
///
/// Spaces become `%20` rather than `+`, which only means a space in queries.
#[must_use]
pub fn encode_path_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

//! Query string serialization for API operations.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// URL-encodes a string for use in query parameters.
pub fn urlencode<T: AsRef<str>>(s: T) -> String {
    url::form_urlencoded::byte_serialize(s.as_ref().as_bytes()).collect()
}

/// Percent-encodes a string for use as one path segment.
///
/// Unlike [`urlencode`], a space becomes `%20`. A literal `+` is already escaped as
/// `%2B` by the form serializer, so every remaining `+` stands for a space.
pub fn path_segment_encode<T: AsRef<str>>(s: T) -> String {
    urlencode(s).replace('+', "%20")
}

/// A single query value that can appear on its own or inside a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryScalar {
    /// Serialized as the literal `null`.
    Null,
    #[allow(missing_docs)]
    Bool(bool),
    #[allow(missing_docs)]
    Number(serde_json::Number),
    #[allow(missing_docs)]
    String(String),
}

impl fmt::Display for QueryScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryScalar::Null => f.write_str("null"),
            QueryScalar::Bool(b) => write!(f, "{b}"),
            QueryScalar::Number(n) => write!(f, "{n}"),
            QueryScalar::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for QueryScalar {
    fn from(value: &str) -> Self {
        QueryScalar::String(value.to_owned())
    }
}

impl From<String> for QueryScalar {
    fn from(value: String) -> Self {
        QueryScalar::String(value)
    }
}

impl From<&String> for QueryScalar {
    fn from(value: &String) -> Self {
        QueryScalar::String(value.clone())
    }
}

impl From<bool> for QueryScalar {
    fn from(value: bool) -> Self {
        QueryScalar::Bool(value)
    }
}

macro_rules! impl_integer_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for QueryScalar {
                fn from(value: $t) -> Self {
                    QueryScalar::Number(serde_json::Number::from(value))
                }
            }
        )*
    };
}

impl_integer_scalar!(i32, i64, u32, u64, usize);

impl From<f64> for QueryScalar {
    fn from(value: f64) -> Self {
        // Integral floats render without a fractional part, `10.0` becomes `10`.
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
            return QueryScalar::Number(serde_json::Number::from(value as i64));
        }
        match serde_json::Number::from_f64(value) {
            Some(n) => QueryScalar::Number(n),
            None => QueryScalar::String(value.to_string()),
        }
    }
}

/// A value in an [`HttpQuery`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// A string, number, boolean or null.
    Scalar(QueryScalar),
    /// Serialized as an RFC 3339 UTC timestamp with milliseconds.
    Date(DateTime<Utc>),
    /// Serialized as repeated `key=value` pairs.
    Array(Vec<QueryScalar>),
    /// Like [`QueryValue::Array`], without duplicates. Use [`QueryValue::set`] to build one.
    Set(Vec<QueryScalar>),
    /// Serialized with bracketed keys, `parent[child]=value`.
    Object(HttpQuery),
}

impl QueryValue {
    /// Builds a set value, keeping the first occurrence of every element in insertion order.
    pub fn set<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<QueryScalar>,
    {
        let mut unique: Vec<QueryScalar> = Vec::new();
        for value in values {
            let value = value.into();
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        QueryValue::Set(unique)
    }
}

macro_rules! impl_scalar_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for QueryValue {
                fn from(value: $t) -> Self {
                    QueryValue::Scalar(value.into())
                }
            }
        )*
    };
}

impl_scalar_value!(QueryScalar, &str, String, &String, bool, i32, i64, u32, u64, usize, f64);

impl From<DateTime<Utc>> for QueryValue {
    fn from(value: DateTime<Utc>) -> Self {
        QueryValue::Date(value)
    }
}

impl<T: Into<QueryScalar>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        QueryValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<HttpQuery> for QueryValue {
    fn from(value: HttpQuery) -> Self {
        QueryValue::Object(value)
    }
}

/// An insertion-ordered set of query parameters.
///
/// Inserting an existing key replaces its value in place, so the key keeps its
/// original position in the serialized output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpQuery(Vec<(String, QueryValue)>);

impl HttpQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
        self
    }

    /// Builder form of [`HttpQuery::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts the parameter only when a value is present.
    pub fn insert_opt<V: Into<QueryValue>>(
        &mut self,
        key: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    #[allow(missing_docs)]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for HttpQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = HttpQuery::new();
        for (key, value) in iter {
            query.insert(key, value);
        }
        query
    }
}

/// Serializes query parameters into a URL-encoded query string, without the leading `?`.
///
/// Nested objects are flattened into `prefix[key]` form. Parameters that produce no
/// output, such as empty nested objects, are skipped.
pub fn querystring(params: &HttpQuery, prefix: &str) -> String {
    params
        .iter()
        .map(|(key, value)| querystring_single_key(key, value, prefix))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("&")
}

fn querystring_single_key(key: &str, value: &QueryValue, key_prefix: &str) -> String {
    let full_key = if key_prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{key_prefix}[{key}]")
    };

    match value {
        QueryValue::Array(values) | QueryValue::Set(values) => {
            let encoded_key = urlencode(&full_key);
            let multi_value = values
                .iter()
                .map(|v| urlencode(v.to_string()))
                .collect::<Vec<_>>()
                .join(&format!("&{encoded_key}="));
            format!("{encoded_key}={multi_value}")
        }
        QueryValue::Date(date) => format!(
            "{}={}",
            urlencode(&full_key),
            urlencode(date.to_rfc3339_opts(SecondsFormat::Millis, true))
        ),
        QueryValue::Object(nested) => querystring(nested, &full_key),
        QueryValue::Scalar(scalar) => {
            format!("{}={}", urlencode(&full_key), urlencode(scalar.to_string()))
        }
    }
}

/// Separators used when a list parameter is sent as a single joined value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionFormat {
    /// Comma separated.
    Csv,
    /// Space separated.
    Ssv,
    /// Tab separated.
    Tsv,
    /// Pipe separated.
    Pipes,
}

impl CollectionFormat {
    #[allow(missing_docs)]
    pub fn separator(self) -> &'static str {
        match self {
            CollectionFormat::Csv => ",",
            CollectionFormat::Ssv => " ",
            CollectionFormat::Tsv => "\t",
            CollectionFormat::Pipes => "|",
        }
    }

    /// Joins the values with this format's separator.
    pub fn join<T: AsRef<str>>(self, values: &[T]) -> String {
        values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(self.separator())
    }
}

//! Cell values and their hashable identity.

use std::fmt;

use chrono::NaiveDateTime;

use super::column::StorageClass;

/// Display format for temporal values.
pub(crate) const TEMPORAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single cell of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The missing-value marker.
    Missing,
    Text(String),
    Integer(i64),
    Float(f64),
    Temporal(NaiveDateTime),
    Boolean(bool),
}

impl Value {
    /// Returns true for the missing-value marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Storage class this value belongs to, or `None` for missing.
    pub fn storage_class(&self) -> Option<StorageClass> {
        match self {
            Value::Missing => None,
            Value::Text(_) => Some(StorageClass::Text),
            Value::Integer(_) => Some(StorageClass::Integer),
            Value::Float(_) => Some(StorageClass::Float),
            Value::Temporal(_) => Some(StorageClass::Temporal),
            Value::Boolean(_) => Some(StorageClass::Boolean),
        }
    }

    /// Numeric view of integer and float values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Text view of text values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Hashable identity used for distinct-value and value-count operations.
    pub(crate) fn key(&self) -> ValueKey<'_> {
        match self {
            Value::Missing => ValueKey::Missing,
            Value::Text(s) => ValueKey::Text(s),
            Value::Integer(i) => ValueKey::Integer(*i),
            // -0.0 and 0.0 compare equal, so they share a key.
            Value::Float(f) if *f == 0.0 => ValueKey::Float(0.0f64.to_bits()),
            Value::Float(f) => ValueKey::Float(f.to_bits()),
            Value::Temporal(t) => ValueKey::Temporal(*t),
            Value::Boolean(b) => ValueKey::Boolean(*b),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => Ok(()),
            Value::Text(s) => write!(f, "{}", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Temporal(t) => write!(f, "{}", t.format(TEMPORAL_FORMAT)),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        if f.is_nan() { Value::Missing } else { Value::Float(f) }
    }
}

impl From<NaiveDateTime> for Value {
    fn from(t: NaiveDateTime) -> Self {
        Value::Temporal(t)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Missing, Into::into)
    }
}

/// Borrowed, hashable identity of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey<'a> {
    Missing,
    Text(&'a str),
    Integer(i64),
    Float(u64),
    Temporal(NaiveDateTime),
    Boolean(bool),
}

//! Core type definitions for the observed data dictionary.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};

use crate::data::{TEMPORAL_FORMAT, Value};
use crate::format::{float_literal, text_literal};

/// Semantic data type observed for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    /// Native timestamps, or text that is entirely one of the recognized date patterns.
    DateTime,
    /// Whole numbers with high cardinality.
    ///
    /// The classifier never produces this tag; integral columns above the
    /// cardinality threshold fall through to [`SemanticType::String`].
    Integer,
    /// Numbers with at least one non-integral value.
    Decimal,
    /// Whole numbers with few distinct values.
    NumberList,
    /// Text with few distinct values.
    StringList,
    /// Anything else.
    String,
}

impl SemanticType {
    /// Returns true for types that carry permissible values and lookup rows.
    pub fn is_list(&self) -> bool {
        matches!(self, SemanticType::NumberList | SemanticType::StringList)
    }

    /// Returns true for types that carry a numeric distribution summary.
    pub fn is_numeric(&self) -> bool {
        matches!(self, SemanticType::Integer | SemanticType::Decimal)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::DateTime => "DateTime",
            SemanticType::Integer => "Integer",
            SemanticType::Decimal => "Decimal",
            SemanticType::NumberList => "NumberList",
            SemanticType::StringList => "StringList",
            SemanticType::String => "String",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value as it appears in the dictionary output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObservedValue {
    Integer(i64),
    /// A whole number beyond the `i64` range, kept as its float value.
    WideInteger(#[serde(serialize_with = "serialize_wide_integer")] f64),
    Float(f64),
    Temporal(NaiveDateTime),
    Text(String),
}

impl ObservedValue {
    /// Convert a non-missing cell; `None` for the missing marker.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Missing => None,
            Value::Text(s) => Some(ObservedValue::Text(s.clone())),
            Value::Integer(i) => Some(ObservedValue::Integer(*i)),
            Value::Float(f) => Some(ObservedValue::Float(*f)),
            Value::Temporal(t) => Some(ObservedValue::Temporal(*t)),
            Value::Boolean(b) => Some(ObservedValue::Text(b.to_string())),
        }
    }

    /// Convert a cell, truncating numbers to integers.
    ///
    /// Whole floats outside the `i64` range become [`ObservedValue::WideInteger`];
    /// non-finite floats stay floats.
    pub fn integral_from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(ObservedValue::Integer(*i)),
            Value::Float(f) if f.is_finite() => Some(Self::whole_number(f.trunc())),
            other => Self::from_value(other),
        }
    }

    fn whole_number(value: f64) -> Self {
        match format!("{:.0}", value).parse::<i64>() {
            Ok(i) => ObservedValue::Integer(i),
            Err(_) => ObservedValue::WideInteger(value),
        }
    }

    /// Numeric order of integral values. Wide integers lie strictly outside
    /// the `i64` range, so their sign alone orders them against `Integer`.
    pub(crate) fn integral_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (ObservedValue::Integer(a), ObservedValue::Integer(b)) => a.cmp(b),
            (ObservedValue::WideInteger(a), ObservedValue::WideInteger(b)) => a.total_cmp(b),
            (ObservedValue::Integer(_), ObservedValue::WideInteger(w)) => {
                if *w > 0.0 { Ordering::Less } else { Ordering::Greater }
            }
            (ObservedValue::WideInteger(w), ObservedValue::Integer(_)) => {
                if *w > 0.0 { Ordering::Greater } else { Ordering::Less }
            }
            _ => Ordering::Equal,
        }
    }

    /// Rendering used inside literal-looking list strings.
    pub fn literal(&self) -> String {
        match self {
            ObservedValue::Integer(i) => i.to_string(),
            ObservedValue::WideInteger(w) => format!("{:.0}", w),
            ObservedValue::Float(f) => float_literal(*f),
            ObservedValue::Temporal(t) => text_literal(&t.format(TEMPORAL_FORMAT).to_string()),
            ObservedValue::Text(s) => text_literal(s),
        }
    }
}

impl fmt::Display for ObservedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObservedValue::Integer(i) => write!(f, "{}", i),
            ObservedValue::WideInteger(w) => write!(f, "{:.0}", w),
            ObservedValue::Float(v) => f.write_str(&float_literal(*v)),
            ObservedValue::Temporal(t) => write!(f, "{}", t.format(TEMPORAL_FORMAT)),
            ObservedValue::Text(s) => f.write_str(s),
        }
    }
}

/// JSON integer when it fits `i128`, float beyond that.
fn serialize_wide_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match format!("{:.0}", value).parse::<i128>() {
        Ok(i) => serializer.serialize_i128(i),
        Err(_) => serializer.serialize_f64(*value),
    }
}

/// Render values as a literal list: `[1, 2, 3]` or `['a', 'b']`.
pub(crate) fn literal_list<'a>(values: impl IntoIterator<Item = &'a ObservedValue>) -> String {
    let items: Vec<String> = values.into_iter().map(ObservedValue::literal).collect();
    format!("[{}]", items.join(", "))
}

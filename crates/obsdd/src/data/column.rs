//! Column storage and the capabilities the engine consumes.

use std::fmt;

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::{Value, ValueKey};
use crate::error::{ObsddError, Result};

/// Declared storage class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageClass {
    /// Free text.
    Text,
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// Dates and timestamps.
    Temporal,
    /// True/false values. Representable, but rejected by the classifier.
    Boolean,
}

impl StorageClass {
    /// Returns true if this class holds numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(self, StorageClass::Integer | StorageClass::Float)
    }

    /// Returns true if this class holds text.
    pub fn is_textual(&self) -> bool {
        matches!(self, StorageClass::Text)
    }

    /// Returns true if this class holds dates or timestamps.
    pub fn is_temporal(&self) -> bool {
        matches!(self, StorageClass::Temporal)
    }

    /// Returns true if the type classifier accepts this class.
    pub fn is_supported(&self) -> bool {
        self.is_numeric() || self.is_textual() || self.is_temporal()
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageClass::Text => write!(f, "text"),
            StorageClass::Integer => write!(f, "integer"),
            StorageClass::Float => write!(f, "float"),
            StorageClass::Temporal => write!(f, "temporal"),
            StorageClass::Boolean => write!(f, "boolean"),
        }
    }
}

/// A named, homogeneous sequence of values.
///
/// Every non-missing value matches the declared [`StorageClass`]; the
/// constructors enforce this, so the engine never has to re-check it.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    storage: StorageClass,
    values: Vec<Value>,
}

impl Column {
    /// Create a column, checking every value against the storage class.
    ///
    /// `Float(NaN)` is normalized to the missing marker.
    pub fn new(name: impl Into<String>, storage: StorageClass, values: Vec<Value>) -> Result<Self> {
        let name = name.into();
        let mut values = values;

        for (row, value) in values.iter_mut().enumerate() {
            if let Value::Float(f) = value {
                if f.is_nan() {
                    *value = Value::Missing;
                    continue;
                }
            }
            if let Some(found) = value.storage_class() {
                if found != storage {
                    return Err(ObsddError::StorageMismatch {
                        column: name,
                        row,
                        expected: storage,
                        found,
                    });
                }
            }
        }

        Ok(Self {
            name,
            storage,
            values,
        })
    }

    /// Text column; `None` marks a missing value.
    pub fn text<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        Self::from_typed(name, StorageClass::Text, values, |s| Value::Text(s.into()))
    }

    /// Integer column; `None` marks a missing value.
    pub fn integer(name: impl Into<String>, values: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self::from_typed(name, StorageClass::Integer, values, Value::Integer)
    }

    /// Float column; `None` and NaN mark missing values.
    pub fn float(name: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self::from_typed(name, StorageClass::Float, values, Value::from)
    }

    /// Temporal column; `None` marks a missing value.
    pub fn temporal(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<NaiveDateTime>>,
    ) -> Self {
        Self::from_typed(name, StorageClass::Temporal, values, Value::Temporal)
    }

    /// Boolean column; `None` marks a missing value.
    pub fn boolean(name: impl Into<String>, values: impl IntoIterator<Item = Option<bool>>) -> Self {
        Self::from_typed(name, StorageClass::Boolean, values, Value::Boolean)
    }

    fn from_typed<T>(
        name: impl Into<String>,
        storage: StorageClass,
        values: impl IntoIterator<Item = Option<T>>,
        wrap: impl Fn(T) -> Value,
    ) -> Self {
        Self {
            name: name.into(),
            storage,
            values: values
                .into_iter()
                .map(|v| v.map_or(Value::Missing, &wrap))
                .collect(),
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared storage class.
    pub fn storage_class(&self) -> StorageClass {
        self.storage
    }

    /// All values, missing markers included.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Total number of rows.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Non-missing values in row order.
    pub fn observed(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_missing())
    }

    /// Number of non-missing values.
    pub fn observed_count(&self) -> usize {
        self.observed().count()
    }

    /// Number of missing values.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Distinct values in first-appearance order.
    ///
    /// The missing marker is included once when present.
    pub fn distinct(&self) -> Vec<&Value> {
        let mut seen: IndexMap<ValueKey<'_>, &Value> = IndexMap::new();
        for value in &self.values {
            seen.entry(value.key()).or_insert(value);
        }
        seen.into_values().collect()
    }

    /// Number of distinct values, the missing marker counted once when present.
    pub fn distinct_count(&self) -> usize {
        self.distinct().len()
    }

    /// Distinct non-missing values in first-appearance order.
    pub fn observed_distinct(&self) -> Vec<&Value> {
        self.distinct().into_iter().filter(|v| !v.is_missing()).collect()
    }

    /// Occurrence counts of non-missing values.
    ///
    /// Sorted by count descending; ties keep first-appearance order.
    pub fn value_counts(&self) -> Vec<(&Value, usize)> {
        let mut counts: IndexMap<ValueKey<'_>, (&Value, usize)> = IndexMap::new();
        for value in self.observed() {
            counts.entry(value.key()).or_insert((value, 0)).1 += 1;
        }
        let mut counts: Vec<(&Value, usize)> = counts.into_values().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// Non-missing values as `f64`. Empty for non-numeric columns.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.observed().filter_map(Value::as_f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_mismatched_values() {
        let err = Column::new(
            "x",
            StorageClass::Integer,
            vec![Value::Integer(1), Value::Text("a".into())],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ObsddError::StorageMismatch { row: 1, found: StorageClass::Text, .. }
        ));
    }

    #[test]
    fn test_new_normalizes_nan() {
        let col = Column::new(
            "x",
            StorageClass::Float,
            vec![Value::Float(1.0), Value::Float(f64::NAN)],
        )
        .unwrap();

        assert_eq!(col.missing_count(), 1);
        assert_eq!(col.observed_count(), 1);
    }

    #[test]
    fn test_distinct_counts_missing_once() {
        let col = Column::text("x", vec![Some("a"), None, Some("b"), None, Some("a")]);

        assert_eq!(col.distinct_count(), 3);
        let observed: Vec<String> = col.observed_distinct().iter().map(|v| v.to_string()).collect();
        assert_eq!(observed, vec!["a", "b"]);
    }

    #[test]
    fn test_value_counts_order() {
        let col = Column::text(
            "x",
            vec![Some("b"), Some("a"), Some("a"), Some("c"), Some("b"), None, Some("a")],
        );
        let counts: Vec<(String, usize)> = col
            .value_counts()
            .into_iter()
            .map(|(v, c)| (v.to_string(), c))
            .collect();

        assert_eq!(
            counts,
            vec![("a".to_string(), 3), ("b".to_string(), 2), ("c".to_string(), 1)]
        );
    }

    #[test]
    fn test_numeric_values_skip_missing() {
        let col = Column::integer("x", vec![Some(1), None, Some(3)]);
        assert_eq!(col.numeric_values(), vec![1.0, 3.0]);
        assert!(Column::text("t", vec![Some("1")]).numeric_values().is_empty());
    }
}

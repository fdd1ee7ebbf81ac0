//! Ordered heuristic assignment of a semantic type to each column.

use serde::{Deserialize, Serialize};

use super::patterns::appears_to_be_date;
use crate::data::{Column, Value};
use crate::error::{ObsddError, Result};
use crate::model::SemanticType;

/// Default inclusive upper bound on distinct values for list types.
pub const DEFAULT_LOW_CARDINALITY_THRESHOLD: usize = 15;

/// Configuration for type classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Maximum distinct values (missing marker included) for
    /// `NumberList`/`StringList`. Inclusive.
    pub low_cardinality_threshold: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            low_cardinality_threshold: DEFAULT_LOW_CARDINALITY_THRESHOLD,
        }
    }
}

/// Assigns exactly one [`SemanticType`] to a column.
///
/// Rules are evaluated in a fixed order and the first match wins:
///
/// 1. temporal storage → `DateTime`
/// 2. text storage, entirely one date pattern → `DateTime`
/// 3. numeric storage, all integral, low cardinality → `NumberList`
/// 4. numeric storage, not all integral → `Decimal`
/// 5. text storage, low cardinality → `StringList`
/// 6. otherwise → `String`
///
/// Integral columns above the threshold therefore land on `String`, and
/// `Integer` is never produced.
#[derive(Debug, Clone, Default)]
pub struct TypeClassifier {
    config: ClassifierConfig,
}

impl TypeClassifier {
    /// Create a classifier with the default threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom configuration.
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a column.
    ///
    /// Fails with [`ObsddError::UnsupportedColumnType`] when the storage
    /// class is not text, integer, float or temporal.
    pub fn classify(&self, column: &Column) -> Result<SemanticType> {
        let storage = column.storage_class();
        if !storage.is_supported() {
            return Err(ObsddError::UnsupportedColumnType {
                column: column.name().to_string(),
                storage,
            });
        }

        let semantic_type = if storage.is_temporal() {
            SemanticType::DateTime
        } else if storage.is_textual() && appears_to_be_date(column) {
            SemanticType::DateTime
        } else if storage.is_numeric()
            && every_value_is_integral(column)
            && self.has_low_cardinality(column)
        {
            SemanticType::NumberList
        } else if storage.is_numeric() && !every_value_is_integral(column) {
            SemanticType::Decimal
        } else if storage.is_textual() && self.has_low_cardinality(column) {
            SemanticType::StringList
        } else {
            SemanticType::String
        };

        Ok(semantic_type)
    }

    /// Distinct-value count, missing marker included, within the threshold.
    fn has_low_cardinality(&self, column: &Column) -> bool {
        column.distinct_count() <= self.config.low_cardinality_threshold
    }
}

/// True iff every observed value of a numeric column equals its truncation.
///
/// Vacuously true for a column without observed values; false for
/// non-numeric columns and for non-finite floats.
pub fn every_value_is_integral(column: &Column) -> bool {
    if !column.storage_class().is_numeric() {
        return false;
    }
    all_integral(column.observed())
}

/// True iff every value is an integer or a finite float without a fraction.
pub(crate) fn all_integral<'a>(mut values: impl Iterator<Item = &'a Value>) -> bool {
    values.all(|value| match value {
        Value::Integer(_) => true,
        Value::Float(f) => f.is_finite() && f.trunc() == *f,
        _ => false,
    })
}

//! Per-column summary records and lookup rows.

use serde::{Deserialize, Serialize};

use super::types::{ObservedValue, SemanticType};

/// Distribution summary for numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericStatistics {
    pub max: f64,
    pub min: f64,
    /// Rounded to 2 decimals.
    pub mean: f64,
    /// Rounded to 2 decimals.
    pub median: f64,
    /// Density-based outliers in original units, rounded to 4 decimals, ascending.
    pub potential_anomalies: Vec<f64>,
    pub percentile_5: f64,
    pub percentile_10: f64,
    pub percentile_25: f64,
    pub percentile_50: f64,
    pub percentile_75: f64,
    pub percentile_90: f64,
    pub percentile_95: f64,
}

/// Permissible values for low-cardinality columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListStatistics {
    /// Distinct observed values.
    pub permissible_values: Vec<ObservedValue>,
    /// Share of each value, rendered as `[{'value': v, 'pct': 'p%'}, ...]`.
    pub pv_pcts: String,
}

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub var_name: String,
    pub number_of_observed_values: usize,
    pub number_of_distinct_values: usize,
    /// `"<count> (<pct>%)"`.
    pub string_of_missing_stats: String,
    pub observed_data_type: SemanticType,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListStatistics>,
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericStatistics>,
}

/// One row of the lookup table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRow {
    pub var_name: String,
    pub var_value: ObservedValue,
    pub value_count: usize,
    /// Share of all rows, missing included.
    pub val_pct_keep_missing_in_total: String,
    /// Share of non-missing rows.
    pub val_pct_drop_missing_in_total: String,
}

/// A column left out of the dictionary under the skip-and-report policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedColumn {
    pub var_name: String,
    pub reason: String,
}

//! The two output tables and their CSV/JSON export.

use std::io;

use serde::{Deserialize, Serialize};

use super::record::{LookupRow, NumericStatistics, SkippedColumn, SummaryRecord};
use super::types::{ObservedValue, literal_list};
use crate::error::Result;
use crate::format::float_literal;

/// Summary table columns: the union of every field a record can carry.
pub const SUMMARY_COLUMNS: [&str; 19] = [
    "var_name",
    "number_of_observed_values",
    "number_of_distinct_values",
    "string_of_missing_stats",
    "observed_data_type",
    "permissible_values",
    "pv_pcts",
    "max",
    "min",
    "mean",
    "median",
    "potential_anomalies",
    "percentile_5",
    "percentile_10",
    "percentile_25",
    "percentile_50",
    "percentile_75",
    "percentile_90",
    "percentile_95",
];

/// Lookup table columns.
pub const LOOKUP_COLUMNS: [&str; 5] = [
    "var_name",
    "var_value",
    "value_count",
    "val_pct_keep_missing_in_total",
    "val_pct_drop_missing_in_total",
];

/// An observed data dictionary: one summary record per column plus the
/// lookup rows of every low-cardinality column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservedDataDictionary {
    /// One record per column, in dataset order.
    pub summary: Vec<SummaryRecord>,
    /// Lookup rows, grouped by column in dataset order.
    pub lookup: Vec<LookupRow>,
    /// Columns skipped under [`ErrorPolicy::SkipAndReport`](crate::ErrorPolicy).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedColumn>,
}

impl ObservedDataDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the summary record of a column.
    pub fn summary_for(&self, var_name: &str) -> Option<&SummaryRecord> {
        self.summary.iter().find(|r| r.var_name == var_name)
    }

    /// Lookup rows of a column, in table order.
    pub fn lookup_for<'a>(&'a self, var_name: &'a str) -> impl Iterator<Item = &'a LookupRow> {
        self.lookup.iter().filter(move |r| r.var_name == var_name)
    }

    /// Write the summary table as CSV. Fields a column's type does not
    /// produce are left empty.
    pub fn write_summary_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(SUMMARY_COLUMNS)?;
        for record in &self.summary {
            writer.write_record(summary_row(record))?;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Write the lookup table as CSV. The header is written even when
    /// there are no rows.
    pub fn write_lookup_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(LOOKUP_COLUMNS)?;
        for row in &self.lookup {
            writer.write_record([
                row.var_name.clone(),
                row.var_value.to_string(),
                row.value_count.to_string(),
                row.val_pct_keep_missing_in_total.clone(),
                row.val_pct_drop_missing_in_total.clone(),
            ])?;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Serialize the whole dictionary as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn summary_row(record: &SummaryRecord) -> Vec<String> {
    let mut row = vec![
        record.var_name.clone(),
        record.number_of_observed_values.to_string(),
        record.number_of_distinct_values.to_string(),
        record.string_of_missing_stats.clone(),
        record.observed_data_type.to_string(),
    ];

    match &record.list {
        Some(list) => {
            row.push(literal_list(&list.permissible_values));
            row.push(list.pv_pcts.clone());
        }
        None => row.extend([String::new(), String::new()]),
    }

    match &record.numeric {
        Some(numeric) => row.extend(numeric_cells(numeric)),
        None => row.extend(std::iter::repeat_n(String::new(), 12)),
    }

    row
}

fn numeric_cells(stats: &NumericStatistics) -> Vec<String> {
    let anomalies: Vec<ObservedValue> = stats
        .potential_anomalies
        .iter()
        .map(|&v| ObservedValue::Float(v))
        .collect();

    let mut cells = vec![
        float_literal(stats.max),
        float_literal(stats.min),
        float_literal(stats.mean),
        float_literal(stats.median),
        literal_list(&anomalies),
    ];
    cells.extend(
        [
            stats.percentile_5,
            stats.percentile_10,
            stats.percentile_25,
            stats.percentile_50,
            stats.percentile_75,
            stats.percentile_90,
            stats.percentile_95,
        ]
        .into_iter()
        .map(float_literal),
    );
    cells
}

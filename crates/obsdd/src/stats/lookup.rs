//! Per-value lookup rows for low-cardinality columns.

use crate::data::Column;
use crate::error::{ObsddError, Result};
use crate::format::percentage;
use crate::inference::all_integral;
use crate::model::{LookupRow, ObservedValue};

/// Build one lookup row per distinct observed value, in value-count order.
///
/// Missing values get no row. `var_value` is an integer when the column is
/// numeric and every distinct value is integral. Fails with
/// [`ObsddError::EmptyColumn`] for a column without rows.
pub fn lookup_rows(column: &Column) -> Result<Vec<LookupRow>> {
    let total = column.len();
    if total == 0 {
        return Err(ObsddError::EmptyColumn {
            column: column.name().to_string(),
        });
    }
    let observed = column.observed_count();

    let counts = column.value_counts();
    let integral = column.storage_class().is_numeric() && all_integral(counts.iter().map(|(v, _)| *v));

    let rows = counts
        .into_iter()
        .filter_map(|(value, count)| {
            let var_value = if integral {
                ObservedValue::integral_from_value(value)
            } else {
                ObservedValue::from_value(value)
            }?;
            Some(LookupRow {
                var_name: column.name().to_string(),
                var_value,
                value_count: count,
                val_pct_keep_missing_in_total: percentage(count, total),
                val_pct_drop_missing_in_total: percentage(count, observed),
            })
        })
        .collect();

    Ok(rows)
}

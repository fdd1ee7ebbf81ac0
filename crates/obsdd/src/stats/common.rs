//! Type-independent column statistics.

use crate::data::Column;
use crate::error::{ObsddError, Result};
use crate::format::percentage;

/// Counts every column gets regardless of its semantic type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommonStatistics {
    /// Non-missing values.
    pub number_of_observed_values: usize,
    /// Distinct values, the missing marker counted once when present.
    pub number_of_distinct_values: usize,
    /// Missing values.
    pub missing_count: usize,
    /// `"<missing> (<pct>%)"` relative to all rows.
    pub string_of_missing_stats: String,
}

/// Compute common statistics.
///
/// Fails with [`ObsddError::EmptyColumn`] when the column has no rows,
/// since the missing percentage would be undefined.
pub fn common_statistics(column: &Column) -> Result<CommonStatistics> {
    let total = column.len();
    if total == 0 {
        return Err(ObsddError::EmptyColumn {
            column: column.name().to_string(),
        });
    }

    let missing_count = column.missing_count();

    Ok(CommonStatistics {
        number_of_observed_values: total - missing_count,
        number_of_distinct_values: column.distinct_count(),
        missing_count,
        string_of_missing_stats: format!("{} ({})", missing_count, percentage(missing_count, total)),
    })
}

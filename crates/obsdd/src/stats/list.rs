//! Permissible values and their shares for low-cardinality columns.

use crate::data::{Column, Value};
use crate::format::{percentage, text_literal};
use crate::model::{ListStatistics, ObservedValue, SemanticType};

/// Compute permissible values and `pv_pcts` for a `NumberList` or
/// `StringList` column.
///
/// `NumberList` values are cast to integers and sorted ascending; other
/// values keep first-appearance order.
pub fn list_statistics(column: &Column, semantic_type: SemanticType) -> ListStatistics {
    ListStatistics {
        permissible_values: permissible_values(column, semantic_type),
        pv_pcts: pv_pcts(column, semantic_type),
    }
}

/// Distinct observed values.
pub fn permissible_values(column: &Column, semantic_type: SemanticType) -> Vec<ObservedValue> {
    let distinct = column.observed_distinct();

    if semantic_type == SemanticType::NumberList {
        let mut integers: Vec<ObservedValue> = distinct
            .into_iter()
            .filter_map(ObservedValue::integral_from_value)
            .collect();
        integers.sort_by(ObservedValue::integral_cmp);
        return integers;
    }

    distinct.into_iter().filter_map(ObservedValue::from_value).collect()
}

/// Share of each observed value among observed values, in value-count order,
/// rendered as `[{'value': v, 'pct': 'p%'}, ...]`.
pub fn pv_pcts(column: &Column, semantic_type: SemanticType) -> String {
    let observed = column.observed_count();
    let convert: fn(&Value) -> Option<ObservedValue> = if semantic_type == SemanticType::NumberList {
        ObservedValue::integral_from_value
    } else {
        ObservedValue::from_value
    };

    let records: Vec<String> = column
        .value_counts()
        .into_iter()
        .filter_map(|(value, count)| {
            let value = convert(value)?;
            Some(format!(
                "{{'value': {}, 'pct': {}}}",
                value.literal(),
                text_literal(&percentage(count, observed))
            ))
        })
        .collect();

    format!("[{}]", records.join(", "))
}

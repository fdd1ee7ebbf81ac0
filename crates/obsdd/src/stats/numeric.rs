//! Distribution summary for numeric columns.

use super::anomaly::{AnomalyConfig, potential_anomalies};
use crate::data::Column;
use crate::error::{ObsddError, Result};
use crate::format::round_to;
use crate::model::NumericStatistics;

/// Quantile of sorted values with linear interpolation between order
/// statistics at position `q * (n - 1)`.
///
/// Callers guarantee `sorted` is non-empty and ascending.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
    }
}

/// Compute the distribution summary and potential anomalies of a numeric column.
///
/// Fails with [`ObsddError::InsufficientData`] when the column has no
/// observed numeric values.
pub fn numeric_statistics(column: &Column, anomaly: &AnomalyConfig) -> Result<NumericStatistics> {
    let values = column.numeric_values();
    if values.is_empty() {
        return Err(ObsddError::InsufficientData {
            column: column.name().to_string(),
        });
    }

    let mut sorted = values.clone();
    sorted.sort_by(f64::total_cmp);

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let pct = |q: f64| round_to(quantile(&sorted, q), 2);

    Ok(NumericStatistics {
        max: sorted[sorted.len() - 1],
        min: sorted[0],
        mean: round_to(mean, 2),
        median: pct(0.5),
        potential_anomalies: potential_anomalies(&values, anomaly),
        percentile_5: pct(0.05),
        percentile_10: pct(0.10),
        percentile_25: pct(0.25),
        percentile_50: pct(0.50),
        percentile_75: pct(0.75),
        percentile_90: pct(0.90),
        percentile_95: pct(0.95),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), 1.0);
        assert_eq!(quantile(&sorted, 0.5), 2.5);
        assert_eq!(quantile(&sorted, 1.0), 4.0);
        assert!((quantile(&sorted, 0.25) - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(quantile(&[7.0], 0.95), 7.0);
    }

    #[test]
    fn test_summary_of_decimal_column() {
        let col = Column::float("w", vec![Some(1.5), None, Some(2.5), Some(4.0), Some(3.0)]);
        let stats = numeric_statistics(&col, &AnomalyConfig::default()).unwrap();

        assert_eq!(stats.max, 4.0);
        assert_eq!(stats.min, 1.5);
        assert_eq!(stats.mean, 2.75);
        assert_eq!(stats.median, 2.75);
        assert_eq!(stats.percentile_50, stats.median);
        assert_eq!(stats.percentile_25, 2.25);
        assert_eq!(stats.percentile_75, 3.25);
        // Four values cannot form a cluster of ten.
        assert_eq!(stats.potential_anomalies, vec![1.5, 2.5, 3.0, 4.0]);
    }

    #[test]
    fn test_percentiles_rounded() {
        let col = Column::float("x", (1..=3).map(|i| Some(i as f64 / 3.0)));
        let stats = numeric_statistics(&col, &AnomalyConfig::default()).unwrap();

        assert_eq!(stats.mean, 0.67);
        assert_eq!(stats.percentile_5, 0.37);
    }

    #[test]
    fn test_ties_round_to_even() {
        let col = Column::float("x", vec![Some(0.0), Some(0.25)]);
        let stats = numeric_statistics(&col, &AnomalyConfig::default()).unwrap();

        assert_eq!(stats.mean, 0.12);
        assert_eq!(stats.median, 0.12);
        assert_eq!(stats.percentile_75, 0.19);
    }

    #[test]
    fn test_all_missing_is_insufficient() {
        let col = Column::float("x", vec![None, None]);
        let err = numeric_statistics(&col, &AnomalyConfig::default()).unwrap_err();
        assert!(matches!(err, ObsddError::InsufficientData { .. }));
    }
}

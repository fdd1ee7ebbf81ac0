//! Density-based anomaly detection for numeric columns.
//!
//! Values are standardized to zero mean and unit variance, then clustered
//! with DBSCAN (Ester, Kriegel, Sander, Xu 1996). Points that end up in no
//! cluster are noise, and noise is what gets reported.
//!
//! The data are one-dimensional, so neighborhoods are contiguous runs of the
//! sorted values. Neighbor counting is a two-pointer sweep and cluster
//! expansion reduces to joining consecutive core points closer than `eps`:
//! O(n log n) instead of the O(n²) distance matrix of the general algorithm.

use serde::{Deserialize, Serialize};

use crate::error::{ObsddError, Result};
use crate::format::round_to;

/// Default neighborhood radius in standardized units.
pub const DEFAULT_EPS: f64 = 0.8;

/// Default neighborhood size (point itself included) for a core point.
pub const DEFAULT_MIN_SAMPLES: usize = 10;

/// Configuration for DBSCAN anomaly detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Maximum distance between two neighbors.
    pub eps: f64,
    /// Minimum points in an `eps`-neighborhood, the point itself included,
    /// for the point to be a core point.
    pub min_samples: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

impl AnomalyConfig {
    /// Reject a non-positive or non-finite radius and a zero neighborhood size.
    pub fn validate(&self) -> Result<()> {
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(ObsddError::Config(format!(
                "eps must be a positive finite number, got {}",
                self.eps
            )));
        }
        if self.min_samples == 0 {
            return Err(ObsddError::Config("min_samples must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Result of DBSCAN clustering.
#[derive(Debug, Clone)]
pub struct DbscanResult {
    /// Cluster label per input point: `None` is noise.
    pub labels: Vec<Option<usize>>,
    /// Number of clusters discovered.
    pub n_clusters: usize,
    /// Whether each point is a core point.
    pub core_points: Vec<bool>,
}

impl DbscanResult {
    /// Indices of noise points, ascending.
    pub fn noise_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| label.is_none())
            .map(|(i, _)| i)
    }
}

/// Scale values to zero mean and unit population variance.
///
/// Mean and variance are taken over finite values; a zero-variance input is
/// only centered. Non-finite values pass through unchanged.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return values.to_vec();
    }

    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let scale = if variance > 0.0 { variance.sqrt() } else { 1.0 };

    values
        .iter()
        .map(|&v| if v.is_finite() { (v - mean) / scale } else { v })
        .collect()
}

/// Run DBSCAN over one-dimensional points.
///
/// Two points are neighbors when their distance is at most `eps`. Border
/// points join the cluster of their nearest core neighbor. Non-finite
/// points are always noise.
pub fn dbscan_1d(points: &[f64], config: &AnomalyConfig) -> DbscanResult {
    let n = points.len();
    let eps = config.eps;

    // Sorted positions of finite points
    let mut order: Vec<usize> = (0..n).filter(|&i| points[i].is_finite()).collect();
    order.sort_by(|&a, &b| points[a].total_cmp(&points[b]));
    let xs: Vec<f64> = order.iter().map(|&i| points[i]).collect();
    let m = xs.len();

    // Neighborhood sizes via two-pointer sweep
    let mut is_core = vec![false; m];
    let (mut lo, mut hi) = (0usize, 0usize);
    for i in 0..m {
        while xs[i] - xs[lo] > eps {
            lo += 1;
        }
        hi = hi.max(i);
        while hi + 1 < m && xs[hi + 1] - xs[i] <= eps {
            hi += 1;
        }
        is_core[i] = hi - lo + 1 >= config.min_samples;
    }

    // Consecutive core points within eps are density-connected
    let mut sorted_labels: Vec<Option<usize>> = vec![None; m];
    let mut n_clusters = 0;
    let mut last_core: Option<usize> = None;
    for i in (0..m).filter(|&i| is_core[i]) {
        let joins_previous = last_core.is_some_and(|p| xs[i] - xs[p] <= eps);
        if !joins_previous {
            n_clusters += 1;
        }
        sorted_labels[i] = Some(n_clusters - 1);
        last_core = Some(i);
    }

    // Border points attach to the nearest core neighbor
    let mut prev_core = vec![None; m];
    let mut seen = None;
    for i in 0..m {
        if is_core[i] {
            seen = Some(i);
        }
        prev_core[i] = seen;
    }
    let mut next_core = vec![None; m];
    seen = None;
    for i in (0..m).rev() {
        if is_core[i] {
            seen = Some(i);
        }
        next_core[i] = seen;
    }
    for i in (0..m).filter(|&i| !is_core[i]) {
        let left = prev_core[i].map(|p| (xs[i] - xs[p], p));
        let right = next_core[i].map(|q| (xs[q] - xs[i], q));
        let nearest = match (left, right) {
            (Some(l), Some(r)) => Some(if r.0 < l.0 { r } else { l }),
            (l, r) => l.or(r),
        };
        if let Some((distance, core)) = nearest {
            if distance <= eps {
                sorted_labels[i] = sorted_labels[core];
            }
        }
    }

    let mut labels = vec![None; n];
    let mut core_points = vec![false; n];
    for (pos, &original) in order.iter().enumerate() {
        labels[original] = sorted_labels[pos];
        core_points[original] = is_core[pos];
    }

    DbscanResult {
        labels,
        n_clusters,
        core_points,
    }
}

/// Values DBSCAN labels as noise after standardization.
///
/// Reported in original units, rounded to 4 decimals, ascending. Small
/// inputs are not special-cased: with fewer than `min_samples` values no
/// cluster can form and everything is reported.
pub fn potential_anomalies(values: &[f64], config: &AnomalyConfig) -> Vec<f64> {
    let standardized = standardize(values);
    let result = dbscan_1d(&standardized, config);

    let mut anomalies: Vec<f64> = result
        .noise_indices()
        .map(|i| round_to(values[i], 4))
        .collect();
    anomalies.sort_by(f64::total_cmp);
    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tight_cluster_with_outliers() -> Vec<f64> {
        let mut values: Vec<f64> = (0..100).map(|i| 50.0 + (i % 10) as f64 * 0.1).collect();
        values.push(500.0);
        values.push(-400.0);
        values
    }

    #[test]
    fn test_standardize_zero_mean_unit_variance() {
        let z = standardize(&[1.0, 2.0, 3.0, 4.0]);
        let mean: f64 = z.iter().sum::<f64>() / 4.0;
        let var: f64 = z.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 4.0;

        assert!(mean.abs() < 1e-12);
        assert!((var - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_standardize_constant_input_is_centered() {
        assert_eq!(standardize(&[5.0, 5.0, 5.0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_dbscan_two_clusters_and_noise() {
        let mut points: Vec<f64> = (0..5).map(|i| i as f64 * 0.1).collect();
        points.extend((0..5).map(|i| 10.0 + i as f64 * 0.1));
        points.push(50.0);
        let config = AnomalyConfig {
            eps: 0.5,
            min_samples: 3,
        };

        let result = dbscan_1d(&points, &config);

        assert_eq!(result.n_clusters, 2);
        assert_eq!(result.labels[0], result.labels[4]);
        assert_ne!(result.labels[0], result.labels[5]);
        assert_eq!(result.noise_indices().collect::<Vec<_>>(), vec![10]);
    }

    #[test]
    fn test_border_point_joins_cluster() {
        // 0.0..0.4 are core with min_samples 5; 0.85 is within eps of 0.4 only.
        let points = vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.85];
        let config = AnomalyConfig {
            eps: 0.5,
            min_samples: 5,
        };

        let result = dbscan_1d(&points, &config);

        assert!(!result.core_points[5]);
        assert_eq!(result.labels[5], Some(0));
        assert_eq!(result.noise_indices().count(), 0);
    }

    #[test]
    fn test_far_outliers_are_the_only_anomalies() {
        let anomalies = potential_anomalies(&tight_cluster_with_outliers(), &AnomalyConfig::default());
        assert_eq!(anomalies, vec![-400.0, 500.0]);
    }

    #[test]
    fn test_small_input_is_all_noise() {
        let values = vec![1.5, 2.5, 3.5];
        assert_eq!(
            potential_anomalies(&values, &AnomalyConfig::default()),
            vec![1.5, 2.5, 3.5]
        );
    }

    #[test]
    fn test_anomalies_rounded_to_four_places() {
        let mut values = vec![0.0; 20];
        values.push(1234.567891);
        assert_eq!(
            potential_anomalies(&values, &AnomalyConfig::default()),
            vec![1234.5679]
        );
    }

    #[test]
    fn test_non_finite_values_are_noise() {
        let mut values = vec![1.0; 12];
        values.push(f64::INFINITY);
        let anomalies = potential_anomalies(&values, &AnomalyConfig::default());
        assert_eq!(anomalies.len(), 1);
        assert!(anomalies[0].is_infinite());
    }

    #[test]
    fn test_config_validation() {
        assert!(AnomalyConfig::default().validate().is_ok());
        assert!(AnomalyConfig { eps: 0.0, min_samples: 10 }.validate().is_err());
        assert!(AnomalyConfig { eps: f64::NAN, min_samples: 10 }.validate().is_err());
        assert!(AnomalyConfig { eps: 0.8, min_samples: 0 }.validate().is_err());
    }
}

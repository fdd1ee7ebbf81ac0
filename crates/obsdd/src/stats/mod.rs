//! Per-type statistics calculators.

pub mod anomaly;
mod common;
mod list;
mod lookup;
mod numeric;

pub use anomaly::{AnomalyConfig, DEFAULT_EPS, DEFAULT_MIN_SAMPLES, potential_anomalies};
pub use common::{CommonStatistics, common_statistics};
pub use list::{list_statistics, permissible_values, pv_pcts};
pub use lookup::lookup_rows;
pub use numeric::{numeric_statistics, quantile};

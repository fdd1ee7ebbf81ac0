//! In-memory tabular data: values, columns and datasets.

mod column;
mod dataset;
mod value;

pub use column::{Column, StorageClass};
pub use dataset::Dataset;
pub use value::Value;
pub(crate) use value::TEMPORAL_FORMAT;

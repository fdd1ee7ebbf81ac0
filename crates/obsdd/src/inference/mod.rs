//! Type inference: date-pattern recognition and semantic classification.

mod classifier;
pub mod patterns;

pub use classifier::{
    ClassifierConfig, DEFAULT_LOW_CARDINALITY_THRESHOLD, TypeClassifier, every_value_is_integral,
};
pub(crate) use classifier::all_integral;

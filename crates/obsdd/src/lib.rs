//! obsdd: observed data dictionaries for tabular datasets.
//!
//! Given a dataset of named, typed columns, obsdd describes what is actually
//! in the data: a summary table with one record per column and a lookup
//! table with one row per distinct value of each low-cardinality column.
//!
//! Each column is assigned one semantic type by ordered heuristics
//! (`DateTime`, `NumberList`, `Decimal`, `StringList` or `String`). List
//! types get permissible values and value shares, decimal columns get a
//! distribution summary with density-based anomaly flags.
//!
//! # Example
//!
//! ```no_run
//! use obsdd::DictionaryBuilder;
//!
//! let builder = DictionaryBuilder::new();
//! let result = builder.analyze("participants.csv").unwrap();
//!
//! for record in &result.dictionary.summary {
//!     println!("{}: {}", record.var_name, record.observed_data_type);
//! }
//! println!("Lookup rows: {}", result.dictionary.lookup.len());
//! ```
//!
//! Datasets can also be assembled in memory:
//!
//! ```
//! use obsdd::{Column, Dataset, DictionaryBuilder, SemanticType};
//!
//! let dataset = Dataset::from_columns(vec![
//!     Column::text("dx", vec![Some("CD"), Some("UC"), None, Some("CD")]),
//!     Column::integer("visit", vec![Some(3), Some(1), Some(2), Some(1)]),
//! ])
//! .unwrap();
//!
//! let dictionary = DictionaryBuilder::new().build(&dataset).unwrap();
//! let visit = dictionary.summary_for("visit").unwrap();
//! assert_eq!(visit.observed_data_type, SemanticType::NumberList);
//! ```

pub mod data;
pub mod error;
pub mod inference;
pub mod input;
pub mod model;
pub mod stats;

mod dictionary;
mod format;

pub use crate::dictionary::{DictionaryBuilder, DictionaryConfig, DictionaryResult, ErrorPolicy};
pub use data::{Column, Dataset, StorageClass, Value};
pub use error::{ObsddError, Result};
pub use inference::{ClassifierConfig, TypeClassifier};
pub use input::{Parser, ParserConfig, SourceMetadata};
pub use model::{LookupRow, ObservedDataDictionary, ObservedValue, SemanticType, SummaryRecord};
pub use stats::AnomalyConfig;

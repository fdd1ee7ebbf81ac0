//! Output types for the observed data dictionary.

mod record;
mod table;
mod types;

pub use record::{ListStatistics, LookupRow, NumericStatistics, SkippedColumn, SummaryRecord};
pub use table::{LOOKUP_COLUMNS, ObservedDataDictionary, SUMMARY_COLUMNS};
pub use types::{ObservedValue, SemanticType};

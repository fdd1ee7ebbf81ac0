//! Date-like textual patterns.
//!
//! Three formats are recognized:
//!
//! | Pattern        | Example               |
//! |----------------|-----------------------|
//! | BLSA           | `2020-01-31`          |
//! | Extended BLSA  | `2020-01-31 13:45:00` |
//! | Stata TD       | `31jan2020`           |
//!
//! Only digit counts are checked; `2020-99-99` is a BLSA date.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::{Column, Value};

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================

// `$` anchors at the very end of the input, so a value with a trailing
// newline such as "2020-01-01\n" is not a date.
static BLSA_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

static EXTENDED_BLSA_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap());

/// Month abbreviations accepted in the middle of a Stata TD date.
const STATA_MONTHS: [&str; 12] = [
    "mar", "jan", "may", "nov", "dec", "aug", "oct", "sep", "jun", "jul", "feb", "apr",
];

static STATA_TD_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\d{{2}}(?:{})\d{{4}}$", STATA_MONTHS.join("|"))).unwrap()
});

/// `YYYY-MM-DD`.
pub fn is_blsa_date(value: &str) -> bool {
    BLSA_DATE.is_match(value)
}

/// `YYYY-MM-DD HH:MM:SS`.
pub fn is_extended_blsa_date(value: &str) -> bool {
    EXTENDED_BLSA_DATE.is_match(value)
}

/// `DDmonYYYY`: 9 characters, 2 digits, a lowercase month abbreviation, 4 digits.
pub fn is_stata_td_date(value: &str) -> bool {
    STATA_TD_DATE.is_match(value)
}

/// True iff every non-missing value satisfies `predicate`.
///
/// Vacuously true for a column with no observed values. Non-text values
/// are matched through their display form.
pub fn column_matches(column: &Column, predicate: impl Fn(&str) -> bool) -> bool {
    column.observed().all(|value| match value {
        Value::Text(s) => predicate(s),
        other => predicate(&other.to_string()),
    })
}

/// Every observed value is a BLSA date.
pub fn is_series_of_blsa_dates(column: &Column) -> bool {
    column_matches(column, is_blsa_date)
}

/// Every observed value is an extended BLSA date.
pub fn is_series_of_extended_blsa_dates(column: &Column) -> bool {
    column_matches(column, is_extended_blsa_date)
}

/// Every observed value is a Stata TD date.
pub fn is_series_of_stata_td_dates(column: &Column) -> bool {
    column_matches(column, is_stata_td_date)
}

/// The column is entirely one of the three date patterns.
///
/// Each pattern is checked against the whole column in turn; a column
/// mixing BLSA and Stata TD values does not qualify.
pub fn appears_to_be_date(column: &Column) -> bool {
    is_series_of_blsa_dates(column)
        || is_series_of_extended_blsa_dates(column)
        || is_series_of_stata_td_dates(column)
}

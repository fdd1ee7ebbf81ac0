//! Property-based tests for obsdd.
//!
//! These tests use proptest to generate random columns and verify that
//! the dictionary builder maintains its invariants under all conditions.
//!
//! # Running Property Tests
//!
//! ```bash
//! # Run all property tests
//! cargo test -p obsdd --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p obsdd --test property_tests
//! ```

use proptest::prelude::*;

use obsdd::inference::patterns::{is_blsa_date, is_extended_blsa_date, is_stata_td_date};
use obsdd::stats::{AnomalyConfig, potential_anomalies, quantile};
use obsdd::{Column, Dataset, DictionaryBuilder, SemanticType, TypeClassifier};

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary ASCII strings.
fn ascii_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_\\-\\.\\s]{0,40}"
}

/// Strings that look almost like dates.
fn date_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{4}-[0-9]{2}-[0-9]{2}",
        "[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}",
        "[0-9]{1,3}(jan|feb|mar|xyz|Jan)[0-9]{3,5}",
        "[0-9/\\-: ]{0,20}",
    ]
}

/// Text columns with a small vocabulary and missing values.
fn text_column() -> impl Strategy<Value = Column> {
    prop::collection::vec(prop::option::of("[a-e]{1,2}"), 1..60).prop_map(|v| Column::text("t", v))
}

fn integer_column() -> impl Strategy<Value = Column> {
    prop::collection::vec(prop::option::of(-30i64..30), 1..60).prop_map(|v| Column::integer("i", v))
}

fn float_column() -> impl Strategy<Value = Column> {
    prop::collection::vec(prop::option::of(-1000.0f64..1000.0), 1..80).prop_map(|v| Column::float("f", v))
}

fn any_column() -> impl Strategy<Value = Column> {
    prop_oneof![text_column(), integer_column(), float_column()]
}

fn parse_pct(s: &str) -> f64 {
    s.strip_suffix('%').unwrap().parse().unwrap()
}

// =============================================================================
// Pattern Properties
// =============================================================================

proptest! {
    /// Pattern matchers never panic on any input.
    #[test]
    fn patterns_never_panic(s in "\\PC{0,64}") {
        let _ = is_blsa_date(&s);
        let _ = is_extended_blsa_date(&s);
        let _ = is_stata_td_date(&s);
    }

    /// Each pattern fixes the length of what it accepts.
    #[test]
    fn pattern_lengths(s in date_like()) {
        if is_blsa_date(&s) {
            prop_assert_eq!(s.len(), 10);
        }
        if is_extended_blsa_date(&s) {
            prop_assert_eq!(s.len(), 19);
        }
        if is_stata_td_date(&s) {
            prop_assert_eq!(s.len(), 9);
        }
    }

    /// Text is never both a plain and an extended date.
    #[test]
    fn patterns_are_exclusive(s in ascii_string()) {
        prop_assert!(!(is_blsa_date(&s) && is_extended_blsa_date(&s)));
    }
}

// =============================================================================
// Classifier Properties
// =============================================================================

proptest! {
    /// Every supported column gets exactly one type, the same type every time,
    /// and never `Integer`.
    #[test]
    fn classifier_total_and_deterministic(column in any_column()) {
        let classifier = TypeClassifier::new();
        let first = classifier.classify(&column).unwrap();
        let second = classifier.classify(&column).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_ne!(first, SemanticType::Integer);
    }

    /// Integer columns are list-typed exactly when their cardinality is low.
    #[test]
    fn integer_columns_number_list_or_string(column in integer_column()) {
        let semantic_type = TypeClassifier::new().classify(&column).unwrap();
        if column.distinct_count() <= 15 {
            prop_assert_eq!(semantic_type, SemanticType::NumberList);
        } else {
            prop_assert_eq!(semantic_type, SemanticType::String);
        }
    }
}

// =============================================================================
// Dictionary Properties
// =============================================================================

proptest! {
    /// Observed plus missing counts add up to the row count.
    #[test]
    fn observed_plus_missing_is_total(column in any_column()) {
        let total = column.len();
        let dataset = Dataset::from_columns(vec![column]).unwrap();
        let dictionary = DictionaryBuilder::new().build(&dataset).unwrap();
        let record = &dictionary.summary[0];

        let missing: usize = record.string_of_missing_stats
            .split(' ')
            .next()
            .unwrap()
            .parse()
            .unwrap();
        prop_assert_eq!(record.number_of_observed_values + missing, total);
    }

    /// Percentages carry exactly two decimals and a `%` sign.
    #[test]
    fn percentages_are_formatted(column in text_column()) {
        let dataset = Dataset::from_columns(vec![column]).unwrap();
        let dictionary = DictionaryBuilder::new().build(&dataset).unwrap();

        for row in &dictionary.lookup {
            for pct in [&row.val_pct_keep_missing_in_total, &row.val_pct_drop_missing_in_total] {
                let digits = pct.strip_suffix('%').unwrap();
                let (_, decimals) = digits.split_once('.').unwrap();
                prop_assert_eq!(decimals.len(), 2);
            }
        }
    }

    /// Drop-missing lookup percentages sum to about 100.
    #[test]
    fn lookup_percentages_sum(column in text_column()) {
        let observed = column.observed_count();
        let dataset = Dataset::from_columns(vec![column]).unwrap();
        let dictionary = DictionaryBuilder::new().build(&dataset).unwrap();

        if observed > 0 && !dictionary.lookup.is_empty() {
            let drop: f64 = dictionary.lookup.iter()
                .map(|r| parse_pct(&r.val_pct_drop_missing_in_total))
                .sum();
            prop_assert!((drop - 100.0).abs() < 0.01 * dictionary.lookup.len() as f64);
        }
    }

    /// Building twice gives identical tables.
    #[test]
    fn build_is_idempotent(a in text_column(), b in float_column()) {
        let rows = a.len().min(b.len());
        let a = Column::text("t", a.values()[..rows].iter().map(|v| v.as_str().map(str::to_string)));
        let b = Column::float("f", b.values()[..rows].iter().map(|v| v.as_f64()));
        let dataset = Dataset::from_columns(vec![a, b]).unwrap();

        let builder = DictionaryBuilder::new();
        prop_assert_eq!(builder.build(&dataset).unwrap(), builder.build(&dataset).unwrap());
    }
}

// =============================================================================
// Statistics Properties
// =============================================================================

proptest! {
    /// Quantiles are monotone in q and stay within the data range.
    #[test]
    fn quantile_monotone(mut values in prop::collection::vec(-1e6f64..1e6, 1..100)) {
        values.sort_by(f64::total_cmp);
        let qs = [0.0, 0.05, 0.25, 0.5, 0.75, 0.95, 1.0];
        let results: Vec<f64> = qs.iter().map(|&q| quantile(&values, q)).collect();

        for pair in results.windows(2) {
            prop_assert!(pair[0] <= pair[1] + 1e-6);
        }
        prop_assert_eq!(results[0], values[0]);
        prop_assert_eq!(results[6], values[values.len() - 1]);
    }

    /// Anomalies are drawn from the input and come back sorted.
    #[test]
    fn anomalies_are_sorted_inputs(values in prop::collection::vec(-100.0f64..100.0, 0..120)) {
        let anomalies = potential_anomalies(&values, &AnomalyConfig::default());

        prop_assert!(anomalies.len() <= values.len());
        for pair in anomalies.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
        for a in &anomalies {
            prop_assert!(values.iter().any(|v| (v - a).abs() < 1e-4));
        }
    }

    /// Fewer values than `min_samples` means every value is an anomaly.
    #[test]
    fn small_columns_are_all_noise(values in prop::collection::vec(-100.0f64..100.0, 1..10)) {
        let anomalies = potential_anomalies(&values, &AnomalyConfig::default());
        prop_assert_eq!(anomalies.len(), values.len());
    }
}

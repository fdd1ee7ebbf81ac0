//! Fuzz target for dictionary construction on structured columns.
//!
//! Arbitrary numeric and text columns exercise the classifier, the
//! statistics calculators and DBSCAN, including non-finite floats.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use obsdd::{Column, Dataset, DictionaryBuilder};

#[derive(Debug, Arbitrary)]
struct Input {
    integers: Vec<Option<i64>>,
    floats: Vec<Option<f64>>,
    texts: Vec<Option<String>>,
}

fuzz_target!(|input: Input| {
    let rows = input
        .integers
        .len()
        .min(input.floats.len())
        .min(input.texts.len())
        .min(2_000);
    if rows == 0 {
        return;
    }

    let dataset = Dataset::from_columns(vec![
        Column::integer("i", input.integers.into_iter().take(rows)),
        Column::float("f", input.floats.into_iter().take(rows)),
        Column::text("t", input.texts.into_iter().take(rows)),
    ]);

    if let Ok(dataset) = dataset {
        let dictionary = DictionaryBuilder::new()
            .build(&dataset)
            .expect("supported non-empty columns always summarize");
        assert_eq!(dictionary.summary.len(), 3);
    }
});

//! Fuzz target for the delimited-text loader.
//!
//! The loader must never panic on malformed input, under every delimiter,
//! and whatever it accepts must build a dictionary without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use obsdd::{DictionaryBuilder, DictionaryConfig, ErrorPolicy, Parser};

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    let builder = DictionaryBuilder::with_config(
        DictionaryConfig::default().with_error_policy(ErrorPolicy::SkipAndReport),
    );

    for delimiter in [b',', b'\t', b';', b'|'] {
        if let Ok(dataset) = parser.parse_bytes(data, delimiter) {
            let _ = builder.build(&dataset);
        }
    }
});

//! Fuzz target for the date pattern matchers.
//!
//! Checks that the matchers never panic and that a match implies the
//! fixed length of the pattern.

#![no_main]

use libfuzzer_sys::fuzz_target;
use obsdd::inference::patterns::{is_blsa_date, is_extended_blsa_date, is_stata_td_date};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if is_blsa_date(s) {
            assert_eq!(s.len(), 10);
        }
        if is_extended_blsa_date(s) {
            assert_eq!(s.len(), 19);
        }
        if is_stata_td_date(s) {
            assert_eq!(s.len(), 9);
        }
    }
});

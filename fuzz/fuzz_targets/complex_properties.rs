//! Fuzz target for the PICT complex-property line parser.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_complex_properties
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use microddl_schema::parser::{ComplexLine, parse_complex_properties};

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        if let ComplexLine::ValueSet(entries) = parse_complex_properties(line) {
            assert!(entries.keys().all(|key| !key.is_empty()));
        }
    }
});

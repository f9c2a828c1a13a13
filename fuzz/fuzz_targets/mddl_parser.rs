//! Fuzz target for the MicroDDL parser.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_mddl_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use microddl_schema::derive::derive_all;
use microddl_schema::parser::MicroDdlParser;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Includes would touch the filesystem; the parser must only ever warn.
        if input.contains("[Include") {
            return;
        }
        if let Ok(mut compilation) =
            MicroDdlParser::new().parse_source(input, std::path::Path::new("fuzz.mddl"))
        {
            derive_all(&mut compilation.model);
        }
    }
});

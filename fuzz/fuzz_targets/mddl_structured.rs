//! Structured fuzz target: builds plausible MicroDDL stanzas from arbitrary
//! data so the fuzzer spends its time inside the stanza handlers.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_mddl_structured
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use microddl_schema::derive::derive_all;
use microddl_schema::parse_mddl;

#[derive(Debug, Arbitrary)]
enum FuzzLine {
    Column { symbol: u8, name: String, size: Option<u16> },
    Join { name: String, target: String },
    ColumnDescription { column: String, text: String },
    TableDescription(String),
    Authorization { operation: String, role: Option<String>, authorizer: String },
    PictTitle(String),
    PictProperty { name: String, value: String },
    PictColumn { column: String, label: String },
    Heading(String),
    Raw(String),
}

#[derive(Debug, Arbitrary)]
enum FuzzStanza {
    Table { name: String, lines: Vec<FuzzLine> },
    Authorization { table: String, lines: Vec<FuzzLine> },
    Pict { operation: u8, table: String, lines: Vec<FuzzLine> },
    Domain(String),
}

const SYMBOLS: &[u8] = b"@%~$#.*&^";
const OPERATIONS: [&str; 5] = ["Create", "List", "Record", "Update", "Delete"];

fn clean(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '[' | ']'))
        .take(48)
        .collect()
}

impl FuzzLine {
    fn render(&self) -> String {
        match self {
            Self::Column { symbol, name, size } => {
                let symbol = SYMBOLS[*symbol as usize % SYMBOLS.len()] as char;
                match size {
                    Some(size) => format!("{}{} {}", symbol, clean(name), size),
                    None => format!("{}{}", symbol, clean(name)),
                }
            }
            Self::Join { name, target } => format!("~{} -> {}", clean(name), clean(target)),
            Self::ColumnDescription { column, text } => {
                format!("\"{} {}", clean(column), clean(text))
            }
            Self::TableDescription(text) => format!(">{}", clean(text)),
            Self::Authorization { operation, role, authorizer } => format!(
                "{} {} {}",
                clean(operation),
                role.as_deref().map(clean).unwrap_or_else(|| "*".to_string()),
                clean(authorizer)
            ),
            Self::PictTitle(title) => format!("({})", clean(title)),
            Self::PictProperty { name, value } => format!(":{}={}", clean(name), clean(value)),
            Self::PictColumn { column, label } => {
                format!("{} Label:\"{}\"", clean(column), clean(label))
            }
            Self::Heading(text) => format!("#{}", clean(text)),
            Self::Raw(text) => clean(text),
        }
    }
}

fn render(stanzas: &[FuzzStanza]) -> String {
    let mut source = String::new();
    for stanza in stanzas {
        let (opener, lines) = match stanza {
            FuzzStanza::Table { name, lines } => (format!("!{}", clean(name)), lines.as_slice()),
            FuzzStanza::Authorization { table, lines } => {
                (format!("[Authorization {}]", clean(table)), lines.as_slice())
            }
            FuzzStanza::Pict { operation, table, lines } => (
                format!(
                    "[PICT-{} {}]",
                    OPERATIONS[*operation as usize % OPERATIONS.len()],
                    clean(table)
                ),
                lines.as_slice(),
            ),
            FuzzStanza::Domain(name) => (format!("[Domain {}]", clean(name)), &[][..]),
        };
        source.push_str(&opener);
        source.push('\n');
        for line in lines {
            source.push_str(&line.render());
            source.push('\n');
        }
        source.push('\n');
    }
    source
}

fuzz_target!(|stanzas: Vec<FuzzStanza>| {
    let source = render(&stanzas);
    if let Ok(mut compilation) = parse_mddl(&source) {
        assert_eq!(compilation.model.tables_sequence.len(), compilation.model.tables.len());
        derive_all(&mut compilation.model);
    }
});

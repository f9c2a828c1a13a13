//! Parser state carried through every stanza handler.

use smol_str::SmolStr;

use crate::ast::{DEFAULT_DOMAIN, PictOperation};

/// The kind of stanza currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StanzaType {
    #[default]
    None,
    TableSchema,
    Authorization,
    Pict(PictOperation),
}

impl std::fmt::Display for StanzaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::TableSchema => f.write_str("TableSchema"),
            Self::Authorization => f.write_str("Authorization"),
            Self::Pict(op) => write!(f, "Pict-{}", op),
        }
    }
}

/// Mutable parser state, shared by a root file and all of its includes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserState {
    /// Physical lines read across all files.
    pub line_count: usize,
    /// `!Table` stanzas opened.
    pub table_count: usize,
    /// Columns appended (re-declarations are not counted).
    pub column_count: usize,
    /// Table the open stanza applies to.
    pub current_scope: Option<SmolStr>,
    pub stanza: StanzaType,
    /// Domain given to tables created from now on.
    pub current_domain: SmolStr,
}

impl Default for ParserState {
    fn default() -> Self {
        Self {
            line_count: 0,
            table_count: 0,
            column_count: 0,
            current_scope: None,
            stanza: StanzaType::None,
            current_domain: SmolStr::new_static(DEFAULT_DOMAIN),
        }
    }
}

impl ParserState {
    /// Create a fresh state in the default domain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a stanza for a table.
    pub fn open(&mut self, stanza: StanzaType, scope: &str) {
        self.stanza = stanza;
        self.current_scope = Some(SmolStr::new(scope));
    }

    /// Close the open stanza. The current domain is kept.
    pub fn close(&mut self) {
        self.stanza = StanzaType::None;
        self.current_scope = None;
    }

    /// Check if a stanza is open.
    pub fn in_stanza(&self) -> bool {
        self.current_scope.is_some()
    }
}

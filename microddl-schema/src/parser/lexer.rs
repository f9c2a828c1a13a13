//! Line tokenizer.
//!
//! Classifies one trimmed MicroDDL line from its leading symbol and token
//! count. Classification is purely lexical; whether a class means anything in
//! the current stanza is up to the state machine.

use std::sync::LazyLock;

use pest::Parser;
use regex_lite::Regex;

use super::grammar::{MddlParser, Rule};
use crate::ast::{DataType, PictOperation};

static SIZE_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());
static PRECISION_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9,]+$").unwrap());

/// Column-level join marker (`-> Target`).
pub const JOIN_MARKER: &str = "->";
/// Table-level join marker (`=> Target`).
pub const TABLE_JOIN_MARKER: &str = "=>";

/// A trimmed line split on single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    /// The trimmed line text.
    pub text: &'a str,
    /// Tokens; consecutive spaces produce empty tokens.
    pub tokens: Vec<&'a str>,
}

impl<'a> Line<'a> {
    /// Trim and split a physical line.
    pub fn new(raw: &'a str) -> Self {
        let text = raw.trim();
        let tokens = if text.is_empty() {
            vec![]
        } else {
            text.split(' ').collect()
        };
        Self { text, tokens }
    }

    /// Check if the line is blank.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }

    /// The first token, or an empty string for blank lines.
    pub fn head(&self) -> &'a str {
        self.tokens.first().copied().unwrap_or("")
    }

    /// The first character of the line.
    pub fn symbol(&self) -> Option<char> {
        self.text.chars().next()
    }

    /// Target of a trailing `<marker> target` pair.
    fn trailing_target(&self, marker: &str) -> Option<&'a str> {
        match self.tokens.as_slice() {
            [_, .., m, target] if *m == marker => Some(*target),
            _ => None,
        }
    }

    /// Classify the line.
    pub fn classify(&self) -> LineClass<'a> {
        let Some(symbol) = self.symbol() else {
            return LineClass::Blank;
        };

        if let Some(data_type) = DataType::from_symbol(symbol) {
            return LineClass::Column(self.column_decl(data_type));
        }

        let head = self.head();
        match symbol {
            '!' => LineClass::TableOpen { name: &head[1..] },
            '"' => {
                let rest = self.text[head.len()..].trim_start_matches(' ');
                LineClass::ColumnDescription {
                    column: &head[1..],
                    text: rest.strip_suffix('"').unwrap_or(rest),
                }
            }
            '>' => LineClass::TableDescription {
                text: &self.text[1..],
            },
            '/' => LineClass::Comment,
            '[' => match parse_directive(self.text) {
                Some(directive) => LineClass::Directive(directive),
                None => LineClass::Unrecognized,
            },
            _ => LineClass::Unrecognized,
        }
    }

    fn column_decl(&self, data_type: DataType) -> ColumnDecl<'a> {
        let head = self.head();
        let name = &head[1..];

        let size = match (data_type, self.tokens.get(1)) {
            (DataType::Decimal, Some(token)) if PRECISION_TOKEN.is_match(token) => Some(*token),
            (DataType::String | DataType::Guid | DataType::Numeric, Some(token))
                if SIZE_TOKEN.is_match(token) =>
            {
                Some(*token)
            }
            _ => None,
        };

        // A lone `X -> Y` pair needs a name token in front of it.
        let (join, table_join) = if self.tokens.len() > 2 {
            (
                self.trailing_target(JOIN_MARKER),
                self.trailing_target(TABLE_JOIN_MARKER),
            )
        } else {
            (None, None)
        };

        ColumnDecl {
            data_type,
            name: (!name.is_empty()).then_some(name),
            size,
            join,
            table_join,
        }
    }
}

/// A column declaration as written on one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDecl<'a> {
    pub data_type: DataType,
    /// `None` when the symbol stands alone.
    pub name: Option<&'a str>,
    /// Explicit size overriding the kind's default.
    pub size: Option<&'a str>,
    pub join: Option<&'a str>,
    pub table_join: Option<&'a str>,
}

/// A bracketed directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `[Domain Name]`
    Domain(&'a str),
    /// `[Authorization Table]`
    Authorization(&'a str),
    /// `[PICT-<Op> Table]`
    Pict(PictOperation, &'a str),
    /// `[Include relative/path.mddl]`
    Include(&'a str),
}

/// Lexical class of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Empty after trimming; terminates the current stanza.
    Blank,
    /// `!Name`
    TableOpen { name: &'a str },
    /// `@` `%` `~` `$` `#` `.` `*` `&` `^`
    Column(ColumnDecl<'a>),
    /// `"Column text`
    ColumnDescription { column: &'a str, text: &'a str },
    /// `>text`
    TableDescription { text: &'a str },
    /// `/...`
    Comment,
    Directive(Directive<'a>),
    Unrecognized,
}

/// Parse a `[Keyword Argument]` line.
pub fn parse_directive(text: &str) -> Option<Directive<'_>> {
    let directive = MddlParser::parse(Rule::directive, text).ok()?.next()?;
    let mut inner = directive.into_inner();
    let keyword = inner.next()?.as_str();
    let argument = inner.next()?.as_str().trim();
    if argument.is_empty() {
        return None;
    }

    match keyword {
        "Domain" => Some(Directive::Domain(argument)),
        "Authorization" => Some(Directive::Authorization(argument)),
        "Include" => Some(Directive::Include(argument)),
        other => {
            let op = PictOperation::from_name(other.strip_prefix("PICT-")?)?;
            Some(Directive::Pict(op, argument))
        }
    }
}

//! MicroDDL parser.
//!
//! Lines are read one at a time and routed by the open stanza:
//!
//! ```text
//! None ──!Table──────────────▶ TableSchema
//!      ──[Authorization T]───▶ Authorization
//!      ──[PICT-<Op> T]───────▶ Pict(Op)
//!      ──[Domain D] / [Include F] / comment ──▶ None
//! any  ──blank line──▶ None
//! ```
//!
//! The state is shared across files: a stanza left open at the end of one
//! file continues into the next file parsed.
//!
//! Nothing a line can contain aborts the parse. Lines that cannot be used are
//! recorded as [`ParseWarning`]s and skipped; only reading a file can fail.

mod diagnostics;
mod grammar;
mod lexer;
mod properties;
mod state;

use std::path::Path;

use smol_str::SmolStr;
use tracing::{debug, error, info};

use crate::ast::{AuthorizationChange, Authorizer, Column, Model, PictColumn, PictOperation};
use crate::builder::{ColumnChange, ModelBuilder};
use crate::error::{SchemaError, SchemaResult};
use crate::include::{IncludeResolver, PendingInclude};

pub use diagnostics::{Diagnostics, ParseWarning, WarningKind};
pub use grammar::{MddlParser, Rule};
pub use lexer::{ColumnDecl, Directive, JOIN_MARKER, Line, LineClass, TABLE_JOIN_MARKER, parse_directive};
pub use properties::{ComplexLine, PropertyValue, parse_complex_properties};
pub use state::{ParserState, StanzaType};

/// Origin reported for sources that did not come from a file.
pub const INLINE_ORIGIN: &str = "<inline>";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Counters of one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Files scanned, the root included.
    pub files: usize,
    pub lines: usize,
    pub tables: usize,
    pub columns: usize,
}

/// The result of parsing a root file and everything it includes.
#[derive(Debug, Clone)]
pub struct Compilation {
    pub model: Model,
    pub warnings: Vec<ParseWarning>,
    pub stats: ParseStats,
}

impl Compilation {
    /// Check if every line was used.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Parse MicroDDL source text. Includes resolve against the working directory.
pub fn parse_mddl(source: &str) -> SchemaResult<Compilation> {
    MicroDdlParser::new().parse_source(source, Path::new(INLINE_ORIGIN))
}

/// Parse a MicroDDL file and its includes.
pub fn parse_mddl_file(path: impl AsRef<Path>) -> SchemaResult<Compilation> {
    MicroDdlParser::new().parse_file(path.as_ref())
}

/// Where a line came from.
struct Location<'a> {
    path: &'a Path,
    file: &'a str,
    line: usize,
    text: &'a str,
}

/// Parser for one compile: a root file plus its includes.
#[derive(Debug, Default)]
pub struct MicroDdlParser {
    builder: ModelBuilder,
    includes: IncludeResolver,
    diagnostics: Diagnostics,
    files: usize,
}

impl MicroDdlParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a root file, then its includes.
    pub fn parse_file(self, path: &Path) -> SchemaResult<Compilation> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            error!(file = %path.display(), "error reading MicroDDL file: {}", e);
            SchemaError::io(path.display().to_string(), e)
        })?;
        self.parse_source(&source, path)
    }

    /// Parse root source text, resolving its includes relative to `origin`.
    pub fn parse_source(mut self, source: &str, origin: &Path) -> SchemaResult<Compilation> {
        let mut state = ParserState::new();
        self.includes.mark_visited(origin);
        self.scan(&mut state, source, origin);

        while let Some(pending) = self.includes.next_include() {
            let included_from = pending.included_from.display().to_string();
            let target = pending.path.display().to_string();

            if !self.includes.mark_visited(&pending.path) {
                self.diagnostics.warn(
                    &included_from,
                    pending.line,
                    WarningKind::RepeatedInclude,
                    &target,
                );
                continue;
            }

            info!(file = %target, "processing include file");
            let source = std::fs::read_to_string(&pending.path).map_err(|e| {
                error!(file = %target, included_from = %included_from, "error reading include: {}", e);
                SchemaError::include_failed(target.clone(), included_from.clone(), e)
            })?;
            self.scan(&mut state, &source, &pending.path);
        }

        Ok(Compilation {
            stats: ParseStats {
                files: self.files,
                lines: state.line_count,
                tables: state.table_count,
                columns: state.column_count,
            },
            model: self.builder.into_model(),
            warnings: self.diagnostics.into_warnings(),
        })
    }

    /// Scan one file's lines, then schedule its includes.
    fn scan(&mut self, state: &mut ParserState, source: &str, path: &Path) {
        let file = path.display().to_string();
        info!(file = %file, "parsing MicroDDL file");
        self.files += 1;

        let source = source.strip_prefix(BYTE_ORDER_MARK).unwrap_or(source);
        let mut includes = Vec::new();
        for (index, raw) in source.lines().enumerate() {
            state.line_count += 1;
            let line = Line::new(raw);
            let at = Location {
                path,
                file: &file,
                line: index + 1,
                text: line.text,
            };
            self.route(state, &at, &line, &mut includes);
        }

        info!(file = %file, includes = includes.len(), "finished MicroDDL file");
        self.includes.schedule(includes);
    }

    fn route(
        &mut self,
        state: &mut ParserState,
        at: &Location<'_>,
        line: &Line<'_>,
        includes: &mut Vec<PendingInclude>,
    ) {
        let class = line.classify();
        if matches!(class, LineClass::Blank) {
            state.close();
            return;
        }

        match state.stanza {
            StanzaType::None => self.outside_stanza(state, at, class, includes),
            StanzaType::TableSchema => self.table_schema_line(state, at, class),
            StanzaType::Authorization => self.authorization_line(state, at, line),
            StanzaType::Pict(operation) => self.pict_line(state, at, operation, line),
        }
    }

    fn outside_stanza(
        &mut self,
        state: &mut ParserState,
        at: &Location<'_>,
        class: LineClass<'_>,
        includes: &mut Vec<PendingInclude>,
    ) {
        match class {
            LineClass::TableOpen { name } if name.is_empty() => {
                self.warn(at, WarningKind::EmptyName);
            }
            LineClass::TableOpen { name } => {
                self.builder.initialize_scope(name, &state.current_domain);
                state.open(StanzaType::TableSchema, name);
                state.table_count += 1;
                info!(file = at.file, line = at.line, table = name, "begins table stanza");
            }
            LineClass::Comment => {}
            LineClass::Directive(Directive::Domain(domain)) => {
                state.current_domain = SmolStr::new(domain);
                info!(file = at.file, line = at.line, domain, "changes the domain");
            }
            LineClass::Directive(Directive::Authorization(table)) => {
                self.builder.initialize_scope(table, &state.current_domain);
                state.open(StanzaType::Authorization, table);
                info!(file = at.file, line = at.line, table, "begins authorization stanza");
            }
            LineClass::Directive(Directive::Pict(operation, table)) => {
                self.builder.initialize_pict_scope(table);
                state.open(StanzaType::Pict(operation), table);
                info!(
                    file = at.file,
                    line = at.line,
                    table,
                    operation = operation.as_str(),
                    "begins PICT stanza"
                );
            }
            LineClass::Directive(Directive::Include(target)) => {
                let pending = PendingInclude::new(at.path, target, at.line);
                info!(
                    file = at.file,
                    line = at.line,
                    include = %pending.path.display(),
                    "references include file"
                );
                includes.push(pending);
            }
            _ => self.warn(at, WarningKind::OutsideStanza),
        }
    }

    fn table_schema_line(&mut self, state: &mut ParserState, at: &Location<'_>, class: LineClass<'_>) {
        let Some(scope) = state.current_scope.clone() else {
            return;
        };

        match class {
            LineClass::Column(decl) => {
                let column = column_from_decl(&scope, &decl);
                let name = column.name.clone();
                match self.builder.declare_column(&scope, column) {
                    Some(ColumnChange::Added) => {
                        state.column_count += 1;
                        debug!(file = at.file, line = at.line, table = %scope, column = %name, "column");
                    }
                    Some(ColumnChange::Updated) => {
                        debug!(file = at.file, line = at.line, table = %scope, column = %name, "column redeclared");
                    }
                    None => {}
                }
            }
            LineClass::ColumnDescription { column, text } => {
                let column = column_name(&scope, Some(column).filter(|c| !c.is_empty()));
                if !self.builder.describe_column(&scope, &column, text) {
                    self.warn(at, WarningKind::UnknownColumn);
                }
            }
            LineClass::TableDescription { text } => {
                self.builder.describe_table(&scope, text);
            }
            _ => {
                debug!(file = at.file, line = at.line, content = at.text, "comment");
            }
        }
    }

    fn authorization_line(&mut self, state: &ParserState, at: &Location<'_>, line: &Line<'_>) {
        let Some(scope) = state.current_scope.as_deref() else {
            return;
        };
        let [operation, role, authorizer, ..] = line.tokens.as_slice() else {
            self.warn(at, WarningKind::TooFewTokens);
            return;
        };

        let authorizer = Authorizer::from(*authorizer);
        match self.builder.authorize(scope, operation, role, authorizer.clone()) {
            Some(AuthorizationChange::Broadcast { roles }) => {
                info!(
                    file = at.file,
                    line = at.line,
                    table = scope,
                    operation,
                    roles,
                    authorizer = authorizer.as_str(),
                    "wildcard authorization"
                );
            }
            Some(AuthorizationChange::Role { previous }) => {
                info!(
                    file = at.file,
                    line = at.line,
                    table = scope,
                    operation,
                    role,
                    authorizer = authorizer.as_str(),
                    previous = previous.as_ref().map(Authorizer::as_str),
                    "custom authorization"
                );
            }
            Some(AuthorizationChange::UnknownRole) => self.warn(at, WarningKind::UnknownRole),
            None => {}
        }
    }

    fn pict_line(
        &mut self,
        state: &ParserState,
        at: &Location<'_>,
        operation: PictOperation,
        line: &Line<'_>,
    ) {
        let Some(scope) = state.current_scope.as_deref() else {
            return;
        };
        let Some(view) = self.builder.pict_view_mut(scope, operation) else {
            return;
        };

        if let Some(heading) = line.text.strip_prefix('#') {
            view.columns.push(PictColumn::section_heading(heading));
            return;
        }

        match parse_complex_properties(line.text) {
            ComplexLine::Title(title) => {
                debug!(file = at.file, line = at.line, table = scope, "PICT title");
                view.title = title;
            }
            ComplexLine::Property { name, value } => {
                if let Err(rejection) = view.set_property(&name, value.into()) {
                    debug!(file = at.file, line = at.line, %rejection, "PICT property rejected");
                    self.warn(at, WarningKind::InvalidPictProperty);
                }
            }
            ComplexLine::MalformedProperty => self.warn(at, WarningKind::MalformedProperty),
            ComplexLine::ValueSet(mut attributes) => {
                let column = attributes
                    .shift_remove("Column")
                    .map(SmolStr::from)
                    .unwrap_or_else(|| SmolStr::new(line.head()));
                let kind = attributes.shift_remove("Type").map(SmolStr::from);
                view.columns.push(PictColumn {
                    column,
                    kind,
                    attributes,
                });
            }
        }
    }

    fn warn(&mut self, at: &Location<'_>, kind: WarningKind) {
        self.diagnostics.warn(at.file, at.line, kind, at.text);
    }
}

/// Name of a declared column, or `<Table>_UnknownColumn` for a bare symbol.
fn column_name(scope: &str, name: Option<&str>) -> SmolStr {
    match name {
        Some(name) => SmolStr::new(name),
        None => SmolStr::from(format!("{}_UnknownColumn", scope)),
    }
}

fn column_from_decl(scope: &str, decl: &ColumnDecl<'_>) -> Column {
    let mut column = Column::new(column_name(scope, decl.name), decl.data_type);
    if let Some(size) = decl.size {
        column = column.with_size(size);
    }
    if let Some(join) = decl.join {
        column = column.with_join(join);
    }
    column.table_join = decl.table_join.map(SmolStr::new);
    column
}

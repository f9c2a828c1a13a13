//! Non-fatal parse warnings.

use std::fmt;

use tracing::warn;

/// Why a line was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// Not a stanza opener, comment or directive, and no stanza is open.
    OutsideStanza,
    /// An authorization line with fewer than three tokens.
    TooFewTokens,
    /// An authorization line naming a role the table does not have.
    UnknownRole,
    /// A description for a column the table does not have.
    UnknownColumn,
    /// A `:` property line without `=`.
    MalformedProperty,
    /// A property the PICT view refused.
    InvalidPictProperty,
    /// A stanza opener or directive without a name.
    EmptyName,
    /// An include of a file that was already parsed.
    RepeatedInclude,
}

impl WarningKind {
    /// Short human-readable explanation.
    pub fn message(&self) -> &'static str {
        match self {
            Self::OutsideStanza => "line is not within a stanza",
            Self::TooFewTokens => "authorization line needs an operation, a role and an authorizer",
            Self::UnknownRole => "role is not defined for this table",
            Self::UnknownColumn => "description refers to an undeclared column",
            Self::MalformedProperty => "property line has no `=`",
            Self::InvalidPictProperty => "property cannot be set on a PICT view",
            Self::EmptyName => "missing table name",
            Self::RepeatedInclude => "file was already parsed",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A skipped line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// File the line came from.
    pub file: String,
    /// 1-based line number within `file`.
    pub line: usize,
    pub kind: WarningKind,
    /// The trimmed line text.
    pub content: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}: {}", self.file, self.line, self.kind, self.content)
    }
}

/// Collects warnings for one compile, logging each as it is recorded.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<ParseWarning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a warning.
    pub fn warn(&mut self, file: &str, line: usize, kind: WarningKind, content: &str) {
        warn!(file, line, content, "ignoring line: {}", kind);
        self.warnings.push(ParseWarning {
            file: file.to_string(),
            line,
            kind,
            content: content.to_string(),
        });
    }

    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<ParseWarning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn("Model.mddl", 7, WarningKind::TooFewTokens, "Read Deny");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics.warnings()[0].to_string(),
            "Model.mddl:7: authorization line needs an operation, a role and an authorizer: Read Deny"
        );
    }
}

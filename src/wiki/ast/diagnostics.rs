//! Recoverable-failure records
//!
//! Nothing that goes wrong inside a document stops its conversion. Unterminated blocks and
//! equations that fail to transpile are recorded here instead, each with the location, the
//! kind of failure and the raw snippet involved, and handed to the caller alongside the
//! best-effort result.

use super::range::Range;
use crate::math::{MathError, MathErrorKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Warning,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Warning => write!(f, "warning"),
        }
    }
}

/// Block-level problems found by the line classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralIssue {
    UnterminatedCodeBlock,
    UnterminatedEquationBlock,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "category", content = "detail")]
pub enum DiagnosticKind {
    StructuralWarning(StructuralIssue),
    EquationParseFailure(MathErrorKind),
}

impl DiagnosticKind {
    /// Stable machine-readable code, e.g. `unterminated-code-block`.
    pub fn code(&self) -> String {
        match self {
            DiagnosticKind::StructuralWarning(StructuralIssue::UnterminatedCodeBlock) => {
                "unterminated-code-block".to_string()
            }
            DiagnosticKind::StructuralWarning(StructuralIssue::UnterminatedEquationBlock) => {
                "unterminated-equation-block".to_string()
            }
            DiagnosticKind::EquationParseFailure(kind) => kind.to_string(),
        }
    }
}

/// One recoverable failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    pub kind: DiagnosticKind,
    /// The raw source involved: the opener of an unterminated block, or the offending
    /// substring of an equation.
    pub snippet: String,
    pub message: String,
}

impl Diagnostic {
    pub fn structural(range: Range, issue: StructuralIssue, snippet: impl Into<String>) -> Self {
        let message = match issue {
            StructuralIssue::UnterminatedCodeBlock => "code block is never closed",
            StructuralIssue::UnterminatedEquationBlock => "equation block is never closed",
        };
        Self {
            range,
            kind: DiagnosticKind::StructuralWarning(issue),
            snippet: snippet.into(),
            message: message.to_string(),
        }
    }

    /// An equation failure located at the span or block the equation came from.
    pub fn equation(range: Range, error: &MathError) -> Self {
        Self {
            range,
            kind: DiagnosticKind::EquationParseFailure(error.kind()),
            snippet: error.snippet(),
            message: error.to_string(),
        }
    }

    /// Every recoverable failure is a warning; only encoding errors are fatal and those
    /// never become diagnostics.
    pub fn severity(&self) -> DiagnosticSeverity {
        DiagnosticSeverity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} at {}",
            self.severity(),
            self.kind.code(),
            self.message,
            self.range.start
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::ast::range::Position;

    #[test]
    fn test_structural_display() {
        let range = Range::new(0..7, Position::new(3, 0), Position::new(3, 7));
        let diag = Diagnostic::structural(range, StructuralIssue::UnterminatedCodeBlock, "<code>");
        assert_eq!(
            diag.to_string(),
            "warning [unterminated-code-block]: code block is never closed at 3:0"
        );
    }

    #[test]
    fn test_equation_diagnostic_keeps_snippet() {
        let error = MathError::UnknownCommand {
            name: "foo".into(),
            span: 0..4,
        };
        let diag = Diagnostic::equation(Range::default(), &error);
        assert_eq!(
            diag.kind,
            DiagnosticKind::EquationParseFailure(MathErrorKind::UnknownCommand)
        );
        assert_eq!(diag.snippet, "\\foo");
        assert_eq!(diag.kind.code(), "unknown-command");
    }
}

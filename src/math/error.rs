//! Error types for equation transpilation

use serde::Serialize;
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// A structured transpilation failure.
///
/// Every variant names the byte span of the offending substring within the equation source,
/// and the substring itself, so callers can point at it without re-slicing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// A `{` that is never closed, or a `}` that closes nothing.
    #[error("unbalanced group at {}..{}: `{snippet}`", .span.start, .span.end)]
    UnbalancedGroup { snippet: String, span: Range<usize> },

    /// A control word that is neither a structural command nor a known symbol.
    #[error("unknown command `\\{name}` at {}..{}", .span.start, .span.end)]
    UnknownCommand { name: String, span: Range<usize> },

    /// Known LaTeX that falls outside the supported subset (environments, font switches,
    /// alignment, line breaks, ...), nesting past the depth limit, or a command or script
    /// marker with nothing left to consume. The snippet is the command in the last case.
    #[error("unsupported construct at {}..{}: `{snippet}`", .span.start, .span.end)]
    UnsupportedConstruct { snippet: String, span: Range<usize> },
}

/// Discriminant of [`MathError`], used by diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MathErrorKind {
    UnbalancedGroup,
    UnknownCommand,
    UnsupportedConstruct,
}

impl MathError {
    pub fn kind(&self) -> MathErrorKind {
        match self {
            MathError::UnbalancedGroup { .. } => MathErrorKind::UnbalancedGroup,
            MathError::UnknownCommand { .. } => MathErrorKind::UnknownCommand,
            MathError::UnsupportedConstruct { .. } => MathErrorKind::UnsupportedConstruct,
        }
    }

    pub fn span(&self) -> &Range<usize> {
        match self {
            MathError::UnbalancedGroup { span, .. }
            | MathError::UnknownCommand { span, .. }
            | MathError::UnsupportedConstruct { span, .. } => span,
        }
    }

    /// The offending substring as written in the source.
    pub fn snippet(&self) -> String {
        match self {
            MathError::UnbalancedGroup { snippet, .. }
            | MathError::UnsupportedConstruct { snippet, .. } => snippet.clone(),
            MathError::UnknownCommand { name, .. } => format!("\\{name}"),
        }
    }
}

impl fmt::Display for MathErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathErrorKind::UnbalancedGroup => write!(f, "unbalanced-group"),
            MathErrorKind::UnknownCommand => write!(f, "unknown-command"),
            MathErrorKind::UnsupportedConstruct => write!(f, "unsupported-construct"),
        }
    }
}

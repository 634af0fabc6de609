//! Document model types
//!
//! [`Document`] owns everything: items in reading order and the diagnostics raised while
//! building them. Blocks own their spans; spans own their children. Nothing is shared and
//! nothing is mutated after the builder hands the document over.

pub mod block;
pub mod diagnostics;
pub mod document;
pub mod inlines;
pub mod range;

pub use block::{Alignment, Block, BlockKind, MediaKind, MediaRef, VideoProvider};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSeverity, StructuralIssue};
pub use document::{Document, DocumentItem, DocumentStats, EquationRef, List, ListItem};
pub use inlines::{flatten, visible_text, InlineMath, Link, LinkTarget, Span, Style, StyledRun};
pub use range::{Position, Range, SourceLocation};

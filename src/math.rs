//! Equation transpiler
//!
//!     Equations arrive as raw LaTeX-like source (from `$..$` spans and `$$` blocks) and leave
//!     as one of two target markups. In between sits a small tree, the [MathNode], built by a
//!     recursive descent parser over a bounded grammar: fractions, sub/superscripts, radicals,
//!     accents, Greek letters and other named symbols, upright text and grouping.
//!
//! The Pipeline
//!
//!     1. Tokenization with logos. See [token]. Whitespace is dropped here, every token keeps
//!        the byte range of its source text so failures can name the offending substring.
//!     2. Parsing. See [parser]. No backtracking: each token is looked at once, so parsing is
//!        linear in the source length.
//!     3. Serialization. Either [delimited] (the original source between renderer delimiters,
//!        for client-side math engines, once it has transpiled) or [omml] (an element tree in
//!        the Office Math namespace, for word processors, total over [MathNode]). [latex]
//!        re-derives canonical source from a tree.
//!
//!     Named symbols resolve through a process-wide table, see [symbols]. It is built once on
//!     first use and never mutated.
//!
//! Failure
//!
//!     [parse] returns a typed [MathError]. Deciding what to show instead is the caller's job
//!     and happens in exactly one place, [render](crate::wiki::render).

pub mod ast;
pub mod delimited;
pub mod error;
pub mod latex;
pub mod omml;
pub mod parser;
pub mod symbols;
pub mod token;
pub mod xml;

pub use ast::{AccentKind, MathNode};
pub use error::{MathError, MathErrorKind};
pub use parser::parse;

/// How an equation sits in its surrounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MathMode {
    /// Flows with the text of a line.
    Inline,
    /// Set apart on its own line.
    Display,
}

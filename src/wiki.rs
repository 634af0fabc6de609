//! Wiki documents
//!
//! The Pipeline
//!
//!     source text
//!       -> lexing     classified lines; code and equation blocks gathered across lines
//!       -> building   blocks with resolved inline spans, ranges and nested lists
//!       -> Document   items in reading order plus structural diagnostics
//!
//!     [convert] is the entry point; it also decodes raw bytes and converts batches.
//!     Equations are kept raw in the model and transpiled on demand by [render].
//!
//! Recoverable failures never abort a conversion. An unterminated code or equation block is
//! still emitted with whatever content it gathered, and reported as a
//! [Diagnostic](ast::Diagnostic). Only input that is not UTF-8 yields no document.

pub mod ast;
pub mod building;
pub mod config;
pub mod convert;
pub mod inlines;
pub mod lexing;
pub mod render;
pub mod testing;

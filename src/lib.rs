//! # wikimark
//!
//! A parser for DokuWiki-style markup and a transpiler for the LaTeX equations embedded in it.
//!
//! File Layout
//!
//! The crate has two independent halves that meet at the equation span:
//!
//! src/wiki      Wiki documents: line classification, inline spans, the document model,
//!               rendering of embedded equations and the conversion entry points.
//! src/math      Equations: tokenizer, recursive descent parser, math AST and the two
//!               serializers (delimited source and Office Math Markup).
//!
//! The wiki side never transpiles while it parses. Equations are kept as raw source on
//! [`Span::Equation`](wiki::ast::Span) and only handed to [`math`] when a renderer asks for
//! them, so a broken equation can never abort the classification of its document.
//!
//! For testing guidelines, see the [testing module](wiki::testing).

#![allow(rustdoc::invalid_html_tags)]

pub mod math;
pub mod wiki;

pub use math::{MathError, MathNode};
pub use wiki::ast::{Block, BlockKind, Diagnostic, Document, Span};
pub use wiki::config::WikiConfig;
pub use wiki::convert::{convert_bytes, convert_str, EncodingError};

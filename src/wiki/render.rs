//! Equation rendering
//!
//! Equations stay raw in the document model until a renderer asks for them. This is the one
//! place where a failed transpilation turns into fallback output: the equation's original
//! source in its original wiki delimiters, as plain text. Everything else in the crate sees a
//! typed [`MathError`].

use crate::math::xml::Element;
use crate::math::{delimited, omml, MathError, MathMode};
use crate::wiki::ast::{
    Block, BlockKind, Diagnostic, Document, EquationRef, InlineMath, Position, Range,
};
use crate::wiki::config::MathConfig;
use serde::Serialize;

/// Which renderer the equations are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MathTarget {
    /// Delimited source for a client-side math engine (HTML).
    Delimited,
    /// Office Math Markup for a word processor.
    Omml,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RenderedMath {
    Delimited { markup: String },
    Omml { element: Element },
    /// The equation did not transpile. `text` is its source in the wiki delimiters it was
    /// written with, to be emitted as a plain text run.
    Fallback { text: String },
}

impl RenderedMath {
    pub fn is_fallback(&self) -> bool {
        matches!(self, RenderedMath::Fallback { .. })
    }

    /// The output as text: delimited markup, serialized elements or the fallback text.
    pub fn to_text(&self) -> String {
        match self {
            RenderedMath::Delimited { markup } => markup.clone(),
            RenderedMath::Omml { element } => element.to_string(),
            RenderedMath::Fallback { text } => text.clone(),
        }
    }
}

/// One rendered equation and, when it fell back, the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub math: RenderedMath,
    pub error: Option<MathError>,
}

/// Every equation of a document, rendered in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquationReport {
    pub rendered: Vec<RenderedMath>,
    /// One `EquationParseFailure` per fallback, located at the failing substring when the
    /// equation sits in a line of text and at the equation block otherwise.
    pub diagnostics: Vec<Diagnostic>,
}

impl EquationReport {
    pub fn fallback_count(&self) -> usize {
        self.rendered.iter().filter(|m| m.is_fallback()).count()
    }
}

fn mode_of(math: &InlineMath) -> MathMode {
    if math.display {
        MathMode::Display
    } else {
        MathMode::Inline
    }
}

/// Transpile and serialize one equation, falling back to its literal source on failure.
pub fn render_equation(math: &InlineMath, target: MathTarget, config: &MathConfig) -> Rendered {
    let mode = mode_of(math);
    match crate::math::parse(&math.source) {
        Ok(node) => {
            let rendered = match target {
                MathTarget::Delimited => RenderedMath::Delimited {
                    markup: delimited::serialize(&math.source, mode, config),
                },
                MathTarget::Omml => RenderedMath::Omml {
                    element: omml::serialize(&node, mode, config),
                },
            };
            Rendered {
                math: rendered,
                error: None,
            }
        }
        Err(error) => {
            log::debug!("equation falls back to source: {error}");
            Rendered {
                math: RenderedMath::Fallback {
                    text: math.delimited_source(),
                },
                error: Some(error),
            }
        }
    }
}

/// Finds where each equation's source starts in the document.
///
/// Equations written inside a line of text are searched for in the block's raw text, in
/// reading order. Equation blocks span lines and have no such offset.
#[derive(Default)]
struct SourceCursor<'a> {
    block: Option<&'a Block>,
    offset: usize,
}

impl<'a> SourceCursor<'a> {
    fn source_start(&mut self, equation: &EquationRef<'a>) -> Option<usize> {
        let block = equation.block;
        if !self.block.is_some_and(|seen| std::ptr::eq(seen, block)) {
            self.offset = 0;
        }
        self.block = Some(block);
        if block.kind == BlockKind::EquationBlock {
            return None;
        }
        let written = equation.math.delimited_source();
        let found = self.offset + block.raw_text.get(self.offset..)?.find(&written)?;
        self.offset = found + written.len();
        let delimiter = if equation.math.display { 2 } else { 1 };
        Some(block.text_start + found + delimiter)
    }
}

/// The failing substring when the equation sits on one line, the whole block otherwise.
fn failure_range(
    equation: &EquationRef<'_>,
    source_start: Option<usize>,
    error: &MathError,
) -> Range {
    let block = equation.block;
    let Some(source_start) = source_start else {
        return block.range.clone();
    };
    let line = block.range.start.line;
    let column =
        |byte: usize| block.range.start.column + byte.saturating_sub(block.range.span.start);
    let start = source_start + error.span().start;
    let end = source_start + error.span().end;
    Range::new(
        start..end,
        Position::new(line, column(start)),
        Position::new(line, column(end)),
    )
}

impl Document {
    /// Render every equation, inline spans and equation blocks alike.
    pub fn render_equations(&self, target: MathTarget, config: &MathConfig) -> EquationReport {
        let mut report = EquationReport::default();
        let equations = self.equations();
        let mut cursor = SourceCursor::default();
        for equation in &equations {
            let source_start = cursor.source_start(equation);
            let rendered = render_equation(equation.math, target, config);
            if let Some(error) = &rendered.error {
                let range = failure_range(equation, source_start, error);
                report.diagnostics.push(Diagnostic::equation(range, error));
            }
            report.rendered.push(rendered.math);
        }
        report
    }

    /// Transpile every equation without serializing, reporting the ones that fail.
    pub fn equation_diagnostics(&self) -> Vec<Diagnostic> {
        let equations = self.equations();
        let mut cursor = SourceCursor::default();
        let mut diagnostics = Vec::new();
        for equation in &equations {
            let source_start = cursor.source_start(equation);
            if let Err(error) = crate::math::parse(&equation.math.source) {
                let range = failure_range(equation, source_start, &error);
                diagnostics.push(Diagnostic::equation(range, &error));
            }
        }
        diagnostics
    }
}

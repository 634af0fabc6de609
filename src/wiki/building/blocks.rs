//! Classified lines to blocks

use crate::wiki::ast::{Block, BlockKind, InlineMath, SourceLocation, Span};
use crate::wiki::inlines::resolve_spans;
use crate::wiki::lexing::ClassifiedLine;

/// Build one block, resolving inline spans where the kind carries them.
pub fn build_block(line: ClassifiedLine, location: &SourceLocation) -> Block {
    let spans = match &line.kind {
        BlockKind::Heading { .. } | BlockKind::Paragraph | BlockKind::ListItem { .. } => {
            resolve_spans(&line.text)
        }
        BlockKind::EquationBlock => vec![Span::Equation(InlineMath::display(line.text.clone()))],
        BlockKind::Media(_) | BlockKind::CodeBlock { .. } | BlockKind::Blank => Vec::new(),
    };
    Block {
        kind: line.kind,
        raw_text: line.text,
        spans,
        range: location.range(line.span),
        text_start: line.text_start,
    }
}

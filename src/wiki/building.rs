//! Document Model Builder
//!
//!     Consumes the classified lines of a source and assembles the [Document]. Three things
//!     happen here:
//!
//!         1. Each classified line becomes a [Block](crate::wiki::ast::Block): inline spans are
//!            resolved for headings, paragraphs and list items, an equation block gets its
//!            single display equation span.
//!         2. Byte spans become [Range](crate::wiki::ast::Range)s with line:column positions.
//!         3. Runs of list items are grouped into nested lists. See [lists].
//!
//!     A block still open at end of input is kept as a best-effort block and reported as a
//!     structural diagnostic. Equations are not transpiled here.

pub mod blocks;
pub mod lists;

pub use blocks::build_block;
pub use lists::group_lists;

use crate::wiki::ast::{Diagnostic, Document, SourceLocation};
use crate::wiki::config::ParsingConfig;
use crate::wiki::lexing::LineClassifier;

/// Build the document model of a source text. Never fails.
pub fn build_document(source: &str, config: &ParsingConfig) -> Document {
    let location = SourceLocation::new(source);
    let mut classifier = LineClassifier::new(source, *config);
    let blocks: Vec<_> = classifier
        .by_ref()
        .map(|line| build_block(line, &location))
        .collect();

    let mut diagnostics = Vec::new();
    if let Some(unterminated) = classifier.unterminated() {
        diagnostics.push(Diagnostic::structural(
            location.range(unterminated.span.clone()),
            unterminated.issue,
            unterminated.opener.clone(),
        ));
    }

    let block_count = blocks.len();
    let items = group_lists(blocks);
    log::debug!(
        "built document: {} blocks, {} items, {} diagnostics",
        block_count,
        items.len(),
        diagnostics.len()
    );
    Document { items, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::ast::{BlockKind, DiagnosticKind, DocumentItem, StructuralIssue};

    #[test]
    fn test_unterminated_block_raises_one_diagnostic() {
        let doc = build_document("text\n<code>\nline", &ParsingConfig::default());
        assert_eq!(doc.diagnostics.len(), 1);
        let diagnostic = &doc.diagnostics[0];
        assert_eq!(
            diagnostic.kind,
            DiagnosticKind::StructuralWarning(StructuralIssue::UnterminatedCodeBlock)
        );
        assert_eq!(diagnostic.snippet, "<code>");
        assert_eq!(diagnostic.range.start.line, 1);
        match &doc.items[1] {
            DocumentItem::Block(block) => {
                assert_eq!(block.kind, BlockKind::CodeBlock { language: None });
                assert_eq!(block.raw_text, "line");
            }
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_source() {
        let doc = build_document("", &ParsingConfig::default());
        assert!(doc.items.is_empty());
        assert!(doc.diagnostics.is_empty());
    }
}

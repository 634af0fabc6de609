//! Document model
//!
//! The root of a converted document: blocks in reading order, with consecutive list items
//! gathered into nested [`List`]s, plus every diagnostic raised while building it.

use super::block::{Block, BlockKind, MediaKind};
use super::diagnostics::Diagnostic;
use super::inlines::{InlineMath, Span};
use super::range::Range;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub items: Vec<DocumentItem>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "item")]
pub enum DocumentItem {
    Block(Block),
    List(List),
}

/// A run of list items at one nesting level sharing one marker kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub level: usize,
    pub items: Vec<ListItem>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub block: Block,
    /// Deeper lists that follow this item.
    pub children: Vec<List>,
}

/// An equation found in the document, with the block it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct EquationRef<'a> {
    pub math: &'a InlineMath,
    pub block: &'a Block,
}

/// Element counts for one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub headings: usize,
    pub paragraphs: usize,
    pub list_items: usize,
    pub images: usize,
    pub videos: usize,
    pub inline_equations: usize,
    pub block_equations: usize,
    pub code_blocks: usize,
    pub diagnostics: usize,
}

impl DocumentStats {
    pub fn equations(&self) -> usize {
        self.inline_equations + self.block_equations
    }
}

impl List {
    fn collect_blocks<'a>(&'a self, out: &mut Vec<&'a Block>) {
        for item in &self.items {
            out.push(&item.block);
            for child in &item.children {
                child.collect_blocks(out);
            }
        }
    }

    /// Items in this list and all nested lists.
    pub fn item_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| 1 + item.children.iter().map(List::item_count).sum::<usize>())
            .sum()
    }
}

impl Document {
    /// All blocks in reading order, list items included.
    pub fn iter_blocks(&self) -> impl Iterator<Item = &Block> {
        let mut blocks = Vec::new();
        for item in &self.items {
            match item {
                DocumentItem::Block(block) => blocks.push(block),
                DocumentItem::List(list) => list.collect_blocks(&mut blocks),
            }
        }
        blocks.into_iter()
    }

    /// Every equation in reading order: inline spans and equation blocks alike.
    pub fn equations(&self) -> Vec<EquationRef<'_>> {
        let mut equations = Vec::new();
        for block in self.iter_blocks() {
            collect_equations(&block.spans, block, &mut equations);
        }
        equations
    }

    pub fn stats(&self) -> DocumentStats {
        let mut stats = DocumentStats {
            diagnostics: self.diagnostics.len(),
            ..DocumentStats::default()
        };
        for block in self.iter_blocks() {
            match &block.kind {
                BlockKind::Heading { .. } => stats.headings += 1,
                BlockKind::Paragraph => stats.paragraphs += 1,
                BlockKind::ListItem { .. } => stats.list_items += 1,
                BlockKind::Media(media) => match media.kind {
                    MediaKind::Image { .. } => stats.images += 1,
                    MediaKind::Video { .. } => stats.videos += 1,
                },
                BlockKind::EquationBlock => {}
                BlockKind::CodeBlock { .. } => stats.code_blocks += 1,
                BlockKind::Blank => {}
            }
        }
        for equation in self.equations() {
            if equation.block.kind == BlockKind::EquationBlock {
                stats.block_equations += 1;
            } else {
                stats.inline_equations += 1;
            }
        }
        stats
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn collect_equations<'a>(spans: &'a [Span], block: &'a Block, out: &mut Vec<EquationRef<'a>>) {
    for span in spans {
        match span {
            Span::Equation(math) => out.push(EquationRef { math, block }),
            Span::Bold(children) | Span::Italic(children) | Span::Underline(children) => {
                collect_equations(children, block, out)
            }
            Span::Text(_) | Span::Link(_) => {}
        }
    }
}

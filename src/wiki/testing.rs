//! Testing utilities for document assertions
//!
//! Document tests should check the shape and content of what was built, not generalities like
//! item counts alone. Matching on nested enums by hand gets long fast:
//!
//! ```rust-example
//! match &doc.items[0] {
//!     DocumentItem::Block(block) => {
//!         assert_eq!(block.kind, BlockKind::Heading { level: 2 });
//!         assert_eq!(block.spans, vec![Span::text("Title")]);
//!     }
//!     _ => panic!("Expected block"),
//! }
//! ```
//!
//! With [assert_doc] the same test reads:
//!
//! ```rust-example
//! use wikimark::wiki::testing::assert_doc;
//!
//! assert_doc(&doc)
//!     .item_count(1)
//!     .block(0, |b| {
//!         b.heading(2).spans(&[Span::text("Title")]);
//!     })
//!     .no_diagnostics();
//! ```
//!
//! Failures name the path to the offending item (`items[2].items[0]`) and summarize what was
//! found instead.

use crate::wiki::ast::{
    Block, BlockKind, Diagnostic, DiagnosticKind, Document, DocumentItem, List, Span,
    StructuralIssue,
};

/// Create an assertion builder for a document
pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    /// Assert the number of top-level items
    pub fn item_count(self, expected: usize) -> Self {
        let actual = self.doc.items.len();
        assert_eq!(
            actual,
            expected,
            "Expected {} items, found {}: [{}]",
            expected,
            actual,
            summarize_items(&self.doc.items)
        );
        self
    }

    /// Assert the item at `index` is a block
    pub fn block<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        let context = format!("items[{index}]");
        match self.item(index) {
            DocumentItem::Block(block) => assertion(BlockAssertion { block, context }),
            DocumentItem::List(_) => panic!("{context}: expected block, found list"),
        }
        self
    }

    /// Assert the item at `index` is a list
    pub fn list<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(ListAssertion<'a>),
    {
        let context = format!("items[{index}]");
        match self.item(index) {
            DocumentItem::List(list) => assertion(ListAssertion { list, context }),
            DocumentItem::Block(block) => {
                panic!("{context}: expected list, found {}", block.kind.name())
            }
        }
        self
    }

    /// Assert block kinds in reading order, list items included
    pub fn block_kinds(self, expected: &[&str]) -> Self {
        let actual: Vec<_> = self.doc.iter_blocks().map(|b| b.kind.name()).collect();
        assert_eq!(actual, expected, "Block kinds differ");
        self
    }

    pub fn no_diagnostics(self) -> Self {
        assert!(
            self.doc.diagnostics.is_empty(),
            "Expected no diagnostics, found: {}",
            summarize_diagnostics(&self.doc.diagnostics)
        );
        self
    }

    pub fn diagnostic_count(self, expected: usize) -> Self {
        assert_eq!(
            self.doc.diagnostics.len(),
            expected,
            "Diagnostics: {}",
            summarize_diagnostics(&self.doc.diagnostics)
        );
        self
    }

    /// Assert the diagnostic at `index` is a structural warning of the given kind
    pub fn structural_warning(self, index: usize, issue: StructuralIssue) -> Self {
        let diagnostic = self.diagnostic(index);
        assert_eq!(
            diagnostic.kind,
            DiagnosticKind::StructuralWarning(issue),
            "diagnostics[{index}]: {diagnostic}"
        );
        self
    }

    fn item(&self, index: usize) -> &'a DocumentItem {
        let doc: &'a Document = self.doc;
        assert!(
            index < doc.items.len(),
            "Item index {} out of bounds (document has {} items: [{}])",
            index,
            doc.items.len(),
            summarize_items(&doc.items)
        );
        &doc.items[index]
    }

    fn diagnostic(&self, index: usize) -> &'a Diagnostic {
        let doc: &'a Document = self.doc;
        assert!(
            index < doc.diagnostics.len(),
            "Diagnostic index {} out of bounds ({} diagnostics)",
            index,
            doc.diagnostics.len()
        );
        &doc.diagnostics[index]
    }
}

pub struct BlockAssertion<'a> {
    block: &'a Block,
    context: String,
}

impl<'a> BlockAssertion<'a> {
    pub fn kind(self, expected: &BlockKind) -> Self {
        assert_eq!(&self.block.kind, expected, "{}: kind differs", self.context);
        self
    }

    pub fn heading(self, level: u8) -> Self {
        self.kind(&BlockKind::Heading { level })
    }

    pub fn paragraph(self) -> Self {
        self.kind(&BlockKind::Paragraph)
    }

    pub fn blank(self) -> Self {
        self.kind(&BlockKind::Blank)
    }

    pub fn raw_text(self, expected: &str) -> Self {
        assert_eq!(
            self.block.raw_text, expected,
            "{}: raw text differs",
            self.context
        );
        self
    }

    pub fn visible_text(self, expected: &str) -> Self {
        assert_eq!(
            self.block.visible_text(),
            expected,
            "{}: visible text differs",
            self.context
        );
        self
    }

    pub fn spans(self, expected: &[Span]) -> Self {
        assert_eq!(self.block.spans, expected, "{}: spans differ", self.context);
        self
    }

    /// Assert the block starts at the given zero-based line
    pub fn starts_at_line(self, line: usize) -> Self {
        assert_eq!(
            self.block.range.start.line, line,
            "{}: starts at {}",
            self.context, self.block.range
        );
        self
    }

    pub fn get(&self) -> &'a Block {
        self.block
    }
}

pub struct ListAssertion<'a> {
    list: &'a List,
    context: String,
}

impl<'a> ListAssertion<'a> {
    pub fn ordered(self, expected: bool) -> Self {
        assert_eq!(self.list.ordered, expected, "{}: ordered", self.context);
        self
    }

    pub fn level(self, expected: usize) -> Self {
        assert_eq!(self.list.level, expected, "{}: level", self.context);
        self
    }

    pub fn item_count(self, expected: usize) -> Self {
        assert_eq!(
            self.list.items.len(),
            expected,
            "{}: item count, items: {:?}",
            self.context,
            self.list
                .items
                .iter()
                .map(|i| i.block.raw_text.as_str())
                .collect::<Vec<_>>()
        );
        self
    }

    /// Assert on the block of the item at `index`
    pub fn item<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(BlockAssertion<'a>),
    {
        let list: &'a List = self.list;
        let context = format!("{}.items[{index}]", self.context);
        let item = list
            .items
            .get(index)
            .unwrap_or_else(|| panic!("{context}: out of bounds"));
        assertion(BlockAssertion {
            block: &item.block,
            context,
        });
        self
    }

    /// Assert on the `child`-th nested list under the item at `index`
    pub fn nested<F>(self, index: usize, child: usize, assertion: F) -> Self
    where
        F: FnOnce(ListAssertion<'a>),
    {
        let list: &'a List = self.list;
        let context = format!("{}.items[{index}].children[{child}]", self.context);
        let nested = list
            .items
            .get(index)
            .and_then(|item| item.children.get(child))
            .unwrap_or_else(|| panic!("{context}: out of bounds"));
        assertion(ListAssertion {
            list: nested,
            context,
        });
        self
    }
}

fn summarize_items(items: &[DocumentItem]) -> String {
    items
        .iter()
        .map(|item| match item {
            DocumentItem::Block(block) => block.kind.name().to_string(),
            DocumentItem::List(list) => format!("list({})", list.items.len()),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn summarize_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(Diagnostic::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

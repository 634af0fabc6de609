//! List grouping
//!
//! Consecutive list-item blocks become nested [`List`]s. An item deeper than the one before
//! it opens a child list under that item; a shallower one closes lists until its level is
//! reached. At one level, a change between `*` and `-` starts a sibling list. Any other block,
//! blank lines included, ends the run.

use crate::wiki::ast::{Block, BlockKind, DocumentItem, List, ListItem, Range};
use std::iter::{once, Peekable};
use std::vec::IntoIter;

/// Gather list items into lists, leaving every other block in place.
pub fn group_lists(blocks: Vec<Block>) -> Vec<DocumentItem> {
    let mut items = Vec::new();
    let mut run: Vec<Block> = Vec::new();
    for block in blocks {
        if marker(&block).is_some() {
            run.push(block);
            continue;
        }
        flush_run(&mut run, &mut items);
        items.push(DocumentItem::Block(block));
    }
    flush_run(&mut run, &mut items);
    items
}

fn flush_run(run: &mut Vec<Block>, items: &mut Vec<DocumentItem>) {
    if run.is_empty() {
        return;
    }
    let mut blocks = std::mem::take(run).into_iter().peekable();
    items.extend(collect_lists(&mut blocks, 1).into_iter().map(DocumentItem::List));
}

fn marker(block: &Block) -> Option<(usize, bool)> {
    match block.kind {
        BlockKind::ListItem { level, ordered } => Some((level, ordered)),
        _ => None,
    }
}

/// Lists whose items sit at `min_level` or deeper, until a shallower item appears.
fn collect_lists(blocks: &mut Peekable<IntoIter<Block>>, min_level: usize) -> Vec<List> {
    let mut lists = Vec::new();
    while let Some((level, ordered)) = blocks.peek().and_then(marker) {
        if level < min_level {
            break;
        }
        let mut items: Vec<ListItem> = Vec::new();
        while let Some((next_level, next_ordered)) = blocks.peek().and_then(marker) {
            if next_level > level && !items.is_empty() {
                let children = collect_lists(blocks, level + 1);
                if let Some(last) = items.last_mut() {
                    last.children.extend(children);
                }
                continue;
            }
            if next_level != level || next_ordered != ordered {
                break;
            }
            if let Some(block) = blocks.next() {
                items.push(ListItem {
                    block,
                    children: Vec::new(),
                });
            }
        }
        let range = list_range(&items);
        lists.push(List {
            ordered,
            level,
            items,
            range,
        });
    }
    lists
}

fn list_range(items: &[ListItem]) -> Range {
    let ranges = items.iter().flat_map(|item| {
        once(&item.block.range).chain(item.children.iter().map(|child| &child.range))
    });
    Range::bounding_box(ranges).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::ast::Position;

    fn item(text: &str, level: usize, ordered: bool, line: usize) -> Block {
        Block {
            kind: BlockKind::ListItem { level, ordered },
            raw_text: text.to_string(),
            spans: Vec::new(),
            range: Range::new(0..0, Position::new(line, 0), Position::new(line, 4)),
            text_start: 0,
        }
    }

    fn blank() -> Block {
        Block {
            kind: BlockKind::Blank,
            raw_text: String::new(),
            spans: Vec::new(),
            range: Range::default(),
            text_start: 0,
        }
    }

    fn texts(list: &List) -> Vec<&str> {
        list.items
            .iter()
            .map(|i| i.block.raw_text.as_str())
            .collect()
    }

    fn as_list(item: &DocumentItem) -> &List {
        match item {
            DocumentItem::List(list) => list,
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_levels() {
        let items = group_lists(vec![
            item("a", 1, false, 0),
            item("a.1", 2, false, 1),
            item("a.2", 2, false, 2),
            item("b", 1, false, 3),
        ]);
        assert_eq!(items.len(), 1);
        let list = as_list(&items[0]);
        assert_eq!(texts(list), vec!["a", "b"]);
        assert_eq!(list.items[0].children.len(), 1);
        assert_eq!(texts(&list.items[0].children[0]), vec!["a.1", "a.2"]);
        assert_eq!(list.item_count(), 4);
        assert_eq!(list.range.start, Position::new(0, 0));
        assert_eq!(list.range.end, Position::new(3, 4));
    }

    #[test]
    fn test_marker_change_starts_sibling_list() {
        let items = group_lists(vec![
            item("a", 1, false, 0),
            item("one", 1, true, 1),
            item("two", 1, true, 2),
        ]);
        assert_eq!(items.len(), 2);
        assert!(!as_list(&items[0]).ordered);
        assert!(as_list(&items[1]).ordered);
        assert_eq!(texts(as_list(&items[1])), vec!["one", "two"]);
    }

    #[test]
    fn test_blank_line_separates_lists() {
        let items = group_lists(vec![
            item("a", 1, false, 0),
            blank(),
            item("b", 1, false, 2),
        ]);
        assert_eq!(items.len(), 3);
        assert!(matches!(&items[1], DocumentItem::Block(b) if b.is_blank()));
    }

    #[test]
    fn test_run_starting_deep_keeps_its_level() {
        let items = group_lists(vec![item("deep", 3, false, 0), item("top", 1, false, 1)]);
        assert_eq!(items.len(), 2);
        assert_eq!(as_list(&items[0]).level, 3);
        assert_eq!(as_list(&items[1]).level, 1);
    }
}

//! Line Classification
//!
//! Stateless rules deciding what a single line is when no multi-line construct is open. The
//! state machine in [`super::state_machine`] decides when these rules apply at all.
//!
//! Rules are tried in a fixed order so overlapping patterns resolve the same way every time:
//! blank, code opener, equation opener, heading, media, list item, paragraph.

use crate::wiki::config::ParsingConfig;
use once_cell::sync::Lazy;
use regex::Regex;

static CODE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*<(code|file)(?:\s+([^>]*))?>(.*)$").unwrap());
static BACKTICK_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*```\s*([A-Za-z0-9_+#.-]*)\s*$").unwrap());
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(=+)\s*(.+?)\s*(=+)\s*$").unwrap());
static MEDIA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\{\{(.+?)\}\}\s*$").unwrap());
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([ \t]+)([*-])[ \t]+(.*)$").unwrap());

/// Which closer ends a code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fence {
    /// `<code ..>` .. `</code>`
    Code,
    /// `<file ..>` .. `</file>`
    File,
    /// A line of three backticks.
    Backticks,
}

impl Fence {
    pub fn closer(&self) -> &'static str {
        match self {
            Fence::Code => "</code>",
            Fence::File => "</file>",
            Fence::Backticks => "```",
        }
    }
}

/// The shape of one line seen in isolation. Text slices borrow from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineType<'a> {
    Blank,
    Heading {
        level: u8,
        text: &'a str,
    },
    ListItem {
        level: usize,
        ordered: bool,
        text: &'a str,
    },
    Media {
        inner: &'a str,
    },
    /// `rest` is whatever follows the opener on the same line.
    CodeOpen {
        fence: Fence,
        language: Option<String>,
        rest: &'a str,
    },
    /// `rest` is whatever follows the leading `$$`.
    EquationOpen {
        rest: &'a str,
    },
    Paragraph {
        text: &'a str,
    },
}

/// Classify a line (without its line terminator).
pub fn classify_line<'a>(line: &'a str, config: &ParsingConfig) -> LineType<'a> {
    if line.trim().is_empty() {
        return LineType::Blank;
    }
    if let Some(open) = code_open(line) {
        return open;
    }
    if let Some(rest) = line.trim_start().strip_prefix("$$") {
        return LineType::EquationOpen { rest };
    }
    if let Some(heading) = heading(line, config) {
        return heading;
    }
    if let Some(caps) = MEDIA.captures(line) {
        if let Some(inner) = caps.get(1).map(|m| m.as_str()) {
            if !inner.contains("{{") && !inner.contains("}}") {
                return LineType::Media { inner };
            }
        }
    }
    if let Some(item) = list_item(line, config) {
        return item;
    }
    LineType::Paragraph { text: line.trim() }
}

fn code_open(line: &str) -> Option<LineType<'_>> {
    if let Some(caps) = CODE_OPEN.captures(line) {
        let fence = match caps.get(1)?.as_str() {
            "file" => Fence::File,
            _ => Fence::Code,
        };
        let language = caps
            .get(2)
            .and_then(|attrs| attrs.as_str().split_whitespace().next())
            .filter(|lang| *lang != "-")
            .map(str::to_string);
        let rest = caps.get(3).map_or("", |m| m.as_str());
        return Some(LineType::CodeOpen {
            fence,
            language,
            rest,
        });
    }
    let caps = BACKTICK_FENCE.captures(line)?;
    let language = caps
        .get(1)
        .map(|m| m.as_str())
        .filter(|lang| !lang.is_empty())
        .map(str::to_string);
    Some(LineType::CodeOpen {
        fence: Fence::Backticks,
        language,
        rest: "",
    })
}

fn heading<'a>(line: &'a str, config: &ParsingConfig) -> Option<LineType<'a>> {
    let caps = HEADING.captures(line)?;
    let text = caps.get(2)?.as_str();
    if text.chars().all(|c| c == '=') {
        return None;
    }
    let run = caps.get(1)?.as_str().len();
    let max = config.max_heading_level.max(1);
    let level = u8::try_from(run).unwrap_or(u8::MAX).clamp(1, max);
    Some(LineType::Heading { level, text })
}

fn list_item<'a>(line: &'a str, config: &ParsingConfig) -> Option<LineType<'a>> {
    let caps = LIST_ITEM.captures(line)?;
    let unit = config.indent_unit();
    let width: usize = caps
        .get(1)?
        .as_str()
        .chars()
        .map(|c| if c == '\t' { unit } else { 1 })
        .sum();
    let level = width / unit;
    if level == 0 {
        return None;
    }
    let ordered = caps.get(2)?.as_str() == "-";
    let text = caps.get(3).map_or("", |m| m.as_str().trim_end());
    Some(LineType::ListItem {
        level,
        ordered,
        text,
    })
}

/// True when a `//` at byte `index` is part of a URL scheme (`http://`).
pub fn is_url_slashes(text: &str, index: usize) -> bool {
    text[..index].ends_with(':')
}

use super::links::parse_link;
use crate::wiki::ast::{InlineMath, Span};
use crate::wiki::lexing::line_classification::is_url_slashes;

/// Characters a backslash turns into literal text.
const ESCAPABLE: &[char] = &['*', '/', '_', '[', ']', '{', '}', '$', '%', '\\'];

/// Resolve the inline spans of one line of text.
pub fn resolve_spans(text: &str) -> Vec<Span> {
    let mut stack = vec![InlineFrame::new(FrameKind::Root)];

    let mut i = 0;
    while i < text.len() {
        let rest = &text[i..];

        // Escapes and literal runs first so escaped markers never touch the stack.
        if let Some(escaped) = rest
            .strip_prefix('\\')
            .and_then(|after| after.chars().next())
            .filter(|c| ESCAPABLE.contains(c))
        {
            top(&mut stack).push_char(escaped);
            i += 1 + escaped.len_utf8();
            continue;
        }
        if let Some((literal, consumed)) = delimited(rest, "%%", "%%") {
            top(&mut stack).push_str(literal);
            i += consumed;
            continue;
        }
        if let Some((inner, consumed)) = delimited(rest, "[[", "]]") {
            top(&mut stack).push_node(Span::Link(parse_link(inner)));
            i += consumed;
            continue;
        }
        if let Some((source, consumed)) = equation(rest, "$$") {
            top(&mut stack).push_node(Span::Equation(InlineMath::display(source)));
            i += consumed;
            continue;
        }
        if let Some((source, consumed)) = equation(rest, "$") {
            top(&mut stack).push_node(Span::Equation(InlineMath::inline(source)));
            i += consumed;
            continue;
        }

        if let Some(kind) = FrameKind::from_marker(rest) {
            if kind == FrameKind::Italic && is_url_slashes(text, i) {
                top(&mut stack).push_str(kind.marker());
            } else if let Some(open) = stack.iter().rposition(|frame| frame.kind == kind) {
                close_frame(&mut stack, open);
            } else {
                top(&mut stack).flush_buffer();
                stack.push(InlineFrame::new(kind));
            }
            i += kind.marker().len();
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        top(&mut stack).push_char(ch);
        i += ch.len_utf8();
    }

    while stack.len() > 1 {
        unwind_top(&mut stack);
    }
    let mut root = stack
        .pop()
        .unwrap_or_else(|| InlineFrame::new(FrameKind::Root));
    root.flush_buffer();
    root.children
}

fn top(stack: &mut [InlineFrame]) -> &mut InlineFrame {
    // The root frame is never popped inside the scan loop.
    let last = stack.len() - 1;
    &mut stack[last]
}

/// Close the frame at `index`. Frames opened after it become literal text.
fn close_frame(stack: &mut Vec<InlineFrame>, index: usize) {
    while stack.len() > index + 1 {
        unwind_top(stack);
    }
    let Some(mut frame) = stack.pop() else {
        return;
    };
    frame.flush_buffer();
    let parent = top(stack);
    if frame.children.is_empty() {
        // No content, both markers are literal.
        parent.push_str(frame.kind.marker());
        parent.push_str(frame.kind.marker());
    } else if let Some(span) = frame.into_span() {
        parent.push_node(span);
    }
}

/// Pop the top frame back into its parent as its marker followed by its content.
fn unwind_top(stack: &mut Vec<InlineFrame>) {
    let Some(mut frame) = stack.pop() else {
        return;
    };
    frame.flush_buffer();
    let parent = top(stack);
    parent.push_str(frame.kind.marker());
    for child in frame.children {
        parent.push_node(child);
    }
}

/// `open .. close` at the start of `rest`: the inside and the bytes consumed.
fn delimited<'a>(rest: &'a str, open: &str, close: &str) -> Option<(&'a str, usize)> {
    let body = rest.strip_prefix(open)?;
    let end = body.find(close)?;
    if end == 0 {
        return None;
    }
    Some((&body[..end], open.len() + end + close.len()))
}

/// An equation is kept raw: no brace balancing, but it never spans a `$` or is empty.
fn equation<'a>(rest: &'a str, delimiter: &str) -> Option<(&'a str, usize)> {
    let (source, consumed) = delimited(rest, delimiter, delimiter)?;
    if source.contains('$') || source.trim().is_empty() {
        return None;
    }
    Some((source, consumed))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Root,
    Bold,
    Italic,
    Underline,
}

impl FrameKind {
    fn from_marker(rest: &str) -> Option<Self> {
        if rest.starts_with("**") {
            Some(FrameKind::Bold)
        } else if rest.starts_with("//") {
            Some(FrameKind::Italic)
        } else if rest.starts_with("__") {
            Some(FrameKind::Underline)
        } else {
            None
        }
    }

    fn marker(self) -> &'static str {
        match self {
            FrameKind::Root => "",
            FrameKind::Bold => "**",
            FrameKind::Italic => "//",
            FrameKind::Underline => "__",
        }
    }
}

struct InlineFrame {
    kind: FrameKind,
    buffer: String,
    children: Vec<Span>,
}

impl InlineFrame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            buffer: String::new(),
            children: Vec::new(),
        }
    }

    fn push_char(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        if let Some(Span::Text(existing)) = self.children.last_mut() {
            existing.push_str(&text);
        } else {
            self.children.push(Span::Text(text));
        }
    }

    fn push_node(&mut self, node: Span) {
        self.flush_buffer();
        match node {
            Span::Text(text) => {
                if text.is_empty() {
                    return;
                }
                if let Some(Span::Text(existing)) = self.children.last_mut() {
                    existing.push_str(&text);
                } else {
                    self.children.push(Span::Text(text));
                }
            }
            other => self.children.push(other),
        }
    }

    fn into_span(self) -> Option<Span> {
        match self.kind {
            FrameKind::Root => None,
            FrameKind::Bold => Some(Span::Bold(self.children)),
            FrameKind::Italic => Some(Span::Italic(self.children)),
            FrameKind::Underline => Some(Span::Underline(self.children)),
        }
    }
}

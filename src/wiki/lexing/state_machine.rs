//! Line-State Machine
//!
//! Three states: `Idle`, `InCodeBlock` and `InEquationBlock`. In `Idle` every line is
//! classified on its own by [`classify_line`]; an opener moves into one of the block states,
//! where lines accumulate verbatim until the matching closer. Blank lines never change state.
//!
//!     Idle --code opener--> InCodeBlock --matching closer--> Idle
//!     Idle --`$$`---------> InEquationBlock --`$$`--------> Idle
//!
//! Input that ends inside a block is not an error: [`LineStateMachine::finish`] emits the
//! partial block and reports it as [`Unterminated`].

use super::line_classification::{classify_line, Fence, LineType};
use crate::wiki::ast::{BlockKind, MediaRef, StructuralIssue};
use crate::wiki::config::ParsingConfig;
use std::collections::VecDeque;
use std::ops::Range;
use std::str::SplitInclusive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineState {
    Idle,
    InCodeBlock {
        fence: Fence,
        language: Option<String>,
    },
    InEquationBlock,
}

/// One classified unit. Multi-line blocks arrive as a single line spanning all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub kind: BlockKind,
    /// Block content with line markers removed.
    pub text: String,
    /// Byte range in the source.
    pub span: Range<usize>,
    /// Byte offset where `text` begins in the source. Multi-line blocks use their start.
    pub text_start: usize,
}

/// Result of feeding one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The line extended the open block.
    Continuation,
    /// The line completed one or more units.
    Emit(Vec<ClassifiedLine>),
}

/// A block still open at end of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unterminated {
    pub issue: StructuralIssue,
    /// The opener line as written.
    pub opener: String,
    pub span: Range<usize>,
}

#[derive(Debug)]
struct OpenBlock {
    opener: String,
    opener_span: Range<usize>,
    body: Vec<String>,
    end: usize,
}

#[derive(Debug)]
pub struct LineStateMachine {
    state: LineState,
    config: ParsingConfig,
    open: Option<OpenBlock>,
}

impl LineStateMachine {
    pub fn new(config: ParsingConfig) -> Self {
        Self {
            state: LineState::Idle,
            config,
            open: None,
        }
    }

    pub fn state(&self) -> &LineState {
        &self.state
    }

    /// Feed one line (terminator stripped) starting at byte `start` of the source.
    pub fn step(&mut self, line: &str, start: usize) -> Step {
        let span = start..start + line.len();
        match self.state.clone() {
            LineState::Idle => self.step_idle(line, span),
            LineState::InCodeBlock { fence, language } => {
                self.step_code(line, span, fence, language)
            }
            LineState::InEquationBlock => self.step_equation(line, span),
        }
    }

    fn step_idle(&mut self, line: &str, span: Range<usize>) -> Step {
        let emit = |kind: BlockKind, text: &str| {
            Step::Emit(vec![ClassifiedLine {
                kind,
                text: text.to_string(),
                span: span.clone(),
                text_start: span.start + offset_within(line, text),
            }])
        };
        match classify_line(line, &self.config) {
            LineType::Blank => emit(BlockKind::Blank, ""),
            LineType::Heading { level, text } => emit(BlockKind::Heading { level }, text),
            LineType::ListItem {
                level,
                ordered,
                text,
            } => emit(BlockKind::ListItem { level, ordered }, text),
            LineType::Media { inner } => emit(BlockKind::Media(MediaRef::parse(inner)), inner),
            LineType::Paragraph { text } => emit(BlockKind::Paragraph, text),
            LineType::CodeOpen {
                fence,
                language,
                rest,
            } => {
                let rest_start = span.end - rest.len();
                // Backtick fences never close on their opening line.
                if fence != Fence::Backticks {
                    if let Some(index) = rest.find(fence.closer()) {
                        let body = &rest[..index];
                        let after = rest_start + index + fence.closer().len();
                        let mut lines = vec![ClassifiedLine {
                            kind: BlockKind::CodeBlock { language },
                            text: body.to_string(),
                            span: span.start..after,
                            text_start: rest_start,
                        }];
                        lines.extend(trailing_paragraph(line, span.start, after));
                        return Step::Emit(lines);
                    }
                }
                log::trace!("code block opened at byte {}", span.start);
                self.state = LineState::InCodeBlock { fence, language };
                self.open = Some(OpenBlock {
                    opener: line.trim().to_string(),
                    opener_span: span.clone(),
                    body: if rest.is_empty() {
                        Vec::new()
                    } else {
                        vec![rest.to_string()]
                    },
                    end: span.end,
                });
                Step::Continuation
            }
            LineType::EquationOpen { rest } => {
                let rest_start = span.end - rest.len();
                if let Some(index) = rest.find("$$") {
                    let after = rest_start + index + 2;
                    let mut lines = vec![ClassifiedLine {
                        kind: BlockKind::EquationBlock,
                        text: rest[..index].trim().to_string(),
                        span: span.start..after,
                        text_start: rest_start,
                    }];
                    lines.extend(trailing_paragraph(line, span.start, after));
                    return Step::Emit(lines);
                }
                log::trace!("equation block opened at byte {}", span.start);
                self.state = LineState::InEquationBlock;
                self.open = Some(OpenBlock {
                    opener: line.trim().to_string(),
                    opener_span: span.clone(),
                    body: if rest.trim().is_empty() {
                        Vec::new()
                    } else {
                        vec![rest.to_string()]
                    },
                    end: span.end,
                });
                Step::Continuation
            }
        }
    }

    fn step_code(
        &mut self,
        line: &str,
        span: Range<usize>,
        fence: Fence,
        language: Option<String>,
    ) -> Step {
        let closed_at = match fence {
            Fence::Backticks => (line.trim() == "```").then_some((0, line.len())),
            Fence::Code | Fence::File => line
                .find(fence.closer())
                .map(|index| (index, index + fence.closer().len())),
        };
        let Some((body_end, after)) = closed_at else {
            self.push_body(line, span.end);
            return Step::Continuation;
        };
        if fence != Fence::Backticks && !line[..body_end].is_empty() {
            self.push_body(&line[..body_end], span.start + body_end);
        }
        let Some(open) = self.open.take() else {
            self.state = LineState::Idle;
            return Step::Continuation;
        };
        log::trace!("code block closed at byte {}", span.start + after);
        self.state = LineState::Idle;
        let mut lines = vec![ClassifiedLine {
            kind: BlockKind::CodeBlock { language },
            text: open.body.join("\n"),
            span: open.opener_span.start..span.start + after,
            text_start: open.opener_span.start,
        }];
        lines.extend(trailing_paragraph(line, span.start, span.start + after));
        Step::Emit(lines)
    }

    fn step_equation(&mut self, line: &str, span: Range<usize>) -> Step {
        let Some(index) = line.find("$$") else {
            self.push_body(line, span.end);
            return Step::Continuation;
        };
        if !line[..index].trim().is_empty() {
            self.push_body(&line[..index], span.start + index);
        }
        let after = span.start + index + 2;
        let Some(open) = self.open.take() else {
            self.state = LineState::Idle;
            return Step::Continuation;
        };
        log::trace!("equation block closed at byte {after}");
        self.state = LineState::Idle;
        let mut lines = vec![ClassifiedLine {
            kind: BlockKind::EquationBlock,
            text: open.body.join("\n").trim().to_string(),
            span: open.opener_span.start..after,
            text_start: open.opener_span.start,
        }];
        lines.extend(trailing_paragraph(line, span.start, after));
        Step::Emit(lines)
    }

    fn push_body(&mut self, text: &str, end: usize) {
        if let Some(open) = self.open.as_mut() {
            open.body.push(text.to_string());
            open.end = end;
        }
    }

    /// End of input. Flushes an open block as best-effort content.
    pub fn finish(&mut self) -> (Vec<ClassifiedLine>, Option<Unterminated>) {
        let state = std::mem::replace(&mut self.state, LineState::Idle);
        let Some(open) = self.open.take() else {
            return (Vec::new(), None);
        };
        let (kind, text, issue) = match state {
            LineState::Idle => return (Vec::new(), None),
            LineState::InCodeBlock { language, .. } => (
                BlockKind::CodeBlock { language },
                open.body.join("\n"),
                StructuralIssue::UnterminatedCodeBlock,
            ),
            LineState::InEquationBlock => (
                BlockKind::EquationBlock,
                open.body.join("\n").trim().to_string(),
                StructuralIssue::UnterminatedEquationBlock,
            ),
        };
        log::debug!("{issue:?} opened at byte {}", open.opener_span.start);
        let line = ClassifiedLine {
            kind,
            text,
            span: open.opener_span.start..open.end,
            text_start: open.opener_span.start,
        };
        let unterminated = Unterminated {
            issue,
            opener: open.opener,
            span: open.opener_span,
        };
        (vec![line], Some(unterminated))
    }
}

/// Text left on a line after a closing delimiter becomes its own paragraph.
fn trailing_paragraph(line: &str, line_start: usize, after: usize) -> Option<ClassifiedLine> {
    let rest = &line[after - line_start..];
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    let leading = rest.len() - rest.trim_start().len();
    let start = after + leading;
    Some(ClassifiedLine {
        kind: BlockKind::Paragraph,
        text: text.to_string(),
        span: start..start + text.len(),
        text_start: start,
    })
}

/// Byte offset of `part` within `line`, where `part` borrows from `line`.
fn offset_within(line: &str, part: &str) -> usize {
    (part.as_ptr() as usize)
        .checked_sub(line.as_ptr() as usize)
        .filter(|offset| *offset <= line.len())
        .unwrap_or(0)
}

/// Drives a [`LineStateMachine`] over a whole source text.
///
/// Iterates classified units in source order. After the iterator is exhausted,
/// [`LineClassifier::unterminated`] tells whether input ended inside a block.
pub struct LineClassifier<'a> {
    lines: SplitInclusive<'a, char>,
    offset: usize,
    machine: LineStateMachine,
    queue: VecDeque<ClassifiedLine>,
    finished: bool,
    unterminated: Option<Unterminated>,
}

impl<'a> LineClassifier<'a> {
    pub fn new(source: &'a str, config: ParsingConfig) -> Self {
        Self {
            lines: source.split_inclusive('\n'),
            offset: 0,
            machine: LineStateMachine::new(config),
            queue: VecDeque::new(),
            finished: false,
            unterminated: None,
        }
    }

    pub fn unterminated(&self) -> Option<&Unterminated> {
        self.unterminated.as_ref()
    }
}

impl Iterator for LineClassifier<'_> {
    type Item = ClassifiedLine;

    fn next(&mut self) -> Option<ClassifiedLine> {
        loop {
            if let Some(line) = self.queue.pop_front() {
                return Some(line);
            }
            if self.finished {
                return None;
            }
            match self.lines.next() {
                Some(raw) => {
                    let start = self.offset;
                    self.offset += raw.len();
                    let line = raw
                        .strip_suffix('\n')
                        .map(|l| l.strip_suffix('\r').unwrap_or(l))
                        .unwrap_or(raw);
                    if let Step::Emit(lines) = self.machine.step(line, start) {
                        self.queue.extend(lines);
                    }
                }
                None => {
                    self.finished = true;
                    let (lines, unterminated) = self.machine.finish();
                    self.queue.extend(lines);
                    self.unterminated = unterminated;
                }
            }
        }
    }
}

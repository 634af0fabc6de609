//! Recursive descent parser for equation source
//!
//! Grammar, one token of lookahead, no backtracking:
//!
//!     sequence := term*
//!     term     := atom (('^' | '_') argument)*
//!     argument := '{' sequence '}' | single-token atom
//!     atom     := '{' sequence '}' | number | letter | operator | control-symbol | command
//!
//! A brace group holding exactly one node is that node, so `\frac{a}{b}` is a fraction of two
//! symbols rather than of two one-element groups. Single-token arguments take exactly one
//! digit: `\frac12` is one half, and `x^23` raises only the `2`.
//!
//! The parser pulls tokens from the logos lexer on demand instead of tokenizing up front.
//! Upright text (`\text{..}`) is taken verbatim from the source, so its body may hold
//! characters the tokenizer would reject, such as `%` or `#`.

use super::ast::{AccentKind, MathNode};
use super::error::MathError;
use super::symbols::{self, SymbolClass};
use super::token::Token;
use logos::{Lexer, Logos};
use std::ops::Range;

/// Nesting limit for groups and arguments.
const MAX_DEPTH: usize = 128;

const FRACTIONS: &[&str] = &["frac", "dfrac", "tfrac"];

const TEXT_COMMANDS: &[&str] = &["text", "textrm", "mathrm", "operatorname", "mbox"];

const SIZING: &[&str] = &[
    "left", "right", "middle", "big", "Big", "bigg", "Bigg", "bigl", "bigr", "Bigl", "Bigr",
    "biggl", "biggr", "Biggl", "Biggr",
];

/// Real LaTeX outside the supported subset.
const UNSUPPORTED: &[&str] = &[
    "begin",
    "end",
    "binom",
    "choose",
    "over",
    "atop",
    "mathbf",
    "boldsymbol",
    "mathcal",
    "mathbb",
    "mathit",
    "mathsf",
    "mathtt",
    "mathfrak",
    "color",
    "textcolor",
    "textbf",
    "textit",
    "matrix",
    "pmatrix",
    "bmatrix",
    "cases",
    "array",
    "overbrace",
    "underbrace",
    "overset",
    "underset",
    "stackrel",
    "displaystyle",
    "textstyle",
    "scriptstyle",
    "limits",
    "nolimits",
    "newcommand",
    "renewcommand",
    "def",
    "label",
    "tag",
    "nonumber",
    "notag",
    "hline",
    "phantom",
    "hspace",
    "vspace",
];

type Spanned = (Token, Range<usize>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    EndOfInput,
    Brace,
    Bracket,
}

/// Parse equation source into a Math AST.
pub fn parse(source: &str) -> Result<MathNode, MathError> {
    let mut parser = Parser::new(source);
    let nodes = parser.parse_sequence(Terminator::EndOfInput, 0, 0)?;
    Ok(MathNode::from_sequence(nodes))
}

struct Parser<'a> {
    source: &'a str,
    lexer: Lexer<'a, Token>,
    peeked: Option<Option<Spanned>>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: Token::lexer(source),
            peeked: None,
        }
    }

    fn lex_next(&mut self) -> Result<Option<Spanned>, MathError> {
        match self.lexer.next() {
            None => Ok(None),
            Some(Ok(token)) => Ok(Some((token, self.lexer.span()))),
            Some(Err(())) => Err(self.unsupported(self.lexer.span())),
        }
    }

    fn peek(&mut self) -> Result<Option<Spanned>, MathError> {
        if self.peeked.is_none() {
            let next = self.lex_next()?;
            self.peeked = Some(next);
        }
        Ok(self.peeked.clone().flatten())
    }

    fn advance(&mut self) -> Result<Option<Spanned>, MathError> {
        match self.peeked.take() {
            Some(next) => Ok(next),
            None => self.lex_next(),
        }
    }

    fn unsupported(&self, span: Range<usize>) -> MathError {
        MathError::UnsupportedConstruct {
            snippet: self.source[span.clone()].to_string(),
            span,
        }
    }

    fn unbalanced_from(&self, open: usize) -> MathError {
        MathError::UnbalancedGroup {
            snippet: self.source[open..].to_string(),
            span: open..self.source.len(),
        }
    }

    fn check_depth(&self, depth: usize, span: &Range<usize>) -> Result<(), MathError> {
        if depth > MAX_DEPTH {
            return Err(self.unsupported(span.clone()));
        }
        Ok(())
    }

    /// Parse terms until the terminator. `open` is the byte offset of the opening delimiter.
    fn parse_sequence(
        &mut self,
        terminator: Terminator,
        open: usize,
        depth: usize,
    ) -> Result<Vec<MathNode>, MathError> {
        let mut nodes = Vec::new();
        loop {
            let Some((token, span)) = self.peek()? else {
                return match terminator {
                    Terminator::EndOfInput => Ok(nodes),
                    Terminator::Brace | Terminator::Bracket => Err(self.unbalanced_from(open)),
                };
            };
            match (&token, terminator) {
                (Token::CloseBrace, Terminator::Brace)
                | (Token::CloseBracket, Terminator::Bracket) => {
                    self.advance()?;
                    return Ok(nodes);
                }
                (Token::CloseBrace, _) => {
                    return Err(MathError::UnbalancedGroup {
                        snippet: "}".to_string(),
                        span,
                    })
                }
                _ => {}
            }
            self.advance()?;
            nodes.push(self.parse_term((token, span), depth)?);
        }
    }

    fn parse_term(&mut self, first: Spanned, depth: usize) -> Result<MathNode, MathError> {
        let (mut node, mut pending) = match first.0 {
            Token::Caret | Token::Underscore => (MathNode::group(Vec::new()), Some(first)),
            _ => (self.parse_atom(first, depth)?, None),
        };
        // Each script wraps the term one level deeper, so the chain counts toward the limit.
        let mut chain = 0;
        loop {
            let marker = match pending.take() {
                Some(marker) => marker,
                None => match self.peek()? {
                    Some((Token::Caret | Token::Underscore, _)) => match self.advance()? {
                        Some(marker) => marker,
                        None => break,
                    },
                    _ => break,
                },
            };
            let (token, span) = marker;
            chain += 1;
            if token == Token::Caret {
                let exponent = self.parse_argument(span, depth + chain)?;
                node = MathNode::superscript(node, exponent);
            } else {
                let index = self.parse_argument(span, depth + chain)?;
                node = MathNode::subscript(node, index);
            }
        }
        Ok(node)
    }

    /// The argument of a command or script marker: a brace group or one token. Running out
    /// of input fails on the command itself.
    fn parse_argument(
        &mut self,
        command_span: Range<usize>,
        depth: usize,
    ) -> Result<MathNode, MathError> {
        self.check_depth(depth, &command_span)?;
        match self.advance()? {
            None | Some((Token::CloseBrace | Token::Caret | Token::Underscore, _)) => {
                Err(self.unsupported(command_span))
            }
            Some((Token::OpenBrace, span)) => {
                let nodes = self.parse_sequence(Terminator::Brace, span.start, depth + 1)?;
                Ok(MathNode::from_sequence(nodes))
            }
            Some((Token::Digit(digit), _)) => Ok(MathNode::number(digit.to_string())),
            Some(token) => self.parse_atom(token, depth + 1),
        }
    }

    fn parse_atom(&mut self, (token, span): Spanned, depth: usize) -> Result<MathNode, MathError> {
        self.check_depth(depth, &span)?;
        match token {
            Token::OpenBrace => {
                let nodes = self.parse_sequence(Terminator::Brace, span.start, depth + 1)?;
                Ok(MathNode::from_sequence(nodes))
            }
            Token::CloseBrace => Err(MathError::UnbalancedGroup {
                snippet: "}".to_string(),
                span,
            }),
            Token::OpenBracket => Ok(MathNode::operator("[")),
            Token::CloseBracket => Ok(MathNode::operator("]")),
            Token::Caret | Token::Underscore | Token::Ampersand => Err(self.unsupported(span)),
            Token::Digit(digit) => self.parse_number(digit),
            Token::Letter(letter) => Ok(MathNode::symbol(letter.to_string())),
            Token::Operator(op) => Ok(MathNode::operator(op.to_string())),
            Token::Unicode(ch) if ch.is_alphabetic() => Ok(MathNode::symbol(ch.to_string())),
            Token::Unicode(ch) => Ok(MathNode::operator(ch.to_string())),
            Token::ControlSymbol('\\') => Err(self.unsupported(span)),
            Token::ControlSymbol(ch) => {
                let key = format!("\\{ch}");
                match symbols::lookup(&key) {
                    Some(info) => Ok(classify(key, info.class)),
                    None => Err(MathError::UnknownCommand {
                        name: ch.to_string(),
                        span,
                    }),
                }
            }
            Token::Command(name) => self.parse_command(name, span, depth),
        }
    }

    /// Digits merge into one number, with at most one decimal point between digits.
    fn parse_number(&mut self, first: char) -> Result<MathNode, MathError> {
        let mut text = String::from(first);
        let mut seen_point = false;
        loop {
            match self.peek()? {
                Some((Token::Digit(digit), _)) => {
                    self.advance()?;
                    text.push(digit);
                }
                Some((Token::Operator('.'), span))
                    if !seen_point && self.source[span.end..].starts_with(|c: char| c.is_ascii_digit()) =>
                {
                    self.advance()?;
                    seen_point = true;
                    text.push('.');
                }
                _ => break,
            }
        }
        Ok(MathNode::number(text))
    }

    fn parse_command(
        &mut self,
        name: String,
        span: Range<usize>,
        depth: usize,
    ) -> Result<MathNode, MathError> {
        let command = format!("\\{name}");
        let name = name.as_str();

        if FRACTIONS.contains(&name) {
            let numerator = self.parse_argument(span.clone(), depth + 1)?;
            let denominator = self.parse_argument(span, depth + 1)?;
            return Ok(MathNode::fraction(numerator, denominator));
        }
        if name == "sqrt" {
            let degree = match self.peek()? {
                Some((Token::OpenBracket, open)) => {
                    self.advance()?;
                    let nodes = self.parse_sequence(Terminator::Bracket, open.start, depth + 1)?;
                    Some(MathNode::from_sequence(nodes))
                }
                _ => None,
            };
            let radicand = self.parse_argument(span, depth + 1)?;
            return Ok(MathNode::radical(degree, radicand));
        }
        if let Some(kind) = AccentKind::from_command(name) {
            let base = self.parse_argument(span, depth + 1)?;
            return Ok(MathNode::accent(kind, base));
        }
        if TEXT_COMMANDS.contains(&name) {
            return self.parse_raw_text(span);
        }
        if SIZING.contains(&name) {
            return self.parse_delimiter(span);
        }
        if UNSUPPORTED.contains(&name) {
            return Err(self.unsupported(span));
        }
        match symbols::lookup(&command) {
            Some(info) => Ok(classify(command, info.class)),
            None => Err(MathError::UnknownCommand {
                name: name.to_string(),
                span,
            }),
        }
    }

    /// `\text{..}`: the body is copied verbatim up to the matching brace.
    fn parse_raw_text(&mut self, command_span: Range<usize>) -> Result<MathNode, MathError> {
        // Nothing may be peeked past the brace, the lexer is repositioned below.
        match self.advance()? {
            Some((Token::OpenBrace, open)) => {
                let body_start = open.end;
                let close = find_closing_brace(self.source, body_start)
                    .ok_or_else(|| self.unbalanced_from(open.start))?;
                self.lexer.bump(close + 1 - body_start);
                Ok(MathNode::text(&self.source[body_start..close]))
            }
            _ => Err(self.unsupported(command_span)),
        }
    }

    /// `\left(`, `\bigr]`: the sizing hint is dropped, the delimiter kept. `.` is no delimiter.
    fn parse_delimiter(&mut self, command_span: Range<usize>) -> Result<MathNode, MathError> {
        match self.advance()? {
            None => Err(self.unsupported(command_span)),
            Some((Token::Operator('.'), _)) => Ok(MathNode::group(Vec::new())),
            Some((Token::Operator(op), _)) => Ok(MathNode::operator(op.to_string())),
            Some((Token::OpenBracket, _)) => Ok(MathNode::operator("[")),
            Some((Token::CloseBracket, _)) => Ok(MathNode::operator("]")),
            Some((Token::Unicode(ch), _)) => Ok(MathNode::operator(ch.to_string())),
            Some((Token::ControlSymbol(ch), span)) => self.named_delimiter(format!("\\{ch}"), span),
            Some((Token::Command(name), span)) => self.named_delimiter(format!("\\{name}"), span),
            Some((_, span)) => Err(self.unsupported(span)),
        }
    }

    fn named_delimiter(&self, key: String, span: Range<usize>) -> Result<MathNode, MathError> {
        match symbols::lookup(&key) {
            Some(info) if info.class == SymbolClass::Operator => Ok(MathNode::operator(key)),
            _ => Err(self.unsupported(span)),
        }
    }
}

fn classify(key: String, class: SymbolClass) -> MathNode {
    match class {
        SymbolClass::Identifier | SymbolClass::Function => MathNode::Symbol(key),
        SymbolClass::Operator | SymbolClass::Spacing => MathNode::Operator(key),
    }
}

/// Byte offset of the `}` closing a group whose body starts at `start`.
fn find_closing_brace(source: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (offset, ch) in source[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' if depth == 0 => return Some(start + offset),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}

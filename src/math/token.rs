//! Token definitions for equation source
//!
//! The tokens are defined using the logos derive macro. Letters and digits are single
//! characters on purpose: in LaTeX `x^23` raises only the `2`, so the parser decides how
//! many digits belong together, not the lexer.
//!
//! The parser pulls tokens from a `logos::Lexer` one at a time. A character outside the
//! grammar (`#`, `%`, `$`, a trailing lone `\`) is a lexer error, which the parser reports as
//! an unsupported construct naming the character.

use logos::Logos;

/// All possible tokens in an equation
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    /// A control word such as `\frac` or `\alpha`, stored without the backslash.
    #[regex(r"\\[a-zA-Z]+", |lex| lex.slice()[1..].to_string())]
    Command(String),

    /// A backslash followed by one non-letter, as in `\{` or `\,`.
    #[regex(r"\\[^a-zA-Z]", |lex| lex.slice()[1..].chars().next())]
    ControlSymbol(char),

    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("^")]
    Caret,
    #[token("_")]
    Underscore,
    #[token("&")]
    Ampersand,

    #[regex(r"[0-9]", |lex| lex.slice().chars().next())]
    Digit(char),

    #[regex(r"[a-zA-Z]", |lex| lex.slice().chars().next())]
    Letter(char),

    #[regex(r"[+\-*/=<>!,;:.|()'?~]", |lex| lex.slice().chars().next())]
    Operator(char),

    /// Any non-ASCII character, e.g. a literal `α` or `×`.
    #[regex(r"[^\x00-\x7F]", |lex| lex.slice().chars().next())]
    Unicode(char),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{parse, MathError};
    use std::ops::Range;

    fn tokenize(source: &str) -> Vec<(Token, Range<usize>)> {
        Token::lexer(source)
            .spanned()
            .map(|(token, span)| (token.expect("token"), span))
            .collect()
    }

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_commands_and_groups() {
        assert_eq!(
            kinds(r"\frac{a}{b}"),
            vec![
                Token::Command("frac".into()),
                Token::OpenBrace,
                Token::Letter('a'),
                Token::CloseBrace,
                Token::OpenBrace,
                Token::Letter('b'),
                Token::CloseBrace,
            ]
        );
    }

    #[test]
    fn test_digits_are_single_tokens() {
        assert_eq!(
            kinds("x^23"),
            vec![
                Token::Letter('x'),
                Token::Caret,
                Token::Digit('2'),
                Token::Digit('3'),
            ]
        );
    }

    #[test]
    fn test_whitespace_is_skipped_and_spans_kept() {
        let tokens = tokenize("a +  b");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], (Token::Operator('+'), 2..3));
        assert_eq!(tokens[2], (Token::Letter('b'), 5..6));
    }

    #[test]
    fn test_control_symbols() {
        assert_eq!(
            kinds(r"\{ \, \\"),
            vec![
                Token::ControlSymbol('{'),
                Token::ControlSymbol(','),
                Token::ControlSymbol('\\'),
            ]
        );
    }

    #[test]
    fn test_unicode_passthrough() {
        assert_eq!(kinds("α×2"), vec![
            Token::Unicode('α'),
            Token::Unicode('×'),
            Token::Digit('2'),
        ]);
    }

    #[test]
    fn test_unknown_character_is_unsupported() {
        let errors: Vec<_> = Token::lexer("a # b")
            .spanned()
            .filter(|(token, _)| token.is_err())
            .map(|(_, span)| span)
            .collect();
        assert_eq!(errors, vec![2..3]);
        assert_eq!(
            parse("a # b").unwrap_err(),
            MathError::UnsupportedConstruct {
                snippet: "#".into(),
                span: 2..3
            }
        );
    }
}

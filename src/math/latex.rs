//! Canonical source re-derivation
//!
//! Writes a [MathNode] back out as equation source in one canonical spelling: accent aliases
//! collapse (`\widehat` becomes `\hat`), sizing hints are gone, and braces appear only where
//! re-parsing needs them. Parsing the output yields a tree equal to the input for any tree
//! the parser produces.

use super::ast::MathNode;

/// Canonical source for a tree. The root group's children are written without braces.
pub fn to_latex(node: &MathNode) -> String {
    let mut out = String::new();
    match node {
        MathNode::Group(children) => write_sequence(&mut out, children),
        other => write_node(&mut out, other),
    }
    out
}

fn write_sequence(out: &mut String, nodes: &[MathNode]) {
    for node in nodes {
        write_node(out, node);
    }
}

fn write_node(out: &mut String, node: &MathNode) {
    match node {
        MathNode::Symbol(text) | MathNode::Operator(text) => push_token(out, text),
        MathNode::Number(text) => {
            // Adjacent numbers would merge on re-parse.
            if ends_in_number(out) {
                out.push('{');
                out.push_str(text);
                out.push('}');
            } else {
                push_token(out, text);
            }
        }
        MathNode::Text(text) => {
            push_token(out, "\\text{");
            out.push_str(text);
            out.push('}');
        }
        MathNode::Fraction {
            numerator,
            denominator,
        } => {
            push_token(out, "\\frac");
            write_braced(out, numerator);
            write_braced(out, denominator);
        }
        MathNode::Superscript { base, exponent } => {
            write_node(out, base);
            out.push('^');
            write_script(out, exponent);
        }
        MathNode::Subscript { base, index } => {
            write_node(out, base);
            out.push('_');
            write_script(out, index);
        }
        MathNode::Radical { degree, radicand } => {
            push_token(out, "\\sqrt");
            if let Some(degree) = degree {
                let mut inner = String::new();
                match degree.as_ref() {
                    MathNode::Group(children) => write_sequence(&mut inner, children),
                    other => write_node(&mut inner, other),
                }
                out.push('[');
                if inner.contains(']') {
                    out.push('{');
                    out.push_str(&inner);
                    out.push('}');
                } else {
                    out.push_str(&inner);
                }
                out.push(']');
            }
            write_braced(out, radicand);
        }
        MathNode::Accent { kind, base } => {
            push_token(out, kind.command());
            write_braced(out, base);
        }
        MathNode::Group(children) => {
            out.push('{');
            write_sequence(out, children);
            out.push('}');
        }
    }
}

/// Always braced; a group contributes its children directly.
fn write_braced(out: &mut String, node: &MathNode) {
    out.push('{');
    match node {
        MathNode::Group(children) => write_sequence(out, children),
        other => write_node(out, other),
    }
    out.push('}');
}

/// Braced unless the script is a single ASCII letter or digit.
fn write_script(out: &mut String, node: &MathNode) {
    let bare = match node {
        MathNode::Symbol(text) | MathNode::Number(text) => {
            let mut chars = text.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphanumeric())
        }
        _ => false,
    };
    if bare {
        match node {
            MathNode::Symbol(text) | MathNode::Number(text) => out.push_str(text),
            _ => {}
        }
    } else {
        write_braced(out, node);
    }
}

/// Append a token, separating a trailing control word from a following letter.
fn push_token(out: &mut String, token: &str) {
    let starts_with_letter = token.starts_with(|c: char| c.is_ascii_alphabetic());
    if starts_with_letter && ends_in_control_word(out) {
        out.push(' ');
    }
    out.push_str(token);
}

fn ends_in_control_word(out: &str) -> bool {
    let letters = out
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_alphabetic())
        .count();
    letters > 0 && out[..out.len() - letters].ends_with('\\')
}

/// True when a digit written next would continue the previous number.
fn ends_in_number(out: &str) -> bool {
    let mut tail = out.chars().rev();
    match tail.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => matches!(tail.next(), Some(c) if c.is_ascii_digit()),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::parse;

    fn canonical(source: &str) -> String {
        to_latex(&parse(source).unwrap())
    }

    #[test]
    fn test_fraction_is_written_as_source() {
        assert_eq!(canonical(r"\frac{a}{b}"), r"\frac{a}{b}");
        assert_eq!(canonical(r"\frac12"), r"\frac{1}{2}");
    }

    #[test]
    fn test_scripts_brace_only_when_needed() {
        assert_eq!(canonical("x^2_i"), "x^2_i");
        assert_eq!(canonical("x^{10}"), "x^{10}");
        assert_eq!(canonical(r"e^{\pi i}"), r"e^{\pi i}");
        assert_eq!(canonical(r"x^\alpha"), r"x^{\alpha}");
    }

    #[test]
    fn test_control_word_is_separated_from_letters() {
        assert_eq!(canonical(r"\alpha x"), r"\alpha x");
        assert_eq!(canonical(r"\alpha2"), r"\alpha2");
        assert_eq!(canonical(r"\sin\theta"), r"\sin\theta");
    }

    #[test]
    fn test_aliases_collapse() {
        assert_eq!(canonical(r"\widehat{x}"), r"\hat{x}");
        assert_eq!(canonical(r"\left( x \right)"), "(x)");
    }

    #[test]
    fn test_adjacent_numbers_stay_apart() {
        assert_eq!(canonical("{1}{2}"), "1{2}");
        assert_eq!(canonical("1.{5}"), "1.{5}");
    }

    #[test]
    fn test_radical_degree() {
        assert_eq!(canonical(r"\sqrt[3]{x}"), r"\sqrt[3]{x}");
        assert_eq!(canonical(r"\sqrt[n+1]x"), r"\sqrt[n+1]{x}");
        assert_eq!(canonical(r"\sqrt[{]}]{x}"), r"\sqrt[{]}]{x}");
    }

    #[test]
    fn test_reparse_is_structurally_equal() {
        for source in [
            r"\frac{x^2}{\sqrt{y}}",
            r"\hat{\vec{v}}_0",
            r"\text{if } x \geq 0",
            "^2",
            "{}x",
            "{a b}^2",
            r"\sum_{i=1}^{n} i",
            "3.14.15",
        ] {
            let ast = parse(source).unwrap();
            assert_eq!(parse(&to_latex(&ast)).unwrap(), ast, "{source}");
        }
    }
}

//! Math AST
//!
//! Each node owns its children exclusively; the tree is finite and acyclic by construction.
//! Atoms store their canonical LaTeX spelling (`"x"`, `"2.5"`, `"\\alpha"`, `"+"`), which keeps
//! the tree independent of any one target while letting both serializers recover what was
//! written. Resolving `"\\alpha"` to `α` is the structured serializer's concern.

use serde::Serialize;

/// A node of a parsed equation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MathNode {
    /// An identifier: a letter, a non-ASCII letter, or a named symbol such as `\alpha`.
    Symbol(String),
    /// A run of digits, possibly with one embedded decimal point.
    Number(String),
    /// An operator, relation, delimiter or spacing command.
    Operator(String),
    /// Upright text from `\text{..}` and friends, taken verbatim.
    Text(String),
    Fraction {
        numerator: Box<MathNode>,
        denominator: Box<MathNode>,
    },
    Superscript {
        base: Box<MathNode>,
        exponent: Box<MathNode>,
    },
    Subscript {
        base: Box<MathNode>,
        index: Box<MathNode>,
    },
    Radical {
        degree: Option<Box<MathNode>>,
        radicand: Box<MathNode>,
    },
    Accent {
        kind: AccentKind,
        base: Box<MathNode>,
    },
    /// An ordered sequence; braces in the source, or the top level of an equation.
    Group(Vec<MathNode>),
}

/// Accent marks placed over a base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccentKind {
    Hat,
    Bar,
    Vec,
    Dot,
    Ddot,
    Tilde,
    Check,
    Breve,
    Acute,
    Grave,
}

impl AccentKind {
    /// Resolve an accent command name (without backslash).
    pub fn from_command(name: &str) -> Option<Self> {
        let kind = match name {
            "hat" | "widehat" => AccentKind::Hat,
            "bar" | "overline" => AccentKind::Bar,
            "vec" | "overrightarrow" => AccentKind::Vec,
            "dot" => AccentKind::Dot,
            "ddot" => AccentKind::Ddot,
            "tilde" | "widetilde" => AccentKind::Tilde,
            "check" => AccentKind::Check,
            "breve" => AccentKind::Breve,
            "acute" => AccentKind::Acute,
            "grave" => AccentKind::Grave,
            _ => return None,
        };
        Some(kind)
    }

    /// The canonical command spelling, backslash included.
    pub fn command(self) -> &'static str {
        match self {
            AccentKind::Hat => "\\hat",
            AccentKind::Bar => "\\bar",
            AccentKind::Vec => "\\vec",
            AccentKind::Dot => "\\dot",
            AccentKind::Ddot => "\\ddot",
            AccentKind::Tilde => "\\tilde",
            AccentKind::Check => "\\check",
            AccentKind::Breve => "\\breve",
            AccentKind::Acute => "\\acute",
            AccentKind::Grave => "\\grave",
        }
    }

    /// The combining character placed over the base in rendered output.
    pub fn combining_char(self) -> char {
        match self {
            AccentKind::Hat => '\u{0302}',
            AccentKind::Bar => '\u{0305}',
            AccentKind::Vec => '\u{20D7}',
            AccentKind::Dot => '\u{0307}',
            AccentKind::Ddot => '\u{0308}',
            AccentKind::Tilde => '\u{0303}',
            AccentKind::Check => '\u{030C}',
            AccentKind::Breve => '\u{0306}',
            AccentKind::Acute => '\u{0301}',
            AccentKind::Grave => '\u{0300}',
        }
    }
}

impl MathNode {
    pub fn symbol(text: impl Into<String>) -> Self {
        MathNode::Symbol(text.into())
    }

    pub fn number(text: impl Into<String>) -> Self {
        MathNode::Number(text.into())
    }

    pub fn operator(text: impl Into<String>) -> Self {
        MathNode::Operator(text.into())
    }

    pub fn text(text: impl Into<String>) -> Self {
        MathNode::Text(text.into())
    }

    pub fn fraction(numerator: MathNode, denominator: MathNode) -> Self {
        MathNode::Fraction {
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
        }
    }

    pub fn superscript(base: MathNode, exponent: MathNode) -> Self {
        MathNode::Superscript {
            base: Box::new(base),
            exponent: Box::new(exponent),
        }
    }

    pub fn subscript(base: MathNode, index: MathNode) -> Self {
        MathNode::Subscript {
            base: Box::new(base),
            index: Box::new(index),
        }
    }

    pub fn radical(degree: Option<MathNode>, radicand: MathNode) -> Self {
        MathNode::Radical {
            degree: degree.map(Box::new),
            radicand: Box::new(radicand),
        }
    }

    pub fn accent(kind: AccentKind, base: MathNode) -> Self {
        MathNode::Accent {
            kind,
            base: Box::new(base),
        }
    }

    pub fn group(children: Vec<MathNode>) -> Self {
        MathNode::Group(children)
    }

    /// Collapse a parsed sequence: one node stands for itself, anything else is a group.
    pub fn from_sequence(mut nodes: Vec<MathNode>) -> Self {
        if nodes.len() == 1 {
            if let Some(node) = nodes.pop() {
                return node;
            }
        }
        MathNode::Group(nodes)
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&MathNode> {
        match self {
            MathNode::Symbol(_) | MathNode::Number(_) | MathNode::Operator(_) | MathNode::Text(_) => {
                Vec::new()
            }
            MathNode::Fraction {
                numerator,
                denominator,
            } => vec![&**numerator, &**denominator],
            MathNode::Superscript { base, exponent } => vec![&**base, &**exponent],
            MathNode::Subscript { base, index } => vec![&**base, &**index],
            MathNode::Radical { degree, radicand } => {
                let mut children: Vec<&MathNode> = Vec::with_capacity(2);
                if let Some(degree) = degree {
                    children.push(degree);
                }
                children.push(radicand);
                children
            }
            MathNode::Accent { base, .. } => vec![&**base],
            MathNode::Group(children) => children.iter().collect(),
        }
    }

    /// Number of nodes in this subtree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(MathNode::node_count)
            .sum::<usize>()
    }
}

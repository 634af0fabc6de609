//! Process-wide symbol table
//!
//! Maps named commands (`\alpha`, `\leq`, `\sin`, `\,`) to the character they render as and
//! the role they play. Built once on first use, read-only afterwards.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// The role a named symbol plays in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolClass {
    /// Letter-like: Greek letters, `\infty`, `\partial`.
    Identifier,
    /// Relations, binary operators, arrows, big operators, delimiters.
    Operator,
    /// Function names rendered upright (`\sin`, `\log`, `\lim`).
    Function,
    /// Horizontal spacing commands.
    Spacing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolInfo {
    pub rendered: &'static str,
    pub class: SymbolClass,
}

const IDENTIFIERS: &[(&str, &str)] = &[
    ("\\alpha", "α"),
    ("\\beta", "β"),
    ("\\gamma", "γ"),
    ("\\delta", "δ"),
    ("\\epsilon", "ϵ"),
    ("\\varepsilon", "ε"),
    ("\\zeta", "ζ"),
    ("\\eta", "η"),
    ("\\theta", "θ"),
    ("\\vartheta", "ϑ"),
    ("\\iota", "ι"),
    ("\\kappa", "κ"),
    ("\\lambda", "λ"),
    ("\\mu", "μ"),
    ("\\nu", "ν"),
    ("\\xi", "ξ"),
    ("\\pi", "π"),
    ("\\varpi", "ϖ"),
    ("\\rho", "ρ"),
    ("\\varrho", "ϱ"),
    ("\\sigma", "σ"),
    ("\\varsigma", "ς"),
    ("\\tau", "τ"),
    ("\\upsilon", "υ"),
    ("\\phi", "ϕ"),
    ("\\varphi", "φ"),
    ("\\chi", "χ"),
    ("\\psi", "ψ"),
    ("\\omega", "ω"),
    ("\\Gamma", "Γ"),
    ("\\Delta", "Δ"),
    ("\\Theta", "Θ"),
    ("\\Lambda", "Λ"),
    ("\\Xi", "Ξ"),
    ("\\Pi", "Π"),
    ("\\Sigma", "Σ"),
    ("\\Upsilon", "Υ"),
    ("\\Phi", "Φ"),
    ("\\Psi", "Ψ"),
    ("\\Omega", "Ω"),
    ("\\infty", "∞"),
    ("\\partial", "∂"),
    ("\\nabla", "∇"),
    ("\\hbar", "ℏ"),
    ("\\ell", "ℓ"),
    ("\\emptyset", "∅"),
    ("\\aleph", "ℵ"),
    ("\\Re", "ℜ"),
    ("\\Im", "ℑ"),
];

const OPERATORS: &[(&str, &str)] = &[
    ("\\times", "×"),
    ("\\div", "÷"),
    ("\\cdot", "⋅"),
    ("\\pm", "±"),
    ("\\mp", "∓"),
    ("\\ast", "∗"),
    ("\\star", "⋆"),
    ("\\circ", "∘"),
    ("\\bullet", "∙"),
    ("\\oplus", "⊕"),
    ("\\otimes", "⊗"),
    ("\\cup", "∪"),
    ("\\cap", "∩"),
    ("\\wedge", "∧"),
    ("\\vee", "∨"),
    ("\\setminus", "∖"),
    ("\\leq", "≤"),
    ("\\le", "≤"),
    ("\\geq", "≥"),
    ("\\ge", "≥"),
    ("\\neq", "≠"),
    ("\\ne", "≠"),
    ("\\approx", "≈"),
    ("\\equiv", "≡"),
    ("\\sim", "∼"),
    ("\\simeq", "≃"),
    ("\\cong", "≅"),
    ("\\propto", "∝"),
    ("\\ll", "≪"),
    ("\\gg", "≫"),
    ("\\in", "∈"),
    ("\\notin", "∉"),
    ("\\ni", "∋"),
    ("\\subset", "⊂"),
    ("\\supset", "⊃"),
    ("\\subseteq", "⊆"),
    ("\\supseteq", "⊇"),
    ("\\perp", "⊥"),
    ("\\parallel", "∥"),
    ("\\mid", "∣"),
    ("\\forall", "∀"),
    ("\\exists", "∃"),
    ("\\neg", "¬"),
    ("\\to", "→"),
    ("\\rightarrow", "→"),
    ("\\leftarrow", "←"),
    ("\\leftrightarrow", "↔"),
    ("\\Rightarrow", "⇒"),
    ("\\Leftarrow", "⇐"),
    ("\\Leftrightarrow", "⇔"),
    ("\\implies", "⟹"),
    ("\\iff", "⟺"),
    ("\\mapsto", "↦"),
    ("\\uparrow", "↑"),
    ("\\downarrow", "↓"),
    ("\\sum", "∑"),
    ("\\prod", "∏"),
    ("\\coprod", "∐"),
    ("\\int", "∫"),
    ("\\iint", "∬"),
    ("\\iiint", "∭"),
    ("\\oint", "∮"),
    ("\\bigcup", "⋃"),
    ("\\bigcap", "⋂"),
    ("\\langle", "⟨"),
    ("\\rangle", "⟩"),
    ("\\lfloor", "⌊"),
    ("\\rfloor", "⌋"),
    ("\\lceil", "⌈"),
    ("\\rceil", "⌉"),
    ("\\vert", "|"),
    ("\\Vert", "‖"),
    ("\\ldots", "…"),
    ("\\cdots", "⋯"),
    ("\\vdots", "⋮"),
    ("\\ddots", "⋱"),
    ("\\prime", "′"),
    ("\\degree", "°"),
    ("\\{", "{"),
    ("\\}", "}"),
    ("\\|", "‖"),
    ("\\%", "%"),
    ("\\$", "$"),
    ("\\#", "#"),
    ("\\&", "&"),
    ("\\_", "_"),
];

const FUNCTIONS: &[(&str, &str)] = &[
    ("\\sin", "sin"),
    ("\\cos", "cos"),
    ("\\tan", "tan"),
    ("\\cot", "cot"),
    ("\\sec", "sec"),
    ("\\csc", "csc"),
    ("\\arcsin", "arcsin"),
    ("\\arccos", "arccos"),
    ("\\arctan", "arctan"),
    ("\\sinh", "sinh"),
    ("\\cosh", "cosh"),
    ("\\tanh", "tanh"),
    ("\\log", "log"),
    ("\\ln", "ln"),
    ("\\lg", "lg"),
    ("\\exp", "exp"),
    ("\\lim", "lim"),
    ("\\liminf", "liminf"),
    ("\\limsup", "limsup"),
    ("\\max", "max"),
    ("\\min", "min"),
    ("\\sup", "sup"),
    ("\\inf", "inf"),
    ("\\det", "det"),
    ("\\dim", "dim"),
    ("\\ker", "ker"),
    ("\\gcd", "gcd"),
    ("\\arg", "arg"),
    ("\\deg", "deg"),
    ("\\Pr", "Pr"),
];

const SPACING: &[(&str, &str)] = &[
    ("\\,", "\u{2009}"),
    ("\\:", "\u{205F}"),
    ("\\;", "\u{2004}"),
    ("\\!", ""),
    ("\\ ", " "),
    ("\\quad", "\u{2003}"),
    ("\\qquad", "\u{2003}\u{2003}"),
];

static SYMBOLS: Lazy<HashMap<&'static str, SymbolInfo>> = Lazy::new(|| {
    let mut table = HashMap::new();
    let mut insert = |entries: &[(&'static str, &'static str)], class: SymbolClass| {
        for &(name, rendered) in entries {
            table.insert(name, SymbolInfo { rendered, class });
        }
    };
    insert(IDENTIFIERS, SymbolClass::Identifier);
    insert(OPERATORS, SymbolClass::Operator);
    insert(SPACING, SymbolClass::Spacing);
    insert(FUNCTIONS, SymbolClass::Function);
    table
});

/// Look up a named symbol by its spelling, backslash included (`"\\alpha"`).
pub fn lookup(name: &str) -> Option<SymbolInfo> {
    SYMBOLS.get(name).copied()
}

/// The character(s) an atom renders as: the table entry for named symbols, the atom itself
/// otherwise.
pub fn rendered(atom: &str) -> &str {
    match lookup(atom) {
        Some(info) => info.rendered,
        None => atom,
    }
}

/// True when the atom is a function name that renders upright.
pub fn is_function(atom: &str) -> bool {
    matches!(lookup(atom), Some(info) if info.class == SymbolClass::Function)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greek_resolves_to_single_char() {
        let info = lookup("\\alpha").unwrap();
        assert_eq!(info.rendered, "α");
        assert_eq!(info.class, SymbolClass::Identifier);
        assert_eq!(rendered("\\Omega"), "Ω");
    }

    #[test]
    fn test_functions_render_bare_name() {
        let info = lookup("\\sin").unwrap();
        assert_eq!(info.rendered, "sin");
        assert!(is_function("\\lim"));
        assert!(!is_function("\\alpha"));
    }

    #[test]
    fn test_every_function_has_a_key() {
        for (name, rendered) in FUNCTIONS {
            assert_eq!(lookup(name).map(|info| info.rendered), Some(*rendered));
            assert_eq!(&name[1..], *rendered);
        }
    }

    #[test]
    fn test_unknown_and_plain_atoms() {
        assert!(lookup("\\foo").is_none());
        assert_eq!(rendered("x"), "x");
        assert_eq!(rendered("\\{"), "{");
    }
}

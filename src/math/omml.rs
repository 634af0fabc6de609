//! Structured-markup serializer (Office Math Markup)
//!
//! Maps the Math AST onto the word-processor math schema:
//!
//!     fraction     m:f    (m:num, m:den)
//!     superscript  m:sSup (m:e, m:sup)
//!     subscript    m:sSub (m:e, m:sub)
//!     radical      m:rad  (m:radPr?, m:deg, m:e)
//!     accent       m:acc  (m:accPr/m:chr, m:e)
//!     atoms        m:r/m:t, named symbols resolved to their character
//!
//! Groups have no element of their own; their children become siblings in the enclosing
//! container. A container left with no content (`x^{}`, `\frac{}{}`) holds one empty run
//! rather than nothing. Inline equations are a bare `m:oMath`, display equations sit in an
//! `m:oMathPara` carrying the configured justification.

use super::ast::MathNode;
use super::symbols;
use super::xml::Element;
use super::MathMode;
use crate::wiki::config::MathConfig;

pub const OMML_NAMESPACE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/math";

pub fn serialize(node: &MathNode, mode: MathMode, config: &MathConfig) -> Element {
    let math = Element::new("m:oMath").with_children(filled(emit(node)));
    let root = match mode {
        MathMode::Inline => math,
        MathMode::Display => Element::new("m:oMathPara")
            .child(
                Element::new("m:oMathParaPr").child(
                    Element::new("m:jc").attr("m:val", config.display_justification.as_str()),
                ),
            )
            .child(math),
    };
    if config.declare_namespace {
        root.attr("xmlns:m", OMML_NAMESPACE)
    } else {
        root
    }
}

/// The elements a node contributes to its parent container.
fn emit(node: &MathNode) -> Vec<Element> {
    match node {
        MathNode::Symbol(atom) => run(symbols::rendered(atom), symbols::is_function(atom)),
        MathNode::Number(atom) | MathNode::Operator(atom) => run(symbols::rendered(atom), false),
        MathNode::Text(text) => run(text, true),
        MathNode::Group(children) => children.iter().flat_map(emit).collect(),
        MathNode::Fraction {
            numerator,
            denominator,
        } => vec![Element::new("m:f")
            .child(container("m:num", numerator))
            .child(container("m:den", denominator))],
        MathNode::Superscript { base, exponent } => vec![Element::new("m:sSup")
            .child(container("m:e", base))
            .child(container("m:sup", exponent))],
        MathNode::Subscript { base, index } => vec![Element::new("m:sSub")
            .child(container("m:e", base))
            .child(container("m:sub", index))],
        MathNode::Radical { degree, radicand } => {
            let radical = match degree {
                Some(degree) => Element::new("m:rad").child(container("m:deg", degree)),
                None => Element::new("m:rad")
                    .child(
                        Element::new("m:radPr")
                            .child(Element::new("m:degHide").attr("m:val", "1")),
                    )
                    .child(Element::new("m:deg")),
            };
            vec![radical.child(container("m:e", radicand))]
        }
        MathNode::Accent { kind, base } => vec![Element::new("m:acc")
            .child(
                Element::new("m:accPr").child(
                    Element::new("m:chr").attr("m:val", kind.combining_char().to_string()),
                ),
            )
            .child(container("m:e", base))],
    }
}

fn container(name: &str, node: &MathNode) -> Element {
    Element::new(name).with_children(filled(emit(node)))
}

fn filled(elements: Vec<Element>) -> Vec<Element> {
    if elements.is_empty() {
        vec![Element::new("m:r").child(Element::new("m:t"))]
    } else {
        elements
    }
}

/// A literal run. Empty text (negative space) produces no run at all.
fn run(text: &str, upright: bool) -> Vec<Element> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut t = Element::new("m:t");
    if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
        t = t.attr("xml:space", "preserve");
    }
    let mut run = Element::new("m:r");
    if upright {
        run = run.child(Element::new("m:rPr").child(Element::new("m:sty").attr("m:val", "p")));
    }
    vec![run.child(t.text(text))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::parse;

    fn bare() -> MathConfig {
        MathConfig {
            declare_namespace: false,
            ..MathConfig::default()
        }
    }

    fn inline(source: &str) -> String {
        serialize(&parse(source).unwrap(), MathMode::Inline, &bare()).to_string()
    }

    #[test]
    fn test_single_symbol_is_one_run() {
        assert_eq!(inline("x"), "<m:oMath><m:r><m:t>x</m:t></m:r></m:oMath>");
    }

    #[test]
    fn test_fraction_has_two_single_run_children() {
        let root = serialize(&parse(r"\frac{a}{b}").unwrap(), MathMode::Inline, &bare());
        let fraction = root.find("m:f").unwrap();
        let numerator = fraction.find("m:num").unwrap();
        let denominator = fraction.find("m:den").unwrap();
        assert_eq!(numerator.elements().count(), 1);
        assert_eq!(numerator.text_content(), "a");
        assert_eq!(denominator.elements().count(), 1);
        assert_eq!(denominator.text_content(), "b");
    }

    #[test]
    fn test_greek_names_resolve_to_characters() {
        assert_eq!(
            inline(r"\alpha"),
            "<m:oMath><m:r><m:t>α</m:t></m:r></m:oMath>"
        );
    }

    #[test]
    fn test_groups_flatten_into_siblings() {
        let root = serialize(&parse("{a{b c}}").unwrap(), MathMode::Inline, &bare());
        assert_eq!(root.elements().count(), 3);
        assert_eq!(root.text_content(), "abc");
    }

    #[test]
    fn test_radical_without_degree_hides_it() {
        assert_eq!(
            inline(r"\sqrt{2}"),
            "<m:oMath><m:rad><m:radPr><m:degHide m:val=\"1\"/></m:radPr><m:deg/>\
             <m:e><m:r><m:t>2</m:t></m:r></m:e></m:rad></m:oMath>"
        );
    }

    #[test]
    fn test_accent_carries_combining_char() {
        let root = serialize(&parse(r"\vec{v}").unwrap(), MathMode::Inline, &bare());
        let chr = root
            .find("m:acc")
            .and_then(|acc| acc.find("m:accPr"))
            .and_then(|pr| pr.find("m:chr"))
            .unwrap();
        assert_eq!(chr.attribute("m:val"), Some("\u{20D7}"));
    }

    #[test]
    fn test_text_and_functions_are_upright() {
        assert_eq!(
            inline(r"\sin"),
            "<m:oMath><m:r><m:rPr><m:sty m:val=\"p\"/></m:rPr><m:t>sin</m:t></m:r></m:oMath>"
        );
        let root = serialize(&parse(r"\text{ if }").unwrap(), MathMode::Inline, &bare());
        let t = root.find("m:r").and_then(|r| r.find("m:t")).unwrap();
        assert_eq!(t.attribute("xml:space"), Some("preserve"));
    }

    #[test]
    fn test_empty_containers_hold_an_empty_run() {
        assert_eq!(
            inline("x^{}"),
            "<m:oMath><m:sSup><m:e><m:r><m:t>x</m:t></m:r></m:e>\
             <m:sup><m:r><m:t/></m:r></m:sup></m:sSup></m:oMath>"
        );
        let root = serialize(&parse(r"\frac{}{\!}").unwrap(), MathMode::Inline, &bare());
        let fraction = root.find("m:f").unwrap();
        for part in ["m:num", "m:den"] {
            let run = fraction.find(part).and_then(|c| c.find("m:r")).unwrap();
            assert!(run.find("m:t").is_some(), "{part} has no run");
        }
        assert_eq!(inline(""), "<m:oMath><m:r><m:t/></m:r></m:oMath>");
    }

    #[test]
    fn test_display_wraps_in_paragraph_with_namespace() {
        let root = serialize(
            &parse("x").unwrap(),
            MathMode::Display,
            &MathConfig::default(),
        );
        assert_eq!(root.name, "m:oMathPara");
        assert_eq!(root.attribute("xmlns:m"), Some(OMML_NAMESPACE));
        let jc = root.find("m:oMathParaPr").and_then(|pr| pr.find("m:jc")).unwrap();
        assert_eq!(jc.attribute("m:val"), Some("center"));
        assert!(root.find("m:oMath").is_some());
    }
}

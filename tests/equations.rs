//! Equation transpiler tests
//!
//! Parse trees for the documented constructs and exact serializer output for both targets.

use rstest::rstest;
use wikimark::math::{delimited, latex, omml, parse, AccentKind, MathErrorKind, MathMode};
use wikimark::wiki::ast::InlineMath;
use wikimark::wiki::config::MathConfig;
use wikimark::wiki::render::{render_equation, MathTarget, RenderedMath};
use wikimark::{convert_str, MathError, MathNode, WikiConfig};

fn bare() -> MathConfig {
    MathConfig {
        declare_namespace: false,
        ..MathConfig::default()
    }
}

fn omml_inline(source: &str) -> String {
    let node = parse(source).expect("equation parses");
    omml::serialize(&node, MathMode::Inline, &bare()).to_string()
}

#[test]
fn test_fraction_scenario() {
    let node = parse(r"\frac{a}{b}").unwrap();
    assert_eq!(
        node,
        MathNode::fraction(MathNode::symbol("a"), MathNode::symbol("b"))
    );
    insta::assert_snapshot!(
        delimited::serialize(r"\frac{a}{b}", MathMode::Inline, &MathConfig::default()),
        @r"\(\frac{a}{b}\)"
    );
    insta::assert_snapshot!(
        omml::serialize(&node, MathMode::Inline, &MathConfig::default()).to_string(),
        @r#"<m:oMath xmlns:m="http://schemas.openxmlformats.org/officeDocument/2006/math"><m:f><m:num><m:r><m:t>a</m:t></m:r></m:num><m:den><m:r><m:t>b</m:t></m:r></m:den></m:f></m:oMath>"#
    );
}

#[test]
fn test_script_chaining_scenario() {
    let node = parse("x^2_i").unwrap();
    assert_eq!(
        node,
        MathNode::subscript(
            MathNode::superscript(MathNode::symbol("x"), MathNode::number("2")),
            MathNode::symbol("i"),
        )
    );
    insta::assert_snapshot!(
        omml_inline("x^2_i"),
        @"<m:oMath><m:sSub><m:e><m:sSup><m:e><m:r><m:t>x</m:t></m:r></m:e><m:sup><m:r><m:t>2</m:t></m:r></m:sup></m:sSup></m:e><m:sub><m:r><m:t>i</m:t></m:r></m:sub></m:sSub></m:oMath>"
    );
}

#[test]
fn test_display_radical() {
    let node = parse(r"\sqrt{x}").unwrap();
    insta::assert_snapshot!(
        omml::serialize(&node, MathMode::Display, &bare()).to_string(),
        @r#"<m:oMathPara><m:oMathParaPr><m:jc m:val="center"/></m:oMathParaPr><m:oMath><m:rad><m:radPr><m:degHide m:val="1"/></m:radPr><m:deg/><m:e><m:r><m:t>x</m:t></m:r></m:e></m:rad></m:oMath></m:oMathPara>"#
    );
    insta::assert_snapshot!(
        delimited::serialize(r"\sqrt{x}", MathMode::Display, &MathConfig::default()),
        @r"$$\sqrt{x}$$"
    );
}

#[test]
fn test_radical_with_degree_and_accent() {
    let node = parse(r"\sqrt[3]{\hat{v}}").unwrap();
    assert_eq!(
        node,
        MathNode::radical(
            Some(MathNode::number("3")),
            MathNode::accent(AccentKind::Hat, MathNode::symbol("v")),
        )
    );
    assert_eq!(latex::to_latex(&node), r"\sqrt[3]{\hat{v}}");
}

#[rstest]
#[case(r"\frac12", r"\frac{1}{2}")]
#[case(r"x^{2}", "x^2")]
#[case(r"\widehat{ab}", r"\hat{ab}")]
#[case(r"\left( x \right)", "(x)")]
#[case(r"\alpha x", r"\alpha x")]
#[case(r"e^{i\pi}", r"e^{i\pi}")]
#[case(r"\text{if } x", r"\text{if }x")]
fn test_canonical_source(#[case] source: &str, #[case] canonical: &str) {
    let node = parse(source).unwrap();
    assert_eq!(latex::to_latex(&node), canonical);
    assert_eq!(parse(canonical).unwrap(), node);
}

#[rstest]
#[case("{", MathErrorKind::UnbalancedGroup, "{")]
#[case("a}", MathErrorKind::UnbalancedGroup, "}")]
#[case(r"x + \foo", MathErrorKind::UnknownCommand, r"\foo")]
#[case(r"\mathbf{x}", MathErrorKind::UnsupportedConstruct, r"\mathbf")]
#[case(r"a & b", MathErrorKind::UnsupportedConstruct, "&")]
#[case(r"\frac{a}", MathErrorKind::UnsupportedConstruct, r"\frac")]
#[case("x^", MathErrorKind::UnsupportedConstruct, "^")]
fn test_failures_name_the_snippet(
    #[case] source: &str,
    #[case] kind: MathErrorKind,
    #[case] snippet: &str,
) {
    let error: MathError = parse(source).unwrap_err();
    assert_eq!(error.kind(), kind);
    assert_eq!(error.snippet(), snippet);
}

#[test]
fn test_unknown_command_span() {
    assert_eq!(
        parse(r"x + \foo").unwrap_err(),
        MathError::UnknownCommand {
            name: "foo".into(),
            span: 4..8,
        }
    );
}

#[test]
fn test_unbalanced_group_falls_back_to_source() {
    let rendered = render_equation(
        &InlineMath::inline("{"),
        MathTarget::Omml,
        &MathConfig::default(),
    );
    assert_eq!(rendered.math, RenderedMath::Fallback { text: "${$".into() });
    assert!(matches!(
        rendered.error,
        Some(MathError::UnbalancedGroup { .. })
    ));
}

#[test]
fn test_html_escaping_of_delimited_output() {
    insta::assert_snapshot!(
        delimited::serialize("a<b", MathMode::Inline, &MathConfig::default()),
        @r"\(a&lt;b\)"
    );
    let raw = MathConfig {
        escape_html: false,
        ..MathConfig::default()
    };
    assert_eq!(delimited::serialize("a<b", MathMode::Inline, &raw), r"\(a<b\)");
}

#[rstest]
#[case(r"\dfrac{a}{b}")]
#[case(r"\left(\frac{a}{b}\right)")]
#[case(r"\overline{AB}")]
#[case(r"\overrightarrow{AB}")]
#[case(r"\mathrm{d}x")]
fn test_delimited_rendering_keeps_the_source(#[case] source: &str) {
    let rendered = render_equation(
        &InlineMath::inline(source),
        MathTarget::Delimited,
        &MathConfig::default(),
    );
    assert_eq!(rendered.error, None);
    assert_eq!(
        rendered.math,
        RenderedMath::Delimited {
            markup: format!(r"\({source}\)")
        }
    );
}

#[test]
fn test_long_script_chain_falls_back_without_crashing() {
    let source = format!("intro\n$$ x{} $$\nafter\n", "^a".repeat(1000));
    let doc = convert_str(&source, &WikiConfig::default());
    let report = doc.render_equations(MathTarget::Omml, &MathConfig::default());
    assert_eq!(report.rendered.len(), 1);
    assert!(report.rendered[0].is_fallback());
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].range.start.line, 1);
}

#[test]
fn test_functions_and_text_are_upright() {
    insta::assert_snapshot!(
        omml_inline(r"\sin\theta"),
        @r#"<m:oMath><m:r><m:rPr><m:sty m:val="p"/></m:rPr><m:t>sin</m:t></m:r><m:r><m:t>θ</m:t></m:r></m:oMath>"#
    );
}

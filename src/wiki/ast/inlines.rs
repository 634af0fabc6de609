//! Inline spans
//!
//! The span tree produced by the inline resolver. Formatting spans own their children;
//! links and equations are leaves. [`flatten`] turns the tree into leaf runs annotated with the
//! formatting in effect, the shape most renderers want.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Span {
    Text(String),
    Bold(Vec<Span>),
    Italic(Vec<Span>),
    Underline(Vec<Span>),
    Link(Link),
    Equation(InlineMath),
}

/// An equation kept as raw source until a renderer asks for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineMath {
    pub source: String,
    /// `$$..$$` rather than `$..$`; carried through to the serializers.
    pub display: bool,
}

impl InlineMath {
    pub fn inline(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            display: false,
        }
    }

    pub fn display(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            display: true,
        }
    }

    /// The source wrapped in its original wiki delimiters.
    pub fn delimited_source(&self) -> String {
        let delimiter = if self.display { "$$" } else { "$" };
        format!("{delimiter}{}{delimiter}", self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// The target exactly as written between `[[` and `|`.
    pub raw_target: String,
    pub label: Option<String>,
    pub target: LinkTarget,
}

impl Link {
    pub fn display_text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.raw_target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum LinkTarget {
    External { url: String },
    Email { address: String },
    Interwiki { wiki: String, page: String },
    /// A wiki page, a section of one, or (with an empty page) a section of this page.
    Internal {
        page: String,
        anchor: Option<String>,
    },
}

impl Span {
    pub fn text(text: impl Into<String>) -> Self {
        Span::Text(text.into())
    }

    /// The text a reader sees: markers dropped, link labels kept, equations kept with their
    /// delimiters.
    pub fn visible_text(&self) -> String {
        let mut out = String::new();
        self.write_visible(&mut out);
        out
    }

    fn write_visible(&self, out: &mut String) {
        match self {
            Span::Text(text) => out.push_str(text),
            Span::Bold(children) | Span::Italic(children) | Span::Underline(children) => {
                for child in children {
                    child.write_visible(out);
                }
            }
            Span::Link(link) => out.push_str(link.display_text()),
            Span::Equation(math) => out.push_str(&math.delimited_source()),
        }
    }
}

/// Visible text of a span sequence.
pub fn visible_text(spans: &[Span]) -> String {
    spans.iter().map(Span::visible_text).collect()
}

/// Formatting in effect for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        bold: false,
        italic: false,
        underline: false,
    };

    pub fn is_plain(&self) -> bool {
        *self == Style::PLAIN
    }
}

/// A leaf span (text, link or equation) with the formatting of all its ancestors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledRun {
    pub style: Style,
    pub span: Span,
}

/// Flatten a span tree into leaf runs in reading order.
pub fn flatten(spans: &[Span]) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    flatten_into(spans, Style::PLAIN, &mut runs);
    runs
}

fn flatten_into(spans: &[Span], style: Style, runs: &mut Vec<StyledRun>) {
    for span in spans {
        match span {
            Span::Bold(children) => flatten_into(children, Style { bold: true, ..style }, runs),
            Span::Italic(children) => {
                flatten_into(children, Style { italic: true, ..style }, runs)
            }
            Span::Underline(children) => flatten_into(
                children,
                Style {
                    underline: true,
                    ..style
                },
                runs,
            ),
            leaf => runs.push(StyledRun {
                style,
                span: leaf.clone(),
            }),
        }
    }
}

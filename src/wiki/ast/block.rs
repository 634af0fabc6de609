//! Blocks
//!
//! A [`Block`] is one structural unit of a document. Its `raw_text` is the content the block
//! was built from with the line markers removed: a heading's title, a list item's text after
//! the bullet, the verbatim body of a code block, the source of an equation block. For every
//! block that carries spans, the spans' visible text reproduces `raw_text` for plain content.

use super::inlines::{self, Span};
use super::range::Range;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub raw_text: String,
    /// Empty for code, media and blank blocks.
    pub spans: Vec<Span>,
    pub range: Range,
    /// Byte offset where `raw_text` begins in the source, for blocks read from one line.
    pub text_start: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum BlockKind {
    Heading { level: u8 },
    Paragraph,
    ListItem { level: usize, ordered: bool },
    Media(MediaRef),
    /// Carries exactly one display [`Span::Equation`] holding the whole source.
    EquationBlock,
    CodeBlock { language: Option<String> },
    Blank,
}

impl BlockKind {
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Heading { .. } => "heading",
            BlockKind::Paragraph => "paragraph",
            BlockKind::ListItem { .. } => "list_item",
            BlockKind::Media(_) => "media",
            BlockKind::EquationBlock => "equation_block",
            BlockKind::CodeBlock { .. } => "code_block",
            BlockKind::Blank => "blank",
        }
    }
}

impl Block {
    /// Heading depth or list nesting depth.
    pub fn level(&self) -> Option<usize> {
        match &self.kind {
            BlockKind::Heading { level } => Some(usize::from(*level)),
            BlockKind::ListItem { level, .. } => Some(*level),
            _ => None,
        }
    }

    pub fn visible_text(&self) -> String {
        inlines::visible_text(&self.spans)
    }

    pub fn is_blank(&self) -> bool {
        self.kind == BlockKind::Blank
    }
}

/// An embedded image or video: `{{ target?width|caption }}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRef {
    /// Path, URL or video id reference with size parameters removed.
    pub target: String,
    pub kind: MediaKind,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub caption: Option<String>,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "media")]
pub enum MediaKind {
    Image { external: bool },
    Video { provider: VideoProvider, id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoProvider {
    Youtube,
    Vimeo,
}

impl VideoProvider {
    pub fn watch_url(&self, id: &str) -> String {
        match self {
            VideoProvider::Youtube => format!("https://www.youtube.com/watch?v={id}"),
            VideoProvider::Vimeo => format!("https://vimeo.com/{id}"),
        }
    }
}

/// Placement from the padding inside the braces: `{{ a.png}}` is right-aligned,
/// `{{a.png }}` left-aligned, `{{ a.png }}` centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

static SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)(?:x(\d+))?$").unwrap());

impl MediaRef {
    /// Parse the text between `{{` and `}}`.
    pub fn parse(inner: &str) -> Self {
        let (target_part, caption) = match inner.split_once('|') {
            Some((target, caption)) => {
                let caption = caption.trim();
                (target, (!caption.is_empty()).then(|| caption.to_string()))
            }
            None => (inner, None),
        };
        let alignment = match (target_part.starts_with(' '), target_part.ends_with(' ')) {
            (true, true) => Alignment::Center,
            (true, false) => Alignment::Right,
            (false, true) => Alignment::Left,
            (false, false) => Alignment::None,
        };
        let target_part = target_part.trim();

        if let Some((provider, id)) = target_part.split_once('>') {
            let provider = match provider.trim().to_ascii_lowercase().as_str() {
                "youtube" => Some(VideoProvider::Youtube),
                "vimeo" => Some(VideoProvider::Vimeo),
                _ => None,
            };
            if let Some(provider) = provider {
                let id = id.split('?').next().unwrap_or_default().trim().to_string();
                return Self {
                    target: target_part.to_string(),
                    kind: MediaKind::Video { provider, id },
                    width: None,
                    height: None,
                    caption,
                    alignment,
                };
            }
        }

        let (path, params) = match target_part.split_once('?') {
            Some((path, params)) => (path.trim(), params),
            None => (target_part, ""),
        };
        let mut width = None;
        let mut height = None;
        for flag in params.split('&') {
            if let Some(caps) = SIZE.captures(flag.trim()) {
                width = caps.get(1).and_then(|m| m.as_str().parse().ok());
                height = caps.get(2).and_then(|m| m.as_str().parse().ok());
            }
        }
        let external = path.starts_with("http://") || path.starts_with("https://");
        Self {
            target: path.to_string(),
            kind: MediaKind::Image { external },
            width,
            height,
            caption,
            alignment,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self.kind, MediaKind::Video { .. })
    }

    /// Caption if present, otherwise a readable name for the media.
    pub fn alt_text(&self) -> String {
        if let Some(caption) = &self.caption {
            return caption.clone();
        }
        match &self.kind {
            MediaKind::Video { provider, id } => match provider {
                VideoProvider::Youtube => format!("YouTube video {id}"),
                VideoProvider::Vimeo => format!("Vimeo video {id}"),
            },
            MediaKind::Image { .. } => {
                let name = self
                    .target
                    .rsplit(['/', ':'])
                    .next()
                    .unwrap_or(&self.target);
                let stem = match name.rsplit_once('.') {
                    Some((stem, _)) if !stem.is_empty() => stem,
                    _ => name,
                };
                stem.replace(['_', '-'], " ")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_with_width_and_caption() {
        let media = MediaRef::parse("wiki:physics:momentum_diagram.png?400|Momentum diagram");
        assert_eq!(media.target, "wiki:physics:momentum_diagram.png");
        assert_eq!(media.kind, MediaKind::Image { external: false });
        assert_eq!(media.width, Some(400));
        assert_eq!(media.height, None);
        assert_eq!(media.caption.as_deref(), Some("Momentum diagram"));
        assert_eq!(media.alignment, Alignment::None);
    }

    #[test]
    fn test_dimensions_and_flags() {
        let media = MediaRef::parse("https://example.com/a.png?200x100&nolink");
        assert_eq!(media.kind, MediaKind::Image { external: true });
        assert_eq!((media.width, media.height), (Some(200), Some(100)));
    }

    #[test]
    fn test_alignment_from_padding() {
        assert_eq!(MediaRef::parse(" a.png").alignment, Alignment::Right);
        assert_eq!(MediaRef::parse("a.png ").alignment, Alignment::Left);
        assert_eq!(MediaRef::parse(" a.png |cap").alignment, Alignment::Center);
    }

    #[test]
    fn test_video_reference() {
        let media = MediaRef::parse("youtube>dQw4w9WgXcQ?large");
        assert_eq!(
            media.kind,
            MediaKind::Video {
                provider: VideoProvider::Youtube,
                id: "dQw4w9WgXcQ".into()
            }
        );
        assert_eq!(media.alt_text(), "YouTube video dQw4w9WgXcQ");
        assert_eq!(
            VideoProvider::Youtube.watch_url("abc"),
            "https://www.youtube.com/watch?v=abc"
        );
    }

    #[test]
    fn test_alt_text_from_file_stem() {
        assert_eq!(
            MediaRef::parse("wiki:momentum_diagram.png").alt_text(),
            "momentum diagram"
        );
        assert_eq!(MediaRef::parse("a.png|Given").alt_text(), "Given");
    }
}

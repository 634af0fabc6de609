//! Delimiter serializer
//!
//! The equation's own source between the delimiters a client-side math engine scans for. The
//! engine renders the source itself, so it goes out as written: `\dfrac`, `\left(` and
//! `\overline` reach the engine untouched. Only surrounding whitespace is trimmed and, when
//! configured, HTML special characters are escaped.
//!
//! Callers serialize only source that transpiled; [render](crate::wiki::render) handles the
//! rest. Which delimiter pair is used comes from the span or block the equation came from.

use super::MathMode;
use crate::wiki::config::MathConfig;

pub fn serialize(source: &str, mode: MathMode, config: &MathConfig) -> String {
    let (open, close) = match mode {
        MathMode::Inline => (&config.inline_open, &config.inline_close),
        MathMode::Display => (&config.display_open, &config.display_close),
    };
    let source = source.trim();
    if config.escape_html {
        format!("{open}{}{close}", html_escape::encode_text(source))
    } else {
        format!("{open}{source}{close}")
    }
}

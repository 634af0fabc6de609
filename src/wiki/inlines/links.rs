//! Link targets
//!
//! The text between `[[` and `]]` is `target` or `target|label`. The target is
//! classified once here so renderers never re-parse it.

use crate::wiki::ast::{Link, LinkTarget};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.+-]+@[\w-]+(?:\.[\w-]+)+$").unwrap());
static INTERWIKI: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Za-z0-9._-]+)>(.+)$").unwrap());

/// Parse the inside of a `[[..]]` link.
pub fn parse_link(inner: &str) -> Link {
    let (raw_target, label) = match inner.split_once('|') {
        Some((target, label)) => {
            let label = label.trim();
            (target.trim(), (!label.is_empty()).then(|| label.to_string()))
        }
        None => (inner.trim(), None),
    };
    Link {
        raw_target: raw_target.to_string(),
        label,
        target: classify_target(raw_target),
    }
}

fn classify_target(raw: &str) -> LinkTarget {
    if raw.contains("://") {
        return LinkTarget::External {
            url: raw.to_string(),
        };
    }
    if raw.starts_with("www.") {
        return LinkTarget::External {
            url: format!("http://{raw}"),
        };
    }
    if let Some(address) = raw.strip_prefix("mailto:") {
        return LinkTarget::Email {
            address: address.to_string(),
        };
    }
    if EMAIL.is_match(raw) {
        return LinkTarget::Email {
            address: raw.to_string(),
        };
    }
    if let Some(caps) = INTERWIKI.captures(raw) {
        return LinkTarget::Interwiki {
            wiki: caps[1].to_string(),
            page: caps[2].to_string(),
        };
    }
    let (page, anchor) = match raw.split_once('#') {
        Some((page, anchor)) => (page, (!anchor.is_empty()).then(|| anchor.to_string())),
        None => (raw, None),
    };
    LinkTarget::Internal {
        page: page.to_string(),
        anchor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://example.com/a?b=c", LinkTarget::External { url: "https://example.com/a?b=c".into() })]
    #[case("www.example.com", LinkTarget::External { url: "http://www.example.com".into() })]
    #[case("mailto:me@example.com", LinkTarget::Email { address: "me@example.com".into() })]
    #[case("me@example.com", LinkTarget::Email { address: "me@example.com".into() })]
    #[case("wp>Momentum", LinkTarget::Interwiki { wiki: "wp".into(), page: "Momentum".into() })]
    #[case("physics:momentum#conservation", LinkTarget::Internal { page: "physics:momentum".into(), anchor: Some("conservation".into()) })]
    #[case("#top", LinkTarget::Internal { page: String::new(), anchor: Some("top".into()) })]
    #[case("start", LinkTarget::Internal { page: "start".into(), anchor: None })]
    fn test_targets(#[case] raw: &str, #[case] expected: LinkTarget) {
        assert_eq!(parse_link(raw).target, expected);
    }

    #[test]
    fn test_label_is_optional() {
        let link = parse_link(" wiki:start | Home ");
        assert_eq!(link.raw_target, "wiki:start");
        assert_eq!(link.label.as_deref(), Some("Home"));
        assert_eq!(link.display_text(), "Home");

        let bare = parse_link("wiki:start|");
        assert_eq!(bare.label, None);
        assert_eq!(bare.display_text(), "wiki:start");
    }
}

//! Owned element tree
//!
//! A minimal XML tree for structured math output. Elements are built bottom-up and are
//! complete at construction, so a tree can never be observed half-built. `Display` writes
//! compact markup with no added whitespace, since whitespace inside `m:t` runs is content.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XmlNode {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children
            .extend(children.into_iter().map(XmlNode::Element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements, skipping text nodes.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// Concatenated text of this subtree in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Number of elements in this subtree, this one included.
    pub fn element_count(&self) -> usize {
        1 + self.elements().map(Element::element_count).sum::<usize>()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.name)?;
        for (name, value) in &self.attributes {
            write!(
                f,
                " {}=\"{}\"",
                name,
                html_escape::encode_double_quoted_attribute(value)
            )?;
        }
        if self.children.is_empty() {
            return write!(f, "/>");
        }
        write!(f, ">")?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.name)
    }
}

impl fmt::Display for XmlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlNode::Element(element) => write!(f, "{element}"),
            XmlNode::Text(text) => write!(f, "{}", html_escape::encode_text(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_element_self_closes() {
        let element = Element::new("m:deg");
        assert_eq!(element.to_string(), "<m:deg/>");
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let element = Element::new("m:r")
            .attr("note", "a \"b\" & c")
            .child(Element::new("m:t").text("x < y & z"));
        assert_eq!(
            element.to_string(),
            "<m:r note=\"a &quot;b&quot; &amp; c\"><m:t>x &lt; y &amp; z</m:t></m:r>"
        );
    }

    #[test]
    fn test_queries() {
        let element = Element::new("m:f")
            .child(Element::new("m:num").child(Element::new("m:t").text("a")))
            .child(Element::new("m:den").child(Element::new("m:t").text("b")));
        assert_eq!(element.element_count(), 5);
        assert_eq!(element.text_content(), "ab");
        assert!(element.find("m:den").is_some());
        assert!(element.find("m:e").is_none());
    }
}

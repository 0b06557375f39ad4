//! Declarative markup.
//!
//! Pages are built as a tree of [`Node`]s and serialized in one pass. Every
//! text node and attribute value is escaped on the way out, so strings that
//! come from a backend can be interpolated anywhere without producing markup.

use std::borrow::Cow;
use std::fmt;

pub mod page;
pub mod plain;

pub use page::{excerpt, render_image_panel, render_page, render_text_panel, EXCERPT_LIMIT};

const VOID_ELEMENTS: &[&str] = &["area", "br", "hr", "img", "input", "link", "meta"];

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Fragment(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    attrs: Vec<(&'static str, Option<String>)>,
    children: Vec<Node>,
}

pub fn el(tag: &'static str) -> Element {
    Element::new(tag)
}

pub fn text(content: impl Into<String>) -> Node {
    Node::Text(content.into())
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn class_if(self, class: &str, condition: bool) -> Self {
        if condition {
            self.class(class)
        } else {
            self
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, Some(value.into())));
        self
    }

    /// Boolean attribute such as `open` or `hidden`.
    pub fn flag(mut self, name: &'static str, condition: bool) -> Self {
        if condition {
            self.attrs.push((name, None));
        }
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(Node::Text(content.into()))
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, value)| value.as_deref())
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape(&self.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape(value));
                out.push('"');
            }
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

impl Node {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_to(out),
            Node::Text(content) => out.push_str(&escape(content)),
            Node::Fragment(nodes) => {
                for node in nodes {
                    node.write_to(out);
                }
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(content: String) -> Self {
        Node::Text(content)
    }
}

impl From<&str> for Node {
    fn from(content: &str) -> Self {
        Node::Text(content.to_string())
    }
}

impl From<Vec<Node>> for Node {
    fn from(nodes: Vec<Node>) -> Self {
        Node::Fragment(nodes)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(node: Option<T>) -> Self {
        node.map(Into::into).unwrap_or(Node::Fragment(Vec::new()))
    }
}

/// Escapes the five characters that are significant in text and quoted attributes.
pub fn escape(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 16);
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Serializes a full HTML document.
pub fn document(root: Element) -> String {
    format!("<!DOCTYPE html>{}", Node::from(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_nested_elements() {
        let node: Node = el("div")
            .id("textResult")
            .class("result-panel")
            .class_if("hidden", true)
            .child(el("span").attr("style", "color: #4ade80").text("85%"))
            .into();
        assert_eq!(
            node.render(),
            r##"<div class="result-panel hidden" id="textResult"><span style="color: #4ade80">85%</span></div>"##
        );
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let node: Node = el("p")
            .attr("title", "\"><script>alert(1)</script>")
            .text("<img src=x onerror=alert(1)> & 'quotes'")
            .into();
        let html = node.render();
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt; &amp; &#39;quotes&#39;"));
        assert!(html.contains("title=\"&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_void_elements_and_flags() {
        let node: Node = el("dialog")
            .flag("open", true)
            .flag("hidden", false)
            .child(el("img").attr("src", "data:image/png;base64,AAAA"))
            .into();
        assert_eq!(
            node.render(),
            r#"<dialog open><img src="data:image/png;base64,AAAA"></dialog>"#
        );
    }

    #[test]
    fn test_optional_children() {
        let none: Option<Element> = None;
        let node: Node = el("div").child(none).child(Some("x")).into();
        assert_eq!(node.render(), "<div>x</div>");
    }
}

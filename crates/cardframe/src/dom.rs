//! DOM environment seam.
//!
//! Cards don't build output nodes themselves; the hosting framework hands
//! them a [`DomEnvironment`] capability and receives whatever node type that
//! environment produces. A browser-backed host can hand in a real DOM
//! factory; tests and server-side hosts use the in-memory [`SimpleDom`].

/// Node-construction capability supplied by the hosting framework.
///
/// Cards need exactly two constructors: an empty-ish text node (the defined
/// fallback for invalid payloads) and a raw HTML section that the host
/// embeds without re-escaping.
pub trait DomEnvironment {
    /// The node type this environment produces.
    type Node;

    /// Creates a text node. Cards only ever create empty text nodes, as the
    /// placeholder output for payloads that cannot be rendered.
    fn create_text_node(&self, text: &str) -> Self::Node;

    /// Creates a section of raw, already-rendered HTML.
    fn create_raw_html_section(&self, html: &str) -> Self::Node;
}

/// In-memory [`DomEnvironment`] producing [`DomNode`] values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimpleDom;

/// Output node of [`SimpleDom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomNode {
    /// Plain text content.
    Text(String),
    /// Raw HTML embedded verbatim.
    RawHtml(String),
}

impl DomNode {
    /// The node's content, text or markup.
    pub fn as_str(&self) -> &str {
        match self {
            DomNode::Text(content) | DomNode::RawHtml(content) => content,
        }
    }

    /// Whether the node has no content at all.
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl DomEnvironment for SimpleDom {
    type Node = DomNode;

    fn create_text_node(&self, text: &str) -> DomNode {
        DomNode::Text(text.to_string())
    }

    fn create_raw_html_section(&self, html: &str) -> DomNode {
        DomNode::RawHtml(html.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_dom_builds_both_node_kinds() {
        assert_eq!(SimpleDom.create_text_node(""), DomNode::Text(String::new()));
        assert_eq!(
            SimpleDom.create_raw_html_section("<p>x</p>"),
            DomNode::RawHtml("<p>x</p>".to_string())
        );
    }

    #[test]
    fn empty_text_node_is_empty() {
        assert!(SimpleDom.create_text_node("").is_empty());
        assert!(!SimpleDom.create_raw_html_section("<p></p>").is_empty());
    }
}

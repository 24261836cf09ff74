//! HTML parsing support.
//!
//! This module parses HTML strings into the CDP-style Node structure used by
//! turndown.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML string into a Node tree.
///
/// The fragment is parsed the way a browser parses `innerHTML`, so missing
/// structure such as a `<tbody>` around bare table rows is filled in.
///
/// # Example
///
/// ```rust
/// use turndown::{parse_html, TurndownService};
///
/// let node = parse_html("<table><tr><td>1</td></tr></table>");
/// assert_eq!(node.tag_name(), "html");
///
/// let service = TurndownService::new();
/// let markdown = service.turndown(&node).unwrap();
/// assert_eq!(markdown, "1");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    scraper_to_node(document.root_element())
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();
    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();

    let mut node = Node::element_with_attrs(tag, attrs);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TurndownService;

    #[test]
    fn test_parse_simple_html() {
        let node = parse_html("<p>Hello World</p>");
        assert!(node.is_element());
        assert_eq!(node.tag_name(), "html");
        assert_eq!(node.element_children().count(), 1);
    }

    #[test]
    fn test_parse_keeps_attributes() {
        let node = parse_html(r#"<table><tr><th align="right">Age</th></tr></table>"#);
        let html = node.outer_html();
        assert!(html.contains("align=\"right\""), "{}", html);
    }

    #[test]
    fn test_parse_inserts_tbody() {
        let node = parse_html("<table><tr><td>1</td></tr></table>");
        let table = node.element_children().next().unwrap();
        let section = table.element_children().next().unwrap();
        assert_eq!(section.tag_name(), "tbody");
    }

    #[test]
    fn test_turndown_html() {
        let service = TurndownService::new();
        let result = service.turndown_html("<p>Hello World</p>").unwrap();
        assert_eq!(result, "Hello World");
    }

    #[test]
    fn test_turndown_html_drops_comments() {
        let service = TurndownService::new();
        let result = service
            .turndown_html("<p>Hello <!-- note -->World</p>")
            .unwrap();
        assert_eq!(result, "Hello World");
    }
}

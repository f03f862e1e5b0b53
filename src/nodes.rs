//! Turning editor HTML back into nodes.

use html::{DOMContent, Document};
use tracing::{debug, span, Level};

/// Result of [`parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// The first top-level node, `None` if the input produced no nodes.
    Node(Option<DOMContent>),
    Document(Document),
}

impl Parsed {
    pub fn into_node(self) -> Option<DOMContent> {
        match self {
            Parsed::Node(node) => node,
            Parsed::Document(doc) => doc.into_first(),
        }
    }

    pub fn into_document(self) -> Document {
        match self {
            Parsed::Node(node) => Document {
                children: node.into_iter().collect(),
            },
            Parsed::Document(doc) => doc,
        }
    }
}

/// Parse `html`, returning every top-level node if `multiple` is set and only
/// the first one otherwise.
pub fn parse(html: &str, multiple: bool) -> Parsed {
    let span = span!(Level::DEBUG, "Creating nodes", multiple);
    let _enter = span.enter();
    let doc = html::document(html);
    if multiple {
        Parsed::Document(doc)
    } else {
        if doc.is_empty() {
            debug!("no nodes in input");
        }
        Parsed::Node(doc.into_first())
    }
}

pub fn create_node(html: &str) -> Option<DOMContent> {
    parse(html, false).into_node()
}

pub fn create_document(html: &str) -> Document {
    parse(html, true).into_document()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build, Attributes, TagKind};
    use html::DOMElement;

    #[test]
    fn test_single_node() {
        let node = create_node("<p>a</p>").unwrap();
        assert_eq!(node, DOMContent::from(DOMElement::new("p", None, vec!["a".into()])));
    }

    #[test]
    fn test_multiple_nodes_in_order() {
        let doc = create_document("<p>a</p><p>b</p>");
        let texts: Vec<_> = doc
            .elements()
            .map(|e| (e.name.as_str(), e.text_content()))
            .collect();
        assert_eq!(texts, vec![("p", "a".to_string()), ("p", "b".to_string())]);
    }

    #[test]
    fn test_first_node_only() {
        match parse("<p>a</p><p>b</p>", false) {
            Parsed::Node(Some(DOMContent::Element(e))) => assert_eq!(e.text_content(), "a"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse("", false), Parsed::Node(None));
        assert_eq!(parse("", true), Parsed::Document(Document::default()));
        assert!(create_document("").is_empty());
    }

    #[test]
    fn test_parse_built_action() {
        let attrs = Attributes::from([("data-id", 7)]);
        let html = build(TagKind::Action, "jump", Some(&attrs));
        let doc = create_document(&html);
        let names: Vec<_> = doc.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["xiaoi-action", "xiaoi-empty"]);

        let action = create_node(&html).unwrap();
        let action = action.as_element().unwrap();
        assert_eq!(action.get_attribute("contenteditable").unwrap(), "false");
        assert_eq!(action.get_attribute("data-id").unwrap(), "7");
        let text = action.get_elements_by_name("xiaoi-text", false);
        assert_eq!(text[0].text_content(), "jump");
        assert_eq!(action.get_elements_by_name("xiaoi-img", false).len(), 1);
    }

    #[test]
    fn test_parse_built_paragraph() {
        let html = build(TagKind::Paragraph, "hi", None);
        let p = create_node(&html).unwrap();
        let p = p.as_element().unwrap();
        assert_eq!(p.name, "xiaoi-p");
        let names: Vec<_> = p
            .contents
            .iter()
            .filter_map(DOMContent::as_element)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["xiaoi-text", "xiaoi-br"]);
        assert_eq!(p.get_elements_by_name("br", true).len(), 1);
    }
}

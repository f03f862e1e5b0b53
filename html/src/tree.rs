use tracing::{debug, span, trace, Level};

use crate::parsing::{Token, Tokenizer};
use crate::{decode_entities, is_void, DOMAttributes, DOMContent, DOMElement, Document};

/// Whether opening `opening` implicitly closes a currently open `open` element.
fn implies_close(opening: &str, open: &str) -> bool {
    match open {
        "p" => matches!(
            opening,
            "address"
                | "article"
                | "aside"
                | "blockquote"
                | "div"
                | "dl"
                | "fieldset"
                | "footer"
                | "form"
                | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "header"
                | "hr"
                | "main"
                | "nav"
                | "ol"
                | "p"
                | "pre"
                | "section"
                | "table"
                | "ul"
        ),
        "li" => opening == "li",
        "option" => matches!(opening, "option" | "optgroup"),
        "dt" | "dd" => matches!(opening, "dt" | "dd"),
        "tr" => opening == "tr",
        "td" | "th" => matches!(opening, "td" | "th" | "tr"),
        _ => false,
    }
}

/// Builds a [`Document`] from [`Token`]s, keeping a stack of open elements.
#[derive(Default)]
struct TreeBuilder {
    root: Vec<DOMContent>,
    open: Vec<DOMElement>,
}

impl TreeBuilder {
    fn children(&mut self) -> &mut Vec<DOMContent> {
        match self.open.last_mut() {
            Some(e) => &mut e.contents,
            None => &mut self.root,
        }
    }

    fn append(&mut self, node: DOMContent) {
        self.children().push(node);
    }

    /// Append text, merging it into a directly preceding text node.
    fn append_text(&mut self, text: &str) {
        let children = self.children();
        if let Some(DOMContent::Text(last)) = children.last_mut() {
            last.push_str(text);
        } else {
            children.push(DOMContent::Text(text.to_string()));
        }
    }

    fn pop(&mut self) {
        if let Some(e) = self.open.pop() {
            self.append(e.into());
        }
    }

    fn open_element(&mut self, name: String, attributes: DOMAttributes) {
        while let Some(top) = self.open.last() {
            if !implies_close(&name, &top.name) {
                break;
            }
            trace!(closed = %top.name, by = %name, "implied close");
            self.pop();
        }
        let element = DOMElement::new(name, Some(attributes), vec![]);
        if is_void(&element.name) {
            self.append(element.into());
        } else {
            self.open.push(element);
        }
    }

    fn close_element(&mut self, name: &str) {
        if is_void(name) {
            // `</br>` is treated as `<br>`, other void closing tags are dropped
            if name == "br" {
                self.append(DOMElement::new("br", None, vec![]).into());
            }
            return;
        }
        match self.open.iter().rposition(|e| e.name == name) {
            Some(idx) => {
                while self.open.len() > idx {
                    self.pop();
                }
            }
            None if name == "p" => {
                self.append(DOMElement::new("p", None, vec![]).into());
            }
            None => trace!(%name, "dropping unmatched closing tag"),
        }
    }

    fn push(&mut self, token: Token<'_>) {
        match token {
            Token::Open {
                name,
                attributes,
                self_closing,
            } => {
                if self_closing && !is_void(&name) {
                    trace!(%name, "ignoring self-closing syntax on non-void element");
                }
                self.open_element(name, attributes)
            }
            Token::Close(name) => self.close_element(&name),
            Token::Text(text) => self.append_text(&decode_entities(text)),
            Token::RawText(text) => self.append_text(text),
            Token::Comment(text) => self.append(DOMContent::Comment(text.to_string())),
            Token::Directive(text) => self.append(DOMContent::Directive(text.to_string())),
        }
    }

    fn finish(mut self) -> Document {
        if !self.open.is_empty() {
            trace!(unclosed = self.open.len(), "closing elements at end of input");
        }
        while !self.open.is_empty() {
            self.pop();
        }
        Document {
            children: self.root,
        }
    }
}

/// Parse `input` into a [`Document`].
pub fn document(input: &str) -> Document {
    let span = span!(Level::DEBUG, "Parsing document", len = input.len());
    let _enter = span.enter();
    let mut builder = TreeBuilder::default();
    for token in Tokenizer::new(input) {
        builder.push(token);
    }
    let doc = builder.finish();
    debug!(nodes = doc.children.len(), "parsed document");
    doc
}

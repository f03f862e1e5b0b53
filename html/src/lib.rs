//! Lenient HTML parsing into a small DOM.
//!
//! [`document`] never fails: malformed markup is recovered the way common
//! HTML parsers do it (stray closing tags dropped, unclosed elements closed
//! at the end of input, void elements never take children).

use indexmap::IndexMap;

mod entities;
mod parsing;
mod serialize;
mod tree;

#[cfg(test)]
mod tests;

pub use entities::decode_entities;
pub use parsing::{Token, Tokenizer};
pub use tree::document;

/// Elements which never have contents and are written without a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose contents are taken verbatim up to the matching closing tag.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Elements whose contents run up to the matching closing tag without being
/// parsed as markup, but still have their character references decoded.
pub const RCDATA_ELEMENTS: &[&str] = &["textarea", "title"];

pub fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub fn is_raw_text(name: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&name)
}

pub fn is_rcdata(name: &str) -> bool {
    RCDATA_ELEMENTS.contains(&name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<DOMContent>,
}

impl Document {
    /// The first top-level node, if the document has any.
    pub fn first(&self) -> Option<&DOMContent> {
        self.children.first()
    }

    pub fn into_first(self) -> Option<DOMContent> {
        self.children.into_iter().next()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Top-level elements, skipping text, comments and directives.
    pub fn elements(&self) -> impl Iterator<Item = &DOMElement> {
        self.children.iter().filter_map(DOMContent::as_element)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DOMContent {
    Element(DOMElement),
    Text(String),
    Comment(String),
    /// `<!doctype ...>` or `<?...>`, stored without the angle brackets.
    Directive(String),
}

impl DOMContent {
    pub fn as_element(&self) -> Option<&DOMElement> {
        match self {
            DOMContent::Element(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DOMElement> for DOMContent {
    fn from(e: DOMElement) -> Self {
        DOMContent::Element(e)
    }
}

impl From<&str> for DOMContent {
    fn from(s: &str) -> Self {
        DOMContent::Text(s.to_string())
    }
}

impl From<String> for DOMContent {
    fn from(s: String) -> Self {
        DOMContent::Text(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DOMElement {
    pub name: String,
    pub attributes: DOMAttributes,
    pub contents: Vec<DOMContent>,
}

impl DOMElement {
    pub fn new(
        name: impl Into<String>,
        attributes: Option<DOMAttributes>,
        contents: Vec<DOMContent>,
    ) -> Self {
        Self {
            name: name.into(),
            attributes: attributes.unwrap_or_default(),
            contents,
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<&String> {
        self.attributes.get(name)
    }

    /// Child elements called `name`, descending into every level if `recursive`.
    pub fn get_elements_by_name(&self, name: &str, recursive: bool) -> Vec<&DOMElement> {
        let mut found = Vec::new();
        for child in self.contents.iter().filter_map(DOMContent::as_element) {
            if child.name == name {
                found.push(child);
            }
            if recursive {
                found.extend(child.get_elements_by_name(name, true));
            }
        }
        found
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for c in &self.contents {
            match c {
                DOMContent::Text(t) => text.push_str(t),
                DOMContent::Element(e) => text.push_str(&e.text_content()),
                _ => {}
            }
        }
        text
    }
}

/// Attributes of an element, kept in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DOMAttributes(pub IndexMap<String, String>);

impl DOMAttributes {
    pub fn empty() -> Self {
        Self(IndexMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Insert unless `name` is already present; the first occurrence wins.
    pub fn insert_first(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&String> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[macro_export]
macro_rules! attributes {
    ($($k:literal => $v:literal),* $(,)?) => {{
        let mut attrs = $crate::DOMAttributes::empty();
        $(attrs.insert($k, $v);)*
        attrs
    }};
}

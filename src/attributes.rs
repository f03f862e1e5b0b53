use std::fmt::Display;

use indexmap::IndexMap;

use crate::config::AttributeEscaping;

/// Attributes for the outermost element of a fragment, written in insertion order.
///
/// Re-inserting a name replaces its value but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.0.insert(name.into(), value.to_string());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as `name="value" ` pairs. Every pair, the last one included, is
    /// followed by a space; an empty map renders as an empty string.
    pub fn to_html(&self, escaping: AttributeEscaping) -> String {
        let mut html = String::new();
        for (name, value) in self.iter() {
            html.push_str(name);
            html.push_str("=\"");
            html.push_str(&escaping.apply(value));
            html.push_str("\" ");
        }
        html
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

impl<K: Into<String>, V: Display, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
#[test]
fn test_to_html_keeps_order_and_trailing_space() {
    let attrs = Attributes::from([("id", "1"), ("class", "x")]);
    assert_eq!(attrs.to_html(AttributeEscaping::Verbatim), r#"id="1" class="x" "#);
    assert_eq!(Attributes::new().to_html(AttributeEscaping::Verbatim), "");
}

#[cfg(test)]
#[test]
fn test_primitive_values() {
    let attrs = Attributes::new()
        .with("data-time", 500)
        .with("data-strong", true)
        .with("data-rate", 1.5);
    assert_eq!(
        attrs.to_html(AttributeEscaping::Verbatim),
        r#"data-time="500" data-strong="true" data-rate="1.5" "#
    );
}

#[cfg(test)]
#[test]
fn test_reinsert_keeps_position() {
    let mut attrs = Attributes::from([("a", "1"), ("b", "2")]);
    attrs.insert("a", "3");
    assert_eq!(attrs.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
    assert_eq!(attrs.get("a"), Some("3"));
    assert_eq!(attrs.len(), 2);
}

#[cfg(test)]
#[test]
fn test_verbatim_and_escaped_values() {
    let attrs = Attributes::from([("title", r#"say "hi""#)]);
    assert_eq!(
        attrs.to_html(AttributeEscaping::Verbatim),
        r#"title="say "hi"" "#
    );
    assert_eq!(
        attrs.to_html(AttributeEscaping::Html),
        r#"title="say &quot;hi&quot;" "#
    );
}

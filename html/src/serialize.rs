use std::fmt::{self, Display, Formatter, Write};

use crate::{is_raw_text, is_void, DOMAttributes, DOMContent, DOMElement, Document};

fn write_escaped(f: &mut Formatter<'_>, text: &str, attribute: bool) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '"' if attribute => f.write_str("&quot;")?,
            '<' if !attribute => f.write_str("&lt;")?,
            '>' if !attribute => f.write_str("&gt;")?,
            c => f.write_char(c)?,
        }
    }
    Ok(())
}

impl Display for DOMAttributes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (k, v) in self.iter() {
            write!(f, " {}=\"", k)?;
            write_escaped(f, v, true)?;
            f.write_char('"')?;
        }
        Ok(())
    }
}

impl Display for DOMElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "<{}{}>", self.name, self.attributes)?;
        if is_void(&self.name) {
            return Ok(());
        }
        for c in &self.contents {
            match c {
                DOMContent::Text(t) if is_raw_text(&self.name) => f.write_str(t)?,
                c => write!(f, "{}", c)?,
            }
        }
        write!(f, "</{}>", self.name)
    }
}

impl Display for DOMContent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DOMContent::Element(e) => write!(f, "{}", e),
            DOMContent::Text(t) => write_escaped(f, t, false),
            DOMContent::Comment(c) => write!(f, "<!--{}-->", c),
            DOMContent::Directive(d) => write!(f, "<{}>", d),
        }
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for c in &self.children {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[test]
fn test_element_display() {
    use crate::attributes;
    let e = DOMElement::new(
        "xiaoi-p",
        Some(attributes!("id" => "1", "title" => "say \"hi\" & go")),
        vec![
            DOMElement::new("xiaoi-text", None, vec!["a < b".into()]).into(),
            DOMElement::new("br", None, vec![]).into(),
        ],
    );
    assert_eq!(
        e.to_string(),
        r#"<xiaoi-p id="1" title="say &quot;hi&quot; &amp; go"><xiaoi-text>a &lt; b</xiaoi-text><br></xiaoi-p>"#
    );
}

#[cfg(test)]
#[test]
fn test_raw_text_not_escaped() {
    let e = DOMElement::new("style", None, vec!["a > b {}".into()]);
    assert_eq!(e.to_string(), "<style>a > b {}</style>");
}

use super::*;
use crate::attributes;

fn element(name: &str, attributes: Option<DOMAttributes>, contents: Vec<DOMContent>) -> DOMContent {
    DOMElement::new(name, attributes, contents).into()
}

#[test]
fn test_document() {
    let i = r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"/><title>The minimal, valid HTML5 document</title></head><body><!-- User-visible content goes in the body --><p>Some paragraph</p>Some untagged text</body></html>"#;
    let target = Document {
        children: vec![
            DOMContent::Directive("!DOCTYPE html".to_string()),
            element(
                "html",
                Some(attributes!("lang" => "en")),
                vec![
                    element(
                        "head",
                        None,
                        vec![
                            element("meta", Some(attributes!("charset" => "utf-8")), vec![]),
                            element(
                                "title",
                                None,
                                vec!["The minimal, valid HTML5 document".into()],
                            ),
                        ],
                    ),
                    element(
                        "body",
                        None,
                        vec![
                            DOMContent::Comment(" User-visible content goes in the body ".to_string()),
                            element("p", None, vec!["Some paragraph".into()]),
                            "Some untagged text".into(),
                        ],
                    ),
                ],
            ),
        ],
    };
    assert_eq!(document(i), target);
}

#[test]
fn test_editor_fragment() {
    let i = r#"<xiaoi-action contenteditable="false" id="1" ><xiaoi-text>go</xiaoi-text><xiaoi-img >x</xiaoi-img></xiaoi-action><xiaoi-empty >&#xFEFF;</xiaoi-empty>"#;
    let doc = document(i);
    assert_eq!(doc.children.len(), 2);
    let action = doc.children[0].as_element().unwrap();
    assert_eq!(action.name, "xiaoi-action");
    assert_eq!(action.get_attribute("contenteditable"), Some(&"false".to_string()));
    assert_eq!(action.get_attribute("id"), Some(&"1".to_string()));
    assert_eq!(action.get_elements_by_name("xiaoi-text", false).len(), 1);
    assert_eq!(action.text_content(), "gox");
    let empty = doc.children[1].as_element().unwrap();
    assert_eq!(empty.name, "xiaoi-empty");
    assert_eq!(empty.contents, vec![DOMContent::Text("\u{feff}".to_string())]);
}

#[test]
fn test_void_elements_take_no_children() {
    let doc = document("<xiaoi-br ><br />after</xiaoi-br>");
    assert_eq!(
        doc.children,
        vec![element(
            "xiaoi-br",
            None,
            vec![element("br", None, vec![]), "after".into()],
        )]
    );
}

#[test]
fn test_self_closing_non_void_stays_open() {
    let doc = document("<span/>text");
    assert_eq!(doc.children, vec![element("span", None, vec!["text".into()])]);
}

#[test]
fn test_unclosed_elements_closed_at_end() {
    let doc = document("<div><span>a");
    assert_eq!(
        doc.children,
        vec![element("div", None, vec![element("span", None, vec!["a".into()])])]
    );
}

#[test]
fn test_closing_tag_pops_to_match() {
    let doc = document("<div><b><i>x</div>y");
    assert_eq!(
        doc.children,
        vec![
            element(
                "div",
                None,
                vec![element("b", None, vec![element("i", None, vec!["x".into()])])],
            ),
            "y".into(),
        ]
    );
}

#[test]
fn test_unmatched_closing_tags() {
    let doc = document("a</span>b");
    assert_eq!(doc.children, vec![DOMContent::from("ab")]);

    let doc = document("</br></p>");
    assert_eq!(
        doc.children,
        vec![element("br", None, vec![]), element("p", None, vec![])]
    );
}

#[test]
fn test_implied_close() {
    let doc = document("<p>a<p>b<div>c</div>");
    assert_eq!(
        doc.children,
        vec![
            element("p", None, vec!["a".into()]),
            element("p", None, vec!["b".into()]),
            element("div", None, vec!["c".into()]),
        ]
    );

    let doc = document("<ul><li>1<li>2</ul>");
    assert_eq!(
        doc.children,
        vec![element(
            "ul",
            None,
            vec![
                element("li", None, vec!["1".into()]),
                element("li", None, vec!["2".into()]),
            ],
        )]
    );
}

#[test]
fn test_names_are_lower_cased() {
    let doc = document(r#"<DIV ID="a">x</Div>"#);
    assert_eq!(
        doc.children,
        vec![element("div", Some(attributes!("id" => "a")), vec!["x".into()])]
    );
}

#[test]
fn test_whitespace_text_is_kept() {
    let doc = document("<p>a</p>\n<p>b</p>");
    assert_eq!(doc.children.len(), 3);
    assert_eq!(doc.children[1], DOMContent::from("\n"));
    assert_eq!(doc.elements().count(), 2);
}

#[test]
fn test_empty_document() {
    let doc = document("");
    assert!(doc.is_empty());
    assert_eq!(doc.first(), None);
    assert_eq!(doc.into_first(), None);
}

#[test]
fn test_serialize_round_trip() {
    let i = r#"<xiaoi-p id="1" ><xiaoi-text>hi</xiaoi-text><xiaoi-br ><br /></xiaoi-br></xiaoi-p>"#;
    assert_eq!(
        document(i).to_string(),
        r#"<xiaoi-p id="1"><xiaoi-text>hi</xiaoi-text><xiaoi-br><br></xiaoi-br></xiaoi-p>"#
    );
}

#[test]
fn test_attributes_without_separating_space() {
    let doc = document(r#"<div a="1"b="2">x</div>"#);
    assert_eq!(
        doc.children,
        vec![element(
            "div",
            Some(attributes!("a" => "1", "b" => "2")),
            vec!["x".into()],
        )]
    );
}

#[test]
fn test_attribute_with_missing_value() {
    let doc = document("<a b=>x</a>");
    assert_eq!(
        doc.children,
        vec![element("a", Some(attributes!("b" => "")), vec!["x".into()])]
    );
}

#[test]
fn test_unterminated_quoted_attribute() {
    let doc = document(r#"<a title="x>y</a>"#);
    assert_eq!(
        doc.children,
        vec![element("a", Some(attributes!("title" => "x")), vec!["y".into()])]
    );

    let doc = document("<a title='x>y</a>");
    assert_eq!(
        doc.children,
        vec![element("a", Some(attributes!("title" => "x")), vec!["y".into()])]
    );
}

#[test]
fn test_text_references_decoded() {
    let doc = document("<p>a&hellip;b&copy;&amp c</p>");
    assert_eq!(
        doc.children,
        vec![element("p", None, vec!["a\u{2026}b\u{a9}& c".into()])]
    );
}

#[test]
fn test_rcdata_elements_decoded() {
    let doc = document("<textarea>&lt;b&gt;</textarea><title>a &amp; b</title>");
    assert_eq!(
        doc.children,
        vec![
            element("textarea", None, vec!["<b>".into()]),
            element("title", None, vec!["a & b".into()]),
        ]
    );
    // decoded text is escaped again on the way out
    assert_eq!(
        doc.to_string(),
        "<textarea>&lt;b&gt;</textarea><title>a &amp; b</title>"
    );
}

#[test]
fn test_raw_text_elements_not_decoded() {
    let doc = document("<script>a &amp;&amp; b</script>");
    assert_eq!(
        doc.children,
        vec![element("script", None, vec!["a &amp;&amp; b".into()])]
    );
}

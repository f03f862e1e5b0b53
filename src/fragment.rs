//! HTML fragments for the editor's SSML markup.
//!
//! Every fragment is a custom element named `{prefix}-{kind}`. Attributes are
//! only ever written onto the outermost element of a fragment; nested
//! fragments are always rendered without any.

use lazy_static::lazy_static;
use tracing::trace;

use crate::{Attributes, FragmentConfig, Result, TagKind};

lazy_static! {
    static ref DEFAULT_BUILDER: FragmentBuilder = FragmentBuilder::default();
}

/// Render `kind` with the default configuration.
pub fn build(kind: TagKind, text: &str, attributes: Option<&Attributes>) -> String {
    DEFAULT_BUILDER.build(kind, text, attributes)
}

/// Render the kind called `name` with the default configuration.
pub fn build_named(name: &str, text: &str, attributes: Option<&Attributes>) -> Result<String> {
    DEFAULT_BUILDER.build_named(name, text, attributes)
}

#[derive(Debug, Clone, Default)]
pub struct FragmentBuilder {
    config: FragmentConfig,
}

impl FragmentBuilder {
    pub fn new(config: FragmentConfig) -> Self {
        Self { config }
    }

    fn prefix(&self) -> &str {
        &self.config.prefix
    }

    /// Render a fragment of the given kind.
    ///
    /// `text` is used by paragraphs, text, actions and pauses and ignored by
    /// the other kinds. Neither `text` nor verbatim attribute values are
    /// escaped.
    pub fn build(&self, kind: TagKind, text: &str, attributes: Option<&Attributes>) -> String {
        let attrs = attributes
            .map(|a| self.attributes_html(a))
            .unwrap_or_default();
        trace!(%kind, text_len = text.len(), attrs = %attrs, "building fragment");
        match kind {
            TagKind::Paragraph => self.paragraph(text, &attrs),
            TagKind::Text => self.text(text),
            TagKind::LineBreak => self.line_break(&attrs),
            TagKind::Empty => self.empty(&attrs),
            TagKind::Action => self.marker(TagKind::Action, text, &attrs),
            TagKind::Pause => self.marker(TagKind::Pause, text, &attrs),
            TagKind::Image => self.image(&attrs),
        }
    }

    /// Like [`FragmentBuilder::build`], looking the kind up by name (`p`, `text`, `br`...).
    pub fn build_named(
        &self,
        name: &str,
        text: &str,
        attributes: Option<&Attributes>,
    ) -> Result<String> {
        let kind = name.parse()?;
        Ok(self.build(kind, text, attributes))
    }

    pub fn attributes_html(&self, attributes: &Attributes) -> String {
        attributes.to_html(self.config.escaping)
    }

    /// `<p-p attrs>` with an optional text fragment, always ending in a line break.
    pub fn paragraph(&self, text: &str, attrs: &str) -> String {
        let text_html = if text.is_empty() {
            String::new()
        } else {
            self.text(text)
        };
        format!(
            "<{p}-p {attrs}>{text_html}{br}</{p}-p>",
            p = self.prefix(),
            attrs = attrs,
            text_html = text_html,
            br = self.line_break(""),
        )
    }

    pub fn text(&self, text: &str) -> String {
        format!("<{p}-text>{text}</{p}-text>", p = self.prefix(), text = text)
    }

    pub fn image(&self, attrs: &str) -> String {
        format!("<{p}-img {attrs}>x</{p}-img>", p = self.prefix(), attrs = attrs)
    }

    pub fn line_break(&self, attrs: &str) -> String {
        format!(
            "<{p}-br {attrs}><br /></{p}-br>",
            p = self.prefix(),
            attrs = attrs
        )
    }

    /// Zero-width node, holding a single U+FEFF.
    pub fn empty(&self, attrs: &str) -> String {
        format!(
            "<{p}-empty {attrs}>&#xFEFF;</{p}-empty>",
            p = self.prefix(),
            attrs = attrs
        )
    }

    pub fn action(&self, text: &str, attrs: &str) -> String {
        self.marker(TagKind::Action, text, attrs)
    }

    pub fn pause(&self, text: &str, attrs: &str) -> String {
        self.marker(TagKind::Pause, text, attrs)
    }

    /// A non-editable marker holding a label and an icon, followed by an
    /// empty node as its sibling so the caret can be placed after it.
    fn marker(&self, kind: TagKind, text: &str, attrs: &str) -> String {
        let name = kind.element_name(self.prefix());
        format!(
            "<{name} contenteditable=\"false\" {attrs}>{text}{img}</{name}>{empty}",
            name = name,
            attrs = attrs,
            text = self.text(text),
            img = self.image(""),
            empty = self.empty(""),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributeEscaping, Error};

    fn attrs() -> Attributes {
        Attributes::from([("id", "1"), ("class", "x")])
    }

    #[test]
    fn test_text() {
        assert_eq!(build(TagKind::Text, "hello", None), "<xiaoi-text>hello</xiaoi-text>");
        // attributes never reach a text fragment
        assert_eq!(
            build(TagKind::Text, "hello", Some(&attrs())),
            "<xiaoi-text>hello</xiaoi-text>"
        );
    }

    #[test]
    fn test_line_break() {
        assert_eq!(build(TagKind::LineBreak, "", None), "<xiaoi-br ><br /></xiaoi-br>");
        assert_eq!(
            build(TagKind::LineBreak, "ignored", Some(&attrs())),
            r#"<xiaoi-br id="1" class="x" ><br /></xiaoi-br>"#
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            build(TagKind::Empty, "", None),
            "<xiaoi-empty >&#xFEFF;</xiaoi-empty>"
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            build(TagKind::Image, "src.png", Some(&attrs())),
            r#"<xiaoi-img id="1" class="x" >x</xiaoi-img>"#
        );
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(
            build(TagKind::Paragraph, "hi", None),
            "<xiaoi-p ><xiaoi-text>hi</xiaoi-text><xiaoi-br ><br /></xiaoi-br></xiaoi-p>"
        );
        // the line break stays even without text, and never gets the attributes
        assert_eq!(
            build(TagKind::Paragraph, "", Some(&attrs())),
            r#"<xiaoi-p id="1" class="x" ><xiaoi-br ><br /></xiaoi-br></xiaoi-p>"#
        );
    }

    #[test]
    fn test_action() {
        assert_eq!(
            build(TagKind::Action, "go", Some(&attrs())),
            concat!(
                r#"<xiaoi-action contenteditable="false" id="1" class="x" >"#,
                "<xiaoi-text>go</xiaoi-text><xiaoi-img >x</xiaoi-img>",
                "</xiaoi-action>",
                "<xiaoi-empty >&#xFEFF;</xiaoi-empty>",
            )
        );
        assert_eq!(
            FragmentBuilder::default().action("go", r#"id="1" class="x" "#),
            build(TagKind::Action, "go", Some(&attrs()))
        );
    }

    #[test]
    fn test_pause() {
        let builder = FragmentBuilder::default();
        assert_eq!(
            builder.build(TagKind::Pause, "", None),
            concat!(
                r#"<xiaoi-pause contenteditable="false" >"#,
                "<xiaoi-text></xiaoi-text><xiaoi-img >x</xiaoi-img>",
                "</xiaoi-pause>",
                "<xiaoi-empty >&#xFEFF;</xiaoi-empty>",
            )
        );
        assert_eq!(builder.pause("", ""), builder.build(TagKind::Pause, "", None));
    }

    #[test]
    fn test_wrapping_tag_appears_once() {
        let builder = FragmentBuilder::default();
        for kind in TagKind::PUBLIC {
            let html = builder.build(kind, "t", Some(&attrs()));
            let name = kind.element_name("xiaoi");
            assert_eq!(html.matches(&format!("<{}", name)).count(), 1, "{}", html);
            assert_eq!(html.matches(&format!("</{}>", name)).count(), 1, "{}", html);
        }
    }

    #[test]
    fn test_custom_prefix() {
        let builder = FragmentBuilder::new(FragmentConfig::with_prefix("ssml"));
        assert_eq!(
            builder.build(TagKind::Paragraph, "a", None),
            "<ssml-p ><ssml-text>a</ssml-text><ssml-br ><br /></ssml-br></ssml-p>"
        );
        assert!(!builder.build(TagKind::Action, "a", None).contains("xiaoi"));
    }

    #[test]
    fn test_attribute_escaping_policy() {
        let attrs = Attributes::from([("data-label", "\"><script>")]);
        assert_eq!(
            build(TagKind::LineBreak, "", Some(&attrs)),
            r#"<xiaoi-br data-label=""><script>" ><br /></xiaoi-br>"#
        );
        let builder = FragmentBuilder::new(FragmentConfig {
            escaping: AttributeEscaping::Html,
            ..Default::default()
        });
        assert_eq!(
            builder.build(TagKind::LineBreak, "", Some(&attrs)),
            r#"<xiaoi-br data-label="&quot;&gt;&lt;script&gt;" ><br /></xiaoi-br>"#
        );
    }

    #[test]
    fn test_empty_attributes_render_nothing() {
        assert_eq!(
            build(TagKind::Empty, "", Some(&Attributes::new())),
            build(TagKind::Empty, "", None)
        );
    }

    #[test]
    fn test_build_named() {
        assert_eq!(
            build_named("text", "hello", None).unwrap(),
            "<xiaoi-text>hello</xiaoi-text>"
        );
        assert_eq!(
            build_named("img", "", None).unwrap(),
            "<xiaoi-img >x</xiaoi-img>"
        );
        assert!(matches!(
            build_named("unknown-kind", "", None),
            Err(Error::UnknownTagKind(_))
        ));
    }

    #[test]
    fn test_idempotent() {
        for kind in TagKind::PUBLIC {
            assert_eq!(
                build(kind, "same", Some(&attrs())),
                build(kind, "same", Some(&attrs()))
            );
        }
    }
}

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_till, take_till1, take_until, take_while},
    character::complete::{char, multispace0, one_of, satisfy},
    combinator::{map, opt, recognize, rest},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use tracing::trace;

use crate::{decode_entities, is_raw_text, is_rcdata, DOMAttributes};

/// A lexical unit of HTML source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Open {
        name: String,
        attributes: DOMAttributes,
        self_closing: bool,
    },
    Close(String),
    /// Character data, still carrying its character references.
    Text(&'a str),
    /// Contents of a raw text element such as `<script>`, taken verbatim.
    RawText(&'a str),
    Comment(&'a str),
    Directive(&'a str),
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')
}

/// Parse a tag name, which must start with an ASCII letter. Names are lower-cased.
fn parse_tag_name(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(satisfy(|c: char| c.is_ascii_alphabetic()), take_while(is_name_char))),
        |s: &str| s.to_ascii_lowercase(),
    )(input)
}

/// `<!-- ... -->`; an unterminated comment runs to the end of input
fn parse_comment(input: &str) -> IResult<&str, Token<'_>> {
    map(
        preceded(
            tag("<!--"),
            alt((terminated(take_until("-->"), tag("-->")), rest)),
        ),
        Token::Comment,
    )(input)
}

/// `<!DOCTYPE html>` or `<?xml ...?>`, returning the text between the brackets
fn parse_directive(input: &str) -> IResult<&str, Token<'_>> {
    map(
        delimited(
            char('<'),
            recognize(pair(one_of("!?"), take_until(">"))),
            char('>'),
        ),
        Token::Directive,
    )(input)
}

/// Parse a tag in the form `</name>`, returning `name`
fn parse_close_tag(input: &str) -> IResult<&str, Token<'_>> {
    let (remaining, (_, name, _, _)) =
        tuple((tag("</"), parse_tag_name, take_until(">"), char('>')))(input)?;
    Ok((remaining, Token::Close(name)))
}

/// Parse a tag in the form `<name attr=value ...>` or `<name ... />`
fn parse_open_tag(input: &str) -> IResult<&str, Token<'_>> {
    let (remaining, (_, name, attrs, _, slash, _)) = tuple((
        char('<'),
        parse_tag_name,
        many0(preceded(multispace0, parse_attribute)),
        multispace0,
        opt(char('/')),
        char('>'),
    ))(input)?;
    let mut attributes = DOMAttributes::empty();
    for (k, v) in attrs {
        attributes.insert_first(k.to_ascii_lowercase(), decode_entities(v).into_owned());
    }
    Ok((
        remaining,
        Token::Open {
            name,
            attributes,
            self_closing: slash.is_some(),
        },
    ))
}

fn parse_text(input: &str) -> IResult<&str, Token<'_>> {
    map(take_till1(|c: char| c == '<'), Token::Text)(input)
}

fn parse_token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        parse_comment,
        parse_directive,
        parse_close_tag,
        parse_open_tag,
        parse_text,
    ))(input)
}

// Attribute parsing below

/// A quote with no closing partner runs up to the end of the tag
fn parse_double_quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_until("\""), char('"')),
        preceded(char('"'), take_till(|c: char| c == '>')),
    ))(input)
}

fn parse_single_quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), take_until("'"), char('\'')),
        preceded(char('\''), take_till(|c: char| c == '>')),
    ))(input)
}

fn parse_unquoted(input: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n\"'=<>`")(input)
}

fn value_parser(input: &str) -> IResult<&str, &str> {
    alt((parse_double_quoted, parse_single_quoted, parse_unquoted))(input)
}

fn name_parser(input: &str) -> IResult<&str, &str> {
    is_not(" \t\r\n\"'>/=")(input)
}

/// `name`, `name=value`, `name="value"` or `name='value'`. A bare name, or a
/// name followed by `=` and no value, has an empty value.
fn parse_attribute(input: &str) -> IResult<&str, (&str, &str)> {
    let (r, (name, value)) = pair(
        name_parser,
        opt(preceded(
            delimited(multispace0, char('='), multispace0),
            opt(value_parser),
        )),
    )(input)?;
    Ok((r, (name, value.flatten().unwrap_or(""))))
}

/// Consume everything up to the closing tag of the raw text element `name`.
fn take_raw_text<'a>(input: &'a str, name: &str) -> (&'a str, &'a str) {
    // ASCII lower-casing keeps byte offsets intact
    let lower = input.to_ascii_lowercase();
    match lower.find(&format!("</{}", name)) {
        Some(idx) => (&input[idx..], &input[..idx]),
        None => ("", input),
    }
}

/// Splits HTML source into [`Token`]s. Never fails: a `<` which does not
/// start a tag, comment or directive is returned as text.
pub struct Tokenizer<'a> {
    input: &'a str,
    raw_text: Option<String>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            raw_text: None,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(name) = self.raw_text.take() {
            let (remaining, text) = take_raw_text(self.input, &name);
            self.input = remaining;
            if !text.is_empty() {
                trace!(element = %name, len = text.len(), "raw text");
                // textarea and title still have their character references decoded
                return Some(if is_rcdata(&name) {
                    Token::Text(text)
                } else {
                    Token::RawText(text)
                });
            }
        }
        if self.input.is_empty() {
            return None;
        }
        let (remaining, token) = match parse_token(self.input) {
            Ok(ok) => ok,
            Err(_) => (&self.input[1..], Token::Text(&self.input[..1])),
        };
        if let Token::Open { name, .. } = &token {
            if is_raw_text(name) || is_rcdata(name) {
                self.raw_text = Some(name.clone());
            }
        }
        trace!(?token, "token");
        self.input = remaining;
        Some(token)
    }
}

#[cfg(test)]
use crate::attributes;

#[cfg(test)]
fn open(name: &str, attributes: DOMAttributes, self_closing: bool) -> Token<'static> {
    Token::Open {
        name: name.to_string(),
        attributes,
        self_closing,
    }
}

#[cfg(test)]
#[test]
fn test_tag_parse() {
    let data = r#"<div>"#;
    assert_eq!(
        parse_open_tag(data).unwrap(),
        ("", open("div", DOMAttributes::empty(), false))
    );

    let data = r#"<div class=nothing>"#;
    assert_eq!(
        parse_open_tag(data).unwrap(),
        ("", open("div", attributes!("class" => "nothing"), false))
    );

    let data = r#"<div attr1 attr2=two attr3='three' attr4="number four">"#;
    let target = attributes!(
        "attr1" => "",
        "attr2" => "two",
        "attr3" => "three",
        "attr4" => "number four",
    );
    assert_eq!(parse_open_tag(data).unwrap(), ("", open("div", target, false)));
}

#[cfg(test)]
#[test]
fn test_prefixed_tag_parse() {
    let data = r#"<xiaoi-action contenteditable="false" id="1" >rest"#;
    let target = attributes!("contenteditable" => "false", "id" => "1");
    assert_eq!(
        parse_open_tag(data).unwrap(),
        ("rest", open("xiaoi-action", target, false))
    );

    assert_eq!(
        parse_open_tag("<br />").unwrap(),
        ("", open("br", DOMAttributes::empty(), true))
    );
    assert_eq!(
        parse_open_tag("<BR/>").unwrap(),
        ("", open("br", DOMAttributes::empty(), true))
    );
}

#[cfg(test)]
#[test]
fn test_attribute_names_and_values() {
    let (_, token) = parse_open_tag(r#"<p DATA-X = "a &amp; b" data-x="dup">"#).unwrap();
    assert_eq!(token, open("p", attributes!("data-x" => "a & b"), false));
}

#[cfg(test)]
#[test]
fn test_close_tag_parse() {
    assert_eq!(
        parse_close_tag("</xiaoi-p>").unwrap(),
        ("", Token::Close("xiaoi-p".to_string()))
    );
    assert_eq!(
        parse_close_tag("</DIV >").unwrap(),
        ("", Token::Close("div".to_string()))
    );
    assert!(parse_close_tag("</--->").is_err());
}

#[cfg(test)]
#[test]
fn test_comments_and_directives() {
    assert_eq!(
        parse_token("<!-- note -->x").unwrap(),
        ("x", Token::Comment(" note "))
    );
    assert_eq!(parse_token("<!-- open").unwrap(), ("", Token::Comment(" open")));
    assert_eq!(
        parse_token("<!DOCTYPE html>").unwrap(),
        ("", Token::Directive("!DOCTYPE html"))
    );
}

#[cfg(test)]
#[test]
fn test_tokenizer_recovers_stray_angle_bracket() {
    let tokens: Vec<_> = Tokenizer::new("a < b").collect();
    assert_eq!(
        tokens,
        vec![Token::Text("a "), Token::Text("<"), Token::Text(" b")]
    );
}

#[cfg(test)]
#[test]
fn test_tokenizer_raw_text() {
    let tokens: Vec<_> = Tokenizer::new("<script>if (a < b) {}</SCRIPT>").collect();
    assert_eq!(
        tokens,
        vec![
            open("script", DOMAttributes::empty(), false),
            Token::RawText("if (a < b) {}"),
            Token::Close("script".to_string()),
        ]
    );
}

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case},
    character::complete::{alphanumeric1, char, digit1, hex_digit1},
    combinator::{map_opt, recognize},
    sequence::{delimited, preceded, tuple},
    IResult,
};
use std::borrow::Cow;

/// Named references which are still recognised without their trailing `;`.
const LEGACY_NAMES: &[&str] = &[
    "AMP", "COPY", "GT", "LT", "QUOT", "REG", "acute", "amp", "cedil", "cent", "copy", "curren",
    "deg", "divide", "frac12", "frac14", "frac34", "gt", "iexcl", "iquest", "laquo", "lt", "macr",
    "micro", "middot", "nbsp", "not", "ordf", "ordm", "para", "plusmn", "pound", "quot", "raquo",
    "reg", "sect", "shy", "sup1", "sup2", "sup3", "times", "uml", "yen",
];

/// Look `reference` (`&name;`) up in the HTML named character reference table.
fn lookup(reference: &str) -> Option<String> {
    let decoded = html_escape::decode_html_entities(reference);
    if decoded == reference {
        None
    } else {
        Some(decoded.into_owned())
    }
}

/// `&#x1F;`
fn hex_reference(input: &str) -> IResult<&str, String> {
    map_opt(
        delimited(tag_no_case("&#x"), hex_digit1, char(';')),
        |h: &str| {
            u32::from_str_radix(h, 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
        },
    )(input)
}

/// `&#31;`
fn decimal_reference(input: &str) -> IResult<&str, String> {
    map_opt(delimited(tag("&#"), digit1, char(';')), |d: &str| {
        d.parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
    })(input)
}

/// `&hellip;`, any name from the HTML table
fn named_reference(input: &str) -> IResult<&str, String> {
    map_opt(
        recognize(tuple((char('&'), alphanumeric1, char(';')))),
        lookup,
    )(input)
}

/// `&amp` with no `;`, only for the legacy names and only when the name is
/// not directly followed by more letters or digits
fn legacy_reference(input: &str) -> IResult<&str, String> {
    map_opt(preceded(char('&'), alphanumeric1), |name: &str| {
        if LEGACY_NAMES.contains(&name) {
            lookup(&format!("&{};", name))
        } else {
            None
        }
    })(input)
}

fn character_reference(input: &str) -> IResult<&str, String> {
    alt((
        hex_reference,
        decimal_reference,
        named_reference,
        legacy_reference,
    ))(input)
}

/// Replace character references with the characters they name.
///
/// References which cannot be decoded are left untouched.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        match character_reference(rest) {
            Ok((remaining, decoded)) => {
                out.push_str(&decoded);
                rest = remaining;
            }
            Err(_) => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

#[cfg(test)]
#[test]
fn test_decode_references() {
    assert_eq!(decode_entities("a &amp; b"), "a & b");
    assert_eq!(decode_entities("&#xFEFF;"), "\u{feff}");
    assert_eq!(decode_entities("&#65;&#X42;"), "AB");
    assert_eq!(decode_entities("&lt;p&gt;"), "<p>");
}

#[cfg(test)]
#[test]
fn test_full_named_table() {
    assert_eq!(decode_entities("a&hellip;b&copy;"), "a\u{2026}b\u{a9}");
    assert_eq!(decode_entities("&rarr;&mdash;&euro;"), "\u{2192}\u{2014}\u{20ac}");
}

#[cfg(test)]
#[test]
fn test_legacy_references_without_semicolon() {
    assert_eq!(decode_entities("&amp c"), "& c");
    assert_eq!(decode_entities("&copy 2024"), "\u{a9} 2024");
    assert_eq!(decode_entities("x&lt"), "x<");
    // the name must stand on its own, and only legacy names qualify
    assert_eq!(decode_entities("&ampc"), "&ampc");
    assert_eq!(decode_entities("&hellip x"), "&hellip x");
}

#[cfg(test)]
#[test]
fn test_undecodable_references_are_kept() {
    assert_eq!(decode_entities("fish & chips"), "fish & chips");
    assert_eq!(decode_entities("&bogus;"), "&bogus;");
    assert_eq!(decode_entities("&#xZZ;"), "&#xZZ;");
    assert_eq!(decode_entities("&#1114112;"), "&#1114112;");
    assert!(matches!(decode_entities("plain"), Cow::Borrowed(_)));
}

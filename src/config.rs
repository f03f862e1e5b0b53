use std::borrow::Cow;

pub const DEFAULT_PREFIX: &str = "xiaoi";

/// How attribute values are written into a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeEscaping {
    /// Values are inserted as given. Callers must not pass untrusted input.
    #[default]
    Verbatim,
    /// Values are encoded for use inside a double-quoted attribute.
    Html,
}

impl AttributeEscaping {
    pub fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        match self {
            AttributeEscaping::Verbatim => Cow::Borrowed(value),
            AttributeEscaping::Html => {
                if !value.contains(['&', '"', '\'', '<', '>']) {
                    return Cow::Borrowed(value);
                }
                let mut out = String::with_capacity(value.len() + 8);
                for c in value.chars() {
                    match c {
                        '&' => out.push_str("&amp;"),
                        '"' => out.push_str("&quot;"),
                        '\'' => out.push_str("&#39;"),
                        '<' => out.push_str("&lt;"),
                        '>' => out.push_str("&gt;"),
                        c => out.push(c),
                    }
                }
                Cow::Owned(out)
            }
        }
    }
}

/// Settings a [`FragmentBuilder`](crate::FragmentBuilder) renders with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentConfig {
    /// Namespace put in front of every generated tag name, as in `xiaoi-p`.
    pub prefix: String,
    pub escaping: AttributeEscaping,
}

impl FragmentConfig {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            escaping: AttributeEscaping::default(),
        }
    }
}

#[cfg(test)]
#[test]
fn test_escaping() {
    let raw = r#"a"b<c>&'d"#;
    assert_eq!(AttributeEscaping::Verbatim.apply(raw), raw);
    assert_eq!(
        AttributeEscaping::Html.apply(raw),
        "a&quot;b&lt;c&gt;&amp;&#39;d"
    );
    assert!(matches!(AttributeEscaping::Html.apply("plain"), Cow::Borrowed(_)));
}

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::Error;

/// The kinds of markup fragment the editor inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Paragraph,
    Text,
    LineBreak,
    /// A zero-width node the caret can sit in next to a non-editable marker.
    Empty,
    Action,
    Pause,
    /// Icon placeholder inside action and pause markers.
    Image,
}

impl TagKind {
    /// Kinds offered to the editor's commands. [`TagKind::Image`] is only
    /// rendered as part of other fragments.
    pub const PUBLIC: [TagKind; 6] = [
        TagKind::Paragraph,
        TagKind::Text,
        TagKind::LineBreak,
        TagKind::Empty,
        TagKind::Action,
        TagKind::Pause,
    ];

    /// Suffix appended to the prefix to form the element name.
    pub fn name(self) -> &'static str {
        match self {
            TagKind::Paragraph => "p",
            TagKind::Text => "text",
            TagKind::LineBreak => "br",
            TagKind::Empty => "empty",
            TagKind::Action => "action",
            TagKind::Pause => "pause",
            TagKind::Image => "img",
        }
    }

    pub fn element_name(self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.name())
    }
}

impl FromStr for TagKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "p" => TagKind::Paragraph,
            "text" => TagKind::Text,
            "br" => TagKind::LineBreak,
            "empty" => TagKind::Empty,
            "action" => TagKind::Action,
            "pause" => TagKind::Pause,
            "img" => TagKind::Image,
            _ => return Err(Error::UnknownTagKind(s.to_string())),
        })
    }
}

impl Display for TagKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[test]
fn test_names_round_trip() {
    for kind in TagKind::PUBLIC.into_iter().chain([TagKind::Image]) {
        assert_eq!(kind.name().parse::<TagKind>().unwrap(), kind);
    }
    assert_eq!(TagKind::Action.element_name("xiaoi"), "xiaoi-action");
}

#[cfg(test)]
#[test]
fn test_unknown_kind() {
    assert!(matches!(
        "unknown-kind".parse::<TagKind>(),
        Err(Error::UnknownTagKind(name)) if name == "unknown-kind"
    ));
    assert!("P".parse::<TagKind>().is_err());
}

//! Markup fragments for an SSML rich-text editor.
//!
//! [`FragmentBuilder`] renders the editor's custom elements (paragraphs, text,
//! line breaks, action and pause markers) as HTML strings, and [`nodes`]
//! parses such HTML back into a node tree.

/// Ordered attribute maps and their serialization
mod attributes;
mod config;
mod error;
/// Rendering of tag fragments
pub mod fragment;
/// Parsing of HTML into nodes
pub mod nodes;
mod tag;

pub use attributes::Attributes;
pub use config::{AttributeEscaping, FragmentConfig, DEFAULT_PREFIX};
pub use error::{Error, Result};
pub use fragment::{build, build_named, FragmentBuilder};
pub use html;
pub use nodes::{create_document, create_node, parse, Parsed};
pub use tag::TagKind;

//! Minimal XML-like document model: tokenizer, streaming events, an arena
//! element tree with parent/child/sibling navigation, and a serializer.

pub mod debug;
pub mod perf_fixtures;
pub mod serialize;
pub mod traverse;

mod document;
mod dom_builder;
mod entities;
mod error;
mod events;
mod tokenizer;

pub use crate::document::{Attributes, Descendants, Document, Element, NodeId};
pub use crate::dom_builder::{parse, parse_with_config};
pub use crate::entities::{escape_attribute, escape_text};
pub use crate::error::{ParseError, ParseErrorCode};
pub use crate::events::{EventReader, ParseConfig, UnsupportedPolicy, XmlEvent};
pub use crate::tokenizer::{Token, Tokenizer, tokenize};

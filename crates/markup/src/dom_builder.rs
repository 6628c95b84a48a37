use crate::document::{Document, Element, NodeId};
use crate::error::{ParseError, ParseErrorCode};
use crate::events::{EventReader, ParseConfig, XmlEvent};

pub fn parse(input: &str) -> Result<Document, ParseError> {
    parse_with_config(input, ParseConfig::default())
}

/// Build a [`Document`] from the event stream.
///
/// The reader guarantees balanced tags and a single root, so the open-element
/// stack here never disagrees with it.
pub fn parse_with_config(input: &str, config: ParseConfig) -> Result<Document, ParseError> {
    let mut doc: Option<Document> = None;
    let mut open: Vec<NodeId> = Vec::new();

    for event in EventReader::new(input, config) {
        match event? {
            XmlEvent::Start {
                name,
                attributes,
                text,
            } => {
                let element = Element {
                    name,
                    attributes,
                    text,
                    tail: None,
                };
                let id = if let Some(tree) = doc.as_mut()
                    && let Some(&parent) = open.last()
                {
                    tree.append_child(parent, element)
                } else {
                    let root = Document::new(element);
                    let id = root.root();
                    doc = Some(root);
                    id
                };
                open.push(id);
            }
            XmlEvent::End { tail, .. } => {
                if let Some(doc) = doc.as_mut()
                    && let Some(id) = open.pop()
                {
                    doc.element_mut(id).tail = tail;
                }
            }
        }
    }

    doc.ok_or(ParseError::new(ParseErrorCode::NoRootElement, input.len()))
}

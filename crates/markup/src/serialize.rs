//! Markup output.
//!
//! Attributes are written in stored order with `"` quoting. An element with no
//! children and no (or empty) text is written self-closing.

use crate::document::{Attributes, Document, Element, NodeId};
use crate::entities::{escape_attribute, escape_text};
use std::fmt::{self, Write};

/// `<name key="value"...` without the closing `>` or `/>`.
pub fn write_tag_head<W: Write + ?Sized>(
    out: &mut W,
    name: &str,
    attributes: &Attributes,
) -> fmt::Result {
    out.write_char('<')?;
    out.write_str(name)?;
    for (key, value) in attributes {
        out.write_char(' ')?;
        out.write_str(key)?;
        out.write_str("=\"")?;
        escape_attribute(value, out)?;
        out.write_char('"')?;
    }
    Ok(())
}

pub fn write_start_tag<W: Write + ?Sized>(
    out: &mut W,
    name: &str,
    attributes: &Attributes,
    self_closing: bool,
) -> fmt::Result {
    write_tag_head(out, name, attributes)?;
    out.write_str(if self_closing { "/>" } else { ">" })
}

pub fn write_end_tag<W: Write + ?Sized>(out: &mut W, name: &str) -> fmt::Result {
    write!(out, "</{name}>")
}

/// Escaped character data; `None` and `""` both write nothing.
pub fn write_text<W: Write + ?Sized>(out: &mut W, text: Option<&str>) -> fmt::Result {
    match text {
        Some(text) => escape_text(text, out),
        None => Ok(()),
    }
}

pub fn is_self_closing(element: &Element, has_children: bool) -> bool {
    !has_children && element.text.as_deref().is_none_or(str::is_empty)
}

enum Step {
    Open(NodeId),
    Close(NodeId),
}

pub fn write_document<W: Write + ?Sized>(doc: &Document, out: &mut W) -> fmt::Result {
    write_subtree(doc, doc.root(), out)
}

pub fn write_subtree<W: Write + ?Sized>(doc: &Document, start: NodeId, out: &mut W) -> fmt::Result {
    let mut stack = vec![Step::Open(start)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => {
                let element = doc.element(id);
                let children = doc.children(id);
                if is_self_closing(element, !children.is_empty()) {
                    write_start_tag(out, &element.name, &element.attributes, true)?;
                    write_text(out, element.tail.as_deref())?;
                    continue;
                }
                write_start_tag(out, &element.name, &element.attributes, false)?;
                write_text(out, element.text.as_deref())?;
                stack.push(Step::Close(id));
                stack.extend(children.iter().rev().map(|&child| Step::Open(child)));
            }
            Step::Close(id) => {
                let element = doc.element(id);
                write_end_tag(out, &element.name)?;
                write_text(out, element.tail.as_deref())?;
            }
        }
    }
    Ok(())
}

impl Document {
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_document(self, &mut out);
        out
    }
}

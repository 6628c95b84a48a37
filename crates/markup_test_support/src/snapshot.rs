//! Full-fidelity line snapshots of documents for test assertions.
//!
//! Unlike `markup::debug::outline`, nothing is trimmed or truncated: every
//! attribute, text and tail is shown escaped on its own line so that
//! whitespace differences remain visible in a diff.

use crate::{diff_lines, escape_text};
use markup::Document;
use markup::traverse::preorder;

const INDENT: &str = "  ";

pub fn tree_snapshot(doc: &Document) -> Vec<String> {
    let mut out = Vec::new();
    for visit in preorder(doc) {
        let element = doc.element(visit.id);
        let indent = INDENT.repeat(visit.depth);
        let mut line = format!("{indent}<{}", element.name);
        for (key, value) in &element.attributes {
            line.push_str(&format!(" {key}=\"{}\"", escape_text(value)));
        }
        line.push('>');
        out.push(line);
        if let Some(text) = &element.text {
            out.push(format!("{indent}{INDENT}\"{}\"", escape_text(text)));
        }
        if let Some(tail) = &element.tail {
            out.push(format!("{indent}+\"{}\"", escape_text(tail)));
        }
    }
    out
}

/// Panic with a line diff when the two snapshots differ.
pub fn assert_snapshots_match(expected: &Document, actual: &Document, context: &str) {
    let expected = tree_snapshot(expected);
    let actual = tree_snapshot(actual);
    if expected != actual {
        panic!(
            "snapshot mismatch for {context}\n{}",
            diff_lines(&expected, &actual)
        );
    }
}

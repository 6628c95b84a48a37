use crate::document::Document;
use crate::traverse::preorder;

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

fn trimmed_nonempty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn push_preview(out: &mut String, s: &str, max_chars: usize) {
    let mut chars = s.chars();
    for ch in chars.by_ref().take(max_chars) {
        out.push(if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch });
    }
    if chars.next().is_some() {
        out.push('…');
    }
}

/// Indented one-line-per-element preview, at most `cap` lines.
///
/// Text is shown as a quoted preview after the start tag and tails as a
/// `+"..."` suffix, both trimmed; whitespace-only runs are omitted.
pub fn outline(doc: &Document, cap: usize) -> Vec<String> {
    let mut out = Vec::new();
    for visit in preorder(doc).take(cap) {
        let element = doc.element(visit.id);
        let mut line = String::with_capacity(visit.depth * INDENT_STEP.len() + 64);
        for _ in 0..visit.depth {
            line.push_str(INDENT_STEP);
        }
        line.push('<');
        line.push_str(&element.name);
        for (key, value) in &element.attributes {
            line.push(' ');
            line.push_str(key);
            line.push_str("=\"");
            line.push_str(value);
            line.push('"');
        }
        line.push('>');
        if let Some(text) = element.text.as_deref().and_then(trimmed_nonempty) {
            line.push_str(" \"");
            push_preview(&mut line, text, PREVIEW_CHARS);
            line.push('"');
        }
        if let Some(tail) = element.tail.as_deref().and_then(trimmed_nonempty) {
            line.push_str(" +\"");
            push_preview(&mut line, tail, PREVIEW_CHARS);
            line.push('"');
        }
        out.push(line);
    }
    out
}

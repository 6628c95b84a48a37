pub const BLOCK_TEMPLATE: &str =
    r#"<item id="a1"><name>hello world</name>tail text<leaf kind="x"/></item>"#;

/// `blocks` copies of [`BLOCK_TEMPLATE`] under a single root.
pub fn make_document(blocks: usize) -> String {
    let mut xml = String::with_capacity(BLOCK_TEMPLATE.len() * blocks + 16);
    xml.push_str("<root>");
    for _ in 0..blocks {
        xml.push_str(BLOCK_TEMPLATE);
    }
    xml.push_str("</root>");
    xml
}

/// A chain of `depth` nested elements.
pub fn make_nested(depth: usize) -> String {
    let mut xml = String::with_capacity(depth * 7);
    for _ in 0..depth {
        xml.push_str("<n>");
    }
    for _ in 0..depth {
        xml.push_str("</n>");
    }
    xml
}

//! Random documents whose every character lies in the algebra's symbol
//! domains, so any two of them can be added.

use crate::rng::LcgRng;
use markup::{Document, Element, NodeId};

const TAG_START: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const TAG_REST: &[u8] = b"abcdefghijklmnopqrstuvwxyz-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_";
const VALUE_CHARS: &[u8] = b"_abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ-0123456789";
const ATTRIBUTE_KEYS: &[&str] = &["id", "k", "class", "n"];
const TEXT_EXTRA: &[char] = &['‘', '’', '“', '”', '–', '—', '…'];
const LAYOUT: &[char] = &['\n', '\r', '\t'];

#[derive(Clone, Copy, Debug)]
pub struct CorpusOptions {
    pub max_nodes: usize,
    pub max_depth: usize,
    pub max_children: usize,
    /// Out of 8: chance that a node is generated as a unit node.
    pub unit_ratio: u32,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        Self {
            max_nodes: 24,
            max_depth: 5,
            max_children: 4,
            unit_ratio: 1,
        }
    }
}

fn random_tag(rng: &mut LcgRng) -> String {
    let mut tag = String::new();
    tag.push(char::from(*rng.pick(TAG_START)));
    for _ in 0..rng.gen_range_usize(0, 4) {
        tag.push(char::from(*rng.pick(TAG_REST)));
    }
    tag
}

fn random_value(rng: &mut LcgRng) -> String {
    (0..rng.gen_range_usize(1, 4))
        .map(|_| char::from(*rng.pick(VALUE_CHARS)))
        .collect()
}

fn random_text(rng: &mut LcgRng) -> Option<String> {
    if rng.gen_ratio(1, 2) {
        return None;
    }
    let text = (0..rng.gen_range_usize(1, 7))
        .map(|_| {
            if rng.gen_ratio(1, 10) {
                *rng.pick(TEXT_EXTRA)
            } else if rng.gen_ratio(1, 10) {
                *rng.pick(LAYOUT)
            } else {
                char::from(rng.gen_range_usize(0x20, 0x7f) as u8)
            }
        })
        .collect();
    Some(text)
}

pub fn random_element(rng: &mut LcgRng, unit_ratio: u32) -> Element {
    if rng.gen_ratio(unit_ratio, 8) {
        return Element::new("_");
    }
    let mut element = Element::new(random_tag(rng));
    for _ in 0..rng.gen_range_usize(0, 3) {
        let key = *rng.pick(ATTRIBUTE_KEYS);
        element.set_attr(key, random_value(rng));
    }
    element.text = random_text(rng);
    element.tail = random_text(rng);
    element
}

/// A random tree with at most `options.max_nodes` nodes. The root never has
/// a tail.
pub fn random_tree(rng: &mut LcgRng, options: &CorpusOptions) -> Document {
    let mut root = random_element(rng, options.unit_ratio);
    root.tail = None;
    let mut doc = Document::new(root);
    let mut open: Vec<(NodeId, usize)> = vec![(doc.root(), 0)];
    let mut nodes = 1;
    while nodes < options.max_nodes && !open.is_empty() {
        let (parent, depth) = open[rng.gen_index(open.len())];
        if depth >= options.max_depth || doc.children(parent).len() >= options.max_children {
            open.retain(|&(id, _)| id != parent);
            continue;
        }
        let id = doc.append_child(parent, random_element(rng, options.unit_ratio));
        open.push((id, depth + 1));
        nodes += 1;
        if rng.gen_ratio(1, 6) {
            break;
        }
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trees_respect_the_limits() {
        let options = CorpusOptions::default();
        for seed in 1..50 {
            let mut rng = LcgRng::new(seed);
            let doc = random_tree(&mut rng, &options);
            assert!(doc.len() <= options.max_nodes);
            assert_eq!(doc.element(doc.root()).tail, None);
            for id in doc.descendants(doc.root()) {
                assert!(doc.depth(id) <= options.max_depth);
                assert!(doc.children(id).len() <= options.max_children);
            }
        }
    }

    #[test]
    fn trees_survive_a_serialize_parse_round_trip() {
        for seed in 1..50 {
            let mut rng = LcgRng::new(seed);
            let doc = random_tree(&mut rng, &CorpusOptions::default());
            let xml = doc.to_xml();
            let reparsed = markup::parse(&xml).unwrap_or_else(|err| panic!("{err}: {xml}"));
            assert_eq!(reparsed.to_xml(), xml);
        }
    }
}

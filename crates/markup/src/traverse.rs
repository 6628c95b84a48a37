use crate::document::{Document, NodeId};

/// One step of a pre-order walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit {
    pub id: NodeId,
    /// Distance from the walk's starting node.
    pub depth: usize,
    /// Zero-based index among the parent's children; 0 for the starting node.
    pub sibling_index: usize,
}

/// Pre-order walk over a subtree using an explicit stack.
pub struct Preorder<'a> {
    doc: &'a Document,
    stack: Vec<Visit>,
}

impl<'a> Preorder<'a> {
    pub fn new(doc: &'a Document, start: NodeId) -> Self {
        Self {
            doc,
            stack: vec![Visit {
                id: start,
                depth: 0,
                sibling_index: 0,
            }],
        }
    }
}

impl Iterator for Preorder<'_> {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        let visit = self.stack.pop()?;
        let children = self.doc.children(visit.id);
        self.stack
            .extend(children.iter().enumerate().rev().map(|(i, &id)| Visit {
                id,
                depth: visit.depth + 1,
                sibling_index: i,
            }));
        Some(visit)
    }
}

pub fn preorder(doc: &Document) -> Preorder<'_> {
    Preorder::new(doc, doc.root())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Element;

    #[test]
    fn preorder_reports_depth_and_sibling_index() {
        let mut doc = Document::new(Element::new("a"));
        let root = doc.root();
        let b = doc.append_child(root, Element::new("b"));
        let c = doc.append_child(root, Element::new("c"));
        let d = doc.append_child(b, Element::new("d"));
        let e = doc.append_child(b, Element::new("e"));

        let got: Vec<_> = preorder(&doc)
            .map(|v| (v.id, v.depth, v.sibling_index))
            .collect();
        assert_eq!(
            got,
            vec![(root, 0, 0), (b, 1, 0), (d, 2, 0), (e, 2, 1), (c, 1, 1)]
        );
    }

    #[test]
    fn preorder_handles_deep_documents_without_recursion() {
        let mut doc = Document::new(Element::new("n"));
        let mut parent = doc.root();
        for _ in 0..100_000 {
            parent = doc.append_child(parent, Element::new("n"));
        }
        let last = preorder(&doc).last().unwrap();
        assert_eq!(last.depth, 100_000);
        assert_eq!(last.id, parent);
    }

    #[test]
    fn subtree_walk_starts_at_depth_zero() {
        let mut doc = Document::new(Element::new("a"));
        let root = doc.root();
        doc.append_child(root, Element::new("x"));
        let b = doc.append_child(root, Element::new("b"));
        let c = doc.append_child(b, Element::new("c"));
        let got: Vec<_> = Preorder::new(&doc, b).map(|v| (v.id, v.depth)).collect();
        assert_eq!(got, vec![(b, 0), (c, 1)]);
    }
}

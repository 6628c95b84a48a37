//! Arena-backed element tree.
//!
//! Each element owns its name, attributes, leading `text` and trailing `tail`
//! (the character data between its end tag and the next tag). Character data
//! never appears as a separate node.

use indexmap::IndexMap;

/// Attribute map in document order; equality ignores order.
pub type Attributes = IndexMap<String, String>;

/// Stable handle to a node inside one [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    /// Character data before the first child; `None` when there is none at all.
    pub text: Option<String>,
    /// Character data after the end tag; `None` when there is none at all.
    pub tail: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }
}

#[derive(Clone, Debug)]
struct NodeSlot {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A rooted, ordered element tree.
///
/// Invariants:
/// - The root has no parent and is never detached.
/// - A node appears in at most one child list, and its `parent` link names
///   the owner of that list.
/// - Detached nodes keep their slot so ids are never reused.
///
/// `Clone` is a deep copy.
#[derive(Clone, Debug)]
pub struct Document {
    slots: Vec<NodeSlot>,
    root: NodeId,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            slots: vec![NodeSlot {
                element: root,
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn slot(&self, id: NodeId) -> &NodeSlot {
        &self.slots[id.index()]
    }

    /// Panics if `id` was not issued by this document.
    pub fn element(&self, id: NodeId) -> &Element {
        &self.slot(id).element
    }

    pub fn element_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.slots[id.index()].element
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.slots.len()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.slot(id).children
    }

    /// Zero-based child lookup.
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.slot(id).children.get(index).copied()
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        !self.slot(id).children.is_empty()
    }

    /// Zero-based index of `id` within its parent's child list.
    pub fn child_index(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.child_index(id)?;
        self.child(parent, index + 1)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.child_index(id)?;
        index.checked_sub(1).and_then(|i| self.child(parent, i))
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.slot(id).children.last().copied()
    }

    pub fn append_child(&mut self, parent: NodeId, element: Element) -> NodeId {
        debug_assert!(
            self.slots.len() < u32::MAX as usize,
            "document node count exceeds u32::MAX"
        );
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(NodeSlot {
            element,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.slots[parent.index()].children.push(id);
        id
    }

    /// Unlink the last child of `parent`; its subtree becomes unreachable.
    pub fn detach_last_child(&mut self, parent: NodeId) -> Option<NodeId> {
        let child = self.slots[parent.index()].children.pop()?;
        self.slots[child.index()].parent = None;
        Some(child)
    }

    /// Pre-order iterator over `id` and all of its descendants.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.descendants(self.root).count()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.doc.children(id).iter().rev());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, [NodeId; 4]) {
        let mut doc = Document::new(Element::new("a"));
        let root = doc.root();
        let b = doc.append_child(root, Element::new("b"));
        let c = doc.append_child(root, Element::new("c").with_attribute("id", "1"));
        let d = doc.append_child(b, Element::new("d").with_text("x"));
        (doc, [root, b, c, d])
    }

    #[test]
    fn navigation_follows_parent_and_sibling_links() {
        let (doc, [root, b, c, d]) = sample();
        assert_eq!(doc.parent(b), Some(root));
        assert_eq!(doc.parent(root), None);
        assert_eq!(doc.children(root), &[b, c]);
        assert_eq!(doc.child_index(c), Some(1));
        assert_eq!(doc.next_sibling(b), Some(c));
        assert_eq!(doc.next_sibling(c), None);
        assert_eq!(doc.previous_sibling(c), Some(b));
        assert_eq!(doc.previous_sibling(b), None);
        assert_eq!(doc.depth(d), 2);
        assert_eq!(doc.element(c).attr("id"), Some("1"));
    }

    #[test]
    fn descendants_are_pre_order() {
        let (doc, [root, b, c, d]) = sample();
        let order: Vec<_> = doc.descendants(root).collect();
        assert_eq!(order, vec![root, b, d, c]);
        assert_eq!(doc.len(), 4);
    }

    #[test]
    fn detached_subtree_is_unreachable() {
        let (mut doc, [root, b, c, _]) = sample();
        assert_eq!(doc.detach_last_child(root), Some(c));
        assert_eq!(doc.children(root), &[b]);
        assert_eq!(doc.parent(c), None);
        assert_eq!(doc.len(), 3);
        let e = doc.append_child(root, Element::new("e"));
        assert_ne!(e, c, "ids are never reused");
    }

    #[test]
    fn clone_is_deep() {
        let (doc, [_, b, _, _]) = sample();
        let mut copy = doc.clone();
        copy.element_mut(b).name = "z".to_string();
        copy.element_mut(b).set_attr("k", "v");
        assert_eq!(doc.element(b).name, "b");
        assert!(doc.element(b).attributes.is_empty());
    }

    #[test]
    fn attribute_equality_ignores_order() {
        let left = Element::new("a")
            .with_attribute("x", "1")
            .with_attribute("y", "2");
        let right = Element::new("a")
            .with_attribute("y", "2")
            .with_attribute("x", "1");
        assert_eq!(left, right);
    }
}

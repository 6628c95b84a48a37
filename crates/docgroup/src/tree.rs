//! Tree algebra.
//!
//! Two trees are added by aligning their nodes by position: nodes at the same
//! position have their elements added, nodes only the right-hand tree has are
//! copied in. Afterwards every sibling list loses its trailing unit nodes,
//! which are the identity and carry no structure.
//!
//! `add` and `invert` consume their left operand and hand it back. Clone a
//! tree first when the original is still needed.

use crate::element::{
    EqualityOptions, add_elements, check_element, equal_elements, invert_element, is_unit_element,
};
use crate::error::AlgebraError;
use crate::position::{Position, get_node, ordered_nodes};
use markup::debug::outline;
use markup::traverse::preorder;
use markup::{Document, Element, NodeId};
use std::borrow::Cow;

pub use crate::position::ordering;

const TRACE_OUTLINE_LINES: usize = 64;

/// A unit element with no children.
pub fn is_unit_node(doc: &Document, id: NodeId) -> bool {
    !doc.has_children(id) && is_unit_element(doc.element(id))
}

pub fn add(mut tree1: Document, tree2: &Document) -> Result<Document, AlgebraError> {
    let targets = ordered_nodes(&tree1, None);
    let mut cursor = 0;

    for (expected, source) in ordered_nodes(tree2, None) {
        while let Some((position, target)) = targets.get(cursor)
            && *position < expected
        {
            check_element(tree1.element(*target))?;
            cursor += 1;
        }
        if let Some((position, target)) = targets.get(cursor)
            && *position == expected
        {
            let sum = add_elements(tree1.element(*target), tree2.element(source))?;
            *tree1.element_mut(*target) = sum;
            cursor += 1;
            continue;
        }
        insert_copy(&mut tree1, &expected, tree2.element(source))?;
    }
    for (_, target) in &targets[cursor..] {
        check_element(tree1.element(*target))?;
    }

    strip_trailing_units(&mut tree1);
    if log::log_enabled!(target: "docgroup.tree", log::Level::Trace) {
        for line in outline(&tree1, TRACE_OUTLINE_LINES) {
            log::trace!(target: "docgroup.tree", "sum: {line}");
        }
    }
    Ok(tree1)
}

/// Append a shallow copy of `element` where `expected` says it belongs and
/// check that it landed there. Copies arrive in pre-order, so the check only
/// fails when the caller feeds positions out of order.
fn insert_copy(
    tree: &mut Document,
    expected: &Position,
    element: &Element,
) -> Result<(), AlgebraError> {
    let parent_position = expected
        .parent()
        .ok_or_else(|| AlgebraError::InvalidPosition(expected.clone()))?;
    check_element(element)?;
    let parent = get_node(tree, &parent_position, None)?;
    let id = tree.append_child(parent, element.clone());
    let actual = parent_position.child(tree.children(parent).len());
    if actual != *expected {
        return Err(AlgebraError::StructuralInconsistency {
            expected: expected.clone(),
            actual,
        });
    }
    log::debug!(target: "docgroup.tree", "inserted {} at {expected} as {id:?}", element.name);
    Ok(())
}

/// Remove childless unit nodes from the end of every sibling list, deepest
/// lists first, so a node whose children all go becomes removable itself.
pub fn strip_trailing_units(doc: &mut Document) {
    let order: Vec<NodeId> = preorder(doc).map(|visit| visit.id).collect();
    let mut stripped = 0usize;
    for &id in order.iter().rev() {
        while let Some(last) = doc.last_child(id)
            && is_unit_node(doc, last)
        {
            doc.detach_last_child(id);
            stripped += 1;
        }
    }
    if stripped > 0 {
        log::debug!(target: "docgroup.tree", "stripped {stripped} trailing unit nodes");
    }
}

pub fn invert(mut tree: Document) -> Result<Document, AlgebraError> {
    let order: Vec<NodeId> = preorder(&tree).map(|visit| visit.id).collect();
    for id in order {
        let inverse = invert_element(tree.element(id))?;
        *tree.element_mut(id) = inverse;
    }
    Ok(tree)
}

pub fn equal(tree1: &Document, tree2: &Document) -> bool {
    equal_with(tree1, tree2, EqualityOptions::default())
}

/// True when some sibling list ends in a childless unit node.
fn has_trailing_units(doc: &Document) -> bool {
    preorder(doc).any(|visit| {
        doc.last_child(visit.id)
            .is_some_and(|last| is_unit_node(doc, last))
    })
}

/// The tree as addition leaves it: trailing unit nodes are the identity and
/// carry no structure.
fn normalized(doc: &Document) -> Cow<'_, Document> {
    if !has_trailing_units(doc) {
        return Cow::Borrowed(doc);
    }
    let mut copy = doc.clone();
    strip_trailing_units(&mut copy);
    Cow::Owned(copy)
}

/// Synchronized pre-order walks over the normalized trees; the position is
/// maintained incrementally from each step's depth and sibling index.
pub fn equal_with(tree1: &Document, tree2: &Document, options: EqualityOptions) -> bool {
    let (tree1, tree2) = (normalized(tree1), normalized(tree2));
    let (tree1, tree2) = (tree1.as_ref(), tree2.as_ref());
    let mut left = preorder(tree1);
    let mut right = preorder(tree2);
    let mut path = Position::new(Vec::new());
    loop {
        let (a, b) = match (left.next(), right.next()) {
            (None, None) => return true,
            (Some(a), Some(b)) => (a, b),
            _ => {
                log::trace!(target: "docgroup.tree", "trees differ in size after {path}");
                return false;
            }
        };
        path.truncate(a.depth);
        path.push(if a.depth == 0 { 1 } else { a.sibling_index + 1 });
        if a.depth != b.depth || a.sibling_index != b.sibling_index {
            log::trace!(target: "docgroup.tree", "trees differ in shape at {path}");
            return false;
        }
        if !equal_elements(tree1.element(a.id), tree2.element(b.id), options) {
            log::trace!(target: "docgroup.tree", "trees differ in content at {path}");
            return false;
        }
    }
}

/// `tree1 - tree2`, leaving both inputs untouched.
pub fn difference(tree1: &Document, tree2: &Document) -> Result<Document, AlgebraError> {
    add(invert(tree2.clone())?, tree1)
}

/// Number of nodes whose content differs between the two trees: zero exactly
/// when they are equal.
pub fn metric(tree1: &Document, tree2: &Document) -> Result<usize, AlgebraError> {
    let diff = difference(tree1, tree2)?;
    Ok(preorder(&diff)
        .filter(|visit| !is_unit_element(diff.element(visit.id)))
        .count())
}

/// Non-unit nodes, where the root always counts.
pub fn count_non_unit_nodes(tree: &Document) -> usize {
    let root = tree.root();
    preorder(tree)
        .filter(|visit| visit.id == root || !is_unit_element(tree.element(visit.id)))
        .count()
}

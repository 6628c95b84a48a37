//! Node addressing.
//!
//! A position is the path from a (sub)tree root to a node: the first entry is
//! always 1 for the root itself, every further entry is the 1-based index of
//! the child taken. Comparing positions lexicographically gives document
//! order, so an ordering is always sorted.

use crate::error::AlgebraError;
use markup::traverse::Preorder;
use markup::{Document, NodeId};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(Vec<usize>);

impl Position {
    pub fn root() -> Self {
        Position(vec![1])
    }

    pub fn new(path: Vec<usize>) -> Self {
        Position(path)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn parent(&self) -> Option<Position> {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Position(rest.to_vec())),
            _ => None,
        }
    }

    /// Position of the `index`-th (1-based) child.
    pub fn child(&self, index: usize) -> Position {
        let mut path = Vec::with_capacity(self.0.len() + 1);
        path.extend_from_slice(&self.0);
        path.push(index);
        Position(path)
    }

    pub fn is_ancestor_of(&self, other: &Position) -> bool {
        other.0.len() > self.0.len() && other.0.starts_with(&self.0)
    }

    pub(crate) fn push(&mut self, index: usize) {
        self.0.push(index);
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.0.pop()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    pub(crate) fn increment_last(&mut self) {
        if let Some(last) = self.0.last_mut() {
            *last += 1;
        }
    }
}

impl From<Vec<usize>> for Position {
    fn from(path: Vec<usize>) -> Self {
        Position(path)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(".")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// Position of `id` relative to `root` (the document root when `None`).
///
/// Fails with `InvalidPosition` if `id` is not inside `root`'s subtree; the
/// error carries the path walked so far.
pub fn position(doc: &Document, id: NodeId, root: Option<NodeId>) -> Result<Position, AlgebraError> {
    let stop = root.unwrap_or_else(|| doc.root());
    let mut reversed = Vec::new();
    let mut current = id;
    while current != stop {
        let (Some(parent), Some(index)) = (doc.parent(current), doc.child_index(current)) else {
            reversed.push(1);
            reversed.reverse();
            return Err(AlgebraError::InvalidPosition(Position(reversed)));
        };
        reversed.push(index + 1);
        current = parent;
    }
    reversed.push(1);
    reversed.reverse();
    Ok(Position(reversed))
}

/// Pre-order positions paired with their nodes.
pub fn ordered_nodes(doc: &Document, root: Option<NodeId>) -> Vec<(Position, NodeId)> {
    let start = root.unwrap_or_else(|| doc.root());
    let mut path = Position(Vec::new());
    Preorder::new(doc, start)
        .map(|visit| {
            path.truncate(visit.depth);
            path.push(if visit.depth == 0 { 1 } else { visit.sibling_index + 1 });
            (path.clone(), visit.id)
        })
        .collect()
}

/// Positions of every node under `root` in document order.
pub fn ordering(doc: &Document, root: Option<NodeId>) -> Vec<Position> {
    ordered_nodes(doc, root)
        .into_iter()
        .map(|(position, _)| position)
        .collect()
}

/// Follow `position` down from `root`. A `0` entry stops the descent at the
/// node reached so far.
pub fn get_node(
    doc: &Document,
    position: &Position,
    root: Option<NodeId>,
) -> Result<NodeId, AlgebraError> {
    let invalid = || AlgebraError::InvalidPosition(position.clone());
    let Some((&first, rest)) = position.as_slice().split_first() else {
        return Err(invalid());
    };
    if first != 1 {
        return Err(invalid());
    }
    let mut current = root.unwrap_or_else(|| doc.root());
    for &index in rest {
        if index == 0 {
            break;
        }
        current = doc.child(current, index - 1).ok_or_else(invalid)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use markup::parse;

    fn pos(path: &[usize]) -> Position {
        Position::new(path.to_vec())
    }

    #[test]
    fn ordering_is_preorder_and_sorted() {
        let doc = parse("<a><b><c/><d/></b><e/></a>").unwrap();
        let got = ordering(&doc, None);
        assert_eq!(
            got,
            vec![
                pos(&[1]),
                pos(&[1, 1]),
                pos(&[1, 1, 1]),
                pos(&[1, 1, 2]),
                pos(&[1, 2])
            ]
        );
        assert!(got.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn position_walks_parent_links() {
        let doc = parse("<a><b><c/><d/></b><e/></a>").unwrap();
        let b = doc.child(doc.root(), 0).unwrap();
        let d = doc.child(b, 1).unwrap();
        assert_eq!(position(&doc, d, None).unwrap(), pos(&[1, 1, 2]));
        assert_eq!(position(&doc, d, Some(b)).unwrap(), pos(&[1, 2]));
        assert_eq!(position(&doc, doc.root(), None).unwrap(), Position::root());
    }

    #[test]
    fn position_outside_subtree_is_invalid() {
        let doc = parse("<a><b/><e/></a>").unwrap();
        let b = doc.child(doc.root(), 0).unwrap();
        let e = doc.child(doc.root(), 1).unwrap();
        assert!(matches!(
            position(&doc, e, Some(b)),
            Err(AlgebraError::InvalidPosition(_))
        ));
    }

    #[test]
    fn get_node_follows_indices() {
        let doc = parse("<a><b><c/><d/></b><e/></a>").unwrap();
        let d = get_node(&doc, &pos(&[1, 1, 2]), None).unwrap();
        assert_eq!(doc.element(d).name, "d");
        let b = get_node(&doc, &pos(&[1, 1, 0, 5]), None).unwrap();
        assert_eq!(doc.element(b).name, "b");
        let c = get_node(&doc, &pos(&[1, 1]), Some(b)).unwrap();
        assert_eq!(doc.element(c).name, "c");
    }

    #[test]
    fn get_node_rejects_bad_positions() {
        let doc = parse("<a><b/></a>").unwrap();
        for bad in [pos(&[]), pos(&[2]), pos(&[0, 1]), pos(&[1, 2]), pos(&[1, 1, 1])] {
            assert_eq!(
                get_node(&doc, &bad, None),
                Err(AlgebraError::InvalidPosition(bad.clone()))
            );
        }
    }

    #[test]
    fn ordering_round_trips_through_get_node() {
        let doc = parse("<r><x><y/></x><z><w/><v/></z></r>").unwrap();
        for (position, id) in ordered_nodes(&doc, None) {
            assert_eq!(get_node(&doc, &position, None).unwrap(), id);
            assert_eq!(super::position(&doc, id, None).unwrap(), position);
        }
    }

    #[test]
    fn display_and_relatives() {
        let p = pos(&[1, 3, 2]);
        assert_eq!(p.to_string(), "1.3.2");
        assert_eq!(p.parent(), Some(pos(&[1, 3])));
        assert_eq!(Position::root().parent(), None);
        assert_eq!(pos(&[1, 3]).child(2), p);
        assert!(pos(&[1, 3]).is_ancestor_of(&p));
        assert!(!p.is_ancestor_of(&p));
        assert!(pos(&[1, 2, 9]) < pos(&[1, 3]));
    }
}

// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy traversal over tree contents.

use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::key::KeyStrategy;
use crate::shape::Shape;
use crate::tree::{Node, NodeKind, QuadTree, Unit};
use crate::types::Vec2;

/// Lazy iterator over stored units, optionally filtered by a [`Shape`].
///
/// Returned by [`QuadTree::query`] and [`QuadTree::iter`]. Traversal is
/// depth-first in NW/NE/SW/SE order and follows insertion order within each
/// leaf; subtrees whose bounds cannot overlap the shape's bounding box are
/// skipped without being visited. Work happens per [`Query::next`] call, so
/// a partially consumed query never pays for the units it leaves behind,
/// and a fresh call to [`QuadTree::query`] restarts from scratch.
///
/// The upper [`size_hint`](Iterator::size_hint) bound counts units in
/// not-yet-pruned subtrees; it is exact for unfiltered iteration.
pub struct Query<'a, T, Key> {
    shape: Option<Shape>,
    /// Nodes still to visit, next candidate last.
    stack: SmallVec<[&'a Node<T, Key>; 8]>,
    /// The leaf currently being drained.
    leaf: Option<indexmap::map::Iter<'a, Key, Unit<T>>>,
    /// Units in the stack plus the current leaf, counted before filtering.
    remaining: usize,
}

impl<'a, T, Key> Query<'a, T, Key> {
    pub(crate) fn new(root: &'a Node<T, Key>, shape: Option<Shape>) -> Self {
        let mut query = Self {
            shape,
            stack: SmallVec::new(),
            leaf: None,
            remaining: 0,
        };
        if Self::admits(query.shape.as_ref(), root) {
            query.stack.push(root);
            query.remaining = root.len;
        }
        query
    }

    /// Whether a subtree can contribute any matches.
    fn admits(shape: Option<&Shape>, node: &Node<T, Key>) -> bool {
        node.len > 0
            && match shape {
                Some(shape) => shape.may_overlap(&node.bounds),
                None => true,
            }
    }
}

impl<'a, T, Key> Iterator for Query<'a, T, Key> {
    type Item = (Vec2, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(leaf) = &mut self.leaf {
                for (_, unit) in leaf.by_ref() {
                    self.remaining -= 1;
                    let hit = match self.shape {
                        Some(shape) => shape.contains(unit.position),
                        None => true,
                    };
                    if hit {
                        return Some((unit.position, &unit.payload));
                    }
                }
                self.leaf = None;
            }
            let node = self.stack.pop()?;
            match &node.kind {
                NodeKind::Leaf { units } => self.leaf = Some(units.iter()),
                NodeKind::Divided { children } => {
                    // Reverse push so NW pops first.
                    for child in children.iter().rev() {
                        if Self::admits(self.shape.as_ref(), child) {
                            self.stack.push(child);
                        } else {
                            self.remaining -= child.len;
                        }
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.shape {
            Some(_) => (0, Some(self.remaining)),
            None => (self.remaining, Some(self.remaining)),
        }
    }
}

impl<T, Key> FusedIterator for Query<'_, T, Key> {}

impl<T, Key> fmt::Debug for Query<'_, T, Key> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("shape", &self.shape)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<'a, T, K: KeyStrategy<T>> IntoIterator for &'a QuadTree<T, K> {
    type Item = (Vec2, &'a T);
    type IntoIter = Query<'a, T, K::Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The region quadtree: structure, updates, queries.

use alloc::boxed::Box;
use core::fmt;
use core::hash::Hash;

use hashbrown::DefaultHashBuilder;
use indexmap::IndexMap;

use crate::iter::Query;
use crate::key::{CoordKey, KeyContext, KeyStrategy, PackedKey};
use crate::shape::Shape;
use crate::types::{Aabb, Quadrant, Vec2};

/// Capacity and depth limits shared by every node of a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Unit count a leaf may reach before the next insert splits it.
    pub leaf_capacity: usize,
    /// Depth at which leaves stop splitting and grow unbounded instead.
    ///
    /// The root sits at depth 0. The backstop keeps coincident or
    /// near-coincident points from forcing endless subdivision.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            leaf_capacity: 8,
            max_depth: 8,
        }
    }
}

/// Insertion-ordered unit storage of a leaf.
pub(crate) type UnitMap<T, Key> = IndexMap<Key, Unit<T>, DefaultHashBuilder>;

/// A stored (position, payload) pair.
#[derive(Clone, Debug)]
pub(crate) struct Unit<T> {
    pub(crate) position: Vec2,
    pub(crate) payload: T,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<T, Key> {
    pub(crate) bounds: Aabb,
    pub(crate) depth: usize,
    /// Unit count of the whole subtree, maintained incrementally.
    pub(crate) len: usize,
    pub(crate) kind: NodeKind<T, Key>,
}

#[derive(Clone, Debug)]
pub(crate) enum NodeKind<T, Key> {
    /// Stores units directly.
    Leaf { units: UnitMap<T, Key> },
    /// Stores nothing itself; the children tile the bounds in
    /// [`Quadrant::ALL`] order.
    Divided { children: Box<[Node<T, Key>; 4]> },
}

/// Outcome of the descent phase of [`Node::relocate`].
enum Relocation<T> {
    /// No unit with the source key lives under this node.
    NotFound,
    /// The unit moved within its leaf. `displaced` reports whether it
    /// landed on an occupied key, merging two units into one.
    Moved { displaced: bool },
    /// The unit left its leaf; every node on the way up has already
    /// decremented its count and the root must re-insert the unit.
    Extracted(Unit<T>),
}

impl<T, Key: Clone + Eq + Hash> Node<T, Key> {
    fn new_leaf(bounds: Aabb, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            len: 0,
            kind: NodeKind::Leaf {
                units: UnitMap::default(),
            },
        }
    }

    /// Insert a unit whose position is already known to lie within
    /// `self.bounds`. Returns whether the key was fresh.
    fn insert(&mut self, key: Key, unit: Unit<T>, limits: &Limits) -> bool {
        debug_assert!(
            self.bounds.contains(unit.position),
            "quadtree invariant violated: insert delegated to a node that does not contain the position"
        );
        if let NodeKind::Leaf { units } = &mut self.kind {
            if units.len() < limits.leaf_capacity || self.depth >= limits.max_depth {
                let fresh = units.insert(key, unit).is_none();
                if fresh {
                    self.len += 1;
                }
                return fresh;
            }
            self.divide();
        }
        let fresh = self.insert_into_child(key, unit, limits);
        if fresh {
            self.len += 1;
        }
        fresh
    }

    fn insert_into_child(&mut self, key: Key, unit: Unit<T>, limits: &Limits) -> bool {
        let NodeKind::Divided { children } = &mut self.kind else {
            unreachable!("insert_into_child is only called on divided nodes");
        };
        for child in children.iter_mut() {
            if child.bounds.contains(unit.position) {
                return child.insert(key, unit, limits);
            }
        }
        unreachable!("a position inside a node's bounds lies in one of its quadrants")
    }

    /// Quarter the bounds and redistribute the stored units.
    ///
    /// All four children are created together. A unit lands in the first
    /// quadrant in [`Quadrant::ALL`] order whose bounds contain it; keys are
    /// stable across redistribution, so they move as-is. Division is
    /// permanent.
    fn divide(&mut self) {
        let NodeKind::Leaf { units } = &mut self.kind else {
            unreachable!("divide is only called on leaves");
        };
        let units = core::mem::take(units);
        let mut children = Box::new(
            Quadrant::ALL.map(|quadrant| Self::new_leaf(self.bounds.quadrant(quadrant), self.depth + 1)),
        );
        for (key, unit) in units {
            let Some(child) = children
                .iter_mut()
                .find(|child| child.bounds.contains(unit.position))
            else {
                unreachable!("a position inside a node's bounds lies in one of its quadrants");
            };
            child.adopt(key, unit);
        }
        self.kind = NodeKind::Divided { children };
    }

    /// Direct map insert used while redistributing into fresh children.
    fn adopt(&mut self, key: Key, unit: Unit<T>) {
        let NodeKind::Leaf { units } = &mut self.kind else {
            unreachable!("redistribution targets are freshly created leaves");
        };
        let previous = units.insert(key, unit);
        debug_assert!(
            previous.is_none(),
            "quadtree invariant violated: duplicate key during redistribution"
        );
        self.len += 1;
    }

    fn remove(&mut self, key: &Key, position: Vec2) -> Option<Unit<T>> {
        let removed = match &mut self.kind {
            NodeKind::Leaf { units } => units.shift_remove(key),
            NodeKind::Divided { children } => children
                .iter_mut()
                .filter(|child| child.bounds.contains(position))
                .find_map(|child| child.remove(key, position)),
        };
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    fn get(&self, key: &Key, position: Vec2) -> Option<&Unit<T>> {
        match &self.kind {
            NodeKind::Leaf { units } => units.get(key),
            NodeKind::Divided { children } => children
                .iter()
                .filter(|child| child.bounds.contains(position))
                .find_map(|child| child.get(key, position)),
        }
    }

    fn get_mut(&mut self, key: &Key, position: Vec2) -> Option<&mut Unit<T>> {
        match &mut self.kind {
            NodeKind::Leaf { units } => units.get_mut(key),
            NodeKind::Divided { children } => children
                .iter_mut()
                .filter(|child| child.bounds.contains(position))
                .find_map(|child| child.get_mut(key, position)),
        }
    }

    /// Find the leaf owning `key_from` and move its unit toward `to`.
    ///
    /// When `to` still falls inside the owning leaf the entry is rewritten
    /// in place and no counts change (except when the rewritten key lands on
    /// an occupied one, which merges two units and shrinks the counts by
    /// one). Otherwise the unit is extracted, counts along the descent are
    /// decremented, and the caller re-inserts from the root.
    fn relocate(&mut self, key_from: &Key, from: Vec2, key_to: &Key, to: Vec2) -> Relocation<T> {
        match &mut self.kind {
            NodeKind::Leaf { units } => {
                if !self.bounds.contains(to) {
                    return match units.shift_remove(key_from) {
                        Some(mut unit) => {
                            unit.position = to;
                            self.len -= 1;
                            Relocation::Extracted(unit)
                        }
                        None => Relocation::NotFound,
                    };
                }
                if key_from == key_to {
                    return match units.get_mut(key_from) {
                        Some(unit) => {
                            unit.position = to;
                            Relocation::Moved { displaced: false }
                        }
                        None => Relocation::NotFound,
                    };
                }
                match units.shift_remove(key_from) {
                    Some(mut unit) => {
                        unit.position = to;
                        let displaced = units.insert(key_to.clone(), unit).is_some();
                        if displaced {
                            self.len -= 1;
                        }
                        Relocation::Moved { displaced }
                    }
                    None => Relocation::NotFound,
                }
            }
            NodeKind::Divided { children } => {
                for child in children.iter_mut() {
                    if !child.bounds.contains(from) {
                        continue;
                    }
                    match child.relocate(key_from, from, key_to, to) {
                        Relocation::NotFound => {}
                        Relocation::Moved { displaced } => {
                            if displaced {
                                self.len -= 1;
                            }
                            return Relocation::Moved { displaced };
                        }
                        Relocation::Extracted(unit) => {
                            self.len -= 1;
                            return Relocation::Extracted(unit);
                        }
                    }
                }
                Relocation::NotFound
            }
        }
    }

    fn dump(&self, f: &mut fmt::Formatter<'_>, label: &str) -> fmt::Result
    where
        T: fmt::Debug,
    {
        for _ in 0..self.depth {
            f.write_str("  ")?;
        }
        let Aabb { center, size } = self.bounds;
        match &self.kind {
            NodeKind::Leaf { units } => {
                writeln!(
                    f,
                    "{label} leaf len={} bounds=({}, {})±({}, {})",
                    self.len, center.x, center.y, size.x, size.y
                )?;
                for unit in units.values() {
                    for _ in 0..=self.depth {
                        f.write_str("  ")?;
                    }
                    writeln!(f, "({}, {}) {:?}", unit.position.x, unit.position.y, unit.payload)?;
                }
            }
            NodeKind::Divided { children } => {
                writeln!(
                    f,
                    "{label} divided len={} bounds=({}, {})±({}, {})",
                    self.len, center.x, center.y, size.x, size.y
                )?;
                for (quadrant, child) in Quadrant::ALL.iter().zip(children.iter()) {
                    child.dump(f, quadrant.label())?;
                }
            }
        }
        Ok(())
    }
}

/// A region quadtree storing (position, payload) units.
///
/// The tree covers a fixed [`Aabb`] decided at construction. Every stored
/// unit is keyed by its position (see [`KeyStrategy`]); inserting at an
/// occupied key overwrites the payload, so the tree behaves as a map from
/// position keys to payloads, not a multiset.
///
/// A leaf holds up to [`Limits::leaf_capacity`] units. The insert that would
/// exceed that splits the leaf into four quadrants, tried in NW/NE/SW/SE
/// order, unless the leaf already sits at [`Limits::max_depth`], where it
/// grows without bound instead. Nodes never merge back together, and the
/// bounds never change; only [`QuadTree::clear`] resets the structure.
///
/// ## Example
///
/// ```rust
/// use thicket_quadtree::{Aabb, QuadTree, Shape, Vec2};
///
/// let bounds = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
/// let mut tree = QuadTree::new(bounds);
/// assert!(tree.insert(Vec2::new(10.0, -20.0), "hut"));
/// assert!(tree.insert(Vec2::new(35.0, 4.0), "well"));
/// assert!(!tree.insert(Vec2::new(150.0, 0.0), "out of range"));
/// assert_eq!(tree.len(), 2);
///
/// let near: Vec<_> = tree.query(Shape::circle(Vec2::new(12.0, -18.0), 5.0)).collect();
/// assert_eq!(near, [(Vec2::new(10.0, -20.0), &"hut")]);
/// ```
#[derive(Clone)]
pub struct QuadTree<T, K: KeyStrategy<T> = CoordKey> {
    limits: Limits,
    keyer: K,
    root: Node<T, K::Key>,
}

impl<T> QuadTree<T> {
    /// Create an empty tree over `bounds` with default [`Limits`] and
    /// coordinate-pair keys.
    pub fn new(bounds: Aabb) -> Self {
        Self::with_limits(bounds, Limits::default())
    }

    /// Create an empty tree over `bounds` with the given limits.
    pub fn with_limits(bounds: Aabb, limits: Limits) -> Self {
        Self::with_key_strategy(bounds, limits, CoordKey)
    }
}

impl<T> QuadTree<T, PackedKey> {
    /// Create an empty tree keyed by packed integers.
    ///
    /// Only valid for trees addressed exclusively by bounded non-negative
    /// integer coordinates; see [`PackedKey`].
    pub fn with_packed_keys(bounds: Aabb) -> Self {
        Self::with_packed_keys_and_limits(bounds, Limits::default())
    }

    /// Create an empty packed-key tree with the given limits.
    pub fn with_packed_keys_and_limits(bounds: Aabb, limits: Limits) -> Self {
        Self::with_key_strategy(bounds, limits, PackedKey)
    }
}

impl<T, K: KeyStrategy<T>> QuadTree<T, K> {
    /// Create an empty tree with a caller-supplied [`KeyStrategy`].
    pub fn with_key_strategy(bounds: Aabb, limits: Limits, strategy: K) -> Self {
        Self {
            limits,
            keyer: strategy,
            root: Node::new_leaf(bounds, 0),
        }
    }

    /// The fixed bounds the tree covers.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.root.bounds
    }

    /// The capacity and depth limits shared by every node.
    #[inline]
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Number of stored units.
    #[inline]
    pub fn len(&self) -> usize {
        self.root.len
    }

    /// Whether the tree stores no units.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.len == 0
    }

    /// Whether the root has split into quadrants.
    #[inline]
    pub fn is_divided(&self) -> bool {
        matches!(self.root.kind, NodeKind::Divided { .. })
    }

    fn context(&self) -> KeyContext {
        KeyContext {
            bounds: self.root.bounds,
        }
    }

    /// Store `payload` at `position`.
    ///
    /// Returns `false`, discarding the payload, when the position lies
    /// outside [`QuadTree::bounds`]; check the bounds first if the value
    /// must be kept on rejection. Inserting at a position whose key is
    /// already occupied overwrites that unit's payload without growing the
    /// tree.
    pub fn insert(&mut self, position: Vec2, payload: T) -> bool {
        if !self.root.bounds.contains(position) {
            return false;
        }
        let key = self.keyer.key_for(position, &payload, &self.context());
        self.root.insert(key, Unit { position, payload }, &self.limits);
        true
    }

    /// Move the unit keyed at `from` to `to`.
    ///
    /// Returns `false` without touching the tree when `to` lies outside
    /// [`QuadTree::bounds`] or when no unit is keyed at `from`. The payload
    /// reference only feeds the [`KeyStrategy`]; the stored payload moves
    /// unchanged. Relocating onto an occupied key overwrites that unit, so
    /// the tree can shrink by one.
    ///
    /// ```rust
    /// use thicket_quadtree::{Aabb, QuadTree, Vec2};
    ///
    /// let bounds = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
    /// let mut tree = QuadTree::new(bounds);
    /// tree.insert(Vec2::new(5.0, 5.0), 7_u32);
    /// assert!(tree.relocate(Vec2::new(5.0, 5.0), Vec2::new(-40.0, 60.0), &7));
    /// assert!(tree.contains(Vec2::new(-40.0, 60.0), &7));
    /// assert!(!tree.contains(Vec2::new(5.0, 5.0), &7));
    /// ```
    pub fn relocate(&mut self, from: Vec2, to: Vec2, payload: &T) -> bool {
        if !self.root.bounds.contains(to) {
            return false;
        }
        let context = self.context();
        let key_from = self.keyer.key_for(from, payload, &context);
        let key_to = self.keyer.key_for(to, payload, &context);
        match self.root.relocate(&key_from, from, &key_to, to) {
            Relocation::NotFound => false,
            Relocation::Moved { .. } => true,
            Relocation::Extracted(unit) => {
                // `to` passed the root bounds check, so re-insertion cannot
                // be rejected; it may still overwrite an occupant.
                self.root.insert(key_to, unit, &self.limits);
                true
            }
        }
    }

    /// Remove the unit keyed at `position`, returning its payload.
    ///
    /// Removing a position that holds nothing returns `None` and leaves the
    /// tree unchanged.
    pub fn remove(&mut self, position: Vec2, payload: &T) -> Option<T> {
        let key = self.keyer.key_for(position, payload, &self.context());
        self.root.remove(&key, position).map(|unit| unit.payload)
    }

    /// Whether a unit is keyed at `position`.
    pub fn contains(&self, position: Vec2, payload: &T) -> bool {
        self.get(position, payload).is_some()
    }

    /// The payload stored at `position`, if any.
    pub fn get(&self, position: Vec2, payload: &T) -> Option<&T> {
        let key = self.keyer.key_for(position, payload, &self.context());
        self.root.get(&key, position).map(|unit| &unit.payload)
    }

    /// Mutable access to the payload stored at `position`, if any.
    ///
    /// With a [`KeyStrategy`] that reads the payload, the mutation must not
    /// change the derived key; the default strategies never read it.
    pub fn get_mut(&mut self, position: Vec2, payload: &T) -> Option<&mut T> {
        let key = self.keyer.key_for(position, payload, &self.context());
        self.root.get_mut(&key, position).map(|unit| &mut unit.payload)
    }

    /// Lazily iterate over the units matched by `shape`.
    ///
    /// Subtrees whose bounds cannot overlap the shape's bounding box are
    /// pruned wholesale; each remaining unit is tested exactly with
    /// [`Shape::contains`]. Yields in depth-first NW/NE/SW/SE order,
    /// within-leaf insertion order; every call starts a fresh traversal.
    pub fn query(&self, shape: Shape) -> Query<'_, T, K::Key> {
        Query::new(&self.root, Some(shape))
    }

    /// Lazily iterate over every stored unit.
    ///
    /// Same traversal order as [`QuadTree::query`], with no filtering.
    pub fn iter(&self) -> Query<'_, T, K::Key> {
        Query::new(&self.root, None)
    }

    /// Drop every unit and all children, keeping bounds and limits.
    pub fn clear(&mut self) {
        self.root = Node::new_leaf(self.root.bounds, 0);
    }
}

impl<T, K: KeyStrategy<T>> fmt::Debug for QuadTree<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadTree")
            .field("bounds", &self.root.bounds)
            .field("limits", &self.limits)
            .field("len", &self.root.len)
            .field("divided", &self.is_divided())
            .finish_non_exhaustive()
    }
}

/// Indented per-depth dump of the whole structure: leaves list their raw
/// unit entries, divided nodes report per-quadrant subtree sizes.
impl<T: fmt::Debug, K: KeyStrategy<T>> fmt::Display for QuadTree<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.dump(f, "root")
    }
}

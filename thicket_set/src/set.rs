// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The payload-first set adapter.

use core::fmt;

use thicket_quadtree::{Aabb, CoordKey, KeyStrategy, Limits, QuadTree, Query, Shape, Vec2};

use crate::error::OutOfBounds;

/// A payload that knows where it lives.
///
/// The reported position must stay stable while the payload is stored; the
/// set files payloads under it and cannot find them again if it drifts. Move
/// a stored payload with [`QuadTreeSet::relocate`] rather than mutating
/// whatever backs `position`.
pub trait Positioned {
    /// The position this payload should be stored under.
    fn position(&self) -> Vec2;
}

/// A set of [`Positioned`] payloads backed by a region quadtree.
///
/// The adapter asks each payload for its own position, so call sites deal in
/// payloads alone. At most one payload lives at each position: inserting at
/// an occupied position replaces the previous occupant. Unlike the raw
/// [`QuadTree`], out-of-bounds positions return the payload in an
/// [`OutOfBounds`] error instead of dropping it.
#[derive(Clone)]
pub struct QuadTreeSet<T: Positioned, K: KeyStrategy<T> = CoordKey> {
    tree: QuadTree<T, K>,
}

impl<T: Positioned> QuadTreeSet<T> {
    /// Create an empty set over `bounds` with default [`Limits`].
    pub fn new(bounds: Aabb) -> Self {
        Self::with_limits(bounds, Limits::default())
    }

    /// Create an empty set over `bounds` with the given limits.
    pub fn with_limits(bounds: Aabb, limits: Limits) -> Self {
        Self {
            tree: QuadTree::with_limits(bounds, limits),
        }
    }
}

impl<T: Positioned, K: KeyStrategy<T>> QuadTreeSet<T, K> {
    /// Create an empty set with a caller-supplied [`KeyStrategy`].
    pub fn with_key_strategy(bounds: Aabb, limits: Limits, strategy: K) -> Self {
        Self {
            tree: QuadTree::with_key_strategy(bounds, limits, strategy),
        }
    }

    /// The fixed bounds the set covers.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.tree.bounds()
    }

    /// The capacity and depth limits of the backing tree.
    #[inline]
    pub fn limits(&self) -> Limits {
        self.tree.limits()
    }

    /// Number of stored payloads.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the set stores nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Store `payload` at its own position.
    ///
    /// Replaces a previous occupant of that position silently. The payload
    /// comes back in the error when its position lies outside
    /// [`QuadTreeSet::bounds`].
    pub fn insert(&mut self, payload: T) -> Result<(), OutOfBounds<T>> {
        let position = payload.position();
        if !self.tree.bounds().contains(position) {
            return Err(OutOfBounds {
                payload,
                position,
                bounds: self.tree.bounds(),
            });
        }
        let accepted = self.tree.insert(position, payload);
        debug_assert!(accepted, "the bounds were checked before inserting");
        Ok(())
    }

    /// Whether a payload is stored at `payload`'s position.
    pub fn contains(&self, payload: &T) -> bool {
        self.tree.contains(payload.position(), payload)
    }

    /// Remove the payload stored at `payload`'s position.
    ///
    /// Returns whether anything was removed. Use [`QuadTreeSet::take`] to
    /// get the stored value back.
    pub fn remove(&mut self, payload: &T) -> bool {
        self.take(payload).is_some()
    }

    /// Remove and return the payload stored at `payload`'s position.
    pub fn take(&mut self, payload: &T) -> Option<T> {
        self.tree.remove(payload.position(), payload)
    }

    /// Move `payload` from `from` to the position it now reports.
    ///
    /// The unit stored at `from` is removed and `payload` is stored at
    /// [`Positioned::position`], replacing any occupant there. Returns
    /// whether `from` held a unit; `Ok(false)` means the payload was stored
    /// fresh. A destination outside [`QuadTreeSet::bounds`] returns the
    /// payload in the error and leaves the set unchanged.
    pub fn relocate(&mut self, from: Vec2, payload: T) -> Result<bool, OutOfBounds<T>> {
        let to = payload.position();
        if !self.tree.bounds().contains(to) {
            return Err(OutOfBounds {
                payload,
                position: to,
                bounds: self.tree.bounds(),
            });
        }
        let moved = self.tree.remove(from, &payload).is_some();
        let accepted = self.tree.insert(to, payload);
        debug_assert!(accepted, "the bounds were checked before inserting");
        Ok(moved)
    }

    /// Lazily iterate over every stored payload.
    ///
    /// Follows the backing tree's traversal order; see [`QuadTree::iter`].
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.tree.iter().map(|(_, payload)| payload)
    }

    /// Lazily iterate over `(position, payload)` pairs.
    pub fn units(&self) -> Query<'_, T, K::Key> {
        self.tree.iter()
    }

    /// Lazily iterate over the payloads matched by `shape`.
    pub fn query(&self, shape: Shape) -> impl Iterator<Item = &T> + '_ {
        self.tree.query(shape).map(|(_, payload)| payload)
    }

    /// Drop every payload, keeping bounds and limits.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// The backing tree, for structural inspection or dumping.
    pub fn tree(&self) -> &QuadTree<T, K> {
        &self.tree
    }
}

impl<T: Positioned, K: KeyStrategy<T>> fmt::Debug for QuadTreeSet<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadTreeSet").field("tree", &self.tree).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Clone, Debug, PartialEq)]
    struct Critter {
        id: u32,
        x: f64,
        y: f64,
    }

    impl Critter {
        fn new(id: u32, x: f64, y: f64) -> Self {
            Self { id, x, y }
        }
    }

    impl Positioned for Critter {
        fn position(&self) -> Vec2 {
            Vec2::new(self.x, self.y)
        }
    }

    fn bounds_100() -> Aabb {
        Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0))
    }

    #[test]
    fn insert_and_contains_roundtrip() {
        let mut set = QuadTreeSet::new(bounds_100());
        set.insert(Critter::new(1, 10.0, 20.0)).unwrap();
        set.insert(Critter::new(2, -40.0, 0.0)).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Critter::new(1, 10.0, 20.0)));
        assert!(!set.contains(&Critter::new(1, 11.0, 20.0)));
    }

    #[test]
    fn out_of_bounds_inserts_return_the_payload() {
        let mut set = QuadTreeSet::new(bounds_100());
        let stray = Critter::new(9, 250.0, 0.0);
        let error = set.insert(stray.clone()).unwrap_err();
        assert_eq!(error.position, Vec2::new(250.0, 0.0));
        assert_eq!(error.bounds, bounds_100());
        assert_eq!(error.into_payload(), stray);
        assert!(set.is_empty());
    }

    #[test]
    fn reinserting_a_position_replaces_the_occupant() {
        let mut set = QuadTreeSet::new(bounds_100());
        set.insert(Critter::new(1, 5.0, 5.0)).unwrap();
        set.insert(Critter::new(2, 5.0, 5.0)).unwrap();
        assert_eq!(set.len(), 1);
        let stored: Vec<u32> = set.iter().map(|critter| critter.id).collect();
        assert_eq!(stored, [2]);
    }

    #[test]
    fn take_returns_the_stored_payload() {
        let mut set = QuadTreeSet::new(bounds_100());
        set.insert(Critter::new(1, 5.0, 5.0)).unwrap();
        // Lookup goes by position, so a probe value with the same position
        // finds the stored one.
        let probe = Critter::new(999, 5.0, 5.0);
        assert_eq!(set.take(&probe), Some(Critter::new(1, 5.0, 5.0)));
        assert!(set.is_empty());
        assert!(!set.remove(&probe), "a second removal finds nothing");
    }

    #[test]
    fn relocate_moves_the_stored_unit() {
        let mut set = QuadTreeSet::new(bounds_100());
        set.insert(Critter::new(1, 5.0, 5.0)).unwrap();
        let moved = set.relocate(Vec2::new(5.0, 5.0), Critter::new(1, -60.0, 30.0)).unwrap();
        assert!(moved);
        assert_eq!(set.len(), 1);
        assert!(set.contains(&Critter::new(1, -60.0, 30.0)));
        assert!(!set.contains(&Critter::new(1, 5.0, 5.0)));
    }

    #[test]
    fn relocating_from_a_vacant_position_stores_fresh() {
        let mut set = QuadTreeSet::new(bounds_100());
        let moved = set.relocate(Vec2::new(0.0, 0.0), Critter::new(1, 10.0, 10.0)).unwrap();
        assert!(!moved);
        assert_eq!(set.len(), 1);
        assert!(set.contains(&Critter::new(1, 10.0, 10.0)));
    }

    #[test]
    fn relocating_out_of_bounds_leaves_the_set_unchanged() {
        let mut set = QuadTreeSet::new(bounds_100());
        set.insert(Critter::new(1, 5.0, 5.0)).unwrap();
        let error = set.relocate(Vec2::new(5.0, 5.0), Critter::new(1, 500.0, 0.0)).unwrap_err();
        assert_eq!(error.position, Vec2::new(500.0, 0.0));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&Critter::new(1, 5.0, 5.0)));
    }

    #[test]
    fn queries_filter_by_shape() {
        let mut set = QuadTreeSet::new(bounds_100());
        for (id, x, y) in [(1, -80.0, -80.0), (2, -70.0, -75.0), (3, 60.0, 60.0)] {
            set.insert(Critter::new(id, x, y)).unwrap();
        }
        let mut nearby: Vec<u32> = set
            .query(Shape::circle(Vec2::new(-75.0, -77.0), 10.0))
            .map(|critter| critter.id)
            .collect();
        nearby.sort_unstable();
        assert_eq!(nearby, [1, 2]);
    }

    #[test]
    fn units_expose_positions_alongside_payloads() {
        let mut set = QuadTreeSet::new(bounds_100());
        set.insert(Critter::new(1, 10.0, 20.0)).unwrap();
        let units: Vec<_> = set.units().collect();
        assert_eq!(units.len(), 1);
        let (position, critter) = units[0];
        assert_eq!(position, Vec2::new(10.0, 20.0));
        assert_eq!(critter.id, 1);
    }

    #[test]
    fn clear_keeps_bounds_and_limits() {
        let mut set = QuadTreeSet::new(bounds_100());
        set.insert(Critter::new(1, 0.0, 0.0)).unwrap();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.bounds(), bounds_100());
        set.insert(Critter::new(2, 0.0, 0.0)).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn dumps_pass_through_to_the_tree() {
        let mut set = QuadTreeSet::new(bounds_100());
        set.insert(Critter::new(1, 0.0, 0.0)).unwrap();
        let dump = alloc::format!("{}", set.tree());
        assert!(dump.contains("root leaf len=1"), "got: {dump}");
    }
}

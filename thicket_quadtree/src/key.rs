// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position keys: how the tree decides that two units occupy the same spot.

use core::fmt::Debug;
use core::hash::Hash;

use crate::types::{Aabb, Vec2};

/// Context handed to a [`KeyStrategy`] alongside the position and payload.
///
/// Only data that is fixed for the tree's lifetime belongs here. Keys for
/// the same unit are recomputed at different nodes as units are
/// redistributed across splits, and every computation must agree, so the
/// context deliberately exposes the root bounds rather than any per-node
/// state.
#[derive(Copy, Clone, Debug)]
pub struct KeyContext {
    /// The root bounds of the tree the unit lives in.
    pub bounds: Aabb,
}

/// Strategy deriving the deduplication key for a stored unit.
///
/// The tree stores at most one unit per key: inserting at an occupied key
/// overwrites the payload instead of accumulating a second unit. A strategy
/// must be deterministic; identical `(position, payload, context)` inputs
/// always produce the same key.
pub trait KeyStrategy<T> {
    /// The key type stored in the per-leaf unit maps.
    type Key: Clone + Eq + Hash + Debug;

    /// Compute the key for a unit at `position`.
    fn key_for(&self, position: Vec2, payload: &T, context: &KeyContext) -> Self::Key;
}

/// The default strategy: one key per distinct coordinate pair.
///
/// Keys are the raw bit patterns of the two coordinates, with negative zero
/// normalized so `0.0` and `-0.0` land on the same key. The payload plays no
/// part.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CoordKey;

impl<T> KeyStrategy<T> for CoordKey {
    type Key = (u64, u64);

    #[inline]
    fn key_for(&self, position: Vec2, _payload: &T, _context: &KeyContext) -> Self::Key {
        (canonical_bits(position.x), canonical_bits(position.y))
    }
}

/// Packed-integer strategy for trees addressed by small non-negative
/// integer coordinates.
///
/// The key is `x + 2·w·y` where `w` is the root half-width, which is
/// collision-free exactly while coordinates are integers with
/// `0 ≤ x < 2·w`. Staying inside that range is the caller's responsibility.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedKey;

impl<T> KeyStrategy<T> for PackedKey {
    type Key = i64;

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "packed keys are only defined for coordinates small enough to fit"
    )]
    fn key_for(&self, position: Vec2, _payload: &T, context: &KeyContext) -> Self::Key {
        (position.x + 2.0 * context.bounds.size.x * position.y) as i64
    }
}

#[inline]
fn canonical_bits(v: f64) -> u64 {
    // -0.0 == 0.0, so both must map onto the same key.
    if v == 0.0 { 0 } else { v.to_bits() }
}

// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the set layer.

use thicket_quadtree::{Aabb, Vec2};
use thiserror::Error;

/// A payload's position fell outside the tree bounds.
///
/// The rejected payload rides along so the caller keeps ownership; nothing
/// about the set changes when this error is returned.
#[derive(Error, Debug, Clone, PartialEq)]
#[error(
    "position ({x}, {y}) lies outside the tree bounds centered at ({cx}, {cy}) with half-extent ({hx}, {hy})",
    x = .position.x,
    y = .position.y,
    cx = .bounds.center.x,
    cy = .bounds.center.y,
    hx = .bounds.size.x,
    hy = .bounds.size.y
)]
pub struct OutOfBounds<T> {
    /// The payload that could not be stored.
    pub payload: T,
    /// Where it asked to be stored.
    pub position: Vec2,
    /// The bounds that rejected it.
    pub bounds: Aabb,
}

impl<T> OutOfBounds<T> {
    /// Unwrap the rejected payload.
    pub fn into_payload(self) -> T {
        self.payload
    }
}

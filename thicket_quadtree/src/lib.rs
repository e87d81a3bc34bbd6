// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_quadtree --heading-base-level=0

//! Thicket Quadtree: a region quadtree over 2D points.
//!
//! The tree covers a fixed axis-aligned region and recursively quarters it as
//! units accumulate.
//!
//! - Insert, relocate, and remove point units with user payloads.
//! - Query lazily by rectangle, square, circle, or ellipse, or walk everything
//!   with [`QuadTree::iter`].
//! - Leaves split into four quadrants when an insert would overflow their
//!   capacity; a depth backstop keeps coincident points from splitting
//!   forever. See [`Limits`].
//!
//! Positions key the stored units: inserting at an occupied position
//! overwrites its payload, so the tree behaves as a map from positions to
//! payloads rather than a multiset. Key derivation is pluggable through
//! [`KeyStrategy`] for callers that can afford a cheaper key, such as
//! [`PackedKey`] for integer grids.
//!
//! ## Features
//!
//! - `kurbo`: conversions between the tree's plain geometry and [`kurbo`]
//!   points, rectangles, and circles.
//! - `std`: forwards `std` to optional dependencies. The crate itself is
//!   `no_std` and only requires [`alloc`].
//! - `libm`: forwards `libm` to optional dependencies for targets without
//!   `std`.
//!
//! # Example
//!
//! ```rust
//! use thicket_quadtree::{Aabb, QuadTree, Shape, Vec2};
//!
//! // A tree spanning x and y in [-100, 100], with default limits.
//! let bounds = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
//! let mut tree = QuadTree::new(bounds);
//!
//! assert!(tree.insert(Vec2::new(10.0, -20.0), "hut"));
//! assert!(tree.insert(Vec2::new(35.0, 4.0), "well"));
//! assert!(!tree.insert(Vec2::new(150.0, 0.0), "ignored"));
//! assert_eq!(tree.len(), 2);
//!
//! // Round shapes prune subtrees by bounding box, then test exactly.
//! let near: Vec<_> = tree.query(Shape::circle(Vec2::new(12.0, -18.0), 5.0)).collect();
//! assert_eq!(near, [(Vec2::new(10.0, -20.0), &"hut")]);
//!
//! // Relocation re-files a unit under a new position.
//! assert!(tree.relocate(Vec2::new(35.0, 4.0), Vec2::new(-35.0, 4.0), &"well"));
//! assert!(tree.contains(Vec2::new(-35.0, 4.0), &"well"));
//! ```
//!
//! Queries are plain [`Iterator`]s, so the usual adapters apply:
//!
//! ```rust
//! use thicket_quadtree::{Aabb, QuadTree, Shape, Vec2};
//!
//! let bounds = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
//! let mut tree = QuadTree::new(bounds);
//! for i in 0..10 {
//!     tree.insert(Vec2::new(f64::from(i) * 10.0 - 45.0, 0.0), i);
//! }
//! let in_left_half = tree
//!     .query(Shape::rectangle(Vec2::new(-50.0, 0.0), Vec2::new(50.0, 100.0)))
//!     .count();
//! assert_eq!(in_left_half, 5);
//! ```
//!
//! ## Traversal order
//!
//! Queries yield depth-first in NW/NE/SW/SE quadrant order and in insertion
//! order within a leaf. The y axis grows southward. A unit on a shared
//! quadrant edge belongs to the first quadrant in that order whose bounds
//! contain it, and all bounds checks are inclusive of their edges.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for coordinates and sizes. Debug builds may
//! assert. Containment tests use squared or normalized forms, so no square
//! roots are taken and `no_std` builds need no float runtime.

#![no_std]

extern crate alloc;

#[cfg(feature = "kurbo")]
mod convert;
mod iter;
mod key;
mod shape;
mod tree;
mod types;

pub use iter::Query;
pub use key::{CoordKey, KeyContext, KeyStrategy, PackedKey};
pub use shape::Shape;
pub use tree::{Limits, QuadTree};
pub use types::{Aabb, Quadrant, Vec2};

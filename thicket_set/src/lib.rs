// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_set --heading-base-level=0

//! Thicket Set: a payload-first set layer over the Thicket region quadtree.
//!
//! [`thicket_quadtree::QuadTree`] deals in `(position, payload)` pairs. This
//! crate flips the calling convention for payloads that already know where
//! they live: implement [`Positioned`] and the set derives every position
//! itself, so inserts, lookups, and removals take nothing but the payload.
//!
//! - At most one payload per position; inserting on top replaces.
//! - Out-of-bounds positions hand the payload back in an [`OutOfBounds`]
//!   error instead of dropping it.
//! - Queries delegate to the backing tree and stay lazy.
//!
//! # Example
//!
//! ```rust
//! use thicket_quadtree::{Aabb, Shape, Vec2};
//! use thicket_set::{Positioned, QuadTreeSet};
//!
//! #[derive(Debug, PartialEq)]
//! struct Beacon {
//!     name: &'static str,
//!     at: Vec2,
//! }
//!
//! impl Positioned for Beacon {
//!     fn position(&self) -> Vec2 {
//!         self.at
//!     }
//! }
//!
//! let bounds = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
//! let mut set = QuadTreeSet::new(bounds);
//! set.insert(Beacon { name: "north", at: Vec2::new(0.0, -80.0) })?;
//! set.insert(Beacon { name: "east", at: Vec2::new(80.0, 0.0) })?;
//!
//! let near_top: Vec<_> = set
//!     .query(Shape::circle(Vec2::new(0.0, -75.0), 10.0))
//!     .map(|beacon| beacon.name)
//!     .collect();
//! assert_eq!(near_top, ["north"]);
//! # Ok::<(), thicket_set::OutOfBounds<Beacon>>(())
//! ```

#![no_std]

extern crate alloc;

mod error;
mod set;

pub use error::OutOfBounds;
pub use set::{Positioned, QuadTreeSet};

#[cfg(test)]
mod tests {
    use super::*;
    use thicket_quadtree::{Aabb, Vec2};

    #[derive(Debug, PartialEq)]
    struct Pin(Vec2);

    impl Positioned for Pin {
        fn position(&self) -> Vec2 {
            self.0
        }
    }

    #[test]
    fn a_rejected_insert_round_trips_the_payload() {
        let bounds = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let mut set = QuadTreeSet::new(bounds);
        let pin = Pin(Vec2::new(11.0, 0.0));
        let error = set.insert(pin).unwrap_err();
        assert_eq!(error.into_payload(), Pin(Vec2::new(11.0, 0.0)));
    }
}

// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Payload-first storage with `thicket_set`.
//!
//! This example shows how to:
//! - implement `Positioned` for a payload type,
//! - insert, look up, and relocate payloads without repeating coordinates,
//! - keep ownership of payloads rejected for being out of bounds.
//!
//! Run:
//! - `cargo run -p thicket_demos --example unit_set`

use thicket_quadtree::{Aabb, Shape, Vec2};
use thicket_set::{Positioned, QuadTreeSet};

#[derive(Clone, Debug, PartialEq)]
struct Scout {
    callsign: &'static str,
    at: Vec2,
}

impl Scout {
    fn new(callsign: &'static str, x: f64, y: f64) -> Self {
        Self {
            callsign,
            at: Vec2::new(x, y),
        }
    }
}

impl Positioned for Scout {
    fn position(&self) -> Vec2 {
        self.at
    }
}

fn main() {
    let bounds = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
    let mut set = QuadTreeSet::new(bounds);

    // Deploy a few scouts; each carries its own position.
    for scout in [
        Scout::new("argus", -60.0, -60.0),
        Scout::new("brook", -20.0, -75.0),
        Scout::new("cedar", 15.0, 30.0),
        Scout::new("dove", 70.0, 55.0),
    ] {
        set.insert(scout).expect("all deployments are in bounds");
    }
    println!("Deployed {} scouts", set.len());

    // A stray deployment hands the payload back instead of dropping it.
    match set.insert(Scout::new("echo", 400.0, 0.0)) {
        Ok(()) => unreachable!("the target lies outside the map"),
        Err(error) => {
            println!("Rejected: {error}");
            let echo = error.into_payload();
            println!("Still holding {:?}", echo.callsign);
        }
    }

    // Move a scout: hand in the payload with its new position.
    let moved = set
        .relocate(Vec2::new(15.0, 30.0), Scout::new("cedar", -5.0, 10.0))
        .expect("the new position is in bounds");
    println!("cedar moved (previously stored: {moved})");

    // Who is patrolling the north-west quarter?
    let quarter = Shape::rectangle(Vec2::new(-50.0, -50.0), Vec2::new(50.0, 50.0));
    let callsigns: Vec<&str> = set.query(quarter).map(|scout| scout.callsign).collect();
    println!("North-west quarter: {callsigns:?}");

    println!("\n== Structure ==\n{}", set.tree());
}

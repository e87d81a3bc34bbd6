// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape queries against a region quadtree, plus `kurbo` interop.
//!
//! This example shows how to:
//! - build a `thicket_quadtree::QuadTree` over a fixed region,
//! - query it lazily by rectangle, circle, and ellipse,
//! - feed `kurbo` geometry in through the `kurbo` feature,
//! - dump the node structure for debugging.
//!
//! Run:
//! - `cargo run -p thicket_demos --example shape_queries`

use thicket_quadtree::{Aabb, QuadTree, Shape, Vec2};

fn main() {
    // A map spanning x and y in [-100, 100].
    let bounds = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
    let mut tree = QuadTree::new(bounds);

    // A handful of landmarks, enough to split the root.
    let landmarks = [
        ("mill", Vec2::new(-72.0, -64.0)),
        ("bridge", Vec2::new(-15.0, -40.0)),
        ("hut", Vec2::new(10.0, -20.0)),
        ("well", Vec2::new(35.0, 4.0)),
        ("shrine", Vec2::new(64.0, 18.0)),
        ("ford", Vec2::new(-52.0, 33.0)),
        ("quarry", Vec2::new(-24.0, 70.0)),
        ("kiln", Vec2::new(48.0, 66.0)),
        ("cairn", Vec2::new(81.0, -77.0)),
    ];
    for (name, position) in landmarks {
        assert!(tree.insert(position, name));
    }
    println!(
        "Stored {} landmarks; root divided: {}",
        tree.len(),
        tree.is_divided()
    );

    // Lazy queries: nothing is visited until the iterator is driven.
    let probes = [
        (
            "south-west rectangle",
            Shape::rectangle(Vec2::new(-50.0, -50.0), Vec2::new(50.0, 50.0)),
        ),
        (
            "circle around the well",
            Shape::circle(Vec2::new(30.0, 0.0), 20.0),
        ),
        (
            "wide flat ellipse",
            Shape::ellipse(Vec2::new(0.0, 0.0), Vec2::new(90.0, 25.0)),
        ),
    ];
    for (label, shape) in probes {
        let hits: Vec<&str> = tree.query(shape).map(|(_, name)| *name).collect();
        println!("\n== {label} ==");
        println!("{hits:?}");
    }

    // kurbo geometry drops straight in.
    let viewport: Aabb = kurbo::Rect::new(-80.0, -80.0, 0.0, 0.0).into();
    let in_viewport = tree
        .query(Shape::rectangle(viewport.center, viewport.size))
        .count();
    println!("\nLandmarks in the kurbo viewport: {in_viewport}");

    let brush: Shape = kurbo::Circle::new((10.0, -20.0), 15.0).into();
    let brushed: Vec<&str> = tree.query(brush).map(|(_, name)| *name).collect();
    println!("Landmarks under the kurbo brush: {brushed:?}");

    // The Display impl dumps the node structure, indented per depth.
    println!("\n== Structure ==\n{tree}");
}

// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between tree geometry and [`kurbo`] types.
//!
//! This bridge is intentionally small: points and rectangles convert both
//! ways, and an axis-aligned [`kurbo::Circle`] maps onto [`Shape::circle`].
//! [`kurbo::Ellipse`] has no counterpart here because it carries an affine
//! transform and may be rotated, which [`Shape::ellipse`] cannot express.

use crate::shape::Shape;
use crate::types::{Aabb, Vec2};

impl From<kurbo::Point> for Vec2 {
    fn from(point: kurbo::Point) -> Self {
        Self::new(point.x, point.y)
    }
}

impl From<Vec2> for kurbo::Point {
    fn from(position: Vec2) -> Self {
        Self::new(position.x, position.y)
    }
}

impl From<kurbo::Rect> for Aabb {
    /// Interprets the rectangle through its sorted corners, so rectangles
    /// with swapped edges convert to the same bounds.
    fn from(rect: kurbo::Rect) -> Self {
        let rect = rect.abs();
        Self::from_min_max(Vec2::new(rect.x0, rect.y0), Vec2::new(rect.x1, rect.y1))
    }
}

impl From<Aabb> for kurbo::Rect {
    fn from(bounds: Aabb) -> Self {
        Self::new(bounds.min_x(), bounds.min_y(), bounds.max_x(), bounds.max_y())
    }
}

impl From<kurbo::Circle> for Shape {
    fn from(circle: kurbo::Circle) -> Self {
        Self::circle(circle.center.into(), circle.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_convert_both_ways() {
        let position: Vec2 = kurbo::Point::new(3.5, -2.0).into();
        assert_eq!(position, Vec2::new(3.5, -2.0));
        let point: kurbo::Point = position.into();
        assert_eq!(point, kurbo::Point::new(3.5, -2.0));
    }

    #[test]
    fn rects_map_onto_center_and_half_extent() {
        let bounds: Aabb = kurbo::Rect::new(-10.0, 0.0, 30.0, 20.0).into();
        assert_eq!(bounds.center, Vec2::new(10.0, 10.0));
        assert_eq!(bounds.size, Vec2::new(20.0, 10.0));
        let rect: kurbo::Rect = bounds.into();
        assert_eq!(rect, kurbo::Rect::new(-10.0, 0.0, 30.0, 20.0));
    }

    #[test]
    fn swapped_rect_edges_are_sorted_first() {
        let bounds: Aabb = kurbo::Rect::new(30.0, 20.0, -10.0, 0.0).into();
        assert_eq!(bounds.center, Vec2::new(10.0, 10.0));
        assert_eq!(bounds.size, Vec2::new(20.0, 10.0));
    }

    #[test]
    fn circles_keep_their_containment_semantics() {
        let shape: Shape = kurbo::Circle::new((1.0, 1.0), 5.0).into();
        assert_eq!(shape, Shape::circle(Vec2::new(1.0, 1.0), 5.0));
        assert!(shape.contains(Vec2::new(4.0, 5.0)), "3-4-5 boundary point");
        assert!(!shape.contains(Vec2::new(4.1, 5.0)));
    }
}

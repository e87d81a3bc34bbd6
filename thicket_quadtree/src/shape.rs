// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of query shapes and their containment tests.

use crate::types::{Aabb, Vec2};

/// A region to query the tree with.
///
/// This is a closed set: queries match on the four kinds exhaustively, so
/// there is no "unknown shape" failure mode. `size` always means half-extent;
/// the scalar forms (square, circle) apply it to both axes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle with per-axis half-extents.
    Rectangle {
        /// Midpoint of the rectangle.
        center: Vec2,
        /// Half-extent along each axis.
        size: Vec2,
    },
    /// Axis-aligned square; `size` is the shared half-extent.
    Square {
        /// Midpoint of the square.
        center: Vec2,
        /// Half the side length.
        size: f64,
    },
    /// Circle; `size` is the radius.
    Circle {
        /// Midpoint of the circle.
        center: Vec2,
        /// Radius.
        size: f64,
    },
    /// Axis-aligned ellipse; `size` holds the two semi-axes.
    Ellipse {
        /// Midpoint of the ellipse.
        center: Vec2,
        /// Semi-axis along each coordinate axis.
        size: Vec2,
    },
}

impl Shape {
    /// An axis-aligned rectangle spanning `center ± size`.
    #[inline(always)]
    pub const fn rectangle(center: Vec2, size: Vec2) -> Self {
        Self::Rectangle { center, size }
    }

    /// An axis-aligned square spanning `center ± size` on both axes.
    #[inline(always)]
    pub const fn square(center: Vec2, size: f64) -> Self {
        Self::Square { center, size }
    }

    /// A circle of radius `size`.
    #[inline(always)]
    pub const fn circle(center: Vec2, size: f64) -> Self {
        Self::Circle { center, size }
    }

    /// An axis-aligned ellipse with semi-axes `size.x` and `size.y`.
    #[inline(always)]
    pub const fn ellipse(center: Vec2, size: Vec2) -> Self {
        Self::Ellipse { center, size }
    }

    /// Whether `point` lies inside the shape. The boundary counts as inside.
    ///
    /// Circle and ellipse use the normalized distance inequality
    /// `(dx/rx)² + (dy/ry)² ≤ 1`; a zero semi-axis makes the normalized term
    /// non-finite, so a degenerate ellipse contains nothing.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        match *self {
            Self::Rectangle { .. } | Self::Square { .. } => self.bounding_box().contains(point),
            Self::Circle { center, size } => {
                let dx = point.x - center.x;
                let dy = point.y - center.y;
                dx * dx + dy * dy <= size * size
            }
            Self::Ellipse { center, size } => {
                let nx = (point.x - center.x) / size.x;
                let ny = (point.y - center.y) / size.y;
                nx * nx + ny * ny <= 1.0
            }
        }
    }

    /// The bounding box of the shape: `center ± size`, with the scalar sizes
    /// broadcast to both axes.
    #[inline]
    pub fn bounding_box(&self) -> Aabb {
        match *self {
            Self::Rectangle { center, size } | Self::Ellipse { center, size } => {
                Aabb::new(center, size)
            }
            Self::Square { center, size } | Self::Circle { center, size } => {
                Aabb::new(center, Vec2::new(size, size))
            }
        }
    }

    /// Whether the shape could overlap the box.
    ///
    /// Exact for rectangle and square (their bounding box *is* the shape),
    /// conservative for circle and ellipse: it tests the bounding box, which
    /// may report an overlap the curve never realizes, but never misses one.
    /// Queries use this to prune subtrees and re-check each stored point with
    /// [`Shape::contains`], so the over-approximation costs descent, not
    /// correctness.
    #[inline]
    pub fn may_overlap(&self, bounds: &Aabb) -> bool {
        self.bounding_box().overlaps(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::{Shape, Vec2};
    use crate::types::Aabb;

    #[test]
    fn rectangle_and_square_edges_are_inside() {
        let rect = Shape::rectangle(Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0));
        assert!(rect.contains(Vec2::new(4.0, 2.0)));
        assert!(rect.contains(Vec2::new(-4.0, 0.0)));
        assert!(!rect.contains(Vec2::new(4.1, 0.0)));
        assert!(!rect.contains(Vec2::new(0.0, 2.1)));

        let square = Shape::square(Vec2::new(1.0, 1.0), 3.0);
        assert!(square.contains(Vec2::new(4.0, 4.0)));
        assert!(square.contains(Vec2::new(-2.0, -2.0)));
        assert!(!square.contains(Vec2::new(4.5, 1.0)));
    }

    #[test]
    fn circle_boundary_counts_as_inside() {
        let circle = Shape::circle(Vec2::new(0.0, 0.0), 5.0);
        // 3-4-5 triangle: exactly on the boundary.
        assert!(circle.contains(Vec2::new(3.0, 4.0)));
        assert!(circle.contains(Vec2::new(-5.0, 0.0)));
        assert!(!circle.contains(Vec2::new(3.0, 4.1)));
        // The circle is narrower than its bounding box at the corners.
        assert!(!circle.contains(Vec2::new(4.0, 4.0)));
    }

    #[test]
    fn ellipse_uses_the_normalized_inequality() {
        let ellipse = Shape::ellipse(Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0));
        assert!(ellipse.contains(Vec2::new(4.0, 0.0)));
        assert!(ellipse.contains(Vec2::new(0.0, -2.0)));
        assert!(!ellipse.contains(Vec2::new(4.0, 2.0)), "box corner is outside the curve");
        assert!(!ellipse.contains(Vec2::new(4.1, 0.0)));
    }

    #[test]
    fn degenerate_ellipse_contains_nothing() {
        let flat = Shape::ellipse(Vec2::new(0.0, 0.0), Vec2::new(0.0, 2.0));
        assert!(!flat.contains(Vec2::new(0.0, 0.0)));
        assert!(!flat.contains(Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn bounding_boxes_broadcast_scalar_sizes() {
        let circle = Shape::circle(Vec2::new(2.0, -1.0), 3.0);
        assert_eq!(
            circle.bounding_box(),
            Aabb::new(Vec2::new(2.0, -1.0), Vec2::new(3.0, 3.0))
        );
        let rect = Shape::rectangle(Vec2::new(2.0, -1.0), Vec2::new(3.0, 5.0));
        assert_eq!(
            rect.bounding_box(),
            Aabb::new(Vec2::new(2.0, -1.0), Vec2::new(3.0, 5.0))
        );
    }

    #[test]
    fn round_shapes_prune_conservatively() {
        let circle = Shape::circle(Vec2::new(0.0, 0.0), 1.0);
        // The box clips the circle's bounding box near a corner the circle
        // itself never reaches: the prune must still admit it.
        let corner_box = Aabb::new(Vec2::new(1.5, 1.5), Vec2::new(0.6, 0.6));
        assert!(circle.may_overlap(&corner_box));
        assert!(!circle.contains(Vec2::new(0.9, 0.9)));

        let far_box = Aabb::new(Vec2::new(5.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(!circle.may_overlap(&far_box));
    }
}

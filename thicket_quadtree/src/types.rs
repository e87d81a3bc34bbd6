// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types: coordinates, bounding boxes, quadrants.

/// A 2D coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate. Grows downward, matching screen conventions.
    pub y: f64,
}

impl Vec2 {
    /// Create a new coordinate.
    #[inline(always)]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Vec2 {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box stored as a center and a half-extent.
///
/// The box spans `[center - size, center + size]` on each axis, so `size`
/// holds *half* the width and height. This is both the spatial bound of a
/// tree node and the bounding box of a query shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Midpoint of the box.
    pub center: Vec2,
    /// Half-extent along each axis. Must be non-negative.
    pub size: Vec2,
}

impl Aabb {
    /// Create a new box from its center and half-extent.
    #[inline(always)]
    pub const fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Create a box from its min/max corners.
    #[inline]
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            center: Vec2::new(0.5 * (min.x + max.x), 0.5 * (min.y + max.y)),
            size: Vec2::new(0.5 * (max.x - min.x), 0.5 * (max.y - min.y)),
        }
    }

    /// Minimum x (left edge).
    #[inline]
    pub fn min_x(&self) -> f64 {
        self.center.x - self.size.x
    }

    /// Maximum x (right edge).
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.center.x + self.size.x
    }

    /// Minimum y (top edge).
    #[inline]
    pub fn min_y(&self) -> f64 {
        self.center.y - self.size.y
    }

    /// Maximum y (bottom edge).
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.center.y + self.size.y
    }

    /// Whether this box contains the point.
    ///
    /// The edges count as inside on all four sides, so a point exactly on a
    /// boundary is contained by every box whose edge it sits on.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.min_x() <= point.x
            && point.x <= self.max_x()
            && self.min_y() <= point.y
            && point.y <= self.max_y()
    }

    /// Determines whether this box overlaps with another in any way.
    ///
    /// The edge of a box is considered part of itself, so two boxes that
    /// merely share an edge are considered to overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use thicket_quadtree::{Aabb, Vec2};
    ///
    /// let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0));
    /// let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0));
    /// assert!(a.overlaps(&b));
    ///
    /// let c = Aabb::new(Vec2::new(11.0, 0.0), Vec2::new(0.5, 0.5));
    /// assert!(!a.overlaps(&c));
    /// ```
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x() <= other.max_x()
            && self.max_x() >= other.min_x()
            && self.min_y() <= other.max_y()
            && self.max_y() >= other.min_y()
    }

    /// One quarter of this box.
    ///
    /// The four quadrants have half this box's half-extent, tile it exactly,
    /// and share its center as their common corner.
    #[inline]
    pub fn quadrant(&self, quadrant: Quadrant) -> Self {
        let half = Vec2::new(0.5 * self.size.x, 0.5 * self.size.y);
        let (dx, dy) = quadrant.direction();
        Self {
            center: Vec2::new(self.center.x + dx * half.x, self.center.y + dy * half.y),
            size: half,
        }
    }
}

/// One quarter of a subdivided box.
///
/// The y axis grows downward, so "north" is the smaller-y half. The
/// declaration order here is the tie-break order used throughout the tree:
/// a point that sits on a shared edge belongs to the first quadrant in this
/// order whose bounds contain it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Left half, top half.
    NorthWest,
    /// Right half, top half.
    NorthEast,
    /// Left half, bottom half.
    SouthWest,
    /// Right half, bottom half.
    SouthEast,
}

impl Quadrant {
    /// All quadrants, in tie-break order.
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Axis signs from a box's center toward this quadrant's center.
    #[inline]
    pub(crate) const fn direction(self) -> (f64, f64) {
        match self {
            Self::NorthWest => (-1.0, -1.0),
            Self::NorthEast => (1.0, -1.0),
            Self::SouthWest => (-1.0, 1.0),
            Self::SouthEast => (1.0, 1.0),
        }
    }

    /// Compact label used by the debug dump.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::NorthWest => "NW",
            Self::NorthEast => "NE",
            Self::SouthWest => "SW",
            Self::SouthEast => "SE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Aabb, Quadrant, Vec2};

    #[test]
    fn contains_is_inclusive_on_all_edges() {
        let aabb = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 5.0));
        assert!(aabb.contains(Vec2::new(-10.0, 0.0)));
        assert!(aabb.contains(Vec2::new(10.0, 0.0)));
        assert!(aabb.contains(Vec2::new(0.0, -5.0)));
        assert!(aabb.contains(Vec2::new(0.0, 5.0)));
        assert!(aabb.contains(Vec2::new(10.0, 5.0)), "corners are inside");
        assert!(!aabb.contains(Vec2::new(10.1, 0.0)));
        assert!(!aabb.contains(Vec2::new(0.0, -5.1)));
    }

    #[test]
    fn from_min_max_matches_corner_accessors() {
        let aabb = Aabb::from_min_max(Vec2::new(-3.0, 1.0), Vec2::new(7.0, 9.0));
        assert_eq!(aabb.center, Vec2::new(2.0, 5.0));
        assert_eq!(aabb.size, Vec2::new(5.0, 4.0));
        assert_eq!(aabb.min_x(), -3.0);
        assert_eq!(aabb.max_x(), 7.0);
        assert_eq!(aabb.min_y(), 1.0);
        assert_eq!(aabb.max_y(), 9.0);
    }

    #[test]
    fn quadrants_tile_the_parent() {
        let parent = Aabb::new(Vec2::new(4.0, -2.0), Vec2::new(8.0, 6.0));
        for quadrant in Quadrant::ALL {
            let child = parent.quadrant(quadrant);
            assert_eq!(child.size, Vec2::new(4.0, 3.0));
            // Every child keeps the parent's center on its boundary.
            assert!(child.contains(parent.center), "{quadrant:?} must touch the shared corner");
        }
        let nw = parent.quadrant(Quadrant::NorthWest);
        assert_eq!(nw.min_x(), parent.min_x());
        assert_eq!(nw.min_y(), parent.min_y());
        assert_eq!(nw.max_x(), parent.center.x);
        assert_eq!(nw.max_y(), parent.center.y);
        let se = parent.quadrant(Quadrant::SouthEast);
        assert_eq!(se.max_x(), parent.max_x());
        assert_eq!(se.max_y(), parent.max_y());
    }

    #[test]
    fn boundary_point_is_contained_by_multiple_quadrants() {
        let parent = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let shared = parent.center;
        let containing = Quadrant::ALL
            .iter()
            .filter(|q| parent.quadrant(**q).contains(shared))
            .count();
        assert_eq!(containing, 4, "the shared corner lies in every quadrant");
    }
}

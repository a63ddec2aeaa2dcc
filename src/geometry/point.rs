//! Point type and related structures.
//!
//! Points are the values stored in the tree. Each point has:
//! - Position (x, y) in the plane
//! - A stable identifier (its position in the input sequence)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable point identifier.
///
/// This is the position of the point in the sequence the tree was built
/// from, so callers can map results back to their own records (markers,
/// rows, ...). Duplicate coordinates still get distinct IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(pub u32);

impl From<PointId> for u32 {
    #[inline]
    fn from(id: PointId) -> Self {
        id.0
    }
}

/// Splitting dimension of a tree level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Axis used at a given tree depth: x on even levels, y on odd ones.
    #[inline]
    pub fn at_depth(depth: usize) -> Self {
        if depth % 2 == 0 { Axis::X } else { Axis::Y }
    }

    /// Numeric form, 0 for x and 1 for y.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new Point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along `axis`.
    #[inline]
    pub fn coord(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Both coordinates are neither NaN nor infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Squared distance from this point to the line through `pivot`
    /// perpendicular to `axis`.
    #[inline]
    pub fn plane_distance_squared(self, pivot: Point, axis: Axis) -> f64 {
        let d = self.coord(axis) - pivot.coord(axis);
        d * d
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Squared Euclidean distance between two points.
///
/// All comparisons in the tree use this instead of the true distance;
/// `sqrt` is monotonic on non-negative inputs so orderings are the same.
#[inline]
pub fn distance_squared(p: Point, q: Point) -> f64 {
    let dx = p.x - q.x;
    let dy = p.y - q.y;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_id_into_u32() {
        let raw: u32 = PointId(7).into();
        assert_eq!(raw, 7);
    }

    #[test]
    fn test_axis_alternates_with_depth() {
        assert_eq!(Axis::at_depth(0), Axis::X);
        assert_eq!(Axis::at_depth(1), Axis::Y);
        assert_eq!(Axis::at_depth(2), Axis::X);
        assert_eq!(Axis::at_depth(7).index(), 1);
    }

    #[test]
    fn test_distance_squared() {
        let p = Point::new(4.0, 4.0);
        assert_eq!(distance_squared(p, Point::new(5.0, 5.0)), 2.0);
        assert_eq!(distance_squared(p, Point::new(0.0, 0.0)), 32.0);
        assert_eq!(distance_squared(p, p), 0.0);
        // Symmetric
        assert_eq!(
            distance_squared(Point::new(-3.0, 1.5), Point::new(2.0, -0.5)),
            distance_squared(Point::new(2.0, -0.5), Point::new(-3.0, 1.5)),
        );
    }

    #[test]
    fn test_plane_distance() {
        let target = Point::new(4.0, 9.0);
        let pivot = Point::new(1.0, 10.0);
        assert_eq!(target.plane_distance_squared(pivot, Axis::X), 9.0);
        assert_eq!(target.plane_distance_squared(pivot, Axis::Y), 1.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point::new(0.0, -1e300).is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Point::from((1.0, 2.0)), Point::new(1.0, 2.0));
        assert_eq!(Point::from([3.0, 4.0]), Point::new(3.0, 4.0));
        assert_eq!(format!("{}", Point::new(1.5, -2.0)), "(1.5, -2)");
    }
}

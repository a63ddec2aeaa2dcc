//! Axis-aligned rectangles.

use serde::{Deserialize, Serialize};

use super::point::{Axis, Point};

/// A closed axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// `(lo, hi)` without `f64::min`/`max`, which would drop a NaN operand.
#[inline]
fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Bounds {
    /// Rectangle spanned by two opposite corners, in any order.
    ///
    /// A NaN coordinate is kept on one of the edges, so the result fails
    /// `is_finite` instead of silently collapsing onto the other corner.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (min_x, max_x) = ordered(a.x, b.x);
        let (min_y, max_y) = ordered(a.y, b.y);
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Degenerate rectangle covering a single point.
    pub fn from_point(p: Point) -> Self {
        Self::from_corners(p, p)
    }

    /// Grow to cover `p`.
    pub fn extend(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Smallest rectangle covering every point, or None for no points.
    pub fn enclosing<I: IntoIterator<Item = Point>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bounds = Self::from_point(iter.next()?);
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }

    /// All four edges are finite.
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    /// Point lies inside or on the border.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Lower edge along `axis`.
    #[inline]
    pub fn min(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.min_x,
            Axis::Y => self.min_y,
        }
    }

    /// Upper edge along `axis`.
    #[inline]
    pub fn max(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.max_x,
            Axis::Y => self.max_y,
        }
    }

    /// As `[min_x, min_y, max_x, max_y]`.
    pub fn to_array(self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let b = Bounds::from_corners(Point::new(5.0, -1.0), Point::new(-2.0, 3.0));
        assert_eq!(b.to_array(), [-2.0, -1.0, 5.0, 3.0]);
    }

    #[test]
    fn test_from_corners_keeps_nan() {
        let b = Bounds::from_corners(Point::new(f64::NAN, -1.0), Point::new(4.0, 1.0));
        assert!(!b.is_finite());
        let b = Bounds::from_corners(Point::new(4.0, -1.0), Point::new(1.0, f64::NAN));
        assert!(!b.is_finite());
    }

    #[test]
    fn test_contains_is_closed() {
        let b = Bounds::from_corners(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(10.0, 5.0)));
        assert!(b.contains(Point::new(5.0, 5.0)));
        assert!(!b.contains(Point::new(10.1, 5.0)));
        assert!(!b.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn test_enclosing() {
        assert_eq!(Bounds::enclosing(Vec::<Point>::new()), None);

        let b = Bounds::enclosing([
            Point::new(1.0, 1.0),
            Point::new(-3.0, 4.0),
            Point::new(2.0, -6.0),
        ])
        .unwrap();
        assert_eq!(b.to_array(), [-3.0, -6.0, 2.0, 4.0]);
        assert_eq!(b.min(Axis::X), -3.0);
        assert_eq!(b.max(Axis::Y), 4.0);
    }

    #[test]
    fn test_is_finite() {
        let mut b = Bounds::from_point(Point::new(0.0, 0.0));
        assert!(b.is_finite());
        b.max_x = f64::INFINITY;
        assert!(!b.is_finite());
    }
}

//! Planar geometry primitives.
//!
//! Points, splitting axes, rectangles and the squared distance used by every
//! comparison in the spatial index.

mod bounds;
mod point;

pub use bounds::Bounds;
pub use point::{Axis, Point, PointId, distance_squared};

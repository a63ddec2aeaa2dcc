//! Spatial indexing for O(log n) neighbor queries.
//!
//! This module provides a two-dimensional k-d tree built once by median
//! splits, with exact nearest, k-nearest, radius and rectangle queries.

mod kdtree;
mod neighbors;
mod search;

pub use kdtree::KdTree;
pub use neighbors::Neighbor;

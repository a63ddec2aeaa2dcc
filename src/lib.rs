//! Planar KdTree - WASM Module
//!
//! This module provides an exact nearest-neighbor index over a static set of
//! 2D points. It is compiled to WebAssembly and exposes a JavaScript-friendly
//! API via wasm-bindgen; the page that draws points and reads query input
//! builds one index and asks it for neighbors.
//!
//! # Architecture
//!
//! - `geometry`: Points, axes, rectangles and squared distance
//! - `spatial`: The k-d tree, its builder and branch-and-bound queries
//! - `config`: Options for configured neighbor searches
//! - `error`: Input validation errors

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod geometry;
pub mod spatial;

pub use config::QueryConfig;
pub use error::KdTreeError;
pub use geometry::{Axis, Bounds, Point, PointId, distance_squared};
pub use spatial::{KdTree, Neighbor};

use config::neighbor_count;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Main entry point for neighbor queries.
///
/// This struct wraps an immutable KdTree and provides the public API
/// exposed to JavaScript. Results refer to points by their index in the
/// array the tree was built from.
#[wasm_bindgen]
pub struct KdTreeWasm {
    tree: KdTree,
}

#[wasm_bindgen]
impl KdTreeWasm {
    /// Build a tree from a Float64Array of positions.
    ///
    /// The positions array should be [x0, y0, x1, y1, ...].
    /// Throws if the length is odd or any coordinate is not finite.
    #[wasm_bindgen(constructor)]
    pub fn new(positions: &[f64]) -> Result<KdTreeWasm, JsError> {
        Ok(Self {
            tree: KdTree::from_positions(positions)?,
        })
    }

    /// Build a tree from an array of `[x, y]` pairs.
    #[wasm_bindgen(js_name = fromPoints)]
    pub fn from_points(points: JsValue) -> Result<KdTreeWasm, JsError> {
        let pairs: Vec<[f64; 2]> = serde_wasm_bindgen::from_value(points)?;
        Ok(Self {
            tree: KdTree::build(pairs.into_iter().map(Point::from).collect())?,
        })
    }

    /// Get the number of points in the tree.
    pub fn len(&self) -> u32 {
        self.tree.len() as u32
    }

    /// Check if the tree is empty.
    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Get the number of tree levels.
    pub fn height(&self) -> u32 {
        self.tree.height() as u32
    }

    /// Get the bounding box of all points.
    ///
    /// Returns [min_x, min_y, max_x, max_y], or undefined if empty.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f64>> {
        self.tree.bounds().map(|b| b.to_array().to_vec())
    }

    /// Get a point by index as [x, y].
    #[wasm_bindgen(js_name = getPoint)]
    pub fn get_point(&self, index: u32) -> Option<Vec<f64>> {
        self.tree.point(PointId(index)).map(|p| vec![p.x, p.y])
    }

    // =========================================================================
    // Nearest Neighbor
    // =========================================================================

    /// Find the index of the point nearest to (x, y).
    ///
    /// Returns undefined if the tree is empty.
    pub fn nearest(&self, x: f64, y: f64) -> Result<Option<u32>, JsError> {
        Ok(self.tree.nearest(Point::new(x, y))?.map(|n| n.id.into()))
    }

    /// Find the nearest point as `{ id, point: { x, y }, distanceSquared }`.
    #[wasm_bindgen(js_name = nearestPoint)]
    pub fn nearest_point(&self, x: f64, y: f64) -> Result<JsValue, JsError> {
        let best = self.tree.nearest(Point::new(x, y))?;
        Ok(serde_wasm_bindgen::to_value(&best)?)
    }

    /// Find the nearest point within a maximum distance.
    ///
    /// Returns the index, or undefined if no point is that close.
    #[wasm_bindgen(js_name = nearestWithin)]
    pub fn nearest_within(
        &self,
        x: f64,
        y: f64,
        max_distance: f64,
    ) -> Result<Option<u32>, JsError> {
        Ok(self
            .tree
            .nearest_within(Point::new(x, y), max_distance)?
            .map(|n| n.id.into()))
    }

    // =========================================================================
    // K-Nearest Neighbors
    // =========================================================================

    /// Find the k nearest points, ascending by distance.
    ///
    /// Returns an array of `{ id, point: { x, y }, distanceSquared }`.
    /// Throws if k <= 0.
    #[wasm_bindgen(js_name = kNearest)]
    pub fn k_nearest(&self, x: f64, y: f64, k: i32) -> Result<JsValue, JsError> {
        let neighbors = self.tree.k_nearest(Point::new(x, y), neighbor_count(k.into())?)?;
        Ok(serde_wasm_bindgen::to_value(&neighbors)?)
    }

    /// Indices of the k nearest points, ascending by distance.
    #[wasm_bindgen(js_name = kNearestIndices)]
    pub fn k_nearest_indices(&self, x: f64, y: f64, k: i32) -> Result<Vec<u32>, JsError> {
        let neighbors = self.tree.k_nearest(Point::new(x, y), neighbor_count(k.into())?)?;
        Ok(neighbors.iter().map(|n| n.id.into()).collect())
    }

    /// True distances of the k nearest points, ascending.
    #[wasm_bindgen(js_name = kNearestDistances)]
    pub fn k_nearest_distances(&self, x: f64, y: f64, k: i32) -> Result<Float64Array, JsError> {
        let neighbors = self.tree.k_nearest(Point::new(x, y), neighbor_count(k.into())?)?;
        let distances: Vec<f64> = neighbors.iter().map(Neighbor::distance).collect();
        Ok(Float64Array::from(&distances[..]))
    }

    /// Radius of the circle around (x, y) enclosing the k nearest points.
    ///
    /// Returns undefined if the tree is empty.
    #[wasm_bindgen(js_name = enclosingRadius)]
    pub fn enclosing_radius(&self, x: f64, y: f64, k: i32) -> Result<Option<f64>, JsError> {
        Ok(self
            .tree
            .enclosing_radius(Point::new(x, y), neighbor_count(k.into())?)?)
    }

    /// Configured neighbor search.
    ///
    /// `options` is `{ k?: number, maxDistance?: number }`; undefined uses
    /// the defaults (a single unbounded nearest neighbor).
    pub fn query(&self, x: f64, y: f64, options: JsValue) -> Result<JsValue, JsError> {
        let config: QueryConfig = if options.is_undefined() || options.is_null() {
            QueryConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        let neighbors = self.tree.search(Point::new(x, y), &config)?;
        Ok(serde_wasm_bindgen::to_value(&neighbors)?)
    }

    // =========================================================================
    // Range Queries
    // =========================================================================

    /// Indices of all points within `radius` of (x, y), nearest first.
    #[wasm_bindgen(js_name = withinRadius)]
    pub fn within_radius(&self, x: f64, y: f64, radius: f64) -> Result<Vec<u32>, JsError> {
        let neighbors = self.tree.within_radius(Point::new(x, y), radius)?;
        Ok(neighbors.iter().map(|n| n.id.into()).collect())
    }

    /// Indices of all points inside a rectangle (borders included).
    #[wasm_bindgen(js_name = inRect)]
    pub fn in_rect(
        &self,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    ) -> Result<Vec<u32>, JsError> {
        let rect = Bounds::from_corners(Point::new(min_x, min_y), Point::new(max_x, max_y));
        Ok(self.tree.in_rect(rect)?.iter().map(|&(id, _)| id.into()).collect())
    }
}

impl KdTreeWasm {
    /// The wrapped tree, for Rust callers.
    pub fn tree(&self) -> &KdTree {
        &self.tree
    }
}

impl From<KdTree> for KdTreeWasm {
    fn from(tree: KdTree) -> Self {
        Self { tree }
    }
}

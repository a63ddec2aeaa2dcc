//! KdTree - median-split construction.
//!
//! The tree is stored as an arena of nodes in pre-order; children are
//! referenced by slot index. It is built once from a fixed point list and
//! never mutated afterwards, so any number of readers can query it at once.

use tracing::{debug, warn};

use crate::error::{KdTreeError, Result};
use crate::geometry::{Axis, Bounds, Point, PointId};

/// Internal tree vertex.
#[derive(Debug, Clone)]
pub(crate) struct KdNode {
    /// Identifier of the pivot point.
    pub(crate) id: PointId,
    /// The pivot point.
    pub(crate) point: Point,
    /// Splitting dimension (depth mod 2).
    pub(crate) axis: Axis,
    /// Slot of the subtree with coordinates <= the pivot on `axis`.
    pub(crate) left: Option<usize>,
    /// Slot of the subtree with coordinates >= the pivot on `axis`.
    pub(crate) right: Option<usize>,
}

impl KdNode {
    /// Children ordered as (same side as `target`, opposite side).
    #[inline]
    pub(crate) fn children_toward(&self, target: Point) -> (Option<usize>, Option<usize>) {
        if target.coord(self.axis) < self.point.coord(self.axis) {
            (self.left, self.right)
        } else {
            (self.right, self.left)
        }
    }
}

/// Immutable two-dimensional k-d tree.
#[derive(Debug, Clone, Default)]
pub struct KdTree {
    /// Nodes in pre-order; the root, if any, is slot 0.
    pub(crate) nodes: Vec<KdNode>,
    /// Node slot of each point, indexed by PointId.
    slots: Vec<usize>,
    /// Number of levels.
    height: usize,
}

impl KdTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a point sequence.
    ///
    /// Each point's ID is its position in `points`. Duplicates are kept as
    /// distinct entries. Fails if any coordinate is NaN or infinite.
    pub fn build(points: Vec<Point>) -> Result<Self> {
        let count = points.len();
        if u32::try_from(count).is_err() {
            return Err(KdTreeError::TooManyPoints(count));
        }

        if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            warn!(index, x = p.x, y = p.y, "rejecting non-finite point");
            return Err(KdTreeError::NonFinitePoint {
                index,
                x: p.x,
                y: p.y,
            });
        }

        let mut entries: Vec<(PointId, Point)> = points
            .into_iter()
            .enumerate()
            .map(|(i, p)| (PointId(i as u32), p))
            .collect();

        let mut tree = Self {
            nodes: Vec::with_capacity(count),
            slots: vec![0; count],
            height: 0,
        };
        tree.build_recursive(&mut entries, 0);

        debug!(points = count, height = tree.height, "built k-d tree");
        Ok(tree)
    }

    /// Build a tree from a flat `[x0, y0, x1, y1, ...]` buffer.
    pub fn from_positions(positions: &[f64]) -> Result<Self> {
        if positions.len() % 2 != 0 {
            warn!(len = positions.len(), "rejecting odd-length position buffer");
            return Err(KdTreeError::OddPositionBuffer(positions.len()));
        }
        let points = positions
            .chunks_exact(2)
            .map(|xy| Point::new(xy[0], xy[1]))
            .collect();
        Self::build(points)
    }

    /// Sort by the level's axis, make the median the pivot, recurse on both
    /// halves. Returns the slot of the subtree root.
    fn build_recursive(&mut self, entries: &mut [(PointId, Point)], depth: usize) -> Option<usize> {
        if entries.is_empty() {
            return None;
        }

        let axis = Axis::at_depth(depth);
        entries.sort_by(|a, b| a.1.coord(axis).total_cmp(&b.1.coord(axis)));

        let median = entries.len() / 2;
        let (id, point) = entries[median];

        let slot = self.nodes.len();
        self.nodes.push(KdNode {
            id,
            point,
            axis,
            left: None,
            right: None,
        });
        self.slots[id.0 as usize] = slot;
        self.height = self.height.max(depth + 1);

        let (lower, rest) = entries.split_at_mut(median);
        let left = self.build_recursive(lower, depth + 1);
        let right = self.build_recursive(&mut rest[1..], depth + 1);

        let node = &mut self.nodes[slot];
        node.left = left;
        node.right = right;
        Some(slot)
    }

    /// Slot of the root node.
    #[inline]
    pub(crate) fn root(&self) -> Option<usize> {
        if self.nodes.is_empty() { None } else { Some(0) }
    }

    /// Number of points in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels (0 for an empty tree).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Look up a point by the ID it was built with.
    pub fn point(&self, id: PointId) -> Option<Point> {
        self.slots
            .get(id.0 as usize)
            .map(|&slot| self.nodes[slot].point)
    }

    /// All points in tree pre-order.
    pub fn points(&self) -> impl Iterator<Item = (PointId, Point)> + '_ {
        self.nodes.iter().map(|node| (node.id, node.point))
    }

    /// Smallest rectangle covering every point, or None if empty.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(self.nodes.iter().map(|node| node.point))
    }
}

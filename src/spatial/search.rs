//! Queries against a built KdTree.
//!
//! Every search is a top-down branch-and-bound walk: visit the child on the
//! target's side of the splitting plane first, then the opposite child only
//! if the plane itself is closer than the current bound. The squared
//! distance from the target to the plane is a lower bound for every point
//! on the far side.

use tracing::trace;

use super::kdtree::KdTree;
use super::neighbors::{Neighbor, NeighborSet};
use crate::config::{QueryConfig, validate_radius};
use crate::error::{KdTreeError, Result};
use crate::geometry::{Bounds, Point, PointId, distance_squared};

fn check_target(target: Point) -> Result<()> {
    if target.is_finite() {
        Ok(())
    } else {
        Err(KdTreeError::NonFiniteTarget {
            x: target.x,
            y: target.y,
        })
    }
}

impl KdTree {
    // =========================================================================
    // Nearest Neighbor
    // =========================================================================

    /// Find the point closest to `target`.
    ///
    /// Returns `Ok(None)` if the tree is empty. When several points are
    /// equally close, the first one reached in traversal order wins.
    pub fn nearest(&self, target: Point) -> Result<Option<Neighbor>> {
        check_target(target)?;
        let best = self.nearest_from(self.root(), target, None);
        trace!(x = target.x, y = target.y, found = best.is_some(), "nearest query");
        Ok(best)
    }

    /// Find the closest point, but only if it is at most `max_distance` away.
    pub fn nearest_within(&self, target: Point, max_distance: f64) -> Result<Option<Neighbor>> {
        validate_radius(max_distance)?;
        let limit = max_distance * max_distance;
        Ok(self
            .nearest(target)?
            .filter(|n| n.distance_squared <= limit))
    }

    fn nearest_from(
        &self,
        slot: Option<usize>,
        target: Point,
        best: Option<Neighbor>,
    ) -> Option<Neighbor> {
        let Some(slot) = slot else {
            return best;
        };
        let node = &self.nodes[slot];

        let d = distance_squared(target, node.point);
        let mut best = match best {
            Some(current) if current.distance_squared <= d => current,
            _ => Neighbor::new(node.id, node.point, d),
        };

        let (near, far) = node.children_toward(target);
        if let Some(found) = self.nearest_from(near, target, Some(best)) {
            best = found;
        }

        if target.plane_distance_squared(node.point, node.axis) < best.distance_squared {
            if let Some(found) = self.nearest_from(far, target, Some(best)) {
                best = found;
            }
        }

        Some(best)
    }

    // =========================================================================
    // K-Nearest Neighbors
    // =========================================================================

    /// Find the `k` points closest to `target`, ascending by distance.
    ///
    /// Returns `min(k, len)` neighbors. `k == 0` is rejected.
    pub fn k_nearest(&self, target: Point, k: usize) -> Result<Vec<Neighbor>> {
        self.search(target, &QueryConfig::nearest(k))
    }

    /// K-nearest search with the options in `config`.
    ///
    /// With `max_distance` set, only points inside the closed disc are
    /// considered, so fewer than `k` results may come back.
    pub fn search(&self, target: Point, config: &QueryConfig) -> Result<Vec<Neighbor>> {
        config.validate()?;
        check_target(target)?;

        let mut set = NeighborSet::new(config.k, config.limit_squared());
        self.collect_nearest(self.root(), target, &mut set);
        trace!(
            x = target.x,
            y = target.y,
            k = config.k,
            found = set.len(),
            "k-nearest query"
        );
        Ok(set.into_vec())
    }

    /// Distance from `target` to its k-th nearest point (or the farthest
    /// point if the tree holds fewer than `k`). This is the radius of the
    /// smallest circle around `target` containing the k-nearest result.
    pub fn enclosing_radius(&self, target: Point, k: usize) -> Result<Option<f64>> {
        Ok(self.k_nearest(target, k)?.last().map(Neighbor::distance))
    }

    fn collect_nearest(&self, slot: Option<usize>, target: Point, set: &mut NeighborSet) {
        let Some(slot) = slot else {
            return;
        };
        let node = &self.nodes[slot];

        let d = distance_squared(target, node.point);
        set.offer(Neighbor::new(node.id, node.point, d));

        let (near, far) = node.children_toward(target);
        self.collect_nearest(near, target, set);

        if set.should_visit(target.plane_distance_squared(node.point, node.axis)) {
            self.collect_nearest(far, target, set);
        }
    }

    // =========================================================================
    // Range Queries
    // =========================================================================

    /// All points at most `radius` from `target`, ascending by distance.
    pub fn within_radius(&self, target: Point, radius: f64) -> Result<Vec<Neighbor>> {
        validate_radius(radius)?;
        check_target(target)?;

        let mut set = NeighborSet::unbounded(radius * radius);
        self.collect_nearest(self.root(), target, &mut set);
        trace!(x = target.x, y = target.y, radius, found = set.len(), "radius query");
        Ok(set.into_vec())
    }

    /// All points inside the closed rectangle, in tree pre-order.
    pub fn in_rect(&self, rect: Bounds) -> Result<Vec<(PointId, Point)>> {
        if !rect.is_finite() {
            return Err(KdTreeError::InvalidRect);
        }

        let mut found = Vec::new();
        self.collect_in_rect(self.root(), &rect, &mut found);
        trace!(?rect, found = found.len(), "rectangle query");
        Ok(found)
    }

    fn collect_in_rect(
        &self,
        slot: Option<usize>,
        rect: &Bounds,
        found: &mut Vec<(PointId, Point)>,
    ) {
        let Some(slot) = slot else {
            return;
        };
        let node = &self.nodes[slot];

        if rect.contains(node.point) {
            found.push((node.id, node.point));
        }

        let pivot = node.point.coord(node.axis);
        if rect.min(node.axis) <= pivot {
            self.collect_in_rect(node.left, rect, found);
        }
        if rect.max(node.axis) >= pivot {
            self.collect_in_rect(node.right, rect, found);
        }
    }
}

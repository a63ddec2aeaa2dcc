//! Neighbor results and the bounded candidate list used by k-nearest search.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, PointId};

/// A point returned by a query, paired with its squared distance to the
/// query target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighbor {
    /// Position of the point in the input sequence.
    pub id: PointId,
    /// The point itself.
    pub point: Point,
    /// Squared Euclidean distance to the query target.
    pub distance_squared: f64,
}

impl Neighbor {
    #[inline]
    pub fn new(id: PointId, point: Point, distance_squared: f64) -> Self {
        Self {
            id,
            point,
            distance_squared,
        }
    }

    /// True Euclidean distance to the query target.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.distance_squared.sqrt()
    }
}

/// Best candidates seen so far, sorted ascending by squared distance and
/// never longer than `capacity`.
///
/// Candidates with equal distance keep their arrival order, and a full list
/// only admits a candidate strictly closer than its last entry, so the
/// first-encountered point wins ties.
#[derive(Debug, Clone)]
pub(crate) struct NeighborSet {
    capacity: usize,
    limit_squared: f64,
    items: Vec<Neighbor>,
}

impl NeighborSet {
    /// At most `capacity` neighbors, each within `limit_squared` (inclusive).
    pub(crate) fn new(capacity: usize, limit_squared: f64) -> Self {
        Self {
            capacity,
            limit_squared,
            items: Vec::with_capacity(capacity.min(64)),
        }
    }

    /// Every neighbor within `limit_squared`, no count limit.
    pub(crate) fn unbounded(limit_squared: f64) -> Self {
        Self::new(usize::MAX, limit_squared)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Squared distance of the current worst accepted neighbor.
    #[inline]
    pub(crate) fn worst(&self) -> Option<f64> {
        self.items.last().map(|n| n.distance_squared)
    }

    /// Offer a candidate. Returns true if it was kept.
    pub(crate) fn offer(&mut self, candidate: Neighbor) -> bool {
        let d = candidate.distance_squared;
        if d > self.limit_squared {
            return false;
        }
        if self.is_full() {
            match self.worst() {
                Some(worst) if d < worst => {}
                _ => return false,
            }
        }

        let at = self.items.partition_point(|n| n.distance_squared <= d);
        self.items.insert(at, candidate);
        if self.items.len() > self.capacity {
            self.items.pop();
        }
        true
    }

    /// Whether a subtree whose splitting plane lies `plane_squared` away
    /// could still hold a point this set would accept.
    #[inline]
    pub(crate) fn should_visit(&self, plane_squared: f64) -> bool {
        if self.is_full() {
            self.worst().is_some_and(|worst| plane_squared < worst)
        } else {
            plane_squared <= self.limit_squared
        }
    }

    pub(crate) fn into_vec(self) -> Vec<Neighbor> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: u32, distance_squared: f64) -> Neighbor {
        Neighbor::new(PointId(id), Point::new(id as f64, 0.0), distance_squared)
    }

    fn ids(set: &NeighborSet) -> Vec<u32> {
        set.items.iter().map(|n| n.id.0).collect()
    }

    #[test]
    fn test_neighbor_distance() {
        assert_eq!(candidate(0, 25.0).distance(), 5.0);
    }

    #[test]
    fn test_fills_then_keeps_sorted() {
        let mut set = NeighborSet::new(3, f64::INFINITY);
        assert!(set.offer(candidate(0, 9.0)));
        assert!(set.offer(candidate(1, 1.0)));
        assert!(set.offer(candidate(2, 4.0)));
        assert!(set.is_full());
        assert_eq!(ids(&set), vec![1, 2, 0]);
        assert_eq!(set.worst(), Some(9.0));

        // Closer candidate displaces the worst
        assert!(set.offer(candidate(3, 2.0)));
        assert_eq!(ids(&set), vec![1, 3, 2]);
        assert_eq!(set.len(), 3);

        // Farther candidate is rejected
        assert!(!set.offer(candidate(4, 100.0)));
        assert_eq!(ids(&set), vec![1, 3, 2]);
    }

    #[test]
    fn test_ties_keep_first_encountered() {
        let mut set = NeighborSet::new(2, f64::INFINITY);
        set.offer(candidate(0, 1.0));
        set.offer(candidate(1, 1.0));
        assert_eq!(ids(&set), vec![0, 1]);

        // Equal to the worst: not strictly closer, rejected
        assert!(!set.offer(candidate(2, 1.0)));
        assert_eq!(ids(&set), vec![0, 1]);

        let mut set = NeighborSet::new(3, f64::INFINITY);
        set.offer(candidate(0, 4.0));
        set.offer(candidate(1, 1.0));
        set.offer(candidate(2, 1.0));
        assert_eq!(ids(&set), vec![1, 2, 0]);
    }

    #[test]
    fn test_limit_is_inclusive() {
        let mut set = NeighborSet::unbounded(4.0);
        assert!(set.offer(candidate(0, 4.0)));
        assert!(!set.offer(candidate(1, 4.5)));
        assert!(set.offer(candidate(2, 0.0)));
        assert_eq!(ids(&set), vec![2, 0]);
        assert!(!set.is_full());
    }

    #[test]
    fn test_should_visit() {
        let mut set = NeighborSet::new(2, f64::INFINITY);
        // Not full: always worth visiting
        assert!(set.should_visit(1e12));

        set.offer(candidate(0, 4.0));
        set.offer(candidate(1, 9.0));
        assert!(set.should_visit(8.0));
        assert!(!set.should_visit(9.0));
        assert!(!set.should_visit(10.0));

        let bounded = NeighborSet::new(5, 1.0);
        assert!(bounded.should_visit(1.0));
        assert!(!bounded.should_visit(1.5));
    }
}

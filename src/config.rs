//! Query configuration.
//!
//! Mirrors the options object the JS side passes to `query`, e.g.
//! `{ k: 10, maxDistance: 0.01 }`. Missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{KdTreeError, Result};

/// Options for a configured neighbor search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryConfig {
    /// Maximum number of neighbors to return (default: 1).
    pub k: usize,
    /// Only points at most this far away are returned (default: unbounded).
    pub max_distance: Option<f64>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            k: 1,
            max_distance: None,
        }
    }
}

impl QueryConfig {
    /// Unbounded search for the `k` nearest points.
    pub fn nearest(k: usize) -> Self {
        Self {
            k,
            max_distance: None,
        }
    }

    /// Restrict results to the closed disc of radius `max_distance`.
    pub fn within(mut self, max_distance: f64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Reject a zero count or an unusable radius.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(KdTreeError::InvalidK(0));
        }
        if let Some(radius) = self.max_distance {
            validate_radius(radius)?;
        }
        Ok(())
    }

    /// Inclusive squared distance limit for accepted candidates.
    pub(crate) fn limit_squared(&self) -> f64 {
        self.max_distance.map_or(f64::INFINITY, |r| r * r)
    }
}

/// Convert a signed neighbor count from the JS side, rejecting k <= 0.
pub fn neighbor_count(k: i64) -> Result<usize> {
    if k <= 0 {
        return Err(KdTreeError::InvalidK(k));
    }
    usize::try_from(k).map_err(|_| KdTreeError::InvalidK(k))
}

/// Radii must be non-negative and not NaN. Infinity means unbounded.
pub(crate) fn validate_radius(radius: f64) -> Result<()> {
    if radius.is_nan() || radius < 0.0 {
        return Err(KdTreeError::InvalidRadius(radius));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QueryConfig::default();
        assert_eq!(config.k, 1);
        assert_eq!(config.max_distance, None);
        assert_eq!(config.limit_squared(), f64::INFINITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            QueryConfig::nearest(0).validate(),
            Err(KdTreeError::InvalidK(0))
        );
        assert!(QueryConfig::nearest(3).within(0.0).validate().is_ok());
        assert!(matches!(
            QueryConfig::nearest(3).within(-1.0).validate(),
            Err(KdTreeError::InvalidRadius(_))
        ));
        assert!(matches!(
            QueryConfig::nearest(3).within(f64::NAN).validate(),
            Err(KdTreeError::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_neighbor_count() {
        assert_eq!(neighbor_count(3), Ok(3));
        assert_eq!(neighbor_count(0), Err(KdTreeError::InvalidK(0)));
        assert_eq!(neighbor_count(-4), Err(KdTreeError::InvalidK(-4)));
    }

    #[test]
    fn test_deserialize_partial() {
        // Shape of the options object sent from JS
        use serde::de::value::{Error, MapDeserializer};

        let fields = MapDeserializer::<_, Error>::new([("k", 4usize)].into_iter());
        let config = QueryConfig::deserialize(fields).unwrap();
        assert_eq!(config, QueryConfig::nearest(4));
    }

    #[test]
    fn test_limit_squared() {
        assert_eq!(QueryConfig::nearest(2).within(3.0).limit_squared(), 9.0);
    }
}

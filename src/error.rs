//! Error types for tree construction and queries.

use thiserror::Error;

/// Errors raised when building or querying a tree.
///
/// Every variant is an input problem: the index itself has no failure
/// modes once built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KdTreeError {
    #[error("Invalid neighbor count: {0} (must be at least 1)")]
    InvalidK(i64),

    #[error("Point {index} has non-finite coordinates ({x}, {y})")]
    NonFinitePoint { index: usize, x: f64, y: f64 },

    #[error("Query point has non-finite coordinates ({x}, {y})")]
    NonFiniteTarget { x: f64, y: f64 },

    #[error("Position buffer length {0} is not a multiple of 2")]
    OddPositionBuffer(usize),

    #[error("Invalid search radius: {0}")]
    InvalidRadius(f64),

    #[error("Query rectangle has non-finite corners")]
    InvalidRect,

    #[error("Too many points: {0} (index is limited to u32 identifiers)")]
    TooManyPoints(usize),
}

pub type Result<T> = std::result::Result<T, KdTreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            KdTreeError::InvalidK(0).to_string(),
            "Invalid neighbor count: 0 (must be at least 1)"
        );
        assert_eq!(
            KdTreeError::NonFinitePoint { index: 3, x: f64::NAN, y: 1.0 }.to_string(),
            "Point 3 has non-finite coordinates (NaN, 1)"
        );
        assert_eq!(
            KdTreeError::OddPositionBuffer(5).to_string(),
            "Position buffer length 5 is not a multiple of 2"
        );
    }
}

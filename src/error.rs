//! Errors raised when a caller breaks the clustering contract.

/// Contract violations reported by [`ClusterTree`](crate::ClusterTree) and
/// [`ChromClusters`](crate::ChromClusters).
///
/// Every check runs before the tree is touched, so an `Err` leaves the tree
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClusterError {
    /// An interval whose start lies after its end.
    #[error("Invalid interval: start {start} is after end {end}")]
    InvalidInterval {
        /// Requested start coordinate
        start: i64,
        /// Requested end coordinate
        end: i64,
    },

    /// A negative clustering distance.
    #[error("max_dist must be non-negative, got {0}")]
    NegativeMaxDist(i64),

    /// A membership threshold of zero.
    #[error("min_intervals must be at least 1")]
    ZeroMinIntervals,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ClusterError>;

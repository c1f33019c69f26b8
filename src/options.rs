//! Configuration for interval clustering.

use crate::error::{ClusterError, Result};

/// Options controlling how intervals are grouped and reported.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterOptions {
    /// Largest gap (`next.start - prev.end`) that still joins two intervals.
    /// Overlapping or touching intervals always join.
    pub max_dist: i64, // e.g., 0 for strict overlap/adjacency

    /// Minimum number of member intervals for a cluster to be reported.
    pub min_intervals: usize, // e.g., 2

    /// Seed for the balance priorities. `None` seeds from OS entropy.
    /// Cluster contents never depend on the seed, only the tree shape does.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            max_dist: 1,
            min_intervals: 2,
            seed: None,
        }
    }
}

impl ClusterOptions {
    pub fn new(max_dist: i64, min_intervals: usize) -> Self {
        Self {
            max_dist,
            min_intervals,
            seed: None,
        }
    }

    /// Fix the priority seed, making the tree shape reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the ranges documented on each field.
    pub fn validate(&self) -> Result<()> {
        if self.max_dist < 0 {
            return Err(ClusterError::NegativeMaxDist(self.max_dist));
        }
        if self.min_intervals == 0 {
            return Err(ClusterError::ZeroMinIntervals);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_find_clusters() {
        let opts = ClusterOptions::default();
        assert_eq!(opts.max_dist, 1);
        assert_eq!(opts.min_intervals, 2);
        assert!(opts.seed.is_none());
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        assert_eq!(
            ClusterOptions::new(-1, 1).validate(),
            Err(ClusterError::NegativeMaxDist(-1))
        );
        assert_eq!(
            ClusterOptions::new(0, 0).validate(),
            Err(ClusterError::ZeroMinIntervals)
        );
        assert!(ClusterOptions::new(0, 1).validate().is_ok());
    }

    #[test]
    fn test_with_seed() {
        let opts = ClusterOptions::new(5, 3).with_seed(7);
        assert_eq!(opts.seed, Some(7));
        assert_eq!(opts.max_dist, 5);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_missing_seed_defaults_to_none() {
        let opts: ClusterOptions =
            serde_json::from_str(r#"{"max_dist": 10, "min_intervals": 3}"#).unwrap();
        assert_eq!(opts, ClusterOptions::new(10, 3));

        let json = serde_json::to_string(&opts.clone().with_seed(1)).unwrap();
        let back: ClusterOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, Some(1));
    }
}

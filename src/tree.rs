//! `ClusterTree`: the public clustering container.

use rand::rngs::StdRng;
use tracing::debug;

use crate::error::{ClusterError, Result};
use crate::iter::Clusters;
use crate::node::{ClusterNode, Interval, Link};
use crate::options::ClusterOptions;
use crate::priority::make_rng;

/// Owned summary of one reported cluster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterRegion<T> {
    pub start: i64,
    pub end: i64,
    /// Member identifiers, ascending.
    pub ids: Vec<T>,
}

/// Groups intervals whose gaps are at most `max_dist`, merging transitively as
/// intervals arrive.
///
/// Clusters never split: once two intervals share a cluster they stay
/// together. Only clusters with at least `min_intervals` members are reported
/// by [`iter`](Self::iter), [`regions`](Self::regions) and [`ids`](Self::ids).
///
/// Not synchronized; wrap in a lock to share between threads.
pub struct ClusterTree<T> {
    options: ClusterOptions,
    root: Link<T>,
    rng: StdRng,
    len: usize,
}

impl<T> ClusterTree<T> {
    /// Empty tree with entropy-seeded priorities.
    pub fn new(max_dist: i64, min_intervals: usize) -> Result<Self> {
        Self::with_options(ClusterOptions::new(max_dist, min_intervals))
    }

    pub fn with_options(options: ClusterOptions) -> Result<Self> {
        options.validate()?;
        debug!(
            max_dist = options.max_dist,
            min_intervals = options.min_intervals,
            seeded = options.seed.is_some(),
            "creating cluster tree"
        );
        Ok(Self {
            rng: make_rng(options.seed),
            options,
            root: None,
            len: 0,
        })
    }

    /// Add the closed interval `[start, end]` tagged with `id`.
    ///
    /// Fails without touching the tree when `start > end`.
    pub fn insert(&mut self, start: i64, end: i64, id: T) -> Result<()> {
        if start > end {
            return Err(ClusterError::InvalidInterval { start, end });
        }
        let interval = Interval { start, end, id };
        let root = ClusterNode::insert(
            self.root.take(),
            interval,
            self.options.max_dist,
            &mut self.rng,
        );
        self.root = Some(root);
        self.len += 1;
        Ok(())
    }

    /// Clusters with at least `min_intervals` members, ascending by start.
    pub fn iter(&self) -> Clusters<'_, T> {
        Clusters::new(self.root.as_deref(), self.options.min_intervals)
    }

    /// Every cluster regardless of size, ascending by start.
    pub fn iter_all(&self) -> Clusters<'_, T> {
        Clusters::new(self.root.as_deref(), 0)
    }

    /// The cluster whose bounding range contains `position`, whatever its
    /// size.
    pub fn find(&self, position: i64) -> Option<&ClusterNode<T>> {
        ClusterNode::find(self.root.as_deref(), position)
    }

    /// Number of intervals inserted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of clusters, including those below `min_intervals`.
    pub fn cluster_count(&self) -> usize {
        self.iter_all().count()
    }

    pub fn max_dist(&self) -> i64 {
        self.options.max_dist
    }

    pub fn min_intervals(&self) -> usize {
        self.options.min_intervals
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    /// Release every cluster. The tree stays usable with the same options.
    pub fn clear(&mut self) {
        release(self.root.take());
        self.len = 0;
    }
}

impl<T: Ord + Clone> ClusterTree<T> {
    /// Reported clusters as owned regions, ids sorted.
    pub fn regions(&self) -> Vec<ClusterRegion<T>> {
        self.iter()
            .map(|cluster| {
                let mut ids: Vec<T> = cluster.ids().cloned().collect();
                ids.sort_unstable();
                ClusterRegion {
                    start: cluster.start(),
                    end: cluster.end(),
                    ids,
                }
            })
            .collect()
    }

    /// Ids of all reported clusters, sorted.
    pub fn ids(&self) -> Vec<T> {
        let mut ids: Vec<T> = self.iter().flat_map(|c| c.ids().cloned()).collect();
        ids.sort_unstable();
        ids
    }
}

impl<T> Drop for ClusterTree<T> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

/// Drop a subtree with an explicit stack instead of recursive `Box` drops.
fn release<T>(root: Link<T>) {
    let mut stack: Vec<Box<ClusterNode<T>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

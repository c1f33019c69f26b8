//! Distance-based clustering of one-dimensional intervals.
//!
//! - Input: closed intervals `[start, end]` with an arbitrary identifier each,
//!   inserted one at a time.
//! - Grouping: two intervals join when the gap between them is at most
//!   `max_dist`; joins are transitive and clusters never split.
//! - Output: clusters with at least `min_intervals` members, ascending by start.
//!
//! Backed by a treap whose insert merges neighboring clusters as they come
//! within reach. [`ChromClusters`] routes genomic records to one tree per
//! chromosome.

pub mod chrom;
pub mod error;
pub mod iter;
mod node;
pub mod options;
mod priority;
pub mod tree;

pub use chrom::ChromClusters;
pub use error::{ClusterError, Result};
pub use iter::Clusters;
pub use node::{ClusterNode, Interval};
pub use options::ClusterOptions;
pub use tree::{ClusterRegion, ClusterTree};

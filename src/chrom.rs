//! Per-chromosome clustering of genomic records.
//!
//! Coordinates on different chromosomes never cluster together, so records
//! are routed to one [`ClusterTree`] per chromosome name. Trees are created on
//! first use and share one set of [`ClusterOptions`].

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::{ClusterError, Result};
use crate::options::ClusterOptions;
use crate::tree::{ClusterRegion, ClusterTree};

/// Cluster trees keyed by chromosome name.
pub struct ChromClusters<T> {
    options: ClusterOptions,
    trees: BTreeMap<String, ClusterTree<T>>,
    skipped: usize,
}

impl<T> ChromClusters<T> {
    pub fn new(options: ClusterOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            trees: BTreeMap::new(),
            skipped: 0,
        })
    }

    /// Build from `(chrom, start, end, id)` records.
    ///
    /// Records with `start > end` are logged, counted in
    /// [`skipped`](Self::skipped) and otherwise ignored. Only invalid options
    /// make this fail.
    pub fn from_records<I, C>(options: ClusterOptions, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, i64, i64, T)>,
        C: AsRef<str>,
    {
        let mut clusters = Self::new(options)?;
        for (recno, (chrom, start, end, id)) in records.into_iter().enumerate() {
            if let Err(err) = clusters.insert(chrom.as_ref(), start, end, id) {
                clusters.skipped += 1;
                warn!(recno, chrom = chrom.as_ref(), %err, "skipping record");
            }
        }
        Ok(clusters)
    }

    /// Add `[start, end]` on `chrom`. An invalid interval creates no tree.
    pub fn insert(&mut self, chrom: &str, start: i64, end: i64, id: T) -> Result<()> {
        if start > end {
            return Err(ClusterError::InvalidInterval { start, end });
        }
        if let Some(tree) = self.trees.get_mut(chrom) {
            return tree.insert(start, end, id);
        }
        let mut tree = ClusterTree::with_options(self.tree_options())?;
        tree.insert(start, end, id)?;
        debug!(chrom, "new chromosome");
        self.trees.insert(chrom.to_owned(), tree);
        Ok(())
    }

    /// Options for the next tree. A fixed seed is offset by the creation
    /// order so chromosomes do not share priority sequences.
    fn tree_options(&self) -> ClusterOptions {
        let mut options = self.options.clone();
        options.seed = options
            .seed
            .map(|seed| seed.wrapping_add(self.trees.len() as u64));
        options
    }

    pub fn get(&self, chrom: &str) -> Option<&ClusterTree<T>> {
        self.trees.get(chrom)
    }

    /// Chromosome names seen so far, sorted.
    pub fn chroms(&self) -> impl Iterator<Item = &str> + '_ {
        self.trees.keys().map(String::as_str)
    }

    /// `(chrom, tree)` pairs, sorted by chromosome name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ClusterTree<T>)> + '_ {
        self.trees.iter().map(|(chrom, tree)| (chrom.as_str(), tree))
    }

    /// Records rejected by [`from_records`](Self::from_records).
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Total intervals inserted across all chromosomes.
    pub fn len(&self) -> usize {
        self.trees.values().map(ClusterTree::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }
}

#[cfg(feature = "parallel")]
impl<T: Ord + Clone + Send + Sync> ChromClusters<T> {
    /// Reported regions of every chromosome, sorted by chromosome name.
    /// Chromosomes are summarized in parallel.
    pub fn regions(&self) -> Vec<(String, Vec<ClusterRegion<T>>)> {
        use rayon::prelude::*;
        self.trees
            .par_iter()
            .map(|(chrom, tree)| (chrom.clone(), tree.regions()))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
impl<T: Ord + Clone> ChromClusters<T> {
    /// Reported regions of every chromosome, sorted by chromosome name.
    pub fn regions(&self) -> Vec<(String, Vec<ClusterRegion<T>>)> {
        self.trees
            .iter()
            .map(|(chrom, tree)| (chrom.clone(), tree.regions()))
            .collect()
    }
}

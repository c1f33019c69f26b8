//! Filtered, position-ordered iteration over clusters.

use crate::node::ClusterNode;

/// Iterator over the clusters of a [`ClusterTree`](crate::ClusterTree) that
/// hold at least `min_intervals` members, in ascending order of `start`.
///
/// Walks the tree in order with an explicit stack, so memory is bounded by
/// tree height and no recursion is involved. The iterator borrows the tree,
/// which therefore cannot be modified or dropped while it is alive.
pub struct Clusters<'a, T> {
    stack: Vec<&'a ClusterNode<T>>,
    min_intervals: usize,
}

impl<'a, T> Clusters<'a, T> {
    pub(crate) fn new(root: Option<&'a ClusterNode<T>>, min_intervals: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            min_intervals,
        };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut link: Option<&'a ClusterNode<T>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Clusters<'a, T> {
    type Item = &'a ClusterNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.stack.pop()?;
            self.descend_left(node.right.as_deref());
            if node.len() >= self.min_intervals {
                return Some(node);
            }
        }
    }
}

impl<T> std::iter::FusedIterator for Clusters<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::ClusterTree;

    #[test]
    fn test_empty_tree_yields_nothing() {
        let tree: ClusterTree<u32> = ClusterTree::new(0, 1).unwrap();
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn test_ascending_and_filtered() {
        let mut tree = ClusterTree::new(0, 2).unwrap();
        // Three singletons and two pairs, inserted out of order.
        let pairs = [(50, 51), (10, 11), (30, 31), (11, 12), (70, 71), (90, 91), (90, 95)];
        for (i, &(s, e)) in pairs.iter().enumerate() {
            tree.insert(s, e, i).unwrap();
        }

        let starts: Vec<i64> = tree.iter().map(|c| c.start()).collect();
        assert_eq!(starts, vec![10, 90]);
        assert!(tree.iter().all(|c| c.len() >= 2));

        let starts: Vec<i64> = tree.iter_all().map(|c| c.start()).collect();
        assert_eq!(starts, vec![10, 30, 50, 70, 90]);
    }
}

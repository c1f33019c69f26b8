//! Cluster treap nodes: fuzzy insertion, rotation and the merge cascade.
//!
//! Nodes are ordered by position with a tolerance of `max_dist`: every node in
//! a left subtree ends more than `max_dist` before its ancestor starts, and
//! every node in a right subtree starts more than `max_dist` after its ancestor
//! ends. Nodes are also max-heap ordered by a random priority.
//!
//! Inserting an interval that comes within `max_dist` of a node widens that
//! node in place. Widening can bring the node within reach of descendants on
//! the widened side; the merge cascade ([`ClusterNode::absorb_subtree`])
//! folds those descendants into the node so both orders hold again.

use std::cmp::{max, min};
use std::collections::LinkedList;

use rand::Rng;
use tracing::trace;

use crate::priority::draw_priority;

/// Owning child link.
pub(crate) type Link<T> = Option<Box<ClusterNode<T>>>;

/// One inserted interval and the identifier the caller attached to it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval<T> {
    pub start: i64,
    pub end: i64,
    pub id: T,
}

/// A cluster: the bounding range of its member intervals plus the members.
///
/// Obtained from [`ClusterTree::iter`](crate::ClusterTree::iter) or
/// [`ClusterTree::find`](crate::ClusterTree::find). Member order is
/// unspecified.
#[derive(Debug)]
pub struct ClusterNode<T> {
    pub(crate) start: i64,
    pub(crate) end: i64,
    pub(crate) priority: u32,
    pub(crate) members: LinkedList<Interval<T>>,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> ClusterNode<T> {
    fn new(interval: Interval<T>, priority: u32) -> Self {
        let mut members = LinkedList::new();
        let (start, end) = (interval.start, interval.end);
        members.push_back(interval);
        Self {
            start,
            end,
            priority,
            members,
            left: None,
            right: None,
        }
    }

    /// Smallest start over all members.
    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Largest end over all members.
    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of member intervals.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: a cluster holds at least the interval that created it.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Identifiers of the member intervals.
    pub fn ids(&self) -> impl Iterator<Item = &T> + '_ {
        self.members.iter().map(|iv| &iv.id)
    }

    /// Member intervals with their original coordinates.
    pub fn intervals(&self) -> impl Iterator<Item = &Interval<T>> + '_ {
        self.members.iter()
    }

    /// Insert `interval` into the subtree rooted at `link` and return the new
    /// subtree root, which differs from the old one after a rotation.
    pub(crate) fn insert<R: Rng + ?Sized>(
        link: Link<T>,
        interval: Interval<T>,
        max_dist: i64,
        rng: &mut R,
    ) -> Box<Self> {
        let mut node = match link {
            Some(node) => node,
            None => return Box::new(Self::new(interval, draw_priority(rng))),
        };

        if lies_right_of(interval.start, node.end, max_dist) {
            let child = Self::insert(node.right.take(), interval, max_dist, rng);
            let rotate = child.priority > node.priority;
            node.right = Some(child);
            if rotate { node.rotate_left() } else { node }
        } else if lies_left_of(interval.end, node.start, max_dist) {
            let child = Self::insert(node.left.take(), interval, max_dist, rng);
            let rotate = child.priority > node.priority;
            node.left = Some(child);
            if rotate { node.rotate_right() } else { node }
        } else {
            node.merge_interval(interval, max_dist);
            node
        }
    }

    /// Lookup of the cluster whose bounding range contains `position`.
    pub(crate) fn find(mut link: Option<&Self>, position: i64) -> Option<&Self> {
        while let Some(node) = link {
            link = if position < node.start {
                node.left.as_deref()
            } else if position > node.end {
                node.right.as_deref()
            } else {
                return Some(node);
            };
        }
        None
    }

    /// The right child becomes the local root.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        match self.right.take() {
            Some(mut pivot) => {
                self.right = pivot.left.take();
                pivot.left = Some(self);
                pivot
            }
            None => self,
        }
    }

    /// The left child becomes the local root.
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        match self.left.take() {
            Some(mut pivot) => {
                self.left = pivot.right.take();
                pivot.right = Some(self);
                pivot
            }
            None => self,
        }
    }

    fn merge_interval(&mut self, interval: Interval<T>, max_dist: i64) {
        let grew_left = interval.start < self.start;
        let grew_right = interval.end > self.end;
        self.start = min(self.start, interval.start);
        self.end = max(self.end, interval.end);
        self.members.push_back(interval);

        // An unwidened side cannot have come within reach.
        if grew_left {
            let left = self.left.take();
            self.left = self.absorb_subtree(left, max_dist);
        }
        if grew_right {
            let right = self.right.take();
            self.right = self.absorb_subtree(right, max_dist);
        }
    }

    /// Merge cascade: fold every node of `link` that now lies within
    /// `max_dist` of `self` into `self`, and return what is left of the
    /// subtree.
    ///
    /// `link` must be a child subtree detached from `self`. Survivors keep
    /// their relative order and priorities, so the result can be reattached
    /// in the same slot.
    fn absorb_subtree(&mut self, link: Link<T>, max_dist: i64) -> Link<T> {
        let mut local = link?;

        if !within_reach(self.start, self.end, local.start, local.end, max_dist) {
            // Only the child facing `self` can be close enough.
            if local.end < self.start {
                let inner = local.right.take();
                local.right = self.absorb_subtree(inner, max_dist);
            } else {
                let inner = local.left.take();
                local.left = self.absorb_subtree(inner, max_dist);
            }
            return Some(local);
        }

        trace!(
            from = ?(local.start, local.end),
            into = ?(self.start, self.end),
            count = local.members.len(),
            "absorbing cluster"
        );
        self.start = min(self.start, local.start);
        self.end = max(self.end, local.end);
        self.members.append(&mut local.members);

        let right = self.absorb_subtree(local.right.take(), max_dist);
        let left = self.absorb_subtree(local.left.take(), max_dist);
        // `local` is now childless and memberless.
        drop(local);
        join(left, right)
    }
}

/// Concatenate two treaps where every node of `left` precedes every node of
/// `right`, keeping heap order on priority.
fn join<T>(left: Link<T>, right: Link<T>) -> Link<T> {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(mut l), Some(mut r)) => {
            if l.priority >= r.priority {
                l.right = join(l.right.take(), Some(r));
                Some(l)
            } else {
                r.left = join(Some(l), r.left.take());
                Some(r)
            }
        }
    }
}

/// `start - max_dist > end` without overflow.
#[inline]
pub(crate) fn lies_right_of(start: i64, end: i64, max_dist: i64) -> bool {
    start.saturating_sub(max_dist) > end
}

/// `end + max_dist < start` without overflow.
#[inline]
pub(crate) fn lies_left_of(end: i64, start: i64, max_dist: i64) -> bool {
    end.saturating_add(max_dist) < start
}

/// True when the gap between two ranges is at most `max_dist`.
/// Overlapping ranges have a negative gap.
#[inline]
fn within_reach(a_start: i64, a_end: i64, b_start: i64, b_end: i64, max_dist: i64) -> bool {
    let gap = i128::from(max(a_start, b_start)) - i128::from(min(a_end, b_end));
    gap <= i128::from(max_dist)
}

//! `AvlTree` — the public ordered-index API.

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use crate::compare::{Comparator, NaturalOrder};
use crate::node::{leftmost, rebalance, rightmost, Link, Node};

/// A height-balanced binary search tree keyed by an injected comparator.
///
/// Values the comparator reports as `Equal` are duplicates: `insert` rejects
/// them and `find`/`remove` treat them as the stored value.
///
/// Every public mutation leaves `|balance_factor| ≤ 1` at every node, so all
/// point operations are O(log n).
pub struct AvlTree<T, C = NaturalOrder> {
    root: Link<T>,
    len:  usize,
    cmp:  C,
}

impl<T: Ord> AvlTree<T, NaturalOrder> {
    /// An empty tree ordered by `T`'s own `Ord`.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: Ord> Default for AvlTree<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Comparator<T>> AvlTree<T, C> {
    /// An empty tree ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self { root: None, len: 0, cmp }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree in edges; −1 when empty.
    pub fn height(&self) -> i32 {
        self.root.as_ref().map_or(-1, |n| n.height)
    }

    /// Root node, for structural inspection.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Insert `value` unless an equal value is already stored.
    ///
    /// Returns `true` if the tree changed.
    pub fn insert(&mut self, value: T) -> bool {
        if self.find(&value).is_some() {
            return false;
        }
        self.root = Some(insert_node(self.root.take(), value, &self.cmp));
        self.len += 1;
        true
    }

    /// Remove the value equal to `value`.  Returns `true` if one was stored.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Remove and return the stored value equal to `value`.
    ///
    /// A node with two children takes over the maximum of its left subtree,
    /// which is then unlinked from that subtree.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.find(value)?;
        let (root, removed) = remove_node(self.root.take(), value, &self.cmp);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    // ── Point queries ─────────────────────────────────────────────────────

    /// The stored value equal to `value`.
    pub fn find(&self, value: &T) -> Option<&T> {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match self.cmp.compare(value, &node.value) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    pub fn find_min(&self) -> Option<&T> {
        self.root.as_deref().map(|n| &leftmost(n).value)
    }

    pub fn find_max(&self) -> Option<&T> {
        self.root.as_deref().map(|n| &rightmost(n).value)
    }

    /// The smallest stored value greater than `value`.
    ///
    /// Defined only for a `value` that is itself stored; returns `None`
    /// otherwise.  Without a right subtree the successor is the last ancestor
    /// at which the descent from the root turned left.
    pub fn successor_of(&self, value: &T) -> Option<&T> {
        let mut turned_left: Option<&Node<T>> = None;
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match self.cmp.compare(value, &node.value) {
                Ordering::Less => {
                    turned_left = Some(node);
                    cur = node.left.as_deref();
                }
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => {
                    return match node.right.as_deref() {
                        Some(right) => Some(&leftmost(right).value),
                        None => turned_left.map(|a| &a.value),
                    };
                }
            }
        }
        None
    }

    // ── Ordered scans ─────────────────────────────────────────────────────

    /// Every stored value strictly less than `value`, ascending.
    ///
    /// `value` need not be stored.
    pub fn predecessors_of(&self, value: &T) -> Vec<&T> {
        let mut out = Vec::new();
        collect_less(self.root.as_deref(), value, &self.cmp, &mut out);
        out
    }

    /// Every stored value `v` with `lo ≤ v ≤ hi`, ascending.
    ///
    /// Subtrees entirely outside the window are skipped.
    pub fn between(&self, lo: &T, hi: &T) -> Vec<&T> {
        let mut out = Vec::new();
        collect_between(self.root.as_deref(), lo, hi, &self.cmp, &mut out);
        out
    }

    /// In-order (ascending) iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }
}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a AvlTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: fmt::Debug, C: Comparator<T>> fmt::Debug for AvlTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// ── Iterator ──────────────────────────────────────────────────────────────────

/// Ascending iterator over an [`AvlTree`].
pub struct Iter<'a, T> {
    stack:     Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Self { stack: Vec::new(), remaining: len };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

// ── Recursive helpers ─────────────────────────────────────────────────────────

fn insert_node<T, C: Comparator<T>>(link: Link<T>, value: T, cmp: &C) -> Box<Node<T>> {
    let Some(mut node) = link else {
        return Node::leaf(value);
    };
    if cmp.compare(&value, &node.value) == Ordering::Less {
        node.left = Some(insert_node(node.left.take(), value, cmp));
    } else {
        node.right = Some(insert_node(node.right.take(), value, cmp));
    }
    rebalance(node)
}

fn remove_node<T, C: Comparator<T>>(link: Link<T>, value: &T, cmp: &C) -> (Link<T>, Option<T>) {
    let Some(mut node) = link else {
        return (None, None);
    };
    let removed = match cmp.compare(value, &node.value) {
        Ordering::Less => {
            let (left, removed) = remove_node(node.left.take(), value, cmp);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove_node(node.right.take(), value, cmp);
            node.right = right;
            removed
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, right) => return (right, Some(node.value)),
            (left, None) => return (left, Some(node.value)),
            (Some(left), right) => {
                let (left, max) = remove_max(left);
                node.left = left;
                node.right = right;
                Some(mem::replace(&mut node.value, max))
            }
        },
    };
    (Some(rebalance(node)), removed)
}

/// Unlink the rightmost value of a subtree, rebalancing on the way up.
fn remove_max<T>(mut node: Box<Node<T>>) -> (Link<T>, T) {
    match node.right.take() {
        None => {
            let left = node.left.take();
            (left, node.value)
        }
        Some(right) => {
            let (right, max) = remove_max(right);
            node.right = right;
            (Some(rebalance(node)), max)
        }
    }
}

fn collect_less<'a, T, C: Comparator<T>>(
    node:  Option<&'a Node<T>>,
    value: &T,
    cmp:   &C,
    out:   &mut Vec<&'a T>,
) {
    let Some(n) = node else { return };
    collect_less(n.left.as_deref(), value, cmp, out);
    if cmp.compare(&n.value, value) == Ordering::Less {
        out.push(&n.value);
        collect_less(n.right.as_deref(), value, cmp, out);
    }
}

fn collect_between<'a, T, C: Comparator<T>>(
    node: Option<&'a Node<T>>,
    lo:   &T,
    hi:   &T,
    cmp:  &C,
    out:  &mut Vec<&'a T>,
) {
    let Some(n) = node else { return };
    let at_least_lo = cmp.compare(&n.value, lo) != Ordering::Less;
    let at_most_hi = cmp.compare(&n.value, hi) != Ordering::Greater;
    if at_least_lo {
        collect_between(n.left.as_deref(), lo, hi, cmp, out);
    }
    if at_least_lo && at_most_hi {
        out.push(&n.value);
    }
    if at_most_hi {
        collect_between(n.right.as_deref(), lo, hi, cmp, out);
    }
}

//! Tree nodes and the rebalancing primitives.
//!
//! Heights count edges: a leaf has height 0 and an empty subtree height −1.
//! The balance factor is `height(left) - height(right)`.

/// An owned, possibly empty subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// One node of an [`AvlTree`][crate::AvlTree].
///
/// Exposed read-only so callers can inspect the shape (tests assert the
/// balance invariant through it).
#[derive(Debug)]
pub struct Node<T> {
    pub(crate) value:   T,
    pub(crate) height:  i32,
    pub(crate) balance: i32,
    pub(crate) left:    Link<T>,
    pub(crate) right:   Link<T>,
}

impl<T> Node<T> {
    pub(crate) fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            height:  0,
            balance: 0,
            left:    None,
            right:   None,
        })
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn balance_factor(&self) -> i32 {
        self.balance
    }

    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// Recompute height and balance factor from the children.
    #[inline]
    pub(crate) fn update(&mut self) {
        let lh = height(&self.left);
        let rh = height(&self.right);
        self.height = 1 + lh.max(rh);
        self.balance = lh - rh;
    }
}

/// Height of a possibly empty subtree.
#[inline]
pub(crate) fn height<T>(link: &Link<T>) -> i32 {
    link.as_ref().map_or(-1, |n| n.height)
}

/// Leftmost node of a non-empty subtree.
pub(crate) fn leftmost<T>(mut node: &Node<T>) -> &Node<T> {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    node
}

/// Rightmost node of a non-empty subtree.
pub(crate) fn rightmost<T>(mut node: &Node<T>) -> &Node<T> {
    while let Some(right) = node.right.as_deref() {
        node = right;
    }
    node
}

// ── Rotations ─────────────────────────────────────────────────────────────────

/// Lift the left child above `node`.  No-op without a left child.
pub(crate) fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update();
    pivot.right = Some(node);
    pivot.update();
    pivot
}

/// Lift the right child above `node`.  No-op without a right child.
pub(crate) fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update();
    pivot.left = Some(node);
    pivot.update();
    pivot
}

/// Refresh `node`'s bookkeeping and restore `|balance| ≤ 1` at it.
///
/// Must be applied bottom-up on the path touched by an insert or remove, so
/// both children are already balanced when this runs.
pub(crate) fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update();
    match node.balance {
        2 => {
            // Left-right case: straighten the left child first.
            if node.left.as_ref().is_some_and(|l| l.balance < 0) {
                node.left = node.left.take().map(rotate_left);
            }
            rotate_right(node)
        }
        -2 => {
            // Right-left case.
            if node.right.as_ref().is_some_and(|r| r.balance > 0) {
                node.right = node.right.take().map(rotate_right);
            }
            rotate_left(node)
        }
        _ => node,
    }
}

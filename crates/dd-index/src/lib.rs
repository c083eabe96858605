//! `dd-index` — a generic AVL tree used as an ordered index.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`compare`]  | `Comparator` trait, `NaturalOrder`                        |
//! | [`node`]     | `Node` bookkeeping, rotations, four-case rebalance        |
//! | [`tree`]     | `AvlTree<T, C>` public API and in-order iterator          |
//!
//! # Design notes
//!
//! The ordering is injected, not taken from `T: Ord`, so the same value type
//! can be indexed under several orders (the scheduler keeps one tree by
//! priority and one by ETA).  Two values the comparator calls `Equal` are the
//! same key: the tree stores at most one of them.
//!
//! Nodes own their children through `Box` and carry no parent pointer.
//! Queries that need an ancestor (in-order successor) re-descend from the
//! root instead.

pub mod compare;
pub mod node;
pub mod tree;


pub use compare::{Comparator, NaturalOrder};
pub use tree::{AvlTree, Iter};

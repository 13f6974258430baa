//! N-ary trees of heterogeneous values.
//!
//! Nodes hold a [`domain::Value`] (text, integer, real or complex-number pair)
//! and live in an arena owned by a [`domain::Tree`]. The tree can be walked in
//! five orders (pre-order, post-order, in-order, BFS, DFS) and a binary tree can
//! be rebuilt as a complete min-heap ordered by each node's key.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod samples;
pub mod tree_traits;
pub mod util;

pub use domain::{NodeId, NodeRef, Order, Traversal, Tree, TreeError, TreeResult, Value};

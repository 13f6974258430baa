//! Pull-based traversal cursors over a borrowed [`Tree`].
//!
//! Every cursor borrows the tree immutably for its lifetime, so the tree cannot
//! be mutated while a traversal is live. Requesting a fresh cursor restarts it.
//!
//! For trees with `max_degree > 2` the pre-order, post-order and in-order
//! strategies yield plain depth-first order: the binary definitions have no
//! meaning beyond two children.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use tracing::{instrument, trace};

use crate::domain::arena::{NodeId, NodeRef, Tree};
use crate::domain::error::{TreeError, TreeResult};

/// Traversal strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    PreOrder,
    PostOrder,
    InOrder,
    Bfs,
    Dfs,
}

impl Order {
    pub const ALL: [Order; 5] = [
        Order::PreOrder,
        Order::PostOrder,
        Order::InOrder,
        Order::Bfs,
        Order::Dfs,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Order::PreOrder => "Pre-order",
            Order::PostOrder => "Post-order",
            Order::InOrder => "In-order",
            Order::Bfs => "BFS",
            Order::Dfs => "DFS",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts `pre-order`, `post-order`, `in-order`, `bfs`, `dfs`, case-insensitive,
/// with or without the dash.
impl FromStr for Order {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "preorder" | "pre" => Ok(Order::PreOrder),
            "postorder" | "post" => Ok(Order::PostOrder),
            "inorder" | "in" => Ok(Order::InOrder),
            "bfs" => Ok(Order::Bfs),
            "dfs" => Ok(Order::Dfs),
            _ => Err(TreeError::InvalidArgument(format!(
                "unknown traversal order '{s}'"
            ))),
        }
    }
}

enum Frontier {
    /// BFS
    Queue(VecDeque<NodeId>),
    /// DFS and pre-order: top is current, children pushed in reverse
    Stack(Vec<NodeId>),
    /// Binary post-order: expansion stack of (node, visited) plus emission stack
    PostOrder {
        expand: Vec<(NodeId, bool)>,
        emit: Vec<NodeId>,
    },
    /// Binary in-order: stack of pushed left spines
    InOrder(Vec<NodeId>),
}

/// Single-pass, forward-only cursor yielding the nodes of a tree in one
/// [`Order`].
///
/// Advancing past a child id that no longer resolves yields one
/// `Err(TreeError::CorruptTree)`, after which the cursor is exhausted.
pub struct Traversal<'a> {
    tree: &'a Tree,
    order: Order,
    frontier: Frontier,
    pending: Option<TreeError>,
}

impl<'a> Traversal<'a> {
    #[instrument(level = "trace", skip(tree))]
    pub fn new(tree: &'a Tree, order: Order) -> Self {
        let depth_first = tree.max_degree() > 2
            && matches!(order, Order::PreOrder | Order::PostOrder | Order::InOrder);
        let frontier = match order {
            Order::Bfs => Frontier::Queue(VecDeque::new()),
            Order::Dfs | Order::PreOrder => Frontier::Stack(Vec::new()),
            _ if depth_first => Frontier::Stack(Vec::new()),
            Order::PostOrder => Frontier::PostOrder {
                expand: Vec::new(),
                emit: Vec::new(),
            },
            Order::InOrder => Frontier::InOrder(Vec::new()),
        };
        let mut traversal = Self {
            tree,
            order,
            frontier,
            pending: None,
        };
        if let Some(root) = tree.root_id() {
            if let Err(err) = traversal.seed(root) {
                traversal.pending = Some(err);
            }
        }
        traversal
    }

    /// Strategy requested by the caller (before degree dispatch).
    pub fn order(&self) -> Order {
        self.order
    }

    fn seed(&mut self, root: NodeId) -> TreeResult<()> {
        let tree = self.tree;
        match &mut self.frontier {
            Frontier::Queue(queue) => queue.push_back(root),
            Frontier::Stack(stack) => stack.push(root),
            Frontier::PostOrder { expand, emit } => {
                expand.push((root, false));
                settle(tree, expand, emit)?;
            }
            Frontier::InOrder(stack) => push_left_spine(tree, stack, root)?,
        }
        Ok(())
    }

    fn current(&self) -> Option<NodeId> {
        match &self.frontier {
            Frontier::Queue(queue) => queue.front().copied(),
            Frontier::Stack(stack) | Frontier::InOrder(stack) => stack.last().copied(),
            Frontier::PostOrder { emit, .. } => emit.last().copied(),
        }
    }

    /// Node the next call to `next` yields, without advancing.
    ///
    /// `None` when exhausted or when the next item is an error.
    pub fn peek(&self) -> Option<NodeRef<'a>> {
        if self.pending.is_some() {
            return None;
        }
        self.current().and_then(|idx| self.tree.node(idx))
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_none() && self.current().is_none()
    }

    /// Drops the current node and expands the frontier.
    fn advance(&mut self) -> TreeResult<()> {
        let tree = self.tree;
        match &mut self.frontier {
            Frontier::Queue(queue) => {
                if let Some(idx) = queue.pop_front() {
                    queue.extend(tree.child_ids(idx)?.iter().copied());
                }
            }
            Frontier::Stack(stack) => {
                if let Some(idx) = stack.pop() {
                    // Push children in reverse order for left-to-right traversal
                    stack.extend(tree.child_ids(idx)?.iter().rev().copied());
                }
            }
            Frontier::PostOrder { expand, emit } => {
                emit.pop();
                settle(tree, expand, emit)?;
            }
            Frontier::InOrder(stack) => {
                if let Some(idx) = stack.pop() {
                    for &child in tree.child_ids(idx)?.iter().skip(1) {
                        push_left_spine(tree, stack, child)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        match &mut self.frontier {
            Frontier::Queue(queue) => queue.clear(),
            Frontier::Stack(stack) | Frontier::InOrder(stack) => stack.clear(),
            Frontier::PostOrder { expand, emit } => {
                expand.clear();
                emit.clear();
            }
        }
    }

    /// Canonical strings of the remaining nodes.
    pub fn values(self) -> TreeResult<Vec<String>> {
        self.map(|node| node.map(|n| n.value_string().to_string()))
            .collect()
    }
}

/// Expands until the emission stack has a top or both stacks are empty.
fn settle(tree: &Tree, expand: &mut Vec<(NodeId, bool)>, emit: &mut Vec<NodeId>) -> TreeResult<()> {
    while emit.is_empty() {
        let Some((idx, visited)) = expand.pop() else {
            break;
        };
        if visited {
            emit.push(idx);
        } else {
            expand.push((idx, true));
            for &child in tree.child_ids(idx)?.iter().rev() {
                expand.push((child, false));
            }
        }
    }
    Ok(())
}

/// Pushes `idx`, then its first child, then that child's first child, ...
fn push_left_spine(tree: &Tree, stack: &mut Vec<NodeId>, idx: NodeId) -> TreeResult<()> {
    let mut current = Some(idx);
    while let Some(idx) = current {
        stack.push(idx);
        current = tree.child_ids(idx)?.first().copied();
    }
    Ok(())
}

impl<'a> Iterator for Traversal<'a> {
    type Item = TreeResult<NodeRef<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(err) = self.pending.take() {
            self.clear();
            return Some(Err(err));
        }
        let current = self.peek()?;
        trace!("{} visiting {}", self.order, current);
        if let Err(err) = self.advance() {
            self.pending = Some(err);
        }
        Some(Ok(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_exhausted() {
            (0, Some(0))
        } else {
            (1, Some(self.tree.len() + 1))
        }
    }
}

impl FusedIterator for Traversal<'_> {}

impl Tree {
    pub fn traverse(&self, order: Order) -> Traversal<'_> {
        Traversal::new(self, order)
    }

    pub fn pre_order(&self) -> Traversal<'_> {
        self.traverse(Order::PreOrder)
    }

    pub fn post_order(&self) -> Traversal<'_> {
        self.traverse(Order::PostOrder)
    }

    pub fn in_order(&self) -> Traversal<'_> {
        self.traverse(Order::InOrder)
    }

    pub fn bfs(&self) -> Traversal<'_> {
        self.traverse(Order::Bfs)
    }

    pub fn dfs(&self) -> Traversal<'_> {
        self.traverse(Order::Dfs)
    }
}

/// Iterating a tree reference walks it breadth-first.
impl<'a> IntoIterator for &'a Tree {
    type Item = TreeResult<NodeRef<'a>>;
    type IntoIter = Traversal<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.bfs()
    }
}

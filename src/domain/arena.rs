use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::value::{key_of, Value};

/// Identity of a node inside one [`Tree`].
///
/// Ids are generational: once a node is removed (its subtree was replaced via
/// [`Tree::add_root`]) the id stays stale and is never reissued for another node.
pub type NodeId = Index;

/// Default bound on children per node.
pub const DEFAULT_MAX_DEGREE: usize = 2;

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode {
    /// Payload owned by this node
    pub(crate) value: Value,
    /// Canonical string of `value`, computed on insertion
    pub(crate) text: String,
    /// Ordering key derived from `text`
    pub(crate) key: u64,
    /// Index of parent node in the arena, None for the root
    pub(crate) parent: Option<NodeId>,
    /// Indices of child nodes in the arena, in insertion order
    pub(crate) children: Vec<NodeId>,
}

impl TreeNode {
    fn new(value: Value, parent: Option<NodeId>) -> TreeResult<Self> {
        let text = value.canonical()?;
        let key = key_of(&text);
        Ok(Self {
            value,
            text,
            key,
            parent,
            children: Vec::new(),
        })
    }
}

/// Arena-based n-ary tree of heterogeneous values.
///
/// All nodes live in a single generational arena owned by the tree; parents
/// reference children by [`NodeId`]. Every node enters the arena through
/// [`Tree::add_root`] or [`Tree::add_sub_node`], so every live id is reachable
/// from the root.
#[derive(Debug, Clone)]
pub struct Tree {
    /// Arena storage for all tree nodes
    pub(crate) arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<NodeId>,
    /// Maximum number of children per node
    max_degree: usize,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Empty tree with `max_degree` 2.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            max_degree: DEFAULT_MAX_DEGREE,
        }
    }

    /// Empty tree allowing up to `max_degree` children per node.
    pub fn with_max_degree(max_degree: usize) -> TreeResult<Self> {
        if max_degree == 0 {
            return Err(TreeError::InvalidArgument(
                "max_degree must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            max_degree,
            ..Self::new()
        })
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Sets the root, replacing (and dropping) any previous root subtree.
    #[instrument(level = "debug", skip(self))]
    pub fn add_root(&mut self, value: impl Into<Value> + fmt::Debug) -> TreeResult<NodeId> {
        let node = TreeNode::new(value.into(), None)?;
        if let Some(old_root) = self.root.take() {
            let dropped = self.remove_subtree(old_root);
            debug!("Replaced root, dropped {} nodes", dropped);
        }
        debug!("Added root node with value: {}", node.text);
        let idx = self.arena.insert(node);
        self.root = Some(idx);
        Ok(idx)
    }

    /// Appends a new node holding `value` to the children of `parent`.
    ///
    /// `parent` must be an id issued by this tree. Fails with
    /// [`TreeError::InvalidArgument`] when it does not resolve (stale or unknown)
    /// and with [`TreeError::DegreeExceeded`] when the parent already has
    /// `max_degree` children; the tree is unchanged on failure.
    #[instrument(level = "debug", skip(self))]
    pub fn add_sub_node(
        &mut self,
        parent: NodeId,
        value: impl Into<Value> + fmt::Debug,
    ) -> TreeResult<NodeId> {
        let parent_node = self.arena.get(parent).ok_or_else(|| {
            TreeError::InvalidArgument(format!("parent {parent:?} is not part of this tree"))
        })?;
        if parent_node.children.len() >= self.max_degree {
            return Err(TreeError::DegreeExceeded {
                max_degree: self.max_degree,
            });
        }
        let parent_text = parent_node.text.clone();

        let node = TreeNode::new(value.into(), Some(parent))?;
        debug!(
            "Added child node with value: {} to parent node with value: {}",
            node.text, parent_text
        );
        let idx = self.arena.insert(node);
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(idx);
        }
        Ok(idx)
    }

    fn remove_subtree(&mut self, idx: NodeId) -> usize {
        let mut removed = 0;
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.arena.remove(current) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.and_then(|idx| self.node(idx))
    }

    pub fn node(&self, idx: NodeId) -> Option<NodeRef<'_>> {
        self.arena.get(idx).map(|node| NodeRef {
            tree: self,
            id: idx,
            node,
        })
    }

    /// Children of `idx` in insertion order.
    pub fn children(&self, idx: NodeId) -> TreeResult<Vec<NodeRef<'_>>> {
        let node = self.node(idx).ok_or_else(|| {
            TreeError::InvalidArgument(format!("node {idx:?} is not part of this tree"))
        })?;
        node.children()
    }

    pub fn value_string(&self, idx: NodeId) -> Option<&str> {
        self.arena.get(idx).map(|node| node.text.as_str())
    }

    pub fn key(&self, idx: NodeId) -> Option<u64> {
        self.arena.get(idx).map(|node| node.key)
    }

    /// Child ids of `idx`, checked to resolve in the arena.
    pub(crate) fn child_ids(&self, idx: NodeId) -> TreeResult<&[NodeId]> {
        let node = self
            .arena
            .get(idx)
            .ok_or_else(|| TreeError::CorruptTree(format!("dangling node reference {idx:?}")))?;
        if let Some(missing) = node.children.iter().find(|&&c| !self.arena.contains(c)) {
            return Err(TreeError::CorruptTree(format!(
                "node '{}' references missing child {missing:?}",
                node.text
            )));
        }
        Ok(&node.children)
    }

    /// Number of levels; 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, idx: NodeId) -> usize {
        if let Some(node) = self.arena.get(idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Canonical strings of all leaf nodes, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaves(&self) -> Vec<String> {
        let mut leaves = Vec::new();
        if let Some(root) = self.root {
            self.collect_leaves(root, &mut leaves);
        }
        leaves
    }

    fn collect_leaves(&self, idx: NodeId, leaves: &mut Vec<String>) {
        if let Some(node) = self.arena.get(idx) {
            if node.children.is_empty() {
                leaves.push(node.text.clone());
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }
}

/// Read-only handle to a node of a borrowed [`Tree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
    node: &'a TreeNode,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> &'a Value {
        &self.node.value
    }

    pub fn value_string(&self) -> &'a str {
        &self.node.text
    }

    pub fn key(&self) -> u64 {
        self.node.key
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.node.parent
    }

    pub fn child_count(&self) -> usize {
        self.node.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.node.children.is_empty()
    }

    /// Children in insertion order; [`TreeError::CorruptTree`] if one is missing.
    pub fn children(&self) -> TreeResult<Vec<NodeRef<'a>>> {
        let tree = self.tree;
        tree.child_ids(self.id)?
            .iter()
            .map(|&child| {
                tree.node(child)
                    .ok_or_else(|| TreeError::CorruptTree(format!("missing child {child:?}")))
            })
            .collect()
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", &self.node.text)
            .field("key", &self.node.key)
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_root_twice_drops_old_subtree() {
        let mut tree = Tree::new();
        let old_root = tree.add_root("old").unwrap();
        let child = tree.add_sub_node(old_root, 1).unwrap();
        assert_eq!(tree.len(), 2);

        let new_root = tree.add_root("new").unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().unwrap().id(), new_root);
        assert!(tree.node(old_root).is_none());
        assert!(matches!(
            tree.add_sub_node(child, "orphan"),
            Err(TreeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_child_ids_detects_dangling_child() {
        let mut tree = Tree::new();
        let root = tree.add_root("root").unwrap();
        let child = tree.add_sub_node(root, "child").unwrap();
        tree.arena.remove(child);

        assert!(matches!(tree.child_ids(root), Err(TreeError::CorruptTree(_))));
        assert!(matches!(tree.children(root), Err(TreeError::CorruptTree(_))));
    }

    #[test]
    fn test_unsupported_value_leaves_tree_unchanged() {
        let mut tree = Tree::new();
        let root = tree.add_root("root").unwrap();
        let result = tree.add_sub_node(root, f64::NAN);
        assert!(matches!(result, Err(TreeError::UnsupportedValue(_))));
        assert_eq!(tree.root().unwrap().child_count(), 0);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_depth_and_leaves() {
        let mut tree = Tree::with_max_degree(3).unwrap();
        assert_eq!(tree.depth(), 0);
        let root = tree.add_root("root").unwrap();
        let a = tree.add_sub_node(root, "a").unwrap();
        tree.add_sub_node(root, "b").unwrap();
        tree.add_sub_node(a, 2.5).unwrap();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.leaves(), vec!["2.5", "b"]);
    }
}

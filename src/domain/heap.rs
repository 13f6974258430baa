//! Min-heap conversion and key-ordered iteration.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::domain::arena::{NodeRef, Tree};
use crate::domain::error::{TreeError, TreeResult};

impl Tree {
    /// Builds a new complete binary tree whose breadth-first sequence is this
    /// tree's nodes sorted ascending by key (ties keep BFS order).
    ///
    /// The result is a min-heap by key. Values are cloned into fresh nodes; `self`
    /// is left untouched. Requires `max_degree == 2`.
    #[instrument(level = "debug", skip(self))]
    pub fn my_heap(&self) -> TreeResult<Tree> {
        if self.max_degree() != 2 {
            return Err(TreeError::NotBinary {
                max_degree: self.max_degree(),
            });
        }

        let mut sorted = self.bfs().collect::<TreeResult<Vec<NodeRef<'_>>>>()?;
        sorted.sort_by_key(|node| node.key());
        let mut values = sorted.into_iter().map(|node| node.value().clone());

        let mut heap = Tree::new();
        let Some(first) = values.next() else {
            return Ok(heap);
        };
        let root = heap.add_root(first)?;

        let mut parents = VecDeque::from([root]);
        let mut values = values.peekable();
        while values.peek().is_some() {
            let Some(parent) = parents.pop_front() else {
                break;
            };
            for value in values.by_ref().take(2) {
                let child = heap.add_sub_node(parent, value)?;
                parents.push_back(child);
            }
        }
        debug!("Built heap with {} nodes", heap.len());
        Ok(heap)
    }

    /// Nodes ordered ascending by key.
    ///
    /// Nodes are gathered in in-order sequence first, which decides the order
    /// among equal keys.
    pub fn heap_order(&self) -> TreeResult<HeapOrder<'_>> {
        let mut nodes = self.in_order().collect::<TreeResult<Vec<_>>>()?;
        nodes.sort_by_key(|node| node.key());
        Ok(HeapOrder {
            nodes: nodes.into_iter(),
        })
    }
}

/// Iterator over nodes in ascending key order, see [`Tree::heap_order`].
pub struct HeapOrder<'a> {
    nodes: std::vec::IntoIter<NodeRef<'a>>,
}

impl<'a> Iterator for HeapOrder<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl ExactSizeIterator for HeapOrder<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::Value;

    fn bfs_values(tree: &Tree) -> TreeResult<Vec<Value>> {
        tree.bfs()
            .map(|node| node.map(|n| n.value().clone()))
            .collect()
    }

    #[test]
    fn test_heap_of_single_node() {
        let mut tree = Tree::new();
        tree.add_root(42).unwrap();
        let heap = tree.my_heap().unwrap();
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.root().unwrap().value(), &Value::Integer(42));
    }

    #[test]
    fn test_heap_shape_is_complete() {
        let mut tree = Tree::new();
        let mut parent = tree.add_root("z").unwrap();
        // degenerate chain
        for name in ["y", "x", "w", "v", "u"] {
            parent = tree.add_sub_node(parent, name).unwrap();
        }
        let heap = tree.my_heap().unwrap();
        let counts: Vec<usize> = heap.bfs().map(|n| n.unwrap().child_count()).collect();
        assert_eq!(counts, vec![2, 2, 1, 0, 0, 0]);
        assert_eq!(heap.depth(), 3);
        assert_eq!(
            bfs_values(&heap).unwrap(),
            ["u", "v", "w", "x", "y", "z"].map(Value::from).to_vec()
        );
    }

    #[test]
    fn test_equal_keys_keep_bfs_order() {
        // "ab" and "ba" share a key
        let mut tree = Tree::new();
        let root = tree.add_root("zz").unwrap();
        tree.add_sub_node(root, "ba").unwrap();
        tree.add_sub_node(root, "ab").unwrap();
        let heap = tree.my_heap().unwrap();
        let values = heap.bfs().values().unwrap();
        assert_eq!(values, vec!["ba", "ab", "zz"]);
    }

    #[test]
    fn test_heap_order_sorts_by_key() {
        let mut tree = Tree::with_max_degree(3).unwrap();
        let root = tree.add_root("c").unwrap();
        tree.add_sub_node(root, "a").unwrap();
        tree.add_sub_node(root, "d").unwrap();
        tree.add_sub_node(root, "b").unwrap();
        let order = tree.heap_order().unwrap();
        assert_eq!(order.len(), 4);
        let values: Vec<&str> = order.map(|n| n.value_string()).collect();
        assert_eq!(values, vec!["a", "b", "c", "d"]);
    }
}

//! Text rendering of trees via `termtree`.

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::domain::{NodeRef, Tree, TreeResult};

pub trait TreeRender {
    /// Drawing of the tree, labelling nodes with their key when `show_keys` is set.
    fn to_tree_string(&self, show_keys: bool) -> TreeResult<TermTree<String>>;
}

/// Node label as printed in drawings and traversal lines: `value` or `value[key]`.
pub fn label(node: NodeRef<'_>, show_keys: bool) -> String {
    if show_keys {
        format!("{}[{}]", node.value_string(), node.key())
    } else {
        node.value_string().to_string()
    }
}

fn build_tree(node: NodeRef<'_>, show_keys: bool) -> TreeResult<TermTree<String>> {
    let mut tree = TermTree::new(label(node, show_keys));
    for child in node.children()? {
        tree.push(build_tree(child, show_keys)?);
    }
    Ok(tree)
}

impl TreeRender for Tree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, show_keys: bool) -> TreeResult<TermTree<String>> {
        match self.root() {
            Some(root) => build_tree(root, show_keys),
            None => Ok(TermTree::new("Empty tree".to_string())),
        }
    }
}

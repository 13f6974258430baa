//! Sample trees driven by the `demo` and `heap` commands.

use clap::ValueEnum;
use tracing::instrument;

use crate::domain::{Tree, TreeResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Sample {
    /// Mixed values, max degree 3
    Sample,
    /// Mixed values, binary
    Binary,
    /// Mostly complex numbers, max degree 4
    Complex,
    /// Eight strings, binary
    Strings,
}

impl Sample {
    pub const ALL: [Sample; 4] = [
        Sample::Sample,
        Sample::Binary,
        Sample::Complex,
        Sample::Strings,
    ];

    #[instrument(level = "debug")]
    pub fn build(self) -> TreeResult<Tree> {
        match self {
            Sample::Sample => sample_tree(),
            Sample::Binary => binary_tree(),
            Sample::Complex => complex_tree(),
            Sample::Strings => string_tree(),
        }
    }
}

// root
// ├── 1
// │   ├── 0.25
// │   └── n5
// │       └── 7-4.5i
// ├── n2
// │   ├── n6
// │   └── n7
// └── 12.35
fn sample_tree() -> TreeResult<Tree> {
    let mut tree = Tree::with_max_degree(3)?;
    let root = tree.add_root("root")?;
    let n1 = tree.add_sub_node(root, 1)?;
    let n2 = tree.add_sub_node(root, "n2")?;
    tree.add_sub_node(root, 12.35)?;
    tree.add_sub_node(n1, 0.25)?;
    let n5 = tree.add_sub_node(n1, "n5")?;
    tree.add_sub_node(n2, "n6")?;
    tree.add_sub_node(n2, "n7")?;
    tree.add_sub_node(n5, (7.0, -4.5))?;
    Ok(tree)
}

fn binary_tree() -> TreeResult<Tree> {
    let mut tree = Tree::new();
    let root = tree.add_root("root2")?;
    let n1 = tree.add_sub_node(root, 10)?;
    let n2 = tree.add_sub_node(root, "n2")?;
    tree.add_sub_node(n1, 20.45)?;
    tree.add_sub_node(n1, 0.5)?;
    let n5 = tree.add_sub_node(n2, "n5")?;
    let n6 = tree.add_sub_node(n2, "n6")?;
    tree.add_sub_node(n5, (4.5, 7.0))?;
    tree.add_sub_node(n6, (3.0, -1.2))?;
    Ok(tree)
}

fn complex_tree() -> TreeResult<Tree> {
    let mut tree = Tree::with_max_degree(4)?;
    let root = tree.add_root("complex")?;
    let n1 = tree.add_sub_node(root, (1.0, 2.5))?;
    let n2 = tree.add_sub_node(root, (3.14, 7.0))?;
    let n3 = tree.add_sub_node(root, (5.0, -1.5))?;
    let n4 = tree.add_sub_node(root, (2.71, 3.0))?;
    tree.add_sub_node(n1, 42)?;
    tree.add_sub_node(n1, 6.28)?;
    tree.add_sub_node(n2, "n7")?;
    let n8 = tree.add_sub_node(n2, "n8")?;
    tree.add_sub_node(n3, "n9")?;
    tree.add_sub_node(n4, (-3.0, 1.1))?;
    tree.add_sub_node(n8, (10.0, 2.2))?;
    Ok(tree)
}

fn string_tree() -> TreeResult<Tree> {
    let mut tree = Tree::new();
    let root = tree.add_root("node5")?;
    let n3 = tree.add_sub_node(root, "node3")?;
    let n8 = tree.add_sub_node(root, "node8")?;
    let n1 = tree.add_sub_node(n3, "node1")?;
    tree.add_sub_node(n3, "node4")?;
    let n7 = tree.add_sub_node(n8, "node7")?;
    tree.add_sub_node(n7, "node6")?;
    tree.add_sub_node(n1, "node2")?;
    Ok(tree)
}

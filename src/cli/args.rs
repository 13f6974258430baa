//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::Order;
use crate::samples::Sample;

/// N-ary trees of heterogeneous values: traversals and min-heap conversion
#[derive(Parser, Debug)]
#[command(name = "polytree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Local config file
    #[arg(short, long, global = true, env = "POLYTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Show node keys next to values
    #[arg(short = 'k', long, global = true)]
    pub show_keys: bool,

    /// Do not draw trees
    #[arg(long, global = true)]
    pub no_render: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build sample trees and print every traversal
    Demo {
        /// Sample to show (default: all)
        #[arg(value_enum)]
        sample: Option<Sample>,
    },

    /// Build a tree from value literals and traverse it
    Build {
        /// Maximum children per node (default from config)
        #[arg(short, long)]
        max_degree: Option<usize>,

        /// Traversal to print, repeatable (default from config)
        #[arg(short, long, value_enum)]
        order: Vec<OrderArg>,

        /// Also convert the tree to a min-heap
        #[arg(long)]
        heap: bool,

        /// Root value, e.g. `root`, `12`, `0.25`, `7-4.5i`
        root: String,

        /// Further nodes as PARENT:VALUE, PARENT being the 0-based index of an earlier node
        nodes: Vec<String>,
    },

    /// Convert a sample tree to a min-heap
    Heap {
        #[arg(value_enum, default_value = "strings")]
        sample: Sample,
    },

    /// Show effective configuration
    Config,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Traversal order as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    PreOrder,
    PostOrder,
    InOrder,
    Bfs,
    Dfs,
}

impl From<OrderArg> for Order {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::PreOrder => Order::PreOrder,
            OrderArg::PostOrder => Order::PostOrder,
            OrderArg::InOrder => Order::InOrder,
            OrderArg::Bfs => Order::Bfs,
            OrderArg::Dfs => Order::Dfs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from([
            "polytree", "-dd", "build", "-m", "3", "-o", "bfs", "-o", "pre-order", "root", "0:1",
            "0:n2",
        ])
        .unwrap();
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Build {
                max_degree,
                order,
                heap,
                root,
                nodes,
            }) => {
                assert_eq!(max_degree, Some(3));
                assert_eq!(order, vec![OrderArg::Bfs, OrderArg::PreOrder]);
                assert!(!heap);
                assert_eq!(root, "root");
                assert_eq!(nodes, vec!["0:1", "0:n2"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

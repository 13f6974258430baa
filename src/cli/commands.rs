use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, OrderArg};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{NodeId, Order, Tree, Value};
use crate::samples::Sample;
use crate::tree_traits::{label, TreeRender};

pub fn execute_command(cli: &Cli, settings: &Settings) -> CliResult<()> {
    let settings = apply_cli_overrides(cli, settings);
    match &cli.command {
        Some(Commands::Demo { sample }) => demo(*sample, &settings),
        Some(Commands::Build {
            max_degree,
            order,
            heap,
            root,
            nodes,
        }) => build(*max_degree, order, *heap, root, nodes, &settings),
        Some(Commands::Heap { sample }) => heap(*sample, &settings),
        Some(Commands::Config) => show_config(&settings),
        Some(Commands::Completion { shell }) => {
            completion(*shell);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Command line flags win over configured values.
pub fn apply_cli_overrides(cli: &Cli, settings: &Settings) -> Settings {
    let mut settings = settings.clone();
    if cli.show_keys {
        settings.show_keys = true;
    }
    if cli.no_render {
        settings.render = false;
    }
    settings
}

#[instrument(skip(settings))]
fn demo(sample: Option<Sample>, settings: &Settings) -> CliResult<()> {
    let orders = settings.traversal_orders()?;
    for (sample, title) in demo_titles(sample) {
        output::header(&title);
        let tree = sample.build()?;
        print_tree(&tree, &orders, settings)?;
        output::action("Key order", &heap_order_line(&tree, settings.show_keys)?);
        println!();
    }
    Ok(())
}

/// Samples to show with their headers; numbered only when showing all of them.
fn demo_titles(sample: Option<Sample>) -> Vec<(Sample, String)> {
    match sample {
        Some(sample) => vec![(sample, format!("{sample:?}:"))],
        None => Sample::ALL
            .iter()
            .enumerate()
            .map(|(i, &sample)| (sample, format!("Demo {} ({sample:?}):", i + 1)))
            .collect(),
    }
}

#[instrument(skip(settings))]
fn build(
    max_degree: Option<usize>,
    order: &[OrderArg],
    with_heap: bool,
    root: &str,
    nodes: &[String],
    settings: &Settings,
) -> CliResult<()> {
    let tree = build_tree(max_degree.unwrap_or(settings.max_degree), root, nodes)?;
    let orders = if order.is_empty() {
        settings.traversal_orders()?
    } else {
        order.iter().map(|&o| Order::from(o)).collect()
    };
    print_tree(&tree, &orders, settings)?;
    if with_heap {
        output::header("The min heap:");
        print_tree(&tree.my_heap()?, &orders, settings)?;
    }
    Ok(())
}

#[instrument(skip(settings))]
fn heap(sample: Sample, settings: &Settings) -> CliResult<()> {
    let orders = settings.traversal_orders()?;
    let tree = sample.build()?;
    output::header("The tree before:");
    print_tree(&tree, &orders, settings)?;
    println!();
    output::header("The min heap:");
    print_tree(&tree.my_heap()?, &orders, settings)?;
    Ok(())
}

fn show_config(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, name, &mut io::stdout());
}

fn print_tree(tree: &Tree, orders: &[Order], settings: &Settings) -> CliResult<()> {
    for &order in orders {
        output::action(
            &format!("{order} traversal"),
            &traversal_line(tree, order, settings.show_keys)?,
        );
    }
    if settings.render {
        output::info(&tree.to_tree_string(settings.show_keys)?);
    }
    Ok(())
}

/// Space-separated node values in `order`.
pub fn traversal_line(tree: &Tree, order: Order, show_keys: bool) -> CliResult<String> {
    let nodes = tree.traverse(order).collect::<Result<Vec<_>, _>>()?;
    Ok(nodes.into_iter().map(|n| label(n, show_keys)).join(" "))
}

/// Space-separated node values in ascending key order.
pub fn heap_order_line(tree: &Tree, show_keys: bool) -> CliResult<String> {
    Ok(tree.heap_order()?.map(|n| label(n, show_keys)).join(" "))
}

/// Splits `PARENT:VALUE` into the parent index and the parsed value.
pub fn parse_node_arg(arg: &str) -> CliResult<(usize, Value)> {
    let (parent, literal) = arg
        .split_once(':')
        .ok_or_else(|| CliError::InvalidArgs(format!("expected PARENT:VALUE, got '{arg}'")))?;
    let parent = parent
        .trim()
        .parse::<usize>()
        .map_err(|_| CliError::InvalidArgs(format!("invalid parent index in '{arg}'")))?;
    let value = literal
        .parse::<Value>()
        .unwrap_or_else(|never| match never {});
    Ok((parent, value))
}

/// Builds a tree from a root literal and `PARENT:VALUE` arguments; node `i` is the
/// `i`-th node inserted, the root being node 0.
#[instrument]
pub fn build_tree(max_degree: usize, root: &str, nodes: &[String]) -> CliResult<Tree> {
    let mut tree = Tree::with_max_degree(max_degree)?;
    let root_value = root.parse::<Value>().unwrap_or_else(|never| match never {});
    let mut ids: Vec<NodeId> = vec![tree.add_root(root_value)?];
    for arg in nodes {
        let (parent, value) = parse_node_arg(arg)?;
        let parent_id = *ids.get(parent).ok_or_else(|| {
            CliError::InvalidArgs(format!(
                "parent index {parent} in '{arg}' does not refer to an earlier node"
            ))
        })?;
        ids.push(tree.add_sub_node(parent_id, value)?);
    }
    debug!("Built tree with {} nodes", tree.len());
    Ok(tree)
}

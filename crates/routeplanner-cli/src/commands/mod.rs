// Module exports for CLI subcommands.
//
// main.rs parses arguments and dispatches to these handlers.

pub mod locations;
pub mod route;

use std::path::Path;

use anyhow::{Context, Result};
use routeplanner_lib::{load_graph, resolve_dataset_path, GraphModel};

/// Resolve and load the graph dataset shared by all subcommands.
pub fn load_dataset(target: Option<&Path>) -> Result<GraphModel> {
    let path = resolve_dataset_path(target).context("failed to locate the graph dataset")?;
    load_graph(&path).with_context(|| format!("failed to load dataset from {}", path.display()))
}

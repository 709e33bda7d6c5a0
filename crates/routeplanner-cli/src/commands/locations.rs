//! Locations command handler for listing known location names.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;

use routeplanner_cli::output::{LocationEntry, OutputFormat};

use super::load_dataset;

pub fn handle_locations_command(
    target: Option<&Path>,
    format: OutputFormat,
    filter: Option<&str>,
) -> Result<()> {
    let graph = load_dataset(target)?;
    let entries = LocationEntry::collect(&graph, filter);
    if entries.is_empty() && format != OutputFormat::Json {
        eprintln!("No locations match.");
        return Ok(());
    }

    let rendered = format.format_locations(&entries)?;
    io::stdout().write_all(rendered.as_bytes())?;
    Ok(())
}

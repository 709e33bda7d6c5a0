mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use routeplanner_cli::output::OutputFormat;

use crate::commands::locations::handle_locations_command;
use crate::commands::route::{handle_route_command, RouteCommandArgs};

#[derive(Parser, Debug)]
#[command(author, version, about = "Route planning over named transport locations")]
struct Cli {
    /// Graph dataset file, or a directory containing graph.json.
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the cheapest route between two location names.
    Route(RouteCommandArgs),
    /// List known location names and their node ids.
    Locations {
        /// Only list names containing this text (case-insensitive).
        #[arg(long)]
        filter: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Command::Route(args) => handle_route_command(cli.dataset.as_deref(), cli.format, args),
        Command::Locations { filter } => {
            handle_locations_command(cli.dataset.as_deref(), cli.format, filter.as_deref())
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

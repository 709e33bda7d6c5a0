//! Route command handler for computing paths between location names.

use std::io::{self, Write};
use std::path::Path;

use anyhow::Result;
use clap::Args;

use routeplanner_cli::output::OutputFormat;
use routeplanner_cli::terminal::ColorPalette;
use routeplanner_lib::{
    plan_route, EnumerationMetric, Error as RouteError, ExpansionPolicy, RouteAlgorithm,
    RouteRequest, RouteSummary, SolverOptions, WeightMetric,
};

use super::load_dataset;

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteCommandArgs {
    /// Departure location name.
    #[arg(long = "from")]
    pub from: String,
    /// Destination location name.
    #[arg(long = "to")]
    pub to: String,
    /// Edge attribute to minimise (distance or duration).
    #[arg(long, default_value_t = WeightMetric::Duration)]
    pub metric: WeightMetric,
    /// Search algorithm (uniform-cost or path-enumeration).
    #[arg(long, default_value_t = RouteAlgorithm::UniformCost)]
    pub algorithm: RouteAlgorithm,
    /// Stop the uniform-cost search once every destination id is finalised.
    #[arg(long)]
    pub early_exit: bool,
    /// Make path enumeration compare durations whatever --metric says.
    #[arg(long)]
    pub legacy_duration: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let options = SolverOptions {
            expansion: if self.early_exit {
                ExpansionPolicy::EarlyExit
            } else {
                ExpansionPolicy::FullTree
            },
            enumeration_metric: if self.legacy_duration {
                EnumerationMetric::DurationOnly
            } else {
                EnumerationMetric::Requested
            },
        };
        RouteRequest::new(self.from.as_str(), self.to.as_str())
            .with_metric(self.metric)
            .with_algorithm(self.algorithm)
            .with_options(options)
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    target: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let graph = load_dataset(target)?;
    let request = args.to_request();

    let plan = match plan_route(&graph, &request) {
        Ok(plan) => plan,
        Err(err) => return Err(handle_route_failure(&request, err)),
    };

    let summary = RouteSummary::from_plan(&graph, &plan);
    let rendered = format.format_route(&summary, ColorPalette::detect())?;
    io::stdout().write_all(rendered.as_bytes())?;
    Ok(())
}

fn handle_route_failure(request: &RouteRequest, err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownLocation { name, suggestions } => {
            anyhow::anyhow!(format_unknown_location_message(&name, &suggestions))
        }
        RouteError::Unreachable {
            start,
            goal,
            metric,
        } => anyhow::anyhow!(format_unreachable_message(&start, &goal, metric, request)),
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_location_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown location '{}'.", name.trim());
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

fn format_unreachable_message(
    start: &str,
    goal: &str,
    metric: WeightMetric,
    request: &RouteRequest,
) -> String {
    let mut message = format!("No route found between {} and {} by {}.", start, goal, metric);
    let other = match metric {
        WeightMetric::Distance => WeightMetric::Duration,
        WeightMetric::Duration => WeightMetric::Distance,
    };
    if request.options.enumeration_metric == EnumerationMetric::DurationOnly
        && request.algorithm == RouteAlgorithm::PathEnumeration
    {
        message.push_str(" Try without --legacy-duration.");
    } else {
        message.push_str(&format!(
            " Edges without a usable {metric} are skipped; try --metric {other}."
        ));
    }
    message
}

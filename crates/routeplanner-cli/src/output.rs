//! Output formatting for route and location rendering.
//!
//! Formatters return strings so the command handlers decide where output goes
//! and tests can inspect it without spawning the binary.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use routeplanner_lib::output::format_weight;
use routeplanner_lib::{GraphModel, NodeId, RouteRenderMode, RouteStep, RouteSummary};

use crate::terminal::ColorPalette;

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tagged route view (default)
    #[default]
    Text,
    /// Uncolored one-line-per-leg listing
    Plain,
    /// Markdown-flavoured text
    Rich,
    /// JSON for machine consumption
    Json,
}

impl OutputFormat {
    /// Format a route summary for display.
    pub fn format_route(self, summary: &RouteSummary, palette: ColorPalette) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(format_text(summary, palette)),
            OutputFormat::Plain => Ok(summary.render(RouteRenderMode::PlainText)),
            OutputFormat::Rich => Ok(summary.render(RouteRenderMode::RichText)),
            OutputFormat::Json => to_json(summary),
        }
    }

    /// Format a location listing for display.
    pub fn format_locations(self, locations: &[LocationEntry]) -> Result<String> {
        match self {
            OutputFormat::Json => to_json(&locations),
            OutputFormat::Rich => Ok(locations
                .iter()
                .map(|entry| format!("* **{}** ({})\n", entry.name, entry.id_list()))
                .collect()),
            OutputFormat::Text | OutputFormat::Plain => Ok(locations
                .iter()
                .map(|entry| format!("{} [{}]\n", entry.name, entry.id_list()))
                .collect()),
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("failed to serialise output")?;
    json.push('\n');
    Ok(json)
}

/// A location name with the node ids registered under it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LocationEntry {
    pub name: String,
    pub ids: Vec<NodeId>,
}

impl LocationEntry {
    /// Collect all locations whose name contains `filter` (case-insensitive).
    pub fn collect(graph: &GraphModel, filter: Option<&str>) -> Vec<Self> {
        let needle = filter.map(|value| value.trim().to_lowercase());
        graph
            .location_names()
            .into_iter()
            .filter(|name| {
                needle
                    .as_deref()
                    .map_or(true, |needle| name.to_lowercase().contains(needle))
            })
            .map(|name| LocationEntry {
                name: name.to_string(),
                ids: graph.ids_for(name).iter().cloned().collect(),
            })
            .collect()
    }

    fn id_list(&self) -> String {
        self.ids
            .iter()
            .map(NodeId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Tagged route view: one STRT line, one line per leg, totals at the end.
fn format_text(summary: &RouteSummary, p: ColorPalette) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "Route from {} to {} ({} legs; metric: {}; algorithm: {}):",
        summary.start.name, summary.goal.name, summary.hops, summary.metric, summary.algorithm
    );
    let _ = writeln!(
        buffer,
        "{}STRT{} {}{}{} {}({}){}",
        p.tag_start,
        p.reset,
        p.white_bold,
        summary.start.name,
        p.reset,
        p.gray,
        summary.start.id,
        p.reset
    );

    let last = summary.steps.len();
    for step in &summary.steps {
        let tag = if step.index == last {
            format!("{}GOAL{}", p.tag_goal, p.reset)
        } else {
            format!("{}LEG {}", p.tag_leg, p.reset)
        };
        let _ = writeln!(buffer, "{tag} {}", format_step(step, p));
    }

    let _ = writeln!(buffer);
    let _ = writeln!(
        buffer,
        "Total distance: {}",
        format_weight(summary.total_distance)
    );
    let _ = writeln!(
        buffer,
        "Total duration: {}",
        format_weight(summary.total_duration)
    );
    let _ = writeln!(
        buffer,
        "Cost ({}): {}",
        summary.metric,
        format_weight(summary.cost)
    );
    buffer
}

fn format_step(step: &RouteStep, p: ColorPalette) -> String {
    let value = |value: Option<f64>, color: &str| match value {
        Some(value) => format!("{color}{}{}", format_weight(value), p.reset),
        None => format!("{}-{}", p.red, p.reset),
    };
    format!(
        "{}{}{} {}({}){} distance {} duration {}",
        p.white_bold,
        step.name,
        p.reset,
        p.gray,
        step.to,
        p.reset,
        value(step.distance, p.green),
        value(step.duration, p.cyan)
    )
}

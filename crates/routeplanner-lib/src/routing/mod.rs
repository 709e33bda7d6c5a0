//! Route evaluation entry point.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported search algorithms
//! - [`SolverOptions`] - Variants of the solvers' behaviour
//! - [`RouteRequest`] - High-level route evaluation request
//! - [`RoutePlan`] - Evaluated route result
//! - [`plan_route`] and [`evaluate`] - Main entry points
//!
//! # Strategy Pattern
//!
//! Each algorithm is wrapped in a [`RouteSolver`] implementation and picked by
//! [`select_solver`], so callers only name the algorithm they want.
//!
//! # Example
//!
//! ```ignore
//! use routeplanner_lib::{load_graph, plan_route, RouteRequest, WeightMetric};
//!
//! let graph = load_graph("path/to/graph.json".as_ref())?;
//! let request = RouteRequest::new("Horb", "Stuttgart").with_metric(WeightMetric::Distance);
//! let plan = plan_route(&graph, &request)?;
//! println!("Route: {} legs, cost {}", plan.hop_count(), plan.cost);
//! ```

mod planner;

pub use planner::{select_solver, PathEnumerationSolver, RouteSolver, UniformCostSolver};

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{Edge, GraphModel, NodeId};
use crate::search::{EnumerationMetric, ExpansionPolicy};
use crate::weight::WeightMetric;

/// Number of fuzzy suggestions attached to an unknown location error.
const MAX_SUGGESTIONS: usize = 3;

/// Supported search algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteAlgorithm {
    /// Shortest-path tree with open/closed partitions.
    #[default]
    UniformCost,
    /// Explicit candidate paths per location name.
    PathEnumeration,
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::UniformCost => "uniform-cost",
            RouteAlgorithm::PathEnumeration => "path-enumeration",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    /// Also accepts the historical names: `a-star` for the uniform-cost tree
    /// and `dijkstra` for path enumeration.
    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "uniform-cost" | "a-star" | "astar" => Ok(RouteAlgorithm::UniformCost),
            "path-enumeration" | "dijkstra" => Ok(RouteAlgorithm::PathEnumeration),
            other => Err(format!("unknown route algorithm '{other}'")),
        }
    }
}

/// Behavioural variants of the solvers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverOptions {
    /// Full-tree or early-exit expansion for the uniform-cost solver.
    pub expansion: ExpansionPolicy,
    /// Metric policy of the enumeration solver.
    pub enumeration_metric: EnumerationMetric,
}

/// High-level route evaluation request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub metric: WeightMetric,
    pub algorithm: RouteAlgorithm,
    pub options: SolverOptions,
}

impl RouteRequest {
    /// Duration-weighted uniform-cost request with default options.
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            metric: WeightMetric::default(),
            algorithm: RouteAlgorithm::default(),
            options: SolverOptions::default(),
        }
    }

    pub fn with_metric(mut self, metric: WeightMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_algorithm(mut self, algorithm: RouteAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }
}

/// Evaluated route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    /// Metric the cost was accumulated under.
    pub metric: WeightMetric,
    pub start: String,
    pub goal: String,
    /// Destination node id the route ends at.
    pub destination: NodeId,
    pub legs: Vec<Edge>,
    pub cost: f64,
}

impl RoutePlan {
    /// Number of edges in the route.
    pub fn hop_count(&self) -> usize {
        self.legs.len()
    }
}

/// Resolve a location name to its node ids, returning an error for unknown names.
fn resolve_location<'g>(graph: &'g GraphModel, name: &str) -> Result<&'g BTreeSet<NodeId>> {
    let ids = graph.ids_for(name);
    if ids.is_empty() {
        return Err(Error::UnknownLocation {
            name: name.to_string(),
            suggestions: graph.fuzzy_location_matches(name, MAX_SUGGESTIONS),
        });
    }
    Ok(ids)
}

/// Evaluate a route using the requested algorithm and metric.
///
/// Both names are resolved to id sets first; an unresolvable name fails with
/// [`Error::UnknownLocation`] before any search runs. A search that reaches no
/// destination id fails with [`Error::Unreachable`].
pub fn plan_route(graph: &GraphModel, request: &RouteRequest) -> Result<RoutePlan> {
    let departures = resolve_location(graph, &request.start)?;
    let destinations = resolve_location(graph, &request.goal)?;

    debug!(
        start = %request.start,
        goal = %request.goal,
        departures = departures.len(),
        destinations = destinations.len(),
        algorithm = %request.algorithm,
        metric = %request.metric,
        "evaluating route"
    );

    let solver = select_solver(request);
    let result = solver
        .solve(graph, departures, destinations, request.metric)
        .ok_or_else(|| Error::Unreachable {
            start: request.start.clone(),
            goal: request.goal.clone(),
            metric: request.metric,
        })?;

    Ok(RoutePlan {
        algorithm: solver.algorithm(),
        metric: result.metric,
        start: request.start.trim().to_string(),
        goal: request.goal.trim().to_string(),
        destination: result.destination,
        legs: result.edges,
        cost: result.cost,
    })
}

/// Evaluate a route and return only its ordered edges.
pub fn evaluate(
    graph: &GraphModel,
    departure: &str,
    destination: &str,
    metric: WeightMetric,
    algorithm: RouteAlgorithm,
) -> Result<Vec<Edge>> {
    let request = RouteRequest::new(departure, destination)
        .with_metric(metric)
        .with_algorithm(algorithm);
    plan_route(graph, &request).map(|plan| plan.legs)
}

//! Route solving strategies implementing the Strategy pattern.
//!
//! This module provides the `RouteSolver` trait and one implementation per
//! search algorithm, so `plan_route` can select an algorithm without knowing
//! its internals.

use std::collections::BTreeSet;

use crate::graph::{GraphModel, NodeId};
use crate::path::PathResult;
use crate::search::{enumeration, uniform_cost, EnumerationMetric, ExpansionPolicy};
use crate::weight::WeightMetric;

use super::{RouteAlgorithm, RouteRequest};

/// Trait for route solving strategies.
pub trait RouteSolver: Send + Sync {
    /// The algorithm identifier for this solver.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Find the cheapest path from any departure id to any destination id.
    ///
    /// Returns `None` when no destination id is reachable under `metric`.
    fn solve(
        &self,
        graph: &GraphModel,
        departures: &BTreeSet<NodeId>,
        destinations: &BTreeSet<NodeId>,
        metric: WeightMetric,
    ) -> Option<PathResult>;
}

/// Uniform-cost shortest-path tree solver.
#[derive(Debug, Clone, Default)]
pub struct UniformCostSolver {
    policy: ExpansionPolicy,
}

impl UniformCostSolver {
    pub fn new(policy: ExpansionPolicy) -> Self {
        Self { policy }
    }
}

impl RouteSolver for UniformCostSolver {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::UniformCost
    }

    fn solve(
        &self,
        graph: &GraphModel,
        departures: &BTreeSet<NodeId>,
        destinations: &BTreeSet<NodeId>,
        metric: WeightMetric,
    ) -> Option<PathResult> {
        uniform_cost::solve(graph, departures, destinations, metric, self.policy)
    }
}

/// Explicit path-enumeration solver.
///
/// With [`EnumerationMetric::DurationOnly`] the comparison ignores the
/// requested metric, unlike [`UniformCostSolver`].
#[derive(Debug, Clone, Default)]
pub struct PathEnumerationSolver {
    metric_policy: EnumerationMetric,
}

impl PathEnumerationSolver {
    pub fn new(metric_policy: EnumerationMetric) -> Self {
        Self { metric_policy }
    }
}

impl RouteSolver for PathEnumerationSolver {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::PathEnumeration
    }

    fn solve(
        &self,
        graph: &GraphModel,
        departures: &BTreeSet<NodeId>,
        destinations: &BTreeSet<NodeId>,
        metric: WeightMetric,
    ) -> Option<PathResult> {
        enumeration::solve(graph, departures, destinations, metric, self.metric_policy)
    }
}

/// Select the appropriate solver for a given request.
pub fn select_solver(request: &RouteRequest) -> Box<dyn RouteSolver> {
    match request.algorithm {
        RouteAlgorithm::UniformCost => Box::new(UniformCostSolver::new(request.options.expansion)),
        RouteAlgorithm::PathEnumeration => Box::new(PathEnumerationSolver::new(
            request.options.enumeration_metric,
        )),
    }
}

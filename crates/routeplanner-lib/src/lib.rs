//! Route planner library entry points.
//!
//! This crate loads a directed transport graph of named locations, resolves
//! location names to node ids, and finds the cheapest route between two
//! locations under a distance or duration metric. Higher-level consumers (the
//! CLI, a UI) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

pub mod dataset;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;
pub mod search;
pub mod weight;

pub use dataset::{default_dataset_path, load_graph, read_graph, resolve_dataset_path};
pub use error::{Error, Result};
pub use graph::{Edge, GraphBuilder, GraphModel, NodeId};
pub use output::{RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{Path, PathResult, PathSet};
pub use routing::{
    evaluate, plan_route, select_solver, PathEnumerationSolver, RouteAlgorithm, RoutePlan,
    RouteRequest, RouteSolver, SolverOptions, UniformCostSolver,
};
pub use search::{EnumerationMetric, ExpansionPolicy};
pub use weight::{RawWeight, Weight, WeightMetric};

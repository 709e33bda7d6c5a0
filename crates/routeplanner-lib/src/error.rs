use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;
use crate::weight::WeightMetric;

/// Convenient result alias for the route planner library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a location name is absent or resolves to no node ids.
    #[error("unknown location name: {name}{}", format_suggestions(.suggestions))]
    UnknownLocation {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when both locations resolve but no path connects them.
    #[error("no route found between {start} and {goal} (metric: {metric})")]
    Unreachable {
        start: String,
        goal: String,
        metric: WeightMetric,
    },

    /// Raised by the strict weight accessor when an edge field is not a
    /// non-negative number. Solvers exclude such edges instead of failing.
    #[error("edge {departure} -> {destination} has malformed {metric} value '{raw}'")]
    MalformedWeight {
        departure: NodeId,
        destination: NodeId,
        metric: WeightMetric,
        raw: String,
    },

    /// The graph data could not be read or parsed. Fatal to engine construction.
    #[error("graph data unavailable at {path}: {message}")]
    DataUnavailable { path: PathBuf, message: String },

    /// No suitable data directory could be resolved for this platform.
    #[error("failed to resolve a data directory for the graph dataset")]
    DatasetPathUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON (de)serialisation errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

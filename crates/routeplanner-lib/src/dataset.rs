use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::graph::{Edge, GraphBuilder, GraphModel, NodeId};
use crate::weight::{RawWeight, WeightMetric};

/// Default filename for the graph dataset.
pub const DATASET_FILENAME: &str = "graph.json";

/// Environment variable overriding the dataset location.
pub const DATASET_ENV: &str = "ROUTEPLANNER_DATASET";

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("de", "routeplanner", "routeplanner")
        .ok_or(Error::DatasetPathUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Resolve the dataset path.
///
/// Precedence: `explicit` (a file, or a directory holding [`DATASET_FILENAME`]),
/// then the [`DATASET_ENV`] variable, then [`default_dataset_path`].
pub fn resolve_dataset_path(explicit: Option<&Path>) -> Result<PathBuf> {
    let candidate = match explicit {
        Some(path) => path.to_path_buf(),
        None => match env::var_os(DATASET_ENV).filter(|value| !value.is_empty()) {
            Some(value) => PathBuf::from(value),
            None => return default_dataset_path(),
        },
    };

    if candidate.is_dir() {
        Ok(candidate.join(DATASET_FILENAME))
    } else {
        Ok(candidate)
    }
}

/// Load the graph dataset at `path`.
///
/// Any read or parse failure is reported as [`Error::DataUnavailable`]; no
/// query can run without a graph.
pub fn load_graph(path: &Path) -> Result<GraphModel> {
    let unavailable = |message: String| Error::DataUnavailable {
        path: path.to_path_buf(),
        message,
    };

    let file = File::open(path).map_err(|err| unavailable(err.to_string()))?;
    let graph = read_graph(BufReader::new(file)).map_err(|err| unavailable(err.to_string()))?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph dataset"
    );
    Ok(graph)
}

/// Parse a graph document from any reader.
///
/// Edges referencing undeclared nodes are dropped. Edges with malformed
/// weights are kept; the solvers exclude them per metric.
pub fn read_graph<R: Read>(reader: R) -> Result<GraphModel> {
    let document: GraphDocument = serde_json::from_reader(reader)?;
    Ok(build_graph(document))
}

fn build_graph(document: GraphDocument) -> GraphModel {
    let mut builder = GraphBuilder::new();
    let mut declared: HashMap<NodeId, String> = HashMap::new();

    for record in document.nodes {
        let id = NodeId::new(record.id.into_text());
        let name = record.name.trim().to_string();
        if let Some(existing) = declared.get(&id) {
            if *existing != name {
                warn!(%id, first = %existing, ignored = %name, "node declared twice with different names");
            }
            continue;
        }
        if name.is_empty() {
            debug!(%id, "node without a name is not indexed");
        }
        declared.insert(id.clone(), name.clone());
        builder.insert_node(id, name);
    }

    let mut dropped = 0usize;
    let mut malformed: HashMap<WeightMetric, usize> = HashMap::new();
    for record in document.edges {
        let departure = NodeId::new(record.departure_id.into_text());
        let destination = NodeId::new(record.destination_id.into_text());
        if !declared.contains_key(&departure) || !declared.contains_key(&destination) {
            warn!(%departure, %destination, "dropping edge with undeclared endpoint");
            dropped += 1;
            continue;
        }

        let edge = Edge {
            departure,
            destination,
            destination_name: record.destination_name.unwrap_or_default(),
            distance: RawWeight::new(record.distance.map(Scalar::into_text).unwrap_or_default()),
            duration: RawWeight::new(record.duration.map(Scalar::into_text).unwrap_or_default()),
        };
        for metric in [WeightMetric::Distance, WeightMetric::Duration] {
            if let Err(err) = edge.try_weight(metric) {
                debug!("{err}");
                *malformed.entry(metric).or_default() += 1;
            }
        }
        builder.insert_edge(edge);
    }

    if dropped > 0 {
        warn!(dropped, "edges referencing undeclared nodes were dropped");
    }
    debug!(
        malformed_distance = malformed.get(&WeightMetric::Distance).copied().unwrap_or(0),
        malformed_duration = malformed.get(&WeightMetric::Duration).copied().unwrap_or(0),
        "edge weight validation complete"
    );

    builder.build()
}

#[derive(Debug, Deserialize)]
struct GraphDocument {
    #[serde(default)]
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
struct NodeRecord {
    id: Scalar,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    departure_id: Scalar,
    destination_id: Scalar,
    #[serde(default)]
    destination_name: Option<String>,
    #[serde(default)]
    distance: Option<Scalar>,
    #[serde(default)]
    duration: Option<Scalar>,
}

/// JSON value that may be written either as a string or as a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string(),
        }
    }
}

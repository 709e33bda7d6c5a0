use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::weight::{RawWeight, Weight, WeightMetric};

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Opaque identifier of a graph node.
///
/// Ordering is lexical; the solvers use it as the deterministic tie-break.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Directed edge within the routing graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub departure: NodeId,
    pub destination: NodeId,
    /// Name of the destination node, denormalised for display.
    pub destination_name: String,
    pub distance: RawWeight,
    pub duration: RawWeight,
}

impl Edge {
    /// Raw text of the field backing `metric`.
    pub fn raw(&self, metric: WeightMetric) -> &RawWeight {
        match metric {
            WeightMetric::Distance => &self.distance,
            WeightMetric::Duration => &self.duration,
        }
    }

    /// Weight of this edge under `metric`.
    pub fn weight(&self, metric: WeightMetric) -> Weight {
        self.raw(metric).parse()
    }

    /// Strict variant of [`Edge::weight`] that reports malformed values as errors.
    pub fn try_weight(&self, metric: WeightMetric) -> Result<f64> {
        self.weight(metric)
            .value()
            .ok_or_else(|| Error::MalformedWeight {
                departure: self.departure.clone(),
                destination: self.destination.clone(),
                metric,
                raw: self.raw(metric).as_str().to_string(),
            })
    }
}

static NO_IDS: BTreeSet<NodeId> = BTreeSet::new();

/// Read-only graph consumed by the solvers.
///
/// Holds the name index (name to node ids) and the adjacency index (node id to
/// outgoing edges). Clones share the underlying maps.
#[derive(Debug, Clone, Default)]
pub struct GraphModel {
    names: Arc<HashMap<String, BTreeSet<NodeId>>>,
    node_names: Arc<HashMap<NodeId, String>>,
    adjacency: Arc<HashMap<NodeId, Vec<Edge>>>,
}

impl GraphModel {
    /// Assemble a graph from a name index and an adjacency index.
    ///
    /// Names are trimmed and empty names are dropped from the index.
    pub fn from_parts(
        name_index: HashMap<String, BTreeSet<NodeId>>,
        adjacency: HashMap<NodeId, Vec<Edge>>,
    ) -> Self {
        let mut names: HashMap<String, BTreeSet<NodeId>> = HashMap::new();
        let mut node_names = HashMap::new();
        for (name, ids) in name_index {
            let name = name.trim();
            if name.is_empty() || ids.is_empty() {
                continue;
            }
            for id in &ids {
                node_names.insert(id.clone(), name.to_string());
            }
            names.entry(name.to_string()).or_default().extend(ids);
        }

        Self {
            names: Arc::new(names),
            node_names: Arc::new(node_names),
            adjacency: Arc::new(adjacency),
        }
    }

    /// Node ids registered under `name`. Unknown or blank names yield an empty set.
    pub fn ids_for(&self, name: &str) -> &BTreeSet<NodeId> {
        self.names.get(name.trim()).unwrap_or(&NO_IDS)
    }

    /// Human-readable name of a node.
    pub fn name_of(&self, id: &NodeId) -> Option<&str> {
        self.node_names.get(id).map(String::as_str)
    }

    /// Return the outgoing edges of a node.
    pub fn neighbours(&self, id: &NodeId) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All indexed location names in lexical order.
    pub fn location_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn node_count(&self) -> usize {
        self.node_names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Location names similar to `name`, best match first.
    pub fn fuzzy_location_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .names
            .keys()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

/// Incremental builder for [`GraphModel`].
///
/// Edges added before their destination node is named pick the name up at
/// [`GraphBuilder::build`] time.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    names: HashMap<String, BTreeSet<NodeId>>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node under a (possibly shared) name.
    pub fn node(mut self, id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        self.insert_node(id.into(), name.into());
        self
    }

    /// Add a directed edge with raw distance and duration values.
    pub fn edge(
        mut self,
        departure: impl Into<NodeId>,
        destination: impl Into<NodeId>,
        distance: impl Into<RawWeight>,
        duration: impl Into<RawWeight>,
    ) -> Self {
        self.insert_edge(Edge {
            departure: departure.into(),
            destination: destination.into(),
            destination_name: String::new(),
            distance: distance.into(),
            duration: duration.into(),
        });
        self
    }

    pub fn insert_node(&mut self, id: NodeId, name: String) {
        self.names
            .entry(name.trim().to_string())
            .or_default()
            .insert(id);
    }

    pub fn insert_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn build(self) -> GraphModel {
        let node_names: HashMap<&NodeId, &str> = self
            .names
            .iter()
            .flat_map(|(name, ids)| ids.iter().map(move |id| (id, name.as_str())))
            .collect();

        let mut adjacency: HashMap<NodeId, Vec<Edge>> = HashMap::new();
        for mut edge in self.edges {
            if edge.destination_name.trim().is_empty() {
                if let Some(name) = node_names.get(&edge.destination) {
                    edge.destination_name = (*name).to_string();
                }
            }
            adjacency
                .entry(edge.departure.clone())
                .or_default()
                .push(edge);
        }

        GraphModel::from_parts(self.names, adjacency)
    }
}

//! Path types shared by the solvers and the backward path reconstructor.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::graph::{Edge, NodeId};
use crate::weight::WeightMetric;

/// Outcome of a successful solve: the chosen destination id and the forward
/// ordered edges leading to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    pub destination: NodeId,
    pub edges: Vec<Edge>,
    pub cost: f64,
    /// Metric the cost was accumulated under.
    pub metric: WeightMetric,
}

impl PathResult {
    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether each edge departs from the node the previous edge arrived at.
    pub fn is_contiguous(&self) -> bool {
        self.edges
            .windows(2)
            .all(|pair| pair[0].destination == pair[1].departure)
    }
}

/// Finalised entry of a shortest-path tree, keyed by the node it reaches.
#[derive(Debug, Clone, Copy)]
pub struct TreeEntry<'g> {
    pub predecessor: &'g NodeId,
    /// Edge taken from the predecessor; `None` for departure roots.
    pub edge: Option<&'g Edge>,
    pub cumulative: f64,
}

/// Walk `tree` backwards from `destination` and return the edges in forward order.
///
/// The walk stops at a departure id, at a node without a tree record, or at a
/// root entry. It never takes more steps than the tree has entries.
pub fn reconstruct_edges<'g>(
    tree: &HashMap<&'g NodeId, TreeEntry<'g>>,
    departures: &BTreeSet<NodeId>,
    destination: &NodeId,
) -> Vec<&'g Edge> {
    let mut edges = Vec::new();
    let mut current = destination;

    while !departures.contains(current) && edges.len() <= tree.len() {
        let Some(entry) = tree.get(current) else {
            break;
        };
        let Some(edge) = entry.edge else {
            break;
        };
        edges.push(edge);
        current = entry.predecessor;
    }

    edges.reverse();
    edges
}

/// Explicit candidate path built by the enumeration solver.
///
/// Nodes are location names; ids sharing a name are treated as one junction.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<'g> {
    nodes: Vec<&'g str>,
    edges: Vec<&'g Edge>,
    price: f64,
}

impl<'g> Path<'g> {
    /// Zero-cost path sitting at `start`.
    pub fn start(start: &'g str) -> Self {
        Self {
            nodes: vec![start],
            edges: Vec::new(),
            price: 0.0,
        }
    }

    /// Copy of this path extended by one edge.
    pub fn extend(&self, next: &'g str, edge: &'g Edge, weight: f64) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.push(next);
        let mut edges = self.edges.clone();
        edges.push(edge);
        Self {
            nodes,
            edges,
            price: self.price + weight,
        }
    }

    pub fn last_node(&self) -> &'g str {
        // A path always holds at least its start node.
        self.nodes[self.nodes.len() - 1]
    }

    pub fn nodes(&self) -> &[&'g str] {
        &self.nodes
    }

    pub fn edges(&self) -> &[&'g Edge] {
        &self.edges
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Unordered collection of candidate paths.
#[derive(Debug, Clone, Default)]
pub struct PathSet<'g> {
    paths: Vec<Path<'g>>,
}

impl<'g> PathSet<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: Path<'g>) {
        self.paths.push(path);
    }

    /// Drop every path ending at `node`, returning how many were removed.
    pub fn remove_ending_at(&mut self, node: &str) -> usize {
        let before = self.paths.len();
        self.paths.retain(|path| path.last_node() != node);
        before - self.paths.len()
    }

    /// Remove and return every path ending at `node`.
    pub fn take_ending_at(&mut self, node: &str) -> Vec<Path<'g>> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.paths)
            .into_iter()
            .partition(|path| path.last_node() == node);
        self.paths = kept;
        taken
    }

    /// Paths ending at any of `targets`.
    pub fn ending_at(&self, targets: &BTreeSet<&str>) -> PathSet<'g> {
        PathSet {
            paths: self
                .paths
                .iter()
                .filter(|path| targets.contains(path.last_node()))
                .cloned()
                .collect(),
        }
    }

    /// Cheapest path in the set; equal prices fall back to node order.
    pub fn cheapest(&self) -> Option<&Path<'g>> {
        self.paths.iter().min_by(|a, b| {
            a.price
                .total_cmp(&b.price)
                .then_with(|| a.nodes.cmp(&b.nodes))
        })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

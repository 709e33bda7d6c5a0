//! Uniform-cost shortest-path tree over a set of departure ids.
//!
//! Nodes move from the open partition (discovered, not final) to the closed
//! partition (final) in order of cumulative weight. A node id is in at most one
//! partition at any time, and closed nodes are never reopened. That is only
//! sound because usable weights are non-negative.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap, HashMap};

use tracing::{debug, trace};

use crate::graph::{GraphModel, NodeId};
use crate::path::{reconstruct_edges, PathResult, TreeEntry};
use crate::weight::WeightMetric;

/// When the solver stops expanding the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionPolicy {
    /// Finalise every reachable node before choosing a destination.
    #[default]
    FullTree,
    /// Stop as soon as every destination id is closed.
    EarlyExit,
}

/// Run the uniform-cost search from all `departures` and pick the cheapest
/// reachable id in `destinations`.
///
/// Departure ids seed the closed partition at weight zero, acting as one
/// virtual zero-cost hub. Equal-weight frontier entries are finalised in
/// ascending [`NodeId`] order, and equal-weight destinations resolve to the
/// lowest id.
pub fn solve<'a>(
    graph: &'a GraphModel,
    departures: &'a BTreeSet<NodeId>,
    destinations: &BTreeSet<NodeId>,
    metric: WeightMetric,
    policy: ExpansionPolicy,
) -> Option<PathResult> {
    if departures.is_empty() || destinations.is_empty() {
        return None;
    }

    let mut closed: HashMap<&'a NodeId, TreeEntry<'a>> = HashMap::new();
    let mut open: HashMap<&'a NodeId, TreeEntry<'a>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    for id in departures {
        closed.insert(
            id,
            TreeEntry {
                predecessor: id,
                edge: None,
                cumulative: 0.0,
            },
        );
    }
    for id in departures {
        expand(graph, id, 0.0, metric, &closed, &mut open, &mut queue);
    }

    let mut pending: BTreeSet<&NodeId> = destinations
        .iter()
        .filter(|id| !closed.contains_key(*id))
        .collect();

    while let Some(entry) = queue.pop() {
        if policy == ExpansionPolicy::EarlyExit && pending.is_empty() {
            break;
        }

        // Entries superseded by a cheaper candidate, or already closed, are stale.
        let Some(candidate) = open.get(entry.node).copied() else {
            continue;
        };
        if entry.cost.0 > candidate.cumulative {
            continue;
        }

        open.remove(entry.node);
        closed.insert(entry.node, candidate);
        pending.remove(entry.node);
        expand(
            graph,
            entry.node,
            candidate.cumulative,
            metric,
            &closed,
            &mut open,
            &mut queue,
        );
    }

    debug!(
        closed = closed.len(),
        open = open.len(),
        %metric,
        ?policy,
        "uniform-cost expansion finished"
    );

    let (destination, finalised) = destinations
        .iter()
        .filter_map(|id| closed.get(id).map(|entry| (id, entry)))
        .min_by(|a, b| a.1.cumulative.total_cmp(&b.1.cumulative))?;

    let edges = reconstruct_edges(&closed, departures, destination)
        .into_iter()
        .cloned()
        .collect();

    Some(PathResult {
        destination: destination.clone(),
        edges,
        cost: finalised.cumulative,
        metric,
    })
}

/// Push the usable outgoing edges of a freshly closed node into the open partition.
fn expand<'a>(
    graph: &'a GraphModel,
    node: &'a NodeId,
    base: f64,
    metric: WeightMetric,
    closed: &HashMap<&'a NodeId, TreeEntry<'a>>,
    open: &mut HashMap<&'a NodeId, TreeEntry<'a>>,
    queue: &mut BinaryHeap<QueueEntry<'a>>,
) {
    for edge in graph.neighbours(node) {
        let Some(weight) = edge.weight(metric).value() else {
            trace!(
                departure = %edge.departure,
                destination = %edge.destination,
                raw = %edge.raw(metric),
                "skipping edge with unusable weight"
            );
            continue;
        };

        let next = &edge.destination;
        if closed.contains_key(next) {
            continue;
        }

        let cumulative = base + weight;
        if let Some(existing) = open.get(next) {
            if existing.cumulative <= cumulative {
                continue;
            }
        }

        open.insert(
            next,
            TreeEntry {
                predecessor: node,
                edge: Some(edge),
                cumulative,
            },
        );
        queue.push(QueueEntry::new(next, cumulative));
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a NodeId,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a NodeId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then by id.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

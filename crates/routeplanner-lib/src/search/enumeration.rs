//! Path-enumeration search over location names.
//!
//! Instead of predecessor pointers this solver keeps explicit [`Path`] values
//! in a [`PathSet`]. Node identity is the location name: every id sharing a
//! name is expanded together, so consecutive edges of a result are contiguous
//! by name but may switch between ids of the same location.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use tracing::{debug, warn};

use crate::graph::{Edge, GraphModel, NodeId};
use crate::path::{Path, PathResult, PathSet};
use crate::weight::WeightMetric;

/// Which edge field the enumeration solver compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumerationMetric {
    /// Compare the metric requested by the caller.
    #[default]
    Requested,
    /// Always compare durations, whatever the caller asked for.
    DurationOnly,
}

impl EnumerationMetric {
    /// Metric actually used for a request under this policy.
    pub fn effective(self, requested: WeightMetric) -> WeightMetric {
        match self {
            EnumerationMetric::Requested => requested,
            EnumerationMetric::DurationOnly => {
                if requested != WeightMetric::Duration {
                    warn!(
                        %requested,
                        "duration-only enumeration ignores the requested metric"
                    );
                }
                WeightMetric::Duration
            }
        }
    }
}

/// Run the enumeration search between the locations named by `departures`
/// and `destinations`.
///
/// Returns `None` when the frontier is exhausted before a destination name
/// reaches the head of the queue.
pub fn solve<'a>(
    graph: &'a GraphModel,
    departures: &BTreeSet<NodeId>,
    destinations: &BTreeSet<NodeId>,
    requested: WeightMetric,
    policy: EnumerationMetric,
) -> Option<PathResult> {
    let metric = policy.effective(requested);
    let starts: BTreeSet<&'a str> = departures
        .iter()
        .filter_map(|id| graph.name_of(id))
        .collect();
    let targets: BTreeSet<&'a str> = destinations
        .iter()
        .filter_map(|id| graph.name_of(id))
        .collect();
    if starts.is_empty() || targets.is_empty() {
        return None;
    }

    // Absent means undiscovered; zero is a legitimate cost.
    let mut best: HashMap<&'a str, f64> = starts.iter().map(|name| (*name, 0.0)).collect();
    let mut visited: HashSet<&'a str> = HashSet::new();
    let mut queue: Vec<&'a str> = starts.iter().copied().collect();
    let mut paths = PathSet::new();
    for &name in &starts {
        paths.add(Path::start(name));
    }

    let head = loop {
        let current = *queue.first()?;
        if targets.contains(current) {
            break current;
        }
        queue.remove(0);
        if !visited.insert(current) {
            continue;
        }
        let Some(&base) = best.get(current) else {
            continue;
        };

        let mut improved = Vec::new();
        for (neighbour, (edge, weight)) in cheapest_neighbours(graph, current, metric) {
            if visited.contains(neighbour) {
                continue;
            }
            let candidate = base + weight;
            if best.get(neighbour).is_some_and(|known| candidate >= *known) {
                continue;
            }
            if best.insert(neighbour, candidate).is_some() {
                paths.remove_ending_at(neighbour);
            }
            if !queue.contains(&neighbour) && !starts.contains(neighbour) {
                queue.push(neighbour);
            }
            improved.push((neighbour, edge, weight));
        }

        for path in paths.take_ending_at(current) {
            for &(neighbour, edge, weight) in &improved {
                paths.add(path.extend(neighbour, edge, weight));
            }
        }

        sort_queue(&mut queue, &best);
    };

    let finished = paths.ending_at(&targets);
    let cheapest = finished.cheapest()?;
    debug!(
        visited = visited.len(),
        candidates = paths.len(),
        finished = finished.len(),
        %metric,
        "path enumeration reached {head}"
    );

    let destination = match cheapest.edges().last() {
        Some(edge) => edge.destination.clone(),
        None => destinations
            .iter()
            .find(|id| graph.name_of(id) == Some(head))?
            .clone(),
    };

    Some(PathResult {
        destination,
        edges: cheapest.edges().iter().map(|edge| (*edge).clone()).collect(),
        cost: cheapest.price(),
        metric,
    })
}

/// Cheapest usable edge from any id named `location` to each neighbouring name.
fn cheapest_neighbours<'a>(
    graph: &'a GraphModel,
    location: &str,
    metric: WeightMetric,
) -> BTreeMap<&'a str, (&'a Edge, f64)> {
    let mut neighbours: BTreeMap<&'a str, (&'a Edge, f64)> = BTreeMap::new();
    for id in graph.ids_for(location) {
        for edge in graph.neighbours(id) {
            let Some(weight) = edge.weight(metric).value() else {
                continue;
            };
            let name = graph
                .name_of(&edge.destination)
                .unwrap_or(edge.destination_name.as_str());
            if name.is_empty() {
                continue;
            }
            let cheaper = neighbours
                .get(name)
                .map_or(true, |(_, known)| weight < *known);
            if cheaper {
                neighbours.insert(name, (edge, weight));
            }
        }
    }
    neighbours
}

/// Insertion sort by cumulative cost, then by name.
fn sort_queue(queue: &mut [&str], best: &HashMap<&str, f64>) {
    let cost = |name: &str| best.get(name).copied().unwrap_or(f64::INFINITY);
    for i in 1..queue.len() {
        let mut j = i;
        while j > 0 {
            let (a, b) = (queue[j - 1], queue[j]);
            let ordered = cost(a).total_cmp(&cost(b)).then_with(|| a.cmp(b));
            if ordered.is_le() {
                break;
            }
            queue.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn ids(values: &[&str]) -> BTreeSet<NodeId> {
        values.iter().copied().map(NodeId::from).collect()
    }

    #[test]
    fn zero_cost_edges_are_not_mistaken_for_undiscovered() {
        let graph = GraphBuilder::new()
            .node("a", "A")
            .node("b", "B")
            .node("c", "C")
            .edge("a", "b", 0, 0)
            .edge("b", "c", 0, 0)
            .edge("a", "c", 1, 1)
            .build();
        let result = solve(
            &graph,
            &ids(&["a"]),
            &ids(&["c"]),
            WeightMetric::Distance,
            EnumerationMetric::Requested,
        )
        .expect("route exists");
        assert_eq!(result.cost, 0.0);
        assert_eq!(result.hop_count(), 2);
    }

    #[test]
    fn duration_only_policy_overrides_distance() {
        let graph = GraphBuilder::new()
            .node("a", "A")
            .node("b", "B")
            .node("c", "C")
            .edge("a", "b", 5, 10)
            .edge("b", "c", 3, 4)
            .edge("a", "c", 10, 9)
            .build();
        let result = solve(
            &graph,
            &ids(&["a"]),
            &ids(&["c"]),
            WeightMetric::Distance,
            EnumerationMetric::DurationOnly,
        )
        .expect("route exists");
        assert_eq!(result.metric, WeightMetric::Duration);
        assert_eq!(result.cost, 9.0);
    }

    #[test]
    fn same_named_ids_form_one_junction() {
        let graph = GraphBuilder::new()
            .node("a", "A")
            .node("m1", "Mid")
            .node("m2", "Mid")
            .node("z", "Z")
            .edge("a", "m1", 1, 1)
            .edge("m2", "z", 1, 1)
            .build();
        let result = solve(
            &graph,
            &ids(&["a"]),
            &ids(&["z"]),
            WeightMetric::Distance,
            EnumerationMetric::Requested,
        )
        .expect("route through shared name");
        assert_eq!(result.cost, 2.0);
        assert_eq!(result.edges[0].destination.as_str(), "m1");
        assert_eq!(result.edges[1].departure.as_str(), "m2");
    }

    #[test]
    fn sort_queue_orders_by_cost_then_name() {
        let best = HashMap::from([("x", 3.0), ("y", 1.0), ("a", 3.0)]);
        let mut queue = vec!["x", "y", "a"];
        sort_queue(&mut queue, &best);
        assert_eq!(queue, vec!["y", "a", "x"]);
    }

    #[test]
    fn exhausted_queue_is_none() {
        let graph = GraphBuilder::new()
            .node("a", "A")
            .node("z", "Z")
            .build();
        assert!(solve(
            &graph,
            &ids(&["a"]),
            &ids(&["z"]),
            WeightMetric::Duration,
            EnumerationMetric::Requested,
        )
        .is_none());
    }
}

//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use routeplanner_lib::{load_graph, GraphBuilder, GraphModel};

/// Path to the fixtures directory shared by tests and benches.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the minimal JSON graph fixture.
#[allow(dead_code)]
pub fn fixture_graph_path() -> PathBuf {
    fixtures_dir().join("minimal_graph.json")
}

#[allow(dead_code)]
pub fn load_fixture_graph() -> GraphModel {
    load_graph(&fixture_graph_path()).expect("fixture graph loads")
}

/// A, B, C triangle plus an unconnected D.
///
/// Distance prefers A -> B -> C (8), duration prefers A -> C (9).
#[allow(dead_code)]
pub fn triangle() -> GraphModel {
    GraphBuilder::new()
        .node("a", "A")
        .node("b", "B")
        .node("c", "C")
        .node("d", "D")
        .edge("a", "b", 5, 10)
        .edge("b", "c", 3, 4)
        .edge("a", "c", 10, 9)
        .build()
}

/// Deterministic pseudo-random graph for cross-checks.
///
/// Every node gets a unique name. Roughly one in seven edges carries a
/// malformed distance.
#[allow(dead_code)]
pub fn scrambled_graph(seed: u64, nodes: usize, edges_per_node: usize) -> GraphModel {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut builder = GraphBuilder::new();
    for index in 0..nodes {
        builder = builder.node(format!("n{index}"), format!("N{index}"));
    }
    for from in 0..nodes {
        for _ in 0..edges_per_node {
            let to = (next() as usize) % nodes;
            if to == from {
                continue;
            }
            let distance = (next() % 20) as i32;
            let duration = (next() % 30) as i32 + 1;
            if next() % 7 == 0 {
                builder = builder.edge(format!("n{from}"), format!("n{to}"), "?", duration);
            } else {
                builder = builder.edge(format!("n{from}"), format!("n{to}"), distance, duration);
            }
        }
    }
    builder.build()
}

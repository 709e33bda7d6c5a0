use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use routeplanner_lib::{
    plan_route, GraphBuilder, GraphModel, RouteAlgorithm, RouteRequest, WeightMetric,
};
use std::hint::black_box;

const GRID: usize = 30;

/// Grid of `GRID * GRID` locations with edges to the right and downwards.
fn grid_graph() -> GraphModel {
    let mut builder = GraphBuilder::new();
    for row in 0..GRID {
        for col in 0..GRID {
            builder = builder.node(format!("{row}-{col}"), format!("L{row}-{col}"));
        }
    }
    for row in 0..GRID {
        for col in 0..GRID {
            let from = format!("{row}-{col}");
            let weight = ((row * 7 + col * 13) % 17 + 1) as f64;
            if col + 1 < GRID {
                builder = builder.edge(from.clone(), format!("{row}-{}", col + 1), weight, weight * 2.0);
            }
            if row + 1 < GRID {
                builder = builder.edge(from, format!("{}-{col}", row + 1), weight * 1.5, weight);
            }
        }
    }
    builder.build()
}

static GRAPH: Lazy<GraphModel> = Lazy::new(grid_graph);
static UNIFORM_COST_REQUEST: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::new("L0-0", format!("L{0}-{0}", GRID - 1)).with_metric(WeightMetric::Distance)
});
static ENUMERATION_REQUEST: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::new("L0-0", format!("L{0}-{0}", GRID - 1))
        .with_metric(WeightMetric::Distance)
        .with_algorithm(RouteAlgorithm::PathEnumeration)
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRAPH;

    c.bench_function("uniform_cost_grid", |b| {
        let request = &*UNIFORM_COST_REQUEST;
        b.iter(|| {
            let plan = plan_route(graph, request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("path_enumeration_grid", |b| {
        let request = &*ENUMERATION_REQUEST;
        b.iter(|| {
            let plan = plan_route(graph, request).expect("route exists");
            black_box(plan.cost)
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);

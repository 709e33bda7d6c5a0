mod common;

use routeplanner_lib::{
    evaluate, plan_route, EnumerationMetric, Error, ExpansionPolicy, NodeId, RouteAlgorithm,
    RouteRequest, SolverOptions, WeightMetric,
};

use common::{load_fixture_graph, triangle};

const ALGORITHMS: [RouteAlgorithm; 2] = [RouteAlgorithm::UniformCost, RouteAlgorithm::PathEnumeration];

fn leg_ids(legs: &[routeplanner_lib::Edge]) -> Vec<(&str, &str)> {
    legs.iter()
        .map(|edge| (edge.departure.as_str(), edge.destination.as_str()))
        .collect()
}

#[test]
fn distance_prefers_two_short_legs() {
    let graph = triangle();
    for algorithm in ALGORITHMS {
        let request = RouteRequest::new("A", "C")
            .with_metric(WeightMetric::Distance)
            .with_algorithm(algorithm);
        let plan = plan_route(&graph, &request).expect("route exists");

        assert_eq!(plan.algorithm, algorithm);
        assert_eq!(leg_ids(&plan.legs), vec![("a", "b"), ("b", "c")], "{algorithm}");
        assert_eq!(plan.cost, 8.0, "{algorithm}");
    }
}

#[test]
fn duration_prefers_direct_edge() {
    let graph = triangle();
    for algorithm in ALGORITHMS {
        let legs = evaluate(&graph, "A", "C", WeightMetric::Duration, algorithm)
            .expect("route exists");
        assert_eq!(leg_ids(&legs), vec![("a", "c")], "{algorithm}");
    }
}

#[test]
fn location_without_incoming_edges_is_unreachable() {
    let graph = triangle();
    for algorithm in ALGORITHMS {
        let err = evaluate(&graph, "A", "D", WeightMetric::Distance, algorithm)
            .expect_err("D has no incoming edges");
        match err {
            Error::Unreachable { start, goal, metric } => {
                assert_eq!(start, "A");
                assert_eq!(goal, "D");
                assert_eq!(metric, WeightMetric::Distance);
            }
            other => panic!("expected Unreachable, got {other:?}"),
        }
    }
}

#[test]
fn unknown_location_suggests_similar_names() {
    let graph = load_fixture_graph();
    let err = plan_route(&graph, &RouteRequest::new("Alpah", "Charlie"))
        .expect_err("unknown departure");
    match &err {
        Error::UnknownLocation { name, suggestions } => {
            assert_eq!(name, "Alpah");
            assert!(suggestions.contains(&"Alpha".to_string()));
        }
        other => panic!("expected UnknownLocation, got {other:?}"),
    }
    assert!(err.to_string().contains("Did you mean"));
}

#[test]
fn blank_location_is_unknown() {
    let graph = triangle();
    let err = plan_route(&graph, &RouteRequest::new("A", "   ")).expect_err("blank goal");
    assert!(matches!(
        err,
        Error::UnknownLocation { ref suggestions, .. } if suggestions.is_empty()
    ));
}

#[test]
fn unknown_goal_is_reported_before_search() {
    let graph = triangle();
    let err = plan_route(&graph, &RouteRequest::new("A", "Z")).expect_err("unknown goal");
    assert!(matches!(err, Error::UnknownLocation { ref name, .. } if name == "Z"));
}

#[test]
fn same_location_yields_empty_route() {
    let graph = triangle();
    for algorithm in ALGORITHMS {
        let plan = plan_route(&graph, &RouteRequest::new("B", "B").with_algorithm(algorithm))
            .expect("trivial route");
        assert_eq!(plan.hop_count(), 0);
        assert_eq!(plan.cost, 0.0);
        assert_eq!(plan.destination, NodeId::from("b"));
    }
}

#[test]
fn ambiguous_departure_fans_out_over_all_ids() {
    let graph = load_fixture_graph();
    assert_eq!(graph.ids_for("Horb").len(), 2);

    for algorithm in ALGORITHMS {
        let by_distance = evaluate(&graph, "Horb", "Stuttgart", WeightMetric::Distance, algorithm)
            .expect("route exists");
        assert_eq!(leg_ids(&by_distance), vec![("101", "300")], "{algorithm}");

        let by_duration = evaluate(&graph, "Horb", "Stuttgart", WeightMetric::Duration, algorithm)
            .expect("route exists");
        assert_eq!(
            leg_ids(&by_duration),
            vec![("102", "200"), ("200", "300")],
            "{algorithm}"
        );
    }
}

#[test]
fn malformed_weights_exclude_edges_per_metric() {
    let graph = load_fixture_graph();
    // 102 -> 200 has no usable distance, so Rottweil is only reachable by duration.
    for algorithm in ALGORITHMS {
        let err = evaluate(&graph, "Horb", "Rottweil", WeightMetric::Distance, algorithm)
            .expect_err("no usable distance edge");
        assert!(matches!(err, Error::Unreachable { .. }), "{algorithm}");

        let legs = evaluate(&graph, "Horb", "Rottweil", WeightMetric::Duration, algorithm)
            .expect("duration edge usable");
        assert_eq!(leg_ids(&legs), vec![("102", "200")], "{algorithm}");
    }
}

#[test]
fn every_route_is_contiguous_and_starts_at_departure() {
    let graph = load_fixture_graph();
    let departures = graph.ids_for("Delta").clone();
    let plan = plan_route(
        &graph,
        &RouteRequest::new("Delta", "Charlie").with_metric(WeightMetric::Distance),
    )
    .expect("route exists");

    assert!(departures.contains(&plan.legs[0].departure));
    for pair in plan.legs.windows(2) {
        assert_eq!(pair[0].destination, pair[1].departure);
    }
    assert_eq!(plan.cost, 9.0);
}

#[test]
fn early_exit_matches_full_tree() {
    let graph = load_fixture_graph();
    let full = plan_route(&graph, &RouteRequest::new("Delta", "Charlie")).expect("route exists");
    let early = plan_route(
        &graph,
        &RouteRequest::new("Delta", "Charlie").with_options(SolverOptions {
            expansion: ExpansionPolicy::EarlyExit,
            ..SolverOptions::default()
        }),
    )
    .expect("route exists");

    assert_eq!(full.cost, early.cost);
    assert_eq!(leg_ids(&full.legs), leg_ids(&early.legs));
}

#[test]
fn duration_only_enumeration_ignores_requested_distance() {
    let graph = triangle();
    let request = RouteRequest::new("A", "C")
        .with_metric(WeightMetric::Distance)
        .with_algorithm(RouteAlgorithm::PathEnumeration)
        .with_options(SolverOptions {
            enumeration_metric: EnumerationMetric::DurationOnly,
            ..SolverOptions::default()
        });
    let plan = plan_route(&graph, &request).expect("route exists");

    assert_eq!(plan.metric, WeightMetric::Duration);
    assert_eq!(leg_ids(&plan.legs), vec![("a", "c")]);
    assert_eq!(plan.cost, 9.0);
}

use std::fmt::Write;

use serde::Serialize;

use crate::graph::{GraphModel, NodeId};
use crate::routing::{RouteAlgorithm, RoutePlan};
use crate::weight::WeightMetric;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteEndpoint {
    pub id: NodeId,
    pub name: String,
}

/// One leg of a planned route, ready for display.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    /// 1-based position within the route.
    pub index: usize,
    pub from: NodeId,
    pub to: NodeId,
    /// Location name of `to`.
    pub name: String,
    /// `None` when the edge carries no usable value for the metric.
    pub distance: Option<f64>,
    pub duration: Option<f64>,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub metric: WeightMetric,
    pub hops: usize,
    pub cost: f64,
    pub total_distance: f64,
    pub total_duration: f64,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a structured summary with resolved location names.
    ///
    /// Totals only add the values that parse as usable weights; the edges of a
    /// plan are usable under `plan.metric` but not necessarily under the other.
    pub fn from_plan(graph: &GraphModel, plan: &RoutePlan) -> Self {
        let steps = plan
            .legs
            .iter()
            .enumerate()
            .map(|(index, edge)| RouteStep {
                index: index + 1,
                from: edge.departure.clone(),
                to: edge.destination.clone(),
                name: if edge.destination_name.is_empty() {
                    graph.name_of(&edge.destination).unwrap_or_default().to_string()
                } else {
                    edge.destination_name.clone()
                },
                distance: edge.weight(WeightMetric::Distance).value(),
                duration: edge.weight(WeightMetric::Duration).value(),
            })
            .collect::<Vec<_>>();

        let start_id = plan
            .legs
            .first()
            .map(|edge| edge.departure.clone())
            .unwrap_or_else(|| plan.destination.clone());
        let start = RouteEndpoint {
            name: graph
                .name_of(&start_id)
                .map(str::to_string)
                .unwrap_or_else(|| plan.start.clone()),
            id: start_id,
        };
        let goal = RouteEndpoint {
            name: graph
                .name_of(&plan.destination)
                .map(str::to_string)
                .unwrap_or_else(|| plan.goal.clone()),
            id: plan.destination.clone(),
        };

        Self {
            algorithm: plan.algorithm,
            metric: plan.metric,
            hops: plan.hop_count(),
            cost: plan.cost,
            total_distance: steps.iter().filter_map(|step| step.distance).sum(),
            total_duration: steps.iter().filter_map(|step| step.duration).sum(),
            start,
            goal,
            steps,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} legs, {}: {}, algorithm: {})",
            self.start.name,
            self.goal.name,
            self.hops,
            self.metric,
            format_weight(self.cost),
            self.algorithm
        );
        let _ = writeln!(buffer, "{:>3}: {} ({})", 0, self.start.name, self.start.id);
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}: {} ({}) [distance {}, duration {}]",
                step.index,
                step.name,
                step.to,
                format_optional(step.distance),
                format_optional(step.duration)
            );
        }
        let _ = writeln!(
            buffer,
            "Total: distance {}, duration {}",
            format_weight(self.total_distance),
            format_weight(self.total_duration)
        );
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ ({} legs, {}: `{}`, algorithm: `{}`)",
            self.start.name,
            self.goal.name,
            self.hops,
            self.metric,
            format_weight(self.cost),
            self.algorithm
        );
        let _ = writeln!(buffer, "* {:>2}. **{}** (`{}`)", 0, self.start.name, self.start.id);
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** (`{}`) distance {} · duration {}",
                step.index,
                step.name,
                step.to,
                format_optional(step.distance),
                format_optional(step.duration)
            );
        }
        buffer
    }
}

/// Whole numbers print without decimals, everything else with two.
pub fn format_weight(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map(format_weight).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::routing::{plan_route, RouteRequest};

    fn graph() -> GraphModel {
        GraphBuilder::new()
            .node("1", "Horb")
            .node("2", "Sulz")
            .node("3", "Rottweil")
            .edge("1", "2", 12.5, 900)
            .edge("2", "3", 16, "-")
            .build()
    }

    #[test]
    fn summary_resolves_names_and_totals() {
        let graph = graph();
        let plan = plan_route(
            &graph,
            &RouteRequest::new("Horb", "Rottweil").with_metric(WeightMetric::Distance),
        )
        .expect("route exists");
        let summary = RouteSummary::from_plan(&graph, &plan);

        assert_eq!(summary.start.name, "Horb");
        assert_eq!(summary.goal.name, "Rottweil");
        assert_eq!(summary.hops, 2);
        assert_eq!(summary.steps[0].name, "Sulz");
        assert_eq!(summary.steps[1].duration, None);
        assert!((summary.total_distance - 28.5).abs() < f64::EPSILON);
        assert!((summary.total_duration - 900.0).abs() < f64::EPSILON);
        assert!((summary.cost - 28.5).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_leg_plan_has_single_endpoint() {
        let graph = graph();
        let plan = plan_route(&graph, &RouteRequest::new("Sulz", "Sulz")).expect("trivial route");
        let summary = RouteSummary::from_plan(&graph, &plan);
        assert!(summary.steps.is_empty());
        assert_eq!(summary.start, summary.goal);
        assert_eq!(summary.cost, 0.0);
    }

    #[test]
    fn plain_render_lists_legs() {
        let graph = graph();
        let plan = plan_route(
            &graph,
            &RouteRequest::new("Horb", "Rottweil").with_metric(WeightMetric::Distance),
        )
        .expect("route exists");
        let text = RouteSummary::from_plan(&graph, &plan).render(RouteRenderMode::PlainText);
        assert!(text.starts_with("Route: Horb -> Rottweil (2 legs, distance: 28.50"));
        assert!(text.contains("  2: Rottweil (3) [distance 16, duration -]"));
        assert!(text.contains("Total: distance 28.50, duration 900"));
    }

    #[test]
    fn rich_render_uses_markdown() {
        let graph = graph();
        let plan = plan_route(
            &graph,
            &RouteRequest::new("Horb", "Sulz").with_metric(WeightMetric::Duration),
        )
        .expect("route exists");
        let text = RouteSummary::from_plan(&graph, &plan).render(RouteRenderMode::RichText);
        assert!(text.starts_with("**Route**"));
        assert!(text.contains("**Sulz** (`2`)"));
    }

    #[test]
    fn weights_format_compactly() {
        assert_eq!(format_weight(8.0), "8");
        assert_eq!(format_weight(2.126), "2.13");
    }
}

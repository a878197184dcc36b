use pm_core::{max_flow_value, Activity, System};

/// Integrates lost system flow over a maintenance plan's activity timeline.
///
/// Builds the set of event dates where the active-component mask can
/// change (every activity's start and end, plus the origin date), then for
/// each interval between consecutive events computes the max flow with
/// whichever components are under maintenance during that interval
/// deactivated, and accumulates the flow deficit weighted by interval
/// length.
pub struct FlowEvaluator;

impl FlowEvaluator {
    /// Lost flow for `activities` evaluated against `system`.
    pub fn evaluate(activities: &[Activity], system: &System) -> f64 {
        let mut events: Vec<f64> = activities
            .iter()
            .flat_map(|a| [a.t, a.t + a.d])
            .chain(std::iter::once(0.0))
            .collect();
        events.sort_by(|a, b| a.partial_cmp(b).expect("activity dates must be finite"));

        let mut lost_flow = 0.0;
        for window in events.windows(2) {
            let (date, next_date) = (window[0], window[1]);
            let active = Self::active_mask(activities, system.n(), date);
            let (graph, s, t) = system.edge_capacitated(&active);
            let flow = max_flow_value(&graph, s, t);
            lost_flow += (system.regular_flow - flow) * (next_date - date);
        }
        lost_flow
    }

    /// Components whose maintenance window `[t, t + d)` covers `tau` are
    /// inactive; everything else is active.
    fn active_mask(activities: &[Activity], n: usize, tau: f64) -> Vec<bool> {
        let mut active = vec![true; n];
        for a in activities {
            if a.t <= tau && tau < a.t + a.d {
                active[a.component.id.index()] = false;
            }
        }
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_core::{Component, ComponentId, FlowNode};
    use petgraph::graph::DiGraph;

    fn line_system() -> System {
        let mut graph = DiGraph::new();
        let source = graph.add_node(FlowNode::Source);
        let c0 = graph.add_node(FlowNode::Component(0));
        let sink = graph.add_node(FlowNode::Sink);
        graph.add_edge(source, c0, f64::INFINITY);
        graph.add_edge(c0, sink, f64::INFINITY);
        System::new(graph, vec![8.0], 1, source, sink)
    }

    fn component() -> Component {
        Component {
            id: ComponentId(0),
            cp: 100.0,
            cc: 500.0,
            beta: 2.0,
            alpha: 10.0,
            x_star: 5.0,
            phi_star: 1.0,
        }
    }

    #[test]
    fn no_overlap_with_activity_yields_zero_lost_flow() {
        let system = line_system();
        // degenerate single-activity timeline with zero duration: the
        // component is never actually offline.
        let activities = vec![Activity::new(component(), 10.0, 0.0)];
        assert_eq!(FlowEvaluator::evaluate(&activities, &system), 0.0);
    }

    #[test]
    fn maintenance_window_costs_capacity_times_duration() {
        let system = line_system();
        let activities = vec![Activity::new(component(), 10.0, 2.0)];
        let lost_flow = FlowEvaluator::evaluate(&activities, &system);
        assert!((lost_flow - 16.0).abs() < 1e-9);
    }
}

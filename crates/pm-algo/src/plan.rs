use std::sync::Arc;

use pm_core::{Activity, Group, GroupingStructure, System};

use crate::flow_evaluator::FlowEvaluator;

/// A fully bound maintenance plan: a grouping structure together with the
/// activity dates and cost it resolves to.
#[derive(Debug, Clone)]
pub struct Plan {
    pub activities: Vec<Activity>,
    pub system: Arc<System>,
    pub grouping: GroupingStructure,
    /// Total indirect cost, summed over every group's Newton-minimized penalty.
    pub ic: f64,
    /// Total lost flow, integrated over the resulting activity timeline.
    pub lf: f64,
}

impl Plan {
    /// Binds `grouping` against `activities`: Newton-minimizes every
    /// non-empty slot's shared execution date (writing the result back
    /// into `activities` and summing indirect cost), then re-evaluates lost
    /// flow against the resulting timeline.
    pub fn from_grouping(
        mut activities: Vec<Activity>,
        system: Arc<System>,
        grouping: GroupingStructure,
    ) -> Self {
        let ic = Self::set_dates(&mut activities, &grouping);
        let lf = FlowEvaluator::evaluate(&activities, &system);
        Self { activities, system, grouping, ic, lf }
    }

    fn set_dates(activities: &mut [Activity], grouping: &GroupingStructure) -> f64 {
        let mut total_ic = 0.0;
        for members in grouping.groups() {
            let group = Group::new(members);
            total_ic += group.minimize(activities);
        }
        total_ic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pm_core::{Component, ComponentId, FlowNode};
    use petgraph::graph::DiGraph;

    fn system() -> Arc<System> {
        let mut graph = DiGraph::new();
        let source = graph.add_node(FlowNode::Source);
        let c0 = graph.add_node(FlowNode::Component(0));
        let c1 = graph.add_node(FlowNode::Component(1));
        let sink = graph.add_node(FlowNode::Sink);
        graph.add_edge(source, c0, f64::INFINITY);
        graph.add_edge(source, c1, f64::INFINITY);
        graph.add_edge(c0, sink, f64::INFINITY);
        graph.add_edge(c1, sink, f64::INFINITY);
        Arc::new(System::new(graph, vec![5.0, 5.0], 2, source, sink))
    }

    fn component(id: usize, x_star: f64) -> Component {
        Component {
            id: ComponentId(id),
            cp: 100.0,
            cc: 500.0,
            beta: 2.0,
            alpha: 10.0,
            x_star,
            phi_star: 1.0,
        }
    }

    #[test]
    fn singleton_grouping_leaves_activities_unshifted() {
        let activities = vec![
            Activity::new(component(0, 5.0), 5.0, 1.0),
            Activity::new(component(1, 7.0), 7.0, 1.0),
        ];
        let grouping = GroupingStructure::singleton(2, vec![0, 1]);
        let plan = Plan::from_grouping(activities, system(), grouping);
        assert!((plan.activities[0].t - 5.0).abs() < 1e-3);
        assert!((plan.activities[1].t - 7.0).abs() < 1e-3);
        assert!(plan.ic.abs() < 1e-6);
    }

    #[test]
    fn grouping_two_activities_shares_a_single_date() {
        let activities = vec![
            Activity::new(component(0, 5.0), 5.0, 1.0),
            Activity::new(component(1, 5.0), 6.0, 1.0),
        ];
        let grouping = GroupingStructure::new(vec![0, 0], vec![0, 1]);
        let plan = Plan::from_grouping(activities, system(), grouping);
        assert!((plan.activities[0].t - plan.activities[1].t).abs() < 1e-9);
    }
}

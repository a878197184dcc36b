//! JSON input/output schema for the `pm-cli run` command.
//!
//! `pm-core`/`pm-algo` expose a `petgraph`-based `System` and a `Vec<Activity>`
//! that are not themselves `Deserialize`/`Serialize` (the graph and the
//! `Arc<System>` a `Plan` carries are not meant to round-trip through JSON).
//! This module is the translation layer: a flat document in, a flat
//! population-history document out.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};

use pm_algo::Individual;
use pm_core::{Activity, Component, ComponentId, FlowNode, System};

/// Role of a node in [`SystemInput::nodes`].
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NodeRole {
    Source,
    Sink,
    Component,
}

#[derive(Debug, Clone, Deserialize)]
struct NodeInput {
    id: usize,
    role: NodeRole,
    /// Required when `role == Component`: the component index this node
    /// represents, and its node throughput capacity.
    component: Option<usize>,
    capacity: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct EdgeInput {
    from: usize,
    to: usize,
    capacity: f64,
}

/// The flow network a plan is evaluated against.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemInput {
    /// Number of parallel repair crews.
    pub resources: usize,
    nodes: Vec<NodeInput>,
    edges: Vec<EdgeInput>,
    source: usize,
    sink: usize,
}

/// One component's cost model and nominal activity window.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityInput {
    pub component: usize,
    /// Nominal due date.
    pub t: f64,
    /// Duration.
    pub d: f64,
    pub cp: f64,
    pub cc: f64,
    pub alpha: f64,
    pub beta: f64,
    pub x_star: f64,
    pub phi_star: f64,
}

/// The top-level `run` input document: a system and its activities.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizerInput {
    pub system: SystemInput,
    pub activities: Vec<ActivityInput>,
}

/// Builds a [`System`] from [`SystemInput`], wiring up the
/// vertex-capacitated `petgraph` digraph the way the component table
/// describes: one graph node per [`NodeInput`], `Source`/`Sink` passed
/// through directly and `Component` nodes carrying their throughput
/// capacity, joined by the edges listed in `SystemInput::edges`.
pub fn build_system(input: &SystemInput) -> Result<System> {
    let mut graph = DiGraph::new();
    let mut index_of = HashMap::new();
    let mut node_capacity: HashMap<usize, f64> = HashMap::new();
    let mut source = None;
    let mut sink = None;

    for node in &input.nodes {
        let flow_node = match node.role {
            NodeRole::Source => FlowNode::Source,
            NodeRole::Sink => FlowNode::Sink,
            NodeRole::Component => {
                let component = node
                    .component
                    .with_context(|| format!("node {} has role component but no component id", node.id))?;
                let capacity = node
                    .capacity
                    .with_context(|| format!("node {} has role component but no capacity", node.id))?;
                node_capacity.insert(component, capacity);
                FlowNode::Component(component)
            }
        };
        let idx = graph.add_node(flow_node);
        index_of.insert(node.id, idx);
        match flow_node {
            FlowNode::Source => source = Some(idx),
            FlowNode::Sink => sink = Some(idx),
            FlowNode::Component(_) => {}
        }
    }

    for edge in &input.edges {
        let &from = index_of
            .get(&edge.from)
            .with_context(|| format!("edge references unknown node id {}", edge.from))?;
        let &to = index_of
            .get(&edge.to)
            .with_context(|| format!("edge references unknown node id {}", edge.to))?;
        graph.add_edge(from, to, edge.capacity);
    }

    let source = source.context("system input has no node with role \"source\"")?;
    let sink = sink.context("system input has no node with role \"sink\"")?;
    if index_of.get(&input.source) != Some(&source) {
        bail!("system.source id does not match the node tagged role \"source\"");
    }
    if index_of.get(&input.sink) != Some(&sink) {
        bail!("system.sink id does not match the node tagged role \"sink\"");
    }

    let n = node_capacity.len();
    let mut capacities = vec![0.0; n];
    for (component, capacity) in node_capacity {
        if component >= n {
            bail!("component id {component} is out of range for {n} components");
        }
        capacities[component] = capacity;
    }

    Ok(System::new(graph, capacities, input.resources, source, sink))
}

/// Builds the `Vec<Activity>` from [`ActivityInput`], ordered by component id
/// (the index space [`pm_core::Component`] and [`pm_core::System`] share).
pub fn build_activities(inputs: &[ActivityInput]) -> Result<Vec<Activity>> {
    let n = inputs.len();
    let mut activities: Vec<Option<Activity>> = vec![None; n];
    for a in inputs {
        if a.d < 0.0 {
            bail!("activity for component {} has negative duration", a.component);
        }
        if a.component >= n {
            bail!("activity component id {} is out of range for {n} activities", a.component);
        }
        let component = Component {
            id: ComponentId(a.component),
            cp: a.cp,
            cc: a.cc,
            beta: a.beta,
            alpha: a.alpha,
            x_star: a.x_star,
            phi_star: a.phi_star,
        };
        activities[a.component] = Some(Activity::new(component, a.t, a.d));
    }
    activities
        .into_iter()
        .enumerate()
        .map(|(i, a)| a.with_context(|| format!("no activity supplied for component {i}")))
        .collect()
}

/// One individual's grouping and score, the JSON-safe projection of
/// [`pm_algo::Individual`].
#[derive(Debug, Clone, Serialize)]
pub struct IndividualOutput {
    pub slot: Vec<usize>,
    pub resource: Vec<usize>,
    pub lost_flow: f64,
    pub indirect_cost: f64,
    pub rank: usize,
    pub crowding_distance: f64,
}

impl From<&Individual> for IndividualOutput {
    fn from(individual: &Individual) -> Self {
        Self {
            slot: individual.plan.grouping.slot.clone(),
            resource: individual.plan.grouping.resource.clone(),
            lost_flow: individual.plan.lf,
            indirect_cost: individual.plan.ic,
            rank: individual.rank,
            crowding_distance: individual.crowding_distance,
        }
    }
}

/// Converts a full `population_history` into its JSON-safe form.
pub fn history_output(history: &[Vec<Individual>]) -> Vec<Vec<IndividualOutput>> {
    history
        .iter()
        .map(|generation| generation.iter().map(IndividualOutput::from).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> OptimizerInput {
        serde_json::from_value(serde_json::json!({
            "system": {
                "resources": 1,
                "nodes": [
                    {"id": 0, "role": "source"},
                    {"id": 1, "role": "component", "component": 0, "capacity": 10.0},
                    {"id": 2, "role": "sink"}
                ],
                "edges": [
                    {"from": 0, "to": 1, "capacity": 1e9},
                    {"from": 1, "to": 2, "capacity": 1e9}
                ],
                "source": 0,
                "sink": 2
            },
            "activities": [
                {"component": 0, "t": 10.0, "d": 2.0, "cp": 100.0, "cc": 500.0,
                 "alpha": 10.0, "beta": 2.0, "x_star": 5.0, "phi_star": 1.0}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn builds_a_single_component_system() {
        let input = sample_input();
        let system = build_system(&input.system).unwrap();
        assert_eq!(system.n(), 1);
        assert_eq!(system.regular_flow, 10.0);
    }

    #[test]
    fn builds_activities_indexed_by_component() {
        let input = sample_input();
        let activities = build_activities(&input.activities).unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].component.id, ComponentId(0));
    }

    #[test]
    fn rejects_missing_activity_for_a_component() {
        let mut input = sample_input();
        input.activities.clear();
        let system = build_system(&input.system).unwrap();
        // system still reports one component even with no activities supplied
        assert_eq!(system.n(), 1);
        assert!(build_activities(&input.activities).is_err());
    }
}

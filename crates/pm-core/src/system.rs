use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::maxflow::max_flow_value;

/// Role of a node in the underlying system flow network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowNode {
    Source,
    Sink,
    Component(usize),
}

/// The node-capacitated flow network a maintenance plan is evaluated
/// against.
///
/// Construction of the graph itself (wiring up edges between the
/// `Source`, `Sink`, and `Component` nodes, and assigning node
/// capacities) is assumed to be done by the caller; `System` only owns
/// the resulting structure and the operations needed to evaluate lost
/// flow against it.
#[derive(Debug, Clone)]
pub struct System {
    pub graph: DiGraph<FlowNode, f64>,
    /// Per-component throughput capacity, indexed by [`ComponentId`](crate::ComponentId).
    pub node_capacity: Vec<f64>,
    /// Number of maintenance crews (resource slots) available per time slot.
    pub resources: usize,
    pub source: NodeIndex,
    pub sink: NodeIndex,
    /// Maximum flow with every component active, computed once at
    /// construction time.
    pub regular_flow: f64,
}

impl System {
    pub fn new(
        graph: DiGraph<FlowNode, f64>,
        node_capacity: Vec<f64>,
        resources: usize,
        source: NodeIndex,
        sink: NodeIndex,
    ) -> Self {
        let mut system = Self {
            graph,
            node_capacity,
            resources,
            source,
            sink,
            regular_flow: 0.0,
        };
        let all_active = vec![true; system.n()];
        let (edge_graph, s, t) = system.edge_capacitated(&all_active);
        system.regular_flow = max_flow_value(&edge_graph, s, t);
        system
    }

    /// Number of components in the system (and the length of `node_capacity`).
    pub fn n(&self) -> usize {
        self.node_capacity.len()
    }

    /// Builds an edge-capacitated digraph for the given active-component
    /// mask by vertex-splitting every active `Component(c)` node into an
    /// in/out pair joined by an edge of capacity `node_capacity[c]`, and
    /// simply omitting inactive components and anything that only reaches
    /// the network through one.
    ///
    /// This reconstructs a small digraph per call instead of deep-copying
    /// `self.graph` and mutating it in place, so evaluating a full event
    /// timeline touches the original graph only for reads.
    pub fn edge_capacitated(&self, active: &[bool]) -> (DiGraph<(), f64>, NodeIndex, NodeIndex) {
        let mut g: DiGraph<(), f64> = DiGraph::new();
        let mut entry: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut exit: HashMap<NodeIndex, NodeIndex> = HashMap::new();
        let mut source_new = None;
        let mut sink_new = None;

        for idx in self.graph.node_indices() {
            match self.graph[idx] {
                FlowNode::Source => {
                    let n = g.add_node(());
                    entry.insert(idx, n);
                    exit.insert(idx, n);
                    source_new = Some(n);
                }
                FlowNode::Sink => {
                    let n = g.add_node(());
                    entry.insert(idx, n);
                    exit.insert(idx, n);
                    sink_new = Some(n);
                }
                FlowNode::Component(c) => {
                    if active.get(c).copied().unwrap_or(false) {
                        let a = g.add_node(());
                        let b = g.add_node(());
                        g.add_edge(a, b, self.node_capacity[c]);
                        entry.insert(idx, a);
                        exit.insert(idx, b);
                    }
                }
            }
        }

        for edge in self.graph.edge_references() {
            if let (Some(&s), Some(&t)) = (exit.get(&edge.source()), entry.get(&edge.target())) {
                g.add_edge(s, t, *edge.weight());
            }
        }

        (
            g,
            source_new.expect("system graph must contain a Source node"),
            sink_new.expect("system graph must contain a Sink node"),
        )
    }

    /// Convenience wrapper: max flow with the given components active.
    pub fn max_flow_with_mask(&self, active: &[bool]) -> f64 {
        let (g, s, t) = self.edge_capacitated(active);
        max_flow_value(&g, s, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_system() -> System {
        let mut graph = DiGraph::new();
        let source = graph.add_node(FlowNode::Source);
        let c0 = graph.add_node(FlowNode::Component(0));
        let c1 = graph.add_node(FlowNode::Component(1));
        let sink = graph.add_node(FlowNode::Sink);
        graph.add_edge(source, c0, f64::INFINITY);
        graph.add_edge(c0, c1, f64::INFINITY);
        graph.add_edge(c1, sink, f64::INFINITY);

        System::new(graph, vec![10.0, 5.0], 1, source, sink)
    }

    #[test]
    fn regular_flow_is_the_bottleneck_capacity() {
        let system = line_system();
        assert_eq!(system.regular_flow, 5.0);
    }

    #[test]
    fn deactivating_the_bottleneck_drops_flow_to_zero() {
        let system = line_system();
        assert_eq!(system.max_flow_with_mask(&[true, false]), 0.0);
    }

    #[test]
    fn deactivating_either_component_in_series_drops_flow_to_zero() {
        let system = line_system();
        assert_eq!(system.max_flow_with_mask(&[false, true]), 0.0);
    }
}

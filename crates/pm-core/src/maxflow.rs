use std::collections::VecDeque;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

/// A residual-graph edge. Edges are always added in forward/reverse pairs,
/// so a forward edge at index `e` has its reverse at `e ^ 1`.
struct ResidualEdge {
    to: usize,
    capacity: f64,
}

/// Computes the maximum flow value from `source` to `sink` in an
/// edge-capacitated digraph via Edmonds-Karp (BFS augmenting paths).
///
/// `graph` is expected to already be edge-capacitated (see
/// [`System::edge_capacitated`](crate::System::edge_capacitated)); node
/// weights are ignored.
pub fn max_flow_value(graph: &DiGraph<(), f64>, source: NodeIndex, sink: NodeIndex) -> f64 {
    let n = graph.node_count();
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut edges: Vec<ResidualEdge> = Vec::new();

    let mut add_edge = |from: usize, to: usize, capacity: f64| {
        adjacency[from].push(edges.len());
        edges.push(ResidualEdge { to, capacity });
        adjacency[to].push(edges.len());
        edges.push(ResidualEdge { to: from, capacity: 0.0 });
    };

    for edge in graph.edge_references() {
        add_edge(edge.source().index(), edge.target().index(), *edge.weight());
    }

    let s = source.index();
    let t = sink.index();
    let mut total_flow = 0.0;

    loop {
        let mut parent_edge: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        visited[s] = true;
        let mut queue = VecDeque::new();
        queue.push_back(s);

        while let Some(u) = queue.pop_front() {
            if u == t {
                break;
            }
            for &edge_id in &adjacency[u] {
                let to = edges[edge_id].to;
                if edges[edge_id].capacity > 1e-12 && !visited[to] {
                    visited[to] = true;
                    parent_edge[to] = Some(edge_id);
                    queue.push_back(to);
                }
            }
        }

        if !visited[t] {
            break;
        }

        let mut bottleneck = f64::INFINITY;
        let mut v = t;
        while v != s {
            let edge_id = parent_edge[v].expect("BFS-reachable node has a parent edge");
            bottleneck = bottleneck.min(edges[edge_id].capacity);
            v = edges[edge_id ^ 1].to;
        }

        v = t;
        while v != s {
            let edge_id = parent_edge[v].expect("BFS-reachable node has a parent edge");
            edges[edge_id].capacity -= bottleneck;
            edges[edge_id ^ 1].capacity += bottleneck;
            v = edges[edge_id ^ 1].to;
        }

        total_flow += bottleneck;
    }

    total_flow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_bottleneck_edge_caps_the_flow() {
        let mut g: DiGraph<(), f64> = DiGraph::new();
        let s = g.add_node(());
        let a = g.add_node(());
        let t = g.add_node(());
        g.add_edge(s, a, 10.0);
        g.add_edge(a, t, 4.0);
        assert_eq!(max_flow_value(&g, s, t), 4.0);
    }

    #[test]
    fn parallel_paths_sum_their_capacities() {
        let mut g: DiGraph<(), f64> = DiGraph::new();
        let s = g.add_node(());
        let a = g.add_node(());
        let b = g.add_node(());
        let t = g.add_node(());
        g.add_edge(s, a, 3.0);
        g.add_edge(a, t, 3.0);
        g.add_edge(s, b, 2.0);
        g.add_edge(b, t, 2.0);
        assert_eq!(max_flow_value(&g, s, t), 5.0);
    }

    #[test]
    fn disconnected_source_and_sink_yield_zero_flow() {
        let mut g: DiGraph<(), f64> = DiGraph::new();
        let s = g.add_node(());
        let t = g.add_node(());
        g.add_node(());
        assert_eq!(max_flow_value(&g, s, t), 0.0);
    }
}

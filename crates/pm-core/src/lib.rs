//! # pm-core: Preventive-Maintenance Scheduling Data Model
//!
//! Data structures and graph-based evaluation primitives for grouping
//! preventive-maintenance activities under a shared crew/resource
//! constraint.
//!
//! ## Design Philosophy
//!
//! A maintenance plan binds each component's activity to an execution date
//! by grouping activities into shared maintenance windows (a
//! [`GroupingStructure`]). Grouped activities share one Newton-minimized
//! execution date ([`Group::minimize`]); the system-wide effect of taking
//! components offline is evaluated against a flow network ([`System`]) via
//! max-flow ([`max_flow_value`]).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pm_core::*;
//! use petgraph::graph::DiGraph;
//!
//! let mut graph = DiGraph::new();
//! let source = graph.add_node(FlowNode::Source);
//! let c0 = graph.add_node(FlowNode::Component(0));
//! let sink = graph.add_node(FlowNode::Sink);
//! graph.add_edge(source, c0, f64::INFINITY);
//! graph.add_edge(c0, sink, f64::INFINITY);
//!
//! let system = System::new(graph, vec![10.0], 1, source, sink);
//! assert_eq!(system.regular_flow, 10.0);
//! ```
//!
//! ## Modules
//!
//! - [`component`] / [`activity`] - per-component cost model and scheduled activities
//! - [`group`] - feasibility testing and Newton-minimized shared dates
//! - [`grouping`] - the dense grouping-structure representation
//! - [`system`] - the flow network and its active-mask evaluation
//! - [`maxflow`] - the underlying max-flow primitive
//! - [`error`] - the crate's error type

pub mod activity;
pub mod component;
pub mod error;
pub mod group;
pub mod grouping;
pub mod maxflow;
pub mod system;

pub use activity::Activity;
pub use component::{Component, ComponentId};
pub use error::{PmError, PmResult};
pub use group::Group;
pub use grouping::GroupingStructure;
pub use maxflow::max_flow_value;
pub use system::{FlowNode, System};

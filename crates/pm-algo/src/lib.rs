//! # pm-algo: NSGA-II Engine for Maintenance Grouping
//!
//! Multi-objective search over maintenance grouping structures, trading off
//! indirect cost (IC) against lost system flow (LF).
//!
//! ## Architecture
//!
//! - [`plan`] binds a [`pm_core::GroupingStructure`] to concrete activity
//!   dates and a cost, via [`flow_evaluator`] for the flow side and
//!   `pm_core::Group` for the cost side.
//! - [`individual`] wraps a [`plan::Plan`] with its NSGA-II bookkeeping
//!   (rank, dominance counters, crowding distance).
//! - [`population_init`] and [`mutator`] generate and perturb grouping
//!   structures.
//! - [`nsga2`] ties it together: the generational loop, non-dominated
//!   sorting, and crowding-distance truncation.
//!
//! Mutation and initial population generation are the only sources of
//! randomness; both support an optional `rayon`-parallel mode
//! ([`config::Nsga2Config::parallel`]) that is bit-identical to the
//! sequential path given the same seed, since every worker's RNG stream is
//! seeded independently up front on the calling thread.

pub mod config;
pub mod flow_evaluator;
pub mod individual;
pub mod mutator;
pub mod nsga2;
pub mod plan;
pub mod population_init;

pub use config::Nsga2Config;
pub use flow_evaluator::FlowEvaluator;
pub use individual::{strict_dominance, Dominance, Individual};
pub use mutator::Mutator;
pub use nsga2::{crowding_distance, fast_non_dominated_sort, sort_by_crowding_desc, Fronts, Nsga2};
pub use plan::Plan;
pub use population_init::PopulationInit;

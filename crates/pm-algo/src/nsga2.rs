use std::sync::Arc;

use pm_core::{PmError, PmResult, System};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::Nsga2Config;
use crate::individual::{strict_dominance, Dominance, Individual};
use crate::mutator::Mutator;
use crate::plan::Plan;
use crate::population_init::PopulationInit;
use pm_core::Activity;

/// Dominance-ranked subsets of a population; `fronts[0]` is the
/// non-dominated front, `fronts[1]` the next rank, and so on.
pub type Fronts = Vec<Vec<usize>>;

/// Ranks `population` into fronts using `dominance`, setting each
/// individual's `rank`, `dominated_solutions`, and `dominator_counter` as a
/// side effect.
///
/// Indices in the returned fronts (and in each individual's
/// `dominated_solutions`) refer to positions in `population`, not a stable
/// individual identity — this state is recomputed from scratch on every
/// call.
pub fn fast_non_dominated_sort(population: &mut [Individual], dominance: Dominance) -> Fronts {
    let n = population.len();
    for ind in population.iter_mut() {
        ind.rank = 0;
        ind.dominated_solutions.clear();
        ind.dominator_counter = 0;
    }

    let mut fronts: Fronts = vec![Vec::new()];
    for p in 0..n {
        for q in 0..n {
            if p == q {
                continue;
            }
            if dominance(&population[p].score, &population[q].score) {
                population[p].dominated_solutions.push(q);
            } else if dominance(&population[q].score, &population[p].score) {
                population[p].dominator_counter += 1;
            }
        }
        if population[p].dominator_counter == 0 {
            population[p].rank = 1;
            fronts[0].push(p);
        }
    }

    let mut i = 0;
    while !fronts[i].is_empty() {
        let mut next_front = Vec::new();
        let current = fronts[i].clone();
        for p in current {
            let dominated = population[p].dominated_solutions.clone();
            for q in dominated {
                population[q].dominator_counter -= 1;
                if population[q].dominator_counter == 0 {
                    population[q].rank = i + 2;
                    next_front.push(q);
                }
            }
        }
        i += 1;
        fronts.push(next_front);
    }
    if fronts.last().is_some_and(Vec::is_empty) {
        fronts.pop();
    }
    fronts
}

fn objective(score: &(f64, f64), which: usize) -> f64 {
    if which == 0 {
        score.0
    } else {
        score.1
    }
}

/// Sets `crowding_distance` for every individual named in `front`.
/// Boundary individuals (extreme on either objective) get infinite
/// distance so truncation never discards them ahead of an interior point.
pub fn crowding_distance(population: &mut [Individual], front: &[usize]) {
    for &i in front {
        population[i].crowding_distance = 0.0;
    }
    let m = front.len();
    if m == 0 {
        return;
    }
    if m == 1 {
        population[front[0]].crowding_distance = f64::INFINITY;
        return;
    }

    for objective_index in 0..2 {
        let mut sorted = front.to_vec();
        sorted.sort_by(|&a, &b| {
            objective(&population[a].score, objective_index)
                .partial_cmp(&objective(&population[b].score, objective_index))
                .expect("objective values must be finite")
        });

        population[sorted[0]].crowding_distance = f64::INFINITY;
        population[sorted[m - 1]].crowding_distance = f64::INFINITY;

        let lo = objective(&population[sorted[0]].score, objective_index);
        let hi = objective(&population[sorted[m - 1]].score, objective_index);
        let span = hi - lo;
        if span <= 0.0 {
            continue;
        }

        for idx in 1..m - 1 {
            let next = objective(&population[sorted[idx + 1]].score, objective_index);
            let prev = objective(&population[sorted[idx - 1]].score, objective_index);
            population[sorted[idx]].crowding_distance += (next - prev) / span;
        }
    }
}

/// Orders a front by descending crowding distance, for boundary-front
/// truncation.
pub fn sort_by_crowding_desc(population: &[Individual], front: &[usize]) -> Vec<usize> {
    let mut sorted = front.to_vec();
    sorted.sort_by(|&a, &b| {
        population[b]
            .crowding_distance
            .partial_cmp(&population[a].crowding_distance)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted
}

/// The NSGA-II driver: generational mutation-only variation, combined-front
/// non-dominated sorting, and crowding-distance truncation back to a fixed
/// population size.
pub struct Nsga2 {
    config: Nsga2Config,
    system: Arc<System>,
    baseline_activities: Vec<Activity>,
    dominance: Dominance,
}

impl Nsga2 {
    pub fn new(system: Arc<System>, baseline_activities: Vec<Activity>, config: Nsga2Config) -> Self {
        Self {
            config,
            system,
            baseline_activities,
            dominance: strict_dominance,
        }
    }

    /// Overrides the dominance predicate used for non-dominated sorting.
    /// Defaults to [`strict_dominance`].
    pub fn with_dominance(mut self, dominance: Dominance) -> Self {
        self.dominance = dominance;
        self
    }

    /// Runs the full generational loop and returns the population recorded
    /// after each generation (including the seed population at index 0).
    pub fn run(&self) -> PmResult<Vec<Vec<Individual>>> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut population = self.generate_initial_population(&mut rng);
        let seed_fronts = fast_non_dominated_sort(&mut population, self.dominance);
        for front in &seed_fronts {
            crowding_distance(&mut population, front);
        }
        let mut history = vec![population.clone()];

        for generation in 0..self.config.n_generations {
            tracing::info!(
                generation = generation + 1,
                total_generations = self.config.n_generations,
                population_size = population.len(),
                "running NSGA-II generation"
            );

            let offspring = self.mutate_population(&population, &mut rng);
            let mut combined: Vec<Individual> = population.into_iter().chain(offspring).collect();
            let fronts = fast_non_dominated_sort(&mut combined, self.dominance);

            let mut next_population = Vec::with_capacity(self.config.init_pop_size);
            for front in &fronts {
                crowding_distance(&mut combined, front);
                if next_population.len() + front.len() <= self.config.init_pop_size {
                    for &idx in front {
                        next_population.push(combined[idx].clone());
                    }
                    if next_population.len() == self.config.init_pop_size {
                        break;
                    }
                } else {
                    let ordered = sort_by_crowding_desc(&combined, front);
                    let remaining = self.config.init_pop_size - next_population.len();
                    for idx in ordered.into_iter().take(remaining) {
                        next_population.push(combined[idx].clone());
                    }
                    break;
                }
            }

            if next_population.len() != self.config.init_pop_size {
                return Err(PmError::InvariantViolation(format!(
                    "expected {} individuals after truncation, got {}",
                    self.config.init_pop_size,
                    next_population.len()
                )));
            }

            population = next_population;
            history.push(population.clone());
        }

        Ok(history)
    }

    fn generate_initial_population(&self, rng: &mut StdRng) -> Vec<Individual> {
        let seed_count = self.config.init_pop_size.saturating_sub(1);
        let seeds: Vec<u64> = (0..seed_count).map(|_| rng.gen()).collect();

        let build = |seed: u64| -> Individual {
            let mut local_rng = StdRng::seed_from_u64(seed);
            let init = PopulationInit { system: &self.system, activities: &self.baseline_activities };
            let grouping = init.generate(&mut local_rng);
            let activities = self.baseline_activities.clone();
            let plan = Plan::from_grouping(activities, Arc::clone(&self.system), grouping);
            Individual::new(plan)
        };

        let mut population: Vec<Individual> = if self.config.parallel {
            seeds.par_iter().map(|&s| build(s)).collect()
        } else {
            seeds.iter().map(|&s| build(s)).collect()
        };

        let singleton_seed: u64 = rng.gen();
        let mut singleton_rng = StdRng::seed_from_u64(singleton_seed);
        let init = PopulationInit { system: &self.system, activities: &self.baseline_activities };
        let grouping = init.canonical_singleton(&mut singleton_rng);
        let plan = Plan::from_grouping(
            self.baseline_activities.clone(),
            Arc::clone(&self.system),
            grouping,
        );
        population.push(Individual::new(plan));

        population
    }

    fn mutate_population(&self, population: &[Individual], rng: &mut StdRng) -> Vec<Individual> {
        let seeds: Vec<u64> = (0..population.len()).map(|_| rng.gen()).collect();
        let mutator = Mutator { system: &self.system };

        let build = |individual: &Individual, seed: u64| -> Individual {
            let mut local_rng = StdRng::seed_from_u64(seed);
            let grouping = mutator.mutate(
                &individual.plan.grouping,
                &individual.plan.activities,
                self.config.p_mutation,
                &mut local_rng,
            );
            let activities = individual.plan.activities.clone();
            let plan = Plan::from_grouping(activities, Arc::clone(&self.system), grouping);
            Individual::new(plan)
        };

        if self.config.parallel {
            population
                .par_iter()
                .zip(seeds.par_iter())
                .map(|(individual, &seed)| build(individual, seed))
                .collect()
        } else {
            population
                .iter()
                .zip(seeds.iter())
                .map(|(individual, &seed)| build(individual, seed))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::individual::strict_dominance;

    fn individual(lf: f64, ic: f64) -> Individual {
        // Individual::new requires a real Plan; tests here only exercise
        // sort/crowding logic, so fabricate the score directly.
        Individual {
            plan: test_plan(),
            score: (lf, ic),
            rank: 0,
            dominated_solutions: Vec::new(),
            dominator_counter: 0,
            crowding_distance: 0.0,
        }
    }

    fn test_plan() -> Plan {
        use pm_core::{Component, ComponentId, FlowNode, GroupingStructure};
        use petgraph::graph::DiGraph;

        let mut graph = DiGraph::new();
        let source = graph.add_node(FlowNode::Source);
        let c0 = graph.add_node(FlowNode::Component(0));
        let sink = graph.add_node(FlowNode::Sink);
        graph.add_edge(source, c0, f64::INFINITY);
        graph.add_edge(c0, sink, f64::INFINITY);
        let system = Arc::new(System::new(graph, vec![1.0], 1, source, sink));

        let component = Component {
            id: ComponentId(0),
            cp: 100.0,
            cc: 500.0,
            beta: 2.0,
            alpha: 10.0,
            x_star: 5.0,
            phi_star: 1.0,
        };
        let activities = vec![Activity::new(component, 5.0, 1.0)];
        let grouping = GroupingStructure::singleton(1, vec![0]);
        Plan::from_grouping(activities, system, grouping)
    }

    #[test]
    fn single_front_contains_mutually_non_dominated_points() {
        let mut population = vec![individual(1.0, 5.0), individual(5.0, 1.0), individual(3.0, 3.0)];
        let fronts = fast_non_dominated_sort(&mut population, strict_dominance);
        assert_eq!(fronts.len(), 1);
        assert_eq!(fronts[0].len(), 3);
    }

    #[test]
    fn dominated_point_lands_in_second_front() {
        let mut population = vec![individual(1.0, 1.0), individual(2.0, 2.0)];
        let fronts = fast_non_dominated_sort(&mut population, strict_dominance);
        assert_eq!(fronts, vec![vec![0], vec![1]]);
    }

    #[test]
    fn boundary_points_get_infinite_crowding_distance() {
        let mut population = vec![individual(1.0, 5.0), individual(3.0, 3.0), individual(5.0, 1.0)];
        let front = vec![0, 1, 2];
        crowding_distance(&mut population, &front);
        assert_eq!(population[0].crowding_distance, f64::INFINITY);
        assert_eq!(population[2].crowding_distance, f64::INFINITY);
        assert!(population[1].crowding_distance.is_finite());
    }
}

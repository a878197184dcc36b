use std::collections::HashSet;

use pm_core::{Activity, GroupingStructure, System};
use rand::Rng;

/// Generates random feasible grouping structures for seeding the initial
/// population.
///
/// `activities` supplies the nominal (un-minimized) dates and durations
/// used for the date-range compatibility checks during slot assignment;
/// it is read-only here.
pub struct PopulationInit<'a> {
    pub system: &'a System,
    pub activities: &'a [Activity],
}

impl<'a> PopulationInit<'a> {
    /// Assigns each activity a time slot via sequential random placement:
    /// for activity `i`, sample candidate slots uniformly from the set of
    /// slots with spare resource capacity, retrying with the remaining
    /// candidates until one whose current members' windows are compatible
    /// with activity `i` is found.
    ///
    /// At least one candidate is always compatible (a slot with no current
    /// members accepts any single activity), so the retry loop always
    /// terminates.
    pub fn generate_slot_assignment(&self, rng: &mut impl Rng) -> Vec<usize> {
        let n = self.activities.len();
        let mut slot = vec![0usize; n];
        let mut slot_members: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut open_slots: HashSet<usize> = (0..n).collect();

        for i in 0..n {
            let mut candidates: Vec<usize> = open_slots.iter().copied().collect();
            let chosen = loop {
                let pick = rng.gen_range(0..candidates.len());
                let j = candidates[pick];
                if self.compatible(&slot_members[j], i) {
                    break j;
                }
                candidates.swap_remove(pick);
            };

            slot[i] = chosen;
            slot_members[chosen].push(i);
            if slot_members[chosen].len() >= self.system.resources {
                open_slots.remove(&chosen);
            }
        }

        slot
    }

    fn compatible(&self, members: &[usize], candidate: usize) -> bool {
        let max_end = members
            .iter()
            .chain(std::iter::once(&candidate))
            .map(|&k| self.activities[k].t + self.activities[k].d)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_begin = members
            .iter()
            .chain(std::iter::once(&candidate))
            .map(|&k| self.activities[k].t)
            .fold(f64::INFINITY, f64::min);
        max_end >= min_begin
    }

    /// Lifts a slot assignment to a full grouping structure by sampling an
    /// independent uniform resource index per activity.
    pub fn lift_to_resources(&self, slot: Vec<usize>, rng: &mut impl Rng) -> GroupingStructure {
        let resource = (0..slot.len())
            .map(|_| rng.gen_range(0..self.system.resources))
            .collect();
        GroupingStructure::new(slot, resource)
    }

    /// Generates one random feasible grouping structure.
    pub fn generate(&self, rng: &mut impl Rng) -> GroupingStructure {
        let slot = self.generate_slot_assignment(rng);
        self.lift_to_resources(slot, rng)
    }

    /// The canonical individual: every activity in its own slot. Injected
    /// into every initial population as an anchor against which mutated
    /// descendants are judged.
    pub fn canonical_singleton(&self, rng: &mut impl Rng) -> GroupingStructure {
        let n = self.activities.len();
        let resource = (0..n).map(|_| rng.gen_range(0..self.system.resources)).collect();
        GroupingStructure::singleton(n, resource)
    }
}

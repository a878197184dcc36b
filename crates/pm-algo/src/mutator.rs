use pm_core::{Activity, Group, GroupingStructure, System};
use rand::Rng;

/// Per-component random regrouping. Each activity is independently
/// reassigned to a new slot with probability `p_mutation`, subject to
/// resource-capacity and feasibility constraints against the group it
/// would join.
pub struct Mutator<'a> {
    pub system: &'a System,
}

impl<'a> Mutator<'a> {
    /// Produces a mutated grouping structure. `activities` must reflect the
    /// parent plan's current (already Newton-minimized) dates: feasibility
    /// of a candidate new group is judged against those dates, not the
    /// original nominal ones.
    pub fn mutate(
        &self,
        grouping: &GroupingStructure,
        activities: &[Activity],
        p_mutation: f64,
        rng: &mut impl Rng,
    ) -> GroupingStructure {
        let n = grouping.len();
        let mut slot = grouping.slot.clone();
        let mut resource = grouping.resource.clone();

        for i in 0..n {
            if !rng.gen_bool(p_mutation) {
                continue;
            }
            let current_slot = slot[i];

            let candidates: Vec<usize> = (0..n)
                .filter(|&j| j != current_slot)
                .filter(|&j| self.slot_size(&slot, j) < self.system.resources)
                .filter(|&j| self.would_be_feasible(&slot, j, i, activities))
                .collect();

            if candidates.is_empty() {
                // No compatible destination this round; leave unchanged.
                continue;
            }

            let j = candidates[rng.gen_range(0..candidates.len())];
            slot[i] = j;
            resource[i] = rng.gen_range(0..self.system.resources);
        }

        GroupingStructure::new(slot, resource)
    }

    fn slot_size(&self, slot: &[usize], target: usize) -> usize {
        slot.iter().filter(|&&j| j == target).count()
    }

    fn would_be_feasible(&self, slot: &[usize], target: usize, candidate: usize, activities: &[Activity]) -> bool {
        let mut members: Vec<usize> = slot
            .iter()
            .enumerate()
            .filter(|&(_, &j)| j == target)
            .map(|(k, _)| k)
            .collect();
        members.push(candidate);
        Group::new(members).is_feasible(activities)
    }
}

/// A maintenance grouping: for each activity, which time slot and which
/// resource (crew) it is assigned to.
///
/// The original tensor formulation (`X[i, j, r]`, a 3-D binary tensor over
/// component, slot, and resource) is equivalent to this pair of dense
/// vectors whenever every component is assigned to exactly one slot and one
/// resource, which every operation in this crate maintains as an invariant.
/// The dense form avoids allocating and scanning an `N * N * R` tensor on
/// every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupingStructure {
    /// `slot[i]` is the time slot assigned to activity `i`.
    pub slot: Vec<usize>,
    /// `resource[i]` is the resource (crew) assigned to activity `i`.
    pub resource: Vec<usize>,
}

impl GroupingStructure {
    pub fn new(slot: Vec<usize>, resource: Vec<usize>) -> Self {
        debug_assert_eq!(slot.len(), resource.len());
        Self { slot, resource }
    }

    pub fn len(&self) -> usize {
        self.slot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_empty()
    }

    /// The assignment with every activity in its own slot.
    pub fn singleton(n: usize, resource: Vec<usize>) -> Self {
        Self::new((0..n).collect(), resource)
    }

    /// Partitions activity indices by shared slot, in ascending slot order,
    /// dropping empty slots.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let n = self.slot.len();
        let mut by_slot: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (i, &j) in self.slot.iter().enumerate() {
            by_slot[j].push(i);
        }
        by_slot.into_iter().filter(|g| !g.is_empty()).collect()
    }

    /// Current number of activities occupying `slot`.
    pub fn slot_size(&self, slot: usize) -> usize {
        self.slot.iter().filter(|&&j| j == slot).count()
    }
}

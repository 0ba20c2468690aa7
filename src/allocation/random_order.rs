//! Random-order greedy allocation.
//!
//! # Algorithm
//!
//! 1. Shuffle the applicants into a uniformly random permutation.
//! 2. For each applicant in that order, reserve the first requested slot
//!    (in preference order) nobody has claimed yet.
//!
//! Processing order is the only source of bias; randomizing it keeps
//! early-generated applicants from being favored systematically.
//!
//! # Complexity
//! O(n * k) expected, where n = applicants, k = requests per applicant.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::debug;

use super::{clear_reservations, AllocationStrategy};
use crate::models::{count_unresolved, Applicant, Slot, SlotSpace};

/// Greedy allocation in a uniformly random applicant order.
///
/// Leaves `applicants` in the shuffled order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOrder;

impl AllocationStrategy for RandomOrder {
    fn name(&self) -> &'static str {
        "RandomOrder"
    }

    fn allocate(
        &self,
        _space: &SlotSpace,
        applicants: &mut [Applicant],
        rng: &mut dyn RngCore,
    ) -> usize {
        clear_reservations(applicants);
        applicants.shuffle(rng);
        debug!(applicants = applicants.len(), "shuffled applicants");

        let mut claimed: HashSet<Slot> = HashSet::new();
        for applicant in applicants.iter_mut() {
            let free = applicant
                .requested
                .iter()
                .copied()
                .find(|slot| !claimed.contains(slot));
            if let Some(slot) = free {
                claimed.insert(slot);
                applicant.reserve(slot);
            }
        }

        count_unresolved(applicants)
    }

    fn description(&self) -> &'static str {
        "Random-Order Greedy"
    }
}

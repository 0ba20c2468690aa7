//! Scarcity-first greedy allocation.
//!
//! # Algorithm
//!
//! 1. Map every requested slot value to its requesters, in applicant order.
//! 2. Stable-sort the slots by requester count, ascending. Ties keep the
//!    order in which slots were first requested.
//! 3. Walk the slots in that order and grant each slot to its first
//!    requester that holds no reservation yet. A slot is granted at most once.
//!
//! A slot requested by a single applicant is therefore never lost to a
//! contested slot processed earlier: the requester either already holds a
//! reservation or receives this one.
//!
//! # Complexity
//! O(n * k + s log s), where s = distinct requested slots.

use indexmap::IndexMap;
use rand::RngCore;
use tracing::debug;

use super::{clear_reservations, AllocationStrategy};
use crate::models::{count_unresolved, Applicant, Slot, SlotSpace};

/// Greedy allocation that resolves the rarest slots first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScarcityFirst;

impl ScarcityFirst {
    /// Requester lists per slot, rarest first.
    ///
    /// An applicant that requests the same slot twice appears twice in that
    /// slot's list.
    pub fn requesters_by_scarcity(applicants: &[Applicant]) -> IndexMap<Slot, Vec<usize>> {
        let mut requesters: IndexMap<Slot, Vec<usize>> = IndexMap::new();
        for (idx, applicant) in applicants.iter().enumerate() {
            for &slot in &applicant.requested {
                requesters.entry(slot).or_default().push(idx);
            }
        }
        requesters.sort_by(|_, a, _, b| a.len().cmp(&b.len()));
        requesters
    }
}

impl AllocationStrategy for ScarcityFirst {
    fn name(&self) -> &'static str {
        "ScarcityFirst"
    }

    fn allocate(
        &self,
        _space: &SlotSpace,
        applicants: &mut [Applicant],
        _rng: &mut dyn RngCore,
    ) -> usize {
        clear_reservations(applicants);
        let requesters = Self::requesters_by_scarcity(applicants);
        debug!(slots = requesters.len(), "sorted slots by requester count");

        for (&slot, list) in &requesters {
            if let Some(&idx) = list.iter().find(|&&idx| !applicants[idx].is_resolved()) {
                applicants[idx].reserve(slot);
            }
        }

        count_unresolved(applicants)
    }

    fn description(&self) -> &'static str {
        "Scarcity-First Greedy"
    }
}

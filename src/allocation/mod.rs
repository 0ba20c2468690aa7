//! Allocation strategies.
//!
//! Every strategy takes a slot space and a mutable applicant list, sets
//! each applicant's `reserved` field to at most one of its requested
//! slots, and returns the number of applicants left without one. No slot
//! value is ever granted to two applicants in the same run.
//!
//! | Strategy | Order of decisions |
//! |----------|--------------------|
//! | [`RandomOrder`] | Applicants in a uniformly random permutation |
//! | [`ScarcityFirst`] | Slots from fewest to most requesters |
//! | [`ConflictGraphGreedy`] | Depth-first over the seed node's conflict component |
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use u_reserve::allocation::{AllocationStrategy, ScarcityFirst};
//! use u_reserve::models::{Applicant, Slot, SlotSpace};
//!
//! let space = SlotSpace::new(0, 9).unwrap();
//! let mut applicants = vec![
//!     Applicant::new("a", space, vec![Slot(1), Slot(2)]),
//!     Applicant::new("b", space, vec![Slot(1)]),
//! ];
//! let mut rng = ChaCha8Rng::seed_from_u64(0);
//! let unresolved = ScarcityFirst.allocate(&space, &mut applicants, &mut rng);
//! assert_eq!(unresolved, 0);
//! ```

mod coloring;
mod random_order;
mod scarcity;

pub use coloring::{ConflictGraph, ConflictGraphGreedy};
pub use random_order::RandomOrder;
pub use scarcity::ScarcityFirst;

use std::fmt::{self, Debug};
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::AllocError;
use crate::models::{Applicant, SlotSpace};

/// A one-shot allocation heuristic.
///
/// Implementations mutate `applicants` in place and return the unresolved
/// count. Leaving an applicant unresolved is a normal outcome, never an
/// error. Any reservations present on entry are cleared first.
pub trait AllocationStrategy: Send + Sync + Debug {
    /// Strategy name used in reports.
    fn name(&self) -> &'static str;

    /// Allocates slots and returns how many applicants got none.
    fn allocate(
        &self,
        space: &SlotSpace,
        applicants: &mut [Applicant],
        rng: &mut dyn RngCore,
    ) -> usize;

    /// Strategy description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Built-in strategy selector, used by configuration and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    RandomOrder,
    ScarcityFirst,
    ConflictGraphGreedy,
}

impl StrategyKind {
    /// All built-in strategies in comparison order.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::RandomOrder,
        StrategyKind::ScarcityFirst,
        StrategyKind::ConflictGraphGreedy,
    ];

    /// Instantiates the strategy.
    pub fn build(self) -> Box<dyn AllocationStrategy> {
        match self {
            StrategyKind::RandomOrder => Box::new(RandomOrder),
            StrategyKind::ScarcityFirst => Box::new(ScarcityFirst),
            StrategyKind::ConflictGraphGreedy => Box::new(ConflictGraphGreedy),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            StrategyKind::RandomOrder => "random_order",
            StrategyKind::ScarcityFirst => "scarcity_first",
            StrategyKind::ConflictGraphGreedy => "conflict_graph_greedy",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = AllocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "random_order" | "random" => Ok(StrategyKind::RandomOrder),
            "scarcity_first" | "prefer_sparse" | "scarcity" => Ok(StrategyKind::ScarcityFirst),
            "conflict_graph_greedy" | "graph_coloring" | "coloring" => {
                Ok(StrategyKind::ConflictGraphGreedy)
            }
            _ => Err(AllocError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Clears every reservation so a strategy starts from a clean slate.
fn clear_reservations(applicants: &mut [Applicant]) {
    for applicant in applicants.iter_mut() {
        applicant.reserved = None;
    }
}

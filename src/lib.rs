//! One-shot slot allocation for the U-Engine ecosystem.
//!
//! A fixed set of discrete slots drawn from a bounded range is shared out
//! among applicants that each pre-declared a few acceptable slots. Several
//! greedy heuristics are run on identical inputs and compared by the
//! fraction of applicants left without a slot.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Slot`, `SlotSpace`, `Applicant`
//! - **`generator`**: Random scenario generation
//! - **`allocation`**: `AllocationStrategy` and the built-in heuristics
//!   (`RandomOrder`, `ScarcityFirst`, `ConflictGraphGreedy`)
//! - **`harness`**: Strategy comparison and reports
//! - **`validation`**: Scenario and allocation integrity checks
//! - **`config`**: Serializable simulation parameters
//!
//! # Scope
//!
//! Not a fairness-guaranteeing allocator and not an optimal coloring
//! solver. Each run computes one batch assignment and measures its quality
//! afterwards.
//!
//! # References
//!
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22
//! - Welsh & Powell (1967), "An upper bound for the chromatic number of a
//!   graph and its application to timetabling problems"

pub mod allocation;
pub mod config;
pub mod error;
pub mod generator;
pub mod harness;
pub mod models;
pub mod validation;

pub use error::{AllocError, Result};

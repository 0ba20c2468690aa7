//! Simulation harness and reporting.
//!
//! Runs every strategy against the same generated scenario, each on its
//! own copy of the applicant list, and reports unresolved counts in the
//! order the strategies were given.
//!
//! # Reports
//!
//! - [`ComparisonReport`]: unresolved count and percentage per strategy
//! - [`TrialSummary`]: means over independent scenarios
//! - [`AllocationReport`]: reservation table for a single run

mod report;
mod runner;
mod table;

pub use report::{ComparisonReport, StrategyResult, TrialRow, TrialSummary};
pub use runner::{run_strategy, Harness};
pub use table::{AllocationReport, ReservationRow};

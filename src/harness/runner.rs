//! Strategy comparison runner.
//!
//! # Algorithm
//!
//! 1. Generate one scenario (or take one supplied by the caller).
//! 2. For each strategy, in the order given, allocate on a fresh copy of
//!    the applicant list and time the call.
//! 3. Validate the resulting reservations and record the unresolved count.
//!
//! The slot space is shared read-only; only applicant lists are copied.

use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use tracing::{debug, info, warn};

use super::report::{ComparisonReport, StrategyResult, TrialSummary};
use crate::allocation::{AllocationStrategy, StrategyKind};
use crate::config::SimulationConfig;
use crate::error::{AllocError, Result};
use crate::generator::{GeneratorConfig, Scenario};
use crate::models::{Applicant, SlotSpace};
use crate::validation::{only_duplicate_ids, validate_allocation, validate_scenario};

/// Runs several strategies against identical scenarios.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_reserve::allocation::{RandomOrder, ScarcityFirst};
/// use u_reserve::generator::GeneratorConfig;
/// use u_reserve::harness::Harness;
/// use u_reserve::models::SlotSpace;
///
/// let harness = Harness::new(SlotSpace::new(0, 150).unwrap(), GeneratorConfig::new(60))
///     .with_strategy(RandomOrder)
///     .with_strategy(ScarcityFirst);
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let report = harness.compare(&mut rng).unwrap();
/// assert_eq!(report.results.len(), 2);
/// assert_eq!(report.results[0].name, "RandomOrder");
/// ```
#[derive(Debug, Clone)]
pub struct Harness {
    space: SlotSpace,
    generator: GeneratorConfig,
    strategies: Vec<Arc<dyn AllocationStrategy>>,
}

impl Harness {
    /// Creates a harness with no strategies.
    pub fn new(space: SlotSpace, generator: GeneratorConfig) -> Self {
        Self {
            space,
            generator,
            strategies: Vec::new(),
        }
    }

    /// Creates a harness from a configuration.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.space()?, config.generator()).with_kinds(&config.strategies))
    }

    /// Appends a strategy.
    pub fn with_strategy<S: AllocationStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategies.push(Arc::new(strategy));
        self
    }

    /// Appends built-in strategies.
    pub fn with_kinds(mut self, kinds: &[StrategyKind]) -> Self {
        self.strategies
            .extend(kinds.iter().map(|kind| Arc::from(kind.build())));
        self
    }

    /// Slot space shared by every run.
    pub fn space(&self) -> SlotSpace {
        self.space
    }

    /// Strategy names in run order.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Generates a scenario for this harness.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Scenario> {
        Scenario::generate(self.space, self.generator, rng)
    }

    /// Generates one scenario and runs every strategy on it.
    pub fn compare<R: Rng>(&self, rng: &mut R) -> Result<ComparisonReport> {
        let scenario = self.generate(rng)?;
        info!(
            space = %self.space,
            applicants = scenario.len(),
            "generated scenario"
        );
        self.run_scenario(&scenario, rng)
    }

    /// Runs every strategy on `scenario`, each on its own applicant copy.
    pub fn run_scenario<R: Rng>(
        &self,
        scenario: &Scenario,
        rng: &mut R,
    ) -> Result<ComparisonReport> {
        if scenario.is_empty() {
            return Err(AllocError::InvalidCount(
                "scenario has no applicants".into(),
            ));
        }
        check_scenario(scenario)?;

        let mut results = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            let (result, _) = run_strategy(strategy.as_ref(), scenario, rng)?;
            results.push(result);
        }

        Ok(ComparisonReport {
            space: scenario.space,
            applicants: scenario.len(),
            results,
        })
    }

    /// Runs `trials` independent scenarios and summarizes them.
    pub fn compare_trials<R: Rng>(&self, trials: usize, rng: &mut R) -> Result<TrialSummary> {
        if trials == 0 {
            return Err(AllocError::InvalidCount("trial count must be positive".into()));
        }
        let mut reports = Vec::with_capacity(trials);
        for trial in 0..trials {
            debug!(trial, "starting trial");
            reports.push(self.compare(rng)?);
        }
        Ok(TrialSummary::from_reports(&reports))
    }
}

/// Runs one strategy on a fresh copy of the scenario's applicants.
///
/// Returns the result line and the allocated applicants (in whatever order
/// the strategy left them).
pub fn run_strategy<R: Rng>(
    strategy: &dyn AllocationStrategy,
    scenario: &Scenario,
    rng: &mut R,
) -> Result<(StrategyResult, Vec<Applicant>)> {
    let mut applicants = scenario.fresh_applicants();

    let started = Instant::now();
    let unresolved = strategy.allocate(&scenario.space, &mut applicants, rng);
    let elapsed = started.elapsed();

    validate_allocation(&applicants).map_err(|errors| AllocError::Validation {
        context: format!("allocation by {}", strategy.name()),
        errors,
    })?;

    let result = StrategyResult::new(strategy.name(), unresolved, applicants.len(), elapsed);
    info!(
        strategy = result.name.as_str(),
        unresolved = result.unresolved,
        percentage = result.percentage,
        elapsed_ms = result.elapsed_ms,
        "finished allocation"
    );
    Ok((result, applicants))
}

/// Rejects malformed scenarios; duplicate IDs are only logged.
fn check_scenario(scenario: &Scenario) -> Result<()> {
    match validate_scenario(&scenario.space, &scenario.applicants) {
        Ok(()) => Ok(()),
        Err(errors) if only_duplicate_ids(&errors) => {
            for e in &errors {
                warn!("{}", e.message);
            }
            Ok(())
        }
        Err(errors) => Err(AllocError::Validation {
            context: "scenario".into(),
            errors,
        }),
    }
}

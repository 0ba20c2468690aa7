//! Simulation configuration.
//!
//! Defaults reproduce the comparison rig: slot range `[0, 150]`, 60
//! applicants with 3 requests each, all built-in strategies, one trial.
//! A configuration can also be loaded from a JSON file; missing fields
//! take their default values.

use std::fs;
use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::allocation::StrategyKind;
use crate::error::{AllocError, Result};
use crate::generator::{GeneratorConfig, DEFAULT_REQUESTS_PER_APPLICANT};
use crate::models::SlotSpace;

/// Parameters of one harness invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Lowest slot value (inclusive).
    pub lo: i64,
    /// Highest slot value (inclusive).
    pub hi: i64,
    /// Number of applicants per scenario.
    pub applicants: usize,
    /// Slot draws per applicant.
    pub requests_per_applicant: usize,
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Independent scenarios to run.
    pub trials: usize,
    /// Strategies to compare, in report order.
    pub strategies: Vec<StrategyKind>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            lo: 0,
            hi: 150,
            applicants: 60,
            requests_per_applicant: DEFAULT_REQUESTS_PER_APPLICANT,
            seed: None,
            trials: 1,
            strategies: StrategyKind::ALL.to_vec(),
        }
    }
}

impl SimulationConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Sets the slot range.
    pub fn with_range(mut self, lo: i64, hi: i64) -> Self {
        self.lo = lo;
        self.hi = hi;
        self
    }

    /// Sets the applicant count.
    pub fn with_applicants(mut self, applicants: usize) -> Self {
        self.applicants = applicants;
        self
    }

    /// Sets the requests per applicant.
    pub fn with_requests_per_applicant(mut self, requests: usize) -> Self {
        self.requests_per_applicant = requests;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of trials.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the strategies to compare.
    pub fn with_strategies(mut self, strategies: Vec<StrategyKind>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Checks ranges and counts.
    pub fn validate(&self) -> Result<()> {
        self.space()?;
        if self.applicants == 0 {
            return Err(AllocError::InvalidCount(
                "applicant count must be positive".into(),
            ));
        }
        if self.requests_per_applicant == 0 {
            return Err(AllocError::InvalidCount(
                "requests per applicant must be positive".into(),
            ));
        }
        if self.trials == 0 {
            return Err(AllocError::InvalidCount("trial count must be positive".into()));
        }
        if self.strategies.is_empty() {
            return Err(AllocError::InvalidCount(
                "at least one strategy is required".into(),
            ));
        }
        Ok(())
    }

    /// The configured slot space.
    pub fn space(&self) -> Result<SlotSpace> {
        SlotSpace::new(self.lo, self.hi)
    }

    /// The configured scenario shape.
    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig::new(self.applicants)
            .with_requests_per_applicant(self.requests_per_applicant)
    }

    /// RNG for this run: seeded if a seed is set, otherwise from entropy.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!((config.lo, config.hi), (0, 150));
        assert_eq!(config.applicants, 60);
        assert_eq!(config.requests_per_applicant, 3);
        assert_eq!(config.trials, 1);
        assert_eq!(config.strategies, StrategyKind::ALL.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SimulationConfig::default()
            .with_range(0, 1200)
            .with_applicants(1000)
            .with_requests_per_applicant(4)
            .with_seed(42)
            .with_trials(5)
            .with_strategies(vec![StrategyKind::ScarcityFirst]);

        assert_eq!(config.space().unwrap().hi(), 1200);
        assert_eq!(config.generator().applicants, 1000);
        assert_eq!(config.generator().requests_per_applicant, 4);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.trials, 5);
        assert_eq!(config.strategies, vec![StrategyKind::ScarcityFirst]);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = SimulationConfig::default();
        assert!(matches!(
            base.clone().with_range(10, 10).validate(),
            Err(AllocError::InvalidRange { .. })
        ));
        assert!(base.clone().with_applicants(0).validate().is_err());
        assert!(base.clone().with_requests_per_applicant(0).validate().is_err());
        assert!(base.clone().with_trials(0).validate().is_err());
        assert!(base.with_strategies(vec![]).validate().is_err());
    }

    #[test]
    fn test_json_partial_fields_default() {
        let json = r#"{ "hi": 30, "seed": 7, "strategies": ["random_order", "conflict_graph_greedy"] }"#;
        let config: SimulationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.lo, 0);
        assert_eq!(config.hi, 30);
        assert_eq!(config.applicants, 60);
        assert_eq!(config.seed, Some(7));
        assert_eq!(
            config.strategies,
            vec![StrategyKind::RandomOrder, StrategyKind::ConflictGraphGreedy]
        );
    }

    #[test]
    fn test_json_roundtrip_and_file_load() {
        let config = SimulationConfig::default().with_seed(3).with_trials(2);
        let text = serde_json::to_string_pretty(&config).unwrap();

        let path = std::env::temp_dir().join(format!("u-reserve-config-{}.json", std::process::id()));
        fs::write(&path, text).unwrap();
        let loaded = SimulationConfig::from_json_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SimulationConfig::from_json_file("/nonexistent/u-reserve.json").unwrap_err();
        assert!(matches!(err, AllocError::Io(_)));
    }

    #[test]
    fn test_seeded_rng_reproducible() {
        let config = SimulationConfig::default().with_seed(99);
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}

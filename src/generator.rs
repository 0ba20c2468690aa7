//! Scenario generation.
//!
//! Produces the allocation problem instance: one slot space and a list of
//! applicants whose requests are drawn independently from it. Nothing is
//! coordinated at generation time, so contention is only discovered by the
//! allocation strategies.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::{AllocError, Result};
use crate::models::{Applicant, SlotSpace};

/// Requests drawn per applicant when not configured otherwise.
pub const DEFAULT_REQUESTS_PER_APPLICANT: usize = 3;

/// Shape of a generated scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of applicants.
    pub applicants: usize,
    /// Independent slot draws per applicant.
    pub requests_per_applicant: usize,
}

impl GeneratorConfig {
    /// Creates a config with the default number of requests per applicant.
    pub fn new(applicants: usize) -> Self {
        Self {
            applicants,
            requests_per_applicant: DEFAULT_REQUESTS_PER_APPLICANT,
        }
    }

    /// Sets the number of requests per applicant.
    pub fn with_requests_per_applicant(mut self, requests: usize) -> Self {
        self.requests_per_applicant = requests;
        self
    }

    fn check(&self) -> Result<()> {
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
        Ok(())
    }
}

/// One allocation problem instance.
///
/// Strategies never receive the scenario's own applicant list; they work
/// on [`Scenario::fresh_applicants`] so reservations cannot leak between
/// runs.
#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub space: SlotSpace,
    pub applicants: Vec<Applicant>,
}

impl Scenario {
    /// Wraps an explicit applicant list.
    pub fn new(space: SlotSpace, applicants: Vec<Applicant>) -> Self {
        Self { space, applicants }
    }

    /// Generates a random scenario.
    ///
    /// # Errors
    /// [`AllocError::InvalidCount`] if either count in `config` is zero.
    pub fn generate<R: Rng + ?Sized>(
        space: SlotSpace,
        config: GeneratorConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.check()?;
        let applicants = (0..config.applicants)
            .map(|_| Applicant::random(space, config.requests_per_applicant, rng))
            .collect();
        debug!(
            space = %space,
            applicants = config.applicants,
            requests = config.requests_per_applicant,
            "generated scenario"
        );
        Ok(Self { space, applicants })
    }

    /// Independent copy of the applicant list with every reservation cleared.
    pub fn fresh_applicants(&self) -> Vec<Applicant> {
        self.applicants
            .iter()
            .map(|a| Applicant {
                reserved: None,
                ..a.clone()
            })
            .collect()
    }

    /// Number of applicants.
    pub fn len(&self) -> usize {
        self.applicants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applicants.is_empty()
    }
}

/// Generates `count` applicants with [`DEFAULT_REQUESTS_PER_APPLICANT`]
/// requests each.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_reserve::generator::generate_applicants;
/// use u_reserve::models::SlotSpace;
///
/// let space = SlotSpace::new(0, 1200).unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let applicants = generate_applicants(10, space, &mut rng).unwrap();
/// assert_eq!(applicants.len(), 10);
/// assert!(applicants.iter().all(|a| a.requested.len() == 3));
/// ```
pub fn generate_applicants<R: Rng + ?Sized>(
    count: usize,
    space: SlotSpace,
    rng: &mut R,
) -> Result<Vec<Applicant>> {
    Scenario::generate(space, GeneratorConfig::new(count), rng).map(|s| s.applicants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slot;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_generate_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let space = SlotSpace::new(0, 150).unwrap();
        let config = GeneratorConfig::new(60).with_requests_per_applicant(5);
        let scenario = Scenario::generate(space, config, &mut rng).unwrap();

        assert_eq!(scenario.len(), 60);
        for a in &scenario.applicants {
            assert_eq!(a.requested.len(), 5);
            assert_eq!(a.space, space);
            assert!(a.requested.iter().all(|s| space.contains(*s)));
            assert!(a.reserved.is_none());
        }
    }

    #[test]
    fn test_generate_is_seed_deterministic() {
        let space = SlotSpace::new(0, 1200).unwrap();
        let a = generate_applicants(20, space, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let b = generate_applicants(20, space, &mut ChaCha8Rng::seed_from_u64(9)).unwrap();
        let ids_a: Vec<_> = a.iter().map(|x| x.id.clone()).collect();
        let ids_b: Vec<_> = b.iter().map(|x| x.id.clone()).collect();
        assert_eq!(ids_a, ids_b);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.requested, y.requested);
        }
    }

    #[test]
    fn test_zero_counts_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let space = SlotSpace::new(0, 9).unwrap();
        assert!(matches!(
            generate_applicants(0, space, &mut rng),
            Err(AllocError::InvalidCount(_))
        ));
        let config = GeneratorConfig::new(3).with_requests_per_applicant(0);
        assert!(Scenario::generate(space, config, &mut rng).is_err());
    }

    #[test]
    fn test_fresh_applicants_clears_reservations() {
        let space = SlotSpace::new(0, 9).unwrap();
        let mut applicant = Applicant::new("a", space, vec![Slot(1)]);
        applicant.reserve(Slot(1));
        let scenario = Scenario::new(space, vec![applicant]);

        let mut copy = scenario.fresh_applicants();
        assert!(copy[0].reserved.is_none());
        copy[0].reserve(Slot(1));
        // Source list untouched by mutations of the copy.
        assert_eq!(scenario.applicants[0].reserved, Some(Slot(1)));
        assert_eq!(copy[0].requested, scenario.applicants[0].requested);
    }
}

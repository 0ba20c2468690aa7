//! Applicant model.
//!
//! An applicant pre-declares a small ordered set of slots it would accept
//! and holds at most one reservation per allocation run.

use std::fmt;

use rand::Rng;
use serde::Serialize;

use super::{Slot, SlotSpace};

/// Length of generated applicant identifiers (hex characters).
pub const ID_LENGTH: usize = 6;

/// Short random applicant token.
///
/// Not guaranteed unique: collisions are possible and tolerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ApplicantId(pub String);

impl ApplicantId {
    /// Draws a random lowercase-hex token of [`ID_LENGTH`] characters.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bits = (ID_LENGTH * 4) as u32;
        let raw: u32 = rng.random_range(0..(1u32 << bits));
        Self(format!("{raw:0width$x}", width = ID_LENGTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ApplicantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ApplicantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entity competing for one slot.
#[derive(Debug, Clone, Serialize)]
pub struct Applicant {
    /// Identifier (see [`ApplicantId`] for uniqueness caveats).
    pub id: ApplicantId,
    /// Space the requests were drawn from.
    pub space: SlotSpace,
    /// Requested slots in preference order. May contain duplicates.
    pub requested: Vec<Slot>,
    /// Reservation assigned by an allocation run, if any.
    pub reserved: Option<Slot>,
}

impl Applicant {
    /// Creates an applicant with explicit requests and no reservation.
    pub fn new(id: impl Into<ApplicantId>, space: SlotSpace, requested: Vec<Slot>) -> Self {
        Self {
            id: id.into(),
            space,
            requested,
            reserved: None,
        }
    }

    /// Creates an applicant with `requests` independent draws from `space`.
    pub fn random<R: Rng + ?Sized>(space: SlotSpace, requests: usize, rng: &mut R) -> Self {
        let id = ApplicantId::random(rng);
        let requested = (0..requests).map(|_| space.pull(rng)).collect();
        Self {
            id,
            space,
            requested,
            reserved: None,
        }
    }

    /// Records a reservation.
    ///
    /// Returns `false` and leaves the applicant untouched if it already
    /// holds one.
    pub fn reserve(&mut self, slot: Slot) -> bool {
        if self.reserved.is_some() {
            return false;
        }
        self.reserved = Some(slot);
        true
    }

    /// Whether the applicant holds a reservation.
    pub fn is_resolved(&self) -> bool {
        self.reserved.is_some()
    }

    /// Whether `slot` is among the requested slots.
    pub fn requests(&self, slot: Slot) -> bool {
        self.requested.contains(&slot)
    }
}

impl fmt::Display for Applicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let requested: Vec<String> = self.requested.iter().map(|s| s.value().to_string()).collect();
        write!(f, "{}: [{}]", self.id, requested.join(", "))
    }
}

/// Number of applicants without a reservation.
pub fn count_unresolved(applicants: &[Applicant]) -> usize {
    applicants.iter().filter(|a| !a.is_resolved()).count()
}

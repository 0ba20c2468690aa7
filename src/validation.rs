//! Integrity checks for scenarios and allocation results.
//!
//! Scenario checks run before allocation and detect:
//! - Applicants with no requested slots
//! - Requested slots outside the scenario's slot space
//! - Applicants generated from a different slot space
//! - Duplicate applicant IDs (tolerated by the strategies, reported here)
//!
//! Allocation checks run after a strategy and detect:
//! - Reservations that are not among the applicant's requests
//! - The same slot reserved by more than one applicant

use std::collections::{HashMap, HashSet};

use crate::models::{Applicant, Slot, SlotSpace};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two applicants share the same ID.
    DuplicateId,
    /// An applicant requests no slots.
    EmptyRequest,
    /// A requested slot lies outside the slot space.
    SlotOutOfRange,
    /// An applicant belongs to a different slot space.
    SpaceMismatch,
    /// A reservation is not one of the applicant's requests.
    ReservationNotRequested,
    /// Two applicants hold the same slot.
    DuplicateReservation,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a scenario before allocation.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_scenario(space: &SlotSpace, applicants: &[Applicant]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for applicant in applicants {
        if !ids.insert(applicant.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate applicant ID: {}", applicant.id),
            ));
        }

        if applicant.requested.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyRequest,
                format!("Applicant '{}' requests no slots", applicant.id),
            ));
        }

        if applicant.space != *space {
            errors.push(ValidationError::new(
                ValidationErrorKind::SpaceMismatch,
                format!(
                    "Applicant '{}' belongs to space {}, expected {}",
                    applicant.id, applicant.space, space
                ),
            ));
        }

        for slot in applicant.requested.iter().filter(|s| !space.contains(**s)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SlotOutOfRange,
                format!(
                    "Applicant '{}' requests {} outside {}",
                    applicant.id, slot, space
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the reservations left by a strategy run.
pub fn validate_allocation(applicants: &[Applicant]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut holders: HashMap<Slot, &str> = HashMap::new();

    for applicant in applicants {
        let Some(slot) = applicant.reserved else {
            continue;
        };

        if !applicant.requests(slot) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ReservationNotRequested,
                format!("Applicant '{}' holds unrequested {}", applicant.id, slot),
            ));
        }

        if let Some(previous) = holders.insert(slot, applicant.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateReservation,
                format!(
                    "{} reserved by both '{}' and '{}'",
                    slot, previous, applicant.id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Whether every error is a tolerated duplicate ID.
pub fn only_duplicate_ids(errors: &[ValidationError]) -> bool {
    errors
        .iter()
        .all(|e| e.kind == ValidationErrorKind::DuplicateId)
}

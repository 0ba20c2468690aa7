//! Allocation domain models.
//!
//! Provides the data types for a one-shot slot allocation problem:
//! the slots themselves, the bounded space they come from, and the
//! applicants competing for them.
//!
//! # Domain Mappings
//!
//! | u-reserve | Appointments | Spectrum | Parking |
//! |-----------|--------------|----------|---------|
//! | Slot | Time slot | Channel | Bay |
//! | SlotSpace | Opening hours | Band | Lot |
//! | Applicant | Visitor | Station | Vehicle |

mod applicant;
mod slot;

pub use applicant::{count_unresolved, Applicant, ApplicantId, ID_LENGTH};
pub use slot::{HsvColor, Slot, SlotSpace};

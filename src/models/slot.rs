//! Slot and slot space models.
//!
//! A slot is a discrete resource unit identified by an integer value. A
//! slot space is the inclusive interval `[lo, hi]` that slots are drawn
//! from and validated against. The space owns no slots.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AllocError, Result};

/// A discrete slot identified by its value.
///
/// Value semantics: two slots with the same value are interchangeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(pub i64);

impl Slot {
    /// Returns the slot value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot {}", self.0)
    }
}

/// Inclusive integer interval `[lo, hi]` with `lo < hi`.
///
/// Read-only after construction, so it is `Copy` and shared freely
/// between strategy runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotSpace {
    lo: i64,
    hi: i64,
}

impl SlotSpace {
    /// Creates a slot space.
    ///
    /// # Errors
    /// [`AllocError::InvalidRange`] if `hi <= lo`.
    pub fn new(lo: i64, hi: i64) -> Result<Self> {
        if hi <= lo {
            return Err(AllocError::InvalidRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Lower bound (inclusive).
    pub fn lo(&self) -> i64 {
        self.lo
    }

    /// Upper bound (inclusive).
    pub fn hi(&self) -> i64 {
        self.hi
    }

    /// Number of distinct slots in the space.
    ///
    /// `u128` so that `[i64::MIN, i64::MAX]` is representable.
    pub fn len(&self) -> u128 {
        u128::from(self.hi.abs_diff(self.lo)) + 1
    }

    /// Always `false`: a valid space holds at least two slots.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `slot` lies within `[lo, hi]`.
    pub fn contains(&self, slot: Slot) -> bool {
        (self.lo..=self.hi).contains(&slot.0)
    }

    /// Draws a slot uniformly at random from `[lo, hi]`.
    ///
    /// Successive draws are independent and may repeat.
    pub fn pull<R: Rng + ?Sized>(&self, rng: &mut R) -> Slot {
        Slot(rng.random_range(self.lo..=self.hi))
    }

    /// Maps a slot onto the hue circle for display.
    ///
    /// `hue = 360 * (value - lo) / (hi - lo)` at full saturation and value.
    /// Absent or out-of-range slots map to [`HsvColor::NEUTRAL`].
    pub fn display_color(&self, slot: Option<Slot>) -> HsvColor {
        match slot {
            Some(s) if self.contains(s) => {
                let offset = s.0.abs_diff(self.lo) as f64;
                let width = self.hi.abs_diff(self.lo) as f64;
                let hue = 360.0 * offset / width;
                HsvColor {
                    hue,
                    saturation: 100.0,
                    value: 100.0,
                }
            }
            _ => HsvColor::NEUTRAL,
        }
    }
}

impl fmt::Display for SlotSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{}]", self.lo, self.hi)
    }
}

/// Hue/saturation/value triple. Hue in degrees, the others in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsvColor {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

impl HsvColor {
    /// Mid gray. Used for "no reservation" and for slots outside the space.
    pub const NEUTRAL: HsvColor = HsvColor {
        hue: 0.0,
        saturation: 0.0,
        value: 50.0,
    };
}

impl fmt::Display for HsvColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsv({:.1}, {:.0}, {:.0})",
            self.hue, self.saturation, self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_invalid_range_rejected() {
        assert!(matches!(
            SlotSpace::new(5, 5),
            Err(AllocError::InvalidRange { lo: 5, hi: 5 })
        ));
        assert!(SlotSpace::new(10, 0).is_err());
        assert!(SlotSpace::new(0, 1).is_ok());
    }

    #[test]
    fn test_pull_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for (lo, hi) in [(0, 1), (0, 9), (-50, 50), (1000, 1003)] {
            let space = SlotSpace::new(lo, hi).unwrap();
            for _ in 0..500 {
                let slot = space.pull(&mut rng);
                assert!(lo <= slot.value() && slot.value() <= hi);
            }
        }
    }

    #[test]
    fn test_pull_reaches_both_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let space = SlotSpace::new(0, 2).unwrap();
        let draws: Vec<Slot> = (0..200).map(|_| space.pull(&mut rng)).collect();
        assert!(draws.contains(&Slot(0)));
        assert!(draws.contains(&Slot(2)));
    }

    #[test]
    fn test_len_and_contains() {
        let space = SlotSpace::new(-2, 2).unwrap();
        assert_eq!(space.len(), 5);
        assert!(space.contains(Slot(-2)));
        assert!(space.contains(Slot(2)));
        assert!(!space.contains(Slot(3)));
    }

    #[test]
    fn test_display_color_linear_hue() {
        let space = SlotSpace::new(0, 9).unwrap();
        assert!((space.display_color(Some(Slot(0))).hue - 0.0).abs() < 1e-10);
        assert!((space.display_color(Some(Slot(9))).hue - 360.0).abs() < 1e-10);
        let mid = SlotSpace::new(100, 200).unwrap().display_color(Some(Slot(150)));
        assert!((mid.hue - 180.0).abs() < 1e-10);
        assert!((mid.saturation - 100.0).abs() < 1e-10);
        assert!((mid.value - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_wide_range_len() {
        let space = SlotSpace::new(-6_000_000_000_000_000_000, 6_000_000_000_000_000_000).unwrap();
        assert_eq!(space.len(), 12_000_000_000_000_000_001);

        let full = SlotSpace::new(i64::MIN, i64::MAX).unwrap();
        assert_eq!(full.len(), 1u128 << 64);
        assert_eq!(full.to_string(), format!("[{}-{}]", i64::MIN, i64::MAX));
    }

    #[test]
    fn test_wide_range_display_color() {
        let space = SlotSpace::new(-6_000_000_000_000_000_000, 6_000_000_000_000_000_000).unwrap();
        assert!((space.display_color(Some(Slot(0))).hue - 180.0).abs() < 1e-6);
        assert!((space.display_color(Some(Slot(space.hi()))).hue - 360.0).abs() < 1e-6);

        let full = SlotSpace::new(i64::MIN, i64::MAX).unwrap();
        assert!((full.display_color(Some(Slot(i64::MIN))).hue - 0.0).abs() < 1e-10);
        assert!((full.display_color(Some(Slot(i64::MAX))).hue - 360.0).abs() < 1e-6);
        let mid = full.display_color(Some(Slot(0))).hue;
        assert!((mid - 180.0).abs() < 1e-6);
        assert!((0.0..=360.0).contains(&mid));
    }

    #[test]
    fn test_display_color_neutral_sentinel() {
        let space = SlotSpace::new(0, 9).unwrap();
        assert_eq!(space.display_color(None), HsvColor::NEUTRAL);
        assert_eq!(space.display_color(Some(Slot(10))), HsvColor::NEUTRAL);
        assert_eq!(space.display_color(Some(Slot(-1))), HsvColor::NEUTRAL);
    }

    #[test]
    fn test_display_formats() {
        let space = SlotSpace::new(0, 1200).unwrap();
        assert_eq!(space.to_string(), "[0-1200]");
        assert_eq!(Slot(42).to_string(), "Slot 42");
        assert_eq!(HsvColor::NEUTRAL.to_string(), "hsv(0.0, 0, 50)");
    }
}

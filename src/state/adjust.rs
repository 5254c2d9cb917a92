//! Brightness/contrast/saturation adjustment settings
//!
//! These are percentage multipliers applied as a preview on top of the
//! current snapshot. They stay "pending" until an AI edit or an export bakes
//! them into a new snapshot; they never silently carry over onto a newly
//! generated image.

use serde::{Deserialize, Serialize};

/// Neutral value for every axis: 100% = no adjustment
pub const NEUTRAL: u16 = 100;

/// Slider range per axis (values outside are a caller contract violation)
pub const MIN: u16 = 0;
pub const MAX: u16 = 200;

/// The three pending adjustment values
///
/// Each axis is an independent percentage multiplier:
/// - 0 = fully removed (black / flat gray / grayscale)
/// - 100 = untouched
/// - 200 = doubled
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustments {
    pub brightness: u16,
    pub contrast: u16,
    pub saturation: u16,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            brightness: NEUTRAL,
            contrast: NEUTRAL,
            saturation: NEUTRAL,
        }
    }
}

impl Adjustments {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff all three values are exactly 100.
    ///
    /// Neutral settings short-circuit the renderer entirely: the input
    /// snapshot is reused byte-for-byte instead of being re-encoded.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }

    /// Reset all three axes to neutral
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Multiplication factors for the filter pass (percentage / 100)
    pub(crate) fn factors(&self) -> (f32, f32, f32) {
        (
            f32::from(self.brightness) / 100.0,
            f32::from(self.contrast) / 100.0,
            f32::from(self.saturation) / 100.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let adjustments = Adjustments::default();
        assert!(adjustments.is_neutral());
        assert_eq!(adjustments.brightness, NEUTRAL);
    }

    #[test]
    fn test_non_neutral() {
        let mut adjustments = Adjustments::default();
        adjustments.brightness = 150;
        assert!(!adjustments.is_neutral());

        // 99 is not neutral either: the skip is exact-equality only
        adjustments.brightness = 99;
        assert!(!adjustments.is_neutral());
    }

    #[test]
    fn test_reset() {
        let mut adjustments = Adjustments {
            brightness: 150,
            contrast: 80,
            saturation: 0,
        };
        assert!(!adjustments.is_neutral());

        adjustments.reset();
        assert!(adjustments.is_neutral());
    }

    #[test]
    fn test_factors() {
        let adjustments = Adjustments {
            brightness: 200,
            contrast: 100,
            saturation: 0,
        };
        assert_eq!(adjustments.factors(), (2.0, 1.0, 0.0));
    }

    #[test]
    fn test_serialization() {
        let adjustments = Adjustments {
            brightness: 120,
            contrast: 90,
            saturation: 110,
        };

        let json = serde_json::to_string(&adjustments).unwrap();
        let restored: Adjustments = serde_json::from_str(&json).unwrap();

        assert_eq!(adjustments, restored);
    }
}

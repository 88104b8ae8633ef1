//! # Unit Types
//!
//! Type-safe wrappers for the areas used in fill calculations. These are
//! plain f64 newtypes so JSON serialization stays clean (just numbers).
//!
//! NEC Chapter 9 tables are published in US customary units, so areas are
//! square inches throughout. Custom conductor rows also show the mm²
//! equivalent, which makes an area typed in the wrong unit easy to spot.
//!
//! ## Example
//!
//! ```rust
//! use fill_core::units::SquareInches;
//!
//! let each = SquareInches(0.0133);
//! let bundle = each * 3.0;
//! assert!((bundle.0 - 0.0399).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Square millimeters per square inch
pub const MM2_PER_IN2: f64 = 645.16;

// ============================================================================
// Area Units
// ============================================================================

/// Area in square inches (in²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareInches(pub f64);

/// Area in square millimeters (mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMillimeters(pub f64);

impl SquareInches {
    /// Raw value in square inches
    pub fn value(self) -> f64 {
        self.0
    }

    /// Fraction of `whole` occupied by this area, as a percentage
    pub fn percent_of(self, whole: SquareInches) -> f64 {
        (self.0 / whole.0) * 100.0
    }
}

impl From<SquareInches> for SquareMillimeters {
    fn from(area: SquareInches) -> Self {
        SquareMillimeters(area.0 * MM2_PER_IN2)
    }
}

impl Mul<f64> for SquareInches {
    type Output = SquareInches;
    fn mul(self, rhs: f64) -> Self::Output {
        SquareInches(self.0 * rhs)
    }
}

impl fmt::Display for SquareInches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} in²", self.0)
    }
}

impl fmt::Display for SquareMillimeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} mm²", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_scaling() {
        let a = SquareInches(0.0133);
        assert!(((a * 2.0).0 - 0.0266).abs() < 1e-12);
        assert_eq!((a * 0.0).value(), 0.0);
    }

    #[test]
    fn test_percent_of() {
        let wires = SquareInches(0.0399);
        let conduit = SquareInches(0.304);
        assert!((wires.percent_of(conduit) - 13.125).abs() < 0.001);
    }

    #[test]
    fn test_mm2_conversion() {
        let mm2: SquareMillimeters = SquareInches(1.0).into();
        assert_eq!(mm2.0, 645.16);
        assert_eq!(SquareMillimeters::from(SquareInches(0.05)).to_string(), "32.26 mm²");
    }

    #[test]
    fn test_display() {
        assert_eq!(SquareInches(0.0133).to_string(), "0.0133 in²");
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&SquareInches(0.304)).unwrap();
        assert_eq!(json, "0.304");
    }
}

//! # NEC Conduit Fill Rules
//!
//! Maximum percent of a raceway's internal area that conductors may occupy,
//! per NEC Chapter 9, Table 1. The percentage depends only on how many
//! conductors share the raceway:
//!
//! | Conductors | Max fill |
//! |------------|----------|
//! | 1          | 53%      |
//! | 2          | 31%      |
//! | 3 or more  | 40%      |
//!
//! The two-conductor limit is the tightest because two round conductors
//! jam against each other on pulls. Miscounting conductors gives an unsafe
//! or needlessly large conduit, so the count passed here must be the sum of
//! quantities of every wire that contributed area.
//!
//! ```rust
//! use fill_core::fill_rules::fill_rule;
//!
//! assert_eq!(fill_rule(1).percent, 0.53);
//! assert_eq!(fill_rule(2).percent, 0.31);
//! assert_eq!(fill_rule(7).percent, 0.40);
//! ```

use serde::{Deserialize, Serialize};

use crate::units::SquareInches;

// ============================================================================
// NEC Code References
// ============================================================================

/// NEC Chapter 9 table references used in reports.
pub mod nec_ref {
    /// Percent of cross section of conduit and tubing for conductors
    pub const FILL_PERCENT: &str = "NEC Chapter 9, Table 1";
    /// Dimensions and percent area of conduit and tubing
    pub const CONDUIT_DIMENSIONS: &str = "NEC Chapter 9, Table 4";
    /// Dimensions of insulated conductors and fixture wires
    pub const CONDUCTOR_DIMENSIONS: &str = "NEC Chapter 9, Table 5";
}

/// Which row of Table 1 applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillRuleKind {
    SingleConductor,
    TwoConductors,
    ThreeOrMore,
}

impl FillRuleKind {
    /// Row of Table 1 for a conductor count. `count` must be at least 1.
    pub fn for_count(count: u32) -> Self {
        match count {
            1 => FillRuleKind::SingleConductor,
            2 => FillRuleKind::TwoConductors,
            _ => FillRuleKind::ThreeOrMore,
        }
    }

    /// Maximum fill as a fraction of total area
    pub fn percent(&self) -> f64 {
        match self {
            FillRuleKind::SingleConductor => 0.53,
            FillRuleKind::TwoConductors => 0.31,
            FillRuleKind::ThreeOrMore => 0.40,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            FillRuleKind::SingleConductor => "Single conductor (NEC Table 1, Chapter 9)",
            FillRuleKind::TwoConductors => "Two conductors (NEC Table 1, Chapter 9)",
            FillRuleKind::ThreeOrMore => "Three or more conductors (NEC Table 1, Chapter 9)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FillRuleKind::SingleConductor => "One conductor in raceway",
            FillRuleKind::TwoConductors => "Two conductors in raceway",
            FillRuleKind::ThreeOrMore => "Three or more conductors in raceway",
        }
    }
}

/// Applicable maximum fill for a bundle of conductors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillRule {
    pub kind: FillRuleKind,
    /// Maximum fill fraction (0.53, 0.31 or 0.40)
    pub percent: f64,
    pub reason: String,
    pub description: String,
}

impl FillRule {
    /// Maximum fill as a whole-number percentage (53, 31, 40)
    pub fn percent_display(&self) -> f64 {
        self.percent * 100.0
    }
}

impl From<FillRuleKind> for FillRule {
    fn from(kind: FillRuleKind) -> Self {
        FillRule {
            kind,
            percent: kind.percent(),
            reason: kind.reason().to_string(),
            description: kind.description().to_string(),
        }
    }
}

/// Select the fill rule for a conductor count.
///
/// # Panics
///
/// Panics if `conductor_count` is 0. A count of zero means nothing passed
/// validation, and the aggregator returns no result before this is reached.
pub fn fill_rule(conductor_count: u32) -> FillRule {
    assert!(
        conductor_count >= 1,
        "fill rule requested for zero conductors"
    );
    FillRuleKind::for_count(conductor_count).into()
}

/// Allowable conductor area in a raceway of `conduit_total` area
pub fn allowable_fill(conduit_total: SquareInches, conductor_count: u32) -> SquareInches {
    conduit_total * fill_rule(conductor_count).percent
}

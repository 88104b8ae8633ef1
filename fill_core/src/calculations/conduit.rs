//! # Conduit Resolver
//!
//! Two stateless questions about a bundle of total area `A` under fill
//! rule `p`:
//!
//! - **Find minimum**: the smallest trade size of a conduit type whose
//!   `total × p` is at least `A`.
//! - **Check fit**: whether `A` fits a chosen type and trade size.
//!
//! Both compare with `≤`, so a bundle exactly at the allowable fill
//! complies. "No size is big enough" and "that size doesn't exist" are
//! ordinary results, not errors.
//!
//! ```rust
//! use fill_core::calculations::find_minimum_conduit;
//! use fill_core::catalog::{ConduitType, TradeSize};
//! use fill_core::fill_rules::fill_rule;
//!
//! let min = find_minimum_conduit(ConduitType::Emt, 0.0399, &fill_rule(3));
//! assert_eq!(min.min_size, Some(TradeSize::Half));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{self, Catalog, ConduitArea, ConduitType, TradeSize};
use crate::fill_rules::FillRule;
use crate::units::SquareInches;

/// A conduit type and trade size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConduitSelection {
    pub conduit_type: ConduitType,
    pub size: TradeSize,
}

impl ConduitSelection {
    pub fn new(conduit_type: ConduitType, size: TradeSize) -> Self {
        ConduitSelection { conduit_type, size }
    }

    /// Whether the embedded catalog lists this combination
    pub fn exists(&self) -> bool {
        catalog::conduit_area(self.conduit_type, self.size).is_some()
    }
}

impl Default for ConduitSelection {
    fn default() -> Self {
        ConduitSelection::new(ConduitType::Emt, TradeSize::ThreeQuarter)
    }
}

impl std::fmt::Display for ConduitSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.size, self.conduit_type)
    }
}

/// Fill figures for one trade size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeFill {
    pub trade_size: TradeSize,
    /// Internal area (in²)
    pub total_in2: f64,
    /// Published 40% column (in²), reference only
    pub fill40_in2: f64,
    /// `total × rule percent` (in²)
    pub allowable_fill_in2: f64,
    /// Bundle area (in²)
    pub actual_fill_in2: f64,
    /// `actual / total × 100`
    pub fill_percentage: f64,
}

impl SizeFill {
    fn new(trade_size: TradeSize, area: ConduitArea, total_area: f64, rule: &FillRule) -> Self {
        SizeFill {
            trade_size,
            total_in2: area.total.value(),
            fill40_in2: area.fill40.value(),
            allowable_fill_in2: area.allowable(rule.percent).value(),
            actual_fill_in2: total_area,
            fill_percentage: SquareInches(total_area).percent_of(area.total),
        }
    }

    pub fn fits(&self) -> bool {
        self.actual_fill_in2 <= self.allowable_fill_in2
    }

    pub fn fill_level(&self) -> FillLevel {
        FillLevel::for_percent(self.fill_percentage)
    }
}

/// Answer to a find-minimum query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimumConduit {
    pub conduit_type: ConduitType,
    /// `None` when even the largest trade size is too small
    pub min_size: Option<TradeSize>,
    pub min_size_data: Option<SizeFill>,
}

impl MinimumConduit {
    pub fn found(&self) -> bool {
        self.min_size.is_some()
    }
}

/// Answer to a check-fit query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub conduit: ConduitSelection,
    pub conduit_area: ConduitArea,
    pub allowable_fill_in2: f64,
    pub actual_fill_in2: f64,
    pub actual_fill_percent: f64,
    pub compliant: bool,
}

impl ComplianceResult {
    /// Allowable area left over; negative when over the limit
    pub fn remaining_in2(&self) -> f64 {
        self.allowable_fill_in2 - self.actual_fill_in2
    }

    pub fn fill_level(&self) -> FillLevel {
        FillLevel::for_percent(self.actual_fill_percent)
    }
}

/// Coarse band of a fill percentage for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillLevel {
    /// At or under 40%
    Normal,
    /// Over 40%, at or under 50%
    Elevated,
    /// Over 50%
    High,
}

impl FillLevel {
    pub fn for_percent(percent: f64) -> Self {
        if percent <= 40.0 {
            FillLevel::Normal
        } else if percent <= 50.0 {
            FillLevel::Elevated
        } else {
            FillLevel::High
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FillLevel::Normal => "Normal",
            FillLevel::Elevated => "Elevated",
            FillLevel::High => "High",
        }
    }
}

fn assert_preconditions(total_area: f64, rule: &FillRule) {
    assert!(
        total_area.is_finite() && total_area >= 0.0,
        "conductor area must be finite and non-negative, got {total_area}"
    );
    assert!(
        rule.percent > 0.0 && rule.percent <= 1.0,
        "fill percent must be in (0, 1], got {}",
        rule.percent
    );
}

/// Smallest trade size of `conduit_type` that holds `total_area` in² under `rule`.
///
/// # Panics
///
/// Panics if `total_area` is negative or not finite, or if the rule's
/// percent is outside (0, 1].
pub fn find_minimum_conduit(conduit_type: ConduitType, total_area: f64, rule: &FillRule) -> MinimumConduit {
    find_minimum_with_catalog(catalog::catalog(), conduit_type, total_area, rule)
}

/// [`find_minimum_conduit`] against an explicit catalog
pub fn find_minimum_with_catalog(
    catalog: &Catalog,
    conduit_type: ConduitType,
    total_area: f64,
    rule: &FillRule,
) -> MinimumConduit {
    assert_preconditions(total_area, rule);

    // Sizes are stored ascending, so the first fit is the minimum
    let found = catalog
        .conduit_type(conduit_type)
        .sizes
        .iter()
        .map(|(size, area)| SizeFill::new(*size, *area, total_area, rule))
        .find(SizeFill::fits);

    match &found {
        Some(fill) => debug!(
            conduit = %conduit_type,
            size = %fill.trade_size,
            fill_percentage = fill.fill_percentage,
            "found minimum conduit"
        ),
        None => debug!(conduit = %conduit_type, total_area, "no trade size large enough"),
    }

    MinimumConduit {
        conduit_type,
        min_size: found.as_ref().map(|f| f.trade_size),
        min_size_data: found,
    }
}

/// Whether `total_area` in² fits the selected conduit under `rule`.
///
/// Returns `None` if the conduit type isn't made in that trade size.
///
/// # Panics
///
/// Same preconditions as [`find_minimum_conduit`].
pub fn check_fit(selection: &ConduitSelection, total_area: f64, rule: &FillRule) -> Option<ComplianceResult> {
    check_fit_with_catalog(catalog::catalog(), selection, total_area, rule)
}

/// [`check_fit`] against an explicit catalog
pub fn check_fit_with_catalog(
    catalog: &Catalog,
    selection: &ConduitSelection,
    total_area: f64,
    rule: &FillRule,
) -> Option<ComplianceResult> {
    assert_preconditions(total_area, rule);

    let Some(area) = catalog.conduit_area(selection.conduit_type, selection.size) else {
        debug!(conduit = %selection, "conduit size not offered");
        return None;
    };

    let allowable = area.allowable(rule.percent).value();
    let result = ComplianceResult {
        conduit: *selection,
        conduit_area: area,
        allowable_fill_in2: allowable,
        actual_fill_in2: total_area,
        actual_fill_percent: SquareInches(total_area).percent_of(area.total),
        compliant: total_area <= allowable,
    };

    debug!(
        conduit = %selection,
        compliant = result.compliant,
        actual_fill_percent = result.actual_fill_percent,
        "checked conduit fit"
    );
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fill_rules::{fill_rule, FillRuleKind};

    #[test]
    fn test_find_minimum_emt_half() {
        let min = find_minimum_conduit(ConduitType::Emt, 0.0399, &fill_rule(3));
        assert_eq!(min.min_size, Some(TradeSize::Half));

        let data = min.min_size_data.unwrap();
        assert!((data.allowable_fill_in2 - 0.1216).abs() < 1e-12);
        assert_eq!(data.actual_fill_in2, 0.0399);
        assert!((data.fill_percentage - 13.125).abs() < 0.01);
        assert_eq!(data.fill_level(), FillLevel::Normal);
    }

    #[test]
    fn test_find_minimum_steps_up() {
        // Just over 1/2" allowable, under 3/4" allowable (0.533 x 0.40 = 0.2132)
        let min = find_minimum_conduit(ConduitType::Emt, 0.13, &fill_rule(3));
        assert_eq!(min.min_size, Some(TradeSize::ThreeQuarter));
    }

    #[test]
    fn test_find_minimum_boundary_inclusive() {
        let rule = fill_rule(3);
        let half = catalog::conduit_area(ConduitType::Emt, TradeSize::Half).unwrap();
        let exact = half.allowable(rule.percent).value();

        let min = find_minimum_conduit(ConduitType::Emt, exact, &rule);
        assert_eq!(min.min_size, Some(TradeSize::Half));
    }

    #[test]
    fn test_find_minimum_exhausted() {
        // EMT 4" total is 14.753 in²
        let min = find_minimum_conduit(ConduitType::Emt, 10.0, &fill_rule(3));
        assert!(!min.found());
        assert_eq!(min.min_size_data, None);
        assert_eq!(min.conduit_type, ConduitType::Emt);
    }

    #[test]
    fn test_find_minimum_pvc_eb_starts_at_two_inch() {
        let min = find_minimum_conduit(ConduitType::PvcEb, 0.01, &fill_rule(3));
        assert_eq!(min.min_size, Some(TradeSize::Two));
    }

    #[test]
    fn test_zero_area_fits_smallest() {
        let min = find_minimum_conduit(ConduitType::Rmc, 0.0, &fill_rule(1));
        assert_eq!(min.min_size, Some(TradeSize::Half));
    }

    #[test]
    fn test_check_fit_single_conductor() {
        let selection = ConduitSelection::new(ConduitType::Emt, TradeSize::Half);
        let result = check_fit(&selection, 0.15, &fill_rule(1)).unwrap();

        assert!((result.allowable_fill_in2 - 0.16112).abs() < 1e-12);
        assert!(result.compliant);
        assert!((result.actual_fill_percent - 49.34).abs() < 0.01);
        assert_eq!(result.conduit, selection);
        assert_eq!(result.fill_level(), FillLevel::Elevated);
        assert!(result.remaining_in2() > 0.0);
    }

    #[test]
    fn test_check_fit_two_conductors_tighter() {
        let selection = ConduitSelection::new(ConduitType::Emt, TradeSize::Half);
        // 0.304 x 0.31 = 0.09424
        let result = check_fit(&selection, 0.1, &fill_rule(2)).unwrap();
        assert!(!result.compliant);
        assert!(result.remaining_in2() < 0.0);
    }

    #[test]
    fn test_check_fit_exact_boundary_complies() {
        let selection = ConduitSelection::new(ConduitType::Imc, TradeSize::One);
        let rule = fill_rule(5);
        let area = catalog::conduit_area(ConduitType::Imc, TradeSize::One).unwrap();
        let exact = area.total.value() * rule.percent;
        assert!(check_fit(&selection, exact, &rule).unwrap().compliant);
    }

    #[test]
    fn test_check_fit_missing_size() {
        let selection = ConduitSelection::new(ConduitType::PvcEb, TradeSize::Half);
        assert!(!selection.exists());
        assert!(check_fit(&selection, 0.05, &fill_rule(3)).is_none());
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_area_panics() {
        find_minimum_conduit(ConduitType::Emt, -0.1, &fill_rule(3));
    }

    #[test]
    #[should_panic(expected = "fill percent")]
    fn test_bad_percent_panics() {
        let mut rule: FillRule = FillRuleKind::ThreeOrMore.into();
        rule.percent = 1.5;
        let selection = ConduitSelection::default();
        check_fit(&selection, 0.1, &rule);
    }

    #[test]
    fn test_fill_levels() {
        assert_eq!(FillLevel::for_percent(0.0), FillLevel::Normal);
        assert_eq!(FillLevel::for_percent(40.0), FillLevel::Normal);
        assert_eq!(FillLevel::for_percent(40.1), FillLevel::Elevated);
        assert_eq!(FillLevel::for_percent(50.0), FillLevel::Elevated);
        assert_eq!(FillLevel::for_percent(53.0), FillLevel::High);
    }

    #[test]
    fn test_default_selection() {
        let selection = ConduitSelection::default();
        assert_eq!(selection.conduit_type, ConduitType::Emt);
        assert_eq!(selection.size, TradeSize::ThreeQuarter);
        assert!(selection.exists());
        assert_eq!(selection.to_string(), "3/4\" EMT");
    }
}

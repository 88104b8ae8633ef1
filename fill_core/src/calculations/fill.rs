//! # Fill Calculation Pipeline
//!
//! `aggregate → fill_rule → resolve`, run from scratch on every call.
//! Nothing is cached, so identical inputs always give identical output.
//!
//! ## Example
//!
//! ```rust
//! use fill_core::calculations::{calculate_fill, CalculationMode, ConduitSelection, WireEntry};
//! use fill_core::catalog::{ConduitType, TradeSize, WireRole};
//!
//! let wires = vec![
//!     WireEntry::new("w1", "THHN", "12", 2, WireRole::Phase),
//!     WireEntry::new("w2", "THHN", "12", 1, WireRole::Ground),
//! ];
//! let selection = ConduitSelection::new(ConduitType::Emt, TradeSize::ThreeQuarter);
//!
//! let result = calculate_fill(&wires, CalculationMode::FindConduit, &selection).unwrap();
//! assert_eq!(result.total_count, 3);
//! assert_eq!(result.minimum().unwrap().min_size, Some(TradeSize::Half));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::aggregate::{aggregate_with_catalog, SkippedWire, WireBreakdown};
use crate::calculations::conduit::{
    check_fit_with_catalog, find_minimum_with_catalog, ComplianceResult, ConduitSelection, MinimumConduit,
};
use crate::calculations::wire::WireEntry;
use crate::catalog::{self, Catalog, ConduitType};
use crate::fill_rules::{fill_rule, FillRule};

/// Which question the calculation answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalculationMode {
    /// Smallest trade size of the selected type
    #[default]
    FindConduit,
    /// Compliance of the selected type and size
    CheckFit,
}

impl CalculationMode {
    pub const ALL: [CalculationMode; 2] = [CalculationMode::FindConduit, CalculationMode::CheckFit];

    pub fn display_name(&self) -> &'static str {
        match self {
            CalculationMode::FindConduit => "Find Minimum Conduit",
            CalculationMode::CheckFit => "Check Conduit Fit",
        }
    }
}

/// Mode-specific part of a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FillOutcome {
    Minimum(MinimumConduit),
    Check(ComplianceResult),
}

/// Full result of a fill calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillResult {
    pub mode: CalculationMode,
    /// Sum of contributing conductor areas (in²)
    pub total_area_in2: f64,
    /// Conductors that contributed area
    pub total_count: u32,
    pub fill_rule: FillRule,
    pub breakdown: Vec<WireBreakdown>,
    pub skipped: Vec<SkippedWire>,
    pub mixed_insulation: bool,
    pub conduit_type: ConduitType,
    pub outcome: FillOutcome,
}

impl FillResult {
    /// A minimum size was found, or the checked conduit complies
    pub fn passes(&self) -> bool {
        match &self.outcome {
            FillOutcome::Minimum(min) => min.found(),
            FillOutcome::Check(check) => check.compliant,
        }
    }

    pub fn minimum(&self) -> Option<&MinimumConduit> {
        match &self.outcome {
            FillOutcome::Minimum(min) => Some(min),
            FillOutcome::Check(_) => None,
        }
    }

    pub fn compliance(&self) -> Option<&ComplianceResult> {
        match &self.outcome {
            FillOutcome::Check(check) => Some(check),
            FillOutcome::Minimum(_) => None,
        }
    }
}

/// Run the full calculation against the embedded catalog.
///
/// Returns `None` when no wire contributes area, or in check-fit mode when
/// the selected conduit isn't made in the selected size. In find-conduit
/// mode only the selection's conduit type is used.
pub fn calculate_fill(
    wires: &[WireEntry],
    mode: CalculationMode,
    selection: &ConduitSelection,
) -> Option<FillResult> {
    calculate_fill_with_catalog(catalog::catalog(), wires, mode, selection)
}

/// [`calculate_fill`] against an explicit catalog
pub fn calculate_fill_with_catalog(
    catalog: &Catalog,
    wires: &[WireEntry],
    mode: CalculationMode,
    selection: &ConduitSelection,
) -> Option<FillResult> {
    let aggregate = aggregate_with_catalog(catalog, wires)?;
    let rule = fill_rule(aggregate.total_count);
    debug!(
        count = aggregate.total_count,
        percent = rule.percent,
        ?mode,
        "selected fill rule"
    );

    let outcome = match mode {
        CalculationMode::FindConduit => FillOutcome::Minimum(find_minimum_with_catalog(
            catalog,
            selection.conduit_type,
            aggregate.total_area_in2,
            &rule,
        )),
        CalculationMode::CheckFit => FillOutcome::Check(check_fit_with_catalog(
            catalog,
            selection,
            aggregate.total_area_in2,
            &rule,
        )?),
    };

    Some(FillResult {
        mode,
        total_area_in2: aggregate.total_area_in2,
        total_count: aggregate.total_count,
        fill_rule: rule,
        breakdown: aggregate.breakdown,
        skipped: aggregate.skipped,
        mixed_insulation: aggregate.mixed_insulation,
        conduit_type: selection.conduit_type,
        outcome,
    })
}

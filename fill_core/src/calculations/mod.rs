//! # Fill Calculations
//!
//! The calculation pipeline, split into stateless stages:
//!
//! - [`expansion`] - Preset instances to concrete wire entries
//! - [`aggregate`] - Total conductor area and count, skipping invalid wires
//! - [`conduit`] - Minimum trade size or compliance of a chosen size
//! - [`fill`] - The whole pipeline behind one call
//! - [`grouping`] - Breakdown rows grouped per preset circuit for reports
//!
//! All inputs and outputs are JSON-serializable. Data-driven "no answer"
//! outcomes (no valid wires, no size big enough, size not offered) are
//! values, never errors.

pub mod aggregate;
pub mod conduit;
pub mod expansion;
pub mod fill;
pub mod grouping;
pub mod wire;

// Re-export commonly used types
pub use aggregate::{aggregate, Aggregate, SkipReason, SkippedWire, WireBreakdown};
pub use conduit::{
    check_fit, find_minimum_conduit, ComplianceResult, ConduitSelection, FillLevel, MinimumConduit, SizeFill,
};
pub use expansion::{combine_wires, expand_preset_instances};
pub use fill::{calculate_fill, CalculationMode, FillOutcome, FillResult};
pub use grouping::{group_breakdown, BreakdownGroup};
pub use wire::{PresetInstance, PresetProvenance, WireEntry, INVALID_QUANTITY};

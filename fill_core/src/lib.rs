//! # fill_core - NEC Conduit Fill Calculation Engine
//!
//! `fill_core` sizes electrical raceways under NEC Chapter 9. Given a set of
//! conductors it reports their total cross-sectional area, the fill limit
//! that applies, and either the smallest conduit that holds them or whether
//! a chosen conduit complies. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Every calculation is a pure function of its inputs
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Embedded Tables**: NEC data is compiled in and validated on first use
//! - **Results, not Errors**: "No valid wires" and "no conduit fits" are values
//!
//! ## Quick Start
//!
//! ```rust
//! use fill_core::calculations::{calculate_fill, CalculationMode, ConduitSelection, WireEntry};
//! use fill_core::catalog::{ConduitType, TradeSize, WireRole};
//!
//! let wires = vec![
//!     WireEntry::new("w1", "THHN", "12", 2, WireRole::Phase),
//!     WireEntry::new("w2", "THHN", "12", 1, WireRole::Ground),
//! ];
//! let selection = ConduitSelection::new(ConduitType::Emt, TradeSize::Half);
//!
//! let result = calculate_fill(&wires, CalculationMode::CheckFit, &selection).unwrap();
//! assert!(result.passes());
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - NEC Table 4/5 data and circuit presets
//! - [`fill_rules`] - NEC Table 1 fill percentages
//! - [`calculations`] - Expansion, aggregation, conduit sizing
//! - [`session`] - Editable form state driven by messages
//! - [`settings`] - Session defaults, loadable from TOML
//! - [`units`] - Type-safe area wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod errors;
pub mod fill_rules;
pub mod session;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate_fill, CalculationMode, ConduitSelection, FillResult, PresetInstance, WireEntry};
pub use errors::{CalcError, CalcResult};
pub use fill_rules::{fill_rule, FillRule};
pub use session::{FillSession, SessionMessage};
pub use settings::FillSettings;

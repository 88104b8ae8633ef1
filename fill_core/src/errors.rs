//! # Error Types
//!
//! Structured error types for fill_core. These errors are designed to be
//! informative for both humans and tooling, providing enough context to
//! understand and fix issues programmatically.
//!
//! Errors only appear at parsing boundaries (string keys, TOML and JSON
//! documents). Outcomes such as "no valid wires" or "no conduit is large
//! enough" are ordinary result values, never errors.
//!
//! ## Example
//!
//! ```rust
//! use fill_core::errors::{CalcError, CalcResult};
//!
//! fn validate_quantity(quantity: i64) -> CalcResult<u32> {
//!     if quantity < 1 {
//!         return Err(CalcError::invalid_input(
//!             "quantity",
//!             quantity.to_string(),
//!             "Quantity must be at least 1",
//!         ));
//!     }
//!     Ok(quantity as u32)
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for fill_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for fill_core operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong format, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Wire insulation type key is not in the catalog
    #[error("Unknown wire type: {key}")]
    UnknownWireType { key: String },

    /// Conductor size label is not a recognized AWG/kcmil size
    #[error("Unknown wire size: {label}")]
    UnknownWireSize { label: String },

    /// Conduit type key is not in the catalog
    #[error("Unknown conduit type: {key}")]
    UnknownConduitType { key: String },

    /// Trade size label is not a recognized conduit trade size
    #[error("Unknown trade size: {label}")]
    UnknownTradeSize { label: String },

    /// Circuit preset key is not in the catalog
    #[error("Unknown preset: {key}")]
    UnknownPreset { key: String },

    /// Embedded catalog data failed to parse or validate
    #[error("Catalog error in {entry}: {reason}")]
    Catalog { entry: String, reason: String },

    /// Settings document is malformed or inconsistent
    #[error("Settings error: {reason}")]
    Settings { reason: String },

    /// JSON/TOML serialization or deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownWireType error
    pub fn unknown_wire_type(key: impl Into<String>) -> Self {
        CalcError::UnknownWireType { key: key.into() }
    }

    /// Create an UnknownWireSize error
    pub fn unknown_wire_size(label: impl Into<String>) -> Self {
        CalcError::UnknownWireSize { label: label.into() }
    }

    /// Create an UnknownConduitType error
    pub fn unknown_conduit_type(key: impl Into<String>) -> Self {
        CalcError::UnknownConduitType { key: key.into() }
    }

    /// Create an UnknownTradeSize error
    pub fn unknown_trade_size(label: impl Into<String>) -> Self {
        CalcError::UnknownTradeSize { label: label.into() }
    }

    /// Create an UnknownPreset error
    pub fn unknown_preset(key: impl Into<String>) -> Self {
        CalcError::UnknownPreset { key: key.into() }
    }

    /// Create a Catalog error
    pub fn catalog(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Catalog {
            entry: entry.into(),
            reason: reason.into(),
        }
    }

    /// Create a Settings error
    pub fn settings(reason: impl Into<String>) -> Self {
        CalcError::Settings {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownWireType { .. } => "UNKNOWN_WIRE_TYPE",
            CalcError::UnknownWireSize { .. } => "UNKNOWN_WIRE_SIZE",
            CalcError::UnknownConduitType { .. } => "UNKNOWN_CONDUIT_TYPE",
            CalcError::UnknownTradeSize { .. } => "UNKNOWN_TRADE_SIZE",
            CalcError::UnknownPreset { .. } => "UNKNOWN_PRESET",
            CalcError::Catalog { .. } => "CATALOG_ERROR",
            CalcError::Settings { .. } => "SETTINGS_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CalcError {
    fn from(err: toml::de::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

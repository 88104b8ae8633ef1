//! # Settings
//!
//! Defaults applied to new sessions: calculation mode, conduit selection
//! and the initial state of the add-wire form.
//!
//! ## TOML Example
//!
//! ```toml
//! default_mode = "checkFit"
//!
//! [default_conduit]
//! conduit_type = "PVC-40"
//! size = "1"
//!
//! [default_wire]
//! type = "THHN"
//! size = "10"
//! ```
//!
//! Every field is optional. Missing fields take the built-in defaults.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::{CalculationMode, ConduitSelection};
use crate::catalog::{WireRole, WireType};
use crate::errors::{CalcError, CalcResult};

/// Contents of the add-wire form before it is submitted.
///
/// For CUSTOM wires `size` holds the per-conductor area in in² as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireDraft {
    /// Wire type key; empty until chosen
    #[serde(rename = "type")]
    pub wire_type: String,
    pub size: String,
    pub quantity: i64,
    pub role: WireRole,
}

impl Default for WireDraft {
    fn default() -> Self {
        WireDraft {
            wire_type: String::new(),
            size: "12".to_string(),
            quantity: 1,
            role: WireRole::Phase,
        }
    }
}

impl WireDraft {
    pub fn new(wire_type: impl Into<String>, size: impl Into<String>, quantity: i64, role: WireRole) -> Self {
        WireDraft {
            wire_type: wire_type.into(),
            size: size.into(),
            quantity,
            role,
        }
    }
}

/// Session defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillSettings {
    pub default_mode: CalculationMode,
    pub default_conduit: ConduitSelection,
    pub default_wire: WireDraft,
}

impl Default for FillSettings {
    fn default() -> Self {
        FillSettings {
            default_mode: CalculationMode::FindConduit,
            default_conduit: ConduitSelection::default(),
            default_wire: WireDraft::default(),
        }
    }
}

impl FillSettings {
    /// Parse and validate a settings document
    pub fn from_toml_str(s: &str) -> CalcResult<Self> {
        let settings: FillSettings = toml::from_str(s).map_err(|e| CalcError::settings(e.to_string()))?;
        settings.validate()?;
        debug!(
            mode = ?settings.default_mode,
            conduit = %settings.default_conduit,
            "loaded settings"
        );
        Ok(settings)
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.default_conduit.exists() {
            return Err(CalcError::settings(format!(
                "{} is not made in trade size {}",
                self.default_conduit.conduit_type,
                self.default_conduit.size.label()
            )));
        }

        let wire_type = self.default_wire.wire_type.trim();
        if !wire_type.is_empty() && WireType::from_key(wire_type).is_none() {
            return Err(CalcError::settings(format!("unknown default wire type '{wire_type}'")));
        }
        if self.default_wire.quantity < 1 {
            return Err(CalcError::settings(format!(
                "default wire quantity must be at least 1, got {}",
                self.default_wire.quantity
            )));
        }
        Ok(())
    }
}

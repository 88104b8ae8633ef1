//! # Fill Session
//!
//! The editable state behind a conduit fill form: mode, target conduit,
//! preset instances and individually entered wires. Changes arrive as
//! [`SessionMessage`] values through [`FillSession::update`]; results are
//! recomputed from scratch by [`FillSession::calculate`].
//!
//! ## Structure
//!
//! ```text
//! FillSession
//! ├── mode: CalculationMode
//! ├── conduit: ConduitSelection (type + trade size)
//! ├── preset_instances: Vec<PresetInstance> (preset key x circuits)
//! ├── individual_wires: Vec<WireEntry>
//! └── settings: FillSettings (defaults for reset and blank wires)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use fill_core::catalog::WireRole;
//! use fill_core::session::{FillSession, SessionMessage};
//! use fill_core::settings::WireDraft;
//!
//! let mut session = FillSession::default();
//! session.update(SessionMessage::AddPreset { key: "singlePhase120V".into(), quantity: 2 });
//! session.update(SessionMessage::AddWire(WireDraft::new("THHN", "10", 1, WireRole::Phase)));
//!
//! let result = session.calculate().unwrap();
//! assert_eq!(result.total_count, 7);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::calculations::{
    calculate_fill, combine_wires, CalculationMode, ConduitSelection, FillResult, PresetInstance, WireEntry,
};
use crate::catalog::{self, ConduitType, TradeSize, WireRole, WireSize, WireType};
use crate::settings::{FillSettings, WireDraft};

/// Area given to a new CUSTOM wire when none is entered (in²)
pub const DEFAULT_CUSTOM_AREA_IN2: f64 = 0.01;

/// A single edit to one field of an individual wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum WireField {
    Type(String),
    Size(String),
    CustomArea(f64),
    Quantity(i64),
    Role(WireRole),
}

/// Every change a session accepts
#[derive(Debug, Clone, PartialEq)]
pub enum SessionMessage {
    SetMode(CalculationMode),
    SelectConduitType(ConduitType),
    SelectConduitSize(TradeSize),
    /// Replace all preset instances with (preset key, circuits) pairs
    ReplacePresets(Vec<(String, u32)>),
    AddPreset { key: String, quantity: u32 },
    SetPresetQuantity { id: String, quantity: u32 },
    RemovePreset(String),
    AddWire(WireDraft),
    /// Append a wire with no type chosen
    AddBlankWire,
    UpdateWire { id: String, field: WireField },
    RemoveWire(String),
    /// Remove all presets and wires
    ClearWires,
    /// Clear everything and restore default mode and conduit
    ResetAll,
}

/// Editable fill calculation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillSession {
    #[serde(default)]
    pub mode: CalculationMode,
    #[serde(default)]
    pub conduit: ConduitSelection,
    #[serde(default)]
    pub preset_instances: Vec<PresetInstance>,
    #[serde(default)]
    pub individual_wires: Vec<WireEntry>,
    #[serde(default)]
    pub settings: FillSettings,
}

impl Default for FillSession {
    fn default() -> Self {
        FillSession::new(FillSettings::default())
    }
}

impl FillSession {
    /// Create an empty session using `settings` for mode and conduit
    pub fn new(settings: FillSettings) -> Self {
        FillSession {
            mode: settings.default_mode,
            conduit: settings.default_conduit,
            preset_instances: Vec::new(),
            individual_wires: Vec::new(),
            settings,
        }
    }

    /// Apply one change
    pub fn update(&mut self, message: SessionMessage) {
        debug!(?message, "session update");
        match message {
            SessionMessage::SetMode(mode) => self.mode = mode,
            SessionMessage::SelectConduitType(conduit_type) => self.select_conduit_type(conduit_type),
            SessionMessage::SelectConduitSize(size) => self.select_conduit_size(size),
            SessionMessage::ReplacePresets(selected) => self.replace_presets(selected),
            SessionMessage::AddPreset { key, quantity } => {
                self.add_preset(key, quantity);
            }
            SessionMessage::SetPresetQuantity { id, quantity } => {
                if quantity < 1 {
                    return;
                }
                if let Some(instance) = self.preset_instances.iter_mut().find(|p| p.id == id) {
                    instance.quantity = quantity;
                }
            }
            SessionMessage::RemovePreset(id) => self.preset_instances.retain(|p| p.id != id),
            SessionMessage::AddWire(draft) => {
                self.add_wire(draft);
            }
            SessionMessage::AddBlankWire => {
                let draft = WireDraft {
                    wire_type: String::new(),
                    ..self.settings.default_wire.clone()
                };
                self.individual_wires.push(to_entry(new_id("wire"), &draft));
            }
            SessionMessage::UpdateWire { id, field } => self.update_wire(&id, field),
            SessionMessage::RemoveWire(id) => self.individual_wires.retain(|w| w.id != id),
            SessionMessage::ClearWires => {
                self.preset_instances.clear();
                self.individual_wires.clear();
            }
            SessionMessage::ResetAll => {
                *self = FillSession::new(self.settings.clone());
            }
        }
    }

    /// Add a preset instance, returning its id.
    ///
    /// Unknown preset keys and zero circuits are ignored.
    pub fn add_preset(&mut self, key: impl Into<String>, quantity: u32) -> Option<String> {
        let key = key.into();
        if quantity < 1 {
            return None;
        }
        if catalog::preset(&key).is_none() {
            warn!(preset = %key, "ignoring unknown preset");
            return None;
        }
        let id = new_id("preset");
        self.preset_instances.push(PresetInstance::new(id.clone(), key, quantity));
        Some(id)
    }

    /// Add an individual wire from a draft, returning its id.
    ///
    /// Drafts without a type are ignored. A CUSTOM draft reads its area
    /// from the size text.
    pub fn add_wire(&mut self, draft: WireDraft) -> Option<String> {
        if draft.wire_type.trim().is_empty() {
            return None;
        }
        let id = new_id("wire");
        self.individual_wires.push(to_entry(id.clone(), &draft));
        Some(id)
    }

    /// Expanded preset wires followed by individual wires
    pub fn all_wires(&self) -> Vec<WireEntry> {
        combine_wires(&self.preset_instances, &self.individual_wires)
    }

    /// Run the fill calculation on the current state
    pub fn calculate(&self) -> Option<FillResult> {
        calculate_fill(&self.all_wires(), self.mode, &self.conduit)
    }

    /// Some individual wire has no type chosen
    pub fn has_incomplete_wires(&self) -> bool {
        self.individual_wires.iter().any(WireEntry::is_incomplete)
    }

    pub fn has_any_wires(&self) -> bool {
        !self.preset_instances.is_empty() || !self.individual_wires.is_empty()
    }

    fn select_conduit_type(&mut self, conduit_type: ConduitType) {
        self.conduit.conduit_type = conduit_type;
        let spec = catalog::catalog().conduit_type(conduit_type);
        if spec.area(self.conduit.size).is_none() {
            if let Some(first) = spec.smallest() {
                debug!(conduit = %conduit_type, size = %first, "trade size reset");
                self.conduit.size = first;
            }
        }
    }

    fn select_conduit_size(&mut self, size: TradeSize) {
        let candidate = ConduitSelection::new(self.conduit.conduit_type, size);
        if candidate.exists() {
            self.conduit = candidate;
        } else {
            debug!(conduit = %candidate, "ignoring trade size not offered");
        }
    }

    fn replace_presets(&mut self, selected: Vec<(String, u32)>) {
        self.preset_instances.clear();
        for (key, quantity) in selected {
            self.add_preset(key, quantity);
        }
    }

    fn update_wire(&mut self, id: &str, field: WireField) {
        let Some(wire) = self.individual_wires.iter_mut().find(|w| w.id == id) else {
            return;
        };
        match field {
            WireField::Type(wire_type) => {
                match WireType::from_key(&wire_type) {
                    Some(WireType::Custom) => {
                        wire.size = "custom".to_string();
                        wire.custom_area_in2 = Some(DEFAULT_CUSTOM_AREA_IN2);
                    }
                    Some(parsed) => {
                        // Keep the size if the new type lists it
                        let sizes = catalog::wire_sizes(parsed);
                        let current = WireSize::from_label(&wire.size);
                        if !sizes.iter().any(|s| Some(*s) == current) {
                            if let Some(first) = sizes.first() {
                                wire.size = first.label().to_string();
                            }
                        }
                        wire.custom_area_in2 = None;
                    }
                    None => {}
                }
                wire.wire_type = wire_type;
            }
            WireField::Size(size) => wire.size = size,
            WireField::CustomArea(area) => wire.custom_area_in2 = Some(area),
            WireField::Quantity(quantity) => wire.quantity = quantity,
            WireField::Role(role) => wire.role = role,
        }
    }
}

fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

fn to_entry(id: String, draft: &WireDraft) -> WireEntry {
    if WireType::from_key(draft.wire_type.trim()) == Some(WireType::Custom) {
        let area = draft
            .size
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| *a != 0.0 && !a.is_nan())
            .unwrap_or(DEFAULT_CUSTOM_AREA_IN2);
        return WireEntry::custom(id, area, draft.quantity, draft.role);
    }
    WireEntry::new(id, draft.wire_type.trim(), draft.size.trim(), draft.quantity, draft.role)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::FillOutcome;

    fn thhn(size: &str, quantity: i64) -> WireDraft {
        WireDraft::new("THHN", size, quantity, WireRole::Phase)
    }

    #[test]
    fn test_default_session() {
        let session = FillSession::default();
        assert_eq!(session.mode, CalculationMode::FindConduit);
        assert_eq!(session.conduit, ConduitSelection::new(ConduitType::Emt, TradeSize::ThreeQuarter));
        assert!(!session.has_any_wires());
        assert!(session.calculate().is_none());
    }

    #[test]
    fn test_add_wire_and_calculate() {
        let mut session = FillSession::default();
        session.update(SessionMessage::AddWire(thhn("12", 2)));
        session.update(SessionMessage::AddWire(WireDraft::new("THHN", "12", 1, WireRole::Ground)));

        let result = session.calculate().unwrap();
        assert_eq!(result.total_count, 3);
        assert!(matches!(result.outcome, FillOutcome::Minimum(_)));
        assert!(session.individual_wires[0].id.starts_with("wire-"));
    }

    #[test]
    fn test_add_wire_without_type_ignored() {
        let mut session = FillSession::default();
        session.update(SessionMessage::AddWire(WireDraft::default()));
        assert!(session.individual_wires.is_empty());
    }

    #[test]
    fn test_custom_draft() {
        let mut session = FillSession::default();
        session.update(SessionMessage::AddWire(WireDraft::new("CUSTOM", "0.05", 1, WireRole::Phase)));
        session.update(SessionMessage::AddWire(WireDraft::new("CUSTOM", "12", 1, WireRole::Phase)));
        session.update(SessionMessage::AddWire(WireDraft::new("CUSTOM", "abc", 1, WireRole::Phase)));

        let wires = &session.individual_wires;
        assert_eq!(wires[0].size, "custom");
        assert_eq!(wires[0].custom_area_in2, Some(0.05));
        // Parsed as typed, even though it fails the range check later
        assert_eq!(wires[1].custom_area_in2, Some(12.0));
        assert_eq!(wires[2].custom_area_in2, Some(DEFAULT_CUSTOM_AREA_IN2));

        let result = session.calculate().unwrap();
        assert_eq!(result.total_count, 2);
        assert_eq!(result.skipped.len(), 1);
    }

    #[test]
    fn test_blank_wire_is_incomplete() {
        let mut session = FillSession::default();
        session.update(SessionMessage::AddBlankWire);
        assert!(session.has_any_wires());
        assert!(session.has_incomplete_wires());
        assert_eq!(session.individual_wires[0].size, "12");
        assert!(session.calculate().is_none());

        let id = session.individual_wires[0].id.clone();
        session.update(SessionMessage::UpdateWire {
            id,
            field: WireField::Type("XHHW".to_string()),
        });
        assert!(!session.has_incomplete_wires());
        assert!(session.calculate().is_some());
    }

    #[test]
    fn test_type_change_adjusts_size() {
        let mut session = FillSession::default();
        let id = session.add_wire(WireDraft::new("RHH", "2000", 1, WireRole::Phase)).unwrap();

        // THHN has no 2000 kcmil, falls back to its smallest size
        session.update(SessionMessage::UpdateWire {
            id: id.clone(),
            field: WireField::Type("THHN".to_string()),
        });
        assert_eq!(session.individual_wires[0].size, "14");

        session.update(SessionMessage::UpdateWire {
            id: id.clone(),
            field: WireField::Size("10".to_string()),
        });
        session.update(SessionMessage::UpdateWire {
            id: id.clone(),
            field: WireField::Type("THWN_2".to_string()),
        });
        assert_eq!(session.individual_wires[0].size, "10");

        session.update(SessionMessage::UpdateWire {
            id,
            field: WireField::Type("CUSTOM".to_string()),
        });
        assert_eq!(session.individual_wires[0].size, "custom");
        assert_eq!(session.individual_wires[0].custom_area_in2, Some(DEFAULT_CUSTOM_AREA_IN2));
    }

    #[test]
    fn test_presets_lifecycle() {
        let mut session = FillSession::default();
        let id = session.add_preset("singlePhase120V", 1).unwrap();
        assert!(id.starts_with("preset-"));
        assert!(session.add_preset("noSuchPreset", 1).is_none());
        assert!(session.add_preset("pvSolar", 0).is_none());

        session.update(SessionMessage::SetPresetQuantity { id: id.clone(), quantity: 4 });
        assert_eq!(session.preset_instances[0].quantity, 4);
        session.update(SessionMessage::SetPresetQuantity { id: id.clone(), quantity: 0 });
        assert_eq!(session.preset_instances[0].quantity, 4);

        assert_eq!(session.calculate().unwrap().total_count, 12);

        session.update(SessionMessage::RemovePreset(id));
        assert!(session.preset_instances.is_empty());
    }

    #[test]
    fn test_replace_presets() {
        let mut session = FillSession::default();
        session.add_preset("pvSolar", 1);
        session.update(SessionMessage::ReplacePresets(vec![
            ("waterHeater".to_string(), 2),
            ("fireAlarm".to_string(), 1),
        ]));
        let keys: Vec<&str> = session.preset_instances.iter().map(|p| p.preset_key.as_str()).collect();
        assert_eq!(keys, vec!["waterHeater", "fireAlarm"]);
        assert_ne!(session.preset_instances[0].id, session.preset_instances[1].id);
    }

    #[test]
    fn test_conduit_type_resets_size() {
        let mut session = FillSession::default();
        session.update(SessionMessage::SelectConduitType(ConduitType::PvcEb));
        assert_eq!(session.conduit.size, TradeSize::Two);

        session.update(SessionMessage::SelectConduitSize(TradeSize::Half));
        assert_eq!(session.conduit.size, TradeSize::Two);

        session.update(SessionMessage::SelectConduitType(ConduitType::Emt));
        assert_eq!(session.conduit.size, TradeSize::Two);
        session.update(SessionMessage::SelectConduitSize(TradeSize::Half));
        assert_eq!(session.conduit.size, TradeSize::Half);
    }

    #[test]
    fn test_clear_and_reset() {
        let mut session = FillSession::default();
        session.add_preset("pvSolar", 1);
        session.add_wire(thhn("12", 1));
        session.update(SessionMessage::SetMode(CalculationMode::CheckFit));
        session.update(SessionMessage::SelectConduitType(ConduitType::Rmc));

        session.update(SessionMessage::ClearWires);
        assert!(!session.has_any_wires());
        assert_eq!(session.mode, CalculationMode::CheckFit);

        session.add_wire(thhn("12", 1));
        session.update(SessionMessage::ResetAll);
        assert!(!session.has_any_wires());
        assert_eq!(session.mode, CalculationMode::FindConduit);
        assert_eq!(session.conduit.conduit_type, ConduitType::Emt);
    }

    #[test]
    fn test_remove_wire() {
        let mut session = FillSession::default();
        let a = session.add_wire(thhn("12", 1)).unwrap();
        let b = session.add_wire(thhn("10", 1)).unwrap();
        session.update(SessionMessage::RemoveWire(a));
        assert_eq!(session.individual_wires.len(), 1);
        assert_eq!(session.individual_wires[0].id, b);
    }

    #[test]
    fn test_session_json_roundtrip() {
        let mut session = FillSession::default();
        session.add_preset("threePhase480V", 2);
        session.add_wire(thhn("8", 1));

        let json = serde_json::to_string_pretty(&session).unwrap();
        assert!(json.contains("\"findConduit\""));
        let roundtrip: FillSession = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, session);
        assert_eq!(roundtrip.calculate(), session.calculate());
    }

    #[test]
    fn test_sparse_session_json() {
        let json = r#"{
            "mode": "checkFit",
            "conduit": { "conduit_type": "EMT", "size": "1/2" },
            "individual_wires": [
                { "id": "w1", "type": "CUSTOM", "size": "custom", "custom_area_in2": 0.15, "quantity": 1 }
            ]
        }"#;
        let session: FillSession = serde_json::from_str(json).unwrap();
        let result = session.calculate().unwrap();
        assert!(result.compliance().unwrap().compliant);
    }

    #[test]
    fn test_unparseable_quantity_skips_only_that_wire() {
        let json = r#"{
            "individual_wires": [
                { "id": "w1", "type": "THHN", "size": "12", "quantity": 3 },
                { "id": "w2", "type": "THHN", "size": "12", "quantity": "" },
                { "id": "w3", "type": "THHN", "size": "12", "quantity": 2.5 }
            ]
        }"#;
        let session: FillSession = serde_json::from_str(json).unwrap();
        let result = session.calculate().unwrap();

        assert_eq!(result.total_count, 3);
        assert_eq!(result.breakdown.len(), 1);
        let skipped: Vec<&str> = result.skipped.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(skipped, vec!["w2", "w3"]);
        assert!(result
            .skipped
            .iter()
            .all(|s| s.reason == crate::calculations::SkipReason::InvalidQuantity));
    }
}

//! Circuit Presets
//!
//! Named bundles of wire specifications for common circuits (a 120V branch,
//! a 480V three-phase feeder, etc.). A preset is a pure template: it has no
//! identity until a [`PresetInstance`](crate::calculations::PresetInstance)
//! repeats it some number of circuits.
//!
//! Preset sizes are kept as raw labels. A size the wire table doesn't list
//! survives here and is skipped during aggregation, the same as a bad
//! hand-entered wire.

use serde::{Deserialize, Serialize};

use crate::catalog::wire_types::WireType;

/// What a conductor does in its circuit.
///
/// Informational only: role never changes area math. Grounds are called
/// out in reports as the EGC (equipment grounding conductor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireRole {
    #[default]
    Phase,
    Neutral,
    Ground,
    Control,
    Spare,
}

impl WireRole {
    pub const ALL: [WireRole; 5] = [
        WireRole::Phase,
        WireRole::Neutral,
        WireRole::Ground,
        WireRole::Control,
        WireRole::Spare,
    ];

    /// Display name, "EGC" for grounds
    pub fn display_name(&self) -> &'static str {
        match self {
            WireRole::Phase => "Phase",
            WireRole::Neutral => "Neutral",
            WireRole::Ground => "EGC",
            WireRole::Control => "Control",
            WireRole::Spare => "Spare",
        }
    }

    pub fn is_ground(&self) -> bool {
        matches!(self, WireRole::Ground)
    }

    /// Parse from a role name; "egc" is accepted for ground
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "phase" | "hot" | "p" => Some(WireRole::Phase),
            "neutral" | "n" => Some(WireRole::Neutral),
            "ground" | "egc" | "g" => Some(WireRole::Ground),
            "control" | "c" => Some(WireRole::Control),
            "spare" | "s" => Some(WireRole::Spare),
            _ => None,
        }
    }
}

impl std::fmt::Display for WireRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Grouping used when listing presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresetGroup {
    Residential,
    Commercial,
    Specialized,
}

impl PresetGroup {
    pub const ALL: [PresetGroup; 3] = [
        PresetGroup::Residential,
        PresetGroup::Commercial,
        PresetGroup::Specialized,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PresetGroup::Residential => "Residential Circuits",
            PresetGroup::Commercial => "Commercial/Industrial",
            PresetGroup::Specialized => "Specialized Circuits",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PresetGroup::Residential => "Common household electrical circuits",
            PresetGroup::Commercial => "Three-phase and heavy-duty circuits",
            PresetGroup::Specialized => "Control, communication, and specialty applications",
        }
    }
}

/// One line of a preset: `quantity` conductors of one type and size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetWireSpec {
    #[serde(rename = "type")]
    pub wire_type: WireType,
    /// Raw size label, not validated against the wire table
    pub size: String,
    pub quantity: u32,
    pub role: WireRole,
}

/// Named circuit template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePreset {
    pub key: String,
    pub name: String,
    pub group: PresetGroup,
    pub wires: Vec<PresetWireSpec>,
}

impl WirePreset {
    /// Conductors in one circuit of this preset
    pub fn conductor_count(&self) -> u32 {
        self.wires.iter().map(|w| w.quantity).sum()
    }

    /// Distinct insulation types used, in first-appearance order
    pub fn distinct_wire_types(&self) -> Vec<WireType> {
        let mut types: Vec<WireType> = Vec::new();
        for wire in &self.wires {
            if !types.contains(&wire.wire_type) {
                types.push(wire.wire_type);
            }
        }
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_preset() -> WirePreset {
        WirePreset {
            key: "highTempMotor".to_string(),
            name: "High Temp Motor Circuit".to_string(),
            group: PresetGroup::Commercial,
            wires: vec![
                PresetWireSpec {
                    wire_type: WireType::Fep,
                    size: "10".to_string(),
                    quantity: 3,
                    role: WireRole::Phase,
                },
                PresetWireSpec {
                    wire_type: WireType::Fep,
                    size: "12".to_string(),
                    quantity: 1,
                    role: WireRole::Ground,
                },
            ],
        }
    }

    #[test]
    fn test_conductor_count() {
        assert_eq!(sample_preset().conductor_count(), 4);
    }

    #[test]
    fn test_distinct_types() {
        assert_eq!(sample_preset().distinct_wire_types(), vec![WireType::Fep]);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&WireRole::Ground).unwrap(), "\"ground\"");
        let role: WireRole = serde_json::from_str("\"neutral\"").unwrap();
        assert_eq!(role, WireRole::Neutral);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(WireRole::Ground.display_name(), "EGC");
        assert!(WireRole::Ground.is_ground());
        assert!(!WireRole::Phase.is_ground());
        assert_eq!(WireRole::from_str_flexible("EGC"), Some(WireRole::Ground));
        assert_eq!(WireRole::from_str_flexible("bogus"), None);
    }
}

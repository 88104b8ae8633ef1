//! Wire Insulation Types (NEC Chapter 9, Table 5)
//!
//! Conductor insulation types with their approximate cross-sectional areas
//! per gauge. Each catalog key maps to one [`WireType`] variant; the
//! per-gauge areas are loaded from the embedded `wire_types.toml`.
//!
//! `CUSTOM` is the one entry with no area table. Its area is supplied on
//! each wire entry instead.

use serde::{Deserialize, Serialize};

use crate::catalog::sizes::WireSize;
use crate::errors::{CalcError, CalcResult};
use crate::units::SquareInches;

/// Wire insulation type keys, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WireType {
    #[serde(rename = "THHN")]
    Thhn,
    #[serde(rename = "THWN")]
    Thwn,
    #[serde(rename = "THWN_2")]
    Thwn2,
    #[serde(rename = "THHW")]
    Thhw,
    #[serde(rename = "THW")]
    Thw,
    #[serde(rename = "THW_2")]
    Thw2,
    #[serde(rename = "TW")]
    Tw,
    #[serde(rename = "XHHW")]
    Xhhw,
    #[serde(rename = "XHHW_2")]
    Xhhw2,
    #[serde(rename = "XHH")]
    Xhh,
    #[serde(rename = "RHH")]
    Rhh,
    #[serde(rename = "RHW")]
    Rhw,
    #[serde(rename = "RHW_2")]
    Rhw2,
    #[serde(rename = "USE")]
    Use,
    #[serde(rename = "USE_2")]
    Use2,
    #[serde(rename = "TFE")]
    Tfe,
    #[serde(rename = "FEP")]
    Fep,
    #[serde(rename = "FEPB")]
    Fepb,
    #[serde(rename = "PFA")]
    Pfa,
    #[serde(rename = "PFAH")]
    Pfah,
    #[serde(rename = "TF")]
    Tf,
    #[serde(rename = "TFF")]
    Tff,
    #[serde(rename = "TFN")]
    Tfn,
    #[serde(rename = "TFFN")]
    Tffn,
    #[serde(rename = "SF_1")]
    Sf1,
    #[serde(rename = "SF_2")]
    Sf2,
    #[serde(rename = "SFF_1")]
    Sff1,
    #[serde(rename = "SFF_2")]
    Sff2,
    #[serde(rename = "Z")]
    Z,
    #[serde(rename = "ZF")]
    Zf,
    #[serde(rename = "ZFF")]
    Zff,
    #[serde(rename = "FFH_2")]
    Ffh2,
    #[serde(rename = "RFH_1")]
    Rfh1,
    #[serde(rename = "RFH_2")]
    Rfh2,
    #[serde(rename = "XF")]
    Xf,
    #[serde(rename = "XFF")]
    Xff,
    /// User-defined conductor, area supplied per entry
    #[serde(rename = "CUSTOM")]
    Custom,
}

impl WireType {
    /// All wire types in catalog order
    pub const ALL: [WireType; 37] = [
        WireType::Thhn,
        WireType::Thwn,
        WireType::Thwn2,
        WireType::Thhw,
        WireType::Thw,
        WireType::Thw2,
        WireType::Tw,
        WireType::Xhhw,
        WireType::Xhhw2,
        WireType::Xhh,
        WireType::Rhh,
        WireType::Rhw,
        WireType::Rhw2,
        WireType::Use,
        WireType::Use2,
        WireType::Tfe,
        WireType::Fep,
        WireType::Fepb,
        WireType::Pfa,
        WireType::Pfah,
        WireType::Tf,
        WireType::Tff,
        WireType::Tfn,
        WireType::Tffn,
        WireType::Sf1,
        WireType::Sf2,
        WireType::Sff1,
        WireType::Sff2,
        WireType::Z,
        WireType::Zf,
        WireType::Zff,
        WireType::Ffh2,
        WireType::Rfh1,
        WireType::Rfh2,
        WireType::Xf,
        WireType::Xff,
        WireType::Custom,
    ];

    /// Catalog key (e.g., "THWN_2")
    pub fn key(&self) -> &'static str {
        match self {
            WireType::Thhn => "THHN",
            WireType::Thwn => "THWN",
            WireType::Thwn2 => "THWN_2",
            WireType::Thhw => "THHW",
            WireType::Thw => "THW",
            WireType::Thw2 => "THW_2",
            WireType::Tw => "TW",
            WireType::Xhhw => "XHHW",
            WireType::Xhhw2 => "XHHW_2",
            WireType::Xhh => "XHH",
            WireType::Rhh => "RHH",
            WireType::Rhw => "RHW",
            WireType::Rhw2 => "RHW_2",
            WireType::Use => "USE",
            WireType::Use2 => "USE_2",
            WireType::Tfe => "TFE",
            WireType::Fep => "FEP",
            WireType::Fepb => "FEPB",
            WireType::Pfa => "PFA",
            WireType::Pfah => "PFAH",
            WireType::Tf => "TF",
            WireType::Tff => "TFF",
            WireType::Tfn => "TFN",
            WireType::Tffn => "TFFN",
            WireType::Sf1 => "SF_1",
            WireType::Sf2 => "SF_2",
            WireType::Sff1 => "SFF_1",
            WireType::Sff2 => "SFF_2",
            WireType::Z => "Z",
            WireType::Zf => "ZF",
            WireType::Zff => "ZFF",
            WireType::Ffh2 => "FFH_2",
            WireType::Rfh1 => "RFH_1",
            WireType::Rfh2 => "RFH_2",
            WireType::Xf => "XF",
            WireType::Xff => "XFF",
            WireType::Custom => "CUSTOM",
        }
    }

    /// Look up by exact catalog key (what wire entries carry)
    pub fn from_key(key: &str) -> Option<Self> {
        WireType::ALL.iter().copied().find(|t| t.key() == key)
    }

    /// Parse from common string representations ("thwn-2", "THWN_2", "Thwn 2")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        Self::from_key(&normalized).ok_or_else(|| CalcError::unknown_wire_type(s))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, WireType::Custom)
    }
}

impl std::fmt::Display for WireType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key().replace('_', "-"))
    }
}

/// Wire type categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WireCategory {
    /// 600V general purpose building wire
    BuildingWire,
    /// Small gauge lighting and fixture conductors
    FixtureWire,
    /// Fluoropolymer insulated conductors
    HighTemp,
    /// Control circuit and instrumentation conductors
    ControlInstrumentation,
    /// User-defined conductors
    Custom,
}

impl WireCategory {
    pub const ALL: [WireCategory; 5] = [
        WireCategory::BuildingWire,
        WireCategory::FixtureWire,
        WireCategory::HighTemp,
        WireCategory::ControlInstrumentation,
        WireCategory::Custom,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            WireCategory::BuildingWire => "Building Wire (600V)",
            WireCategory::FixtureWire => "Fixture Wire",
            WireCategory::HighTemp => "High Temperature Wire",
            WireCategory::ControlInstrumentation => "Control & Instrumentation",
            WireCategory::Custom => "Custom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WireCategory::BuildingWire => "General purpose building wiring conductors",
            WireCategory::FixtureWire => "Small gauge wires for lighting and fixtures",
            WireCategory::HighTemp => "Fluoropolymer insulated conductors for extreme temperatures",
            WireCategory::ControlInstrumentation => {
                "Specialized wires for control circuits and instrumentation"
            }
            WireCategory::Custom => "User-defined conductors with a specified area",
        }
    }
}

/// Catalog entry for one insulation type.
///
/// `areas` is sorted by [`WireSize`], smallest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTypeSpec {
    pub key: WireType,
    /// Short display label (e.g., "THWN-2")
    pub label: String,
    pub long_name: String,
    pub category: WireCategory,
    /// Rated for wet locations
    pub wet: bool,
    /// Temperature ratings in °C
    pub temp_ratings: Vec<u16>,
    pub insulation: String,
    pub applications: Vec<String>,
    /// NEC table the insulation type is listed in
    pub nec_ref: String,
    pub areas: Vec<(WireSize, SquareInches)>,
}

impl WireTypeSpec {
    /// Area of one conductor of the given size, if the table lists it
    pub fn area(&self, size: WireSize) -> Option<SquareInches> {
        self.areas
            .binary_search_by(|(s, _)| s.cmp(&size))
            .ok()
            .map(|idx| self.areas[idx].1)
    }

    /// Sizes listed for this type, smallest first
    pub fn sizes(&self) -> Vec<WireSize> {
        self.areas.iter().map(|(size, _)| *size).collect()
    }

    /// Highest temperature rating in °C
    pub fn max_temp_rating(&self) -> Option<u16> {
        self.temp_ratings.iter().copied().max()
    }

    /// Case-insensitive substring match over key, label, names and applications
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.key.key().to_lowercase().contains(&term)
            || self.label.to_lowercase().contains(&term)
            || self.long_name.to_lowercase().contains(&term)
            || self.insulation.to_lowercase().contains(&term)
            || self.applications.iter().any(|a| a.to_lowercase().contains(&term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        for wire_type in WireType::ALL {
            assert_eq!(WireType::from_key(wire_type.key()), Some(wire_type));
        }
        assert_eq!(WireType::from_key("thhn"), None);
        assert_eq!(WireType::from_key(""), None);
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(WireType::from_str_flexible("thwn-2").unwrap(), WireType::Thwn2);
        assert_eq!(WireType::from_str_flexible("XHHW 2").unwrap(), WireType::Xhhw2);
        assert_eq!(WireType::from_str_flexible("custom").unwrap(), WireType::Custom);
        assert!(WireType::from_str_flexible("NM-B").is_err());
    }

    #[test]
    fn test_serde_key_matches() {
        for wire_type in WireType::ALL {
            let json = serde_json::to_string(&wire_type).unwrap();
            assert_eq!(json, format!("\"{}\"", wire_type.key()));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(WireType::Thwn2.to_string(), "THWN-2");
        assert_eq!(WireType::Thhn.to_string(), "THHN");
    }

    #[test]
    fn test_spec_area_lookup() {
        let spec = WireTypeSpec {
            key: WireType::Thhn,
            label: "THHN".to_string(),
            long_name: "Thermoplastic".to_string(),
            category: WireCategory::BuildingWire,
            wet: false,
            temp_ratings: vec![90],
            insulation: "Thermoplastic, Nylon".to_string(),
            applications: vec!["Dry locations".to_string()],
            nec_ref: "Table 310.104(A)".to_string(),
            areas: vec![
                (WireSize::Awg14, SquareInches(0.0097)),
                (WireSize::Awg12, SquareInches(0.0133)),
            ],
        };
        assert_eq!(spec.area(WireSize::Awg12), Some(SquareInches(0.0133)));
        assert_eq!(spec.area(WireSize::Awg10), None);
        assert_eq!(spec.max_temp_rating(), Some(90));
        assert!(spec.matches("nylon"));
        assert!(spec.matches("DRY"));
        assert!(!spec.matches("burial"));
    }
}

//! Conduit and Tubing Types (NEC Chapter 9, Table 4)
//!
//! Raceway types with their internal cross-sectional area per trade size.
//! The stored `fill40` column is the published 40% value and is kept for
//! reference only. Allowable fill is always recomputed from `total` and the
//! fill rule that applies to the conductor count.

use serde::{Deserialize, Serialize};

use crate::catalog::sizes::TradeSize;
use crate::errors::{CalcError, CalcResult};
use crate::units::SquareInches;

/// Conduit type keys, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConduitType {
    /// Electrical Metallic Tubing (Article 358)
    #[serde(rename = "EMT")]
    Emt,
    /// Rigid Metal Conduit (Article 344)
    #[serde(rename = "RMC")]
    Rmc,
    /// Intermediate Metal Conduit (Article 342)
    #[serde(rename = "IMC")]
    Imc,
    #[serde(rename = "PVC-40")]
    Pvc40,
    #[serde(rename = "PVC-80")]
    Pvc80,
    #[serde(rename = "PVC-A")]
    PvcA,
    #[serde(rename = "PVC-EB")]
    PvcEb,
    /// High Density Polyethylene (Article 353)
    #[serde(rename = "HDPE")]
    Hdpe,
    /// Electrical Nonmetallic Tubing (Article 362)
    #[serde(rename = "ENT")]
    Ent,
    /// Flexible Metal Conduit (Article 348)
    #[serde(rename = "FMC")]
    Fmc,
    /// Liquidtight Flexible Metal Conduit (Article 350)
    #[serde(rename = "LFMC")]
    Lfmc,
    #[serde(rename = "LFNC-A")]
    LfncA,
    #[serde(rename = "LFNC-B")]
    LfncB,
}

impl ConduitType {
    /// All conduit types in catalog order
    pub const ALL: [ConduitType; 13] = [
        ConduitType::Emt,
        ConduitType::Rmc,
        ConduitType::Imc,
        ConduitType::Pvc40,
        ConduitType::Pvc80,
        ConduitType::PvcA,
        ConduitType::PvcEb,
        ConduitType::Hdpe,
        ConduitType::Ent,
        ConduitType::Fmc,
        ConduitType::Lfmc,
        ConduitType::LfncA,
        ConduitType::LfncB,
    ];

    /// Catalog key (e.g., "PVC-40")
    pub fn key(&self) -> &'static str {
        match self {
            ConduitType::Emt => "EMT",
            ConduitType::Rmc => "RMC",
            ConduitType::Imc => "IMC",
            ConduitType::Pvc40 => "PVC-40",
            ConduitType::Pvc80 => "PVC-80",
            ConduitType::PvcA => "PVC-A",
            ConduitType::PvcEb => "PVC-EB",
            ConduitType::Hdpe => "HDPE",
            ConduitType::Ent => "ENT",
            ConduitType::Fmc => "FMC",
            ConduitType::Lfmc => "LFMC",
            ConduitType::LfncA => "LFNC-A",
            ConduitType::LfncB => "LFNC-B",
        }
    }

    /// Look up by exact catalog key
    pub fn from_key(key: &str) -> Option<Self> {
        ConduitType::ALL.iter().copied().find(|t| t.key() == key)
    }

    /// Parse from common string representations ("emt", "pvc40", "PVC 40", "lfnc_a")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_uppercase().replace([' ', '_'], "-");
        if let Some(found) = Self::from_key(&normalized) {
            return Ok(found);
        }
        let compact = normalized.replace('-', "");
        ConduitType::ALL
            .iter()
            .copied()
            .find(|t| t.key().replace('-', "") == compact)
            .ok_or_else(|| CalcError::unknown_conduit_type(s))
    }
}

impl std::fmt::Display for ConduitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Conduit type categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConduitCategory {
    Metal,
    Nonmetallic,
    Flexible,
}

impl ConduitCategory {
    pub const ALL: [ConduitCategory; 3] = [
        ConduitCategory::Metal,
        ConduitCategory::Nonmetallic,
        ConduitCategory::Flexible,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ConduitCategory::Metal => "Metal Conduits",
            ConduitCategory::Nonmetallic => "Nonmetallic Conduits",
            ConduitCategory::Flexible => "Flexible Conduits",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConduitCategory::Metal => {
                "Steel and aluminum conduits for general purpose and hazardous locations"
            }
            ConduitCategory::Nonmetallic => {
                "PVC, HDPE and other plastic conduits for corrosive environments"
            }
            ConduitCategory::Flexible => {
                "Flexible conduits for motor connections and vibration isolation"
            }
        }
    }
}

/// Internal area of one trade size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConduitArea {
    /// Total internal cross-sectional area (100%)
    pub total: SquareInches,
    /// Published 40% column. Reference only, never used for sizing.
    pub fill40: SquareInches,
}

impl ConduitArea {
    /// Allowable conductor area at the given fill fraction
    pub fn allowable(&self, percent: f64) -> SquareInches {
        self.total * percent
    }
}

/// Catalog entry for one conduit type.
///
/// `sizes` is sorted by [`TradeSize`], smallest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitTypeSpec {
    pub key: ConduitType,
    pub name: String,
    pub category: ConduitCategory,
    /// NEC article governing the raceway
    pub article: String,
    pub description: String,
    pub applications: Vec<String>,
    pub sizes: Vec<(TradeSize, ConduitArea)>,
}

impl ConduitTypeSpec {
    /// Area data for a trade size, if this raceway is made in that size
    pub fn area(&self, size: TradeSize) -> Option<ConduitArea> {
        self.sizes
            .binary_search_by(|(s, _)| s.cmp(&size))
            .ok()
            .map(|idx| self.sizes[idx].1)
    }

    /// Trade sizes offered, smallest first
    pub fn trade_sizes(&self) -> Vec<TradeSize> {
        self.sizes.iter().map(|(size, _)| *size).collect()
    }

    /// Smallest trade size offered
    pub fn smallest(&self) -> Option<TradeSize> {
        self.sizes.first().map(|(size, _)| *size)
    }

    /// Largest trade size offered
    pub fn largest(&self) -> Option<TradeSize> {
        self.sizes.last().map(|(size, _)| *size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        for conduit in ConduitType::ALL {
            assert_eq!(ConduitType::from_key(conduit.key()), Some(conduit));
            let json = serde_json::to_string(&conduit).unwrap();
            assert_eq!(json, format!("\"{}\"", conduit.key()));
        }
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(ConduitType::from_str_flexible("emt").unwrap(), ConduitType::Emt);
        assert_eq!(ConduitType::from_str_flexible("pvc40").unwrap(), ConduitType::Pvc40);
        assert_eq!(ConduitType::from_str_flexible("PVC 80").unwrap(), ConduitType::Pvc80);
        assert_eq!(ConduitType::from_str_flexible("lfnc_b").unwrap(), ConduitType::LfncB);
        assert!(ConduitType::from_str_flexible("conduit").is_err());
    }

    #[test]
    fn test_allowable_area() {
        let area = ConduitArea {
            total: SquareInches(0.304),
            fill40: SquareInches(0.122),
        };
        assert!((area.allowable(0.40).0 - 0.1216).abs() < 1e-12);
        assert!((area.allowable(0.53).0 - 0.16112).abs() < 1e-12);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(ConduitCategory::Metal.display_name(), "Metal Conduits");
        assert_eq!(ConduitCategory::Flexible.display_name(), "Flexible Conduits");
    }
}

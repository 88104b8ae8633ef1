//! # NEC Reference Tables
//!
//! Read-only lookup of conductor areas, conduit areas and circuit presets.
//! The tables transcribe NEC Chapter 9 and are embedded in the binary as
//! TOML, parsed and validated once on first access.
//!
//! ## Tables
//!
//! - **Wire types** (`data/wire_types.toml`): Table 5 conductor areas per gauge
//! - **Conduit types** (`data/conduit_types.toml`): Table 4 internal areas per trade size
//! - **Presets** (`data/presets.toml`): common circuit wire bundles
//!
//! Lookups return `None` for combinations the tables don't list. Callers
//! treat that as a validation failure of the entry, never a crash.
//!
//! ## Example
//!
//! ```rust
//! use fill_core::catalog::{self, ConduitType, TradeSize, WireSize, WireType};
//!
//! let thhn_12 = catalog::wire_area(WireType::Thhn, WireSize::Awg12).unwrap();
//! assert_eq!(thhn_12.0, 0.0133);
//!
//! let emt_half = catalog::conduit_area(ConduitType::Emt, TradeSize::Half).unwrap();
//! assert_eq!(emt_half.total.0, 0.304);
//!
//! // Trade sizes always come back smallest first
//! let sizes = catalog::conduit_sizes(ConduitType::Emt);
//! assert_eq!(sizes.first(), Some(&TradeSize::Half));
//! ```

pub mod conduit_types;
pub mod presets;
pub mod sizes;
pub mod wire_types;

pub use conduit_types::{ConduitArea, ConduitCategory, ConduitType, ConduitTypeSpec};
pub use presets::{PresetGroup, PresetWireSpec, WirePreset, WireRole};
pub use sizes::{TradeSize, WireSize};
pub use wire_types::{WireCategory, WireType, WireTypeSpec};

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::units::SquareInches;

const WIRE_TYPES_TOML: &str = include_str!("../../data/wire_types.toml");
const CONDUIT_TYPES_TOML: &str = include_str!("../../data/conduit_types.toml");
const PRESETS_TOML: &str = include_str!("../../data/presets.toml");

/// Largest gap tolerated between the published 40% column and `total × 0.40`.
/// Table 4 rounds both columns to three places independently.
const FILL40_TOLERANCE: f64 = 0.0015;

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_toml_strs(WIRE_TYPES_TOML, CONDUIT_TYPES_TOML, PRESETS_TOML)
        .unwrap_or_else(|err| panic!("embedded NEC catalog is invalid: {err}"))
});

/// The embedded catalog
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

// ============================================================================
// TOML document shapes
// ============================================================================

#[derive(Deserialize)]
struct WireTypeDocument {
    wire_type: Vec<RawWireType>,
}

#[derive(Deserialize)]
struct RawWireType {
    key: WireType,
    label: String,
    long_name: String,
    category: WireCategory,
    wet: bool,
    temp_ratings: Vec<u16>,
    insulation: String,
    applications: Vec<String>,
    nec_ref: String,
    #[serde(default)]
    areas: BTreeMap<String, f64>,
}

#[derive(Deserialize)]
struct ConduitTypeDocument {
    conduit_type: Vec<RawConduitType>,
}

#[derive(Deserialize)]
struct RawConduitType {
    key: ConduitType,
    name: String,
    category: ConduitCategory,
    article: String,
    description: String,
    applications: Vec<String>,
    sizes: BTreeMap<String, RawConduitArea>,
}

#[derive(Deserialize)]
struct RawConduitArea {
    total: f64,
    fill40: f64,
}

#[derive(Deserialize)]
struct PresetDocument {
    preset: Vec<WirePreset>,
}

// ============================================================================
// Catalog
// ============================================================================

/// Validated reference tables.
///
/// Every [`WireType`] and [`ConduitType`] variant has exactly one entry,
/// stored in variant order, so typed lookups never miss.
#[derive(Debug, Clone)]
pub struct Catalog {
    wire_types: Vec<WireTypeSpec>,
    conduit_types: Vec<ConduitTypeSpec>,
    presets: Vec<WirePreset>,
}

impl Catalog {
    /// Parse and validate the three table documents.
    pub fn from_toml_strs(wire_types: &str, conduit_types: &str, presets: &str) -> CalcResult<Self> {
        let wire_doc: WireTypeDocument = toml::from_str(wire_types)?;
        let conduit_doc: ConduitTypeDocument = toml::from_str(conduit_types)?;
        let preset_doc: PresetDocument = toml::from_str(presets)?;

        let wire_types = build_wire_types(wire_doc.wire_type)?;
        let conduit_types = build_conduit_types(conduit_doc.conduit_type)?;
        let presets = validate_presets(preset_doc.preset)?;

        debug!(
            wire_types = wire_types.len(),
            conduit_types = conduit_types.len(),
            presets = presets.len(),
            "loaded NEC catalog"
        );

        Ok(Catalog {
            wire_types,
            conduit_types,
            presets,
        })
    }

    /// Catalog entry for a wire type
    pub fn wire_type(&self, wire_type: WireType) -> &WireTypeSpec {
        // Index matches variant order, checked in build_wire_types
        &self.wire_types[wire_type as usize]
    }

    /// Catalog entry for a conduit type
    pub fn conduit_type(&self, conduit_type: ConduitType) -> &ConduitTypeSpec {
        &self.conduit_types[conduit_type as usize]
    }

    /// All wire types in catalog order
    pub fn wire_types(&self) -> &[WireTypeSpec] {
        &self.wire_types
    }

    /// All conduit types in catalog order
    pub fn conduit_types(&self) -> &[ConduitTypeSpec] {
        &self.conduit_types
    }

    /// All presets in catalog order
    pub fn presets(&self) -> &[WirePreset] {
        &self.presets
    }

    /// Preset by key
    pub fn preset(&self, key: &str) -> Option<&WirePreset> {
        self.presets.iter().find(|p| p.key == key)
    }

    pub fn presets_in_group(&self, group: PresetGroup) -> Vec<&WirePreset> {
        self.presets.iter().filter(|p| p.group == group).collect()
    }

    pub fn wire_types_in_category(&self, category: WireCategory) -> Vec<&WireTypeSpec> {
        self.wire_types.iter().filter(|w| w.category == category).collect()
    }

    pub fn conduit_types_in_category(&self, category: ConduitCategory) -> Vec<&ConduitTypeSpec> {
        self.conduit_types.iter().filter(|c| c.category == category).collect()
    }

    /// Case-insensitive search over key, label, long name, insulation and applications
    pub fn search_wire_types(&self, term: &str) -> Vec<&WireTypeSpec> {
        self.wire_types.iter().filter(|w| w.matches(term)).collect()
    }

    pub fn wire_area(&self, wire_type: WireType, size: WireSize) -> Option<SquareInches> {
        self.wire_type(wire_type).area(size)
    }

    pub fn conduit_area(&self, conduit_type: ConduitType, size: TradeSize) -> Option<ConduitArea> {
        self.conduit_type(conduit_type).area(size)
    }
}

fn build_wire_types(raw: Vec<RawWireType>) -> CalcResult<Vec<WireTypeSpec>> {
    let mut specs = Vec::with_capacity(raw.len());
    for entry in raw {
        let entry_name = format!("wire type {}", entry.key.key());

        let mut areas = Vec::with_capacity(entry.areas.len());
        for (label, area) in entry.areas {
            let size = WireSize::from_label(&label)
                .ok_or_else(|| CalcError::catalog(&entry_name, format!("unknown size '{label}'")))?;
            if !area.is_finite() || area <= 0.0 {
                return Err(CalcError::catalog(
                    &entry_name,
                    format!("area for size {label} must be positive, got {area}"),
                ));
            }
            areas.push((size, SquareInches(area)));
        }
        areas.sort_by_key(|(size, _)| *size);

        if entry.key.is_custom() && !areas.is_empty() {
            return Err(CalcError::catalog(&entry_name, "custom wire type must not list areas"));
        }
        if !entry.key.is_custom() && areas.is_empty() {
            return Err(CalcError::catalog(&entry_name, "no conductor areas listed"));
        }

        specs.push(WireTypeSpec {
            key: entry.key,
            label: entry.label,
            long_name: entry.long_name,
            category: entry.category,
            wet: entry.wet,
            temp_ratings: entry.temp_ratings,
            insulation: entry.insulation,
            applications: entry.applications,
            nec_ref: entry.nec_ref,
            areas,
        });
    }

    specs.sort_by_key(|spec| spec.key);
    let keys: Vec<WireType> = specs.iter().map(|s| s.key).collect();
    if keys != WireType::ALL {
        let missing: Vec<&str> = WireType::ALL
            .iter()
            .filter(|t| !keys.contains(t))
            .map(|t| t.key())
            .collect();
        return Err(CalcError::catalog(
            "wire types",
            format!("each wire type must appear exactly once (missing: {missing:?})"),
        ));
    }
    Ok(specs)
}

fn build_conduit_types(raw: Vec<RawConduitType>) -> CalcResult<Vec<ConduitTypeSpec>> {
    let mut specs = Vec::with_capacity(raw.len());
    for entry in raw {
        let entry_name = format!("conduit type {}", entry.key.key());

        let mut sizes = Vec::with_capacity(entry.sizes.len());
        for (label, area) in entry.sizes {
            let size = TradeSize::from_label(&label)
                .ok_or_else(|| CalcError::catalog(&entry_name, format!("unknown trade size '{label}'")))?;
            if !area.total.is_finite() || area.total <= 0.0 {
                return Err(CalcError::catalog(
                    &entry_name,
                    format!("total area for {label} must be positive, got {}", area.total),
                ));
            }
            if (area.fill40 - area.total * 0.40).abs() > FILL40_TOLERANCE {
                return Err(CalcError::catalog(
                    &entry_name,
                    format!(
                        "40% column for {label} is {} but total x 0.40 is {:.4}",
                        area.fill40,
                        area.total * 0.40
                    ),
                ));
            }
            sizes.push((
                size,
                ConduitArea {
                    total: SquareInches(area.total),
                    fill40: SquareInches(area.fill40),
                },
            ));
        }
        if sizes.is_empty() {
            return Err(CalcError::catalog(&entry_name, "no trade sizes listed"));
        }
        // Scan order for minimum sizing is physical order, not document order
        sizes.sort_by_key(|(size, _)| *size);

        specs.push(ConduitTypeSpec {
            key: entry.key,
            name: entry.name,
            category: entry.category,
            article: entry.article,
            description: entry.description,
            applications: entry.applications,
            sizes,
        });
    }

    specs.sort_by_key(|spec| spec.key);
    let keys: Vec<ConduitType> = specs.iter().map(|s| s.key).collect();
    if keys != ConduitType::ALL {
        return Err(CalcError::catalog(
            "conduit types",
            "each conduit type must appear exactly once",
        ));
    }
    Ok(specs)
}

fn validate_presets(presets: Vec<WirePreset>) -> CalcResult<Vec<WirePreset>> {
    let mut seen = HashSet::new();
    for preset in &presets {
        let entry_name = format!("preset {}", preset.key);
        if !seen.insert(preset.key.as_str()) {
            return Err(CalcError::catalog(&entry_name, "duplicate preset key"));
        }
        if preset.wires.is_empty() {
            return Err(CalcError::catalog(&entry_name, "preset lists no wires"));
        }
        for wire in &preset.wires {
            if wire.quantity == 0 {
                return Err(CalcError::catalog(&entry_name, "wire quantity must be at least 1"));
            }
            if wire.wire_type.is_custom() {
                return Err(CalcError::catalog(&entry_name, "presets cannot use custom wire"));
            }
        }
    }
    Ok(presets)
}

// ============================================================================
// Lookups against the embedded catalog
// ============================================================================

/// Area of one conductor, `None` if the table doesn't list that size
pub fn wire_area(wire_type: WireType, size: WireSize) -> Option<SquareInches> {
    catalog().wire_area(wire_type, size)
}

/// String-keyed form of [`wire_area`]; unknown keys give `None`
pub fn wire_area_by_key(wire_type: &str, size: &str) -> Option<SquareInches> {
    let wire_type = WireType::from_key(wire_type)?;
    let size = WireSize::from_label(size)?;
    wire_area(wire_type, size)
}

/// Sizes listed for a wire type, smallest first (empty for CUSTOM)
pub fn wire_sizes(wire_type: WireType) -> Vec<WireSize> {
    catalog().wire_type(wire_type).sizes()
}

/// Trade sizes a conduit type is made in, smallest first
pub fn conduit_sizes(conduit_type: ConduitType) -> Vec<TradeSize> {
    catalog().conduit_type(conduit_type).trade_sizes()
}

/// Area data for a conduit type and trade size
pub fn conduit_area(conduit_type: ConduitType, size: TradeSize) -> Option<ConduitArea> {
    catalog().conduit_area(conduit_type, size)
}

/// String-keyed form of [`conduit_area`]; unknown keys give `None`
pub fn conduit_area_by_key(conduit_type: &str, size: &str) -> Option<ConduitArea> {
    let conduit_type = ConduitType::from_key(conduit_type)?;
    let size = TradeSize::from_label(size)?;
    conduit_area(conduit_type, size)
}

/// Preset by key
pub fn preset(key: &str) -> Option<&'static WirePreset> {
    catalog().preset(key)
}

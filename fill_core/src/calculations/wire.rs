//! Runtime wire records.
//!
//! [`WireEntry`] is what the aggregator consumes. It stays string-keyed
//! because it mirrors form input: an entry may be half-filled (empty type)
//! or name a size its type doesn't list while someone is mid-edit. Keys are
//! parsed into catalog types during aggregation, and entries that fail are
//! skipped rather than rejected. The same goes for quantities: anything that
//! isn't a whole number deserializes to [`INVALID_QUANTITY`].

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::catalog::WireRole;

/// Where an expanded wire came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetProvenance {
    pub preset_instance_id: String,
    pub preset_key: String,
    pub preset_name: String,
    /// 1-based circuit index within the instance
    pub circuit_number: u32,
}

/// A wire (or group of identical wires) in the calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "id": "wire-1",
///   "type": "THHN",
///   "size": "12",
///   "quantity": 2,
///   "role": "phase"
/// }
/// ```
///
/// A custom conductor carries its own area:
///
/// ```json
/// { "id": "wire-2", "type": "CUSTOM", "size": "custom", "custom_area_in2": 0.05, "quantity": 1 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEntry {
    pub id: String,

    /// Catalog key of the insulation type; empty while incomplete
    #[serde(rename = "type", default)]
    pub wire_type: String,

    /// Size label (e.g., "12", "4/0"); ignored for CUSTOM
    #[serde(default)]
    pub size: String,

    /// Per-conductor area for CUSTOM wires, square inches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_area_in2: Option<f64>,

    /// Number of identical conductors
    #[serde(default = "invalid_quantity", deserialize_with = "lenient_quantity")]
    pub quantity: i64,

    #[serde(default)]
    pub role: WireRole,

    /// Set on wires produced by preset expansion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<PresetProvenance>,
}

impl WireEntry {
    /// A catalog wire
    pub fn new(
        id: impl Into<String>,
        wire_type: impl Into<String>,
        size: impl Into<String>,
        quantity: i64,
        role: WireRole,
    ) -> Self {
        WireEntry {
            id: id.into(),
            wire_type: wire_type.into(),
            size: size.into(),
            custom_area_in2: None,
            quantity,
            role,
            provenance: None,
        }
    }

    /// A user-defined conductor of the given per-conductor area
    pub fn custom(id: impl Into<String>, area_in2: f64, quantity: i64, role: WireRole) -> Self {
        WireEntry {
            id: id.into(),
            wire_type: "CUSTOM".to_string(),
            size: "custom".to_string(),
            custom_area_in2: Some(area_in2),
            quantity,
            role,
            provenance: None,
        }
    }

    /// No insulation type chosen yet
    pub fn is_incomplete(&self) -> bool {
        self.wire_type.trim().is_empty()
    }

    /// Produced by a preset rather than entered individually
    pub fn is_from_preset(&self) -> bool {
        self.provenance.is_some()
    }
}

/// Quantity recorded for input that isn't a whole number
pub const INVALID_QUANTITY: i64 = 0;

fn invalid_quantity() -> i64 {
    INVALID_QUANTITY
}

/// Accepts integers, integer-valued floats and numeric strings.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(QuantityVisitor)
}

struct QuantityVisitor;

fn whole(value: f64) -> i64 {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        value as i64
    } else {
        INVALID_QUANTITY
    }
}

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a conductor quantity")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        Ok(i64::try_from(v).unwrap_or(i64::MAX))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
        Ok(whole(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        let v = v.trim();
        Ok(v
            .parse::<i64>()
            .ok()
            .or_else(|| v.parse::<f64>().ok().map(whole))
            .unwrap_or(INVALID_QUANTITY))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<i64, E> {
        Ok(INVALID_QUANTITY)
    }

    fn visit_unit<E: de::Error>(self) -> Result<i64, E> {
        Ok(INVALID_QUANTITY)
    }

    fn visit_none<E: de::Error>(self) -> Result<i64, E> {
        Ok(INVALID_QUANTITY)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<i64, D::Error> {
        deserializer.deserialize_any(QuantityVisitor)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<i64, A::Error> {
        while seq.next_element::<de::IgnoredAny>()?.is_some() {}
        Ok(INVALID_QUANTITY)
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<i64, A::Error> {
        while map.next_entry::<de::IgnoredAny, de::IgnoredAny>()?.is_some() {}
        Ok(INVALID_QUANTITY)
    }
}

/// A preset repeated some number of circuits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetInstance {
    pub id: String,
    pub preset_key: String,
    /// Number of circuits
    pub quantity: u32,
}

impl PresetInstance {
    pub fn new(id: impl Into<String>, preset_key: impl Into<String>, quantity: u32) -> Self {
        PresetInstance {
            id: id.into(),
            preset_key: preset_key.into(),
            quantity,
        }
    }
}

//! # Area Aggregation
//!
//! Sums conductor area over a set of wire entries.
//!
//! ## Per-wire resolution
//!
//! 1. Entries with an empty type are incomplete and ignored outright.
//! 2. CUSTOM entries use their own area, which must be in (0, 10] in².
//!    Anything larger is almost certainly mm² typed into an in² field.
//! 3. Catalog entries look up (type, size) in Table 5.
//! 4. Quantity must be a positive integer.
//!
//! An entry failing 2-4 is skipped and recorded in [`Aggregate::skipped`];
//! the rest of the bundle is still computed. Only when nothing contributes
//! does aggregation return `None`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::wire::WireEntry;
use crate::catalog::{self, Catalog, WireSize, WireType};
use crate::units::{SquareInches, SquareMillimeters};

/// Largest per-conductor area accepted for a CUSTOM wire, in²
pub const CUSTOM_AREA_MAX_IN2: f64 = 10.0;

/// Label used in breakdowns for CUSTOM wires
pub const CUSTOM_WIRE_LABEL: &str = "Custom";

/// Why an entry was left out of the totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Type key isn't in the catalog
    UnknownWireType,
    /// Size isn't listed for this type
    UnknownSize,
    /// CUSTOM area missing or outside (0, 10] in²
    CustomAreaOutOfRange,
    /// Quantity below 1
    InvalidQuantity,
}

impl SkipReason {
    pub fn description(&self) -> &'static str {
        match self {
            SkipReason::UnknownWireType => "wire type not in catalog",
            SkipReason::UnknownSize => "size not listed for this wire type",
            SkipReason::CustomAreaOutOfRange => "custom area must be greater than 0 and at most 10 in²",
            SkipReason::InvalidQuantity => "quantity must be a positive whole number",
        }
    }
}

/// An entry that did not contribute to the totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedWire {
    pub id: String,
    pub reason: SkipReason,
}

/// A contributing entry with its resolved areas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireBreakdown {
    #[serde(flatten)]
    pub entry: WireEntry,
    /// Area of one conductor (in²)
    pub area_each_in2: f64,
    /// `area_each_in2 × quantity` (in²)
    pub area_total_in2: f64,
    /// Catalog display label, or "Custom"
    pub wire_label: String,
}

impl WireBreakdown {
    /// Size column for reports: "#12", "4/0", "250 kcmil" or
    /// "Custom (0.0500 in², 32.26 mm²)"
    pub fn size_display(&self) -> String {
        if self.entry.wire_type == WireType::Custom.key() {
            let area = SquareInches(self.area_each_in2);
            return format!("Custom ({area}, {})", SquareMillimeters::from(area));
        }
        WireSize::from_label(&self.entry.size)
            .map(|s| s.display_gauge())
            .unwrap_or_else(|| self.entry.size.clone())
    }
}

/// Totals over every contributing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Sum of `area_total_in2` (in²)
    pub total_area_in2: f64,
    /// Sum of quantity over contributing entries
    pub total_count: u32,
    pub breakdown: Vec<WireBreakdown>,
    pub skipped: Vec<SkippedWire>,
    /// More than one insulation type among contributing entries
    pub mixed_insulation: bool,
}

/// Aggregate against the embedded catalog
pub fn aggregate(wires: &[WireEntry]) -> Option<Aggregate> {
    aggregate_with_catalog(catalog::catalog(), wires)
}

/// Aggregate against an explicit catalog.
///
/// Returns `None` when no entry contributes.
pub fn aggregate_with_catalog(catalog: &Catalog, wires: &[WireEntry]) -> Option<Aggregate> {
    let mut total_area_in2 = 0.0;
    let mut total_count: u32 = 0;
    let mut breakdown = Vec::new();
    let mut skipped = Vec::new();
    let mut types = BTreeSet::new();

    for wire in wires.iter().filter(|w| !w.is_incomplete()) {
        match resolve(catalog, wire) {
            Ok((wire_type, area_each, quantity)) => {
                let area_total = area_each * f64::from(quantity);
                total_area_in2 += area_total;
                total_count = total_count.saturating_add(quantity);
                types.insert(wire_type);

                let wire_label = if wire_type.is_custom() {
                    CUSTOM_WIRE_LABEL.to_string()
                } else {
                    catalog.wire_type(wire_type).label.clone()
                };
                breakdown.push(WireBreakdown {
                    entry: wire.clone(),
                    area_each_in2: area_each,
                    area_total_in2: area_total,
                    wire_label,
                });
            }
            Err(reason) => {
                warn!(wire = %wire.id, reason = reason.description(), "skipping wire");
                skipped.push(SkippedWire {
                    id: wire.id.clone(),
                    reason,
                });
            }
        }
    }

    if breakdown.is_empty() {
        debug!(skipped = skipped.len(), "no contributing wires");
        return None;
    }

    debug!(
        total_area_in2,
        total_count,
        contributing = breakdown.len(),
        skipped = skipped.len(),
        "aggregated wires"
    );

    Some(Aggregate {
        total_area_in2,
        total_count,
        breakdown,
        skipped,
        mixed_insulation: types.len() > 1,
    })
}

/// Resolve (type, area each, quantity) for one complete entry
fn resolve(catalog: &Catalog, wire: &WireEntry) -> Result<(WireType, f64, u32), SkipReason> {
    let wire_type = WireType::from_key(wire.wire_type.trim()).ok_or(SkipReason::UnknownWireType)?;

    let area_each = if wire_type.is_custom() {
        let area = wire.custom_area_in2.unwrap_or(0.0);
        // Written so NaN fails too
        if !(area > 0.0 && area <= CUSTOM_AREA_MAX_IN2) {
            return Err(SkipReason::CustomAreaOutOfRange);
        }
        area
    } else {
        let size = WireSize::from_label(&wire.size).ok_or(SkipReason::UnknownSize)?;
        catalog
            .wire_area(wire_type, size)
            .ok_or(SkipReason::UnknownSize)?
            .value()
    };

    let quantity = u32::try_from(wire.quantity)
        .ok()
        .filter(|q| *q >= 1)
        .ok_or(SkipReason::InvalidQuantity)?;

    Ok((wire_type, area_each, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WireRole;

    fn thhn(id: &str, size: &str, quantity: i64, role: WireRole) -> WireEntry {
        WireEntry::new(id, "THHN", size, quantity, role)
    }

    #[test]
    fn test_thhn_12_three_conductors() {
        let wires = vec![
            thhn("w1", "12", 2, WireRole::Phase),
            thhn("w2", "12", 1, WireRole::Ground),
        ];
        let agg = aggregate(&wires).unwrap();

        assert!((agg.total_area_in2 - 0.0399).abs() < 1e-9);
        assert_eq!(agg.total_count, 3);
        assert_eq!(agg.breakdown.len(), 2);
        assert_eq!(agg.breakdown[0].area_each_in2, 0.0133);
        assert!((agg.breakdown[0].area_total_in2 - 0.0266).abs() < 1e-12);
        assert_eq!(agg.breakdown[0].wire_label, "THHN");
        assert!(!agg.mixed_insulation);
        assert!(agg.skipped.is_empty());
    }

    #[test]
    fn test_incomplete_entries_ignored() {
        let wires = vec![
            WireEntry::new("blank", "", "12", 5, WireRole::Phase),
            thhn("w1", "12", 1, WireRole::Phase),
        ];
        let agg = aggregate(&wires).unwrap();
        assert_eq!(agg.total_count, 1);
        assert!(agg.skipped.is_empty());
    }

    #[test]
    fn test_only_incomplete_is_none() {
        let wires = vec![WireEntry::new("blank", "", "12", 1, WireRole::Phase)];
        assert!(aggregate(&wires).is_none());
        assert!(aggregate(&[]).is_none());
    }

    #[test]
    fn test_custom_area_bounds() {
        let over = WireEntry::custom("c1", 11.0, 1, WireRole::Phase);
        assert!(aggregate(&[over.clone()]).is_none());

        let zero = WireEntry::custom("c2", 0.0, 1, WireRole::Phase);
        let nan = WireEntry::custom("c3", f64::NAN, 1, WireRole::Phase);
        let mut missing = WireEntry::custom("c4", 1.0, 1, WireRole::Phase);
        missing.custom_area_in2 = None;
        let max = WireEntry::custom("c5", 10.0, 1, WireRole::Phase);

        let agg = aggregate(&[over, zero, nan, missing, max]).unwrap();
        assert_eq!(agg.breakdown.len(), 1);
        assert_eq!(agg.breakdown[0].entry.id, "c5");
        assert_eq!(agg.breakdown[0].wire_label, "Custom");
        assert_eq!(agg.total_area_in2, 10.0);
        assert_eq!(agg.skipped.len(), 4);
        assert!(agg
            .skipped
            .iter()
            .all(|s| s.reason == SkipReason::CustomAreaOutOfRange));
    }

    #[test]
    fn test_unknown_type_and_size_skipped() {
        let wires = vec![
            WireEntry::new("bad-type", "NM_B", "12", 1, WireRole::Phase),
            thhn("bad-size", "500", 1, WireRole::Phase),
            WireEntry::new("tfn-22", "TFN", "22", 8, WireRole::Control),
            thhn("ok", "10", 2, WireRole::Phase),
        ];
        let agg = aggregate(&wires).unwrap();

        assert_eq!(agg.total_count, 2);
        assert_eq!(
            agg.skipped,
            vec![
                SkippedWire { id: "bad-type".to_string(), reason: SkipReason::UnknownWireType },
                SkippedWire { id: "bad-size".to_string(), reason: SkipReason::UnknownSize },
                SkippedWire { id: "tfn-22".to_string(), reason: SkipReason::UnknownSize },
            ]
        );
    }

    #[test]
    fn test_invalid_quantity_not_counted() {
        let wires = vec![
            thhn("zero", "12", 0, WireRole::Phase),
            thhn("negative", "12", -3, WireRole::Phase),
            thhn("ok", "12", 2, WireRole::Phase),
        ];
        let agg = aggregate(&wires).unwrap();

        // Rejected entries contribute neither area nor count
        assert_eq!(agg.total_count, 2);
        assert!((agg.total_area_in2 - 0.0266).abs() < 1e-12);
        assert_eq!(agg.skipped.len(), 2);
        assert!(agg.skipped.iter().all(|s| s.reason == SkipReason::InvalidQuantity));
    }

    #[test]
    fn test_mixed_insulation() {
        let same_type = vec![
            thhn("a", "12", 3, WireRole::Phase),
            thhn("b", "10", 1, WireRole::Neutral),
            thhn("c", "8", 2, WireRole::Ground),
        ];
        assert!(!aggregate(&same_type).unwrap().mixed_insulation);

        let mixed = vec![
            thhn("a", "12", 1, WireRole::Phase),
            WireEntry::new("b", "THWN_2", "12", 1, WireRole::Phase),
        ];
        assert!(aggregate(&mixed).unwrap().mixed_insulation);
    }

    #[test]
    fn test_skipped_type_does_not_make_mixed() {
        let wires = vec![
            thhn("a", "12", 1, WireRole::Phase),
            WireEntry::new("b", "THWN_2", "22", 1, WireRole::Phase),
        ];
        assert!(!aggregate(&wires).unwrap().mixed_insulation);
    }

    #[test]
    fn test_size_display() {
        let wires = vec![
            thhn("a", "12", 1, WireRole::Phase),
            thhn("b", "4/0", 1, WireRole::Phase),
            thhn("c", "250", 1, WireRole::Phase),
            WireEntry::custom("d", 0.05, 1, WireRole::Phase),
        ];
        let agg = aggregate(&wires).unwrap();
        let sizes: Vec<String> = agg.breakdown.iter().map(|b| b.size_display()).collect();
        assert_eq!(sizes, vec!["#12", "4/0", "250 kcmil", "Custom (0.0500 in², 32.26 mm²)"]);
    }

    #[test]
    fn test_breakdown_serializes_flat() {
        let agg = aggregate(&[thhn("a", "12", 1, WireRole::Ground)]).unwrap();
        let json = serde_json::to_value(&agg.breakdown[0]).unwrap();
        assert_eq!(json["id"], "a");
        assert_eq!(json["type"], "THHN");
        assert_eq!(json["role"], "ground");
        assert_eq!(json["wire_label"], "THHN");
    }
}

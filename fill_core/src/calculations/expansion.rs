//! # Preset Expansion
//!
//! Flattens preset instances into concrete wire entries. An instance of N
//! circuits produces the preset's wire list N times, each copy tagged with
//! the instance id, preset key/name and 1-based circuit number.
//!
//! Output order is instance order, then circuit order, then the preset's
//! own wire order. Grouped reports depend on that order being stable.

use tracing::{debug, warn};

use crate::calculations::wire::{PresetInstance, PresetProvenance, WireEntry};
use crate::catalog::{self, Catalog};

/// Expand preset instances against the embedded catalog.
///
/// Instances naming an unknown preset are skipped.
///
/// ```rust
/// use fill_core::calculations::{expand_preset_instances, PresetInstance};
///
/// let wires = expand_preset_instances(&[PresetInstance::new("p1", "singlePhase120V", 3)]);
/// assert_eq!(wires.len(), 6); // 2 lines per circuit x 3 circuits
/// assert_eq!(wires[0].id, "p1-circuit0-wire0");
/// ```
pub fn expand_preset_instances(instances: &[PresetInstance]) -> Vec<WireEntry> {
    expand_with_catalog(catalog::catalog(), instances)
}

/// Expand preset instances against an explicit catalog
pub fn expand_with_catalog(catalog: &Catalog, instances: &[PresetInstance]) -> Vec<WireEntry> {
    let mut wires = Vec::new();

    for instance in instances {
        let Some(preset) = catalog.preset(&instance.preset_key) else {
            warn!(
                instance = %instance.id,
                preset = %instance.preset_key,
                "skipping preset instance with unknown preset key"
            );
            continue;
        };

        for circuit in 0..instance.quantity {
            for (wire_idx, spec) in preset.wires.iter().enumerate() {
                wires.push(WireEntry {
                    id: format!("{}-circuit{}-wire{}", instance.id, circuit, wire_idx),
                    wire_type: spec.wire_type.key().to_string(),
                    size: spec.size.clone(),
                    custom_area_in2: None,
                    quantity: i64::from(spec.quantity),
                    role: spec.role,
                    provenance: Some(PresetProvenance {
                        preset_instance_id: instance.id.clone(),
                        preset_key: instance.preset_key.clone(),
                        preset_name: preset.name.clone(),
                        circuit_number: circuit + 1,
                    }),
                });
            }
        }
    }

    debug!(instances = instances.len(), wires = wires.len(), "expanded presets");
    wires
}

/// Expanded preset wires followed by individual wires, the full input to
/// a calculation
pub fn combine_wires(instances: &[PresetInstance], individual: &[WireEntry]) -> Vec<WireEntry> {
    let mut wires = expand_preset_instances(instances);
    wires.extend(individual.iter().cloned());
    wires
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WireRole;

    #[test]
    fn test_single_phase_three_circuits() {
        let wires = expand_preset_instances(&[PresetInstance::new("p1", "singlePhase120V", 3)]);

        // 2 preset lines per circuit
        assert_eq!(wires.len(), 6);

        let circuits: Vec<u32> = wires
            .iter()
            .map(|w| w.provenance.as_ref().unwrap().circuit_number)
            .collect();
        assert_eq!(circuits, vec![1, 1, 2, 2, 3, 3]);

        let phase: i64 = wires
            .iter()
            .filter(|w| w.role == WireRole::Phase)
            .map(|w| w.quantity)
            .sum();
        let ground: i64 = wires
            .iter()
            .filter(|w| w.role == WireRole::Ground)
            .map(|w| w.quantity)
            .sum();
        assert_eq!(phase, 6);
        assert_eq!(ground, 3);
    }

    #[test]
    fn test_ids_and_provenance() {
        let wires = expand_preset_instances(&[PresetInstance::new("inst", "threePhase480V", 2)]);
        assert_eq!(wires[0].id, "inst-circuit0-wire0");
        assert_eq!(wires[1].id, "inst-circuit0-wire1");
        assert_eq!(wires[2].id, "inst-circuit1-wire0");

        let prov = wires[3].provenance.as_ref().unwrap();
        assert_eq!(prov.preset_instance_id, "inst");
        assert_eq!(prov.preset_key, "threePhase480V");
        assert_eq!(prov.preset_name, "480V Three Phase (3-wire + ground)");
        assert_eq!(prov.circuit_number, 2);

        assert_eq!(wires[0].wire_type, "THWN_2");
        assert_eq!(wires[0].size, "10");
        assert_eq!(wires[0].quantity, 3);
    }

    #[test]
    fn test_instance_order_preserved() {
        let wires = expand_preset_instances(&[
            PresetInstance::new("b", "fireAlarm", 1),
            PresetInstance::new("a", "controlCircuit", 1),
        ]);
        let keys: Vec<&str> = wires
            .iter()
            .map(|w| w.provenance.as_ref().unwrap().preset_key.as_str())
            .collect();
        assert_eq!(keys, vec!["fireAlarm", "fireAlarm", "controlCircuit", "controlCircuit"]);
    }

    #[test]
    fn test_unknown_preset_skipped() {
        let wires = expand_preset_instances(&[
            PresetInstance::new("x", "doesNotExist", 4),
            PresetInstance::new("y", "pvSolar", 1),
        ]);
        assert_eq!(wires.len(), 2);
        assert!(wires.iter().all(|w| w.id.starts_with("y-")));
    }

    #[test]
    fn test_zero_circuits_expands_to_nothing() {
        let wires = expand_preset_instances(&[PresetInstance::new("z", "pvSolar", 0)]);
        assert!(wires.is_empty());
    }

    #[test]
    fn test_combine_puts_presets_first() {
        let individual = vec![WireEntry::new("w1", "THHN", "12", 1, WireRole::Phase)];
        let wires = combine_wires(&[PresetInstance::new("p", "waterHeater", 1)], &individual);
        assert_eq!(wires.len(), 3);
        assert!(wires[0].is_from_preset());
        assert_eq!(wires[2].id, "w1");
    }
}

//! Grouped view of a result breakdown: one group per preset circuit, then
//! the individually entered wires.

use serde::{Deserialize, Serialize};

use crate::calculations::aggregate::WireBreakdown;

/// Title of the group holding wires entered one at a time
pub const INDIVIDUAL_GROUP_TITLE: &str = "Individual Wires";

/// Rows of the breakdown that belong together in a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownGroup {
    /// "{preset name} - Circuit {n}" or "Individual Wires"
    pub title: String,
    pub preset_instance_id: Option<String>,
    pub circuit_number: Option<u32>,
    pub wires: Vec<WireBreakdown>,
    /// Sum of `area_total_in2` over the group (in²)
    pub subtotal_in2: f64,
}

impl BreakdownGroup {
    pub fn is_individual(&self) -> bool {
        self.preset_instance_id.is_none()
    }

    pub fn conductor_count(&self) -> i64 {
        self.wires.iter().map(|w| w.entry.quantity).sum()
    }
}

/// Group breakdown rows by (preset instance, circuit) in first-appearance
/// order, with every row lacking provenance collected last.
///
/// The individual group is omitted when empty.
pub fn group_breakdown(breakdown: &[WireBreakdown]) -> Vec<BreakdownGroup> {
    let mut groups: Vec<BreakdownGroup> = Vec::new();
    let mut individual: Vec<WireBreakdown> = Vec::new();

    for row in breakdown {
        let Some(prov) = &row.entry.provenance else {
            individual.push(row.clone());
            continue;
        };

        let existing = groups.iter_mut().find(|g| {
            g.preset_instance_id.as_deref() == Some(prov.preset_instance_id.as_str())
                && g.circuit_number == Some(prov.circuit_number)
        });
        match existing {
            Some(group) => {
                group.subtotal_in2 += row.area_total_in2;
                group.wires.push(row.clone());
            }
            None => groups.push(BreakdownGroup {
                title: format!("{} - Circuit {}", prov.preset_name, prov.circuit_number),
                preset_instance_id: Some(prov.preset_instance_id.clone()),
                circuit_number: Some(prov.circuit_number),
                subtotal_in2: row.area_total_in2,
                wires: vec![row.clone()],
            }),
        }
    }

    if !individual.is_empty() {
        groups.push(BreakdownGroup {
            title: INDIVIDUAL_GROUP_TITLE.to_string(),
            preset_instance_id: None,
            circuit_number: None,
            subtotal_in2: individual.iter().map(|w| w.area_total_in2).sum(),
            wires: individual,
        });
    }

    groups
}

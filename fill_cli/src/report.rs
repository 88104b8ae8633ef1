//! Plain-text rendering of catalog listings and fill results.

use fill_core::calculations::{group_breakdown, FillOutcome, FillResult};
use fill_core::catalog::{self, ConduitCategory, ConduitType, PresetGroup, WireCategory, WireSize, WireTypeSpec};
use fill_core::fill_rules::nec_ref;

fn heading(out: &mut String, title: &str) {
    out.push_str(&format!("{title}\n"));
    out.push_str(&format!("{}\n", "=".repeat(title.chars().count())));
}

fn pass_fail(passes: bool) -> &'static str {
    if passes {
        "PASS ✓"
    } else {
        "FAIL ✗"
    }
}

pub fn wire_types(category: Option<WireCategory>, search: Option<&str>) -> String {
    let cat = catalog::catalog();
    let mut out = String::new();

    let categories: Vec<WireCategory> = match category {
        Some(c) => vec![c],
        None => WireCategory::ALL.to_vec(),
    };
    for category in categories {
        let specs: Vec<&WireTypeSpec> = cat
            .wire_types_in_category(category)
            .into_iter()
            .filter(|w| search.map_or(true, |term| w.matches(term)))
            .collect();
        if specs.is_empty() {
            continue;
        }
        heading(&mut out, category.display_name());
        for spec in specs {
            let sizes = spec.sizes();
            let range = match (sizes.first(), sizes.last()) {
                (Some(lo), Some(hi)) => format!("{} to {}", lo.display_gauge(), hi.display_gauge()),
                _ => "user-defined area".to_string(),
            };
            let temp = spec
                .max_temp_rating()
                .map(|t| format!("{t}°C"))
                .unwrap_or_default();
            out.push_str(&format!(
                "  {:<8} {:<48} {:>6} {:>4}  {}\n",
                spec.key.key(),
                spec.long_name,
                temp,
                if spec.wet { "wet" } else { "" },
                range
            ));
        }
        out.push('\n');
    }

    if out.is_empty() {
        out.push_str("No wire types match.\n");
    }
    out
}

pub fn conduit_types() -> String {
    let cat = catalog::catalog();
    let mut out = String::new();
    for category in ConduitCategory::ALL {
        heading(&mut out, category.display_name());
        for spec in cat.conduit_types_in_category(category) {
            let range = match (spec.smallest(), spec.largest()) {
                (Some(lo), Some(hi)) => format!("{lo} to {hi}"),
                _ => String::new(),
            };
            out.push_str(&format!(
                "  {:<7} {:<48} {:<12} {}\n",
                spec.key.key(),
                spec.name,
                spec.article,
                range
            ));
        }
        out.push('\n');
    }
    out
}

pub fn conduit_sizes(conduit_type: ConduitType) -> String {
    let spec = catalog::catalog().conduit_type(conduit_type);
    let mut out = String::new();
    heading(&mut out, &format!("{} - {} ({})", spec.key, spec.name, nec_ref::CONDUIT_DIMENSIONS));
    out.push_str(&format!(
        "  {:<8} {:>10} {:>10} {:>10} {:>10}\n",
        "Size", "Total", "53%", "31%", "40%"
    ));
    out.push_str(&format!("  {}\n", "-".repeat(52)));
    for (size, area) in &spec.sizes {
        out.push_str(&format!(
            "  {:<8} {:>10.3} {:>10.3} {:>10.3} {:>10.3}\n",
            size.to_string(),
            area.total.value(),
            area.allowable(0.53).value(),
            area.allowable(0.31).value(),
            area.fill40.value()
        ));
    }
    out.push_str("  Areas in in²\n");
    out
}

pub fn presets() -> String {
    let cat = catalog::catalog();
    let mut out = String::new();
    for group in PresetGroup::ALL {
        heading(&mut out, group.display_name());
        for preset in cat.presets_in_group(group) {
            let wires: Vec<String> = preset
                .wires
                .iter()
                .map(|w| {
                    let size = WireSize::from_label(&w.size)
                        .map(|s| s.display_gauge())
                        .unwrap_or_else(|| w.size.clone());
                    format!("{}x {} {} {}", w.quantity, size, w.wire_type, w.role)
                })
                .collect();
            out.push_str(&format!("  {:<24} {}\n", preset.key, preset.name));
            out.push_str(&format!("  {:<24} {}\n", "", wires.join(", ")));
        }
        out.push('\n');
    }
    out
}

/// Full text report for a calculation result
pub fn fill_result(result: &FillResult) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("Conduit Fill - {}", result.mode.display_name()));
    out.push('\n');

    out.push_str("Wires:\n");
    for group in group_breakdown(&result.breakdown) {
        out.push_str(&format!("  {} ({:.4} in²)\n", group.title, group.subtotal_in2));
        for row in &group.wires {
            out.push_str(&format!(
                "    {:>3} x {:<22} {:<8} {:>8.4} in² each {:>9.4} in²\n",
                row.entry.quantity,
                format!("{} {}", row.size_display(), row.wire_label),
                row.entry.role.display_name(),
                row.area_each_in2,
                row.area_total_in2
            ));
        }
    }
    out.push('\n');

    out.push_str(&format!(
        "Total: {} conductors, {:.4} in²\n",
        result.total_count, result.total_area_in2
    ));
    out.push_str(&format!(
        "Fill rule: {:.0}% - {}\n",
        result.fill_rule.percent_display(),
        result.fill_rule.reason
    ));
    if result.mixed_insulation {
        out.push_str("Note: mixed insulation types in this raceway\n");
    }
    for skipped in &result.skipped {
        out.push_str(&format!("Skipped {}: {}\n", skipped.id, skipped.reason.description()));
    }
    out.push('\n');

    match &result.outcome {
        FillOutcome::Minimum(min) => match &min.min_size_data {
            Some(data) => {
                out.push_str(&format!("Minimum {} size: {}\n", min.conduit_type, data.trade_size));
                out.push_str(&format!(
                    "  Allowable fill: {:.4} in² of {:.3} in²\n",
                    data.allowable_fill_in2, data.total_in2
                ));
                out.push_str(&format!(
                    "  Actual fill:    {:.4} in² ({:.1}%, {})\n",
                    data.actual_fill_in2,
                    data.fill_percentage,
                    data.fill_level().display_name()
                ));
            }
            None => {
                let largest = catalog::catalog()
                    .conduit_type(min.conduit_type)
                    .largest()
                    .map(|s| s.to_string())
                    .unwrap_or_default();
                out.push_str("No suitable conduit\n");
                out.push_str(&format!(
                    "  Bundle exceeds the largest {} size ({}). Use a larger raceway or split the run.\n",
                    min.conduit_type, largest
                ));
            }
        },
        FillOutcome::Check(check) => {
            out.push_str(&format!("Checked conduit: {}\n", check.conduit));
            out.push_str(&format!(
                "  Allowable fill: {:.4} in² of {:.3} in²\n",
                check.allowable_fill_in2,
                check.conduit_area.total.value()
            ));
            out.push_str(&format!(
                "  Actual fill:    {:.4} in² ({:.1}%, {})\n",
                check.actual_fill_in2,
                check.actual_fill_percent,
                check.fill_level().display_name()
            ));
            out.push_str(&format!("  Remaining:      {:.4} in²\n", check.remaining_in2()));
        }
    }

    out.push('\n');
    out.push_str(&format!("Overall: {}\n", pass_fail(result.passes())));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use fill_core::calculations::{calculate_fill, CalculationMode, ConduitSelection, WireEntry};
    use fill_core::catalog::{TradeSize, WireRole};

    #[test]
    fn test_find_report() {
        let wires = vec![
            WireEntry::new("w1", "THHN", "12", 2, WireRole::Phase),
            WireEntry::new("w2", "THHN", "12", 1, WireRole::Ground),
        ];
        let result = calculate_fill(&wires, CalculationMode::FindConduit, &ConduitSelection::default()).unwrap();
        let text = fill_result(&result);

        assert!(text.contains("Conduit Fill - Find Minimum Conduit"));
        assert!(text.contains("Individual Wires"));
        assert!(text.contains("Total: 3 conductors, 0.0399 in²"));
        assert!(text.contains("Fill rule: 40%"));
        assert!(text.contains("Minimum EMT size: 1/2\""));
        assert!(text.contains("PASS"));
    }

    #[test]
    fn test_no_suitable_conduit_report() {
        let wires = vec![WireEntry::new("w1", "RHH", "2000", 10, WireRole::Phase)];
        let result = calculate_fill(&wires, CalculationMode::FindConduit, &ConduitSelection::default()).unwrap();
        let text = fill_result(&result);
        assert!(text.contains("No suitable conduit"));
        assert!(text.contains("FAIL"));
    }

    #[test]
    fn test_check_report() {
        let wires = vec![WireEntry::custom("c1", 0.15, 1, WireRole::Phase)];
        let selection = ConduitSelection::new(ConduitType::Emt, TradeSize::Half);
        let result = calculate_fill(&wires, CalculationMode::CheckFit, &selection).unwrap();
        let text = fill_result(&result);
        assert!(text.contains("Checked conduit: 1/2\" EMT"));
        assert!(text.contains("Custom (0.1500 in², 96.77 mm²)"));
    }

    #[test]
    fn test_heading_underline() {
        let mut out = String::new();
        heading(&mut out, "Areas in²");
        assert_eq!(out, "Areas in²\n=========\n");
    }

    #[test]
    fn test_listings() {
        assert!(wire_types(None, None).contains("THHN"));
        assert!(wire_types(Some(WireCategory::Custom), None).contains("user-defined area"));
        assert!(wire_types(None, Some("zzzz")).contains("No wire types match"));
        assert!(conduit_types().contains("Flexible Conduits"));
        assert!(conduit_sizes(ConduitType::Emt).contains("0.304"));
        assert!(presets().contains("singlePhase120V"));
    }
}

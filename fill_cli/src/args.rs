//! Parsers for the compact wire and preset arguments.
//!
//! - `--wire TYPE:SIZE:QTY[:ROLE]` e.g. `THHN:12:3`, `thwn-2:4/0:4:phase`
//! - `--custom AREA:QTY[:ROLE]` e.g. `0.05:2:control`
//! - `--preset KEY[:CIRCUITS]` e.g. `singlePhase120V:3`

use clap::ValueEnum;
use fill_core::catalog::{self, WireCategory, WireRole, WireSize, WireType};
use fill_core::{CalcError, PresetInstance, WireEntry};

/// A `--wire` argument with its keys checked against the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct WireArg {
    pub wire_type: WireType,
    pub size: WireSize,
    pub quantity: u32,
    pub role: WireRole,
}

/// A `--custom` argument
#[derive(Debug, Clone, PartialEq)]
pub struct CustomArg {
    pub area_in2: f64,
    pub quantity: u32,
    pub role: WireRole,
}

/// A `--preset` argument
#[derive(Debug, Clone, PartialEq)]
pub struct PresetArg {
    pub key: String,
    pub circuits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Building,
    Fixture,
    HighTemp,
    Control,
    Custom,
}

impl From<CategoryArg> for WireCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Building => WireCategory::BuildingWire,
            CategoryArg::Fixture => WireCategory::FixtureWire,
            CategoryArg::HighTemp => WireCategory::HighTemp,
            CategoryArg::Control => WireCategory::ControlInstrumentation,
            CategoryArg::Custom => WireCategory::Custom,
        }
    }
}

fn parse_quantity(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(q) if q >= 1 => Ok(q),
        _ => Err(CalcError::invalid_input("quantity", s, "must be a whole number of at least 1").to_string()),
    }
}

fn parse_role(s: Option<&str>) -> Result<WireRole, String> {
    match s {
        None => Ok(WireRole::Phase),
        Some(r) => WireRole::from_str_flexible(r).ok_or_else(|| {
            CalcError::invalid_input("role", r, "expected phase, neutral, ground, control or spare").to_string()
        }),
    }
}

pub fn parse_wire(s: &str) -> Result<WireArg, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if !(3..=4).contains(&parts.len()) {
        return Err(format!("expected TYPE:SIZE:QTY[:ROLE], got '{s}'"));
    }

    let wire_type = WireType::from_str_flexible(parts[0]).map_err(|e| e.to_string())?;
    if wire_type.is_custom() {
        return Err(CalcError::invalid_input("type", parts[0], "use --custom AREA:QTY for custom conductors").to_string());
    }
    let size = WireSize::parse(parts[1]).map_err(|e| e.to_string())?;
    if catalog::wire_area(wire_type, size).is_none() {
        let listed: Vec<&str> = catalog::wire_sizes(wire_type).iter().map(|s| s.label()).collect();
        return Err(format!(
            "{wire_type} is not listed in size {} (listed: {})",
            size.label(),
            listed.join(", ")
        ));
    }

    Ok(WireArg {
        wire_type,
        size,
        quantity: parse_quantity(parts[2])?,
        role: parse_role(parts.get(3).copied())?,
    })
}

pub fn parse_custom(s: &str) -> Result<CustomArg, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(format!("expected AREA:QTY[:ROLE], got '{s}'"));
    }
    let area_in2 = parts[0]
        .trim()
        .parse::<f64>()
        .map_err(|_| CalcError::invalid_input("area", parts[0], "must be a number in in²").to_string())?;

    Ok(CustomArg {
        area_in2,
        quantity: parse_quantity(parts[1])?,
        role: parse_role(parts.get(2).copied())?,
    })
}

pub fn parse_preset(s: &str) -> Result<PresetArg, String> {
    let (key, circuits) = match s.split_once(':') {
        Some((key, circuits)) => (key, parse_quantity(circuits)?),
        None => (s, 1),
    };
    if catalog::preset(key).is_none() {
        return Err(format!("{} (see `fill presets`)", CalcError::unknown_preset(key)));
    }
    Ok(PresetArg {
        key: key.to_string(),
        circuits,
    })
}

/// Turn parsed arguments into calculation input, presets first
pub fn build_inputs(
    wires: &[WireArg],
    customs: &[CustomArg],
    presets: &[PresetArg],
) -> (Vec<PresetInstance>, Vec<WireEntry>) {
    let instances = presets
        .iter()
        .enumerate()
        .map(|(i, p)| PresetInstance::new(format!("preset-{}", i + 1), p.key.clone(), p.circuits))
        .collect();

    let mut entries: Vec<WireEntry> = wires
        .iter()
        .enumerate()
        .map(|(i, w)| {
            WireEntry::new(
                format!("wire-{}", i + 1),
                w.wire_type.key(),
                w.size.label(),
                i64::from(w.quantity),
                w.role,
            )
        })
        .collect();
    entries.extend(customs.iter().enumerate().map(|(i, c)| {
        WireEntry::custom(format!("custom-{}", i + 1), c.area_in2, i64::from(c.quantity), c.role)
    }));

    (instances, entries)
}

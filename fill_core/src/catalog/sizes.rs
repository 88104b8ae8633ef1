//! Conductor and Conduit Sizes
//!
//! Typed size designations for the two axes of the NEC tables:
//!
//! - [`WireSize`]: conductor gauge, 18 AWG up through 2000 kcmil
//! - [`TradeSize`]: nominal conduit trade size, 3/8" up through 6"
//!
//! Both enums are declared smallest-first and derive `Ord`, so sorting a
//! table by its size key yields physical order. The catalog relies on this
//! for the minimum-size scan instead of trusting document order.
//!
//! ## Labels
//!
//! Labels match the keys used in the NEC tables: `"12"`, `"1/0"`, `"250"` for
//! wire, `"3/4"`, `"1-1/4"` for conduit. Parsing is tolerant of the usual
//! decorations (`#12`, `12 AWG`, `250 kcmil`, `3/4"`).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Conductor size (AWG or kcmil)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WireSize {
    #[serde(rename = "18")]
    Awg18,
    #[serde(rename = "16")]
    Awg16,
    #[serde(rename = "14")]
    Awg14,
    #[serde(rename = "12")]
    Awg12,
    #[serde(rename = "10")]
    Awg10,
    #[serde(rename = "8")]
    Awg8,
    #[serde(rename = "6")]
    Awg6,
    #[serde(rename = "4")]
    Awg4,
    #[serde(rename = "3")]
    Awg3,
    #[serde(rename = "2")]
    Awg2,
    #[serde(rename = "1")]
    Awg1,
    /// 1/0 ("one aught")
    #[serde(rename = "1/0")]
    Aught1,
    /// 2/0
    #[serde(rename = "2/0")]
    Aught2,
    /// 3/0
    #[serde(rename = "3/0")]
    Aught3,
    /// 4/0
    #[serde(rename = "4/0")]
    Aught4,
    #[serde(rename = "250")]
    Kcmil250,
    #[serde(rename = "300")]
    Kcmil300,
    #[serde(rename = "350")]
    Kcmil350,
    #[serde(rename = "400")]
    Kcmil400,
    #[serde(rename = "500")]
    Kcmil500,
    #[serde(rename = "600")]
    Kcmil600,
    #[serde(rename = "700")]
    Kcmil700,
    #[serde(rename = "750")]
    Kcmil750,
    #[serde(rename = "800")]
    Kcmil800,
    #[serde(rename = "900")]
    Kcmil900,
    #[serde(rename = "1000")]
    Kcmil1000,
    #[serde(rename = "1250")]
    Kcmil1250,
    #[serde(rename = "1500")]
    Kcmil1500,
    #[serde(rename = "1750")]
    Kcmil1750,
    #[serde(rename = "2000")]
    Kcmil2000,
}

impl WireSize {
    /// All conductor sizes, smallest first
    pub const ALL: [WireSize; 30] = [
        WireSize::Awg18,
        WireSize::Awg16,
        WireSize::Awg14,
        WireSize::Awg12,
        WireSize::Awg10,
        WireSize::Awg8,
        WireSize::Awg6,
        WireSize::Awg4,
        WireSize::Awg3,
        WireSize::Awg2,
        WireSize::Awg1,
        WireSize::Aught1,
        WireSize::Aught2,
        WireSize::Aught3,
        WireSize::Aught4,
        WireSize::Kcmil250,
        WireSize::Kcmil300,
        WireSize::Kcmil350,
        WireSize::Kcmil400,
        WireSize::Kcmil500,
        WireSize::Kcmil600,
        WireSize::Kcmil700,
        WireSize::Kcmil750,
        WireSize::Kcmil800,
        WireSize::Kcmil900,
        WireSize::Kcmil1000,
        WireSize::Kcmil1250,
        WireSize::Kcmil1500,
        WireSize::Kcmil1750,
        WireSize::Kcmil2000,
    ];

    /// Table label (e.g., "12", "4/0", "250")
    pub fn label(&self) -> &'static str {
        match self {
            WireSize::Awg18 => "18",
            WireSize::Awg16 => "16",
            WireSize::Awg14 => "14",
            WireSize::Awg12 => "12",
            WireSize::Awg10 => "10",
            WireSize::Awg8 => "8",
            WireSize::Awg6 => "6",
            WireSize::Awg4 => "4",
            WireSize::Awg3 => "3",
            WireSize::Awg2 => "2",
            WireSize::Awg1 => "1",
            WireSize::Aught1 => "1/0",
            WireSize::Aught2 => "2/0",
            WireSize::Aught3 => "3/0",
            WireSize::Aught4 => "4/0",
            WireSize::Kcmil250 => "250",
            WireSize::Kcmil300 => "300",
            WireSize::Kcmil350 => "350",
            WireSize::Kcmil400 => "400",
            WireSize::Kcmil500 => "500",
            WireSize::Kcmil600 => "600",
            WireSize::Kcmil700 => "700",
            WireSize::Kcmil750 => "750",
            WireSize::Kcmil800 => "800",
            WireSize::Kcmil900 => "900",
            WireSize::Kcmil1000 => "1000",
            WireSize::Kcmil1250 => "1250",
            WireSize::Kcmil1500 => "1500",
            WireSize::Kcmil1750 => "1750",
            WireSize::Kcmil2000 => "2000",
        }
    }

    /// True for kcmil sizes (250 and larger)
    pub fn is_kcmil(&self) -> bool {
        *self >= WireSize::Kcmil250
    }

    /// Label as it is usually printed on drawings: "#12", "4/0", "250 kcmil"
    pub fn display_gauge(&self) -> String {
        if self.is_kcmil() {
            format!("{} kcmil", self.label())
        } else if self.label().contains('/') {
            self.label().to_string()
        } else {
            format!("#{}", self.label())
        }
    }

    /// Parse a table label, tolerating "#12", "12 AWG", "250 kcmil", "1/0 AWG"
    pub fn from_label(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        let cleaned = lower
            .trim_start_matches('#')
            .trim_end_matches("kcmil")
            .trim_end_matches("mcm")
            .trim_end_matches("awg")
            .trim();
        WireSize::ALL.iter().copied().find(|size| size.label() == cleaned)
    }

    /// Parse a table label, returning an error for unknown sizes
    pub fn parse(s: &str) -> CalcResult<Self> {
        Self::from_label(s).ok_or_else(|| CalcError::unknown_wire_size(s))
    }
}

impl std::fmt::Display for WireSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_gauge())
    }
}

/// Nominal conduit trade size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TradeSize {
    #[serde(rename = "3/8")]
    ThreeEighths,
    #[serde(rename = "1/2")]
    Half,
    #[serde(rename = "3/4")]
    ThreeQuarter,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "1-1/4")]
    OneAndQuarter,
    #[serde(rename = "1-1/2")]
    OneAndHalf,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "2-1/2")]
    TwoAndHalf,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "3-1/2")]
    ThreeAndHalf,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
}

impl TradeSize {
    /// All trade sizes, smallest first
    pub const ALL: [TradeSize; 13] = [
        TradeSize::ThreeEighths,
        TradeSize::Half,
        TradeSize::ThreeQuarter,
        TradeSize::One,
        TradeSize::OneAndQuarter,
        TradeSize::OneAndHalf,
        TradeSize::Two,
        TradeSize::TwoAndHalf,
        TradeSize::Three,
        TradeSize::ThreeAndHalf,
        TradeSize::Four,
        TradeSize::Five,
        TradeSize::Six,
    ];

    /// Table label (e.g., "3/4", "2-1/2")
    pub fn label(&self) -> &'static str {
        match self {
            TradeSize::ThreeEighths => "3/8",
            TradeSize::Half => "1/2",
            TradeSize::ThreeQuarter => "3/4",
            TradeSize::One => "1",
            TradeSize::OneAndQuarter => "1-1/4",
            TradeSize::OneAndHalf => "1-1/2",
            TradeSize::Two => "2",
            TradeSize::TwoAndHalf => "2-1/2",
            TradeSize::Three => "3",
            TradeSize::ThreeAndHalf => "3-1/2",
            TradeSize::Four => "4",
            TradeSize::Five => "5",
            TradeSize::Six => "6",
        }
    }

    /// Nominal size in inches (not the internal diameter)
    pub fn nominal_in(&self) -> f64 {
        match self {
            TradeSize::ThreeEighths => 0.375,
            TradeSize::Half => 0.5,
            TradeSize::ThreeQuarter => 0.75,
            TradeSize::One => 1.0,
            TradeSize::OneAndQuarter => 1.25,
            TradeSize::OneAndHalf => 1.5,
            TradeSize::Two => 2.0,
            TradeSize::TwoAndHalf => 2.5,
            TradeSize::Three => 3.0,
            TradeSize::ThreeAndHalf => 3.5,
            TradeSize::Four => 4.0,
            TradeSize::Five => 5.0,
            TradeSize::Six => 6.0,
        }
    }

    /// Parse a trade size label, tolerating a trailing inch mark or "in"
    pub fn from_label(s: &str) -> Option<Self> {
        let cleaned = s
            .trim()
            .trim_end_matches("in")
            .trim_end_matches('"')
            .trim()
            .replace(' ', "-");
        TradeSize::ALL.iter().copied().find(|size| size.label() == cleaned)
    }

    /// Parse a trade size label, returning an error for unknown sizes
    pub fn parse(s: &str) -> CalcResult<Self> {
        Self::from_label(s).ok_or_else(|| CalcError::unknown_trade_size(s))
    }
}

impl std::fmt::Display for TradeSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\"", self.label())
    }
}

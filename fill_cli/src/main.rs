//! # Conduit Fill CLI
//!
//! Command-line front end for `fill_core`: browse the NEC tables, size a
//! conduit for a set of wires, or check a chosen conduit for compliance.
//!
//! ```text
//! fill find --conduit EMT --wire THHN:12:2 --wire THHN:12:1:ground
//! fill check --conduit PVC-40 --size 1 --preset singlePhase120V:3
//! fill session my-run.json --json
//! ```

mod args;
mod report;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fill_core::calculations::{calculate_fill, combine_wires, CalculationMode, ConduitSelection, FillResult};
use fill_core::catalog::{ConduitType, TradeSize};
use fill_core::{FillSession, FillSettings};

use crate::args::{CategoryArg, CustomArg, PresetArg, WireArg};

#[derive(Parser)]
#[command(name = "fill")]
#[command(about = "NEC Chapter 9 conduit fill calculator")]
#[command(version)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log pipeline steps to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (TOML) with default mode and conduit
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List conductor insulation types
    WireTypes {
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,

        /// Filter by key, name, insulation or application
        #[arg(long)]
        search: Option<String>,
    },

    /// List conduit and tubing types
    ConduitTypes,

    /// Show the trade sizes and areas of a conduit type
    Sizes {
        /// Conduit type (e.g., "EMT", "PVC-40")
        conduit: String,
    },

    /// List circuit presets
    Presets,

    /// Find the smallest trade size that holds the wires
    Find {
        /// Conduit type (default from settings)
        #[arg(long)]
        conduit: Option<String>,

        #[command(flatten)]
        wires: WireArgs,
    },

    /// Check whether the wires fit a specific conduit
    Check {
        /// Conduit type (default from settings)
        #[arg(long)]
        conduit: Option<String>,

        /// Trade size (e.g., "3/4", "1-1/2")
        #[arg(long)]
        size: Option<String>,

        #[command(flatten)]
        wires: WireArgs,
    },

    /// Evaluate a saved session (JSON)
    Session {
        file: PathBuf,
    },
}

#[derive(Args)]
struct WireArgs {
    /// Catalog wire as TYPE:SIZE:QTY[:ROLE] (repeatable)
    #[arg(long = "wire", value_parser = args::parse_wire)]
    wires: Vec<WireArg>,

    /// Custom conductor as AREA_IN2:QTY[:ROLE] (repeatable)
    #[arg(long = "custom", value_parser = args::parse_custom)]
    customs: Vec<CustomArg>,

    /// Circuit preset as KEY[:CIRCUITS] (repeatable)
    #[arg(long = "preset", value_parser = args::parse_preset)]
    presets: Vec<PresetArg>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<FillSettings> {
    let Some(path) = path else {
        return Ok(FillSettings::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let settings = FillSettings::from_toml_str(&text).with_context(|| format!("loading {}", path.display()))?;
    debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

fn parse_conduit(arg: Option<&str>, default: ConduitType) -> Result<ConduitType> {
    match arg {
        Some(s) => Ok(ConduitType::from_str_flexible(s)?),
        None => Ok(default),
    }
}

fn run_calculation(wires: &WireArgs, mode: CalculationMode, selection: &ConduitSelection) -> Option<FillResult> {
    let (instances, individual) = args::build_inputs(&wires.wires, &wires.customs, &wires.presets);
    calculate_fill(&combine_wires(&instances, &individual), mode, selection)
}

fn print_result(result: Option<&FillResult>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    match result {
        Some(result) => print!("{}", report::fill_result(result)),
        None => println!("No valid wires. Add wires to see results."),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let settings = load_settings(cli.config.as_ref())?;

    match cli.command {
        Commands::WireTypes { category, search } => {
            print!("{}", report::wire_types(category.map(Into::into), search.as_deref()));
        }

        Commands::ConduitTypes => print!("{}", report::conduit_types()),

        Commands::Sizes { conduit } => {
            let conduit_type = ConduitType::from_str_flexible(&conduit)?;
            print!("{}", report::conduit_sizes(conduit_type));
        }

        Commands::Presets => print!("{}", report::presets()),

        Commands::Find { conduit, wires } => {
            let conduit_type = parse_conduit(conduit.as_deref(), settings.default_conduit.conduit_type)?;
            let selection = ConduitSelection::new(conduit_type, settings.default_conduit.size);
            let result = run_calculation(&wires, CalculationMode::FindConduit, &selection);
            print_result(result.as_ref(), cli.json)?;
        }

        Commands::Check { conduit, size, wires } => {
            let conduit_type = parse_conduit(conduit.as_deref(), settings.default_conduit.conduit_type)?;
            let size = match size {
                Some(s) => TradeSize::parse(&s)?,
                None => settings.default_conduit.size,
            };
            let selection = ConduitSelection::new(conduit_type, size);
            if !selection.exists() {
                bail!("{} is not made in trade size {}", conduit_type, size.label());
            }
            let result = run_calculation(&wires, CalculationMode::CheckFit, &selection);
            print_result(result.as_ref(), cli.json)?;
        }

        Commands::Session { file } => {
            let text = std::fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let session: FillSession =
                serde_json::from_str(&text).with_context(|| format!("parsing session {}", file.display()))?;
            if session.mode == CalculationMode::CheckFit && !session.conduit.exists() {
                bail!("session selects {}, which is not a listed size", session.conduit);
            }
            if session.has_incomplete_wires() {
                eprintln!("Note: wires without a type are left out");
            }
            print_result(session.calculate().as_ref(), cli.json)?;
        }
    }

    Ok(())
}

//! CLI definition using clap

use clap::{Parser, Subcommand, ValueEnum};
use shipbill_domain::model::{ChargeableWeightPolicy, PieceDimension, ProductType};
use std::path::PathBuf;

pub use shipbill_types::OutputFormat;

/// Carrier weighing policy
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    Detail,
    Total,
}

impl From<PolicyArg> for ChargeableWeightPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Detail => ChargeableWeightPolicy::Detail,
            PolicyArg::Total => ChargeableWeightPolicy::Total,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProductArg {
    Document,
    Parcel,
}

impl From<ProductArg> for ProductType {
    fn from(arg: ProductArg) -> Self {
        match arg {
            ProductArg::Document => ProductType::Document,
            ProductArg::Parcel => ProductType::Parcel,
        }
    }
}

#[derive(Parser)]
#[command(name = "shipbill")]
#[command(version)]
#[command(about = "Chargeable weight and price calculation for shipments")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Volumetric weight of a single piece
    Volume {
        /// Length in cm
        #[arg(long, short = 'l')]
        length: f64,

        /// Width in cm
        #[arg(long, short = 'w')]
        width: f64,

        /// Height in cm
        #[arg(long = "height", short = 'H')]
        height: f64,

        /// Volumetric divisor (cm³ per kg)
        #[arg(long, short = 'd', default_value = "5000")]
        divisor: f64,
    },

    /// Chargeable weight of a shipment
    Chargeable {
        /// CSV file with length,width,height,grossWeight rows
        #[arg(long)]
        pieces: Option<PathBuf>,

        /// Inline piece as L,W,H,GROSS (repeatable)
        #[arg(long = "piece", value_parser = parse_piece)]
        piece: Vec<PieceDimension>,

        /// Weighing policy
        #[arg(long, value_enum, default_value = "detail")]
        policy: PolicyArg,

        /// Volumetric divisor (cm³ per kg)
        #[arg(long, short = 'd', default_value = "5000")]
        divisor: f64,
    },

    /// Price a shipment against a rate snapshot
    Quote {
        /// Rate snapshot file (JSON or TOML). Uses config value if not specified.
        #[arg(long, short = 's')]
        snapshot: Option<PathBuf>,

        /// CSV file with length,width,height,grossWeight rows
        #[arg(long)]
        pieces: Option<PathBuf>,

        /// Inline piece as L,W,H,GROSS (repeatable)
        #[arg(long = "piece", value_parser = parse_piece)]
        piece: Vec<PieceDimension>,

        /// Carrier id
        #[arg(long)]
        carrier: String,

        /// Supplier id (purchase side)
        #[arg(long)]
        supplier: String,

        /// Partner id (sale side)
        #[arg(long)]
        partner: Option<String>,

        /// Service id
        #[arg(long)]
        service: String,

        /// Product type
        #[arg(long, value_enum, default_value = "parcel")]
        product: ProductArg,

        /// Destination zone
        #[arg(long, short = 'z')]
        zone: u32,

        /// Currency of the result. Uses config value if not specified.
        #[arg(long, short = 'c')]
        currency: Option<String>,

        /// Currency of the price table to read
        #[arg(long)]
        price_currency: Option<String>,

        /// Quote date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<chrono::NaiveDate>,

        /// Override the snapshot's volumetric divisor
        #[arg(long, short = 'd')]
        divisor: Option<f64>,
    },

    /// Check rate tables for overlapping or malformed weight bands
    Validate {
        /// Rate snapshot file (JSON or TOML). Uses config value if not specified.
        #[arg(long, short = 's')]
        snapshot: Option<PathBuf>,

        /// Rate-table CSV to check instead of a snapshot (repeatable)
        #[arg(long)]
        csv: Vec<PathBuf>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default snapshot file
        #[arg(long)]
        set_snapshot: Option<PathBuf>,

        /// Add a rate-table CSV merged into every snapshot
        #[arg(long)]
        add_rate_csv: Option<PathBuf>,

        /// Set default result currency
        #[arg(long)]
        set_currency: Option<String>,

        /// Set fallback volumetric divisor
        #[arg(long)]
        set_divisor: Option<f64>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Parse `L,W,H,GROSS` into a piece
fn parse_piece(arg: &str) -> Result<PieceDimension, String> {
    let values: Vec<f64> = arg
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid piece {:?}: {}", arg, e))?;
    match values.as_slice() {
        [l, w, h, g] => Ok(PieceDimension::new(*l, *w, *h, *g)),
        _ => Err(format!(
            "invalid piece {:?}: expected L,W,H,GROSS",
            arg
        )),
    }
}

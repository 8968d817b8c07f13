//! Error types for shipbill

use thiserror::Error;

/// Business-rule failures raised by the pricing engine.
///
/// None of these are crashes: each one is a reportable condition the caller
/// turns into a user-facing message ("no price found for this weight").
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("Shipment has no pieces to weigh")]
    EmptyShipment,

    #[error("Zone {zone} not found in price group")]
    UnknownZone { zone: u32 },

    #[error("Weight {weight} kg is outside the bands of zone {zone} (covered up to {max_covered} kg)")]
    OutOfRangeWeight {
        zone: u32,
        weight: f64,
        max_covered: f64,
    },

    #[error("No exchange rate from {from} to {to}")]
    MissingExchangeRate { from: String, to: String },
}

/// Snapshot/data-access errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Unresolved {kind} reference: {id}")]
    UnresolvedReference { kind: &'static str, id: String },

    #[error("Unknown carrier: {0}")]
    UnknownCarrier(String),

    #[error("No volumetric rate for carrier {carrier} / supplier {supplier}")]
    MissingVolumetricRate { carrier: String, supplier: String },

    #[error("No active price table for {0}")]
    MissingPriceGroup(String),

    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;

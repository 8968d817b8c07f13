//! Shipment-level chargeable weight

use serde::{Deserialize, Serialize};
use shipbill_types::PricingError;

use super::volume_weight::{check_dimension, compute_volume_weight};
use crate::model::{ChargeableWeightPolicy, PieceDimension};

/// Weights of one piece as the aggregator saw them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceWeight {
    pub gross_weight: f64,
    pub volume_weight: f64,
    /// max(gross, volume) for this piece
    pub chargeable_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeableBreakdown {
    pub policy: ChargeableWeightPolicy,
    pub divisor: f64,
    pub pieces: Vec<PieceWeight>,
    pub total_gross_weight: f64,
    pub total_volume_weight: f64,
    pub chargeable_weight: f64,
}

/// Chargeable weight (kg) of a shipment
pub fn compute_chargeable_weight(
    pieces: &[PieceDimension],
    policy: ChargeableWeightPolicy,
    divisor: f64,
) -> Result<f64, PricingError> {
    chargeable_breakdown(pieces, policy, divisor).map(|b| b.chargeable_weight)
}

/// Chargeable weight together with the per-piece figures behind it
///
/// Volume weights are always recomputed from the dimensions; any
/// `volume_weight` already stored on a piece is ignored.
pub fn chargeable_breakdown(
    pieces: &[PieceDimension],
    policy: ChargeableWeightPolicy,
    divisor: f64,
) -> Result<ChargeableBreakdown, PricingError> {
    if pieces.is_empty() {
        return Err(PricingError::EmptyShipment);
    }

    let mut weights = Vec::with_capacity(pieces.len());
    for piece in pieces {
        check_dimension("gross weight", piece.gross_weight)?;
        let volume_weight =
            compute_volume_weight(piece.length, piece.width, piece.height, divisor)?;
        weights.push(PieceWeight {
            gross_weight: piece.gross_weight,
            volume_weight,
            chargeable_weight: piece.gross_weight.max(volume_weight),
        });
    }

    let total_gross_weight: f64 = weights.iter().map(|w| w.gross_weight).sum();
    let total_volume_weight: f64 = weights.iter().map(|w| w.volume_weight).sum();

    let chargeable = match policy {
        ChargeableWeightPolicy::Detail => weights.iter().map(|w| w.chargeable_weight).sum(),
        ChargeableWeightPolicy::Total => total_gross_weight.max(total_volume_weight),
    };

    Ok(ChargeableBreakdown {
        policy,
        divisor,
        pieces: weights,
        total_gross_weight,
        total_volume_weight,
        chargeable_weight: strip_float_noise(chargeable),
    })
}

/// Drops summation noise (`0.1 + 0.2`) without touching real decimals
fn strip_float_noise(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

//! Package piece type definitions

use serde::{Deserialize, Serialize};
use shipbill_types::PricingError;

use crate::service::volume_weight::compute_volume_weight;

/// One physical package piece of a shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceDimension {
    /// cm
    pub length: f64,
    /// cm
    pub width: f64,
    /// cm
    pub height: f64,
    /// kg
    pub gross_weight: f64,
    /// kg, None until computed
    #[serde(default)]
    pub volume_weight: Option<f64>,
}

impl PieceDimension {
    pub fn new(length: f64, width: f64, height: f64, gross_weight: f64) -> Self {
        Self {
            length,
            width,
            height,
            gross_weight,
            volume_weight: None,
        }
    }

    /// Recompute `volume_weight` for the given divisor
    pub fn with_volume_weight(mut self, divisor: f64) -> Result<Self, PricingError> {
        self.volume_weight = Some(compute_volume_weight(
            self.length,
            self.width,
            self.height,
            divisor,
        )?);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_volume_weight_fills_field() {
        let piece = PieceDimension::new(40.0, 30.0, 20.0, 3.0)
            .with_volume_weight(5000.0)
            .unwrap();
        assert_eq!(piece.volume_weight, Some(5.0));
    }

    #[test]
    fn test_with_volume_weight_rejects_bad_divisor() {
        let result = PieceDimension::new(40.0, 30.0, 20.0, 3.0).with_volume_weight(0.0);
        assert!(matches!(result, Err(PricingError::InvalidDimension(_))));
    }

    #[test]
    fn test_deserialize_without_volume_weight() {
        let piece: PieceDimension =
            serde_json::from_str(r#"{"length":10,"width":10,"height":10,"grossWeight":1.2}"#)
                .unwrap();
        assert!(piece.volume_weight.is_none());
        assert!((piece.gross_weight - 1.2).abs() < f64::EPSILON);
    }
}

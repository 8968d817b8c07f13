//! Volumetric weight calculation
//!
//! Carriers bill on the larger of gross weight and the weight implied by a
//! piece's volume. The volume weight is `length x width x height / divisor`
//! (cm³ to kg), stepped up to the next half kilogram.

use shipbill_types::PricingError;

/// Convert piece dimensions (cm) into a volumetric weight (kg)
///
/// # Errors
/// `InvalidDimension` when a dimension is negative or not finite, or when the
/// divisor is not a positive number.
pub fn compute_volume_weight(
    length: f64,
    width: f64,
    height: f64,
    divisor: f64,
) -> Result<f64, PricingError> {
    check_dimension("length", length)?;
    check_dimension("width", width)?;
    check_dimension("height", height)?;
    if !divisor.is_finite() || divisor <= 0.0 {
        return Err(PricingError::InvalidDimension(format!(
            "divisor must be positive, got {}",
            divisor
        )));
    }

    let raw = (length * width * height) / divisor;
    if !raw.is_finite() {
        return Err(PricingError::InvalidDimension(format!(
            "volume of {} x {} x {} cm is out of range",
            length, width, height
        )));
    }
    Ok(round_to_half_up(raw))
}

/// Carrier rounding: step up to the next 0.5 kg
///
/// Whole numbers and exact halves are kept as-is, anything below .5 becomes
/// .5 and anything above .5 becomes the next whole kilogram. The result is
/// then rounded to one decimal place.
pub fn round_to_half_up(raw: f64) -> f64 {
    let int_part = raw.floor();
    let decimal = raw - int_part;

    let stepped = if decimal == 0.0 || decimal == 0.5 {
        raw
    } else if decimal < 0.5 {
        int_part + 0.5
    } else {
        int_part + 1.0
    };

    round_to_tenth(stepped)
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn check_dimension(name: &str, value: f64) -> Result<(), PricingError> {
    if value.is_nan() || value.is_infinite() || value < 0.0 {
        return Err(PricingError::InvalidDimension(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(())
}

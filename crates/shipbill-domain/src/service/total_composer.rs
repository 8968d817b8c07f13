//! Layering of fuel surcharge, VAT and currency conversion on a base price

use serde::{Deserialize, Serialize};
use shipbill_types::PricingError;

use crate::model::Currency;

/// Line items of one priced side (purchase or sale) of a shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub base: f64,
    pub fsc_percent: f64,
    pub fsc_amount: f64,
    pub vat_percent: f64,
    pub vat_amount: f64,
    /// base + FSC + VAT, still in `currency`
    pub subtotal: f64,
    pub currency: Currency,
    /// Rate applied to reach `target_currency`; None when no conversion
    pub exchange_rate: Option<f64>,
    pub target_currency: Currency,
    /// Subtotal converted to `target_currency`
    pub total: f64,
}

/// Add FSC then VAT to `base_price` and convert into `target_currency`
///
/// VAT is charged on the price including FSC. Nothing is rounded here; only
/// display formatting rounds.
///
/// # Errors
/// `MissingExchangeRate` when the currencies differ and no usable rate is
/// given.
pub fn compose_total(
    base_price: f64,
    currency: &Currency,
    fsc_percent: f64,
    vat_percent: f64,
    target_currency: &Currency,
    exchange_rate: Option<f64>,
) -> Result<PriceBreakdown, PricingError> {
    let fsc_amount = base_price * (fsc_percent / 100.0);
    let after_fsc = base_price + fsc_amount;
    let vat_amount = after_fsc * (vat_percent / 100.0);
    let after_vat = after_fsc + vat_amount;

    let (applied_rate, total) = if currency == target_currency {
        (None, after_vat)
    } else {
        match exchange_rate {
            Some(rate) if rate.is_finite() && rate > 0.0 => (Some(rate), after_vat * rate),
            _ => {
                return Err(PricingError::MissingExchangeRate {
                    from: currency.to_string(),
                    to: target_currency.to_string(),
                })
            }
        }
    };

    Ok(PriceBreakdown {
        base: base_price,
        fsc_percent,
        fsc_amount,
        vat_percent,
        vat_amount,
        subtotal: after_vat,
        currency: currency.clone(),
        exchange_rate: applied_rate,
        target_currency: target_currency.clone(),
        total,
    })
}

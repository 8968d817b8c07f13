//! Zone / weight-band price lookup

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use shipbill_types::PricingError;

use crate::model::{Currency, ProductType, RateCell};

/// The band a weight landed in and what it costs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    /// Band price as written in the table
    pub price: f64,
    pub currency: Currency,
    pub is_price_per_kg: bool,
    /// Price applied to the weight: `price x weight` for per-kg bands
    pub amount: f64,
    pub zone: u32,
    pub weight_min: f64,
    pub weight_max: f64,
}

/// Find the price of `chargeable_weight` in one price group
///
/// `group` must already be narrowed to one carrier, counterparty, service and
/// currency. Bands are closed on both ends; when a weight sits on the shared
/// boundary of two bands the lower band owns it.
pub fn resolve_price<'a, I>(
    group: I,
    zone: u32,
    chargeable_weight: f64,
    product_type: ProductType,
) -> Result<ResolvedPrice, PricingError>
where
    I: IntoIterator<Item = &'a RateCell>,
{
    if chargeable_weight.is_nan() || chargeable_weight < 0.0 {
        return Err(PricingError::InvalidDimension(format!(
            "chargeable weight must be a non-negative number, got {}",
            chargeable_weight
        )));
    }

    let zone_rows: Vec<&RateCell> = group
        .into_iter()
        .filter(|c| c.product_type == product_type && c.zone == zone)
        .collect();
    if zone_rows.is_empty() {
        return Err(PricingError::UnknownZone { zone });
    }

    let mut matches: Vec<&RateCell> = zone_rows
        .iter()
        .copied()
        .filter(|c| c.contains_weight(chargeable_weight))
        .collect();

    if matches.is_empty() {
        let max_covered = zone_rows
            .iter()
            .map(|c| c.weight_max)
            .fold(f64::NEG_INFINITY, f64::max);
        return Err(PricingError::OutOfRangeWeight {
            zone,
            weight: chargeable_weight,
            max_covered,
        });
    }

    matches.sort_by(|a, b| a.weight_min.total_cmp(&b.weight_min));
    let cell = matches[0];

    for other in &matches[1..] {
        if other.weight_min < cell.weight_max {
            warn!(
                "Overlapping weight bands in zone {} for {}: [{}, {}] and [{}, {}]; using [{}, {}]",
                zone,
                cell.group_key(),
                cell.weight_min,
                cell.weight_max,
                other.weight_min,
                other.weight_max,
                cell.weight_min,
                cell.weight_max
            );
        } else {
            debug!(
                "Weight {} on shared boundary of zone {} bands, lower band [{}, {}] wins",
                chargeable_weight, zone, cell.weight_min, cell.weight_max
            );
        }
    }

    let amount = if cell.is_price_per_kg {
        cell.price * chargeable_weight
    } else {
        cell.price
    };

    Ok(ResolvedPrice {
        price: cell.price,
        currency: cell.currency.clone(),
        is_price_per_kg: cell.is_price_per_kg,
        amount,
        zone,
        weight_min: cell.weight_min,
        weight_max: cell.weight_max,
    })
}

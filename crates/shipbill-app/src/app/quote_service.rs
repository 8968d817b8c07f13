//! Quote Service - Core Use Case for pricing one shipment
//!
//! This service orchestrates the complete quoting workflow:
//! 1. Load the rate snapshot from the repository
//! 2. Look up the carrier's weighing policy and the volumetric divisor
//! 3. Aggregate the shipment's chargeable weight
//! 4. Resolve the purchase price in the supplier's price group
//! 5. Resolve the sale price in the partner's price group (if a partner is given)
//! 6. Layer FSC, VAT and currency conversion onto each side
//! 7. Return both sides and the margin between them

use std::collections::BTreeSet;

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use shipbill_domain::model::{
    ChargeableWeightPolicy, Counterparty, Currency, PieceDimension, PriceGroupKey, ProductType,
    RateSnapshot,
};
use shipbill_domain::repository::RateSnapshotRepository;
use shipbill_domain::service::{
    chargeable_breakdown, compose_total, find_volumetric_divisor, resolve_exchange_rate,
    resolve_fsc, resolve_price, resolve_vat, ChargeableBreakdown, PriceBreakdown, ResolvedPrice,
};
use shipbill_types::{Error, Result, SnapshotError};

/// Everything needed to price one shipment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub carrier_id: String,
    pub supplier_id: String,
    /// Customer the sale price is quoted for
    #[serde(default)]
    pub partner_id: Option<String>,
    pub service_id: String,
    pub product_type: ProductType,
    pub zone: u32,
    pub pieces: Vec<PieceDimension>,
    /// Currency of the price table to read; picked automatically when None
    #[serde(default)]
    pub price_currency: Option<Currency>,
    pub target_currency: Currency,
    pub date: NaiveDate,
    /// Overrides the snapshot's volumetric divisor
    #[serde(default)]
    pub divisor: Option<f64>,
}

impl QuoteRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        carrier_id: &str,
        supplier_id: &str,
        service_id: &str,
        product_type: ProductType,
        zone: u32,
        pieces: Vec<PieceDimension>,
        target_currency: Currency,
        date: NaiveDate,
    ) -> Self {
        Self {
            carrier_id: carrier_id.to_string(),
            supplier_id: supplier_id.to_string(),
            partner_id: None,
            service_id: service_id.to_string(),
            product_type,
            zone,
            pieces,
            price_currency: None,
            target_currency,
            date,
            divisor: None,
        }
    }

    pub fn with_partner(mut self, partner_id: &str) -> Self {
        self.partner_id = Some(partner_id.to_string());
        self
    }

    pub fn with_price_currency(mut self, currency: Currency) -> Self {
        self.price_currency = Some(currency);
        self
    }

    pub fn with_divisor(mut self, divisor: f64) -> Self {
        self.divisor = Some(divisor);
        self
    }
}

/// One priced side (purchase or sale) of a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideQuote {
    pub group: PriceGroupKey,
    pub price: ResolvedPrice,
    pub breakdown: PriceBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub date: NaiveDate,
    pub carrier_id: String,
    pub service_id: String,
    pub product_type: ProductType,
    pub zone: u32,
    pub weight: ChargeableBreakdown,
    pub purchase: SideQuote,
    pub sale: Option<SideQuote>,
    /// Sale total minus purchase total, in the target currency
    pub margin: Option<f64>,
}

impl Quote {
    pub fn policy(&self) -> ChargeableWeightPolicy {
        self.weight.policy
    }

    pub fn chargeable_weight(&self) -> f64 {
        self.weight.chargeable_weight
    }
}

/// Prices shipments against snapshots from a repository
pub struct QuoteService<R> {
    repo: R,
    fallback_divisor: Option<f64>,
}

impl<R: RateSnapshotRepository> QuoteService<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            fallback_divisor: None,
        }
    }

    /// Divisor used when the snapshot has no rate for the carrier/supplier pair
    pub fn with_fallback_divisor(mut self, divisor: Option<f64>) -> Self {
        self.fallback_divisor = divisor;
        self
    }

    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        let snapshot = self.repo.load()?;
        quote_with_snapshot(&snapshot, request, self.fallback_divisor)
    }
}

/// Price `request` against an already-loaded snapshot
pub fn quote_with_snapshot(
    snapshot: &RateSnapshot,
    request: &QuoteRequest,
    fallback_divisor: Option<f64>,
) -> Result<Quote> {
    let carrier = snapshot
        .find_carrier(&request.carrier_id)
        .ok_or_else(|| SnapshotError::UnknownCarrier(request.carrier_id.clone()))?;

    let divisor = request
        .divisor
        .or_else(|| {
            find_volumetric_divisor(
                &snapshot.volumetric_rates,
                &request.carrier_id,
                &request.supplier_id,
            )
        })
        .or(fallback_divisor)
        .ok_or_else(|| SnapshotError::MissingVolumetricRate {
            carrier: request.carrier_id.clone(),
            supplier: request.supplier_id.clone(),
        })?;

    let weight = chargeable_breakdown(&request.pieces, carrier.chargeable_weight_type, divisor)?;
    info!(
        "Quoting {} piece(s) with {}: {} kg chargeable ({}, divisor {})",
        request.pieces.len(),
        carrier.id,
        weight.chargeable_weight,
        weight.policy,
        divisor
    );

    let purchase = price_side(
        snapshot,
        request,
        Counterparty::Supplier(request.supplier_id.clone()),
        weight.chargeable_weight,
    )?;

    let sale = match &request.partner_id {
        Some(partner_id) => Some(price_side(
            snapshot,
            request,
            Counterparty::Partner(partner_id.clone()),
            weight.chargeable_weight,
        )?),
        None => None,
    };

    let margin = sale
        .as_ref()
        .map(|s| s.breakdown.total - purchase.breakdown.total);

    Ok(Quote {
        date: request.date,
        carrier_id: request.carrier_id.clone(),
        service_id: request.service_id.clone(),
        product_type: request.product_type,
        zone: request.zone,
        weight,
        purchase,
        sale,
        margin,
    })
}

fn price_side(
    snapshot: &RateSnapshot,
    request: &QuoteRequest,
    counterparty: Counterparty,
    chargeable_weight: f64,
) -> Result<SideQuote> {
    let currency = select_price_currency(snapshot, request, &counterparty)?;
    let group = PriceGroupKey {
        carrier_id: request.carrier_id.clone(),
        counterparty,
        service_id: request.service_id.clone(),
        product_type: request.product_type,
        currency,
    };
    let rows = group.select(&snapshot.rate_cells);
    debug!("Price group {} has {} active row(s)", group, rows.len());

    let price = resolve_price(rows, request.zone, chargeable_weight, request.product_type)?;

    // No FSC or VAT on file for the date means none is charged
    let fsc_percent = resolve_fsc(
        &snapshot.extra_fees,
        &request.carrier_id,
        &request.service_id,
        request.date,
    )
    .map_or(0.0, |f| f.value);
    let vat_percent = resolve_vat(
        &snapshot.vat_rates,
        &request.carrier_id,
        &request.service_id,
        &request.supplier_id,
        request.date,
    )
    .map_or(0.0, |v| v.value);

    let exchange_rate = if price.currency == request.target_currency {
        None
    } else {
        resolve_exchange_rate(
            &snapshot.exchange_rates,
            &price.currency,
            &request.target_currency,
            request.date,
        )
        .map(|r| r.rate)
    };

    let breakdown = compose_total(
        price.amount,
        &price.currency,
        fsc_percent,
        vat_percent,
        &request.target_currency,
        exchange_rate,
    )?;

    Ok(SideQuote {
        group,
        price,
        breakdown,
    })
}

/// Currency of the price table to read for `counterparty`
///
/// An explicit choice wins. Otherwise a table already in the target currency
/// is preferred, then the only table available.
fn select_price_currency(
    snapshot: &RateSnapshot,
    request: &QuoteRequest,
    counterparty: &Counterparty,
) -> Result<Currency> {
    if let Some(currency) = &request.price_currency {
        return Ok(currency.clone());
    }

    let available: BTreeSet<&Currency> = snapshot
        .rate_cells
        .iter()
        .filter(|c| {
            c.status.is_active()
                && c.carrier_id == request.carrier_id
                && &c.counterparty == counterparty
                && c.service_id == request.service_id
                && c.product_type == request.product_type
        })
        .map(|c| &c.currency)
        .collect();

    if available.contains(&request.target_currency) {
        return Ok(request.target_currency.clone());
    }
    let mut iter = available.into_iter();
    match (iter.next(), iter.next()) {
        (Some(only), None) => Ok(only.clone()),
        (None, _) => Err(SnapshotError::MissingPriceGroup(format!(
            "{}/{}/{}/{}",
            request.carrier_id, counterparty, request.service_id, request.product_type
        ))
        .into()),
        (Some(first), Some(second)) => Err(Error::InvalidArgument(format!(
            "price tables for {} exist in several currencies ({}, {}, ...); choose one",
            counterparty, first, second
        ))),
    }
}

//! Rate snapshot loader (JSON or TOML)
//!
//! Snapshot files mirror the backend's REST payloads, where `carrierId`,
//! `supplierId`, `partnerId` and `serviceId` are either an id string or the
//! populated record. Every such reference is normalized here so the domain
//! only ever sees plain ids.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;
use shipbill_domain::model::{
    Carrier, Counterparty, Currency, ExchangeRate, ExtraFee, ProductType, RateCell, RateSnapshot,
    RecordStatus, VatRate, VolumetricRate,
};
use shipbill_types::{Error, Identified, Reference, Result, SnapshotError};

/// Populated company or service record; only the id matters for pricing
#[derive(Debug, Clone, Deserialize)]
struct NamedRecord {
    #[serde(alias = "_id")]
    id: String,
}

impl Identified for NamedRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRecord {
    #[serde(default)]
    carriers: Vec<Carrier>,
    #[serde(default)]
    volumetric_rates: Vec<VolumetricRateRecord>,
    #[serde(default)]
    rate_cells: Vec<RateCellRecord>,
    #[serde(default)]
    extra_fees: Vec<ExtraFeeRecord>,
    #[serde(default)]
    vat_rates: Vec<VatRateRecord>,
    #[serde(default)]
    exchange_rates: Vec<ExchangeRate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumetricRateRecord {
    carrier_id: Reference<Carrier>,
    supplier_id: Reference<NamedRecord>,
    #[serde(alias = "value")]
    divisor: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateCellRecord {
    carrier_id: Reference<Carrier>,
    #[serde(default)]
    supplier_id: Option<Reference<NamedRecord>>,
    #[serde(default)]
    partner_id: Option<Reference<NamedRecord>>,
    service_id: Reference<NamedRecord>,
    product_type: ProductType,
    zone: u32,
    weight_min: f64,
    weight_max: f64,
    price: f64,
    currency: Currency,
    #[serde(rename = "isPricePerKG", alias = "isPricePerKg", default)]
    is_price_per_kg: bool,
    #[serde(default)]
    status: RecordStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtraFeeRecord {
    carrier_id: Reference<Carrier>,
    service_id: Reference<NamedRecord>,
    value: f64,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
    #[serde(default)]
    status: RecordStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VatRateRecord {
    carrier_id: Reference<Carrier>,
    service_id: Reference<NamedRecord>,
    supplier_id: Reference<NamedRecord>,
    value: f64,
    #[serde(default)]
    start_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    end_date: Option<chrono::NaiveDate>,
    #[serde(default)]
    status: RecordStatus,
}

/// Load a snapshot file; `.toml` files are read as TOML, anything else as JSON
pub fn load_snapshot(path: &Path) -> Result<RateSnapshot> {
    if !path.exists() {
        return Err(Error::FileNotFound(format!(
            "Snapshot file not found: {}",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    let snapshot = if is_toml {
        parse_snapshot_toml(&content)?
    } else {
        parse_snapshot_json(&content)?
    };
    debug!(
        "Loaded snapshot {}: {} carriers, {} rate cells",
        path.display(),
        snapshot.carriers.len(),
        snapshot.rate_cells.len()
    );
    Ok(snapshot)
}

pub fn parse_snapshot_json(content: &str) -> Result<RateSnapshot> {
    let record: SnapshotRecord = serde_json::from_str(content)?;
    normalize(record).map_err(Into::into)
}

pub fn parse_snapshot_toml(content: &str) -> Result<RateSnapshot> {
    let record: SnapshotRecord = toml::from_str(content)?;
    normalize(record).map_err(Into::into)
}

fn normalize(record: SnapshotRecord) -> std::result::Result<RateSnapshot, SnapshotError> {
    let mut carriers = record.carriers;

    let mut volumetric_rates = Vec::with_capacity(record.volumetric_rates.len());
    for r in record.volumetric_rates {
        volumetric_rates.push(VolumetricRate {
            carrier_id: resolve_carrier(r.carrier_id, &mut carriers)?,
            supplier_id: r.supplier_id.into_id(),
            divisor: r.divisor,
        });
    }

    let mut rate_cells = Vec::with_capacity(record.rate_cells.len());
    for (idx, r) in record.rate_cells.into_iter().enumerate() {
        let counterparty = match (r.supplier_id, r.partner_id) {
            (Some(s), None) => Counterparty::Supplier(s.into_id()),
            (None, Some(p)) => Counterparty::Partner(p.into_id()),
            _ => {
                return Err(SnapshotError::InvalidRecord {
                    row: idx + 1,
                    message: "rate cell needs exactly one of supplierId or partnerId".to_string(),
                })
            }
        };
        rate_cells.push(RateCell {
            carrier_id: resolve_carrier(r.carrier_id, &mut carriers)?,
            counterparty,
            service_id: r.service_id.into_id(),
            product_type: r.product_type,
            zone: r.zone,
            weight_min: r.weight_min,
            weight_max: r.weight_max,
            price: r.price,
            currency: r.currency,
            is_price_per_kg: r.is_price_per_kg,
            status: r.status,
        });
    }

    let mut extra_fees = Vec::with_capacity(record.extra_fees.len());
    for f in record.extra_fees {
        extra_fees.push(ExtraFee {
            carrier_id: resolve_carrier(f.carrier_id, &mut carriers)?,
            service_id: f.service_id.into_id(),
            value: f.value,
            start_date: f.start_date,
            end_date: f.end_date,
            status: f.status,
        });
    }

    let mut vat_rates = Vec::with_capacity(record.vat_rates.len());
    for v in record.vat_rates {
        vat_rates.push(VatRate {
            carrier_id: resolve_carrier(v.carrier_id, &mut carriers)?,
            service_id: v.service_id.into_id(),
            supplier_id: v.supplier_id.into_id(),
            value: v.value,
            start_date: v.start_date,
            end_date: v.end_date,
            status: v.status,
        });
    }

    Ok(RateSnapshot {
        carriers,
        volumetric_rates,
        rate_cells,
        extra_fees,
        vat_rates,
        exchange_rates: record.exchange_rates,
    })
}

/// Carrier id for `reference`, registering populated carriers not yet listed
///
/// A bare id must name a carrier present in the snapshot, since pricing
/// needs the carrier's weighing policy.
fn resolve_carrier(
    reference: Reference<Carrier>,
    carriers: &mut Vec<Carrier>,
) -> std::result::Result<String, SnapshotError> {
    if let Reference::Resolved(ref carrier) = reference {
        if carriers.iter().all(|c| c.id != carrier.id) {
            carriers.push(carrier.clone());
        }
    }
    let carrier = reference.resolve("carrier", |id| carriers.iter().find(|c| c.id == id).cloned())?;
    Ok(carrier.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipbill_domain::model::ChargeableWeightPolicy;

    const SNAPSHOT: &str = r#"{
        "carriers": [{"_id": "DHL", "name": "DHL Express", "chargeableWeightType": "TOTAL"}],
        "volumetricRates": [{"carrierId": "DHL", "supplierId": {"_id": "S1", "name": "Hub"}, "value": 5000}],
        "rateCells": [
            {"carrierId": {"_id": "UPS", "name": "UPS", "chargeableWeightType": "DETAIL"},
             "supplierId": "S1", "serviceId": {"_id": "SAVER"}, "productType": "PARCEL",
             "zone": 2, "weightMin": 0, "weightMax": 10, "price": 40, "currency": "USD"},
            {"carrierId": "DHL", "partnerId": "P1", "serviceId": "EXP", "productType": "DOCUMENT",
             "zone": 1, "weightMin": 0, "weightMax": 2, "price": 15, "currency": "USD",
             "isPricePerKG": true, "status": "Locked"}
        ],
        "extraFees": [{"carrierId": "DHL", "serviceId": "EXP", "value": 20,
                       "startDate": "2026-10-01", "endDate": "2026-10-31"}]
    }"#;

    #[test]
    fn test_normalizes_mixed_references() {
        let snapshot = parse_snapshot_json(SNAPSHOT).unwrap();
        assert_eq!(snapshot.volumetric_rates[0].supplier_id, "S1");
        assert_eq!(snapshot.volumetric_rates[0].divisor, 5000.0);
        assert_eq!(snapshot.rate_cells[0].carrier_id, "UPS");
        assert_eq!(snapshot.rate_cells[0].service_id, "SAVER");
        assert_eq!(snapshot.rate_cells[0].counterparty, Counterparty::Supplier("S1".to_string()));
        assert_eq!(snapshot.rate_cells[1].counterparty, Counterparty::Partner("P1".to_string()));
        assert!(snapshot.rate_cells[1].is_price_per_kg);
        assert_eq!(snapshot.rate_cells[1].status, RecordStatus::Locked);
        assert_eq!(snapshot.extra_fees[0].value, 20.0);
    }

    #[test]
    fn test_populated_carrier_registered() {
        let snapshot = parse_snapshot_json(SNAPSHOT).unwrap();
        assert_eq!(snapshot.carriers.len(), 2);
        let ups = snapshot.find_carrier("UPS").unwrap();
        assert_eq!(ups.chargeable_weight_type, ChargeableWeightPolicy::Detail);
        let dhl = snapshot.find_carrier("DHL").unwrap();
        assert_eq!(dhl.chargeable_weight_type, ChargeableWeightPolicy::Total);
    }

    #[test]
    fn test_unknown_carrier_id_rejected() {
        let json = r#"{"volumetricRates": [{"carrierId": "TNT", "supplierId": "S1", "divisor": 5000}]}"#;
        let err = parse_snapshot_json(json).unwrap_err();
        assert!(matches!(
            err,
            Error::Snapshot(SnapshotError::UnresolvedReference { kind: "carrier", .. })
        ));
    }

    #[test]
    fn test_cell_without_counterparty_rejected() {
        let json = r#"{
            "carriers": [{"id": "DHL"}],
            "rateCells": [{"carrierId": "DHL", "serviceId": "EXP", "productType": "PARCEL",
                           "zone": 1, "weightMin": 0, "weightMax": 2, "price": 15, "currency": "USD"}]
        }"#;
        let err = parse_snapshot_json(json).unwrap_err();
        assert!(matches!(
            err,
            Error::Snapshot(SnapshotError::InvalidRecord { row: 1, .. })
        ));
    }

    #[test]
    fn test_toml_snapshot() {
        let toml = r#"
[[carriers]]
id = "DHL"
chargeableWeightType = "DETAIL"

[[volumetricRates]]
carrierId = "DHL"
supplierId = "S1"
divisor = 6000.0

[[exchangeRates]]
currencyFrom = "usd"
currencyTo = "VND"
rate = 25400.0
startDate = "2026-01-01"
endDate = "2026-12-31"
"#;
        let snapshot = parse_snapshot_toml(toml).unwrap();
        assert_eq!(snapshot.volumetric_rates[0].divisor, 6000.0);
        assert_eq!(snapshot.exchange_rates[0].currency_from, Currency::new("USD"));
    }
}

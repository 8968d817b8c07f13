//! Weight-to-price pipeline over the pure engine functions

use shipbill_domain::model::{
    ChargeableWeightPolicy, Counterparty, Currency, PieceDimension, ProductType,
    RateCell, RecordStatus,
};
use shipbill_domain::service::{
    compose_total, compute_chargeable_weight, compute_volume_weight, resolve_price,
    validate_price_group,
};
use shipbill_types::PricingError;

fn band(zone: u32, min: f64, max: f64, price: f64, per_kg: bool) -> RateCell {
    RateCell {
        carrier_id: "DHL".to_string(),
        counterparty: Counterparty::Supplier("S1".to_string()),
        service_id: "EXP".to_string(),
        product_type: ProductType::Parcel,
        zone,
        weight_min: min,
        weight_max: max,
        price,
        currency: Currency::new("USD"),
        is_price_per_kg: per_kg,
        status: RecordStatus::Active,
    }
}

fn table() -> Vec<RateCell> {
    vec![
        band(3, 0.0, 5.0, 10.0, false),
        band(3, 5.0, 10.0, 18.0, false),
        band(3, 10.0, 30.0, 2.5, true),
        band(4, 0.0, 10.0, 25.0, false),
    ]
}

fn shipment() -> Vec<PieceDimension> {
    vec![
        PieceDimension::new(40.0, 30.0, 20.0, 3.0),
        PieceDimension::new(40.0, 25.0, 20.0, 10.0),
    ]
}

#[test]
fn test_volume_weight_pinned_cases() {
    let cases = [
        ((40.0, 30.0, 20.0), 5.0),
        ((30.0, 30.0, 30.0), 5.5),
        ((50.0, 50.0, 20.0), 10.0),
        ((50.0, 20.0, 25.0), 5.0),
    ];
    for ((l, w, h), expected) in cases {
        assert_eq!(compute_volume_weight(l, w, h, 5000.0).unwrap(), expected);
    }
}

#[test]
fn test_policies_differ_on_same_shipment() {
    let detail = compute_chargeable_weight(&shipment(), ChargeableWeightPolicy::Detail, 5000.0).unwrap();
    let total = compute_chargeable_weight(&shipment(), ChargeableWeightPolicy::Total, 5000.0).unwrap();
    assert_eq!(detail, 15.0);
    assert_eq!(total, 13.0);
}

#[test]
fn test_detail_shipment_priced_per_kg() {
    let cells = table();
    assert!(validate_price_group(&cells).is_empty());

    let weight = compute_chargeable_weight(&shipment(), ChargeableWeightPolicy::Detail, 5000.0).unwrap();
    let group = cells[0].group_key();
    let price = resolve_price(group.select(&cells), 3, weight, ProductType::Parcel).unwrap();
    assert!(price.is_price_per_kg);
    assert!((price.amount - 37.5).abs() < 1e-9);

    let breakdown = compose_total(
        price.amount,
        &price.currency,
        10.0,
        8.0,
        &Currency::new("USD"),
        None,
    )
    .unwrap();
    assert!((breakdown.total - 44.55).abs() < 1e-9);
}

#[test]
fn test_shared_boundary_goes_to_lower_band() {
    let cells = table();
    let price = resolve_price(&cells, 3, 5.0, ProductType::Parcel).unwrap();
    assert_eq!(price.price, 10.0);
    assert_eq!(price.weight_max, 5.0);
}

#[test]
fn test_weight_beyond_table_is_rejected() {
    let cells = table();
    let err = resolve_price(&cells, 4, 12.0, ProductType::Parcel).unwrap_err();
    assert!(matches!(err, PricingError::OutOfRangeWeight { zone: 4, .. }));

    let err = resolve_price(&cells, 9, 2.0, ProductType::Parcel).unwrap_err();
    assert_eq!(err, PricingError::UnknownZone { zone: 9 });
}

#[test]
fn test_converted_total() {
    let breakdown = compose_total(
        100.0,
        &Currency::new("USD"),
        10.0,
        8.0,
        &Currency::new("VND"),
        Some(25_000.0),
    )
    .unwrap();
    assert!((breakdown.total - 2_970_000.0).abs() < 1e-6);

    let err = compose_total(
        100.0,
        &Currency::new("USD"),
        10.0,
        8.0,
        &Currency::new("EUR"),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, PricingError::MissingExchangeRate { .. }));
}

#[test]
fn test_weight_just_over_boundary_priced_in_upper_band() {
    let cells = table();
    let pieces = vec![PieceDimension::new(10.0, 10.0, 10.0, 10.04)];
    let weight = compute_chargeable_weight(&pieces, ChargeableWeightPolicy::Detail, 5000.0).unwrap();
    assert_eq!(weight, 10.04);

    let price = resolve_price(&cells, 3, weight, ProductType::Parcel).unwrap();
    assert_eq!(price.weight_min, 10.0);
    assert!(price.is_price_per_kg);
    assert!((price.amount - 25.1).abs() < 1e-9);
}

//! Date-windowed surcharges and conversion rates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Currency, RecordStatus};

/// Fuel surcharge (FSC), a percentage of the base price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraFee {
    pub carrier_id: String,
    pub service_id: String,
    /// percent
    pub value: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatRate {
    pub carrier_id: String,
    pub service_id: String,
    pub supplier_id: String,
    /// percent
    pub value: f64,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: RecordStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub currency_from: Currency,
    pub currency_to: Currency,
    pub rate: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: RecordStatus,
}

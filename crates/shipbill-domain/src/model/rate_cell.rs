//! Price table rows and the keys that group them

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    Document,
    Parcel,
}

impl ProductType {
    pub fn label(&self) -> &'static str {
        match self {
            ProductType::Document => "DOCUMENT",
            ProductType::Parcel => "PARCEL",
        }
    }
}

impl FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DOCUMENT" | "DOC" => Ok(ProductType::Document),
            "PARCEL" | "PACKAGE" => Ok(ProductType::Parcel),
            other => Err(format!("unknown product type: {}", other)),
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle status shared by all rate-table records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordStatus {
    #[default]
    Active,
    Locked,
    NoActive,
    Deleted,
}

impl RecordStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, RecordStatus::Active)
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(RecordStatus::Active),
            "locked" => Ok(RecordStatus::Locked),
            "noactive" | "inactive" => Ok(RecordStatus::NoActive),
            "deleted" => Ok(RecordStatus::Deleted),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

/// Who the price is agreed with: suppliers price purchases, partners price sales
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Counterparty {
    Supplier(String),
    Partner(String),
}

impl Counterparty {
    pub fn id(&self) -> &str {
        match self {
            Counterparty::Supplier(id) | Counterparty::Partner(id) => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Counterparty::Supplier(_) => "supplier",
            Counterparty::Partner(_) => "partner",
        }
    }
}

impl std::fmt::Display for Counterparty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id())
    }
}

/// One weight band of one zone in a price table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateCell {
    pub carrier_id: String,
    pub counterparty: Counterparty,
    pub service_id: String,
    pub product_type: ProductType,
    pub zone: u32,
    /// kg, inclusive
    pub weight_min: f64,
    /// kg, inclusive
    pub weight_max: f64,
    pub price: f64,
    pub currency: Currency,
    /// Price is per kg of chargeable weight rather than per band
    #[serde(rename = "isPricePerKG", alias = "isPricePerKg", default)]
    pub is_price_per_kg: bool,
    #[serde(default)]
    pub status: RecordStatus,
}

impl RateCell {
    pub fn contains_weight(&self, weight: f64) -> bool {
        self.weight_min <= weight && weight <= self.weight_max
    }

    pub fn group_key(&self) -> PriceGroupKey {
        PriceGroupKey {
            carrier_id: self.carrier_id.clone(),
            counterparty: self.counterparty.clone(),
            service_id: self.service_id.clone(),
            product_type: self.product_type,
            currency: self.currency.clone(),
        }
    }
}

/// Identity of a price group: the rows created, locked and deleted as a unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceGroupKey {
    pub carrier_id: String,
    pub counterparty: Counterparty,
    pub service_id: String,
    pub product_type: ProductType,
    pub currency: Currency,
}

impl PriceGroupKey {
    pub fn matches(&self, cell: &RateCell) -> bool {
        cell.carrier_id == self.carrier_id
            && cell.counterparty == self.counterparty
            && cell.service_id == self.service_id
            && cell.product_type == self.product_type
            && cell.currency == self.currency
    }

    /// Active rows of `cells` belonging to this group
    pub fn select<'a>(&self, cells: &'a [RateCell]) -> Vec<&'a RateCell> {
        cells
            .iter()
            .filter(|c| c.status.is_active() && self.matches(c))
            .collect()
    }
}

impl std::fmt::Display for PriceGroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.carrier_id, self.counterparty, self.service_id, self.product_type, self.currency
        )
    }
}

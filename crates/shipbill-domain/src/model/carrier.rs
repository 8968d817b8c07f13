//! Carrier-related type definitions

use serde::{Deserialize, Serialize};
use shipbill_types::Identified;

/// How a carrier turns per-piece weights into one shipment weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChargeableWeightPolicy {
    /// Each piece is charged on max(gross, volumetric); the maxima are summed
    #[default]
    Detail,
    /// Gross and volumetric weights are summed first, then the larger sum wins
    Total,
}

impl ChargeableWeightPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            ChargeableWeightPolicy::Detail => "DETAIL",
            ChargeableWeightPolicy::Total => "TOTAL",
        }
    }
}

impl std::fmt::Display for ChargeableWeightPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub chargeable_weight_type: ChargeableWeightPolicy,
}

impl Identified for Carrier {
    fn id(&self) -> &str {
        &self.id
    }
}

/// cm³-to-kg divisor agreed for one (carrier, supplier) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumetricRate {
    pub carrier_id: String,
    pub supplier_id: String,
    pub divisor: f64,
}

impl VolumetricRate {
    pub fn matches(&self, carrier_id: &str, supplier_id: &str) -> bool {
        self.carrier_id == carrier_id && self.supplier_id == supplier_id
    }
}

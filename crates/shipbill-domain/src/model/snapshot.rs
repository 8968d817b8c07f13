use serde::{Deserialize, Serialize};

use super::{Carrier, ExchangeRate, ExtraFee, RateCell, VatRate, VolumetricRate};

/// Immutable set of rate tables one calculation reads from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSnapshot {
    #[serde(default)]
    pub carriers: Vec<Carrier>,
    #[serde(default)]
    pub volumetric_rates: Vec<VolumetricRate>,
    #[serde(default)]
    pub rate_cells: Vec<RateCell>,
    #[serde(default)]
    pub extra_fees: Vec<ExtraFee>,
    #[serde(default)]
    pub vat_rates: Vec<VatRate>,
    #[serde(default)]
    pub exchange_rates: Vec<ExchangeRate>,
}

impl RateSnapshot {
    pub fn find_carrier(&self, carrier_id: &str) -> Option<&Carrier> {
        self.carriers.iter().find(|c| c.id == carrier_id)
    }
}

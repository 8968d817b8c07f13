//! Domain model types

pub mod carrier;
pub mod currency;
pub mod piece;
pub mod rate_cell;
pub mod snapshot;
pub mod surcharge;

pub use carrier::{Carrier, ChargeableWeightPolicy, VolumetricRate};
pub use currency::Currency;
pub use piece::PieceDimension;
pub use rate_cell::{Counterparty, PriceGroupKey, ProductType, RateCell, RecordStatus};
pub use snapshot::RateSnapshot;
pub use surcharge::{ExchangeRate, ExtraFee, VatRate};

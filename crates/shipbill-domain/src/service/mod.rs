//! Domain services: the rate & weight resolution engine

pub mod band_validator;
pub mod chargeable_weight;
pub mod price_resolver;
pub mod rate_window;
pub mod total_composer;
pub mod volume_weight;

pub use band_validator::{validate_price_group, BandIssue, BandIssueKind};
pub use chargeable_weight::{
    chargeable_breakdown, compute_chargeable_weight, ChargeableBreakdown, PieceWeight,
};
pub use price_resolver::{resolve_price, ResolvedPrice};
pub use rate_window::{
    find_volumetric_divisor, resolve_exchange_rate, resolve_fsc, resolve_vat, window_contains,
};
pub use total_composer::{compose_total, PriceBreakdown};
pub use volume_weight::{compute_volume_weight, round_to_half_up, round_to_tenth};

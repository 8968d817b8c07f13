//! Ingestion-time checks on price group weight bands
//!
//! The resolver tolerates overlapping bands by picking the lowest one, but a
//! table that needs that fallback is a data problem. These checks surface
//! such tables before they are used for pricing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{PriceGroupKey, RateCell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandIssueKind {
    /// Two bands share more than a boundary point
    Overlap,
    /// Two bands with identical bounds
    DuplicateBand,
    /// weight_min greater than weight_max
    InvertedBand,
    NegativePrice,
}

impl BandIssueKind {
    pub fn label(&self) -> &'static str {
        match self {
            BandIssueKind::Overlap => "overlap",
            BandIssueKind::DuplicateBand => "duplicate band",
            BandIssueKind::InvertedBand => "inverted band",
            BandIssueKind::NegativePrice => "negative price",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandIssue {
    pub kind: BandIssueKind,
    pub group: PriceGroupKey,
    pub zone: u32,
    pub message: String,
}

/// Check every (price group, zone) in `cells` for malformed bands
///
/// Bands that only touch (`[0, 5]` and `[5, 10]`) are accepted.
pub fn validate_price_group(cells: &[RateCell]) -> Vec<BandIssue> {
    let mut by_zone: BTreeMap<(PriceGroupKey, u32), Vec<&RateCell>> = BTreeMap::new();
    for cell in cells.iter().filter(|c| c.status.is_active()) {
        by_zone
            .entry((cell.group_key(), cell.zone))
            .or_default()
            .push(cell);
    }

    let mut issues = Vec::new();
    for ((group, zone), mut bands) in by_zone {
        let issue = |kind: BandIssueKind, message: String| BandIssue {
            kind,
            group: group.clone(),
            zone,
            message,
        };

        for band in &bands {
            if band.weight_min > band.weight_max {
                issues.push(issue(
                    BandIssueKind::InvertedBand,
                    format!("[{}, {}]", band.weight_min, band.weight_max),
                ));
            }
            if band.price < 0.0 {
                issues.push(issue(
                    BandIssueKind::NegativePrice,
                    format!("[{}, {}] priced {}", band.weight_min, band.weight_max, band.price),
                ));
            }
        }

        bands.sort_by(|a, b| {
            a.weight_min
                .total_cmp(&b.weight_min)
                .then(a.weight_max.total_cmp(&b.weight_max))
        });
        // Inverted bands are already reported and cover no weight
        bands.retain(|b| b.weight_min <= b.weight_max);

        // Sorted by weight_min, so every later band starting below a's max
        // intersects a, including bands nested inside a wide one.
        for (i, a) in bands.iter().enumerate() {
            for b in bands[i + 1..]
                .iter()
                .take_while(|b| b.weight_min < a.weight_max)
            {
                if a.weight_min == b.weight_min && a.weight_max == b.weight_max {
                    issues.push(issue(
                        BandIssueKind::DuplicateBand,
                        format!("[{}, {}] appears twice", a.weight_min, a.weight_max),
                    ));
                } else {
                    issues.push(issue(
                        BandIssueKind::Overlap,
                        format!(
                            "[{}, {}] overlaps [{}, {}]",
                            a.weight_min, a.weight_max, b.weight_min, b.weight_max
                        ),
                    ));
                }
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Counterparty, Currency, ProductType, RecordStatus};

    fn band(zone: u32, min: f64, max: f64) -> RateCell {
        RateCell {
            carrier_id: "FEDEX".to_string(),
            counterparty: Counterparty::Partner("P1".to_string()),
            service_id: "IP".to_string(),
            product_type: ProductType::Parcel,
            zone,
            weight_min: min,
            weight_max: max,
            price: 12.0,
            currency: Currency::new("USD"),
            is_price_per_kg: false,
            status: RecordStatus::Active,
        }
    }

    #[test]
    fn test_touching_bands_are_clean() {
        let cells = vec![band(1, 0.0, 5.0), band(1, 5.0, 10.0), band(1, 10.0, 20.0)];
        assert!(validate_price_group(&cells).is_empty());
    }

    #[test]
    fn test_overlap_reported() {
        let cells = vec![band(1, 0.0, 6.0), band(1, 5.0, 10.0)];
        let issues = validate_price_group(&cells);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, BandIssueKind::Overlap);
        assert_eq!(issues[0].zone, 1);
    }

    #[test]
    fn test_bands_nested_in_wide_band_all_reported() {
        let cells = vec![band(1, 0.0, 10.0), band(1, 2.0, 3.0), band(1, 5.0, 6.0)];
        let issues = validate_price_group(&cells);
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.kind == BandIssueKind::Overlap));
        assert!(issues.iter().any(|i| i.message == "[0, 10] overlaps [5, 6]"));
    }

    #[test]
    fn test_same_bounds_in_other_zone_is_fine() {
        let cells = vec![band(1, 0.0, 5.0), band(2, 0.0, 5.0)];
        assert!(validate_price_group(&cells).is_empty());
    }

    #[test]
    fn test_duplicate_and_inverted_bands() {
        let mut negative = band(3, 20.0, 30.0);
        negative.price = -1.0;
        let cells = vec![band(3, 0.0, 5.0), band(3, 0.0, 5.0), band(3, 9.0, 7.0), negative];
        let kinds: Vec<BandIssueKind> = validate_price_group(&cells).iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&BandIssueKind::DuplicateBand));
        assert!(kinds.contains(&BandIssueKind::InvertedBand));
        assert!(kinds.contains(&BandIssueKind::NegativePrice));
    }

    #[test]
    fn test_inactive_rows_ignored() {
        let mut locked = band(1, 0.0, 6.0);
        locked.status = RecordStatus::Deleted;
        let cells = vec![locked, band(1, 5.0, 10.0)];
        assert!(validate_price_group(&cells).is_empty());
    }
}

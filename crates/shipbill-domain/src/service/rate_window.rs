//! Validity-window lookup for FSC, VAT and exchange rates

use chrono::NaiveDate;
use log::warn;

use crate::model::{Currency, ExchangeRate, ExtraFee, VatRate, VolumetricRate};

/// `start <= date <= end`; a missing bound is open
pub fn window_contains(start: Option<NaiveDate>, end: Option<NaiveDate>, date: NaiveDate) -> bool {
    start.map_or(true, |s| s <= date) && end.map_or(true, |e| date <= e)
}

/// Active fuel surcharge for (carrier, service) on `date`
pub fn resolve_fsc<'a>(
    fees: &'a [ExtraFee],
    carrier_id: &str,
    service_id: &str,
    date: NaiveDate,
) -> Option<&'a ExtraFee> {
    let candidates = fees.iter().filter(|f| {
        f.status.is_active()
            && f.carrier_id == carrier_id
            && f.service_id == service_id
            && window_contains(Some(f.start_date), Some(f.end_date), date)
    });
    latest_start(candidates, |f| Some(f.start_date), "fuel surcharge")
}

/// Active VAT for (carrier, service, supplier) on `date`
pub fn resolve_vat<'a>(
    rates: &'a [VatRate],
    carrier_id: &str,
    service_id: &str,
    supplier_id: &str,
    date: NaiveDate,
) -> Option<&'a VatRate> {
    let candidates = rates.iter().filter(|v| {
        v.status.is_active()
            && v.carrier_id == carrier_id
            && v.service_id == service_id
            && v.supplier_id == supplier_id
            && window_contains(v.start_date, v.end_date, date)
    });
    latest_start(candidates, |v| v.start_date, "VAT")
}

/// Active `from -> to` exchange rate on `date`
pub fn resolve_exchange_rate<'a>(
    rates: &'a [ExchangeRate],
    from: &Currency,
    to: &Currency,
    date: NaiveDate,
) -> Option<&'a ExchangeRate> {
    let candidates = rates.iter().filter(|r| {
        r.status.is_active()
            && &r.currency_from == from
            && &r.currency_to == to
            && window_contains(Some(r.start_date), Some(r.end_date), date)
    });
    latest_start(candidates, |r| Some(r.start_date), "exchange rate")
}

pub fn find_volumetric_divisor(
    rates: &[VolumetricRate],
    carrier_id: &str,
    supplier_id: &str,
) -> Option<f64> {
    rates
        .iter()
        .find(|r| r.matches(carrier_id, supplier_id))
        .map(|r| r.divisor)
}

/// Only one record should be live at a time; when several are, the most
/// recently started one wins.
fn latest_start<'a, T, I, F>(candidates: I, start_of: F, what: &str) -> Option<&'a T>
where
    I: Iterator<Item = &'a T>,
    F: Fn(&T) -> Option<NaiveDate>,
{
    let mut live: Vec<&T> = candidates.collect();
    if live.len() > 1 {
        warn!(
            "{} active {} records overlap on the same date, using the latest start",
            live.len(),
            what
        );
    }
    live.sort_by_key(|r| start_of(*r));
    live.pop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fee(value: f64, start: NaiveDate, end: NaiveDate, status: RecordStatus) -> ExtraFee {
        ExtraFee {
            carrier_id: "DHL".to_string(),
            service_id: "EXP".to_string(),
            value,
            start_date: start,
            end_date: end,
            status,
        }
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let s = date(2026, 1, 1);
        let e = date(2026, 1, 31);
        assert!(window_contains(Some(s), Some(e), s));
        assert!(window_contains(Some(s), Some(e), e));
        assert!(!window_contains(Some(s), Some(e), date(2026, 2, 1)));
        assert!(window_contains(None, None, date(1999, 1, 1)));
        assert!(!window_contains(Some(s), None, date(2025, 12, 31)));
    }

    #[test]
    fn test_fsc_picks_window_containing_date() {
        let fees = vec![
            fee(18.5, date(2026, 1, 1), date(2026, 1, 31), RecordStatus::Active),
            fee(21.0, date(2026, 2, 1), date(2026, 2, 28), RecordStatus::Active),
        ];
        let found = resolve_fsc(&fees, "DHL", "EXP", date(2026, 2, 10)).unwrap();
        assert_eq!(found.value, 21.0);
        assert!(resolve_fsc(&fees, "DHL", "EXP", date(2026, 3, 1)).is_none());
        assert!(resolve_fsc(&fees, "DHL", "ECO", date(2026, 2, 10)).is_none());
    }

    #[test]
    fn test_fsc_skips_locked_records() {
        let fees = vec![fee(30.0, date(2026, 1, 1), date(2026, 12, 31), RecordStatus::Locked)];
        assert!(resolve_fsc(&fees, "DHL", "EXP", date(2026, 6, 1)).is_none());
    }

    #[test]
    fn test_overlapping_windows_prefer_latest_start() {
        let fees = vec![
            fee(20.0, date(2026, 3, 1), date(2026, 12, 31), RecordStatus::Active),
            fee(10.0, date(2026, 1, 1), date(2026, 12, 31), RecordStatus::Active),
        ];
        let found = resolve_fsc(&fees, "DHL", "EXP", date(2026, 6, 1)).unwrap();
        assert_eq!(found.value, 20.0);
    }

    #[test]
    fn test_vat_open_window() {
        let rates = vec![VatRate {
            carrier_id: "DHL".to_string(),
            service_id: "EXP".to_string(),
            supplier_id: "S1".to_string(),
            value: 8.0,
            start_date: None,
            end_date: None,
            status: RecordStatus::Active,
        }];
        let found = resolve_vat(&rates, "DHL", "EXP", "S1", date(2030, 1, 1)).unwrap();
        assert_eq!(found.value, 8.0);
        assert!(resolve_vat(&rates, "DHL", "EXP", "S2", date(2030, 1, 1)).is_none());
    }

    #[test]
    fn test_exchange_rate_direction_matters() {
        let rates = vec![ExchangeRate {
            currency_from: Currency::new("USD"),
            currency_to: Currency::new("VND"),
            rate: 25_400.0,
            start_date: date(2026, 10, 1),
            end_date: date(2026, 10, 31),
            status: RecordStatus::Active,
        }];
        let usd = Currency::new("USD");
        let vnd = Currency::new("VND");
        let found = resolve_exchange_rate(&rates, &usd, &vnd, date(2026, 10, 15)).unwrap();
        assert_eq!(found.rate, 25_400.0);
        assert!(resolve_exchange_rate(&rates, &vnd, &usd, date(2026, 10, 15)).is_none());
        assert!(resolve_exchange_rate(&rates, &usd, &vnd, date(2026, 11, 1)).is_none());
    }

    #[test]
    fn test_find_volumetric_divisor() {
        let rates = vec![
            VolumetricRate {
                carrier_id: "DHL".to_string(),
                supplier_id: "S1".to_string(),
                divisor: 5000.0,
            },
            VolumetricRate {
                carrier_id: "DHL".to_string(),
                supplier_id: "S2".to_string(),
                divisor: 6000.0,
            },
        ];
        assert_eq!(find_volumetric_divisor(&rates, "DHL", "S2"), Some(6000.0));
        assert_eq!(find_volumetric_divisor(&rates, "UPS", "S1"), None);
    }
}

//! Display formatting for monetary amounts and weights
//!
//! Amounts are computed unrounded; rounding happens only here.

use num_format::{Locale, ToFormattedString};
use shipbill_domain::model::Currency;

/// `1234567.891` USD -> `1,234,567.89`; VND is shown without decimals
pub fn format_amount(value: f64, currency: &Currency) -> String {
    let decimals = currency.display_decimals();
    let scale = 10u64.pow(decimals as u32);
    let scaled = (value.abs() * scale as f64).round() as u64;
    let int_part = scaled / scale;
    let frac_part = scaled % scale;

    let sign = if value < 0.0 && scaled > 0 { "-" } else { "" };
    if decimals == 0 {
        format!("{}{}", sign, int_part.to_formatted_string(&Locale::en))
    } else {
        format!(
            "{}{}.{:0width$}",
            sign,
            int_part.to_formatted_string(&Locale::en),
            frac_part,
            width = decimals
        )
    }
}

/// Amount followed by its currency code
pub fn format_money(value: f64, currency: &Currency) -> String {
    format!("{} {}", format_amount(value, currency), currency)
}

pub fn format_weight(kg: f64) -> String {
    format!("{:.1} kg", kg)
}

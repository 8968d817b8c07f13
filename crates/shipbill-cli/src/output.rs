//! Output formatting module

use serde::Serialize;
use shipbill_app::app::{Quote, SideQuote};
use shipbill_app::format::{format_money, format_weight};
use shipbill_domain::service::{BandIssue, ChargeableBreakdown};
use shipbill_types::{OutputFormat, Result};

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct VolumeOutput {
    length: f64,
    width: f64,
    height: f64,
    divisor: f64,
    volume_weight: f64,
}

pub fn output_volume(
    output_format: OutputFormat,
    dims: (f64, f64, f64),
    divisor: f64,
    volume_weight: f64,
) -> Result<()> {
    let (length, width, height) = dims;
    if output_format == OutputFormat::Json {
        return print_json(&VolumeOutput {
            length,
            width,
            height,
            divisor,
            volume_weight,
        });
    }
    println!(
        "{} x {} x {} cm / {} = {}",
        length,
        width,
        height,
        divisor,
        format_weight(volume_weight)
    );
    Ok(())
}

pub fn output_chargeable(output_format: OutputFormat, breakdown: &ChargeableBreakdown) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(breakdown);
    }
    print_weight_table(breakdown);
    Ok(())
}

fn print_weight_table(breakdown: &ChargeableBreakdown) {
    println!("\nChargeable Weight");
    println!("=================");
    println!("Policy:  {}   Divisor: {}", breakdown.policy, breakdown.divisor);
    println!("{}", "-".repeat(46));
    println!("{:>4} {:>12} {:>12} {:>14}", "#", "Gross", "Volume", "Chargeable");
    println!("{}", "-".repeat(46));
    for (i, piece) in breakdown.pieces.iter().enumerate() {
        println!(
            "{:>4} {:>12} {:>12} {:>14}",
            i + 1,
            format_weight(piece.gross_weight),
            format_weight(piece.volume_weight),
            format_weight(piece.chargeable_weight)
        );
    }
    println!("{}", "-".repeat(46));
    println!(
        "{:>4} {:>12} {:>12} {:>14}",
        "Sum",
        format_weight(breakdown.total_gross_weight),
        format_weight(breakdown.total_volume_weight),
        format_weight(breakdown.chargeable_weight)
    );
}

pub fn output_quote(output_format: OutputFormat, quote: &Quote) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(quote);
    }

    println!("\nShipment Quote");
    println!("==============");
    println!("Date:        {}", quote.date);
    println!("Carrier:     {}", quote.carrier_id);
    println!("Service:     {}", quote.service_id);
    println!("Product:     {}", quote.product_type);
    println!("Zone:        {}", quote.zone);
    print_weight_table(&quote.weight);

    print_side("Purchase", &quote.purchase);
    if let Some(ref sale) = quote.sale {
        print_side("Sale", sale);
    }
    if let Some(margin) = quote.margin {
        println!(
            "\nMargin:      {}",
            format_money(margin, &quote.purchase.breakdown.target_currency)
        );
    }
    Ok(())
}

fn print_side(label: &str, side: &SideQuote) {
    let b = &side.breakdown;
    println!("\n--- {} ({}) ---", label, side.group.counterparty);
    if side.price.is_price_per_kg {
        println!(
            "Band:        [{}, {}] kg at {} per kg",
            side.price.weight_min,
            side.price.weight_max,
            format_money(side.price.price, &b.currency)
        );
    } else {
        println!(
            "Band:        [{}, {}] kg",
            side.price.weight_min, side.price.weight_max
        );
    }
    println!("Base:        {}", format_money(b.base, &b.currency));
    println!(
        "FSC {:>5}%:  {}",
        b.fsc_percent,
        format_money(b.fsc_amount, &b.currency)
    );
    println!(
        "VAT {:>5}%:  {}",
        b.vat_percent,
        format_money(b.vat_amount, &b.currency)
    );
    println!("Subtotal:    {}", format_money(b.subtotal, &b.currency));
    if let Some(rate) = b.exchange_rate {
        println!("Rate:        1 {} = {} {}", b.currency, rate, b.target_currency);
    }
    println!("Total:       {}", format_money(b.total, &b.target_currency));
}

pub fn output_band_issues(output_format: OutputFormat, checked: usize, issues: &[BandIssue]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&issues);
    }

    println!("Checked {} rate cell(s)", checked);
    if issues.is_empty() {
        println!("No band problems found.");
        return Ok(());
    }
    println!("{}", "-".repeat(70));
    for issue in issues {
        println!(
            "{:<16} zone {:<4} {}  {}",
            issue.kind.label(),
            issue.zone,
            issue.group,
            issue.message
        );
    }
    println!("{}", "-".repeat(70));
    Ok(())
}

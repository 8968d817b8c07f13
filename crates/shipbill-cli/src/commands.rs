//! Command handlers

use crate::cli::{Cli, Commands, OutputFormat};
use crate::output::{output_band_issues, output_chargeable, output_quote, output_volume};
use chrono::Local;
use log::info;
use shipbill_app::app::{QuoteRequest, QuoteService};
use shipbill_app::config::Config;
use shipbill_app::repository::open_snapshot_repo;
use shipbill_domain::model::{ChargeableWeightPolicy, Currency, PieceDimension, RateCell};
use shipbill_domain::repository::RateSnapshotRepository;
use shipbill_domain::service::{chargeable_breakdown, compute_volume_weight, validate_price_group};
use shipbill_infra::csv_loader::{load_pieces_from_csv, load_rate_cells_from_csv};
use shipbill_types::{Error, Result};
use std::path::PathBuf;

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let output_format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Volume {
            length,
            width,
            height,
            divisor,
        } => {
            let weight = compute_volume_weight(length, width, height, divisor)?;
            output_volume(output_format, (length, width, height), divisor, weight)
        }

        Commands::Chargeable {
            pieces,
            piece,
            policy,
            divisor,
        } => {
            let pieces = collect_pieces(pieces, piece)?;
            cmd_chargeable(&pieces, policy.into(), divisor, output_format)
        }

        Commands::Quote {
            snapshot,
            pieces,
            piece,
            carrier,
            supplier,
            partner,
            service,
            product,
            zone,
            currency,
            price_currency,
            date,
            divisor,
        } => {
            let pieces = collect_pieces(pieces, piece)?;
            let target = currency.unwrap_or_else(|| config.default_currency.clone());
            let mut request = QuoteRequest::new(
                &carrier,
                &supplier,
                &service,
                product.into(),
                zone,
                pieces,
                Currency::new(&target),
                date.unwrap_or_else(|| Local::now().date_naive()),
            );
            request.partner_id = partner;
            request.price_currency = price_currency.as_deref().map(Currency::new);
            request.divisor = divisor;
            cmd_quote(&config, snapshot, &request, output_format)
        }

        Commands::Validate { snapshot, csv } => cmd_validate(&config, snapshot, csv, output_format),

        Commands::Config {
            show,
            set_snapshot,
            add_rate_csv,
            set_currency,
            set_divisor,
            set_output,
            reset,
        } => cmd_config(
            config,
            show,
            set_snapshot,
            add_rate_csv,
            set_currency,
            set_divisor,
            set_output,
            reset,
        ),
    }
}

/// Pieces from a CSV file followed by any given inline.
/// An empty result is left for the engine to reject.
fn collect_pieces(file: Option<PathBuf>, inline: Vec<PieceDimension>) -> Result<Vec<PieceDimension>> {
    let mut pieces = match file {
        Some(path) => load_pieces_from_csv(&path)?,
        None => Vec::new(),
    };
    pieces.extend(inline);
    Ok(pieces)
}

fn cmd_chargeable(
    pieces: &[PieceDimension],
    policy: ChargeableWeightPolicy,
    divisor: f64,
    output_format: OutputFormat,
) -> Result<()> {
    let breakdown = chargeable_breakdown(pieces, policy, divisor)?;
    output_chargeable(output_format, &breakdown)
}

fn cmd_quote(
    config: &Config,
    snapshot: Option<PathBuf>,
    request: &QuoteRequest,
    output_format: OutputFormat,
) -> Result<()> {
    let repo = open_snapshot_repo(config, snapshot)?;
    info!("Reading rates from {}", repo.snapshot_path().display());
    let service = QuoteService::new(repo).with_fallback_divisor(config.default_divisor);
    let quote = service.quote(request)?;
    output_quote(output_format, &quote)
}

fn cmd_validate(
    config: &Config,
    snapshot: Option<PathBuf>,
    csv: Vec<PathBuf>,
    output_format: OutputFormat,
) -> Result<()> {
    let cells: Vec<RateCell> = if csv.is_empty() {
        open_snapshot_repo(config, snapshot)?.load()?.rate_cells
    } else {
        let mut cells = Vec::new();
        for path in &csv {
            cells.extend(load_rate_cells_from_csv(path)?);
        }
        cells
    };

    let issues = validate_price_group(&cells);
    output_band_issues(output_format, cells.len(), &issues)?;

    if !issues.is_empty() {
        eprintln!("\nWarning: {} band problem(s) found", issues.len());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_config(
    mut config: Config,
    show: bool,
    set_snapshot: Option<PathBuf>,
    add_rate_csv: Option<PathBuf>,
    set_currency: Option<String>,
    set_divisor: Option<f64>,
    set_output: Option<OutputFormat>,
    reset: bool,
) -> Result<()> {
    if reset {
        config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut modified = false;

    if let Some(path) = set_snapshot {
        config.snapshot_path = Some(path);
        modified = true;
    }
    if let Some(path) = add_rate_csv {
        if !config.rate_cell_csvs.contains(&path) {
            config.rate_cell_csvs.push(path);
        }
        modified = true;
    }
    if let Some(currency) = set_currency {
        config.default_currency = Currency::new(&currency).to_string();
        modified = true;
    }
    if let Some(divisor) = set_divisor {
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "divisor must be positive, got {}",
                divisor
            )));
        }
        config.default_divisor = Some(divisor);
        modified = true;
    }
    if let Some(format) = set_output {
        config.output_format = format;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration saved");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

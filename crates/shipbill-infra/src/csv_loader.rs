//! CSV loaders for shipment pieces and rate-table exports

use std::path::Path;

use serde::Deserialize;
use shipbill_domain::model::{
    Counterparty, Currency, PieceDimension, ProductType, RateCell, RecordStatus,
};
use shipbill_types::{Error, Result, SnapshotError};

/// Load shipment pieces from a CSV file
///
/// Expected columns (header optional):
/// length, width, height, gross_weight
pub fn load_pieces_from_csv(path: &Path) -> Result<Vec<PieceDimension>> {
    if !path.exists() {
        return Err(Error::FileNotFound(format!(
            "Pieces file not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    parse_pieces_csv(&content)
}

pub fn parse_pieces_csv(content: &str) -> Result<Vec<PieceDimension>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(content.as_bytes());

    let mut pieces = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let row = idx + 1;
        if row == 1 && is_header(&record) {
            continue;
        }
        pieces.push(parse_piece_record(&record, row)?);
    }
    Ok(pieces)
}

fn is_header(record: &csv::StringRecord) -> bool {
    record
        .get(0)
        .is_some_and(|first| !first.is_empty() && first.parse::<f64>().is_err())
}

fn parse_piece_record(record: &csv::StringRecord, row: usize) -> Result<PieceDimension> {
    if record.len() < 4 {
        return Err(SnapshotError::InvalidRecord {
            row,
            message: format!("expected 4 columns, found {}", record.len()),
        }
        .into());
    }
    let field = |i: usize, name: &str| -> Result<f64> {
        let raw = record.get(i).unwrap_or("");
        raw.parse::<f64>().map_err(|_| {
            SnapshotError::InvalidRecord {
                row,
                message: format!("{} is not a number: {:?}", name, raw),
            }
            .into()
        })
    };

    Ok(PieceDimension::new(
        field(0, "length")?,
        field(1, "width")?,
        field(2, "height")?,
        field(3, "gross weight")?,
    ))
}

/// One row of a flat rate-table export
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateCellRow {
    carrier_id: String,
    counterparty_kind: String,
    counterparty_id: String,
    service_id: String,
    product_type: String,
    zone: u32,
    weight_min: f64,
    weight_max: f64,
    price: f64,
    currency: String,
    #[serde(rename = "isPricePerKG", alias = "isPricePerKg", default)]
    is_price_per_kg: bool,
    #[serde(default)]
    status: Option<String>,
}

/// Load rate cells from a CSV export with a header row
///
/// Columns: carrierId, counterpartyKind (supplier|partner), counterpartyId,
/// serviceId, productType, zone, weightMin, weightMax, price, currency,
/// isPricePerKG, status
pub fn load_rate_cells_from_csv(path: &Path) -> Result<Vec<RateCell>> {
    if !path.exists() {
        return Err(Error::FileNotFound(format!(
            "Rate cell file not found: {}",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path)?;
    parse_rate_cells_csv(&content)
}

pub fn parse_rate_cells_csv(content: &str) -> Result<Vec<RateCell>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut cells = Vec::new();
    for (idx, result) in reader.deserialize::<RateCellRow>().enumerate() {
        let row = result?;
        // +2: 1-based and the header is row 1
        cells.push(rate_cell_from_row(row, idx + 2)?);
    }
    Ok(cells)
}

fn rate_cell_from_row(row: RateCellRow, row_num: usize) -> Result<RateCell> {
    let invalid = |message: String| -> Error {
        SnapshotError::InvalidRecord {
            row: row_num,
            message,
        }
        .into()
    };

    let counterparty = match row.counterparty_kind.to_lowercase().as_str() {
        "supplier" => Counterparty::Supplier(row.counterparty_id),
        "partner" => Counterparty::Partner(row.counterparty_id),
        other => return Err(invalid(format!("unknown counterparty kind: {}", other))),
    };
    let product_type: ProductType = row.product_type.parse().map_err(invalid)?;
    let status = match row.status.as_deref() {
        None | Some("") => RecordStatus::Active,
        Some(s) => s.parse().map_err(invalid)?,
    };

    Ok(RateCell {
        carrier_id: row.carrier_id,
        counterparty,
        service_id: row.service_id,
        product_type,
        zone: row.zone,
        weight_min: row.weight_min,
        weight_max: row.weight_max,
        price: row.price,
        currency: Currency::new(&row.currency),
        is_price_per_kg: row.is_price_per_kg,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pieces_with_header() {
        let csv = "length,width,height,grossWeight\n40,30,20,3\n40,25,20,10\n";
        let pieces = parse_pieces_csv(csv).unwrap();
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[1].gross_weight, 10.0);
    }

    #[test]
    fn test_pieces_without_header() {
        let csv = "50.5, 20, 25, 4.2\n";
        let pieces = parse_pieces_csv(csv).unwrap();
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].length, 50.5);
        assert!(pieces[0].volume_weight.is_none());
    }

    #[test]
    fn test_piece_with_bad_number() {
        let csv = "40,30,abc,3\n";
        let err = parse_pieces_csv(csv).unwrap_err();
        assert!(matches!(
            err,
            Error::Snapshot(SnapshotError::InvalidRecord { row: 1, .. })
        ));
    }

    #[test]
    fn test_piece_with_missing_column() {
        let csv = "length,width,height,grossWeight\n40,30,20\n";
        let err = parse_pieces_csv(csv).unwrap_err();
        assert!(matches!(
            err,
            Error::Snapshot(SnapshotError::InvalidRecord { row: 2, .. })
        ));
    }

    #[test]
    fn test_rate_cells() {
        let csv = "\
carrierId,counterpartyKind,counterpartyId,serviceId,productType,zone,weightMin,weightMax,price,currency,isPricePerKG,status
DHL,supplier,S1,EXP,PARCEL,3,0,5,10,usd,false,Active
DHL,partner,P1,EXP,document,3,5.5,10,2.5,USD,true,
";
        let cells = parse_rate_cells_csv(csv).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].counterparty, Counterparty::Supplier("S1".to_string()));
        assert_eq!(cells[0].currency.code(), "USD");
        assert_eq!(cells[1].product_type, ProductType::Document);
        assert!(cells[1].is_price_per_kg);
        assert_eq!(cells[1].status, RecordStatus::Active);
    }

    #[test]
    fn test_rate_cell_bad_kind() {
        let csv = "\
carrierId,counterpartyKind,counterpartyId,serviceId,productType,zone,weightMin,weightMax,price,currency,isPricePerKG,status
DHL,customer,S1,EXP,PARCEL,3,0,5,10,USD,false,Active
";
        let err = parse_rate_cells_csv(csv).unwrap_err();
        assert!(matches!(
            err,
            Error::Snapshot(SnapshotError::InvalidRecord { row: 2, .. })
        ));
    }
}

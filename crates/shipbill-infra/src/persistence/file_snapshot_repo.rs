//! File-based implementation of RateSnapshotRepository

use std::path::PathBuf;

use shipbill_domain::model::RateSnapshot;
use shipbill_domain::repository::RateSnapshotRepository;
use shipbill_types::Error;

use crate::csv_loader::load_rate_cells_from_csv;
use crate::snapshot_loader::load_snapshot;

/// Snapshot read from a JSON/TOML export, optionally extended with rate-table CSVs
pub struct FileRateSnapshotRepository {
    snapshot_path: PathBuf,
    rate_cell_csvs: Vec<PathBuf>,
}

impl FileRateSnapshotRepository {
    pub fn new(snapshot_path: PathBuf) -> Self {
        Self {
            snapshot_path,
            rate_cell_csvs: Vec::new(),
        }
    }

    /// Append the rows of a rate-table CSV to every loaded snapshot
    pub fn with_rate_cells_csv(mut self, path: PathBuf) -> Self {
        self.rate_cell_csvs.push(path);
        self
    }

    pub fn snapshot_path(&self) -> &PathBuf {
        &self.snapshot_path
    }
}

impl RateSnapshotRepository for FileRateSnapshotRepository {
    fn load(&self) -> Result<RateSnapshot, Error> {
        let mut snapshot = load_snapshot(&self.snapshot_path)?;
        for csv_path in &self.rate_cell_csvs {
            let cells = load_rate_cells_from_csv(csv_path)?;
            snapshot.rate_cells.extend(cells);
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_json_with_extra_csv() {
        let dir = tempdir().unwrap();
        let snapshot_path = dir.path().join("rates.json");
        fs::write(
            &snapshot_path,
            r#"{"carriers": [{"id": "DHL", "chargeableWeightType": "DETAIL"}]}"#,
        )
        .unwrap();
        let csv_path = dir.path().join("cells.csv");
        fs::write(
            &csv_path,
            "carrierId,counterpartyKind,counterpartyId,serviceId,productType,zone,weightMin,weightMax,price,currency,isPricePerKG,status\n\
             DHL,supplier,S1,EXP,PARCEL,1,0,5,10,USD,false,Active\n",
        )
        .unwrap();

        let repo = FileRateSnapshotRepository::new(snapshot_path).with_rate_cells_csv(csv_path);
        let snapshot = repo.load().unwrap();
        assert_eq!(snapshot.carriers.len(), 1);
        assert_eq!(snapshot.rate_cells.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let repo = FileRateSnapshotRepository::new(dir.path().join("nope.json"));
        assert!(matches!(repo.load(), Err(Error::FileNotFound(_))));
    }
}

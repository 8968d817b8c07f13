//! Repository adapters for the data-access layer

use std::path::PathBuf;

use shipbill_infra::persistence::FileRateSnapshotRepository;
use shipbill_types::{Error, Result};

use crate::config::Config;

/// Open the snapshot repository, preferring an explicit path over the configured one
pub fn open_snapshot_repo(
    config: &Config,
    snapshot_override: Option<PathBuf>,
) -> Result<FileRateSnapshotRepository> {
    let path = snapshot_override
        .or_else(|| config.snapshot_path.clone())
        .ok_or_else(|| {
            Error::InvalidArgument(
                "no rate snapshot given; pass --snapshot or run `shipbill config --set-snapshot`"
                    .to_string(),
            )
        })?;

    let repo = config
        .rate_cell_csvs
        .iter()
        .cloned()
        .fold(FileRateSnapshotRepository::new(path), |repo, csv| {
            repo.with_rate_cells_csv(csv)
        });
    Ok(repo)
}

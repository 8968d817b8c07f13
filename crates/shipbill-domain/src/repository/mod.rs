//! Repository trait definitions for rate data access

use shipbill_types::Error;

use crate::model::RateSnapshot;

/// Source of rate-table snapshots
///
/// The backend owns the data; implementations fetch a complete snapshot up
/// front so pricing itself never performs I/O.
pub trait RateSnapshotRepository {
    /// Load the full snapshot
    fn load(&self) -> Result<RateSnapshot, Error>;
}

/// Snapshot already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotRepository {
    snapshot: RateSnapshot,
}

impl InMemorySnapshotRepository {
    pub fn new(snapshot: RateSnapshot) -> Self {
        Self { snapshot }
    }
}

impl RateSnapshotRepository for InMemorySnapshotRepository {
    fn load(&self) -> Result<RateSnapshot, Error> {
        Ok(self.snapshot.clone())
    }
}

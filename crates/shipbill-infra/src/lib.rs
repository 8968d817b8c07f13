//! Infrastructure layer - snapshot loading and file-backed repositories

pub mod csv_loader;
pub mod persistence;
pub mod snapshot_loader;

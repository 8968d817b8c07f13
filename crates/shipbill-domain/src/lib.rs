//! Shipment pricing domain: entities, the rate & weight resolution engine,
//! and the repository seam the application layer reads snapshots through.

pub mod model;
pub mod repository;
pub mod service;

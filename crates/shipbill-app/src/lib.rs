//! Application service layer - quoting use case, config, display formatting

pub mod app;
pub mod config;
pub mod format;
pub mod repository;

//! Application services

pub mod quote_service;

pub use quote_service::{quote_with_snapshot, Quote, QuoteRequest, QuoteService, SideQuote};

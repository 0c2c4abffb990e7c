//! World Bank indicator source.
//!
//! Implements the core `IndicatorSource` trait on top of the public
//! World Bank REST API, one HTTP request per curated series.

pub mod client;
pub mod error;

pub use client::{RawDataPoint, WorldBankClient, WORLD_BANK_API_URL};
pub use error::WorldBankError;

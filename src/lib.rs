//! Pharmacy claims ETL: turns a flat claims extract into a monthly
//! per-drug cost summary.

pub mod config;
pub mod error;
pub mod process;

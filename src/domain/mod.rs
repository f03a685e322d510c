//! Core domain types and logic.

pub mod ohlcv;
pub mod series;
pub mod indicator;
pub mod enrich;
pub mod setup;
pub mod scan_config;
pub mod config_validation;
pub mod universe;
pub mod earnings;
pub mod report;
pub mod scanner;
pub mod error;

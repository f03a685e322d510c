//! Port traits for hexagonal architecture.

pub mod config_port;
pub mod data_port;
pub mod earnings_port;
pub mod report_port;

//! catalyst-scanner: flags Episodic Pivot, Momentum and Swing-Breakout setups
//! among tickers that recently reported earnings.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`], command line in [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;

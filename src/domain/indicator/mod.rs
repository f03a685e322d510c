//! Technical indicator implementations.
//!
//! Every calculation returns one `Option<f64>` per input value, aligned by
//! index. A value is `None` until its trailing window is satisfied:
//! - `ema`: exponential moving average seeded with a simple average
//! - `sma`: simple moving average
//! - `rolling`: trailing mean / max / min over arbitrary inputs

pub mod ema;
pub mod rolling;
pub mod sma;

use std::fmt;

/// Indicator identity plus window length, used for labelling output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Ema(usize),
    Sma(usize),
    Adr(usize),
    VolumeAvg(usize),
    RollingHigh(usize),
    RollingLow(usize),
}

impl IndicatorType {
    /// Number of observations needed before the first defined value.
    pub fn warmup(&self) -> usize {
        match *self {
            IndicatorType::Ema(n)
            | IndicatorType::Sma(n)
            | IndicatorType::Adr(n)
            | IndicatorType::VolumeAvg(n)
            | IndicatorType::RollingHigh(n)
            | IndicatorType::RollingLow(n) => n,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Ema(period) => write!(f, "EMA({})", period),
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Adr(period) => write!(f, "ADR({})", period),
            IndicatorType::VolumeAvg(period) => write!(f, "VOL_AVG({})", period),
            IndicatorType::RollingHigh(period) => write!(f, "HIGH({})", period),
            IndicatorType::RollingLow(period) => write!(f, "LOW({})", period),
        }
    }
}

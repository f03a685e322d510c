//! Daily OHLCV bar representation.

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Data-quality defect found on a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarIssue {
    NonFinite,
    NonPositivePrice,
    NegativeVolume,
    InvertedRange,
}

impl fmt::Display for BarIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarIssue::NonFinite => write!(f, "non-finite price"),
            BarIssue::NonPositivePrice => write!(f, "non-positive price"),
            BarIssue::NegativeVolume => write!(f, "negative volume"),
            BarIssue::InvertedRange => write!(f, "high below low"),
        }
    }
}

impl OhlcvBar {
    /// (high - low) / low * 100. `None` when low is zero or negative.
    pub fn daily_range_pct(&self) -> Option<f64> {
        if self.low <= 0.0 {
            return None;
        }
        Some((self.high - self.low) / self.low * 100.0)
    }

    /// First data-quality defect on this bar, if any.
    pub fn issue(&self) -> Option<BarIssue> {
        let prices = [self.open, self.high, self.low, self.close];
        if prices.iter().any(|p| !p.is_finite()) {
            return Some(BarIssue::NonFinite);
        }
        if prices.iter().any(|&p| p <= 0.0) {
            return Some(BarIssue::NonPositivePrice);
        }
        if self.volume < 0 {
            return Some(BarIssue::NegativeVolume);
        }
        if self.high < self.low {
            return Some(BarIssue::InvertedRange);
        }
        None
    }
}

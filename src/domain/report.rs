//! Aggregated scan results.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpHit {
    pub ticker: String,
    pub gap_pct: f64,
    pub vol_ratio: f64,
    pub close: f64,
    pub low_confidence: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentumHit {
    pub ticker: String,
    pub adr20: f64,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwingHit {
    pub ticker: String,
    pub range_pct: f64,
    pub close: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    NoData,
    InsufficientBars { bars: usize, minimum: usize },
    FetchFailed { reason: String },
    InvalidSeries { reason: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoData => write!(f, "no data"),
            SkipReason::InsufficientBars { bars, minimum } => {
                write!(f, "only {} bars, minimum {} required", bars, minimum)
            }
            SkipReason::FetchFailed { reason } => write!(f, "fetch failed: {}", reason),
            SkipReason::InvalidSeries { reason } => write!(f, "invalid series: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedTicker {
    pub ticker: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub as_of: NaiveDate,
    pub tickers_scanned: usize,
    pub ep: Vec<EpHit>,
    pub momentum: Vec<MomentumHit>,
    pub swing: Vec<SwingHit>,
    pub skipped: Vec<SkippedTicker>,
}

impl ScanReport {
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            tickers_scanned: 0,
            ep: Vec::new(),
            momentum: Vec::new(),
            swing: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn total_hits(&self) -> usize {
        self.ep.len() + self.momentum.len() + self.swing.len()
    }
}

pub fn chart_url(ticker: &str) -> String {
    format!("https://www.tradingview.com/chart/?symbol={}", ticker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::NoData.to_string(), "no data");
        assert_eq!(
            SkipReason::InsufficientBars {
                bars: 12,
                minimum: 50
            }
            .to_string(),
            "only 12 bars, minimum 50 required"
        );
        assert_eq!(
            SkipReason::FetchFailed {
                reason: "timeout".into()
            }
            .to_string(),
            "fetch failed: timeout"
        );
    }

    #[test]
    fn total_hits_counts_all_categories() {
        let mut report = ScanReport::new(NaiveDate::from_ymd_opt(2024, 8, 15).unwrap());
        assert_eq!(report.total_hits(), 0);
        report.momentum.push(MomentumHit {
            ticker: "PLTR".into(),
            adr20: 5.1,
            close: 30.0,
        });
        report.swing.push(SwingHit {
            ticker: "CRWD".into(),
            range_pct: 9.0,
            close: 300.0,
        });
        assert_eq!(report.total_hits(), 2);
    }

    #[test]
    fn chart_url_format() {
        assert_eq!(
            chart_url("NVDA"),
            "https://www.tradingview.com/chart/?symbol=NVDA"
        );
    }
}

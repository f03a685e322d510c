#![allow(dead_code)]

use catalyst_scanner::domain::error::ScannerError;
pub use catalyst_scanner::domain::ohlcv::OhlcvBar;
use catalyst_scanner::ports::data_port::DataPort;
use catalyst_scanner::ports::earnings_port::EarningsPort;
use chrono::{Duration, NaiveDate};
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::path::Path;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_daily_bars(
        &self,
        ticker: &str,
        _start_date: NaiveDate,
        _end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, ScannerError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(ScannerError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }
}

pub struct MockEarningsPort {
    pub by_date: HashMap<NaiveDate, Vec<String>>,
    pub failing: HashSet<NaiveDate>,
}

impl MockEarningsPort {
    pub fn new() -> Self {
        Self {
            by_date: HashMap::new(),
            failing: HashSet::new(),
        }
    }

    pub fn with_reporters(mut self, date: NaiveDate, tickers: &[&str]) -> Self {
        self.by_date
            .insert(date, tickers.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn with_failure(mut self, date: NaiveDate) -> Self {
        self.failing.insert(date);
        self
    }
}

impl EarningsPort for MockEarningsPort {
    fn earnings_on(&self, date: NaiveDate) -> Result<Vec<String>, ScannerError> {
        if self.failing.contains(&date) {
            return Err(ScannerError::DataSource {
                reason: format!("calendar unavailable for {}", date),
            });
        }
        Ok(self.by_date.get(&date).cloned().unwrap_or_default())
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn day(i: usize) -> NaiveDate {
    date("2023-01-02") + Duration::days(i as i64)
}

pub fn make_bar(i: usize, open: f64, high: f64, low: f64, close: f64, volume: i64) -> OhlcvBar {
    OhlcvBar {
        date: day(i),
        open,
        high,
        low,
        close,
        volume,
    }
}

/// Flat at 100 on 200k shares, then a 9% gap on 500k shares.
pub fn ep_bars() -> Vec<OhlcvBar> {
    let mut bars: Vec<OhlcvBar> = (0..60)
        .map(|i| make_bar(i, 100.0, 101.0, 99.0, 100.0, 200_000))
        .collect();
    bars.push(make_bar(60, 109.0, 112.0, 108.0, 110.0, 500_000));
    bars
}

/// 1% daily gains with a wide 6% range: passes momentum only.
pub fn momentum_bars() -> Vec<OhlcvBar> {
    let mut close = 20.0;
    (0..60)
        .map(|i| {
            let open = close;
            close *= 1.01;
            make_bar(i, open, close * 1.03, close * 0.97, close, 1_000)
        })
        .collect()
}

/// A long advance from 50 to 120 followed by a tight 15-bar base.
pub fn swing_bars() -> Vec<OhlcvBar> {
    let mut bars: Vec<OhlcvBar> = (0..245)
        .map(|i| {
            let close = 50.0 + 70.0 * i as f64 / 244.0;
            make_bar(i, close, close * 1.01, close * 0.99, close, 1_000)
        })
        .collect();
    for i in 245..260 {
        let close = if i == 259 { 120.5 } else { 120.0 };
        bars.push(make_bar(i, 120.0, 121.0, 119.0, close, 1_000));
    }
    bars
}

pub fn flat_bars(count: usize) -> Vec<OhlcvBar> {
    (0..count)
        .map(|i| make_bar(i, 10.0, 10.5, 9.5, 10.0, 1_000))
        .collect()
}

pub fn bars_csv(bars: &[OhlcvBar]) -> String {
    let mut out = String::from("date,open,high,low,close,volume\n");
    for b in bars {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            b.date, b.open, b.high, b.low, b.close, b.volume
        )
        .unwrap();
    }
    out
}

pub fn write_bars_csv(dir: &Path, ticker: &str, bars: &[OhlcvBar]) {
    std::fs::write(dir.join(format!("{}.csv", ticker)), bars_csv(bars)).unwrap();
}

pub fn tickers(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

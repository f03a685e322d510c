//! Ordered daily bar series for a single ticker.
//!
//! Bars are held in strictly increasing date order. Positional access goes
//! through named accessors (`latest`, `previous`, `trailing`) so bounds are
//! always checked.

use crate::domain::error::ScannerError;
use crate::domain::ohlcv::OhlcvBar;

#[derive(Debug, Clone)]
pub struct Series {
    ticker: String,
    bars: Vec<OhlcvBar>,
}

impl Series {
    /// Sorts `bars` by date. Two bars on the same date are a malformed input and
    /// reject the whole series.
    pub fn new(ticker: impl Into<String>, mut bars: Vec<OhlcvBar>) -> Result<Self, ScannerError> {
        let ticker = ticker.into();
        bars.sort_by_key(|b| b.date);
        if let Some(pair) = bars.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(ScannerError::DuplicateBarDate {
                ticker,
                date: pair[0].date,
            });
        }
        Ok(Self { ticker, bars })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest(&self) -> Option<&OhlcvBar> {
        self.bars.last()
    }

    pub fn previous(&self) -> Option<&OhlcvBar> {
        latest_minus(&self.bars, 1)
    }

    /// The last `n` bars, or `None` when fewer than `n` exist.
    pub fn trailing(&self, n: usize) -> Option<&[OhlcvBar]> {
        trailing_window(&self.bars, n)
    }
}

pub(crate) fn latest_minus<T>(items: &[T], back: usize) -> Option<&T> {
    items.len().checked_sub(back + 1).map(|i| &items[i])
}

pub(crate) fn trailing_window<T>(items: &[T], n: usize) -> Option<&[T]> {
    items.len().checked_sub(n).map(|start| &items[start..])
}

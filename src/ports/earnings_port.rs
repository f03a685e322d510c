//! Earnings calendar port.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::domain::error::ScannerError;
use crate::domain::universe::{is_plausible_ticker, normalize_ticker};

pub trait EarningsPort {
    /// Ticker symbols with an earnings announcement on `date`.
    fn earnings_on(&self, date: NaiveDate) -> Result<Vec<String>, ScannerError>;

    /// Union of [`earnings_on`](Self::earnings_on) over `dates`, normalized and
    /// de-duplicated. A failing date is logged and contributes nothing.
    fn fetch_earnings_tickers(&self, dates: &[NaiveDate]) -> BTreeSet<String> {
        let mut tickers = BTreeSet::new();
        for &date in dates {
            match self.earnings_on(date) {
                Ok(found) => {
                    let before = tickers.len();
                    tickers.extend(
                        found
                            .iter()
                            .map(|t| normalize_ticker(t))
                            .filter(|t| is_plausible_ticker(t)),
                    );
                    debug!(%date, listed = found.len(), added = tickers.len() - before, "earnings date");
                }
                Err(e) => warn!(%date, error = %e, "failed to fetch earnings"),
            }
        }
        tickers
    }
}

//! Market data access port.

use crate::domain::error::ScannerError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily bars for `ticker` dated within `[start_date, end_date]`.
    ///
    /// An unknown ticker or unreadable source is an `Err`; an empty `Vec`
    /// means the source knows the ticker but has no bars in range.
    fn fetch_daily_bars(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, ScannerError>;
}

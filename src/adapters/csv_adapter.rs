//! CSV directory data adapter: one `<TICKER>.csv` per symbol.
//!
//! Expected header: `date,open,high,low,close,volume`, dates as `YYYY-MM-DD`.

use crate::domain::error::ScannerError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

fn field<T>(record: &csv::StringRecord, index: usize, name: &str) -> Result<T, ScannerError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    record
        .get(index)
        .ok_or_else(|| ScannerError::DataSource {
            reason: format!("missing {} column", name),
        })?
        .trim()
        .parse()
        .map_err(|e| ScannerError::DataSource {
            reason: format!("invalid {} value: {}", name, e),
        })
}

/// Whole-number volume; exports that write `123456.0` are accepted.
fn volume(record: &csv::StringRecord) -> Result<i64, ScannerError> {
    let raw: String = field(record, 5, "volume")?;
    if let Ok(v) = raw.parse::<i64>() {
        return Ok(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        _ => Err(ScannerError::DataSource {
            reason: format!("invalid volume value: {}", raw),
        }),
    }
}

impl DataPort for CsvAdapter {
    fn fetch_daily_bars(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, ScannerError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| ScannerError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| ScannerError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str: String = field(&record, 0, "date")?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                ScannerError::DataSource {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            if date < start_date || date > end_date {
                continue;
            }

            bars.push(OhlcvBar {
                date,
                open: field(&record, 1, "open")?,
                high: field(&record, 2, "high")?,
                low: field(&record, 3, "low")?,
                close: field(&record, 4, "close")?,
                volume: volume(&record)?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

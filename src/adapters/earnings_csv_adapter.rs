//! Earnings calendar read from a single CSV file with header `date,ticker`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::error::ScannerError;
use crate::ports::earnings_port::EarningsPort;

pub struct EarningsCsvAdapter {
    by_date: BTreeMap<NaiveDate, Vec<String>>,
}

impl EarningsCsvAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScannerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ScannerError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;
        Self::from_string(&content)
    }

    pub fn from_string(content: &str) -> Result<Self, ScannerError> {
        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut by_date: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();

        for result in rdr.records() {
            let record = result.map_err(|e| ScannerError::DataSource {
                reason: format!("CSV parse error: {}", e),
            })?;

            let (Some(date_str), Some(ticker)) = (record.get(0), record.get(1)) else {
                return Err(ScannerError::DataSource {
                    reason: "earnings row needs date and ticker columns".into(),
                });
            };
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                ScannerError::DataSource {
                    reason: format!("invalid date format: {}", e),
                }
            })?;

            by_date.entry(date).or_default().push(ticker.trim().to_string());
        }

        Ok(Self { by_date })
    }
}

impl EarningsPort for EarningsCsvAdapter {
    fn earnings_on(&self, date: NaiveDate) -> Result<Vec<String>, ScannerError> {
        Ok(self.by_date.get(&date).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::NamedTempFile;

    const CALENDAR: &str = "date,ticker\n\
        2024-08-13,NVDA\n\
        2024-08-14,amd\n\
        2024-08-14,NVDA\n\
        2024-08-15,PLTR\n\
        2024-08-15,Earnings Call\n\
        2024-08-16,TSLA\n";

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
    }

    #[test]
    fn earnings_on_returns_rows_for_date() {
        let adapter = EarningsCsvAdapter::from_string(CALENDAR).unwrap();
        assert_eq!(adapter.earnings_on(date(14)).unwrap(), vec!["amd", "NVDA"]);
        assert!(adapter.earnings_on(date(1)).unwrap().is_empty());
    }

    #[test]
    fn fetch_earnings_tickers_dedupes_and_filters() {
        let adapter = EarningsCsvAdapter::from_string(CALENDAR).unwrap();
        let tickers = adapter.fetch_earnings_tickers(&[date(15), date(14), date(13)]);
        let expected: BTreeSet<String> =
            ["AMD", "NVDA", "PLTR"].iter().map(|s| s.to_string()).collect();
        assert_eq!(tickers, expected);
    }

    #[test]
    fn invalid_date_is_error() {
        let result = EarningsCsvAdapter::from_string("date,ticker\n08/14/2024,NVDA\n");
        assert!(matches!(result, Err(ScannerError::DataSource { .. })));
    }

    #[test]
    fn from_file_reads_calendar() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), CALENDAR).unwrap();
        let adapter = EarningsCsvAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.earnings_on(date(16)).unwrap(), vec!["TSLA"]);
    }

    #[test]
    fn from_file_missing_is_error() {
        assert!(EarningsCsvAdapter::from_file("/nonexistent/earnings.csv").is_err());
    }
}

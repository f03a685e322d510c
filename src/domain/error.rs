//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for catalyst-scanner.
#[derive(Debug, thiserror::Error)]
pub enum ScannerError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {ticker}")]
    NoData { ticker: String },

    #[error("insufficient history for {ticker}: have {bars} bars, need {minimum}")]
    InsufficientHistory {
        ticker: String,
        bars: usize,
        minimum: usize,
    },

    #[error("duplicate bar date {date} in series for {ticker}")]
    DuplicateBarDate { ticker: String, date: NaiveDate },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ScannerError> for std::process::ExitCode {
    fn from(err: &ScannerError) -> Self {
        let code: u8 = match err {
            ScannerError::Io(_) => 1,
            ScannerError::ConfigParse { .. }
            | ScannerError::ConfigMissing { .. }
            | ScannerError::ConfigInvalid { .. } => 2,
            ScannerError::DataSource { .. } | ScannerError::DuplicateBarDate { .. } => 3,
            ScannerError::NoData { .. } | ScannerError::InsufficientHistory { .. } => 5,
            ScannerError::Report { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}

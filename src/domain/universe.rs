//! Ticker universe: parsing and sanity-checking ticker symbols.

use std::collections::HashSet;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UniverseError {
    #[error("empty token in ticker list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(String),

    #[error("invalid ticker symbol: {0}")]
    InvalidTicker(String),
}

pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// 1-5 ASCII letters, optionally followed by one `.` or `-` and a 1-2 letter
/// share-class suffix (`BRK.B`, `BF-B`).
pub fn is_plausible_ticker(ticker: &str) -> bool {
    let (root, suffix) = match ticker.find(['.', '-']) {
        Some(i) => (&ticker[..i], Some(&ticker[i + 1..])),
        None => (ticker, None),
    };
    let letters = |s: &str, max: usize| {
        !s.is_empty() && s.len() <= max && s.chars().all(|c| c.is_ascii_alphabetic())
    };
    letters(root, 5) && suffix.is_none_or(|s| letters(s, 2))
}

/// Parses a comma-separated ticker list, e.g. from `--tickers`.
pub fn parse_tickers(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let ticker = normalize_ticker(token);
        if ticker.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        if !is_plausible_ticker(&ticker) {
            return Err(UniverseError::InvalidTicker(ticker));
        }
        if !seen.insert(ticker.clone()) {
            return Err(UniverseError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

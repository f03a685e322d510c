//! Configuration validation.
//!
//! Validates every scanner setting before a scan runs.

use crate::domain::error::ScannerError;
use crate::domain::scan_config::{HighFallback, MAX_EARNINGS_LOOKBACK_DAYS, MAX_HISTORY_DAYS};
use crate::ports::config_port::ConfigPort;

pub fn validate_scan_config(config: &dyn ConfigPort) -> Result<(), ScannerError> {
    validate_data_source(config)?;
    validate_scanner_settings(config)?;
    validate_ep_thresholds(config)?;
    validate_momentum_thresholds(config)?;
    validate_swing_thresholds(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> ScannerError {
    ScannerError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn require_positive(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<(), ScannerError> {
    let value = config.get_double(section, key, default);
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(section, key, &format!("{} must be positive", key)));
    }
    Ok(())
}

fn require_non_negative_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), ScannerError> {
    if config.get_int(section, key, 0) < 0 {
        return Err(invalid(section, key, &format!("{} must be non-negative", key)));
    }
    Ok(())
}

fn require_days_in_range(
    config: &dyn ConfigPort,
    key: &str,
    default: u32,
    min: u32,
    max: u32,
) -> Result<(), ScannerError> {
    let raw = config.get_int("scanner", key, i64::from(default));
    match u32::try_from(raw) {
        Ok(days) if (min..=max).contains(&days) => Ok(()),
        _ => Err(invalid(
            "scanner",
            key,
            &format!("{} must be between {} and {}", key, min, max),
        )),
    }
}

fn validate_data_source(config: &dyn ConfigPort) -> Result<(), ScannerError> {
    match config.get_string("data", "bars_dir") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(ScannerError::ConfigMissing {
            section: "data".to_string(),
            key: "bars_dir".to_string(),
        }),
    }
}

fn validate_scanner_settings(config: &dyn ConfigPort) -> Result<(), ScannerError> {
    require_days_in_range(config, "earnings_lookback_days", 2, 0, MAX_EARNINGS_LOOKBACK_DAYS)?;
    require_days_in_range(config, "history_days", 365, 1, MAX_HISTORY_DAYS)?;
    require_non_negative_int(config, "scanner", "min_history_bars")?;
    require_non_negative_int(config, "scanner", "request_delay_ms")?;
    Ok(())
}

fn validate_ep_thresholds(config: &dyn ConfigPort) -> Result<(), ScannerError> {
    require_positive(config, "episodic_pivot", "gap_threshold", 8.0)?;
    require_positive(config, "episodic_pivot", "volume_ratio_threshold", 2.0)?;
    Ok(())
}

fn validate_momentum_thresholds(config: &dyn ConfigPort) -> Result<(), ScannerError> {
    require_positive(config, "momentum", "adr_threshold", 4.0)
}

fn validate_swing_thresholds(config: &dyn ConfigPort) -> Result<(), ScannerError> {
    require_positive(config, "swing", "tightness_threshold", 15.0)?;

    let fraction = config.get_double("swing", "near_high_fraction", 0.75);
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(invalid(
            "swing",
            "near_high_fraction",
            "near_high_fraction must be in (0, 1]",
        ));
    }

    if config.get_int("swing", "tightness_window", 10) < 2 {
        return Err(invalid(
            "swing",
            "tightness_window",
            "tightness_window must be at least 2",
        ));
    }

    if let Some(raw) = config.get_string("swing", "high_fallback") {
        raw.parse::<HighFallback>()
            .map_err(|reason| invalid("swing", "high_fallback", &reason))?;
    }
    Ok(())
}

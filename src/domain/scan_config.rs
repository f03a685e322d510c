//! Scanner configuration: every classifier threshold plus scan pacing.
//!
//! Values are read from INI sections `[scanner]`, `[episodic_pivot]`,
//! `[momentum]` and `[swing]`, falling back to [`Default`] for missing keys.

use std::fmt;
use std::str::FromStr;

use crate::ports::config_port::ConfigPort;

/// Upper bound for `[scanner] history_days`, about ten years of calendar days.
pub const MAX_HISTORY_DAYS: u32 = 3650;
/// Upper bound for `[scanner] earnings_lookback_days`.
pub const MAX_EARNINGS_LOOKBACK_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpThresholds {
    /// Minimum open-vs-previous-close gap, in percent.
    pub gap_pct: f64,
    /// Minimum ratio of today's volume to the 20-day average.
    pub volume_ratio: f64,
    /// Whether a ratio computed without a usable volume average may qualify.
    pub allow_low_confidence: bool,
}

impl Default for EpThresholds {
    fn default() -> Self {
        Self {
            gap_pct: 8.0,
            volume_ratio: 2.0,
            allow_low_confidence: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumThresholds {
    /// ADR(20) must exceed this percentage.
    pub adr_pct: f64,
}

impl Default for MomentumThresholds {
    fn default() -> Self {
        Self { adr_pct: 4.0 }
    }
}

/// Reference high used by the swing proximity check when fewer than 252 bars
/// of history exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighFallback {
    /// Highest high in the available history.
    #[default]
    MaxAvailable,
    /// Proximity check fails.
    Fail,
}

impl fmt::Display for HighFallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighFallback::MaxAvailable => write!(f, "max_available"),
            HighFallback::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for HighFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "max_available" => Ok(HighFallback::MaxAvailable),
            "fail" => Ok(HighFallback::Fail),
            other => Err(format!(
                "unknown high_fallback '{}', expected max_available or fail",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingThresholds {
    /// Range of the tightness window must be below this percentage.
    pub tightness_pct: f64,
    /// Close must be at least this fraction of the 52-week high.
    pub near_high_fraction: f64,
    /// Bars in the tightness window; also the classifier's minimum history.
    pub tightness_window: usize,
    pub high_fallback: HighFallback,
}

impl Default for SwingThresholds {
    fn default() -> Self {
        Self {
            tightness_pct: 15.0,
            near_high_fraction: 0.75,
            tightness_window: 10,
            high_fallback: HighFallback::MaxAvailable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    pub earnings_lookback_days: u32,
    /// Calendar days of bar history requested per ticker.
    pub history_days: u32,
    /// Tickers with fewer kept bars are skipped.
    pub min_history_bars: usize,
    /// Pause between consecutive data fetches.
    pub request_delay_ms: u64,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            earnings_lookback_days: 2,
            history_days: 365,
            min_history_bars: 50,
            request_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScanConfig {
    pub ep: EpThresholds,
    pub momentum: MomentumThresholds,
    pub swing: SwingThresholds,
    pub settings: ScanSettings,
}

impl ScanConfig {
    /// Builds a config from INI values. Call `validate_scan_config` first;
    /// out-of-range integers here are clamped into range rather than rejected.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let d = ScanConfig::default();

        let high_fallback = config
            .get_string("swing", "high_fallback")
            .and_then(|s| s.parse().ok())
            .unwrap_or(d.swing.high_fallback);

        Self {
            ep: EpThresholds {
                gap_pct: config.get_double("episodic_pivot", "gap_threshold", d.ep.gap_pct),
                volume_ratio: config.get_double(
                    "episodic_pivot",
                    "volume_ratio_threshold",
                    d.ep.volume_ratio,
                ),
                allow_low_confidence: config.get_bool(
                    "episodic_pivot",
                    "allow_low_confidence",
                    d.ep.allow_low_confidence,
                ),
            },
            momentum: MomentumThresholds {
                adr_pct: config.get_double("momentum", "adr_threshold", d.momentum.adr_pct),
            },
            swing: SwingThresholds {
                tightness_pct: config.get_double(
                    "swing",
                    "tightness_threshold",
                    d.swing.tightness_pct,
                ),
                near_high_fraction: config.get_double(
                    "swing",
                    "near_high_fraction",
                    d.swing.near_high_fraction,
                ),
                tightness_window: to_usize(config.get_int(
                    "swing",
                    "tightness_window",
                    d.swing.tightness_window as i64,
                )),
                high_fallback,
            },
            settings: ScanSettings {
                earnings_lookback_days: clamp_days(
                    config.get_int(
                        "scanner",
                        "earnings_lookback_days",
                        i64::from(d.settings.earnings_lookback_days),
                    ),
                    MAX_EARNINGS_LOOKBACK_DAYS,
                ),
                history_days: clamp_days(
                    config.get_int("scanner", "history_days", i64::from(d.settings.history_days)),
                    MAX_HISTORY_DAYS,
                ),
                min_history_bars: to_usize(config.get_int(
                    "scanner",
                    "min_history_bars",
                    d.settings.min_history_bars as i64,
                )),
                request_delay_ms: u64::try_from(config.get_int(
                    "scanner",
                    "request_delay_ms",
                    d.settings.request_delay_ms as i64,
                ))
                .unwrap_or(0),
            },
        }
    }
}

fn clamp_days(value: i64, max: u32) -> u32 {
    u32::try_from(value.clamp(0, i64::from(max))).unwrap_or(max)
}

/// Negative values become zero.
fn to_usize(value: i64) -> usize {
    if value < 0 {
        0
    } else {
        usize::try_from(value).unwrap_or(usize::MAX)
    }
}

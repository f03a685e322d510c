//! Episodic Pivot: a large overnight gap on abnormally heavy volume.

use crate::domain::enrich::EnrichedSeries;
use crate::domain::scan_config::EpThresholds;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpSignal {
    pub is_ep: bool,
    /// (today's open - yesterday's close) / yesterday's close * 100
    pub gap_pct: f64,
    /// today's volume / 20-day average volume
    pub vol_ratio: f64,
    /// Set when the 20-day volume average was undefined or non-positive and a
    /// divisor of 1 was used instead; `vol_ratio` is then raw volume.
    pub low_confidence: bool,
}

impl EpSignal {
    /// Returned when fewer than two bars are available or the previous close
    /// is not positive.
    pub const NONE: EpSignal = EpSignal {
        is_ep: false,
        gap_pct: 0.0,
        vol_ratio: 0.0,
        low_confidence: false,
    };
}

pub fn classify_ep(series: &EnrichedSeries, thresholds: &EpThresholds) -> EpSignal {
    let (Some(today), Some(yesterday)) = (series.latest(), series.previous()) else {
        return EpSignal::NONE;
    };

    let prev_close = yesterday.close();
    if prev_close <= 0.0 {
        return EpSignal::NONE;
    }
    let gap_pct = (today.bar.open - prev_close) / prev_close * 100.0;

    let (vol_avg, low_confidence) = match today.vol_avg20 {
        Some(avg) if avg > 0.0 => (avg, false),
        _ => (1.0, true),
    };
    let vol_ratio = today.bar.volume as f64 / vol_avg;

    EpSignal {
        is_ep: gap_pct >= thresholds.gap_pct
            && vol_ratio >= thresholds.volume_ratio
            && (thresholds.allow_low_confidence || !low_confidence),
        gap_pct,
        vol_ratio,
        low_confidence,
    }
}

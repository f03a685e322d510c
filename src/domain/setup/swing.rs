//! Swing breakout: a tight consolidation in an established uptrend, near highs.
//!
//! All four conditions must hold on the latest bar:
//! 1. trend template `close > sma50 > sma200`
//! 2. `close >= reference_high * near_high_fraction`
//! 3. range of the last `tightness_window` bars below `tightness_pct`
//! 4. `close > ema20`

use crate::domain::enrich::{EnrichedBar, EnrichedSeries};
use crate::domain::scan_config::{HighFallback, SwingThresholds};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingSignal {
    pub is_swing: bool,
    /// (max high - min low) / min low * 100 over the tightness window
    pub range_pct: f64,
}

impl SwingSignal {
    /// Returned for a short history or a window without a positive low.
    pub const NONE: SwingSignal = SwingSignal {
        is_swing: false,
        range_pct: 0.0,
    };
}

pub fn classify_swing(series: &EnrichedSeries, thresholds: &SwingThresholds) -> SwingSignal {
    let window_len = thresholds.tightness_window.max(1);
    let (Some(window), Some(current)) = (series.trailing(window_len), series.latest()) else {
        return SwingSignal::NONE;
    };

    let Some(range_pct) = window_range_pct(window) else {
        return SwingSignal::NONE;
    };
    let close = current.close();

    let trend = matches!(
        (current.sma50, current.sma200),
        (Some(sma50), Some(sma200)) if close > sma50 && sma50 > sma200
    );

    let reference_high = match (current.high_52w, thresholds.high_fallback) {
        (Some(high), _) => Some(high),
        (None, HighFallback::MaxAvailable) => series.max_high(),
        (None, HighFallback::Fail) => None,
    };
    let near_high = reference_high.is_some_and(|high| close >= high * thresholds.near_high_fraction);

    let is_tight = range_pct < thresholds.tightness_pct;
    let holding_support = current.ema20.is_some_and(|ema20| close > ema20);

    SwingSignal {
        is_swing: trend && near_high && is_tight && holding_support,
        range_pct,
    }
}

fn window_range_pct(window: &[EnrichedBar]) -> Option<f64> {
    let max_high = window.iter().map(|b| b.bar.high).fold(f64::NEG_INFINITY, f64::max);
    let min_low = window.iter().map(|b| b.bar.low).fold(f64::INFINITY, f64::min);
    let range_pct = (max_high - min_low) / min_low * 100.0;
    (min_low > 0.0 && range_pct.is_finite()).then_some(range_pct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::OhlcvBar;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    struct Latest {
        close: f64,
        sma50: Option<f64>,
        sma200: Option<f64>,
        ema20: Option<f64>,
        high_52w: Option<f64>,
    }

    fn uptrend() -> Latest {
        Latest {
            close: 108.0,
            sma50: Some(100.0),
            sma200: Some(90.0),
            ema20: Some(105.0),
            high_52w: Some(120.0),
        }
    }

    fn series(count: usize, high: f64, low: f64, latest: Latest) -> EnrichedSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut bars: Vec<EnrichedBar> = (0..count)
            .map(|i| {
                EnrichedBar::bare(OhlcvBar {
                    date: start + Duration::days(i as i64),
                    open: low,
                    high,
                    low,
                    close: (high + low) / 2.0,
                    volume: 1000,
                })
            })
            .collect();
        if let Some(last) = bars.last_mut() {
            last.bar.close = latest.close;
            last.sma50 = latest.sma50;
            last.sma200 = latest.sma200;
            last.ema20 = latest.ema20;
            last.high_52w = latest.high_52w;
        }
        EnrichedSeries::from_bars("CRWD", bars)
    }

    #[test]
    fn nine_bars_is_insufficient() {
        let signal = classify_swing(&series(9, 110.0, 100.0, uptrend()), &SwingThresholds::default());
        assert_eq!(signal, SwingSignal::NONE);
    }

    #[test]
    fn tight_range_in_uptrend_is_swing() {
        let signal = classify_swing(&series(10, 110.0, 100.0, uptrend()), &SwingThresholds::default());
        assert_relative_eq!(signal.range_pct, 10.0, epsilon = 1e-9);
        assert!(signal.is_swing);
    }

    #[test]
    fn wide_range_is_not_tight() {
        let signal = classify_swing(&series(10, 120.0, 100.0, uptrend()), &SwingThresholds::default());
        assert_relative_eq!(signal.range_pct, 20.0, epsilon = 1e-9);
        assert!(!signal.is_swing);
    }

    #[test]
    fn tightness_uses_only_trailing_window() {
        let mut s = series(30, 110.0, 100.0, uptrend());
        // a wide bar well before the window
        let mut bars = s.bars().to_vec();
        bars[5].bar.high = 500.0;
        s = EnrichedSeries::from_bars("CRWD", bars);
        let signal = classify_swing(&s, &SwingThresholds::default());
        assert_relative_eq!(signal.range_pct, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn broken_trend_template_fails() {
        let inverted_averages = Latest {
            sma50: Some(85.0),
            sma200: Some(90.0),
            ..uptrend()
        };
        let signal = classify_swing(&series(10, 110.0, 100.0, inverted_averages), &SwingThresholds::default());
        assert!(!signal.is_swing);
        assert_relative_eq!(signal.range_pct, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn undefined_sma200_fails_trend() {
        let short_history = Latest {
            sma200: None,
            ..uptrend()
        };
        let signal = classify_swing(&series(10, 110.0, 100.0, short_history), &SwingThresholds::default());
        assert!(!signal.is_swing);
    }

    #[test]
    fn far_from_high_fails() {
        let far = Latest {
            high_52w: Some(200.0),
            ..uptrend()
        };
        let signal = classify_swing(&series(10, 110.0, 100.0, far), &SwingThresholds::default());
        assert!(!signal.is_swing);
    }

    #[test]
    fn losing_ema20_support_fails() {
        let below = Latest {
            ema20: Some(109.0),
            ..uptrend()
        };
        assert!(!classify_swing(&series(10, 110.0, 100.0, below), &SwingThresholds::default()).is_swing);

        let undefined = Latest {
            ema20: None,
            ..uptrend()
        };
        assert!(!classify_swing(&series(10, 110.0, 100.0, undefined), &SwingThresholds::default()).is_swing);
    }

    #[test]
    fn missing_52w_high_falls_back_to_max_available() {
        let no_high = Latest {
            high_52w: None,
            ..uptrend()
        };
        // max high 110, 108 >= 82.5
        let signal = classify_swing(&series(10, 110.0, 100.0, no_high), &SwingThresholds::default());
        assert!(signal.is_swing);
    }

    #[test]
    fn max_available_fallback_sees_older_highs() {
        let no_high = Latest {
            high_52w: None,
            ..uptrend()
        };
        let s = series(30, 110.0, 100.0, no_high);
        let mut bars = s.bars().to_vec();
        bars[0].bar.high = 200.0;
        let s = EnrichedSeries::from_bars("CRWD", bars);
        // 108 < 200 * 0.75
        assert!(!classify_swing(&s, &SwingThresholds::default()).is_swing);
    }

    #[test]
    fn fail_fallback_rejects_missing_52w_high() {
        let no_high = Latest {
            high_52w: None,
            ..uptrend()
        };
        let thresholds = SwingThresholds {
            high_fallback: HighFallback::Fail,
            ..SwingThresholds::default()
        };
        assert!(!classify_swing(&series(10, 110.0, 100.0, no_high), &thresholds).is_swing);
    }

    #[test]
    fn custom_window_and_threshold() {
        let thresholds = SwingThresholds {
            tightness_pct: 25.0,
            tightness_window: 5,
            ..SwingThresholds::default()
        };
        let signal = classify_swing(&series(5, 120.0, 100.0, uptrend()), &thresholds);
        assert!(signal.is_swing);
        assert_relative_eq!(signal.range_pct, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_low_in_window_is_not_swing() {
        let s = series(10, 110.0, 100.0, uptrend());
        let mut bars = s.bars().to_vec();
        bars[4].bar.low = 0.0;
        let s = EnrichedSeries::from_bars("CRWD", bars);

        let signal = classify_swing(&s, &SwingThresholds::default());

        assert_eq!(s.flagged().len(), 1);
        assert_eq!(signal, SwingSignal::NONE);
        assert!(signal.range_pct.is_finite());
    }

    #[test]
    fn range_requires_positive_low() {
        let s = series(3, 110.0, 100.0, uptrend());
        let mut window = s.bars().to_vec();
        assert_relative_eq!(window_range_pct(&window).unwrap(), 10.0, epsilon = 1e-9);
        window[1].bar.low = 0.0;
        assert_eq!(window_range_pct(&window), None);
    }

    #[test]
    fn empty_series_returns_default() {
        let empty = EnrichedSeries::from_bars("CRWD", vec![]);
        assert_eq!(classify_swing(&empty, &SwingThresholds::default()), SwingSignal::NONE);
    }
}

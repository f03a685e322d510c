//! Indicator engine: raw bars in, enriched bars out.
//!
//! Every derived field is a trailing window ending at its own bar and stays
//! `None` until the window is full. Bars with bad data are skipped and
//! recorded in [`EnrichedSeries::flagged`]; windows count kept bars only.

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::indicator::IndicatorType;
use crate::domain::indicator::ema::calculate_ema;
use crate::domain::indicator::rolling::{rolling_max, rolling_mean, rolling_min};
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::ohlcv::{BarIssue, OhlcvBar};
use crate::domain::series::{Series, latest_minus, trailing_window};

pub const EMA_FAST: IndicatorType = IndicatorType::Ema(10);
pub const EMA_SLOW: IndicatorType = IndicatorType::Ema(20);
pub const SMA_MID: IndicatorType = IndicatorType::Sma(50);
pub const SMA_LONG: IndicatorType = IndicatorType::Sma(200);
pub const ADR: IndicatorType = IndicatorType::Adr(20);
pub const VOLUME_AVG: IndicatorType = IndicatorType::VolumeAvg(20);
pub const HIGH_52W: IndicatorType = IndicatorType::RollingHigh(252);
pub const LOW_52W: IndicatorType = IndicatorType::RollingLow(252);

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedBar {
    pub bar: OhlcvBar,
    pub ema10: Option<f64>,
    pub ema20: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub daily_range_pct: Option<f64>,
    pub adr20: Option<f64>,
    pub vol_avg20: Option<f64>,
    pub high_52w: Option<f64>,
    pub low_52w: Option<f64>,
}

impl EnrichedBar {
    /// A bar with every derived field undefined.
    pub fn bare(bar: OhlcvBar) -> Self {
        Self {
            daily_range_pct: bar.daily_range_pct(),
            bar,
            ema10: None,
            ema20: None,
            sma50: None,
            sma200: None,
            adr20: None,
            vol_avg20: None,
            high_52w: None,
            low_52w: None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.bar.date
    }

    pub fn close(&self) -> f64 {
        self.bar.close
    }

    /// Derived fields paired with their indicator labels.
    pub fn indicators(&self) -> [(IndicatorType, Option<f64>); 8] {
        [
            (EMA_FAST, self.ema10),
            (EMA_SLOW, self.ema20),
            (SMA_MID, self.sma50),
            (SMA_LONG, self.sma200),
            (ADR, self.adr20),
            (VOLUME_AVG, self.vol_avg20),
            (HIGH_52W, self.high_52w),
            (LOW_52W, self.low_52w),
        ]
    }
}

/// A bar excluded from enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedBar {
    pub date: NaiveDate,
    pub issue: BarIssue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedSeries {
    ticker: String,
    bars: Vec<EnrichedBar>,
    flagged: Vec<FlaggedBar>,
}

impl EnrichedSeries {
    /// Wraps already-enriched bars, oldest first. Bars with bad data are
    /// dropped and flagged, as in [`enrich`].
    pub fn from_bars(ticker: impl Into<String>, bars: Vec<EnrichedBar>) -> Self {
        let ticker = ticker.into();
        let (bars, flagged) = screen(&ticker, bars, |b| &b.bar);
        Self {
            ticker,
            bars,
            flagged,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[EnrichedBar] {
        &self.bars
    }

    pub fn flagged(&self) -> &[FlaggedBar] {
        &self.flagged
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest(&self) -> Option<&EnrichedBar> {
        self.bars.last()
    }

    pub fn previous(&self) -> Option<&EnrichedBar> {
        latest_minus(&self.bars, 1)
    }

    pub fn trailing(&self, n: usize) -> Option<&[EnrichedBar]> {
        trailing_window(&self.bars, n)
    }

    /// Highest high across every kept bar.
    pub fn max_high(&self) -> Option<f64> {
        self.bars.iter().map(|b| b.bar.high).reduce(f64::max)
    }
}

/// Splits bars into those with clean data and flags for the rest.
fn screen<T>(
    ticker: &str,
    items: impl IntoIterator<Item = T>,
    bar_of: impl Fn(&T) -> &OhlcvBar,
) -> (Vec<T>, Vec<FlaggedBar>) {
    let mut kept = Vec::new();
    let mut flagged = Vec::new();

    for item in items {
        let bar = bar_of(&item);
        match bar.issue() {
            Some(issue) => {
                warn!(ticker = %ticker, date = %bar.date, %issue, "skipping bar");
                flagged.push(FlaggedBar {
                    date: bar.date,
                    issue,
                });
            }
            None => kept.push(item),
        }
    }
    (kept, flagged)
}

pub fn enrich(series: &Series) -> EnrichedSeries {
    let (kept, flagged) = screen(series.ticker(), series.bars().iter().cloned(), |b| b);

    let closes: Vec<f64> = kept.iter().map(|b| b.close).collect();
    let ranges: Vec<Option<f64>> = kept.iter().map(OhlcvBar::daily_range_pct).collect();
    let volumes: Vec<Option<f64>> = kept.iter().map(|b| Some(b.volume as f64)).collect();
    let highs: Vec<Option<f64>> = kept.iter().map(|b| Some(b.high)).collect();
    let lows: Vec<Option<f64>> = kept.iter().map(|b| Some(b.low)).collect();

    let ema10 = calculate_ema(&closes, EMA_FAST.warmup());
    let ema20 = calculate_ema(&closes, EMA_SLOW.warmup());
    let sma50 = calculate_sma(&closes, SMA_MID.warmup());
    let sma200 = calculate_sma(&closes, SMA_LONG.warmup());
    let adr20 = rolling_mean(&ranges, ADR.warmup());
    let vol_avg20 = rolling_mean(&volumes, VOLUME_AVG.warmup());
    let high_52w = rolling_max(&highs, HIGH_52W.warmup());
    let low_52w = rolling_min(&lows, LOW_52W.warmup());

    let bars = kept
        .into_iter()
        .enumerate()
        .map(|(i, bar)| EnrichedBar {
            daily_range_pct: ranges[i],
            bar,
            ema10: ema10[i],
            ema20: ema20[i],
            sma50: sma50[i],
            sma200: sma200[i],
            adr20: adr20[i],
            vol_avg20: vol_avg20[i],
            high_52w: high_52w[i],
            low_52w: low_52w[i],
        })
        .collect();

    EnrichedSeries {
        ticker: series.ticker().to_string(),
        bars,
        flagged,
    }
}

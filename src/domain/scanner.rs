//! Per-ticker scan pipeline: fetch → series → enrich → classify → aggregate.
//!
//! One ticker failing never aborts the batch; it is recorded as skipped.

use std::thread;
use std::time::Duration as StdDuration;

use chrono::{Duration, NaiveDate};
use tracing::{debug, info, warn};

use crate::domain::enrich::{EnrichedSeries, enrich};
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::report::{EpHit, MomentumHit, ScanReport, SkipReason, SkippedTicker, SwingHit};
use crate::domain::scan_config::ScanConfig;
use crate::domain::series::Series;
use crate::domain::setup::{SetupSignals, classify_all};
use crate::ports::data_port::DataPort;

#[derive(Debug, Clone)]
pub struct TickerScan {
    pub series: EnrichedSeries,
    pub signals: SetupSignals,
}

#[derive(Debug, Clone)]
pub enum TickerOutcome {
    Scanned(TickerScan),
    Skipped(SkippedTicker),
}

pub struct Scanner<'a> {
    data_port: &'a dyn DataPort,
    config: &'a ScanConfig,
}

impl<'a> Scanner<'a> {
    pub fn new(data_port: &'a dyn DataPort, config: &'a ScanConfig) -> Self {
        Self { data_port, config }
    }

    /// First date of the history window ending at `as_of`, never earlier
    /// than the first representable date.
    pub fn history_start(&self, as_of: NaiveDate) -> NaiveDate {
        as_of
            .checked_sub_signed(Duration::days(i64::from(self.config.settings.history_days)))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn scan_ticker(&self, ticker: &str, as_of: NaiveDate) -> TickerOutcome {
        let skipped = |reason: SkipReason| {
            TickerOutcome::Skipped(SkippedTicker {
                ticker: ticker.to_string(),
                reason,
            })
        };

        let bars = match self
            .data_port
            .fetch_daily_bars(ticker, self.history_start(as_of), as_of)
        {
            Ok(bars) => bars,
            Err(e) => {
                return skipped(SkipReason::FetchFailed {
                    reason: e.to_string(),
                });
            }
        };

        match self.analyze(ticker, bars) {
            Ok(scan) => TickerOutcome::Scanned(scan),
            Err(reason) => skipped(reason),
        }
    }

    /// Classifies already-fetched bars.
    pub fn analyze(&self, ticker: &str, bars: Vec<OhlcvBar>) -> Result<TickerScan, SkipReason> {
        if bars.is_empty() {
            return Err(SkipReason::NoData);
        }

        let series = Series::new(ticker, bars).map_err(|e| SkipReason::InvalidSeries {
            reason: e.to_string(),
        })?;
        let enriched = enrich(&series);

        let minimum = self.config.settings.min_history_bars;
        if enriched.len() < minimum {
            return Err(SkipReason::InsufficientBars {
                bars: enriched.len(),
                minimum,
            });
        }

        let signals = classify_all(&enriched, self.config);
        debug!(
            ticker,
            gap_pct = signals.ep.gap_pct,
            vol_ratio = signals.ep.vol_ratio,
            adr20 = signals.momentum.adr20,
            range_pct = signals.swing.range_pct,
            "classified"
        );

        Ok(TickerScan {
            series: enriched,
            signals,
        })
    }

    pub fn scan(&self, tickers: &[String], as_of: NaiveDate) -> ScanReport {
        let mut report = ScanReport::new(as_of);
        let delay = StdDuration::from_millis(self.config.settings.request_delay_ms);

        for (i, ticker) in tickers.iter().enumerate() {
            if i > 0 && !delay.is_zero() {
                thread::sleep(delay);
            }
            info!(ticker = %ticker, index = i + 1, total = tickers.len(), "analyzing");
            record(&mut report, self.scan_ticker(ticker, as_of));
        }

        info!(
            scanned = report.tickers_scanned,
            skipped = report.skipped.len(),
            ep = report.ep.len(),
            momentum = report.momentum.len(),
            swing = report.swing.len(),
            "scan complete"
        );
        report
    }
}

fn record(report: &mut ScanReport, outcome: TickerOutcome) {
    let scan = match outcome {
        TickerOutcome::Scanned(scan) => scan,
        TickerOutcome::Skipped(skipped) => {
            warn!(ticker = %skipped.ticker, reason = %skipped.reason, "skipping ticker");
            report.skipped.push(skipped);
            return;
        }
    };

    report.tickers_scanned += 1;
    let ticker = scan.series.ticker().to_string();
    let close = scan.series.latest().map(|b| b.close()).unwrap_or_default();
    let SetupSignals { ep, momentum, swing } = scan.signals;

    if ep.is_ep {
        report.ep.push(EpHit {
            ticker: ticker.clone(),
            gap_pct: ep.gap_pct,
            vol_ratio: ep.vol_ratio,
            close,
            low_confidence: ep.low_confidence,
        });
    }
    if momentum.is_momentum {
        report.momentum.push(MomentumHit {
            ticker: ticker.clone(),
            adr20: momentum.adr20,
            close,
        });
    }
    if swing.is_swing {
        report.swing.push(SwingHit {
            ticker,
            range_pct: swing.range_pct,
            close,
        });
    }
}

//! Momentum ("surfing") setup: high ADR with price stacked above its averages.

use crate::domain::enrich::{EnrichedBar, EnrichedSeries};
use crate::domain::scan_config::MomentumThresholds;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumSignal {
    pub is_momentum: bool,
    pub adr20: f64,
    pub close: f64,
}

pub fn classify_momentum(series: &EnrichedSeries, thresholds: &MomentumThresholds) -> MomentumSignal {
    match series.latest() {
        Some(latest) => evaluate(latest, thresholds),
        None => MomentumSignal {
            is_momentum: false,
            adr20: 0.0,
            close: 0.0,
        },
    }
}

fn evaluate(bar: &EnrichedBar, thresholds: &MomentumThresholds) -> MomentumSignal {
    // Undefined ADR/EMAs read as 0, which fails each of their comparisons.
    let adr20 = bar.adr20.unwrap_or(0.0);
    let ema10 = bar.ema10.unwrap_or(0.0);
    let ema20 = bar.ema20.unwrap_or(0.0);
    let close = bar.close();

    let high_adr = adr20 > thresholds.adr_pct;
    let trend_alignment = close > ema10 && ema10 > ema20;
    // A missing average compares false, as NaN would; 0 would always pass.
    let above_sma50 = bar.sma50.is_some_and(|sma50| close > sma50);

    MomentumSignal {
        is_momentum: high_adr && trend_alignment && above_sma50,
        adr20,
        close,
    }
}

//! Setup classifiers.
//!
//! Each classifier is a pure function of an [`EnrichedSeries`] and its
//! thresholds. None of them fail: undersized series yield a defined
//! "no setup" result.

pub mod episodic_pivot;
pub mod momentum;
pub mod swing;

use crate::domain::enrich::EnrichedSeries;
use crate::domain::scan_config::ScanConfig;

pub use episodic_pivot::{EpSignal, classify_ep};
pub use momentum::{MomentumSignal, classify_momentum};
pub use swing::{SwingSignal, classify_swing};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetupSignals {
    pub ep: EpSignal,
    pub momentum: MomentumSignal,
    pub swing: SwingSignal,
}

/// Runs all three classifiers independently.
pub fn classify_all(series: &EnrichedSeries, config: &ScanConfig) -> SetupSignals {
    SetupSignals {
        ep: classify_ep(series, &config.ep),
        momentum: classify_momentum(series, &config.momentum),
        swing: classify_swing(series, &config.swing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_yields_all_defaults() {
        let signals = classify_all(&EnrichedSeries::from_bars("X", vec![]), &ScanConfig::default());
        assert_eq!(signals.ep, EpSignal::NONE);
        assert!(!signals.momentum.is_momentum);
        assert_eq!(signals.swing, SwingSignal::NONE);
    }
}

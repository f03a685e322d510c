//! Simple Moving Average indicator.
//!
//! SMA(n)[i] = sum(V[i-n+1..=i]) / n. Warmup: first (n-1) values are undefined.

pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    let warmup = period - 1;
    (0..values.len())
        .map(|i| {
            if i < warmup {
                return None;
            }
            let window = &values[i + 1 - period..=i];
            Some(window.iter().sum::<f64>() / period as f64)
        })
        .collect()
}

//! Trailing-window aggregates: mean, max and min.
//!
//! A window that contains an undefined input yields an undefined output, so a
//! missing observation never turns into a zero.

fn rolling<F>(values: &[Option<f64>], period: usize, reduce: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    if period == 0 {
        return vec![None; values.len()];
    }

    let mut buf: Vec<f64> = Vec::with_capacity(period);
    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            buf.clear();
            for v in &values[i + 1 - period..=i] {
                buf.push((*v)?);
            }
            Some(reduce(&buf))
        })
        .collect()
}

pub fn rolling_mean(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling(values, period, |w| w.iter().sum::<f64>() / w.len() as f64)
}

pub fn rolling_max(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling(values, period, |w| w.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

pub fn rolling_min(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling(values, period, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

// File: crates/chart-data/src/smooth.rs
// Summary: Trailing simple moving average and running totals over ordered sequences.

/// Trailing simple moving average.
///
/// Output has the input's length. Index `i < window - 1` is `None`; later
/// indices hold the mean of `values[i + 1 - window..=i]`, summed then divided
/// per window so results do not drift with sequence length.
pub fn moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let sum: f64 = values[i + 1 - window..=i].iter().sum();
            Some(sum / window as f64)
        })
        .collect()
}

/// Same as [`moving_average`] over a sequence with gaps: any window that
/// touches a missing value is itself missing.
pub fn moving_average_sparse(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let sum: Option<f64> = values[i + 1 - window..=i].iter().copied().sum();
            sum.map(|s| s / window as f64)
        })
        .collect()
}

/// Running total; missing entries contribute zero.
pub fn cumulative_sum(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0f64, |acc, v| {
            *acc += v.unwrap_or(0.0);
            Some(*acc)
        })
        .collect()
}

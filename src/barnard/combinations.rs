use statrs::function::gamma::ln_gamma;

/// Log binomial coefficients `ln C(n, k)` for `k = 0..=n`.
///
/// Computed through `ln_gamma` so large trial counts never overflow. The two
/// factorial terms are added before being subtracted from `ln n!`, which makes
/// the sequence exactly symmetric: `value[k] == value[n - k]`.
pub fn log_combinations(n: usize) -> Vec<f64> {
    let ln_factorials: Vec<f64> = (0..=n).map(|k| ln_gamma(k as f64 + 1.0)).collect();
    let ln_n_factorial = ln_factorials[n];
    (0..=n)
        .map(|k| ln_n_factorial - (ln_factorials[k] + ln_factorials[n - k]))
        .collect()
}

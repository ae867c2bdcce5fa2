use crate::errors::HypotestError;

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    items.join(", ")
}

// Validation
pub fn validate_min_usize_parameter(value: usize, min: usize, parameter: &str) -> Result<(), HypotestError> {
    if value < min {
        Err(HypotestError::InvalidParameter(
            parameter.to_string(),
            format!("an integer greater than or equal to {}", min),
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Evenly spaced values over `[start, stop]`, both endpoints included.
///
/// Values are computed as `start + i * step` and the last one is set to `stop`
/// exactly, so the bracket endpoints never drift.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut values: Vec<f64> = (0..num).map(|i| i as f64 * step + start).collect();
            values[num - 1] = stop;
            values
        }
    }
}

/// Index of the first largest value. Values are compared with a strict `>`,
/// so on ties the earliest index wins.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Percentiles of a sample, interpolating linearly between order statistics.
///
/// * `v` - Values to find percentiles for, in any order.
/// * `percentiles` - Percentiles to look for in the data, from 0 to 1.
pub fn percentiles(v: &[f64], percentiles: &[f64]) -> Vec<f64> {
    if v.is_empty() {
        return vec![f64::NAN; percentiles.len()];
    }
    let mut sorted = v.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));
    let last = sorted.len() - 1;
    percentiles
        .iter()
        .map(|q| {
            let position = q * last as f64;
            let lower = (position.floor() as usize).min(last);
            let upper = (lower + 1).min(last);
            let fraction = position - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
        })
        .collect()
}

/// Distance between the 75th and the 25th percentile.
pub fn interquartile_range(v: &[f64]) -> f64 {
    let p = percentiles(v, &[0.25, 0.75]);
    p[1] - p[0]
}

pub fn validate_finite_values(values: &[f64], parameter: &str) -> Result<(), HypotestError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(v) => Err(HypotestError::InvalidParameter(
            parameter.to_string(),
            "finite values only".to_string(),
            v.to_string(),
        )),
        None => Ok(()),
    }
}

pub fn validate_positive_values(values: &[f64], parameter: &str) -> Result<(), HypotestError> {
    match values.iter().find(|v| !(**v > 0.0)) {
        Some(v) => Err(HypotestError::InvalidParameter(
            parameter.to_string(),
            "positive values only".to_string(),
            v.to_string(),
        )),
        None => Ok(()),
    }
}

//! Epps-Singleton
//!
//! Two-sample test comparing the empirical characteristic functions of both samples at a
//! few points. Unlike the Kolmogorov-Smirnov test it does not assume continuous
//! distributions, so it also applies to discrete data.
use crate::constants::{EPPS_SINGLETON_MIN_SAMPLE, EPPS_SINGLETON_SMALL_SAMPLE, PINV_RELATIVE_TOLERANCE};
use crate::errors::HypotestError;
use crate::utils::{interquartile_range, validate_finite_values, validate_positive_values};
use faer::Mat;
use log::warn;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Points where the characteristic functions are evaluated, before scaling.
pub const DEFAULT_T: [f64; 2] = [0.4, 0.8];

/// Outcome of the Epps-Singleton test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EppsSingletonResult {
    pub statistic: f64,
    pub pvalue: f64,
    /// Rank of the estimated covariance matrix, used as the chi-squared degrees of freedom.
    pub degrees_of_freedom: usize,
}

/// Test whether `x` and `y` come from the same distribution.
///
/// * `x` - First sample, at least five finite values.
/// * `y` - Second sample, at least five finite values.
/// * `t` - Positive points where the characteristic functions are compared. They are divided
///   by half the interquartile range of the pooled sample, see [`DEFAULT_T`].
///
/// The statistic follows a chi-squared distribution under the null, with as many degrees of
/// freedom as the rank of the covariance estimate. When both samples have fewer than 25
/// values a small-sample correction is applied to the statistic.
pub fn epps_singleton_2samp(x: &[f64], y: &[f64], t: &[f64]) -> Result<EppsSingletonResult, HypotestError> {
    if x.len() < EPPS_SINGLETON_MIN_SAMPLE || y.len() < EPPS_SINGLETON_MIN_SAMPLE {
        return Err(HypotestError::InsufficientData(format!(
            "x and y need at least {} observations each, found {} and {}.",
            EPPS_SINGLETON_MIN_SAMPLE,
            x.len(),
            y.len()
        )));
    }
    validate_finite_values(x, "x")?;
    validate_finite_values(y, "y")?;
    if t.is_empty() {
        return Err(HypotestError::InvalidParameter(
            "t".to_string(),
            "at least one point".to_string(),
            "none".to_string(),
        ));
    }
    validate_positive_values(t, "t")?;

    let pooled: Vec<f64> = x.iter().chain(y).copied().collect();
    let sigma = interquartile_range(&pooled) / 2.0;
    if sigma == 0.0 {
        return Err(HypotestError::InsufficientData(
            "the pooled sample has a zero interquartile range.".to_string(),
        ));
    }
    let ts: Vec<f64> = t.iter().map(|ti| ti / sigma).collect();

    let (nx, ny) = (x.len() as f64, y.len() as f64);
    let n = nx + ny;
    let (mean_x, cov_x) = characteristic_moments(x, &ts);
    let (mean_y, cov_y) = characteristic_moments(y, &ts);
    let m = 2 * ts.len();
    let est = Mat::from_fn(m, m, |i, j| n / nx * cov_x[(i, j)] + n / ny * cov_y[(i, j)]);
    let (pinv, rank) = pseudo_inverse(&est)?;
    if rank == 0 {
        return Err(HypotestError::InsufficientData(
            "the characteristic functions of both samples have no variance.".to_string(),
        ));
    }
    if rank < m {
        warn!(
            "Estimated covariance matrix has rank {} out of {}, the test may be unreliable for these samples.",
            rank, m
        );
    }

    let diff: Vec<f64> = mean_x.iter().zip(&mean_y).map(|(a, b)| a - b).collect();
    let mut statistic = 0.0;
    for i in 0..m {
        for j in 0..m {
            statistic += diff[i] * pinv[(i, j)] * diff[j];
        }
    }
    statistic *= n;
    if x.len().max(y.len()) < EPPS_SINGLETON_SMALL_SAMPLE {
        statistic /= 1.0 + n.powf(-0.45) + 10.1 * (nx.powf(-1.7) + ny.powf(-1.7));
    }

    let chi2 = ChiSquared::new(rank as f64).map_err(|e| {
        HypotestError::InvalidParameter("degrees_of_freedom".to_string(), "a positive value".to_string(), e.to_string())
    })?;
    Ok(EppsSingletonResult {
        statistic,
        pvalue: chi2.sf(statistic),
        degrees_of_freedom: rank,
    })
}

/// Mean and biased covariance of `(cos(t v), sin(t v))` over the sample.
fn characteristic_moments(v: &[f64], ts: &[f64]) -> (Vec<f64>, Mat<f64>) {
    let k = ts.len();
    let g = Mat::from_fn(v.len(), 2 * k, |i, j| {
        if j < k {
            (ts[j] * v[i]).cos()
        } else {
            (ts[j - k] * v[i]).sin()
        }
    });
    let n = v.len() as f64;
    let mean: Vec<f64> = (0..2 * k).map(|j| (0..v.len()).map(|i| g[(i, j)]).sum::<f64>() / n).collect();
    let cov = Mat::from_fn(2 * k, 2 * k, |a, b| {
        (0..v.len())
            .map(|i| (g[(i, a)] - mean[a]) * (g[(i, b)] - mean[b]))
            .sum::<f64>()
            / n
    });
    (mean, cov)
}

/// Moore-Penrose pseudo-inverse and numerical rank, from the singular value decomposition.
///
/// Singular values at or below `1e-15` times the largest one are treated as zero.
fn pseudo_inverse(a: &Mat<f64>) -> Result<(Mat<f64>, usize), HypotestError> {
    let svd = a.svd().map_err(|e| HypotestError::Decomposition(format!("{:?}", e)))?;
    let u = svd.U();
    let v = svd.V();
    let s = svd.S().column_vector();
    let s_max = (0..s.nrows()).map(|k| s[k]).fold(0.0, f64::max);
    let cutoff = PINV_RELATIVE_TOLERANCE * s_max;
    let kept: Vec<usize> = (0..s.nrows()).filter(|&k| s[k] > cutoff).collect();
    let pinv = Mat::from_fn(a.ncols(), a.nrows(), |i, j| {
        kept.iter().map(|&k| v[(i, k)] * u[(j, k)] / s[k]).sum::<f64>()
    });
    Ok((pinv, kept.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spread_samples() -> (Vec<f64>, Vec<f64>) {
        let x = (0..30).map(|i| (i as f64 * 0.37) % 5.0).collect();
        let y = (0..40).map(|i| (i as f64 * 0.53) % 7.0 - 1.0).collect();
        (x, y)
    }

    #[test]
    fn test_small_samples() {
        let x = [-0.35, 2.55, 1.73, 0.73, 0.35, 2.69, 0.46, -0.94, -0.37, 12.07];
        let y = [-1.15, -0.15, 2.48, 3.25, 3.71, 4.29, 5.00, 7.74, 8.38, 8.60];
        let res = epps_singleton_2samp(&x, &y, &DEFAULT_T).unwrap();
        assert_relative_eq!(res.statistic, 15.163072195549567, max_relative = 1e-9);
        assert_relative_eq!(res.pvalue, 0.004374674473820917, max_relative = 1e-8);
        assert_eq!(res.degrees_of_freedom, 4);
    }

    #[test]
    fn test_discrete_samples() {
        let x = [0., 1., 2., 2., 2., 2., 3., 3., 3., 3., 4., 5., 5., 5., 5., 6., 10., 10., 10., 10.];
        let y = [10., 4., 0., 5., 10., 10., 0., 5., 6., 7., 10., 3., 1., 7., 0., 8., 1., 5., 8., 10.];
        let res = epps_singleton_2samp(&x, &y, &DEFAULT_T).unwrap();
        assert_relative_eq!(res.statistic, 8.899301606650187, max_relative = 1e-9);
        assert_relative_eq!(res.pvalue, 0.06366634006492415, max_relative = 1e-8);
    }

    #[test]
    fn test_no_small_sample_correction() {
        let (x, y) = spread_samples();
        let res = epps_singleton_2samp(&x, &y, &DEFAULT_T).unwrap();
        assert_relative_eq!(res.statistic, 10.902844560835732, max_relative = 1e-9);
        assert_relative_eq!(res.pvalue, 0.027677882087866097, max_relative = 1e-8);

        let res = epps_singleton_2samp(&x, &y, &[0.5]).unwrap();
        assert_relative_eq!(res.statistic, 6.7894769997080155, max_relative = 1e-9);
        assert_relative_eq!(res.pvalue, 0.03354932617885184, max_relative = 1e-8);
        assert_eq!(res.degrees_of_freedom, 2);
    }

    #[test]
    fn test_identical_samples() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let res = epps_singleton_2samp(&x, &x, &DEFAULT_T).unwrap();
        assert_eq!(res.statistic, 0.0);
        assert_eq!(res.pvalue, 1.0);
    }

    #[test]
    fn test_repeated_point_lowers_rank() {
        let x = [-0.35, 2.55, 1.73, 0.73, 0.35, 2.69, 0.46, -0.94, -0.37, 12.07];
        let y = [-1.15, -0.15, 2.48, 3.25, 3.71, 4.29, 5.00, 7.74, 8.38, 8.60];
        let res = epps_singleton_2samp(&x, &y, &[0.4, 0.8, 0.4]).unwrap();
        assert_eq!(res.degrees_of_freedom, 4);
        assert_relative_eq!(res.statistic, 15.163072195549567, max_relative = 1e-7);
    }

    #[test]
    fn test_pseudo_inverse() {
        let a = Mat::from_fn(2, 2, |i, j| [[4.0, 2.0], [2.0, 3.0]][i][j]);
        let (pinv, rank) = pseudo_inverse(&a).unwrap();
        assert_eq!(rank, 2);
        // inverse of [[4, 2], [2, 3]] is [[3, -2], [-2, 4]] / 8
        assert_relative_eq!(pinv[(0, 0)], 0.375, max_relative = 1e-12);
        assert_relative_eq!(pinv[(0, 1)], -0.25, max_relative = 1e-12);
        assert_relative_eq!(pinv[(1, 1)], 0.5, max_relative = 1e-12);

        let singular = Mat::from_fn(2, 2, |_, _| 1.0);
        let (pinv, rank) = pseudo_inverse(&singular).unwrap();
        assert_eq!(rank, 1);
        assert_relative_eq!(pinv[(0, 1)], 0.25, max_relative = 1e-12);
    }

    #[test]
    fn test_invalid_input() {
        let five = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(matches!(
            epps_singleton_2samp(&five[..4], &five, &DEFAULT_T),
            Err(HypotestError::InsufficientData(_))
        ));
        let mut with_nan = five;
        with_nan[2] = f64::NAN;
        assert!(matches!(
            epps_singleton_2samp(&five, &with_nan, &DEFAULT_T),
            Err(HypotestError::InvalidParameter(name, _, _)) if name == "y"
        ));
        assert!(matches!(
            epps_singleton_2samp(&five, &five, &[0.4, -0.8]),
            Err(HypotestError::InvalidParameter(name, _, _)) if name == "t"
        ));
        assert!(matches!(
            epps_singleton_2samp(&five, &five, &[]),
            Err(HypotestError::InvalidParameter(name, _, _)) if name == "t"
        ));
    }

    #[test]
    fn test_zero_interquartile_range() {
        let ones = [1.0; 6];
        assert!(matches!(
            epps_singleton_2samp(&ones, &ones[..5], &DEFAULT_T),
            Err(HypotestError::InsufficientData(_))
        ));
    }
}

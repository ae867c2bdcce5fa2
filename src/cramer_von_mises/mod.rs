//! Cramér-von Mises
//!
//! One-sample goodness of fit test of a sample against a fully specified continuous
//! distribution, given by its CDF.
pub mod distribution;

pub use distribution::{cdf_cvm, cdf_cvm_inf};

use crate::errors::HypotestError;
use crate::utils::validate_finite_values;
use serde::{Deserialize, Serialize};

/// Outcome of the Cramér-von Mises test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CramerVonMisesResult {
    pub statistic: f64,
    /// Upper tail probability of the statistic under the null, never negative.
    pub pvalue: f64,
}

/// Test the null hypothesis that `rvs` is drawn from the distribution with CDF `cdf`.
///
/// * `rvs` - Sample, at least two finite values in any order.
/// * `cdf` - CDF of the hypothesized distribution. Its parameters must not be estimated from
///   `rvs`, otherwise the p-value is too large.
///
/// ```rust,ignore
/// use statrs::distribution::{ContinuousCDF, Normal};
///
/// let normal = Normal::new(0.0, 1.0)?;
/// let res = cramervonmises(&[-1.7, 2.0, 0.0, 1.3, 4.0, 0.1, 0.6], |x| normal.cdf(x))?;
/// ```
pub fn cramervonmises<F>(rvs: &[f64], cdf: F) -> Result<CramerVonMisesResult, HypotestError>
where
    F: Fn(f64) -> f64,
{
    if rvs.len() < 2 {
        return Err(HypotestError::InsufficientData(format!(
            "the sample must contain at least two observations, found {}.",
            rvs.len()
        )));
    }
    validate_finite_values(rvs, "rvs")?;
    let mut sorted = rvs.to_vec();
    sorted.sort_unstable_by(|a, b| a.total_cmp(b));

    let n = sorted.len() as f64;
    let mut statistic = 1.0 / (12.0 * n);
    for (i, x) in sorted.iter().enumerate() {
        let f = cdf(*x);
        if !(0.0..=1.0).contains(&f) {
            return Err(HypotestError::InvalidParameter(
                "cdf".to_string(),
                "values between 0 and 1".to_string(),
                f.to_string(),
            ));
        }
        let u = (2.0 * i as f64 + 1.0) / (2.0 * n);
        statistic += (u - f).powi(2);
    }

    let pvalue = (1.0 - cdf_cvm(statistic, Some(sorted.len()))).max(0.0);
    Ok(CramerVonMisesResult { statistic, pvalue })
}

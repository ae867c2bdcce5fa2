use crate::association::{two_sided_normal_pvalue, validate_table, ConcordanceSums};
use crate::data::ContingencyTable;
use crate::errors::HypotestError;
use serde::{Deserialize, Serialize};

/// Outcome of Kendall's tau-b.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KendallTauResult {
    pub statistic: f64,
    /// Two-sided p-value of the null hypothesis `tau = 0`.
    pub pvalue: f64,
}

/// Kendall's tau-b of a contingency table, with ties in both variables
/// accounted for.
///
/// Its null standard error shares the variance term of Somers' D, so both tests
/// give the same p-value on a given table. A single row or column gives `NaN`.
pub fn kendall_tau_b(table: &ContingencyTable) -> Result<KendallTauResult, HypotestError> {
    validate_table(table)?;
    let (rows, cols) = table.shape();
    if rows == 1 || cols == 1 {
        return Ok(KendallTauResult {
            statistic: f64::NAN,
            pvalue: f64::NAN,
        });
    }

    let sums = ConcordanceSums::new(table);
    let n2 = sums.total * sums.total;
    let denominator = (n2 - sums.row_sum_squares) * (n2 - sums.col_sum_squares);
    let tau = (sums.concordant - sums.discordant) / denominator.sqrt();
    let s02_tau_b = 4.0 * sums.null_variance_term() / denominator;
    if s02_tau_b == 0.0 {
        return Ok(KendallTauResult {
            statistic: tau,
            pvalue: 0.0,
        });
    }
    let z = tau / s02_tau_b.sqrt();
    Ok(KendallTauResult {
        statistic: tau,
        pvalue: two_sided_normal_pvalue(z),
    })
}

use crate::association::{two_sided_normal_pvalue, validate_table, ConcordanceSums};
use crate::data::ContingencyTable;
use crate::errors::HypotestError;
use serde::{Deserialize, Serialize};

/// Outcome of Somers' D.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SomersDResult {
    /// Somers' D(Y|X), with the row variable X independent.
    pub statistic: f64,
    /// Two-sided p-value of the null hypothesis `D = 0`.
    pub pvalue: f64,
    /// The table the statistic was computed from.
    pub table: ContingencyTable,
}

/// Somers' D, an asymmetric measure of ordinal association.
///
/// The row variable is treated as independent and the column variable as
/// dependent; transpose the table for D(X|Y). The p-value comes from the
/// asymptotic normal distribution of `P - Q` under `D = 0`. A table with a
/// single row or column has no ordering to measure, and gives `NaN` for both
/// values.
///
/// * `table` - Contingency table with at least two non-zero cells.
pub fn somers_d(table: &ContingencyTable) -> Result<SomersDResult, HypotestError> {
    validate_table(table)?;
    let (statistic, pvalue) = somers_d_statistic(table);
    Ok(SomersDResult {
        statistic,
        pvalue,
        table: table.clone(),
    })
}

fn somers_d_statistic(table: &ContingencyTable) -> (f64, f64) {
    let (rows, cols) = table.shape();
    if rows <= 1 || cols <= 1 {
        return (f64::NAN, f64::NAN);
    }
    let sums = ConcordanceSums::new(table);
    let diff = sums.concordant - sums.discordant;
    let d = diff / (sums.total * sums.total - sums.row_sum_squares);
    let s = sums.null_variance_term();
    if s == 0.0 {
        return (d, 0.0);
    }
    let z = diff / (4.0 * s).sqrt();
    (d, two_sided_normal_pvalue(z))
}

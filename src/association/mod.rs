//! Association
//!
//! Ordinal association measures computed from an r x c contingency table whose
//! rows and columns are both ordered categories. Both measures compare the
//! concordant and discordant pairs of observations and share their asymptotic
//! standard error under the null hypothesis of no association.
pub mod kendall;
pub mod somers;

pub use kendall::{kendall_tau_b, KendallTauResult};
pub use somers::{somers_d, SomersDResult};

use crate::data::ContingencyTable;
use crate::errors::HypotestError;
use statrs::distribution::{ContinuousCDF, Normal};

/// Pair counts of a table.
///
/// For cell `(i, j)`, `A_ij` is the count of cells strictly above-left plus
/// strictly below-right, and `D_ij` strictly below-left plus strictly
/// above-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcordanceSums {
    /// Total count `N`.
    pub total: f64,
    /// `P = sum a_ij A_ij`, twice the number of concordant pairs.
    pub concordant: f64,
    /// `Q = sum a_ij D_ij`, twice the number of discordant pairs.
    pub discordant: f64,
    /// `sum a_ij (A_ij - D_ij)^2`.
    pub squared_difference: f64,
    /// `sum r_i^2` over row totals.
    pub row_sum_squares: f64,
    /// `sum c_j^2` over column totals.
    pub col_sum_squares: f64,
}

impl ConcordanceSums {
    /// Accumulate the sums with two-dimensional prefix sums, in `O(r c)`.
    pub fn new(table: &ContingencyTable) -> Self {
        let (rows, cols) = table.shape();
        // cum[i][j]: sum of the cells in rows < i and columns < j.
        let mut cum = vec![vec![0_i128; cols + 1]; rows + 1];
        for i in 0..rows {
            for j in 0..cols {
                cum[i + 1][j + 1] = table.get(i, j) as i128 + cum[i][j + 1] + cum[i + 1][j] - cum[i][j];
            }
        }
        let total = cum[rows][cols];

        let mut concordant = 0_i128;
        let mut discordant = 0_i128;
        let mut squared_difference = 0_i128;
        for i in 0..rows {
            for j in 0..cols {
                let a = table.get(i, j) as i128;
                if a == 0 {
                    continue;
                }
                let upper_left = cum[i][j];
                let lower_right = total - cum[i + 1][cols] - cum[rows][j + 1] + cum[i + 1][j + 1];
                let lower_left = cum[rows][j] - cum[i + 1][j];
                let upper_right = cum[i][cols] - cum[i][j + 1];
                let a_ij = upper_left + lower_right;
                let d_ij = lower_left + upper_right;
                concordant += a * a_ij;
                discordant += a * d_ij;
                squared_difference += a * (a_ij - d_ij) * (a_ij - d_ij);
            }
        }

        let row_sum_squares: u128 = table.row_sums().iter().map(|r| (*r as u128) * (*r as u128)).sum();
        let col_sum_squares: u128 = table.col_sums().iter().map(|c| (*c as u128) * (*c as u128)).sum();

        ConcordanceSums {
            total: total as f64,
            concordant: concordant as f64,
            discordant: discordant as f64,
            squared_difference: squared_difference as f64,
            row_sum_squares: row_sum_squares as f64,
            col_sum_squares: col_sum_squares as f64,
        }
    }

    /// `S = sum a_ij (A_ij - D_ij)^2 - (P - Q)^2 / N`, the variance term shared by
    /// the asymptotic standard errors of both measures.
    pub fn null_variance_term(&self) -> f64 {
        let diff = self.concordant - self.discordant;
        self.squared_difference - diff * diff / self.total
    }
}

/// Tables must have at least two non-zero cells to carry any ordering.
fn validate_table(table: &ContingencyTable) -> Result<(), HypotestError> {
    if table.n_nonzero() < 2 {
        return Err(HypotestError::InsufficientData(
            "At least two elements of the contingency table must be nonzero.".to_string(),
        ));
    }
    Ok(())
}

/// Two-sided p-value of a standard normal statistic.
fn two_sided_normal_pvalue(z: f64) -> f64 {
    match Normal::new(0.0, 1.0) {
        Ok(normal) => 2.0 * normal.sf(z.abs()),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Direct block sums, for comparison with the prefix-sum version.
    fn naive_sums(rows: &[Vec<i64>]) -> (i64, i64, i64) {
        let m = rows.len();
        let n = rows[0].len();
        let block = |r0: usize, r1: usize, c0: usize, c1: usize| -> i64 {
            let mut s = 0;
            for row in rows.iter().take(r1).skip(r0) {
                for v in row.iter().take(c1).skip(c0) {
                    s += v;
                }
            }
            s
        };
        let (mut p, mut q, mut s) = (0, 0, 0);
        for i in 0..m {
            for j in 0..n {
                let a = block(0, i, 0, j) + block(i + 1, m, j + 1, n);
                let d = block(i + 1, m, 0, j) + block(0, i, j + 1, n);
                p += rows[i][j] * a;
                q += rows[i][j] * d;
                s += rows[i][j] * (a - d) * (a - d);
            }
        }
        (p, q, s)
    }

    #[test]
    fn test_prefix_sums_match_block_sums() {
        let rows = vec![vec![27, 25, 14, 7, 0], vec![7, 14, 18, 35, 12], vec![1, 3, 2, 7, 17]];
        let sums = ConcordanceSums::new(&ContingencyTable::new(&rows).unwrap());
        let (p, q, s) = naive_sums(&rows);
        assert_eq!(sums.concordant, p as f64);
        assert_eq!(sums.discordant, q as f64);
        assert_eq!(sums.squared_difference, s as f64);
        assert_eq!(sums.total, 189.0);
        assert_eq!(sums.row_sum_squares, (73.0 * 73.0 + 86.0 * 86.0 + 30.0 * 30.0));
    }

    #[test]
    fn test_2x2_pairs() {
        // P = 2ad, Q = 2bc
        let sums = ConcordanceSums::new(&ContingencyTable::from_2x2([[10, 5], [10, 20]]).unwrap());
        assert_eq!(sums.concordant, 400.0);
        assert_eq!(sums.discordant, 100.0);
    }

    #[test]
    fn test_validate_table() {
        assert!(validate_table(&ContingencyTable::from_2x2([[0, 0], [0, 5]]).unwrap()).is_err());
        assert!(validate_table(&ContingencyTable::from_2x2([[1, 0], [0, 5]]).unwrap()).is_ok());
    }

    #[test]
    fn test_two_sided_normal_pvalue() {
        assert!((two_sided_normal_pvalue(0.0) - 1.0).abs() < 1e-15);
        assert!((two_sided_normal_pvalue(-1.959963984540054) - 0.05).abs() < 1e-9);
    }
}

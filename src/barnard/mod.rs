//! Barnard's exact test
//!
//! Unconditional exact test of a 2x2 contingency table. Column totals are held
//! fixed, every table reachable under them is ranked by its Wald statistic, and
//! the probability of the tables at least as extreme as the observed one is
//! maximised over the nuisance success probability shared by both columns.
//!
//! ```rust,ignore
//! use hypotests::prelude::*;
//!
//! let table = ContingencyTable::from_2x2([[7, 12], [8, 3]])?;
//! let res = barnard_exact(&table, Alternative::Less, true, 3)?;
//! assert!((res.pvalue - 0.034).abs() < 1e-3);
//! ```

// public modules
pub mod combinations;
pub mod config;
pub mod nuisance;
pub mod rejection;
pub mod sample_space;
pub mod wald;

// private modules
mod setters;

use crate::alternative::Alternative;
use crate::data::ContingencyTable;
use crate::errors::HypotestError;
use crate::utils::validate_min_usize_parameter;
use config::BarnardConfig;
use log::{debug, info, warn};
use nuisance::{NuisanceMaximizer, NuisanceMaximum};
use rejection::RejectionMask;
use sample_space::SampleSpace;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use wald::StatisticField;

/// Outcome of Barnard's exact test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarnardExactResult {
    /// Wald statistic of the observed table, `NaN` when a column sums to zero.
    pub statistic: f64,
    /// Probability, maximised over the nuisance parameter, of a table at least as
    /// extreme as the observed one.
    pub pvalue: f64,
}

impl BarnardExactResult {
    fn degenerate() -> Self {
        BarnardExactResult {
            statistic: f64::NAN,
            pvalue: 1.0,
        }
    }
}

/// Barnard's exact test object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BarnardExact {
    pub cfg: BarnardConfig,
}

impl BarnardExact {
    /// Barnard's exact test object
    ///
    /// * `alternative` - The alternative hypothesis: two-sided, less or greater.
    /// * `pooled` - Whether the Wald statistic uses the pooled variance.
    /// * `n_iter` - Number of rounds of the nuisance grid search, at least 1.
    pub fn new(alternative: Alternative, pooled: bool, n_iter: usize) -> Result<Self, HypotestError> {
        let test = BarnardExact {
            cfg: BarnardConfig {
                alternative,
                pooled,
                n_iter,
                ..Default::default()
            },
        };
        test.validate_parameters()?;
        Ok(test)
    }

    /// Build the test from a configuration.
    pub fn from_config(cfg: BarnardConfig) -> Result<Self, HypotestError> {
        let test = BarnardExact { cfg };
        test.validate_parameters()?;
        Ok(test)
    }

    pub fn validate_parameters(&self) -> Result<(), HypotestError> {
        validate_min_usize_parameter(self.cfg.n_iter, 1, "n_iter")?;
        validate_min_usize_parameter(self.cfg.n_nuisance, 2, "n_nuisance")?;
        if let Some(num_threads) = self.cfg.num_threads {
            validate_min_usize_parameter(num_threads, 1, "num_threads")?;
        }
        Ok(())
    }

    /// Run the test on a 2x2 table `[[a, b], [c, d]]`.
    ///
    /// The columns are the two groups compared: `a` of `a + c` trials succeed in
    /// the first, `b` of `b + d` in the second.
    pub fn test(&self, table: &ContingencyTable) -> Result<BarnardExactResult, HypotestError> {
        self.validate_parameters()?;
        if table.shape() != (2, 2) {
            let (rows, cols) = table.shape();
            return Err(HypotestError::InvalidShape(
                "(2, 2)".to_string(),
                format!("({}, {})", rows, cols),
            ));
        }

        let start = Instant::now();
        let col_sums = table.col_sums();
        if col_sums.contains(&0) {
            warn!("A column of the table sums to zero, the statistic is undefined and the p-value is 1.");
            return Ok(BarnardExactResult::degenerate());
        }

        let space = SampleSpace::new(col_sums[0] as usize, col_sums[1] as usize);
        let field = StatisticField::new(&space, self.cfg.pooled);
        let statistic = field.get(table.get(0, 0) as usize, table.get(0, 1) as usize);
        let mask = RejectionMask::new(&field, statistic, self.cfg.alternative);
        debug!(
            "Sample space of {} tables, {} in the rejection region.",
            space.n_points(),
            mask.count()
        );
        let maximum = self.maximize(&space, &mask)?;

        if self.cfg.verbose {
            info!(
                "Barnard exact test ({}, pooled: {}) finished in {} seconds: statistic {}, p-value {}, nuisance {}.",
                self.cfg.alternative,
                self.cfg.pooled,
                start.elapsed().as_secs_f32(),
                statistic,
                maximum.pvalue,
                maximum.nuisance,
            );
        }

        Ok(BarnardExactResult {
            statistic,
            pvalue: maximum.pvalue,
        })
    }

    fn maximize(&self, space: &SampleSpace, mask: &RejectionMask) -> Result<NuisanceMaximum, HypotestError> {
        let maximizer = NuisanceMaximizer::new(space, mask, self.cfg.n_nuisance, self.cfg.parallel);
        match self.cfg.num_threads {
            Some(num_threads) if self.cfg.parallel => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| HypotestError::ThreadPool(e.to_string()))?;
                pool.install(|| maximizer.maximize(self.cfg.n_iter))
            }
            _ => maximizer.maximize(self.cfg.n_iter),
        }
    }
}

/// Perform Barnard's exact test on a 2x2 contingency table.
///
/// * `table` - A 2x2 table of non-negative counts.
/// * `alternative` - The alternative hypothesis.
/// * `pooled` - Whether the Wald statistic uses the pooled variance.
/// * `n_iter` - Number of rounds of the nuisance grid search, at least 1.
pub fn barnard_exact(
    table: &ContingencyTable,
    alternative: Alternative,
    pooled: bool,
    n_iter: usize,
) -> Result<BarnardExactResult, HypotestError> {
    BarnardExact::new(alternative, pooled, n_iter)?.test(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table(rows: [[i64; 2]; 2]) -> ContingencyTable {
        ContingencyTable::from_2x2(rows).unwrap()
    }

    #[test]
    fn test_vaccine_example() {
        let res = barnard_exact(&table([[7, 12], [8, 3]]), Alternative::Less, true, 3).unwrap();
        assert_relative_eq!(res.statistic, -1.894338076060206, max_relative = 1e-9);
        assert_relative_eq!(res.pvalue, 0.03407671636536434, max_relative = 1e-8);
    }

    #[test]
    fn test_default_is_two_sided_pooled() {
        let res = BarnardExact::default().test(&table([[43, 40], [10, 39]])).unwrap();
        assert_relative_eq!(res.statistic, 3.555406779643, max_relative = 1e-9);
        assert_relative_eq!(res.pvalue, 0.000362832367, max_relative = 1e-6);
    }

    #[test]
    fn test_unpooled() {
        let res = BarnardExact::default()
            .set_pooled(false)
            .test(&table([[2, 7], [8, 2]]))
            .unwrap();
        assert_relative_eq!(res.statistic, -3.0793739040424684, max_relative = 1e-9);
        assert_relative_eq!(res.pvalue, 0.020172119140594687, max_relative = 1e-6);
    }

    #[test]
    fn test_degenerate_column() {
        for alternative in [Alternative::TwoSided, Alternative::Less, Alternative::Greater] {
            for pooled in [true, false] {
                let res = barnard_exact(&table([[0, 1], [0, 2]]), alternative, pooled, 3).unwrap();
                assert!(res.statistic.is_nan());
                assert_eq!(res.pvalue, 1.0);
                let res = barnard_exact(&table([[4, 0], [5, 0]]), alternative, pooled, 3).unwrap();
                assert!(res.statistic.is_nan());
                assert_eq!(res.pvalue, 1.0);
            }
        }
    }

    #[test]
    fn test_invalid_n_iter() {
        let err = barnard_exact(&table([[7, 12], [8, 3]]), Alternative::Less, true, 0).unwrap_err();
        assert!(matches!(err, HypotestError::InvalidParameter(ref name, _, _) if name == "n_iter"));
        let err = BarnardExact::default().set_n_iter(0).test(&table([[7, 12], [8, 3]])).unwrap_err();
        assert!(matches!(err, HypotestError::InvalidParameter(_, _, _)));
    }

    #[test]
    fn test_invalid_grid_and_threads() {
        let t = table([[7, 12], [8, 3]]);
        assert!(BarnardExact::default().set_n_nuisance(1).test(&t).is_err());
        assert!(BarnardExact::default().set_num_threads(Some(0)).test(&t).is_err());
    }

    #[test]
    fn test_rejects_other_shapes() {
        let t =
            ContingencyTable::new(&[vec![27, 25, 14, 7, 0], vec![7, 14, 18, 35, 12], vec![1, 3, 2, 7, 17]]).unwrap();
        assert_eq!(
            BarnardExact::default().test(&t),
            Err(HypotestError::InvalidShape("(2, 2)".to_string(), "(3, 5)".to_string()))
        );
        let t = ContingencyTable::new(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        assert!(matches!(
            BarnardExact::default().test(&t),
            Err(HypotestError::InvalidShape(_, _))
        ));
    }

    #[test]
    fn test_dedicated_thread_pool() {
        let t = table([[7, 12], [8, 3]]);
        let pooled = BarnardExact::default()
            .set_alternative(Alternative::Less)
            .set_num_threads(Some(2))
            .test(&t)
            .unwrap();
        let serial = BarnardExact::default()
            .set_alternative(Alternative::Less)
            .set_parallel(false)
            .test(&t)
            .unwrap();
        assert_eq!(pooled, serial);
    }

    #[test]
    fn test_from_config() {
        let cfg = BarnardConfig {
            alternative: Alternative::Greater,
            verbose: true,
            ..Default::default()
        };
        let res = BarnardExact::from_config(cfg).unwrap().test(&table([[5, 1], [10, 10]])).unwrap();
        assert_relative_eq!(res.pvalue, 0.09704052073559588, max_relative = 1e-6);
        assert!(BarnardExact::from_config(BarnardConfig {
            n_iter: 0,
            ..Default::default()
        })
        .is_err());
    }
}

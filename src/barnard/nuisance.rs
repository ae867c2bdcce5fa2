//! Nuisance parameter maximisation
//!
//! Under the null hypothesis both columns share one unknown success probability
//! `pi`. The p-value of the test is the largest probability the rejection region
//! can receive over `pi` in `[0, 1]`. The search evaluates an evenly spaced grid
//! of candidates, keeps the neighbours of the best candidate as the next
//! bracket, and repeats for a fixed number of rounds.
use crate::barnard::rejection::RejectionMask;
use crate::barnard::sample_space::SampleSpace;
use crate::constants::PVALUE_OVERSHOOT_TOLERANCE;
use crate::data::Grid;
use crate::errors::HypotestError;
use crate::utils::{argmax, linspace, validate_min_usize_parameter};
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Interval of `pi` values believed to contain the maximiser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NuisanceBracket {
    pub inf_bound: f64,
    pub sup_bound: f64,
}

impl Default for NuisanceBracket {
    fn default() -> Self {
        NuisanceBracket {
            inf_bound: 0.0,
            sup_bound: 1.0,
        }
    }
}

impl NuisanceBracket {
    /// `n_candidates` evenly spaced values over the bracket, endpoints included.
    pub fn candidates(&self, n_candidates: usize) -> Vec<f64> {
        linspace(self.inf_bound, self.sup_bound, n_candidates)
    }

    /// The bracket spanned by the neighbours of `candidates[best]`. At either end
    /// of the grid the current bound is kept.
    pub fn narrow(&self, candidates: &[f64], best: usize) -> Self {
        let inf_bound = if best > 0 { candidates[best - 1] } else { candidates[0] };
        let sup_bound = if best + 1 < candidates.len() {
            candidates[best + 1]
        } else {
            candidates[candidates.len() - 1]
        };
        NuisanceBracket { inf_bound, sup_bound }
    }
}

/// Joint probability of every sample space point for a set of candidate `pi`.
///
/// Rows are the points of the sample space, in flat order; each column is the
/// distribution of two independent binomials `B(c1, pi)` and `B(c2, pi)` for one
/// candidate. The field only lives for one round of the search.
#[derive(Debug, Clone)]
pub struct ProbabilityField {
    field: Grid<f64>,
}

impl ProbabilityField {
    /// Compute `exp(ln C(c1, x1) + ln C(c2, x2) + s ln(pi) + (n - s) ln(1 - pi))`
    /// for every point and candidate, with `s = x1 + x2`.
    ///
    /// * `log_comb` - Joint log binomial coefficient of every point.
    /// * `successes` - `x1 + x2` of every point.
    /// * `n_trials` - `c1 + c2`.
    /// * `candidates` - Values of `pi`, one per column.
    /// * `parallel` - Whether to fill the columns in parallel.
    pub fn new(log_comb: &[f64], successes: &[usize], n_trials: usize, candidates: &[f64], parallel: bool) -> Self {
        let n_points = log_comb.len();
        let mut field = Grid::new(vec![0.0; n_points * candidates.len()], n_points, candidates.len());
        let fill = |(col, &pi): (&mut [f64], &f64)| fill_column(col, log_comb, successes, n_trials, pi);
        if parallel {
            field.par_cols_mut().zip(candidates.par_iter()).for_each(fill);
        } else {
            field.cols_iter_mut().zip(candidates.iter()).for_each(fill);
        }
        ProbabilityField { field }
    }

    /// Total mass of the column of candidate `j`.
    pub fn column_mass(&self, j: usize) -> f64 {
        self.field.get_col(j).iter().sum()
    }

    /// Divide every column by its own total mass, so that each candidate's
    /// distribution sums to one. This removes the drift accumulated through the
    /// log/exp round trip before any mass is read off the field.
    pub fn normalize(&mut self, parallel: bool) {
        let scale = |col: &mut [f64]| {
            let total: f64 = col.iter().sum();
            col.iter_mut().for_each(|v| *v /= total);
        };
        if parallel {
            self.field.par_cols_mut().for_each(scale);
        } else {
            self.field.cols_iter_mut().for_each(scale);
        }
    }

    /// Mass each candidate puts on the rejection region.
    pub fn rejection_probabilities(&self, mask: &RejectionMask, parallel: bool) -> Vec<f64> {
        let region = mask.as_slice();
        let masked_sum = |col: &[f64]| -> f64 {
            col.iter()
                .zip(region.iter())
                .filter(|(_, m)| **m)
                .map(|(v, _)| *v)
                .sum()
        };
        if parallel {
            self.field.par_cols().map(masked_sum).collect()
        } else {
            self.field.cols_iter().map(masked_sum).collect()
        }
    }
}

fn fill_column(col: &mut [f64], log_comb: &[f64], successes: &[usize], n_trials: usize, pi: f64) {
    let log_pi = pi.ln();
    let log_1_minus_pi = (1.0 - pi).ln();
    for ((v, &l), &s) in col.iter_mut().zip(log_comb.iter()).zip(successes.iter()) {
        // 0 * ln(0) is taken as 0 at the all-failure and all-success points.
        let power_pi = if s == 0 { 0.0 } else { s as f64 * log_pi };
        let power_1_minus_pi = if s == n_trials {
            0.0
        } else {
            (n_trials - s) as f64 * log_1_minus_pi
        };
        *v = (l + power_pi + power_1_minus_pi).exp();
    }
}

/// Outcome of one round of the grid search.
#[derive(Debug, Clone)]
pub struct SearchRound {
    pub candidates: Vec<f64>,
    pub pvalues: Vec<f64>,
    pub best: usize,
}

impl SearchRound {
    pub fn best_nuisance(&self) -> f64 {
        self.candidates[self.best]
    }

    pub fn best_pvalue(&self) -> f64 {
        self.pvalues[self.best]
    }
}

/// Result of the nuisance maximisation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NuisanceMaximum {
    /// Largest rejection probability found, at most 1.
    pub pvalue: f64,
    /// Candidate `pi` where it was reached.
    pub nuisance: f64,
    /// Bracket left after the last round.
    pub bracket: NuisanceBracket,
}

/// Grid search of the `pi` maximising the probability of a rejection region.
pub struct NuisanceMaximizer<'a> {
    mask: &'a RejectionMask,
    log_comb: Vec<f64>,
    successes: Vec<usize>,
    n_trials: usize,
    n_nuisance: usize,
    parallel: bool,
}

impl<'a> NuisanceMaximizer<'a> {
    /// * `space` - Sample space of the test.
    /// * `mask` - Rejection region over that space.
    /// * `n_nuisance` - Number of candidates evaluated per round.
    /// * `parallel` - Whether to evaluate candidates in parallel.
    pub fn new(space: &SampleSpace, mask: &'a RejectionMask, n_nuisance: usize, parallel: bool) -> Self {
        NuisanceMaximizer {
            mask,
            log_comb: space.log_combinations(),
            successes: space.successes(),
            n_trials: space.n_trials(),
            n_nuisance,
            parallel,
        }
    }

    /// Normalised probability field for the given candidates.
    pub fn probability_field(&self, candidates: &[f64]) -> ProbabilityField {
        let mut field = ProbabilityField::new(
            &self.log_comb,
            &self.successes,
            self.n_trials,
            candidates,
            self.parallel,
        );
        field.normalize(self.parallel);
        field
    }

    /// Evaluate every candidate of `bracket` and pick the best one.
    pub fn search_round(&self, bracket: &NuisanceBracket) -> SearchRound {
        let candidates = bracket.candidates(self.n_nuisance);
        let pvalues = self
            .probability_field(&candidates)
            .rejection_probabilities(self.mask, self.parallel);
        let best = argmax(&pvalues);
        SearchRound {
            candidates,
            pvalues,
            best,
        }
    }

    /// Run `n_iter` rounds, starting from `[0, 1]`, and return the best p-value of
    /// the last round, clamped to 1. At least one round is required.
    pub fn maximize(&self, n_iter: usize) -> Result<NuisanceMaximum, HypotestError> {
        validate_min_usize_parameter(n_iter, 1, "n_iter")?;
        let mut bracket = NuisanceBracket::default();
        let mut round = self.search_round(&bracket);
        for i in 0..n_iter {
            if i > 0 {
                round = self.search_round(&bracket);
            }
            bracket = bracket.narrow(&round.candidates, round.best);
            debug!(
                "round {}, best pi: {}, best p-value: {}, bracket: [{}, {}]",
                i,
                round.best_nuisance(),
                round.best_pvalue(),
                bracket.inf_bound,
                bracket.sup_bound,
            );
        }

        let pvalue = round.best_pvalue();
        if pvalue > 1.0 + PVALUE_OVERSHOOT_TOLERANCE {
            warn!("Rejection probability {} exceeds 1 beyond round-off, clamping.", pvalue);
        }
        Ok(NuisanceMaximum {
            pvalue: pvalue.min(1.0),
            nuisance: round.best_nuisance(),
            bracket,
        })
    }
}

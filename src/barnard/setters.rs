use crate::alternative::Alternative;
use crate::barnard::BarnardExact;

impl BarnardExact {
    // Set methods for paramters

    /// Set the alternative hypothesis of the test.
    /// * `alternative` - Which outcomes count as more extreme than the observed table.
    pub fn set_alternative(mut self, alternative: Alternative) -> Self {
        self.cfg.alternative = alternative;
        self
    }

    /// Set whether the Wald statistic uses the pooled variance.
    /// * `pooled` - `true` assumes both columns share one proportion, `false` estimates
    ///   the variance of each column separately.
    pub fn set_pooled(mut self, pooled: bool) -> Self {
        self.cfg.pooled = pooled;
        self
    }

    /// Set the number of rounds of the nuisance grid search.
    /// * `n_iter` - Number of rounds. Three rounds are enough in most cases; past
    ///   about six the p-value no longer changes.
    pub fn set_n_iter(mut self, n_iter: usize) -> Self {
        self.cfg.n_iter = n_iter;
        self
    }

    /// Set the number of candidate nuisance values evaluated per round.
    /// * `n_nuisance` - Grid size, at least 2.
    pub fn set_n_nuisance(mut self, n_nuisance: usize) -> Self {
        self.cfg.n_nuisance = n_nuisance;
        self
    }

    /// Set the number of threads on the test.
    /// * `num_threads` - Set the number of threads used to evaluate candidates.
    pub fn set_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.cfg.num_threads = num_threads;
        self
    }

    /// Set whether candidates are evaluated in parallel.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.cfg.parallel = parallel;
        self
    }

    /// Set verbosity of the test.
    pub fn set_verbose(mut self, verbose: bool) -> Self {
        self.cfg.verbose = verbose;
        self
    }
}

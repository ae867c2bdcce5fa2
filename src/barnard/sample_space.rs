use crate::barnard::combinations::log_combinations;

/// Every table reachable with the observed column totals held fixed.
///
/// A point `(x1, x2)` counts the successes in column 1 and column 2, with
/// `0 <= x1 <= total_col_1` and `0 <= x2 <= total_col_2`. Points are laid out
/// the same way as a column-major grid with `x1` indexing rows, so the flat index
/// of `(x1, x2)` is `x1 + x2 * (total_col_1 + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSpace {
    pub total_col_1: usize,
    pub total_col_2: usize,
}

impl SampleSpace {
    pub fn new(total_col_1: usize, total_col_2: usize) -> Self {
        SampleSpace {
            total_col_1,
            total_col_2,
        }
    }

    /// Total number of trials, `c1 + c2`.
    pub fn n_trials(&self) -> usize {
        self.total_col_1 + self.total_col_2
    }

    /// Number of points, `(c1 + 1) * (c2 + 1)`.
    pub fn n_points(&self) -> usize {
        (self.total_col_1 + 1) * (self.total_col_2 + 1)
    }

    pub fn index(&self, x1: usize, x2: usize) -> usize {
        x1 + x2 * (self.total_col_1 + 1)
    }

    /// Total successes `x1 + x2` of every point, in flat order.
    pub fn successes(&self) -> Vec<usize> {
        let mut successes = vec![0; self.n_points()];
        for x2 in 0..=self.total_col_2 {
            for x1 in 0..=self.total_col_1 {
                successes[self.index(x1, x2)] = x1 + x2;
            }
        }
        successes
    }

    /// `ln C(c1, x1) + ln C(c2, x2)` for every point, in flat order.
    pub fn log_combinations(&self) -> Vec<f64> {
        let x1_log_comb = log_combinations(self.total_col_1);
        let x2_log_comb = log_combinations(self.total_col_2);
        let mut log_comb = vec![0.0; self.n_points()];
        for (x2, l2) in x2_log_comb.iter().enumerate() {
            for (x1, l1) in x1_log_comb.iter().enumerate() {
                log_comb[self.index(x1, x2)] = l1 + l2;
            }
        }
        log_comb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let space = SampleSpace::new(2, 3);
        assert_eq!(space.n_points(), 12);
        assert_eq!(space.n_trials(), 5);
        assert_eq!(space.index(0, 0), 0);
        assert_eq!(space.index(2, 0), 2);
        assert_eq!(space.index(0, 1), 3);
        assert_eq!(space.index(2, 3), 11);

        let successes = space.successes();
        assert_eq!(successes.len(), 12);
        assert_eq!(successes[space.index(1, 2)], 3);
        assert_eq!(successes[space.index(2, 3)], 5);
    }

    #[test]
    fn test_joint_log_combinations() {
        let space = SampleSpace::new(2, 3);
        let log_comb = space.log_combinations();
        assert_eq!(log_comb.len(), space.n_points());
        // C(2, 1) * C(3, 2) = 6
        assert!((log_comb[space.index(1, 2)].exp() - 6.0).abs() < 1e-10);
        // Sum over the space of C(2, x1) C(3, x2) is 2^5.
        let total: f64 = log_comb.iter().map(|l| l.exp()).sum();
        assert!((total - 32.0).abs() < 1e-9);
    }
}

use crate::barnard::sample_space::SampleSpace;
use crate::data::Grid;

/// Wald statistic of every point of a sample space.
///
/// Rows are indexed by `x1`, columns by `x2`. With `p1 = x1 / c1` and
/// `p2 = x2 / c2` the statistic is `(p1 - p2) / sqrt(variance)`, where the
/// variance is either pooled, `p (1 - p) (1 / c1 + 1 / c2)` with
/// `p = (x1 + x2) / (c1 + c2)`, or unpooled,
/// `p1 (1 - p1) / c1 + p2 (1 - p2) / c2`.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticField {
    field: Grid<f64>,
}

impl StatisticField {
    pub fn new(space: &SampleSpace, pooled: bool) -> Self {
        let c1 = space.total_col_1 as f64;
        let c2 = space.total_col_2 as f64;
        let field = Grid::from_fn(space.total_col_1 + 1, space.total_col_2 + 1, |x1, x2| {
            wald_statistic(x1, x2, c1, c2, pooled)
        });
        StatisticField { field }
    }

    /// Statistic of the point `(x1, x2)`.
    pub fn get(&self, x1: usize, x2: usize) -> f64 {
        *self.field.get(x1, x2)
    }

    /// Statistics of all points, in the flat order of the sample space.
    pub fn values(&self) -> &[f64] {
        self.field.as_slice()
    }

    pub fn grid(&self) -> &Grid<f64> {
        &self.field
    }
}

/// Wald statistic of one point.
///
/// Equal proportions give exactly `0`, whatever the variance, so the `0 / 0`
/// corners of the space never yield `NaN`. A zero variance with different
/// proportions gives a signed infinity.
pub fn wald_statistic(x1: usize, x2: usize, c1: f64, c2: f64, pooled: bool) -> f64 {
    let p1 = x1 as f64 / c1;
    let p2 = x2 as f64 / c2;
    if p1 == p2 {
        return 0.0;
    }
    let variance = if pooled {
        let p = (x1 + x2) as f64 / (c1 + c2);
        p * (1.0 - p) * (1.0 / c1 + 1.0 / c2)
    } else {
        p1 * (1.0 - p1) / c1 + p2 * (1.0 - p2) / c2
    };
    (p1 - p2) / variance.max(0.0).sqrt()
}

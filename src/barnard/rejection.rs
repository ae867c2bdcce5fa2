use crate::alternative::Alternative;
use crate::barnard::wald::StatisticField;
use crate::data::Grid;

/// Points of the sample space at least as extreme as the observed table.
///
/// Built once per test from the statistic field; it does not depend on the
/// nuisance parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectionMask {
    mask: Grid<bool>,
}

impl RejectionMask {
    /// * `field` - Statistic of every point.
    /// * `observed` - Statistic of the observed table.
    /// * `alternative` - Which tail(s) count as extreme.
    pub fn new(field: &StatisticField, observed: f64, alternative: Alternative) -> Self {
        let grid = field.grid();
        let mask = Grid::new(
            field
                .values()
                .iter()
                .map(|&t| is_extreme(t, observed, alternative))
                .collect(),
            grid.rows,
            grid.cols,
        );
        RejectionMask { mask }
    }

    /// Membership of all points, in the flat order of the sample space.
    pub fn as_slice(&self) -> &[bool] {
        self.mask.as_slice()
    }

    /// Number of points in the region.
    pub fn count(&self) -> usize {
        self.mask.as_slice().iter().filter(|m| **m).count()
    }
}

fn is_extreme(statistic: f64, observed: f64, alternative: Alternative) -> bool {
    match alternative {
        Alternative::TwoSided => statistic.abs() >= observed.abs(),
        Alternative::Less => statistic <= observed,
        Alternative::Greater => statistic >= observed,
    }
}

pub const DEFAULT_N_ITER: usize = 3;
pub const NUISANCE_GRID_SIZE: usize = 100;
pub const PVALUE_OVERSHOOT_TOLERANCE: f64 = 1e-9;
pub const EPPS_SINGLETON_MIN_SAMPLE: usize = 5;
pub const EPPS_SINGLETON_SMALL_SAMPLE: usize = 25;
pub const PINV_RELATIVE_TOLERANCE: f64 = 1e-15;
pub const CVM_SERIES_TOLERANCE: f64 = 1e-7;

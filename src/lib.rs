//! Exact and asymptotic hypothesis tests on contingency tables, with two-sample and
//! goodness of fit tests on continuous samples.
//!
//! ```rust,ignore
//! use hypotests::prelude::*;
//!
//! let table = ContingencyTable::from_2x2([[43, 40], [10, 39]])?;
//! let res = BarnardExact::default().set_pooled(false).test(&table)?;
//! println!("statistic = {}, p-value = {}", res.statistic, res.pvalue);
//! ```

// Modules
pub mod alternative;
pub mod association;
pub mod barnard;
pub mod constants;
pub mod cramer_von_mises;
pub mod data;
pub mod epps_singleton;
pub mod errors;
pub mod special;
pub mod utils;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::alternative::Alternative;
    pub use crate::association::{kendall_tau_b, somers_d, KendallTauResult, SomersDResult};
    pub use crate::barnard::config::{BarnardConfig, ConfigIO};
    pub use crate::barnard::{barnard_exact, BarnardExact, BarnardExactResult};
    pub use crate::cramer_von_mises::{cdf_cvm, cramervonmises, CramerVonMisesResult};
    pub use crate::data::{ContingencyTable, Grid};
    pub use crate::epps_singleton::{epps_singleton_2samp, EppsSingletonResult};
    pub use crate::errors::HypotestError;
}

// Individual classes, and functions
pub use alternative::Alternative;
pub use association::{kendall_tau_b, somers_d};
pub use barnard::{barnard_exact, BarnardExact, BarnardExactResult};
pub use cramer_von_mises::cramervonmises;
pub use data::ContingencyTable;
pub use epps_singleton::epps_singleton_2samp;
pub use errors::HypotestError;

//! Barnard Configuration
//!
//! Defines the configuration of Barnard's exact test and its JSON persistence.
use crate::alternative::Alternative;
use crate::constants::{DEFAULT_N_ITER, NUISANCE_GRID_SIZE};
use crate::errors::HypotestError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_pooled() -> bool {
    true
}
fn default_n_iter() -> usize {
    DEFAULT_N_ITER
}
fn default_n_nuisance() -> usize {
    NUISANCE_GRID_SIZE
}
fn default_num_threads() -> Option<usize> {
    None
}
fn default_parallel() -> bool {
    true
}

/// Configuration for [`BarnardExact`](crate::barnard::BarnardExact).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarnardConfig {
    /// Alternative hypothesis.
    #[serde(default)]
    pub alternative: Alternative,
    /// Whether the Wald statistic uses the pooled variance.
    #[serde(default = "default_pooled")]
    pub pooled: bool,
    /// Number of rounds of the nuisance grid search.
    #[serde(default = "default_n_iter")]
    pub n_iter: usize,
    /// Number of candidate nuisance values evaluated per round.
    #[serde(default = "default_n_nuisance")]
    pub n_nuisance: usize,
    /// Number of threads for parallel evaluation. `None` uses the global pool.
    #[serde(default = "default_num_threads")]
    pub num_threads: Option<usize>,
    /// Whether candidates of a round are evaluated in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Log the outcome of each test.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for BarnardConfig {
    fn default() -> Self {
        BarnardConfig {
            alternative: Alternative::TwoSided,
            pooled: true,
            n_iter: DEFAULT_N_ITER,
            n_nuisance: NUISANCE_GRID_SIZE,
            num_threads: None,
            parallel: true,
            verbose: false,
        }
    }
}

/// IO
pub trait ConfigIO: Serialize + DeserializeOwned + Sized {
    /// Save a configuration as a json object to a file.
    ///
    /// * `path` - Path to save the configuration.
    fn save_config<P: AsRef<Path>>(&self, path: P) -> Result<(), HypotestError> {
        fs::write(path, self.json_dump()?).map_err(|e| HypotestError::UnableToWrite(e.to_string()))
    }

    /// Dump a configuration as a json object
    fn json_dump(&self) -> Result<String, HypotestError> {
        serde_json::to_string(self).map_err(|e| HypotestError::UnableToWrite(e.to_string()))
    }

    /// Load a configuration from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, HypotestError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| HypotestError::UnableToRead(e.to_string()))
    }

    /// Load a configuration from a path to a json object.
    ///
    /// * `path` - Path to load the configuration from.
    fn load_config<P: AsRef<Path>>(path: P) -> Result<Self, HypotestError> {
        let json_str = fs::read_to_string(path).map_err(|e| HypotestError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ConfigIO for BarnardConfig {}

//! Errors
//!
//! Custom error types used throughout the `hypotests` crate.
use thiserror::Error;

/// Errors that can occur while running a hypothesis test.
#[derive(Debug, Error, PartialEq)]
pub enum HypotestError {
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Invalid value parsing.
    #[error("Invalid value {0} passed for {1}, expected one of {2}.")]
    ParseString(String, String, String),
    /// Table does not have the shape a test requires.
    #[error("The input table must be of shape {0}, found {1}.")]
    InvalidShape(String, String),
    /// Negative count found in a table cell.
    #[error("All values in the table must be nonnegative, found {2} at row {0}, column {1}.")]
    NegativeCount(usize, usize, i64),
    /// Not enough information in the table to compute the statistic.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
    /// Unable to write configuration to file.
    #[error("Unable to write configuration to file: {0}")]
    UnableToWrite(String),
    /// Unable to read configuration from file.
    #[error("Unable to read configuration from a file {0}")]
    UnableToRead(String),
    /// The rayon thread pool could not be created.
    #[error("Unable to build thread pool: {0}")]
    ThreadPool(String),
    /// A matrix decomposition did not converge.
    #[error("Unable to decompose matrix: {0}")]
    Decomposition(String),
}

//! Error types for flow-shop solving.

use thiserror::Error;

use crate::job::{JobId, Machine};

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, FlowShopError>;

/// Errors raised before a search begins.
///
/// Once the input is validated, timeline construction and bound
/// computation are total functions: nothing inside the search fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowShopError {
    /// A job has a negative processing time.
    #[error("job {id} has negative processing time {time} on machine {machine}")]
    InvalidJob {
        /// 1-based id of the offending job.
        id: JobId,
        /// Machine on which the time is negative.
        machine: Machine,
        /// The rejected processing time.
        time: i64,
    },

    /// A job's id does not match its 1-based position in the input.
    #[error("job at position {position} has id {id}, expected {position}")]
    MisnumberedJob {
        /// 1-based position in the input sequence.
        position: usize,
        /// The id found there.
        id: JobId,
    },

    /// More than one processing time failed validation. Each entry is an [`FlowShopError::InvalidJob`].
    #[error("{} negative processing times in job set", .0.len())]
    InvalidJobs(Vec<FlowShopError>),

    /// The solver configuration was rejected by `BnbConfig::validate`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A sequence handed to the evaluator is not a permutation of the job ids.
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),
}

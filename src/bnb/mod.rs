//! Branch and Bound (B&B) for F2 | prmu | ΣC_j.
//!
//! Best-bound tree search over job sequences for the two-machine
//! permutation flow shop with total completion time objective. Nodes are
//! [`PartialSchedule`](crate::schedule::PartialSchedule)s; the open node with
//! the smallest bound is always branched next.
//!
//! # References
//!
//! - Land & Doig (1960), "An Automatic Method of Solving Discrete Programming Problems"
//! - Ignall & Schrage (1965), "Application of the Branch and Bound Technique to
//!   Some Flow-Shop Scheduling Problems"

mod config;
mod frontier;
mod runner;

pub use config::{BnbConfig, DEFAULT_MAX_BRANCHES};
pub use runner::{BnbResult, BnbRunner, BnbStats, Termination};

use crate::error::Result;
use crate::job::Job;

/// Solves `jobs` with the default configuration.
///
/// # Examples
///
/// ```
/// use u_flowshop::bnb::solve;
/// use u_flowshop::job::jobs_from_times;
///
/// let result = solve(&jobs_from_times(&[(0, 5), (5, 0)])).unwrap();
/// assert_eq!(result.sequence, vec![1, 2]);
/// assert_eq!(result.total_completion_time, 5);
/// ```
pub fn solve(jobs: &[Job]) -> Result<BnbResult> {
    BnbRunner::solve(jobs, &BnbConfig::default())
}

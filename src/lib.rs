//! Branch-and-bound solver for the two-machine permutation flow shop.
//!
//! Every job runs on machine 1 and then on machine 2, without preemption and
//! without overlap on either machine. The solver searches for the job
//! sequence minimizing total completion time, the sum of the jobs'
//! completion times on machine 2 (F2 | prmu | ΣC_j).
//!
//! - **`job`**: Job model, validation, and seeded instance generation.
//! - **`schedule`**: Run-length machine timelines, partial schedules with
//!   their bound estimate, and reference evaluation of full sequences.
//! - **`bnb`**: Best-bound branch-and-bound search with frontier pruning and
//!   a branch safety cap.
//! - **`logging`**: Verbosity-gated search logging.
//!
//! # Examples
//!
//! ```
//! use u_flowshop::bnb::{BnbConfig, BnbRunner};
//! use u_flowshop::job::jobs_from_times;
//!
//! let jobs = jobs_from_times(&[(3, 2), (1, 4), (2, 1)]);
//! let result = BnbRunner::solve(&jobs, &BnbConfig::default()).unwrap();
//! assert_eq!(result.total_completion_time, 19);
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluate sibling nodes concurrently with rayon.
//! - `serde`: `Serialize`/`Deserialize` on jobs, configs and results.

pub mod bnb;
pub mod error;
pub mod job;
pub mod logging;
pub mod schedule;

pub use error::{FlowShopError, Result};

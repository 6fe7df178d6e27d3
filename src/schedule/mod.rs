//! Schedule representation for the two-machine flow shop.
//!
//! - [`Timeline`]: run-length occupancy of one machine
//! - [`PartialSchedule`]: a search node with its bound and completeness flag
//! - [`evaluate_sequence`] / [`enumerate_best`]: reference evaluation of
//!   complete sequences

mod evaluation;
mod partial;
mod timeline;

pub use evaluation::{enumerate_best, evaluate_sequence, Evaluation};
pub(crate) use evaluation::evaluate_unchecked;
pub use partial::{NodeId, PartialSchedule};
pub use timeline::{append, append_in_place, is_compatible, Run, Timeline};

//! Independent evaluation of complete job sequences.
//!
//! [`evaluate_sequence`] simulates a permutation through the timeline
//! construction with machine 2 always waiting for machine 1, which is the
//! ground truth the search results are checked against.
//! [`enumerate_best`] tries every permutation; it is exponential and meant
//! for small instances and tests.

use crate::error::{FlowShopError, Result};
use crate::job::{Job, JobId, JobSet};

use super::partial::prefix_timelines;

/// Outcome of simulating one complete sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// The evaluated sequence.
    pub sequence: Vec<JobId>,
    /// Machine-2 completion time per position of `sequence`.
    ///
    /// `None` for jobs with zero machine-2 time; they occupy no time unit on
    /// machine 2 and add nothing to the total.
    pub completion_times: Vec<Option<i64>>,
    /// Sum of the machine-2 completion times.
    pub total_completion_time: i64,
    /// End of the last time unit on either machine. Informational only.
    pub makespan: i64,
}

/// Simulates `sequence` over `jobs`.
///
/// # Errors
/// Fails if the jobs are invalid or `sequence` is not a permutation of the
/// job ids.
///
/// # Examples
///
/// ```
/// use u_flowshop::job::jobs_from_times;
/// use u_flowshop::schedule::evaluate_sequence;
///
/// let jobs = jobs_from_times(&[(3, 2), (1, 4)]);
/// let eval = evaluate_sequence(&jobs, &[2, 1]).unwrap();
/// assert_eq!(eval.total_completion_time, 5 + 7);
/// ```
pub fn evaluate_sequence(jobs: &[Job], sequence: &[JobId]) -> Result<Evaluation> {
    let set = JobSet::new(jobs)?;
    check_permutation(set.len(), sequence)?;
    Ok(evaluate_unchecked(&set, sequence))
}

pub(crate) fn evaluate_unchecked(jobs: &JobSet, sequence: &[JobId]) -> Evaluation {
    let (machine1, machine2) = prefix_timelines(jobs, sequence);
    let completion_times = sequence
        .iter()
        .map(|&j| machine2.completion_of(j))
        .collect();
    Evaluation {
        sequence: sequence.to_vec(),
        completion_times,
        total_completion_time: machine2.total_completion(),
        makespan: machine1.len().max(machine2.len()),
    }
}

fn check_permutation(n: usize, sequence: &[JobId]) -> Result<()> {
    if sequence.len() != n {
        return Err(FlowShopError::InvalidSequence(format!(
            "expected {n} jobs, got {}",
            sequence.len()
        )));
    }
    let mut seen = vec![false; n + 1];
    for &j in sequence {
        if j == 0 || j > n {
            return Err(FlowShopError::InvalidSequence(format!(
                "unknown job id {j}"
            )));
        }
        if std::mem::replace(&mut seen[j], true) {
            return Err(FlowShopError::InvalidSequence(format!(
                "job {j} appears twice"
            )));
        }
    }
    Ok(())
}

/// Finds a minimum total completion time sequence by full enumeration.
///
/// Permutations are visited in lexicographic order and the first optimum is
/// kept. Runs in O(n! · n); intended for instances of about ten jobs or fewer.
///
/// # Errors
/// Fails if the jobs are invalid.
pub fn enumerate_best(jobs: &[Job]) -> Result<Evaluation> {
    let set = JobSet::new(jobs)?;
    let mut perm: Vec<JobId> = set.ids().collect();
    let mut best = evaluate_unchecked(&set, &perm);

    while next_permutation(&mut perm) {
        let eval = evaluate_unchecked(&set, &perm);
        if eval.total_completion_time < best.total_completion_time {
            best = eval;
        }
    }
    Ok(best)
}

/// Rearranges `perm` into its lexicographic successor.
///
/// Returns `false` once `perm` is the last (descending) permutation.
fn next_permutation(perm: &mut [JobId]) -> bool {
    if perm.len() < 2 {
        return false;
    }
    let mut i = perm.len() - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = perm.len() - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}

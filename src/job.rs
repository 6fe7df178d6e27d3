//! Job model for the two-machine flow shop.
//!
//! Every job is processed first on machine 1 and then on machine 2.
//! Jobs are identified by their 1-based position in the input sequence.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 6

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{FlowShopError, Result};

/// 1-based job identifier.
pub type JobId = usize;

/// One of the two machines of the flow shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Machine {
    /// The machine every job visits first.
    First,
    /// The machine every job visits last. Completion times are measured here.
    Second,
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Machine::First => write!(f, "1"),
            Machine::Second => write!(f, "2"),
        }
    }
}

/// A job with fixed processing times on both machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job {
    /// 1-based identifier, unique within a problem.
    pub id: JobId,
    /// Processing time on machine 1.
    pub p1: i64,
    /// Processing time on machine 2.
    pub p2: i64,
}

impl Job {
    /// Creates a job. Times are not checked here; see [`validate_jobs`].
    pub fn new(id: JobId, p1: i64, p2: i64) -> Self {
        Self { id, p1, p2 }
    }

    /// Processing time on the given machine.
    pub fn time_on(&self, machine: Machine) -> i64 {
        match machine {
            Machine::First => self.p1,
            Machine::Second => self.p2,
        }
    }
}

/// Builds a job list from `(p1, p2)` pairs, numbering jobs from 1.
///
/// # Examples
///
/// ```
/// use u_flowshop::job::jobs_from_times;
///
/// let jobs = jobs_from_times(&[(3, 2), (1, 4)]);
/// assert_eq!(jobs[1].id, 2);
/// assert_eq!(jobs[1].p2, 4);
/// ```
pub fn jobs_from_times(times: &[(i64, i64)]) -> Vec<Job> {
    times
        .iter()
        .enumerate()
        .map(|(i, &(p1, p2))| Job::new(i + 1, p1, p2))
        .collect()
}

/// Rejects a malformed job set.
///
/// Ids must equal their 1-based position. Then every negative processing
/// time is collected; a single one is reported as
/// [`FlowShopError::InvalidJob`], several as [`FlowShopError::InvalidJobs`].
pub fn validate_jobs(jobs: &[Job]) -> Result<()> {
    if let Some((i, job)) = jobs.iter().enumerate().find(|(i, j)| j.id != i + 1) {
        return Err(FlowShopError::MisnumberedJob {
            position: i + 1,
            id: job.id,
        });
    }

    let mut errors = Vec::new();

    for job in jobs {
        for machine in [Machine::First, Machine::Second] {
            let time = job.time_on(machine);
            if time < 0 {
                errors.push(FlowShopError::InvalidJob {
                    id: job.id,
                    machine,
                    time,
                });
            }
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(FlowShopError::InvalidJobs(errors)),
    }
}

/// A validated job set, indexed by id.
///
/// Also holds the job ids sorted by ascending machine-2 time (ties by id),
/// the order in which the completion heuristic appends unscheduled jobs.
#[derive(Debug, Clone)]
pub struct JobSet {
    jobs: Vec<Job>,
    by_machine2_time: Vec<JobId>,
}

impl JobSet {
    /// Validates `jobs` and builds the set.
    pub fn new(jobs: &[Job]) -> Result<Self> {
        validate_jobs(jobs)?;
        let mut by_machine2_time: Vec<JobId> = jobs.iter().map(|j| j.id).collect();
        by_machine2_time.sort_by_key(|&id| (jobs[id - 1].p2, id));
        Ok(Self {
            jobs: jobs.to_vec(),
            by_machine2_time,
        })
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the set holds no job.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// The job with the given id.
    ///
    /// # Panics
    /// Panics if `id` is not in `1..=len()`.
    pub fn job(&self, id: JobId) -> &Job {
        &self.jobs[id - 1]
    }

    /// All jobs in id order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = JobId> + '_ {
        self.jobs.iter().map(|j| j.id)
    }

    /// Ids sorted by ascending machine-2 time, ties broken by id.
    pub fn by_machine2_time(&self) -> &[JobId] {
        &self.by_machine2_time
    }
}

/// Generates `n` jobs with processing times drawn uniformly from
/// `min_time..=max_time` on both machines.
///
/// The same seed always yields the same instance.
///
/// # Panics
/// Panics if `min_time > max_time`.
pub fn random_jobs(n: usize, min_time: i64, max_time: i64, seed: u64) -> Vec<Job> {
    assert!(min_time <= max_time, "min_time must not exceed max_time");
    let mut rng = StdRng::seed_from_u64(seed);
    (1..=n)
        .map(|id| {
            let p1 = rng.random_range(min_time..=max_time);
            let p2 = rng.random_range(min_time..=max_time);
            Job::new(id, p1, p2)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jobs_from_times_numbers_from_one() {
        let jobs = jobs_from_times(&[(3, 2), (1, 4), (2, 1)]);
        let ids: Vec<JobId> = jobs.iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(jobs[0], Job::new(1, 3, 2));
    }

    #[test]
    fn test_validate_ok_with_zero_times() {
        let jobs = jobs_from_times(&[(0, 5), (5, 0), (0, 0)]);
        assert!(validate_jobs(&jobs).is_ok());
    }

    #[test]
    fn test_validate_empty_ok() {
        assert!(validate_jobs(&[]).is_ok());
    }

    #[test]
    fn test_validate_single_negative() {
        let jobs = jobs_from_times(&[(1, 1), (2, -3)]);
        assert_eq!(
            validate_jobs(&jobs),
            Err(FlowShopError::InvalidJob {
                id: 2,
                machine: Machine::Second,
                time: -3,
            })
        );
    }

    #[test]
    fn test_validate_reports_every_negative() {
        let jobs = jobs_from_times(&[(-1, 1), (2, 2), (-2, -5)]);
        match validate_jobs(&jobs) {
            Err(FlowShopError::InvalidJobs(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected InvalidJobs, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_misnumbered_ids() {
        let jobs = vec![Job::new(1, 1, 1), Job::new(3, 1, 1)];
        assert_eq!(
            validate_jobs(&jobs),
            Err(FlowShopError::MisnumberedJob { position: 2, id: 3 })
        );
    }

    #[test]
    fn test_job_set_orders_by_machine_two_time() {
        let set = JobSet::new(&jobs_from_times(&[(3, 2), (1, 4), (2, 1), (5, 2)])).unwrap();
        assert_eq!(set.by_machine2_time(), &[3, 1, 4, 2]);
        assert_eq!(set.job(2).p1, 1);
        assert_eq!(set.ids().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_job_set_rejects_negative_time() {
        assert!(JobSet::new(&jobs_from_times(&[(1, -1)])).is_err());
    }

    #[test]
    fn test_random_jobs_deterministic_and_in_range() {
        let a = random_jobs(20, 1, 9, 7);
        let b = random_jobs(20, 1, 9, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|j| (1..=9).contains(&j.p1) && (1..=9).contains(&j.p2)));
        assert_eq!(a.last().map(|j| j.id), Some(20));
    }

    #[test]
    fn test_machine_display() {
        assert_eq!(Machine::First.to_string(), "1");
        assert_eq!(Machine::Second.to_string(), "2");
    }
}

//! Run-length machine timelines.
//!
//! A [`Timeline`] records which job occupies a machine over time. Instead of
//! one slot per time unit it keeps one [`Run`] per job, so its size grows
//! with the number of jobs rather than with the total processing time.
//! Idle time is the space between consecutive runs.
//!
//! Zero-duration runs are kept: they mark the instant at which a job passed
//! the machine but occupy no time unit, so [`Timeline::occupant_at`] and
//! [`Timeline::total_completion`] never see them.

use std::collections::HashMap;

use crate::job::{Job, JobId};

/// A contiguous stretch of time during which one job holds a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Job holding the machine.
    pub job: JobId,
    /// First occupied time unit.
    pub start: i64,
    /// Number of occupied time units.
    pub duration: i64,
}

impl Run {
    /// One past the last occupied time unit.
    pub fn end(&self) -> i64 {
        self.start + self.duration
    }
}

/// Occupancy of a single machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    runs: Vec<Run>,
    len: i64,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Length of the timeline, idle units included.
    pub fn len(&self) -> i64 {
        self.len
    }

    /// Whether no time unit has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Runs in time order.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Appends `idle` idle units followed by `duration` units of `job`.
    ///
    /// The timeline grows by `idle + duration` even when `duration` is zero.
    pub fn push(&mut self, job: JobId, idle: i64, duration: i64) {
        debug_assert!(idle >= 0 && duration >= 0);
        let start = self.len + idle;
        self.runs.push(Run {
            job,
            start,
            duration,
        });
        self.len = start + duration;
    }

    /// The run of `job`, if the job has been appended.
    pub fn run_of(&self, job: JobId) -> Option<&Run> {
        self.runs.iter().find(|r| r.job == job)
    }

    /// Completion time of `job`: one past the last unit it occupies.
    ///
    /// `None` if the job occupies no time unit on this machine.
    pub fn completion_of(&self, job: JobId) -> Option<i64> {
        self.run_of(job).filter(|r| r.duration > 0).map(Run::end)
    }

    /// Job occupying time unit `t`, or `None` if the machine is idle there.
    pub fn occupant_at(&self, t: i64) -> Option<JobId> {
        if t < 0 || t >= self.len {
            return None;
        }
        // Runs are sorted by start; find the last one starting at or before t.
        let idx = self.runs.partition_point(|r| r.start <= t);
        self.runs[..idx]
            .iter()
            .rev()
            .find(|r| r.duration > 0)
            .filter(|r| t < r.end())
            .map(|r| r.job)
    }

    /// Sum of the completion times of every job occupying at least one unit.
    pub fn total_completion(&self) -> i64 {
        self.runs
            .iter()
            .filter(|r| r.duration > 0)
            .map(Run::end)
            .sum()
    }

    /// Expands the timeline into one slot per time unit.
    pub fn to_slots(&self) -> Vec<Option<JobId>> {
        let mut slots = vec![None; self.len as usize];
        for run in self.runs.iter().filter(|r| r.duration > 0) {
            for slot in &mut slots[run.start as usize..run.end() as usize] {
                *slot = Some(run.job);
            }
        }
        slots
    }
}

/// Appends `job` to both machines in place.
///
/// Machine 1 receives the job right after its last run. On machine 2 the job
/// starts once it has left machine 1 and machine 2 is free; with
/// `force_no_gap` it starts as soon as machine 2 is free, whether or not
/// machine 1 is done with it.
pub fn append_in_place(
    job: &Job,
    machine1: &mut Timeline,
    machine2: &mut Timeline,
    force_no_gap: bool,
) {
    machine1.push(job.id, 0, job.p1);
    let gap = if force_no_gap {
        0
    } else {
        (machine1.len() - machine2.len()).max(0)
    };
    machine2.push(job.id, gap, job.p2);
}

/// Returns copies of both timelines with `job` appended.
pub fn append(
    job: &Job,
    machine1: &Timeline,
    machine2: &Timeline,
    force_no_gap: bool,
) -> (Timeline, Timeline) {
    let mut m1 = machine1.clone();
    let mut m2 = machine2.clone();
    append_in_place(job, &mut m1, &mut m2, force_no_gap);
    (m1, m2)
}

/// Whether two timelines describe one realizable non-overlapping schedule.
///
/// Fails if machine 1 runs past the end of machine 2, or if any job starts on
/// machine 2 before it has finished on machine 1. The latter covers a job
/// holding the same time unit on both machines.
pub fn is_compatible(machine1: &Timeline, machine2: &Timeline) -> bool {
    if machine1.len() > machine2.len() {
        return false;
    }

    let released: HashMap<JobId, i64> = machine1
        .runs()
        .iter()
        .map(|r| (r.job, r.end()))
        .collect();

    machine2.runs().iter().all(|r2| match released.get(&r2.job) {
        Some(&end1) => r2.start >= end1,
        None => true,
    })
}

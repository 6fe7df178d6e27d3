//! Partial schedules: the nodes of the branch-and-bound tree.
//!
//! A [`PartialSchedule`] fixes a prefix of the job sequence and carries the
//! machine timelines of that prefix. On construction it estimates the total
//! completion time reachable from the prefix by appending the remaining jobs
//! with a completion heuristic:
//!
//! 1. take the unscheduled jobs in ascending machine-2 time (ties by id),
//! 2. append them without ever idling machine 2,
//! 3. sum the machine-2 completion times of the extended timelines.
//!
//! If the extended timelines still form a realizable schedule, the estimate
//! is the exact total completion time of that full sequence and the node
//! becomes a complete candidate solution.
//!
//! # Reference
//! Ignall & Schrage (1965), "Application of the Branch and Bound Technique
//! to Some Flow-Shop Scheduling Problems", *Operations Research* 13(3).

use crate::job::{JobId, JobSet};

use super::timeline::{append_in_place, is_compatible, Timeline};

/// Identifier of a search node, unique within one solve.
pub type NodeId = u64;

/// One node of the search tree. Immutable once built.
#[derive(Debug, Clone)]
pub struct PartialSchedule {
    id: NodeId,
    parent_id: Option<NodeId>,
    order: Vec<JobId>,
    depth: usize,
    machine1: Timeline,
    machine2: Timeline,
    bound: i64,
    is_complete: bool,
}

impl PartialSchedule {
    /// Builds a depth-1 node scheduling `job` first.
    pub fn first(jobs: &JobSet, job: JobId, id: NodeId) -> Self {
        Self::build(
            jobs,
            id,
            None,
            vec![job],
            Timeline::new(),
            Timeline::new(),
        )
    }

    /// Builds the child of `self` that schedules `job` next.
    ///
    /// The child starts from this node's branched prefix and its timelines,
    /// never from a heuristic extension.
    ///
    /// # Panics
    /// Panics in debug builds if `job` is already fixed by branching.
    pub fn child(&self, jobs: &JobSet, job: JobId, id: NodeId) -> Self {
        let prefix = &self.order[..self.depth];
        debug_assert!(!prefix.contains(&job), "job {job} already scheduled");

        // A complete node holds extended timelines; rebuild the prefix ones.
        let (machine1, machine2) = if self.depth < self.order.len() {
            prefix_timelines(jobs, prefix)
        } else {
            (self.machine1.clone(), self.machine2.clone())
        };

        let mut order = Vec::with_capacity(jobs.len());
        order.extend_from_slice(prefix);
        order.push(job);
        Self::build(jobs, id, Some(self.id), order, machine1, machine2)
    }

    fn build(
        jobs: &JobSet,
        id: NodeId,
        parent_id: Option<NodeId>,
        mut order: Vec<JobId>,
        mut machine1: Timeline,
        mut machine2: Timeline,
    ) -> Self {
        // Only the newest job is missing from the inherited timelines.
        if let Some(&last) = order.last() {
            append_in_place(jobs.job(last), &mut machine1, &mut machine2, false);
        }
        let depth = order.len();

        let mut scheduled = vec![false; jobs.len() + 1];
        for &j in &order {
            scheduled[j] = true;
        }
        let tail: Vec<JobId> = jobs
            .by_machine2_time()
            .iter()
            .copied()
            .filter(|&j| !scheduled[j])
            .collect();

        if tail.is_empty() {
            let bound = machine2.total_completion();
            let is_complete = is_compatible(&machine1, &machine2);
            return Self {
                id,
                parent_id,
                order,
                depth,
                machine1,
                machine2,
                bound,
                is_complete,
            };
        }

        let mut ext1 = machine1.clone();
        let mut ext2 = machine2.clone();
        for &j in &tail {
            append_in_place(jobs.job(j), &mut ext1, &mut ext2, true);
        }
        let bound = ext2.total_completion();
        let is_complete = is_compatible(&ext1, &ext2);

        if is_complete {
            order.extend(tail);
            machine1 = ext1;
            machine2 = ext2;
        }

        Self {
            id,
            parent_id,
            order,
            depth,
            machine1,
            machine2,
            bound,
            is_complete,
        }
    }

    /// Node identifier.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Identifier of the node this one was branched from; `None` at depth 1.
    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    /// Scheduled job ids in processing order.
    ///
    /// For a complete node this is the full sequence, heuristic tail included.
    pub fn order(&self) -> &[JobId] {
        &self.order
    }

    /// Number of jobs fixed by branching, excluding any heuristic tail.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Machine-1 timeline of [`order`](Self::order).
    pub fn machine1(&self) -> &Timeline {
        &self.machine1
    }

    /// Machine-2 timeline of [`order`](Self::order).
    pub fn machine2(&self) -> &Timeline {
        &self.machine2
    }

    /// Estimated total completion time. Exact when the node is complete.
    pub fn bound(&self) -> i64 {
        self.bound
    }

    /// Whether the heuristic extension is a real schedule for all jobs.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Jobs not yet fixed by branching, in ascending id order.
    pub fn unscheduled<'a>(&'a self, jobs: &'a JobSet) -> impl Iterator<Item = JobId> + 'a {
        let fixed = &self.order[..self.depth];
        jobs.ids().filter(move |j| !fixed.contains(j))
    }
}

/// Timelines of `order` built job by job, machine 2 waiting for machine 1.
pub(crate) fn prefix_timelines(jobs: &JobSet, order: &[JobId]) -> (Timeline, Timeline) {
    let mut machine1 = Timeline::new();
    let mut machine2 = Timeline::new();
    for &j in order {
        append_in_place(jobs.job(j), &mut machine1, &mut machine2, false);
    }
    (machine1, machine2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::jobs_from_times;

    fn job_set(times: &[(i64, i64)]) -> JobSet {
        JobSet::new(&jobs_from_times(times)).unwrap()
    }

    #[test]
    fn test_single_job_node_is_complete() {
        let jobs = job_set(&[(3, 4)]);
        let node = PartialSchedule::first(&jobs, 1, 0);
        assert!(node.is_complete());
        assert_eq!(node.bound(), 7);
        assert_eq!(node.order(), &[1]);
        assert_eq!(node.parent_id(), None);
    }

    #[test]
    fn test_bound_uses_shortest_machine_two_tail() {
        // Job 1 first, then tail [3, 2] by machine-2 time, appended without gaps:
        // m2: 1 @ [3, 5), 3 @ [5, 6), 2 @ [6, 10) -> 5 + 6 + 10.
        let jobs = job_set(&[(3, 2), (1, 4), (2, 1)]);
        let node = PartialSchedule::first(&jobs, 1, 0);
        assert_eq!(node.bound(), 21);
    }

    #[test]
    fn test_incomplete_node_keeps_prefix_only() {
        // Tail job 2 would start on machine 2 at 1 while machine 1 holds it
        // until 6.
        let jobs = job_set(&[(0, 1), (6, 2)]);
        let node = PartialSchedule::first(&jobs, 1, 0);
        assert!(!node.is_complete());
        assert_eq!(node.order(), &[1]);
        assert_eq!(node.machine1().len(), 0);
        assert_eq!(node.machine2().len(), 1);
        assert_eq!(node.depth(), 1);
    }

    #[test]
    fn test_complete_node_extends_order_and_timelines() {
        let jobs = job_set(&[(1, 5), (1, 1), (1, 2)]);
        let node = PartialSchedule::first(&jobs, 1, 0);
        assert!(node.is_complete());
        assert_eq!(node.order(), &[1, 2, 3]);
        assert_eq!(node.depth(), 1);
        // m2: 1 @ [1, 6), 2 @ [6, 7), 3 @ [7, 9).
        assert_eq!(node.bound(), 6 + 7 + 9);
        assert_eq!(node.machine2().total_completion(), node.bound());
    }

    #[test]
    fn test_child_builds_on_parent_prefix() {
        let jobs = job_set(&[(0, 1), (6, 2), (1, 1)]);
        let parent = PartialSchedule::first(&jobs, 1, 0);
        assert!(!parent.is_complete());

        let child = parent.child(&jobs, 2, 7);
        assert_eq!(child.id(), 7);
        assert_eq!(child.parent_id(), Some(0));
        assert_eq!(&child.order()[..2], &[1, 2]);
        assert_eq!(child.depth(), 2);
        assert_eq!(child.machine1().run_of(2).map(|r| r.start), Some(0));
        assert_eq!(child.machine2().run_of(2).map(|r| r.start), Some(6));
    }

    #[test]
    fn test_leaf_node_is_always_complete() {
        let jobs = job_set(&[(4, 1), (1, 6), (3, 3)]);
        let root = PartialSchedule::first(&jobs, 2, 0);
        assert!(root.is_complete());
        assert_eq!(root.order(), &[2, 1, 3]);

        let leaf = root.child(&jobs, 3, 1).child(&jobs, 1, 2);
        assert!(leaf.is_complete());
        assert_eq!(leaf.depth(), 3);
        assert_eq!(leaf.order(), &[2, 3, 1]);
        // m1: 2 [0,1), 3 [1,4), 1 [4,8); m2: 2 [1,7), 3 [7,10), 1 [10,11).
        assert_eq!(leaf.bound(), 7 + 10 + 11);
    }

    #[test]
    fn test_unscheduled_excludes_branched_jobs() {
        let jobs = job_set(&[(0, 1), (6, 2), (1, 1), (2, 2)]);
        let node = PartialSchedule::first(&jobs, 3, 0);
        let rest: Vec<JobId> = node.unscheduled(&jobs).collect();
        assert_eq!(rest, vec![1, 2, 4]);
    }

    #[test]
    fn test_zero_job_contributes_nothing() {
        let jobs = job_set(&[(0, 0), (2, 3)]);
        let a = PartialSchedule::first(&jobs, 1, 0).child(&jobs, 2, 1);
        let b = PartialSchedule::first(&jobs, 2, 2).child(&jobs, 1, 3);
        assert_eq!(a.bound(), 5);
        assert_eq!(b.bound(), 5);
    }
}

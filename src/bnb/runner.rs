//! Best-bound branch-and-bound execution loop.
//!
//! # Algorithm
//!
//! 1. Build one depth-1 node per job and admit each
//! 2. Pop the open node with the smallest bound
//! 3. Branch it into one child per unscheduled job and admit each child
//! 4. Repeat until the frontier is empty or the branch cap is reached
//!
//! Admission: a complete child is a candidate; it replaces the incumbent if
//! strictly better, then every open node whose bound is not below the
//! candidate's is discarded. An incomplete child joins the frontier only if
//! its bound is strictly below the incumbent's.
//!
//! # Reference
//!
//! Land & Doig (1960), "An Automatic Method of Solving Discrete Programming
//! Problems", *Econometrica* 28(3), 497-520.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::BnbConfig;
use super::frontier::Frontier;
use crate::error::{FlowShopError, Result};
use crate::job::{Job, JobId, JobSet};
use crate::schedule::{evaluate_unchecked, NodeId, PartialSchedule};
use crate::{log_changes, log_checks, log_debug};

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The frontier ran empty: the search space was exhausted.
    Exhausted,
    /// The branch cap was reached with open nodes left.
    BranchLimit,
}

/// Counters collected during a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbStats {
    /// Nodes built, depth-1 nodes included.
    pub nodes_created: u64,
    /// Nodes popped from the frontier and branched.
    pub nodes_expanded: u64,
    /// Children built by branching. This is what the cap limits.
    pub branches: u64,
    /// Complete nodes seen.
    pub candidates: u64,
    /// Incomplete nodes admitted to the frontier.
    pub admitted: u64,
    /// Incomplete nodes discarded on arrival.
    pub discarded: u64,
    /// Open nodes removed by candidate pruning.
    pub pruned: u64,
    /// Largest frontier size.
    pub peak_frontier: usize,
}

/// Result of a branch-and-bound run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BnbResult {
    /// Best job sequence found.
    pub sequence: Vec<JobId>,

    /// Total completion time of `sequence`.
    pub total_completion_time: i64,

    /// Why the search stopped.
    pub termination: Termination,

    /// Search counters.
    pub stats: BnbStats,

    /// Bound of every improving candidate, in discovery order.
    ///
    /// Strictly decreasing; the last entry equals `total_completion_time`
    /// whenever a candidate was found. Empty if history recording is off.
    pub incumbent_history: Vec<i64>,

    /// Node that produced `sequence`, if it came from a candidate.
    pub best_node: Option<NodeId>,
}

impl BnbResult {
    /// Whether the search ran to exhaustion rather than hitting the cap.
    ///
    /// Only an exhaustive result is the optimum the search can certify.
    pub fn is_exhaustive(&self) -> bool {
        self.termination == Termination::Exhausted
    }

    fn empty() -> Self {
        Self {
            sequence: Vec::new(),
            total_completion_time: 0,
            termination: Termination::Exhausted,
            stats: BnbStats::default(),
            incumbent_history: Vec::new(),
            best_node: None,
        }
    }
}

/// Executes the branch-and-bound search.
pub struct BnbRunner;

impl BnbRunner {
    /// Solves the instance given by `jobs`.
    ///
    /// # Errors
    ///
    /// Fails before any node is built if a job is invalid
    /// ([`FlowShopError::InvalidJob`], [`FlowShopError::InvalidJobs`],
    /// [`FlowShopError::MisnumberedJob`]) or the configuration is rejected
    /// ([`FlowShopError::InvalidConfig`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use u_flowshop::bnb::{BnbConfig, BnbRunner};
    /// use u_flowshop::job::jobs_from_times;
    ///
    /// let jobs = jobs_from_times(&[(3, 2), (1, 4), (2, 1)]);
    /// let result = BnbRunner::solve(&jobs, &BnbConfig::default()).unwrap();
    /// assert_eq!(result.total_completion_time, 19);
    /// assert!(result.is_exhaustive());
    /// ```
    pub fn solve(jobs: &[Job], config: &BnbConfig) -> Result<BnbResult> {
        config.validate().map_err(FlowShopError::InvalidConfig)?;
        let set = JobSet::new(jobs)?;
        if set.is_empty() {
            return Ok(BnbResult::empty());
        }
        Ok(Search::new(&set, config).run())
    }
}

/// Mutable state of one solve.
struct Search<'a> {
    jobs: &'a JobSet,
    config: &'a BnbConfig,
    frontier: Frontier,
    best: Option<PartialSchedule>,
    history: Vec<i64>,
    stats: BnbStats,
    next_id: NodeId,
}

impl<'a> Search<'a> {
    fn new(jobs: &'a JobSet, config: &'a BnbConfig) -> Self {
        Self {
            jobs,
            config,
            frontier: Frontier::new(),
            best: None,
            history: Vec::new(),
            stats: BnbStats::default(),
            next_id: 0,
        }
    }

    fn run(mut self) -> BnbResult {
        let verbosity = self.config.verbosity;

        let jobs = self.jobs;
        let roots: Vec<PartialSchedule> = jobs
            .ids()
            .map(|j| PartialSchedule::first(jobs, j, self.fresh_id()))
            .collect();
        for node in roots {
            self.stats.nodes_created += 1;
            self.admit(node);
        }

        let mut termination = Termination::Exhausted;

        while let Some(parent) = self.frontier.pop() {
            self.stats.nodes_expanded += 1;
            log_debug!(
                verbosity,
                "[bnb] expand node {} (parent {:?}) depth {} bound {} open {}",
                parent.id(),
                parent.parent_id(),
                parent.depth(),
                parent.bound(),
                self.frontier.len()
            );

            for child in self.branch(&parent) {
                self.stats.branches += 1;
                self.stats.nodes_created += 1;
                self.admit(child);
            }

            if self.stats.branches >= self.config.max_branches && !self.frontier.is_empty() {
                termination = Termination::BranchLimit;
                log_changes!(
                    verbosity,
                    "[bnb] branch cap {} reached with {} open nodes",
                    self.config.max_branches,
                    self.frontier.len()
                );
                break;
            }
        }

        self.stats.peak_frontier = self.frontier.peak();
        self.finish(termination)
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Builds every child of `parent`, in ascending job id order.
    fn branch(&mut self, parent: &PartialSchedule) -> Vec<PartialSchedule> {
        let next: Vec<JobId> = parent.unscheduled(self.jobs).collect();
        let first_id = self.next_id;
        self.next_id += next.len() as NodeId;
        let jobs = self.jobs;

        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return next
                .par_iter()
                .enumerate()
                .map(|(k, &j)| parent.child(jobs, j, first_id + k as NodeId))
                .collect();
        }

        next.iter()
            .enumerate()
            .map(|(k, &j)| parent.child(jobs, j, first_id + k as NodeId))
            .collect()
    }

    fn admit(&mut self, node: PartialSchedule) {
        let verbosity = self.config.verbosity;

        if node.is_complete() {
            self.stats.candidates += 1;
            let bound = node.bound();

            let pruned = self.frontier.prune_at_or_above(bound);
            self.stats.pruned += pruned as u64;
            if pruned > 0 {
                log_checks!(
                    verbosity,
                    "[bnb] candidate {} pruned {} open nodes at bound >= {}",
                    node.id(),
                    pruned,
                    bound
                );
            }

            if self.best.as_ref().is_none_or(|b| bound < b.bound()) {
                log_changes!(
                    verbosity,
                    "[bnb] new incumbent {} from node {}: {:?}",
                    bound,
                    node.id(),
                    node.order()
                );
                if self.config.record_history {
                    self.history.push(bound);
                }
                self.best = Some(node);
            }
            return;
        }

        match &self.best {
            Some(best) if node.bound() >= best.bound() => {
                self.stats.discarded += 1;
                log_checks!(
                    verbosity,
                    "[bnb] discard node {} bound {} >= incumbent {}",
                    node.id(),
                    node.bound(),
                    best.bound()
                );
            }
            _ => {
                self.stats.admitted += 1;
                self.frontier.push(node);
            }
        }
    }

    fn finish(mut self, termination: Termination) -> BnbResult {
        let (sequence, total_completion_time, best_node) = match self.best.take() {
            Some(best) => (best.order().to_vec(), best.bound(), Some(best.id())),
            None => self.fallback_sequence(),
        };

        log_changes!(
            self.config.verbosity,
            "[bnb] done ({:?}): total completion time {} after {} branches",
            termination,
            total_completion_time,
            self.stats.branches
        );

        BnbResult {
            sequence,
            total_completion_time,
            termination,
            stats: self.stats,
            incumbent_history: self.history,
            best_node,
        }
    }

    /// Sequence to report when the cap hit before any candidate appeared:
    /// the most promising open node, finished in ascending machine-2 time
    /// order and evaluated as a real schedule.
    fn fallback_sequence(&mut self) -> (Vec<JobId>, i64, Option<NodeId>) {
        let mut sequence: Vec<JobId> = match self.frontier.pop() {
            Some(node) => node.order()[..node.depth()].to_vec(),
            None => Vec::new(),
        };
        let tail: Vec<JobId> = self
            .jobs
            .by_machine2_time()
            .iter()
            .copied()
            .filter(|j| !sequence.contains(j))
            .collect();
        sequence.extend(tail);

        let eval = evaluate_unchecked(self.jobs, &sequence);
        (sequence, eval.total_completion_time, None)
    }
}

//! Property tests: the search against brute force and independent simulation.

use proptest::prelude::*;
use u_flowshop::bnb::{solve, BnbConfig, BnbRunner};
use u_flowshop::job::{jobs_from_times, Job};
use u_flowshop::schedule::{enumerate_best, evaluate_sequence};

fn job_sets(max_jobs: usize, max_time: i64) -> impl Strategy<Value = Vec<Job>> {
    prop::collection::vec((0..=max_time, 0..=max_time), 0..=max_jobs)
        .prop_map(|times| jobs_from_times(&times))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn matches_brute_force_up_to_six_jobs(jobs in job_sets(6, 12)) {
        let result = solve(&jobs).unwrap();
        let brute = enumerate_best(&jobs).unwrap();
        prop_assert!(result.is_exhaustive());
        prop_assert_eq!(result.total_completion_time, brute.total_completion_time);
    }

    #[test]
    fn reported_total_matches_simulation(jobs in job_sets(8, 20)) {
        let result = solve(&jobs).unwrap();
        let eval = evaluate_sequence(&jobs, &result.sequence).unwrap();
        prop_assert_eq!(eval.total_completion_time, result.total_completion_time);
    }

    #[test]
    fn solving_twice_gives_same_total(jobs in job_sets(7, 15)) {
        let a = solve(&jobs).unwrap();
        let b = solve(&jobs).unwrap();
        prop_assert_eq!(a.total_completion_time, b.total_completion_time);
    }

    #[test]
    fn final_answer_is_last_incumbent(jobs in job_sets(7, 15)) {
        let result = solve(&jobs).unwrap();
        if !jobs.is_empty() {
            prop_assert_eq!(
                result.incumbent_history.last().copied(),
                Some(result.total_completion_time)
            );
        }
        for w in result.incumbent_history.windows(2) {
            prop_assert!(w[1] < w[0]);
        }
    }

    #[test]
    fn single_job_total_is_sum_of_times(p1 in 0i64..100, p2 in 0i64..100) {
        let result = solve(&jobs_from_times(&[(p1, p2)])).unwrap();
        prop_assert!(result.is_exhaustive());
        prop_assert_eq!(result.sequence, vec![1]);
        // A job that never occupies machine 2 has nothing to complete there.
        let expected = if p2 > 0 { p1 + p2 } else { 0 };
        prop_assert_eq!(result.total_completion_time, expected);
    }

    #[test]
    fn empty_job_is_free_anywhere(jobs in job_sets(5, 10), pos in 0usize..6) {
        let base = solve(&jobs).unwrap();

        let mut times: Vec<(i64, i64)> = jobs.iter().map(|j| (j.p1, j.p2)).collect();
        let at = pos.min(times.len());
        times.insert(at, (0, 0));
        let padded = solve(&jobs_from_times(&times)).unwrap();

        prop_assert_eq!(base.total_completion_time, padded.total_completion_time);
    }

    #[test]
    fn truncated_search_still_reports_a_real_sequence(
        jobs in job_sets(8, 20),
        cap in 1u64..40,
    ) {
        let config = BnbConfig::default().with_max_branches(cap);
        let result = BnbRunner::solve(&jobs, &config).unwrap();
        let eval = evaluate_sequence(&jobs, &result.sequence).unwrap();
        prop_assert_eq!(eval.total_completion_time, result.total_completion_time);
    }
}

#[test]
fn rejects_negative_processing_time() {
    let jobs = jobs_from_times(&[(2, 2), (3, -1)]);
    assert!(solve(&jobs).is_err());
}

#[test]
fn zero_jobs_is_trivial() {
    let result = solve(&[]).unwrap();
    assert!(result.sequence.is_empty());
    assert_eq!(result.total_completion_time, 0);
    assert!(result.is_exhaustive());
}

//! Property tests for the edit-distance scorer
//!
//! Ensures the categorized counts satisfy the alignment invariants:
//! - SUB + INS + DEL equals the minimal edit count
//! - zero errors exactly for identical sequences
//! - deterministic tie-breaking
//! - raw and normalized modes agree up to the reference length

use evaluar::compute_wer;
use proptest::collection::vec;
use proptest::prelude::*;

/// Independent scalar edit distance, no back-trace. Used as the ground
/// truth the categorized counts must sum to.
fn plain_edit_distance(reference: &[String], hypothesis: &[String]) -> usize {
    let m = reference.len();
    let n = hypothesis.len();
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }
    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(reference[i - 1] != hypothesis[j - 1]);
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[m][n]
}

fn tokens(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<String>> {
    // A small alphabet keeps collisions (and therefore interesting
    // alignments) frequent.
    vec("[a-c]{1,2}", len)
}

proptest! {
    #[test]
    fn prop_breakdown_sums_to_minimal_distance(
        reference in tokens(0..12),
        hypothesis in tokens(0..12)
    ) {
        let stats = compute_wer(&reference, &hypothesis, false).unwrap();
        let expected = plain_edit_distance(&reference, &hypothesis);
        prop_assert_eq!(stats.errors as usize, expected);
        prop_assert_eq!(
            stats.substitutions + stats.insertions + stats.deletions,
            expected
        );
    }

    #[test]
    fn prop_zero_errors_iff_equal(
        reference in tokens(0..10),
        hypothesis in tokens(0..10)
    ) {
        let stats = compute_wer(&reference, &hypothesis, false).unwrap();
        prop_assert_eq!(stats.errors == 0.0, reference == hypothesis);
    }

    #[test]
    fn prop_identical_sequences_score_zero(reference in tokens(1..12)) {
        let stats = compute_wer(&reference, &reference, true).unwrap();
        prop_assert_eq!(stats.errors, 0.0);
        prop_assert_eq!(stats.substitutions + stats.insertions + stats.deletions, 0);
    }

    #[test]
    fn prop_deterministic(
        reference in tokens(0..10),
        hypothesis in tokens(0..10)
    ) {
        let first = compute_wer(&reference, &hypothesis, false).unwrap();
        let second = compute_wer(&reference, &hypothesis, false).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_raw_equals_normalized_times_ref_len(
        reference in tokens(1..12),
        hypothesis in tokens(0..12)
    ) {
        let raw = compute_wer(&reference, &hypothesis, false).unwrap();
        let rate = compute_wer(&reference, &hypothesis, true).unwrap();
        let scaled = rate.errors * reference.len() as f64;
        prop_assert!((raw.errors - scaled).abs() < 1e-9);
        prop_assert_eq!(raw.substitutions, rate.substitutions);
        prop_assert_eq!(raw.insertions, rate.insertions);
        prop_assert_eq!(raw.deletions, rate.deletions);
    }

    #[test]
    fn prop_error_rate_bounded_by_max_len(
        reference in tokens(1..10),
        hypothesis in tokens(0..10)
    ) {
        let stats = compute_wer(&reference, &hypothesis, false).unwrap();
        let bound = reference.len().max(hypothesis.len());
        prop_assert!(stats.errors as usize <= bound);
    }
}

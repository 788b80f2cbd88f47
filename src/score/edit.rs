//! Categorized Levenshtein edit distance
//!
//! A generic scalar distance is not enough here: the final report breaks the
//! error rate into substitution, insertion, and deletion components, so the
//! minimal-cost path is traced back and each non-match step is categorized.

use crate::error::{EvalError, Result};

/// Edit counts from aligning one hypothesis against one reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditStats {
    /// Total edits: raw count, or divided by reference length when
    /// normalized.
    pub errors: f64,
    pub substitutions: usize,
    pub insertions: usize,
    pub deletions: usize,
}

/// Compute the edit distance between a reference and a hypothesis token
/// sequence with a SUB/INS/DEL breakdown.
///
/// Substitution, insertion, and deletion each cost 1; a match costs 0. With
/// `normalize` the total is divided by the reference length, which is
/// undefined for an empty reference and returns [`EvalError::EmptyReference`]
/// so the caller can skip the utterance instead of dividing by zero.
///
/// The back-trace resolves ties in a fixed order (match, then substitution,
/// then deletion, then insertion) so the category split is deterministic.
/// The total is always `substitutions + insertions + deletions` regardless
/// of tie-breaking.
pub fn compute_wer<T: AsRef<str>>(
    reference: &[T],
    hypothesis: &[T],
    normalize: bool,
) -> Result<EditStats> {
    let m = reference.len();
    let n = hypothesis.len();
    if normalize && m == 0 {
        return Err(EvalError::EmptyReference);
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }
    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(reference[i - 1].as_ref() != hypothesis[j - 1].as_ref());
            dp[i][j] = (dp[i - 1][j] + 1) // deletion
                .min(dp[i][j - 1] + 1) // insertion
                .min(dp[i - 1][j - 1] + cost); // substitution or match
        }
    }

    let (mut i, mut j) = (m, n);
    let (mut substitutions, mut insertions, mut deletions) = (0usize, 0usize, 0usize);
    while i > 0 || j > 0 {
        let matched = i > 0
            && j > 0
            && reference[i - 1].as_ref() == hypothesis[j - 1].as_ref()
            && dp[i][j] == dp[i - 1][j - 1];
        if matched {
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && dp[i][j] == dp[i - 1][j - 1] + 1 {
            substitutions += 1;
            i -= 1;
            j -= 1;
        } else if i > 0 && dp[i][j] == dp[i - 1][j] + 1 {
            deletions += 1;
            i -= 1;
        } else {
            insertions += 1;
            j -= 1;
        }
    }
    let total = dp[m][n];
    debug_assert_eq!(total, substitutions + insertions + deletions);

    let errors = if normalize {
        total as f64 / m as f64
    } else {
        total as f64
    };
    Ok(EditStats {
        errors,
        substitutions,
        insertions,
        deletions,
    })
}

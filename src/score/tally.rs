//! Running error accumulation and the final aggregate report
//!
//! The tally is an owned value threaded through the batch loop rather than
//! module-level state, so the evaluation driver stays reentrant and the
//! accumulation logic can be tested in isolation.

use std::fmt;

use crate::error::{EvalError, Result};
use crate::score::edit::EditStats;

/// Running sums over one evaluation pass.
#[derive(Debug, Default, Clone)]
pub struct ErrorTally {
    errors: f64,
    substitutions: usize,
    insertions: usize,
    deletions: usize,
    ref_tokens: usize,
    scored: usize,
    skipped: usize,
}

impl ErrorTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold one utterance's raw counts into the running totals.
    pub fn accumulate(&mut self, stats: &EditStats, ref_len: usize) {
        self.errors += stats.errors;
        self.substitutions += stats.substitutions;
        self.insertions += stats.insertions;
        self.deletions += stats.deletions;
        self.ref_tokens += ref_len;
        self.scored += 1;
    }

    /// Record an utterance excluded from the tally. Its tokens never enter
    /// the denominator.
    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    pub fn scored(&self) -> usize {
        self.scored
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn ref_tokens(&self) -> usize {
        self.ref_tokens
    }

    /// Normalize the sums by the accumulated reference-token count. Called
    /// once, at the end of a full pass.
    pub fn finalize(&self) -> Result<WerReport> {
        if self.ref_tokens == 0 {
            return Err(EvalError::EmptyEvaluation);
        }
        let denom = self.ref_tokens as f64;
        Ok(WerReport {
            wer: self.errors / denom,
            substitutions: self.substitutions as f64 / denom,
            insertions: self.insertions as f64 / denom,
            deletions: self.deletions as f64 / denom,
        })
    }
}

/// Aggregate error rates over one pass, as fractions of the reference
/// token count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WerReport {
    pub wer: f64,
    pub substitutions: f64,
    pub insertions: f64,
    pub deletions: f64,
}

impl fmt::Display for WerReport {
    /// One-row table keyed `WER` with SUB/INS/DEL percentages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<6} {:>8} {:>8} {:>8}", "", "SUB", "INS", "DEL")?;
        write!(
            f,
            "{:<6} {:>8.2} {:>8.2} {:>8.2}",
            "WER",
            self.substitutions * 100.0,
            self.insertions * 100.0,
            self.deletions * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stats(errors: f64, substitutions: usize, insertions: usize, deletions: usize) -> EditStats {
        EditStats {
            errors,
            substitutions,
            insertions,
            deletions,
        }
    }

    #[test]
    fn test_accumulate_and_finalize() {
        let mut tally = ErrorTally::new();
        tally.accumulate(&stats(2.0, 1, 1, 0), 4);
        tally.accumulate(&stats(1.0, 0, 0, 1), 6);

        let report = tally.finalize().unwrap();
        assert_relative_eq!(report.wer, 3.0 / 10.0);
        assert_relative_eq!(report.substitutions, 1.0 / 10.0);
        assert_relative_eq!(report.insertions, 1.0 / 10.0);
        assert_relative_eq!(report.deletions, 1.0 / 10.0);
        assert_eq!(tally.scored(), 2);
        assert_eq!(tally.ref_tokens(), 10);
    }

    #[test]
    fn test_skipped_utterances_do_not_enter_denominator() {
        let mut tally = ErrorTally::new();
        tally.accumulate(&stats(1.0, 1, 0, 0), 5);
        tally.skip();
        tally.skip();

        assert_eq!(tally.skipped(), 2);
        assert_eq!(tally.ref_tokens(), 5);
        let report = tally.finalize().unwrap();
        assert_relative_eq!(report.wer, 1.0 / 5.0);
    }

    #[test]
    fn test_finalize_without_tokens_is_an_error() {
        let tally = ErrorTally::new();
        assert!(matches!(
            tally.finalize().unwrap_err(),
            EvalError::EmptyEvaluation
        ));
    }

    #[test]
    fn test_reset() {
        let mut tally = ErrorTally::new();
        tally.accumulate(&stats(2.0, 2, 0, 0), 3);
        tally.reset();
        assert_eq!(tally.scored(), 0);
        assert_eq!(tally.ref_tokens(), 0);
    }

    #[test]
    fn test_report_table_layout() {
        let report = WerReport {
            wer: 0.062,
            substitutions: 0.042,
            insertions: 0.011,
            deletions: 0.009,
        };
        let rendered = report.to_string();
        let mut lines = rendered.lines();
        let header = lines.next().unwrap();
        let row = lines.next().unwrap();
        assert!(header.contains("SUB") && header.contains("INS") && header.contains("DEL"));
        assert!(row.starts_with("WER"));
        assert!(row.contains("4.20"));
        assert!(row.contains("1.10"));
        assert!(row.contains("0.90"));
    }
}

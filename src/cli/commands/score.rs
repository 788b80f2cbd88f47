//! Corpus-level scoring of transcript files
//!
//! The only evaluation expressible without a live model: two line-parallel
//! text files, reference and hypothesis, scored with the same normalization
//! and tally the model driver uses.

use std::fs;

use crate::cli::logging::{log, LogLevel};
use crate::config::ScoreArgs;
use crate::score::edit::compute_wer;
use crate::score::normalize;
use crate::score::tally::ErrorTally;
use crate::score::ScoringUnit;
use crate::vocab::WORD_BOUNDARY;

pub fn run_score(args: ScoreArgs, level: LogLevel) -> Result<(), String> {
    let reference = fs::read_to_string(&args.reference)
        .map_err(|e| format!("{}: {e}", args.reference.display()))?;
    let hypothesis = fs::read_to_string(&args.hypothesis)
        .map_err(|e| format!("{}: {e}", args.hypothesis.display()))?;

    let refs: Vec<&str> = reference.lines().collect();
    let hyps: Vec<&str> = hypothesis.lines().collect();
    if refs.len() != hyps.len() {
        return Err(format!(
            "line count mismatch: {} reference lines vs {} hypothesis lines",
            refs.len(),
            hyps.len()
        ));
    }

    let unit = if args.characters {
        ScoringUnit::Character
    } else {
        ScoringUnit::Word
    };

    let mut tally = ErrorTally::new();
    for (i, (reference, hypothesis)) in refs.iter().zip(&hyps).enumerate() {
        let reference = prepare(reference);
        let hypothesis = prepare(hypothesis);
        let ref_units = normalize::split_units(&reference, unit);
        let hyp_units = normalize::split_units(&hypothesis, unit);

        if ref_units.is_empty() {
            tally.skip();
            log(level, LogLevel::Verbose, &format!("line {}: skipped", i + 1));
            continue;
        }
        match compute_wer(&ref_units, &hyp_units, false) {
            Ok(stats) => {
                if args.per_utt {
                    log(
                        level,
                        LogLevel::Normal,
                        &format!(
                            "line {}: {}: {:.3} %",
                            i + 1,
                            unit.label(),
                            stats.errors / ref_units.len() as f64 * 100.0
                        ),
                    );
                }
                tally.accumulate(&stats, ref_units.len());
            }
            Err(_) => tally.skip(),
        }
    }

    let report = tally.finalize().map_err(|e| e.to_string())?;
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "{} utterances scored, {} skipped",
            tally.scored(),
            tally.skipped()
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("{}: {:.3} %", unit.label(), report.wer * 100.0),
    );
    log(level, LogLevel::Normal, &report.to_string());
    Ok(())
}

/// Transcript files use spaces between words; fold them onto the internal
/// boundary marker before normalization.
fn prepare(line: &str) -> String {
    let line = line.trim().replace(' ', &WORD_BOUNDARY.to_string());
    normalize::collapse_boundaries(&normalize::strip_noise(&line))
}

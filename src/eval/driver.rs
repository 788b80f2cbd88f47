//! One-pass evaluation driver: decode, reconstruct, normalize, score
//!
//! The loop pulls batches to epoch exhaustion, routes each through the
//! decoding strategy selected up front, realigns references by the
//! decoder's permutation, and folds per-utterance edit counts into an
//! owned [`ErrorTally`]. Per-utterance scoring failures skip that
//! utterance; a single malformed transcript must not abort a multi-hour
//! run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::progress::Progress;
use crate::data::{apply_perm, Dataset, Reference};
use crate::decode::{DecodeConfig, DecodeOutput, Decoder, Model};
use crate::error::{EvalError, Result};
use crate::resolve::resolve_unk;
use crate::score::edit::compute_wer;
use crate::score::normalize;
use crate::score::tally::{ErrorTally, WerReport};
use crate::score::ScoringUnit;
use crate::vocab::{VocabMap, OOV_MARKER, SPLICE_MARKER};

/// Settings for one evaluation pass, independent of any training settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    /// Beam width for decoding; 1 disables beam search.
    pub beam_width: usize,
    pub max_decode_len: usize,
    pub max_decode_len_sub: usize,
    /// Batch size for evaluation; `None` leaves it to the dataset.
    pub batch_size: Option<usize>,
    /// Resolve OOV placeholders against the sub-task hypothesis.
    pub resolving_unk: bool,
    pub progressbar: bool,
    /// Blank class index for greedy CTC decoding of ensembled posteriors.
    pub blank_index: u32,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            beam_width: 1,
            max_decode_len: 100,
            max_decode_len_sub: 100,
            batch_size: None,
            resolving_unk: false,
            progressbar: false,
            blank_index: 0,
        }
    }
}

impl EvalOptions {
    /// Load options from a YAML file; absent keys keep their defaults.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        serde_yaml::from_str(&raw).map_err(|source| EvalError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Evaluate word error rate over one full dataset pass.
///
/// Returns the scalar WER as a fraction plus the SUB/INS/DEL report.
pub fn eval_wer(
    models: &[Box<dyn Model>],
    dataset: &mut dyn Dataset,
    options: &EvalOptions,
) -> Result<(f64, WerReport)> {
    run_pass(models, dataset, options, ScoringUnit::Word)
}

/// Evaluate character error rate over one full dataset pass.
pub fn eval_cer(
    models: &[Box<dyn Model>],
    dataset: &mut dyn Dataset,
    options: &EvalOptions,
) -> Result<(f64, WerReport)> {
    run_pass(models, dataset, options, ScoringUnit::Character)
}

fn run_pass(
    models: &[Box<dyn Model>],
    dataset: &mut dyn Dataset,
    options: &EvalOptions,
    unit: ScoringUnit,
) -> Result<(f64, WerReport)> {
    dataset.reset();

    let vocab = VocabMap::load(dataset.vocab_path())?;
    let sub_vocab = if options.resolving_unk {
        let path = dataset.sub_vocab_path().ok_or(EvalError::MissingSubVocab)?;
        Some(VocabMap::load(path)?)
    } else {
        None
    };

    let decoder = Decoder::select(models)?;
    let attention_style = decoder.model_type().is_attention();
    let config = DecodeConfig {
        beam_width: options.beam_width,
        max_decode_len: options.max_decode_len,
        max_decode_len_sub: options.max_decode_len_sub,
        task: 0,
        resolving_unk: options.resolving_unk,
    };

    let mut tally = ErrorTally::new();
    let mut progress = Progress::new(dataset.len(), options.progressbar);

    loop {
        let (batch, is_new_epoch) = dataset.next(options.batch_size)?;
        let output = decoder.decode_batch(&batch, &config, options.blank_index)?;

        // Hypothesis i must be scored against reference perm[i].
        let ys = apply_perm(&batch.ys, &output.perm);
        let y_lens = apply_perm(&batch.y_lens, &output.perm);

        for b in 0..batch.len() {
            let hyp = reconstruct_hypothesis(&vocab, &output, b, attention_style)?;
            let hyp = match (&sub_vocab, &output.sub_hyps, &output.attention, &output.sub_attention) {
                (Some(sub_vocab), Some(sub_hyps), Some(attn), Some(attn_sub))
                    if hyp.contains(OOV_MARKER) =>
                {
                    let mut resolved = resolve_unk(
                        &hyp,
                        &sub_hyps[b],
                        attn[b].view(),
                        attn_sub[b].view(),
                        sub_vocab,
                    )?;
                    resolved.retain(|c| c != SPLICE_MARKER);
                    resolved
                }
                _ => hyp,
            };

            let ref_text = match &ys[b] {
                // Test splits carry the transcript itself, already
                // boundary-separated.
                Reference::Text(text) => text.clone(),
                Reference::Indices(indices) => {
                    let len = y_lens[b].min(indices.len());
                    vocab.reconstruct(&indices[..len])?
                }
            };

            let ref_text = normalize::collapse_boundaries(&normalize::strip_noise(&ref_text));
            let hyp_text = normalize::collapse_boundaries(&normalize::strip_noise(&hyp));

            let ref_units = normalize::split_units(&ref_text, unit);
            let hyp_units = normalize::split_units(&hyp_text, unit);

            if ref_units.is_empty() {
                tally.skip();
            } else {
                // Raw counts here; normalization happens once, over the
                // whole pass.
                match compute_wer(&ref_units, &hyp_units, false) {
                    Ok(stats) => tally.accumulate(&stats, ref_units.len()),
                    Err(_) => tally.skip(),
                }
            }
            progress.update(1);
        }

        if is_new_epoch {
            break;
        }
    }
    progress.finish();

    // Leave the cursor ready for the next caller.
    dataset.reset();

    let report = tally.finalize()?;
    Ok((report.wer, report))
}

/// Reconstruct one hypothesis and apply the attention-family cleanup:
/// truncate at the first EOS and drop the boundary it leaves behind.
pub(super) fn reconstruct_hypothesis(
    vocab: &VocabMap,
    output: &DecodeOutput,
    index: usize,
    attention_style: bool,
) -> Result<String> {
    let text = vocab.reconstruct(&output.hyps[index])?;
    if attention_style {
        let truncated = normalize::truncate_at_eos(&text);
        Ok(normalize::strip_trailing_boundary(truncated).to_owned())
    } else {
        Ok(text)
    }
}

//! Per-utterance transcription dump for manual inspection
//!
//! Free-text output, not a machine contract: one block per utterance with
//! the reference, the hypothesis, and the per-utterance error rate.

use std::io::Write;

use super::driver::{reconstruct_hypothesis, EvalOptions};
use crate::data::{apply_perm, Dataset, Reference};
use crate::decode::{DecodeConfig, Decoder, Model};
use crate::error::Result;
use crate::score::edit::compute_wer;
use crate::score::normalize;
use crate::score::ScoringUnit;
use crate::vocab::{VocabMap, WORD_BOUNDARY};

/// Decode one full pass and print each utterance's reference, hypothesis,
/// and error rate to `out`.
pub fn dump_hypotheses(
    models: &[Box<dyn Model>],
    dataset: &mut dyn Dataset,
    options: &EvalOptions,
    unit: ScoringUnit,
    out: &mut dyn Write,
) -> Result<()> {
    dataset.reset();

    let vocab = VocabMap::load(dataset.vocab_path())?;
    let decoder = Decoder::select(models)?;
    let attention_style = decoder.model_type().is_attention();
    let config = DecodeConfig {
        beam_width: options.beam_width,
        max_decode_len: options.max_decode_len,
        max_decode_len_sub: options.max_decode_len_sub,
        ..DecodeConfig::default()
    };

    loop {
        let (batch, is_new_epoch) = dataset.next(options.batch_size)?;
        let output = decoder.decode_batch(&batch, &config, options.blank_index)?;

        let ys = apply_perm(&batch.ys, &output.perm);
        let y_lens = apply_perm(&batch.y_lens, &output.perm);
        let names = apply_perm(&batch.names, &output.perm);

        for b in 0..batch.len() {
            let hyp = reconstruct_hypothesis(&vocab, &output, b, attention_style)?;
            let ref_text = match &ys[b] {
                Reference::Text(text) => text.clone(),
                Reference::Indices(indices) => {
                    let len = y_lens[b].min(indices.len());
                    vocab.reconstruct(&indices[..len])?
                }
            };

            writeln!(out, "----- wav: {} -----", names[b])?;
            writeln!(out, "Ref: {}", ref_text.replace(WORD_BOUNDARY, " "))?;
            writeln!(out, "Hyp: {}", hyp.replace(WORD_BOUNDARY, " "))?;

            let ref_norm = normalize::collapse_boundaries(&normalize::strip_noise(&ref_text));
            let hyp_norm = normalize::collapse_boundaries(&normalize::strip_noise(&hyp));
            let ref_units = normalize::split_units(&ref_norm, unit);
            let hyp_units = normalize::split_units(&hyp_norm, unit);

            if ref_units.is_empty() {
                writeln!(out, "--- skipped ---")?;
                continue;
            }
            match compute_wer(&ref_units, &hyp_units, true) {
                Ok(stats) => writeln!(out, "{}: {:.3} %", unit.label(), stats.errors * 100.0)?,
                Err(_) => writeln!(out, "--- skipped ---")?,
            }
        }

        if is_new_epoch {
            break;
        }
    }

    dataset.reset();
    Ok(())
}

//! Posterior averaging across CTC models and greedy decoding

use ndarray::ArrayView2;

use super::{DecodeOutput, Model, Posteriors};
use crate::data::Batch;
use crate::error::{EvalError, Result};

/// Fuse several CTC models over one batch: arithmetic-average their
/// per-utterance posterior matrices elementwise and greedy-decode the
/// result once (beam width fixed to 1).
///
/// Shapes must match exactly across models; a mismatch is a fatal
/// precondition violation, never a broadcast. The permutation and frame
/// lengths are taken from the first model.
pub fn ensemble_decode(
    models: &[Box<dyn Model>],
    batch: &Batch,
    blank: u32,
) -> Result<DecodeOutput> {
    debug_assert!(!models.is_empty());

    let first = models[0].posteriors(batch)?;
    let mut averaged = first.probs;
    for model in &models[1..] {
        let Posteriors { probs, .. } = model.posteriors(batch)?;
        if probs.len() != averaged.len() {
            return Err(EvalError::BatchSizeMismatch {
                expected: averaged.len(),
                got: probs.len(),
            });
        }
        for (acc, p) in averaged.iter_mut().zip(&probs) {
            if acc.dim() != p.dim() {
                let (expected_rows, expected_cols) = acc.dim();
                let (rows, cols) = p.dim();
                return Err(EvalError::ShapeMismatch {
                    expected_rows,
                    expected_cols,
                    rows,
                    cols,
                });
            }
            *acc += p;
        }
    }

    let scale = 1.0 / models.len() as f32;
    let hyps = averaged
        .iter_mut()
        .zip(&first.lengths)
        .map(|(probs, &frames)| {
            *probs *= scale;
            greedy_ctc_decode(probs.view(), frames, blank)
        })
        .collect();

    Ok(DecodeOutput {
        hyps,
        attention: None,
        sub_hyps: None,
        sub_attention: None,
        perm: first.perm,
    })
}

/// Greedy CTC decode of one utterance's posteriors: per-frame argmax (first
/// maximal class on ties), collapse of consecutive repeats, blank removal.
pub fn greedy_ctc_decode(probs: ArrayView2<f32>, frames: usize, blank: u32) -> Vec<u32> {
    let frames = frames.min(probs.nrows());
    let mut out = Vec::new();
    let mut prev: Option<u32> = None;
    for t in 0..frames {
        let mut best = 0u32;
        let mut best_val = f32::NEG_INFINITY;
        for (k, &v) in probs.row(t).iter().enumerate() {
            if v > best_val {
                best = k as u32;
                best_val = v;
            }
        }
        if prev != Some(best) && best != blank {
            out.push(best);
        }
        prev = Some(best);
    }
    out
}

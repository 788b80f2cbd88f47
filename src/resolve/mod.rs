//! Out-of-vocabulary resolution via cross-attention realignment
//!
//! The word-level decoder emits an OOV placeholder for words it cannot
//! spell. Each placeholder is realigned through two attention tables: the
//! main-task row at the placeholder's output step points at an input frame,
//! and the sub-task step whose own attention peaks nearest that frame
//! supplies a character-level spelling.
//!
//! Resolution is best-effort. Degenerate attention rows (uniform, all-zero)
//! still have a well-defined argmax (the first maximal index), so the
//! substitution is deterministic even when it is semantically wrong.

use ndarray::{ArrayView1, ArrayView2};

use crate::error::Result;
use crate::vocab::{VocabMap, OOV_MARKER, SPLICE_MARKER, WORD_BOUNDARY};

fn argmax(row: ArrayView1<f32>) -> usize {
    let mut best = 0;
    let mut best_val = f32::NEG_INFINITY;
    for (i, &v) in row.iter().enumerate() {
        if v > best_val {
            best = i;
            best_val = v;
        }
    }
    best
}

/// Replace each OOV marker in `hyp` with the sub-task spelling aligned to
/// it, wrapped in splice markers for the caller to strip.
///
/// Pure function of the hypothesis pair and the (immutable) attention
/// matrices: `attn_main` is output step x input step, `attn_sub` is
/// sub-output step x input step. Markers whose output step lies beyond the
/// attention rows are left untouched.
pub fn resolve_unk(
    hyp: &str,
    sub_hyp: &[u32],
    attn_main: ArrayView2<f32>,
    attn_sub: ArrayView2<f32>,
    sub_vocab: &VocabMap,
) -> Result<String> {
    // Peak input frame of every sub-task step, computed once.
    let sub_peaks: Vec<usize> = (0..attn_sub.nrows())
        .map(|s| argmax(attn_sub.row(s)))
        .collect();

    let mut resolved: Vec<String> = Vec::new();
    for (step, token) in hyp.split(WORD_BOUNDARY).enumerate() {
        if token != OOV_MARKER || step >= attn_main.nrows() || sub_peaks.is_empty() {
            resolved.push(token.to_owned());
            continue;
        }

        let frame = argmax(attn_main.row(step));

        // Sub step whose peak lies nearest the attended frame; the first
        // one wins ties.
        let mut best = 0usize;
        let mut best_dist = usize::MAX;
        for (s, &peak) in sub_peaks.iter().enumerate() {
            let dist = peak.abs_diff(frame);
            if dist < best_dist {
                best = s;
                best_dist = dist;
            }
        }

        // Extend to the contiguous run of sub steps sharing that peak
        // frame, so multi-character spellings come out whole.
        let peak = sub_peaks[best];
        let mut lo = best;
        while lo > 0 && sub_peaks[lo - 1] == peak {
            lo -= 1;
        }
        let mut hi = best;
        while hi + 1 < sub_peaks.len() && sub_peaks[hi + 1] == peak {
            hi += 1;
        }

        if lo >= sub_hyp.len() {
            resolved.push(token.to_owned());
            continue;
        }
        let hi = hi.min(sub_hyp.len() - 1);
        let spelling = sub_vocab.reconstruct_chars(&sub_hyp[lo..=hi])?;
        resolved.push(format!("{SPLICE_MARKER}{spelling}{SPLICE_MARKER}"));
    }

    let mut out = String::new();
    for (i, token) in resolved.iter().enumerate() {
        if i > 0 {
            out.push(WORD_BOUNDARY);
        }
        out.push_str(token);
    }
    Ok(out)
}

//! Evaluation drivers: WER/CER over one full dataset pass
//!
//! `eval_wer`/`eval_cer` run the scoring pipeline end to end: batched
//! decoding (with posterior ensembling when several models are supplied),
//! text reconstruction, OOV resolution, normalization, and categorized
//! edit-distance accumulation. `dump_hypotheses` prints per-utterance
//! transcripts for manual inspection.

mod driver;
mod dump;
mod progress;


pub use driver::{eval_cer, eval_wer, EvalOptions};
pub use dump::dump_hypotheses;
pub use progress::Progress;

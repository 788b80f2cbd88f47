//! # evaluar
//!
//! Evaluation harness for sequence-to-sequence and CTC speech recognition
//! models: drives trained models over held-out batches, reconstructs text
//! from label indices, and reports Word/Character Error Rate with a
//! substitution/insertion/deletion breakdown.
//!
//! ## Architecture
//!
//! - `vocab`: label-index <-> token tables and text reconstruction
//! - `score`: categorized edit distance, normalization, error tallying
//! - `resolve`: OOV placeholder resolution via cross-attention realignment
//! - `decode`: model interface, decoding strategies, posterior ensembling
//! - `eval`: the one-pass evaluation driver and per-utterance dump
//! - `data`: the consumed dataset interface and batch types
//!
//! Model internals (beam search, architecture, device placement) and
//! dataset construction stay outside the crate; both are consumed through
//! the small [`Model`] and [`Dataset`] traits.
//!
//! ## Example
//!
//! ```ignore
//! use evaluar::{eval_wer, EvalOptions};
//!
//! let options = EvalOptions { beam_width: 4, ..EvalOptions::default() };
//! let (wer, report) = eval_wer(&models, &mut dataset, &options)?;
//! println!("WER: {:.3} %", wer * 100.0);
//! println!("{report}");
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod decode;
pub mod error;
pub mod eval;
pub mod resolve;
pub mod score;
pub mod vocab;

pub use data::{apply_perm, Batch, Dataset, Reference};
pub use decode::{
    ensemble_decode, greedy_ctc_decode, DecodeConfig, DecodeOutput, Decoder, Model, ModelType,
    Posteriors,
};
pub use error::{EvalError, Result};
pub use eval::{dump_hypotheses, eval_cer, eval_wer, EvalOptions};
pub use resolve::resolve_unk;
pub use score::{compute_wer, EditStats, ErrorTally, ScoringUnit, WerReport};
pub use vocab::VocabMap;

//! Error taxonomy for evaluation runs
//!
//! Precondition violations (ensembling non-CTC models, mismatched posterior
//! shapes) and vocabulary lookup failures are fatal: they indicate a
//! misconfigured run, not transient data. Per-utterance scoring failures
//! (`EmptyReference`) are caught inside the batch loop and only skip the
//! offending utterance.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::decode::ModelType;

/// Errors raised by the evaluation pipeline
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("no models supplied for decoding")]
    NoModels,

    #[error("ensembling requires CTC models, found {0:?}")]
    NonCtcEnsemble(ModelType),

    #[error("posterior shape mismatch across models: expected {expected_rows}x{expected_cols}, got {rows}x{cols}")]
    ShapeMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("models disagree on batch size: {expected} vs {got}")]
    BatchSizeMismatch { expected: usize, got: usize },

    #[error("label index {index} outside vocabulary of {size} entries")]
    IndexOutOfVocab { index: u32, size: usize },

    #[error("duplicate token {token:?} in vocabulary at index {index}")]
    DuplicateToken { token: String, index: u32 },

    #[error("failed to read vocabulary file {path:?}: {source}")]
    VocabIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("OOV resolution requested but the dataset provides no sub-task vocabulary")]
    MissingSubVocab,

    #[error("cannot normalize against an empty reference")]
    EmptyReference,

    #[error("no reference tokens accumulated over the pass")]
    EmptyEvaluation,

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error("model error: {0}")]
    Model(String),

    #[error("failed to parse config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type for evaluation operations
pub type Result<T> = std::result::Result<T, EvalError>;

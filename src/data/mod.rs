//! Dataset collaborator interface and batch types
//!
//! Dataset construction (feature extraction, splicing, sorting) lives
//! outside this crate; the driver only consumes the small cursor interface
//! below.

use std::path::Path;

use ndarray::Array2;

use crate::error::Result;

/// Reference transcription for one utterance.
#[derive(Debug, Clone)]
pub enum Reference {
    /// Label indices into the main vocabulary.
    Indices(Vec<u32>),
    /// Pre-tokenized boundary-separated text, as held-out test splits
    /// provide it.
    Text(String),
}

/// One batch of utterances. The driver reads it, never mutates it.
#[derive(Debug, Default, Clone)]
pub struct Batch {
    /// Input feature sequences, frames x dims per utterance.
    pub xs: Vec<Array2<f32>>,
    pub x_lens: Vec<usize>,
    pub ys: Vec<Reference>,
    pub y_lens: Vec<usize>,
    pub names: Vec<String>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

/// Dataset cursor with epoch-boundary reporting.
///
/// The driver calls `reset` both before and after a pass, so repeated
/// evaluation calls on the same dataset are idempotent with respect to
/// cursor position.
pub trait Dataset {
    /// Rewind the cursor to the first utterance.
    fn reset(&mut self);

    /// Pull the next batch. The flag is true when this pull crossed an
    /// epoch boundary.
    fn next(&mut self, batch_size: Option<usize>) -> Result<(Batch, bool)>;

    /// Whether references arrive as pre-tokenized text.
    fn is_test(&self) -> bool;

    /// Output class count, excluding blank and sequence markers.
    fn num_classes(&self) -> usize;

    /// Utterance count, for progress reporting.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Main-task vocabulary file.
    fn vocab_path(&self) -> &Path;

    /// Sub-task (finer-grained) vocabulary file, when the dataset carries
    /// one.
    fn sub_vocab_path(&self) -> Option<&Path> {
        None
    }
}

/// Reorder per-utterance data by a decoder permutation: `out[i] =
/// items[perm[i]]`, so hypothesis `i` is scored against reference
/// `perm[i]`.
pub fn apply_perm<T: Clone>(items: &[T], perm: &[usize]) -> Vec<T> {
    perm.iter().map(|&i| items[i].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_perm_reorders() {
        let items = ["a", "b", "c"];
        assert_eq!(apply_perm(&items, &[2, 0, 1]), ["c", "a", "b"]);
    }

    #[test]
    fn test_apply_perm_identity() {
        let items = [10, 20, 30];
        assert_eq!(apply_perm(&items, &[0, 1, 2]), [10, 20, 30]);
    }
}

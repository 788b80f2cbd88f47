//! Vocabulary tables and text reconstruction
//!
//! A [`VocabMap`] is a bidirectional label-index <-> token table built once
//! from a vocabulary file (one token per line, line number = index) and
//! immutable thereafter. Reconstruction is a pure function of the index
//! sequence and the table: word-level tables join tokens with the reserved
//! boundary marker, character-level tables concatenate.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{EvalError, Result};

/// Reserved word-boundary marker in reconstructed text.
pub const WORD_BOUNDARY: char = '_';

/// Placeholder the word-level decoder emits for words it cannot spell.
pub const OOV_MARKER: &str = "OOV";

/// End-of-sequence marker emitted by attention decoders.
pub const EOS_MARKER: char = '>';

/// Delimits spliced-in sub-task spellings; stripped after OOV resolution.
pub const SPLICE_MARKER: char = '*';

/// Bidirectional label-index <-> token table.
#[derive(Debug, Clone)]
pub struct VocabMap {
    tokens: Vec<String>,
    indices: HashMap<String, u32>,
}

impl VocabMap {
    /// Load a vocabulary file: one token per line, index = line number.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| EvalError::VocabIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_tokens(raw.lines().map(|line| line.trim_end_matches('\r')))
    }

    /// Build a table from an ordered token sequence.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Vec::new();
        let mut indices = HashMap::new();
        for token in tokens {
            let token = token.into();
            let index = table.len() as u32;
            if indices.insert(token.clone(), index).is_some() {
                return Err(EvalError::DuplicateToken { token, index });
            }
            table.push(token);
        }
        Ok(Self {
            tokens: table,
            indices,
        })
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token for a label index; out-of-domain indices are a fatal error.
    pub fn token(&self, index: u32) -> Result<&str> {
        self.tokens
            .get(index as usize)
            .map(String::as_str)
            .ok_or(EvalError::IndexOutOfVocab {
                index,
                size: self.tokens.len(),
            })
    }

    /// Label index for a token, if present.
    pub fn index(&self, token: &str) -> Option<u32> {
        self.indices.get(token).copied()
    }

    /// Reconstruct word-level text: tokens joined by the boundary marker.
    pub fn reconstruct(&self, indices: &[u32]) -> Result<String> {
        let mut out = String::new();
        for (i, &index) in indices.iter().enumerate() {
            if i > 0 {
                out.push(WORD_BOUNDARY);
            }
            out.push_str(self.token(index)?);
        }
        Ok(out)
    }

    /// Reconstruct character-level text: tokens concatenated, with the
    /// boundary marker itself a regular vocabulary entry denoting a space.
    pub fn reconstruct_chars(&self, indices: &[u32]) -> Result<String> {
        let mut out = String::new();
        for &index in indices {
            out.push_str(self.token(index)?);
        }
        Ok(out)
    }
}

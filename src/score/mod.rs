//! Scoring: categorized edit distance, text normalization, and error
//! accumulation over a dataset pass.

pub mod edit;
pub mod normalize;
pub mod tally;

pub use edit::{compute_wer, EditStats};
pub use tally::{ErrorTally, WerReport};

/// Token granularity for scoring.
///
/// Word units split on the boundary marker (WER); character units drop the
/// marker and score individual characters (CER).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoringUnit {
    Word,
    Character,
}

impl ScoringUnit {
    /// Report label for this granularity.
    pub fn label(self) -> &'static str {
        match self {
            ScoringUnit::Word => "WER",
            ScoringUnit::Character => "CER",
        }
    }
}

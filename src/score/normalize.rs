//! Text post-processing applied to references and hypotheses before scoring

use std::sync::LazyLock;

use regex::Regex;

use crate::score::ScoringUnit;
use crate::vocab::{EOS_MARKER, WORD_BOUNDARY};

// `@` marks short pauses, `>` end-of-sequence; both are noise for scoring.
static NOISE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[@>]+").expect("valid regex"));
static BOUNDARY_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").expect("valid regex"));

/// Truncate at the first end-of-sequence marker. Attention decoders pad
/// beyond it; CTC output never contains it.
pub fn truncate_at_eos(text: &str) -> &str {
    match text.find(EOS_MARKER) {
        Some(pos) => &text[..pos],
        None => text,
    }
}

/// Drop a single trailing boundary marker left over by EOS truncation.
pub fn strip_trailing_boundary(text: &str) -> &str {
    text.strip_suffix(WORD_BOUNDARY).unwrap_or(text)
}

/// Remove noise labels.
pub fn strip_noise(text: &str) -> String {
    NOISE.replace_all(text, "").into_owned()
}

/// Collapse runs of the boundary marker to a single occurrence.
pub fn collapse_boundaries(text: &str) -> String {
    BOUNDARY_RUN.replace_all(text, "_").into_owned()
}

/// Split normalized text into atomic scoring units. Empty units are dropped,
/// so fully-noise utterances come back empty and the caller can skip them.
pub fn split_units(text: &str, unit: ScoringUnit) -> Vec<String> {
    match unit {
        ScoringUnit::Word => text
            .split(WORD_BOUNDARY)
            .filter(|w| !w.is_empty())
            .map(str::to_owned)
            .collect(),
        ScoringUnit::Character => text
            .chars()
            .filter(|&c| c != WORD_BOUNDARY)
            .map(String::from)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_at_eos() {
        assert_eq!(truncate_at_eos("the_cat_>pad_pad"), "the_cat_");
        assert_eq!(truncate_at_eos("no_eos_here"), "no_eos_here");
        assert_eq!(truncate_at_eos(">"), "");
    }

    #[test]
    fn test_strip_trailing_boundary() {
        assert_eq!(strip_trailing_boundary("the_cat_"), "the_cat");
        assert_eq!(strip_trailing_boundary("the_cat"), "the_cat");
        assert_eq!(strip_trailing_boundary(""), "");
    }

    #[test]
    fn test_strip_noise() {
        assert_eq!(strip_noise("the@_cat>>"), "the_cat");
        assert_eq!(strip_noise("@>@"), "");
        assert_eq!(strip_noise("clean"), "clean");
    }

    #[test]
    fn test_collapse_boundaries() {
        assert_eq!(collapse_boundaries("the___cat__sat"), "the_cat_sat");
        assert_eq!(collapse_boundaries("the_cat"), "the_cat");
    }

    #[test]
    fn test_split_words_drops_empties() {
        assert_eq!(split_units("the_cat", ScoringUnit::Word), ["the", "cat"]);
        assert_eq!(split_units("_the__cat_", ScoringUnit::Word), ["the", "cat"]);
        assert!(split_units("", ScoringUnit::Word).is_empty());
        assert!(split_units("___", ScoringUnit::Word).is_empty());
    }

    #[test]
    fn test_split_characters_drops_boundaries() {
        assert_eq!(split_units("ab_c", ScoringUnit::Character), ["a", "b", "c"]);
        assert!(split_units("_", ScoringUnit::Character).is_empty());
    }
}

//! Model interface and decode orchestration
//!
//! The model is an opaque collaborator: beam search, architecture, and
//! device placement are out of scope. This module fixes the decode contract
//! and selects a decoding strategy once per evaluation run instead of
//! re-dispatching per utterance.

mod ensemble;

pub use ensemble::{ensemble_decode, greedy_ctc_decode};

use ndarray::Array2;

use crate::data::Batch;
use crate::error::{EvalError, Result};

/// Decoding paradigm of a trained model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelType {
    Ctc,
    Attention,
    /// Two aligned output sequences (word-level main task, character-level
    /// sub task) plus cross-attention between them.
    NestedAttention,
}

impl ModelType {
    /// Attention-family decoders emit an explicit end-of-sequence marker
    /// that must be truncated before scoring.
    pub fn is_attention(self) -> bool {
        matches!(self, ModelType::Attention | ModelType::NestedAttention)
    }
}

/// Decode-time settings, fixed for one evaluation pass.
#[derive(Clone, Debug)]
pub struct DecodeConfig {
    pub beam_width: usize,
    /// Stop prediction at this length when no EOS has been emitted.
    pub max_decode_len: usize,
    pub max_decode_len_sub: usize,
    /// Output head to decode for multi-task models (0 = main).
    pub task: usize,
    /// Request attention weights for OOV resolution.
    pub resolving_unk: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            beam_width: 1,
            max_decode_len: 100,
            max_decode_len_sub: 100,
            task: 0,
            resolving_unk: false,
        }
    }
}

/// Per-batch decode results.
///
/// `hyps[i]` is aligned with reference `perm[i]` of the originating batch;
/// applying the permutation to the reference side before scoring is a
/// correctness requirement, not an optimization.
#[derive(Debug, Default)]
pub struct DecodeOutput {
    pub hyps: Vec<Vec<u32>>,
    /// Main-task attention, output step x input step, one matrix per
    /// utterance.
    pub attention: Option<Vec<Array2<f32>>>,
    pub sub_hyps: Option<Vec<Vec<u32>>>,
    /// Sub-task attention, sub output step x input step.
    pub sub_attention: Option<Vec<Array2<f32>>>,
    pub perm: Vec<usize>,
}

/// Per-frame class posteriors for one batch, frames x classes per
/// utterance.
#[derive(Debug)]
pub struct Posteriors {
    pub probs: Vec<Array2<f32>>,
    pub lengths: Vec<usize>,
    pub perm: Vec<usize>,
}

/// Trained model collaborator.
pub trait Model {
    fn model_type(&self) -> ModelType;

    /// Run beam-search decoding over one batch.
    fn decode(&self, batch: &Batch, config: &DecodeConfig) -> Result<DecodeOutput>;

    /// Emit per-frame class posteriors, for ensembling.
    fn posteriors(&self, batch: &Batch) -> Result<Posteriors>;
}

/// Decoding strategy, selected once per evaluation run.
pub enum Decoder<'a> {
    /// One model, possibly decoding a second task head for OOV resolution.
    Single(&'a dyn Model),
    /// Several CTC models fused by posterior averaging.
    Ensemble(&'a [Box<dyn Model>]),
    /// One nested-attention model producing both granularities in one call.
    Hierarchical(&'a dyn Model),
}

impl<'a> Decoder<'a> {
    /// Pick the strategy for a model list, enforcing the ensembling
    /// preconditions up front: ensembling across decoding paradigms is not
    /// supported.
    pub fn select(models: &'a [Box<dyn Model>]) -> Result<Self> {
        match models {
            [] => Err(EvalError::NoModels),
            [model] => match model.model_type() {
                ModelType::NestedAttention => Ok(Decoder::Hierarchical(model.as_ref())),
                _ => Ok(Decoder::Single(model.as_ref())),
            },
            _ => {
                for model in models {
                    if model.model_type() != ModelType::Ctc {
                        return Err(EvalError::NonCtcEnsemble(model.model_type()));
                    }
                }
                Ok(Decoder::Ensemble(models))
            }
        }
    }

    /// Effective decoding paradigm of this strategy.
    pub fn model_type(&self) -> ModelType {
        match self {
            Decoder::Single(model) | Decoder::Hierarchical(model) => model.model_type(),
            Decoder::Ensemble(_) => ModelType::Ctc,
        }
    }

    /// Decode one batch.
    ///
    /// The single-model path runs a second decode over the sub task when
    /// OOV resolution is on; the hierarchical model returns both tasks in
    /// one call; the ensemble path averages posteriors and greedy-decodes
    /// once with the given blank index.
    pub fn decode_batch(
        &self,
        batch: &Batch,
        config: &DecodeConfig,
        blank: u32,
    ) -> Result<DecodeOutput> {
        match self {
            Decoder::Hierarchical(model) => model.decode(batch, config),
            Decoder::Single(model) => {
                let mut output = model.decode(batch, config)?;
                if config.resolving_unk {
                    let sub_config = DecodeConfig {
                        task: 1,
                        max_decode_len: config.max_decode_len_sub,
                        ..config.clone()
                    };
                    let sub = model.decode(batch, &sub_config)?;
                    output.sub_hyps = Some(sub.hyps);
                    output.sub_attention = sub.attention;
                }
                Ok(output)
            }
            Decoder::Ensemble(models) => ensemble_decode(models, batch, blank),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tagged(ModelType);

    impl Model for Tagged {
        fn model_type(&self) -> ModelType {
            self.0
        }

        fn decode(&self, _batch: &Batch, _config: &DecodeConfig) -> Result<DecodeOutput> {
            Ok(DecodeOutput::default())
        }

        fn posteriors(&self, _batch: &Batch) -> Result<Posteriors> {
            Ok(Posteriors {
                probs: vec![],
                lengths: vec![],
                perm: vec![],
            })
        }
    }

    fn boxed(kinds: &[ModelType]) -> Vec<Box<dyn Model>> {
        kinds
            .iter()
            .map(|&k| Box::new(Tagged(k)) as Box<dyn Model>)
            .collect()
    }

    #[test]
    fn test_select_rejects_empty_list() {
        let models = boxed(&[]);
        assert!(matches!(
            Decoder::select(&models).err(),
            Some(EvalError::NoModels)
        ));
    }

    #[test]
    fn test_select_single_and_hierarchical() {
        let models = boxed(&[ModelType::Attention]);
        assert!(matches!(
            Decoder::select(&models).unwrap(),
            Decoder::Single(_)
        ));

        let models = boxed(&[ModelType::NestedAttention]);
        assert!(matches!(
            Decoder::select(&models).unwrap(),
            Decoder::Hierarchical(_)
        ));
    }

    #[test]
    fn test_select_ensemble_requires_ctc() {
        let models = boxed(&[ModelType::Ctc, ModelType::Ctc]);
        assert!(matches!(
            Decoder::select(&models).unwrap(),
            Decoder::Ensemble(_)
        ));

        let models = boxed(&[ModelType::Ctc, ModelType::Attention]);
        assert!(matches!(
            Decoder::select(&models).err(),
            Some(EvalError::NonCtcEnsemble(ModelType::Attention))
        ));
    }

    #[test]
    fn test_attention_family_tag() {
        assert!(ModelType::Attention.is_attention());
        assert!(ModelType::NestedAttention.is_attention());
        assert!(!ModelType::Ctc.is_attention());
    }
}

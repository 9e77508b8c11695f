// ============================================================
// Layer 2 — Probe Use Case
// ============================================================
// Answers one question about a trained model:
//
//   "What probability does the model give WORD after a random
//    sequence of DISTANCE other words?"
//
// The random words are drawn from the kept vocabulary with WORD
// itself removed, so the sequence never contains the word being
// predicted.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::application::probing::random_sequence_probability;
use crate::data::tokenizer::WordTokenizer;
use crate::domain::traits::NextWordModel;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::inferencer::Predictor;

pub struct ProbeUseCase<M: NextWordModel> {
    tokenizer: WordTokenizer,
    model:     M,
    rng:       StdRng,
}

impl ProbeUseCase<Predictor> {
    /// Load the tokenizer and the latest model from an artifacts directory.
    pub fn from_artifacts(artifacts_dir: &str, seed: Option<u64>) -> Result<Self> {
        let ckpt      = CheckpointManager::open(artifacts_dir)?;
        let tokenizer = TokenizerStore::new(artifacts_dir).load()?;
        let model     = Predictor::from_checkpoint(&ckpt)?;
        Ok(Self::new(tokenizer, model, seed))
    }
}

impl<M: NextWordModel> ProbeUseCase<M> {
    pub fn new(tokenizer: WordTokenizer, model: M, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None    => StdRng::from_entropy(),
        };
        Self { tokenizer, model, rng }
    }

    /// Mean P(word | `distance` random other words) over `tests` sequences.
    pub fn probe(&mut self, word: &str, distance: usize, tests: usize) -> Result<f64> {
        let vocabulary = self.tokenizer.vocabulary();
        let word       = word.to_lowercase();

        if !vocabulary.kept_words().iter().any(|w| *w == word) {
            anyhow::bail!(
                "'{}' is not in the trained word list. Known words: {}",
                word,
                vocabulary.kept_words().join(", ")
            );
        }
        // kept words always have an id
        let target_id = vocabulary.word_id(&word).unwrap_or(0);

        let candidates: Vec<String> = vocabulary
            .kept_words()
            .iter()
            .filter(|w| **w != word)
            .cloned()
            .collect();

        tracing::info!(
            "Probing '{}' (id {}) at distance {} with {} random sequences",
            word, target_id, distance, tests
        );

        random_sequence_probability(
            &self.model,
            &self.tokenizer,
            target_id,
            &candidates,
            distance,
            tests,
            &mut self.rng,
        )
    }
}

/// The words `probe` accepts (the kept vocabulary) in id order.
pub fn word_list(artifacts_dir: &str) -> Result<Vec<String>> {
    let tokenizer = TokenizerStore::new(artifacts_dir).load()?;
    Ok(tokenizer.vocabulary().kept_words().to_vec())
}

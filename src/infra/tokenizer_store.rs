// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Persists the trained word tokenizer so probing uses exactly
// the word ids the model was trained on.
//
//   artifacts/
//     tokenizer.json    ← HF WordLevel tokenizer (word → id)
//     vocabulary.json   ← word counts in first-seen order + num_words
//
// The counts are needed on top of the id map: probes draw
// random words from the kept vocabulary, and held-out text is
// simplified against it, both of which depend on frequency.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use tokenizers::Tokenizer;

use crate::data::tokenizer::WordTokenizer;
use crate::data::vocabulary::Vocabulary;

const TOKENIZER_FILE:  &str = "tokenizer.json";
const VOCABULARY_FILE: &str = "vocabulary.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn save(&self, tokenizer: &WordTokenizer) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let tok_path = self.dir.join(TOKENIZER_FILE);
        fs::write(&tok_path, tokenizer.to_json()?)
            .with_context(|| format!("Cannot write '{}'", tok_path.display()))?;

        let vocab_path = self.dir.join(VOCABULARY_FILE);
        fs::write(&vocab_path, serde_json::to_string(tokenizer.vocabulary())?)
            .with_context(|| format!("Cannot write '{}'", vocab_path.display()))?;

        tracing::info!(
            "Tokenizer saved to '{}' ({} words, {} kept)",
            self.dir.display(),
            tokenizer.vocabulary().len(),
            tokenizer.vocabulary().kept_words().len(),
        );
        Ok(())
    }

    pub fn load(&self) -> Result<WordTokenizer> {
        let vocab_path = self.dir.join(VOCABULARY_FILE);
        let json = fs::read_to_string(&vocab_path).with_context(|| {
            format!("Cannot read '{}'. Have you run 'train' first?", vocab_path.display())
        })?;
        let vocabulary: Vocabulary = serde_json::from_str(&json)
            .with_context(|| format!("Invalid vocabulary in '{}'", vocab_path.display()))?;

        let tok_path = self.dir.join(TOKENIZER_FILE);
        let inner = Tokenizer::from_file(&tok_path)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load tokenizer from '{}': {}", tok_path.display(), e
            ))?;

        Ok(WordTokenizer::from_parts(vocabulary, inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir   = TempDir::new().unwrap();
        let store = TokenizerStore::new(dir.path());

        let mut vocab = Vocabulary::from_text("sun sun sun moon moon star");
        vocab.set_num_words(2);
        store.save(&WordTokenizer::from_vocabulary(vocab).unwrap()).unwrap();
        assert!(dir.path().join(TOKENIZER_FILE).exists());
        assert!(dir.path().join(VOCABULARY_FILE).exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded.vocabulary().kept_words(), ["sun", "moon"]);
        assert_eq!(loaded.text_to_sequence("star moon sun").unwrap(), vec![2, 1]);
    }

    #[test]
    fn test_load_without_training_fails() {
        let dir = TempDir::new().unwrap();
        assert!(TokenizerStore::new(dir.path()).load().is_err());
    }
}

// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Find .txt files, split training/testing  (Layer 4 - data)
//   Step 2: Read (a sample of) the training files    (Layer 4 - data)
//   Step 3: Merge near-duplicate words               (Layer 4 - data)
//   Step 4: Fit vocabulary, limit to frequent words  (Layer 4 - data)
//   Step 5: Build padded prefix sequences            (Layer 4 - data)
//   Step 6: Optional train / validation split        (Layer 4 - data)
//   Step 7: Save tokenizer and configs               (Layer 6 - infra)
//   Step 8: Run training loop                        (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::NextWordDataset,
    loader::{read_text_files, FileSelection, TextFileLoader},
    sequences::{training_sequences, DEFAULT_SEQ_SEP},
    simplifier::Simplifier,
    splitter::{split_files, split_train_val},
    tokenizer::WordTokenizer,
    vocabulary::Vocabulary,
};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::EpochMetrics,
    tokenizer_store::TokenizerStore,
};
use crate::ml::model::{default_hidden_size, NextWordLstmConfig};
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything that defines a training run. Saved next to the
// model so the assess command can find the same corpus split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_dir:         String,
    pub artifacts_dir:    String,
    /// Fraction of corpus files used for training; the rest is held out
    pub training_frac:    f64,
    /// Number of training files to read, 0 = all
    pub n_files:          usize,
    pub sample_files:     bool,
    /// Words closer than this edit distance are merged
    pub min_dist:         usize,
    /// Words seen this often or less are left out; defaults to n_files / 2
    pub min_freq:         Option<f64>,
    /// Longest word window a training sequence is built from
    pub max_len:          usize,
    pub shuffle:          bool,
    pub val_fraction:     f64,
    pub epochs:           usize,
    pub batch_size:       usize,
    pub lr:               f64,
    pub embedding_dim:    usize,
    /// Defaults to two thirds of (vocabulary + input length)
    pub hidden_size:      Option<usize>,
    /// Save weights every n epochs (the final epoch is always saved)
    pub checkpoint_every: usize,
    pub seed:             u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_dir:         "data".to_string(),
            artifacts_dir:    "artifacts".to_string(),
            training_frac:    0.5,
            n_files:          50,
            sample_files:     true,
            min_dist:         2,
            min_freq:         None,
            max_len:          25,
            shuffle:          true,
            val_fraction:     0.0,
            epochs:           500,
            batch_size:       32,
            lr:               1e-3,
            embedding_dim:    32,
            hidden_size:      None,
            checkpoint_every: 50,
            seed:             42,
        }
    }
}

impl TrainConfig {
    pub fn effective_min_freq(&self) -> f64 {
        self.min_freq.unwrap_or(self.n_files as f64 / 2.0)
    }
}

/// The prepared inputs of a run, before any training happens.
pub struct PreparedData {
    pub tokenizer:  WordTokenizer,
    pub model_cfg:  NextWordLstmConfig,
    pub train:      NextWordDataset,
    pub validation: NextWordDataset,
}

pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<Vec<EpochMetrics>> {
        let cfg  = &self.config;
        let data = self.prepare()?;

        // ── Step 7: Save tokenizer and configs for probing ────────────────────
        TokenizerStore::new(&cfg.artifacts_dir).save(&data.tokenizer)?;
        let ckpt_manager = CheckpointManager::new(&cfg.artifacts_dir)?;
        ckpt_manager.save_config(cfg)?;
        ckpt_manager.save_model_config(&data.model_cfg)?;

        // ── Step 8: Run training loop (Layer 5) ───────────────────────────────
        run_training(cfg, &data.model_cfg, data.train, data.validation, &ckpt_manager)
    }

    /// Steps 1–6: corpus to datasets and model architecture.
    pub fn prepare(&self) -> Result<PreparedData> {
        let cfg     = &self.config;
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        // ── Step 1: Find files and hold out the testing half ──────────────────
        let files = TextFileLoader::new(&cfg.data_dir).find_data_files()?;
        let (training_files, testing_files) = split_files(&files, cfg.training_frac);
        tracing::info!(
            "{} training files, {} held out for testing",
            training_files.len(),
            testing_files.len()
        );
        if training_files.is_empty() {
            anyhow::bail!(
                "No training files: '{}' has {} .txt files and training_frac is {}",
                cfg.data_dir, files.len(), cfg.training_frac
            );
        }

        // ── Step 2: Read the training text ────────────────────────────────────
        let selection = FileSelection::new(cfg.n_files, cfg.sample_files);
        let text      = read_text_files(&training_files, selection, &mut rng)?;

        // ── Step 3: Merge near-duplicate words ────────────────────────────────
        let min_freq  = cfg.effective_min_freq();
        let (text, _) = Simplifier::new(cfg.min_dist).simplify_text(&text, min_freq)?;

        // ── Step 4: Vocabulary limited to frequent words ──────────────────────
        let mut vocabulary = Vocabulary::from_text(&text);
        let kept = vocabulary.set_num_words_from_frequency(min_freq);
        tracing::info!(
            "Vocabulary: {} distinct words, {} seen more than {} times",
            vocabulary.len(),
            kept.len(),
            min_freq
        );
        if kept.is_empty() {
            anyhow::bail!("No word appears more than {min_freq} times; lower --min-freq");
        }
        let tokenizer = WordTokenizer::from_vocabulary(vocabulary)?;

        // ── Step 5: Padded prefix sequences ───────────────────────────────────
        let sequences = training_sequences(
            &text, &tokenizer, DEFAULT_SEQ_SEP, cfg.max_len, cfg.shuffle, &mut rng,
        )?;

        let vocab_size = tokenizer.vocabulary().output_classes();
        let input_len  = sequences.input_len();
        let model_cfg  = NextWordLstmConfig::new(vocab_size, input_len)
            .with_embedding_dim(cfg.embedding_dim)
            .with_hidden_size(
                cfg.hidden_size.unwrap_or_else(|| default_hidden_size(vocab_size, input_len)),
            );

        // ── Step 6: Optional validation split ─────────────────────────────────
        let (train, validation) = split_train_val(sequences.into_samples(), cfg.val_fraction, &mut rng);
        tracing::info!("Split: {} train, {} validation", train.len(), validation.len());

        Ok(PreparedData {
            tokenizer,
            model_cfg,
            train:      NextWordDataset::new(train),
            validation: NextWordDataset::new(validation),
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn corpus() -> TempDir {
        let dir = TempDir::new().unwrap();
        let train = "the cat sat on the mat\nthe dog sat on the log\nthe cat saw the dog\n";
        fs::write(dir.path().join("a.txt"), train).unwrap();
        fs::write(dir.path().join("b.txt"), train).unwrap();
        fs::write(dir.path().join("z.txt"), "the cat ran\n").unwrap();
        dir
    }

    fn config(data: &TempDir) -> TrainConfig {
        TrainConfig {
            data_dir:      data.path().to_string_lossy().into_owned(),
            training_frac: 0.67,
            n_files:       0,
            min_freq:      Some(1.0),
            shuffle:       false,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_prepare_builds_consistent_shapes() {
        let data     = corpus();
        let prepared = TrainUseCase::new(config(&data)).prepare().unwrap();

        let vocab = prepared.tokenizer.vocabulary();
        // words seen more than once across a.txt and b.txt
        assert_eq!(vocab.kept_words()[0], "the");
        assert_eq!(prepared.model_cfg.vocab_size, vocab.output_classes());
        assert_eq!(prepared.model_cfg.embedding_dim, 32);
        assert!(prepared.train.sample_count() > 0);
        assert_eq!(prepared.validation.sample_count(), 0);

        let sample = burn::data::dataset::Dataset::get(&prepared.train, 0).unwrap();
        assert_eq!(sample.context.len(), prepared.model_cfg.input_len);
        assert!((sample.target as usize) < prepared.model_cfg.vocab_size);
    }

    #[test]
    fn test_held_out_file_is_not_read() {
        let data     = corpus();
        let prepared = TrainUseCase::new(config(&data)).prepare().unwrap();
        // "ran" only appears in z.txt, the testing file
        assert!(prepared.tokenizer.vocabulary().word_id("ran").is_none());
    }

    #[test]
    fn test_min_freq_defaults_to_half_the_files() {
        let cfg = TrainConfig { n_files: 50, min_freq: None, ..TrainConfig::default() };
        assert_eq!(cfg.effective_min_freq(), 25.0);
    }

    #[test]
    fn test_too_high_min_freq_is_an_error() {
        let data = corpus();
        let cfg  = TrainConfig { min_freq: Some(1000.0), ..config(&data) };
        assert!(TrainUseCase::new(cfg).prepare().is_err());
    }

    #[test]
    fn test_missing_data_dir_is_an_error() {
        let cfg = TrainConfig { data_dir: "/no/such/corpus".into(), ..TrainConfig::default() };
        assert!(TrainUseCase::new(cfg).prepare().is_err());
    }
}

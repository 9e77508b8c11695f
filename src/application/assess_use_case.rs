// ============================================================
// Layer 2 — Assess Use Case
// ============================================================
// Compares the model with held-out text, word by word:
//
//   Step 1: Read the testing files (the half training never saw)
//   Step 2: Apply the same word merges training applied
//   Step 3: For each of the N most frequent words and each
//           distance d in min..=max:
//             - test data: fraction of gaps between occurrences
//               of the word that are exactly d words long
//             - model: mean P(word | d random kept words)
//   Step 4: Write one CSV and one chart per word
//
// The corpus location and split come from the train_config.json
// saved next to the model, so the testing files are exactly the
// files training held out.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::application::probing::{gap_length_distribution, random_sequence_probability};
use crate::application::train_use_case::TrainConfig;
use crate::data::{
    loader::{read_text_files, FileSelection, TextFileLoader},
    simplifier::Simplifier,
    splitter::split_files,
    tokenizer::WordTokenizer,
};
use crate::domain::distance_curve::DistanceCurve;
use crate::domain::traits::NextWordModel;
use crate::infra::{
    checkpoint::CheckpointManager,
    curve_store::CurveStore,
    tokenizer_store::TokenizerStore,
};
use crate::ml::inferencer::Predictor;

#[derive(Debug, Clone)]
pub struct AssessConfig {
    pub artifacts_dir: String,
    pub plots_dir:     String,
    /// Overrides the data directory recorded at training time
    pub data_dir:      Option<String>,
    /// How many of the most frequent words to assess
    pub num_words:     usize,
    pub min_distance:  usize,
    pub max_distance:  usize,
    /// Random sequences per (word, distance)
    pub tests:         usize,
    pub seed:          Option<u64>,
}

pub struct AssessUseCase<M: NextWordModel> {
    config:    AssessConfig,
    tokenizer: WordTokenizer,
    model:     M,
}

impl AssessUseCase<Predictor> {
    pub fn from_artifacts(config: AssessConfig) -> Result<Self> {
        let ckpt      = CheckpointManager::open(&config.artifacts_dir)?;
        let tokenizer = TokenizerStore::new(&config.artifacts_dir).load()?;
        let model     = Predictor::from_checkpoint(&ckpt)?;
        Ok(Self::new(config, tokenizer, model))
    }
}

impl<M: NextWordModel> AssessUseCase<M> {
    pub fn new(config: AssessConfig, tokenizer: WordTokenizer, model: M) -> Self {
        Self { config, tokenizer, model }
    }

    /// Run the assessment on the held-out files and write the curves.
    pub fn execute(&self) -> Result<Vec<DistanceCurve>> {
        let cfg       = &self.config;
        let train_cfg = CheckpointManager::open(&cfg.artifacts_dir)?.load_config()?;

        // ── Step 1: Read the testing files ────────────────────────────────────
        let data_dir = cfg.data_dir.clone().unwrap_or_else(|| train_cfg.data_dir.clone());
        let files    = TextFileLoader::new(&data_dir).find_data_files()?;
        let (_, testing_files) = split_files(&files, train_cfg.training_frac);
        if testing_files.is_empty() {
            anyhow::bail!("No held-out testing files in '{}'", data_dir);
        }

        let mut rng = self.rng();
        let text    = read_text_files(&testing_files, FileSelection::All, &mut rng)?;

        let curves = self.assess_text(&text, &train_cfg)?;

        // ── Step 4: One CSV and one chart per word ────────────────────────────
        let store = CurveStore::new(&cfg.plots_dir)?;
        for curve in &curves {
            let csv   = store.write(curve)?;
            let chart = store.plot(curve)?;
            tracing::info!("Wrote '{}' and '{}'", csv.display(), chart.display());
        }
        Ok(curves)
    }

    /// Steps 2–3 on already loaded held-out text.
    pub fn assess_text(&self, text: &str, train_cfg: &TrainConfig) -> Result<Vec<DistanceCurve>> {
        let cfg = &self.config;
        if cfg.min_distance > cfg.max_distance {
            anyhow::bail!(
                "min distance {} is larger than max distance {}",
                cfg.min_distance, cfg.max_distance
            );
        }

        // ── Step 2: Same merges as training ───────────────────────────────────
        let vocabulary = self.tokenizer.vocabulary();
        let (text, _)  = Simplifier::new(train_cfg.min_dist)
            .simplify_with_vocabulary(text, vocabulary)?;

        // ── Step 3: Curves per word ───────────────────────────────────────────
        let distances: Vec<usize> = (cfg.min_distance..=cfg.max_distance).collect();
        let candidates = vocabulary.kept_words();
        let mut rng    = self.rng();
        let mut curves = Vec::new();

        for word in candidates.iter().take(cfg.num_words) {
            tracing::info!("Assessing accuracy for word '{}'", word);
            let target_id = vocabulary.word_id(word).unwrap_or(0);
            let test_data = gap_length_distribution(&text, word, &self.tokenizer, &distances)?;

            let mut curve = DistanceCurve::new(word.as_str());
            for (&d, &observed) in distances.iter().zip(&test_data) {
                let model_p = random_sequence_probability(
                    &self.model,
                    &self.tokenizer,
                    target_id,
                    candidates,
                    d,
                    cfg.tests,
                    &mut rng,
                )?;
                tracing::debug!("{} d={} model={:.6} test={:.6}", word, d, model_p, observed);
                curve.push(d, model_p, observed);
            }
            curves.push(curve);
        }

        Ok(curves)
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None    => StdRng::from_entropy(),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::probing::tests::CountingModel;
    use crate::data::vocabulary::Vocabulary;
    use std::fs;
    use tempfile::TempDir;

    fn config(artifacts: &TempDir, num_words: usize) -> AssessConfig {
        AssessConfig {
            artifacts_dir: artifacts.path().to_string_lossy().into_owned(),
            plots_dir:     artifacts.path().join("plots").to_string_lossy().into_owned(),
            data_dir:      None,
            num_words,
            min_distance:  1,
            max_distance:  3,
            tests:         4,
            seed:          Some(11),
        }
    }

    fn use_case(artifacts: &TempDir, num_words: usize) -> AssessUseCase<CountingModel> {
        // a=1 b=2 c=3
        let tokenizer = WordTokenizer::from_vocabulary(Vocabulary::from_text("a a a b b c")).unwrap();
        AssessUseCase::new(config(artifacts, num_words), tokenizer, CountingModel { input_len: 5, classes: 4 })
    }

    // min_dist 1 merges nothing, so single letter words stay apart
    fn train_cfg() -> TrainConfig {
        TrainConfig { min_dist: 1, ..TrainConfig::default() }
    }

    #[test]
    fn test_curves_for_top_words() {
        let artifacts = TempDir::new().unwrap();
        let uc = use_case(&artifacts, 2);

        let curves = uc.assess_text("a b b a c a", &train_cfg()).unwrap();
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[0].word, "a");
        assert_eq!(curves[1].word, "b");

        // "a": pieces "", " b b ", " c ", "" → one gap of 2 and one of 1
        let a = &curves[0];
        assert_eq!(a.points.iter().map(|p| p.distance).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(a.points[0].test_data, 0.25);
        assert_eq!(a.points[1].test_data, 0.25);
        assert_eq!(a.points[2].test_data, 0.0);

        // CountingModel gives id 1 ("a") all the mass after exactly one word
        assert_eq!(a.points[0].model, 1.0);
        assert_eq!(a.points[1].model, 0.0);
    }

    #[test]
    fn test_inverted_distance_range_fails() {
        let artifacts = TempDir::new().unwrap();
        let mut uc = use_case(&artifacts, 1);
        uc.config.min_distance = 5;
        assert!(uc.assess_text("a b", &train_cfg()).is_err());
    }

    #[test]
    fn test_execute_reads_held_out_files_and_writes_curves() {
        let artifacts = TempDir::new().unwrap();
        let corpus    = TempDir::new().unwrap();
        fs::write(corpus.path().join("1.txt"), "c c c").unwrap();
        fs::write(corpus.path().join("2.txt"), "a b a").unwrap();

        let train_cfg = TrainConfig {
            data_dir:      corpus.path().to_string_lossy().into_owned(),
            training_frac: 0.5,
            ..train_cfg()
        };
        CheckpointManager::new(artifacts.path()).unwrap().save_config(&train_cfg).unwrap();

        let curves = use_case(&artifacts, 1).execute().unwrap();
        assert_eq!(curves.len(), 1);
        // only 2.txt is held out: "a b a" → pieces "", " b ", ""
        assert!((curves[0].points[0].test_data - 1.0 / 3.0).abs() < 1e-12);
        assert!(artifacts.path().join("plots").join("a.csv").exists());
        assert!(artifacts.path().join("plots").join("a.svg").exists());
    }
}

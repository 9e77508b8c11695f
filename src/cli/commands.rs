// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands (`train`, `probe`, `assess`)
// and all their configurable flags.
//
// The short flags follow the experiment scripts:
//   -w word   -d distance   -t tests   -n number of words
//   -l list the trained vocabulary and exit

use clap::{Args, Subcommand};
use crate::application::{assess_use_case::AssessConfig, train_use_case::TrainConfig};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the next-word LSTM on a directory of .txt files
    Train(TrainArgs),

    /// Probability of a word after a random sequence of other words
    Probe(ProbeArgs),

    /// Compare model and held-out text distance curves per word
    Assess(AssessArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory containing the .txt corpus
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    /// Where the model, tokenizer and metrics are written
    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,

    /// Fraction of files used for training; the rest is held out
    #[arg(long, default_value_t = 0.5)]
    pub training_frac: f64,

    /// Number of training files to read (0 = all of them)
    #[arg(long, default_value_t = 50)]
    pub n_files: usize,

    /// Read the first n files instead of a random sample
    #[arg(long)]
    pub no_sample: bool,

    /// Words closer than this edit distance are merged
    #[arg(long, default_value_t = 2)]
    pub min_dist: usize,

    /// Keep words seen more than this many times (default: n_files / 2)
    #[arg(long)]
    pub min_freq: Option<f64>,

    /// Longest word window training sequences are built from
    #[arg(long, default_value_t = 25)]
    pub max_len: usize,

    /// Keep sequences in corpus order
    #[arg(long)]
    pub no_shuffle: bool,

    /// Fraction of sequences held back for validation each epoch
    #[arg(long, default_value_t = 0.0)]
    pub val_fraction: f64,

    #[arg(long, default_value_t = 500)]
    pub epochs: usize,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    #[arg(long, default_value_t = 32)]
    pub embedding_dim: usize,

    /// LSTM units (default: two thirds of vocabulary + input length)
    #[arg(long)]
    pub hidden_size: Option<usize>,

    /// Save weights every n epochs
    #[arg(long, default_value_t = 50)]
    pub checkpoint_every: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_dir:         a.data_dir,
            artifacts_dir:    a.artifacts_dir,
            training_frac:    a.training_frac,
            n_files:          a.n_files,
            sample_files:     !a.no_sample,
            min_dist:         a.min_dist,
            min_freq:         a.min_freq,
            max_len:          a.max_len,
            shuffle:          !a.no_shuffle,
            val_fraction:     a.val_fraction,
            epochs:           a.epochs,
            batch_size:       a.batch_size,
            lr:               a.lr,
            embedding_dim:    a.embedding_dim,
            hidden_size:      a.hidden_size,
            checkpoint_every: a.checkpoint_every,
            seed:             a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Word whose probability is measured
    #[arg(short = 'w', long, required_unless_present = "list")]
    pub word: Option<String>,

    /// Number of random words before the probed word
    #[arg(short = 'd', long, required_unless_present = "list")]
    pub distance: Option<usize>,

    /// Number of random sequences to average over
    #[arg(short = 't', long, required_unless_present = "list")]
    pub tests: Option<usize>,

    /// Print the trained word list and exit
    #[arg(short = 'l', long)]
    pub list: bool,

    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,

    /// Seed for the random sequences (default: from entropy)
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct AssessArgs {
    /// Number of most frequent words to assess
    #[arg(short = 'n', long = "numwords", required_unless_present = "list")]
    pub num_words: Option<usize>,

    /// Largest distance on each curve
    #[arg(short = 'd', long = "maxdistance", required_unless_present = "list")]
    pub max_distance: Option<usize>,

    /// Number of random sequences per point
    #[arg(short = 't', long, required_unless_present = "list")]
    pub tests: Option<usize>,

    /// Smallest distance on each curve
    #[arg(long, default_value_t = 3)]
    pub min_distance: usize,

    /// Print the trained word list and exit
    #[arg(short = 'l', long)]
    pub list: bool,

    #[arg(long, default_value = "artifacts")]
    pub artifacts_dir: String,

    /// Where the per-word curve CSVs are written
    #[arg(long, default_value = "plots")]
    pub plots_dir: String,

    /// Corpus directory (default: the one recorded at training time)
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<AssessArgs> for AssessConfig {
    fn from(a: AssessArgs) -> Self {
        AssessConfig {
            artifacts_dir: a.artifacts_dir,
            plots_dir:     a.plots_dir,
            data_dir:      a.data_dir,
            num_words:     a.num_words.unwrap_or_default(),
            min_distance:  a.min_distance,
            max_distance:  a.max_distance.unwrap_or_default(),
            tests:         a.tests.unwrap_or_default(),
            seed:          a.seed,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use super::*;
    use clap::Parser;

    #[test]
    fn test_probe_short_flags() {
        let cli = Cli::try_parse_from(["word-distance-lm", "probe", "-w", "the", "-d", "5", "-t", "100"]).unwrap();
        match cli.command {
            Commands::Probe(a) => {
                assert_eq!(a.word.as_deref(), Some("the"));
                assert_eq!(a.distance, Some(5));
                assert_eq!(a.tests, Some(100));
                assert!(!a.list);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_list_needs_no_other_flags() {
        assert!(Cli::try_parse_from(["word-distance-lm", "probe", "-l"]).is_ok());
        assert!(Cli::try_parse_from(["word-distance-lm", "assess", "-l"]).is_ok());
        assert!(Cli::try_parse_from(["word-distance-lm", "probe", "-w", "the"]).is_err());
    }

    #[test]
    fn test_assess_args_into_config() {
        let cli = Cli::try_parse_from(["word-distance-lm", "assess", "-n", "10", "-d", "30", "-t", "200"]).unwrap();
        let Commands::Assess(a) = cli.command else { panic!("expected assess") };
        let cfg: AssessConfig = a.into();
        assert_eq!(cfg.num_words, 10);
        assert_eq!(cfg.min_distance, 3);
        assert_eq!(cfg.max_distance, 30);
        assert_eq!(cfg.tests, 200);
        assert_eq!(cfg.plots_dir, "plots");
    }

    #[test]
    fn test_train_defaults_match_config() {
        let cli = Cli::try_parse_from(["word-distance-lm", "train"]).unwrap();
        let Commands::Train(a) = cli.command else { panic!("expected train") };
        let cfg: TrainConfig = a.into();
        let def = TrainConfig::default();
        assert_eq!(cfg.n_files, def.n_files);
        assert_eq!(cfg.max_len, def.max_len);
        assert_eq!(cfg.sample_files, def.sample_files);
        assert_eq!(cfg.shuffle, def.shuffle);
        assert_eq!(cfg.epochs, def.epochs);
    }
}

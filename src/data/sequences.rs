// ============================================================
// Layer 4 — Sequence Builder
// ============================================================
// Turns text into fixed-length integer sequences the model can
// consume.
//
// Training sequences ("n-gram prefixes"):
//   The text is split into chunks (one sentence per line in
//   most of the corpus). Each chunk is encoded, cut into windows
//   of at most `max_len` ids, and every window of length L
//   contributes its prefixes of length 2..=L:
//
//     window:   [4, 9, 2, 7]
//     prefixes: [4, 9]
//               [4, 9, 2]
//               [4, 9, 2, 7]
//
//   All prefixes are then left-padded with 0 to the longest one.
//   The last id of each row is the target word; everything
//   before it is the context the model sees.
//
// Padding is always at the front ("pre"), so the most recent
// words sit right next to the prediction.
//
// Reference: Rust Book §8 (Vectors and Slices)

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::dataset::NextWordSample;
use crate::data::tokenizer::WordTokenizer;

/// Chunk separator used by the corpus: one sentence per line
pub const DEFAULT_SEQ_SEP: &str = "\n";

/// Left-pad `seq` with zeros to `maxlen`; longer sequences keep their
/// last `maxlen` ids.
pub fn pad_pre(seq: &[u32], maxlen: usize) -> Vec<u32> {
    if seq.len() >= maxlen {
        return seq[seq.len() - maxlen..].to_vec();
    }
    let mut out = vec![0u32; maxlen - seq.len()];
    out.extend_from_slice(seq);
    out
}

/// Equal-length training rows, context followed by target.
#[derive(Debug, Clone)]
pub struct PaddedSequences {
    /// Length of every row (context length + 1)
    pub max_length: usize,
    pub rows:       Vec<Vec<u32>>,
}

impl PaddedSequences {
    /// Length of the model input: every id except the target
    pub fn input_len(&self) -> usize {
        self.max_length - 1
    }

    /// Split every row into (context, target).
    pub fn into_samples(self) -> Vec<NextWordSample> {
        self.rows
            .into_iter()
            .map(|mut row| {
                let target = row.pop().unwrap_or(0);
                NextWordSample { context: row, target }
            })
            .collect()
    }
}

/// Build padded prefix sequences from training text.
pub fn training_sequences<R: Rng + ?Sized>(
    text:      &str,
    tokenizer: &WordTokenizer,
    seq_sep:   &str,
    max_len:   usize,
    shuffle:   bool,
    rng:       &mut R,
) -> Result<PaddedSequences> {
    if max_len < 2 {
        anyhow::bail!("max_len must be at least 2 to form a context and a target, got {max_len}");
    }

    let mut chunks: Vec<&str> = text.split(seq_sep).collect();
    if shuffle {
        chunks.shuffle(rng);
    }

    let mut sequences: Vec<Vec<u32>> = Vec::new();

    for chunk in chunks {
        let ids = tokenizer.text_to_sequence(chunk)?;

        // Long chunks are cut into consecutive max_len windows
        for window in ids.chunks(max_len) {
            for end in 2..=window.len() {
                sequences.push(window[..end].to_vec());
            }
        }
    }

    let max_length = sequences.iter().map(Vec::len).max().unwrap_or(0);
    if max_length == 0 {
        anyhow::bail!(
            "No training sequences could be built: every chunk has fewer than two known words"
        );
    }

    let rows = sequences.iter().map(|s| pad_pre(s, max_length)).collect();

    tracing::info!(
        "Built {} training sequences of length {}",
        sequences.len(),
        max_length
    );
    Ok(PaddedSequences { max_length, rows })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocabulary::Vocabulary;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tokenizer(text: &str) -> WordTokenizer {
        WordTokenizer::from_vocabulary(Vocabulary::from_text(text)).unwrap()
    }

    #[test]
    fn test_pad_pre() {
        assert_eq!(pad_pre(&[5, 6], 4), vec![0, 0, 5, 6]);
        assert_eq!(pad_pre(&[1, 2, 3], 3), vec![1, 2, 3]);
        assert_eq!(pad_pre(&[1, 2, 3, 4], 2), vec![3, 4]);
        assert_eq!(pad_pre(&[], 2), vec![0, 0]);
    }

    #[test]
    fn test_prefixes_are_built_per_line() {
        // a=1 (seen twice), then b=2 c=3 d=4 in first-seen order
        let text = "a b c\nd a";
        let t    = tokenizer(text);
        let mut rng = StdRng::seed_from_u64(0);
        let seqs = training_sequences(text, &t, "\n", 25, false, &mut rng).unwrap();

        assert_eq!(seqs.max_length, 3);
        assert_eq!(seqs.rows, vec![
            vec![0, 1, 2],
            vec![1, 2, 3],
            vec![0, 4, 1],
        ]);
    }

    #[test]
    fn test_long_chunks_are_windowed() {
        let text = "a b c d e";
        let t    = tokenizer(text);
        let mut rng = StdRng::seed_from_u64(0);
        let seqs = training_sequences(text, &t, "\n", 2, false, &mut rng).unwrap();

        // windows [a b] [c d] [e]; the single-word window gives nothing
        assert_eq!(seqs.max_length, 2);
        assert_eq!(seqs.rows, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_shuffle_keeps_every_sequence() {
        let text = "a b\nc d\ne f\ng h";
        let t    = tokenizer(text);
        let mut rng = StdRng::seed_from_u64(7);
        let seqs = training_sequences(text, &t, "\n", 25, true, &mut rng).unwrap();

        let mut rows = seqs.rows.clone();
        rows.sort();
        assert_eq!(rows, vec![vec![1, 2], vec![3, 4], vec![5, 6], vec![7, 8]]);
    }

    #[test]
    fn test_no_sequences_is_an_error() {
        let t = tokenizer("lonely");
        let mut rng = StdRng::seed_from_u64(0);
        assert!(training_sequences("lonely\nlonely", &t, "\n", 25, false, &mut rng).is_err());
    }

    #[test]
    fn test_into_samples_splits_target() {
        let seqs = PaddedSequences { max_length: 3, rows: vec![vec![0, 4, 1]] };
        assert_eq!(seqs.input_len(), 2);
        let samples = seqs.into_samples();
        assert_eq!(samples[0].context, vec![0, 4]);
        assert_eq!(samples[0].target, 1);
    }
}

// ============================================================
// Layer 4 — Splitters
// ============================================================
// Two kinds of split happen in the pipeline:
//
//   split_files      — corpus files → (training, testing) by
//                      position. Files are listed in sorted order,
//                      so the same directory always splits the
//                      same way and the assessment run reads
//                      exactly the files training never saw.
//
//   split_train_val  — training samples → (train, validation) after
//                      a Fisher-Yates shuffle. Validation is optional
//                      (fraction 0.0 keeps everything for training).
//
// Reference: rand crate documentation (SliceRandom)

use rand::seq::SliceRandom;
use rand::Rng;

/// First `floor(len * training_frac)` items are training, the rest testing.
pub fn split_files<T: Clone>(files: &[T], training_frac: f64) -> (Vec<T>, Vec<T>) {
    let split_at = ((files.len() as f64) * training_frac.clamp(0.0, 1.0)).floor() as usize;
    let split_at = split_at.min(files.len());
    (files[..split_at].to_vec(), files[split_at..].to_vec())
}

/// Shuffle `samples` and hold out `val_fraction` of them for validation.
pub fn split_train_val<T, R: Rng + ?Sized>(
    mut samples:  Vec<T>,
    val_fraction: f64,
    rng:          &mut R,
) -> (Vec<T>, Vec<T>) {
    samples.shuffle(rng);

    let total    = samples.len();
    let val_len  = ((total as f64) * val_fraction.clamp(0.0, 1.0)).round() as usize;
    let split_at = total - val_len.min(total);

    // split_off(n) leaves [0..n) in samples and returns [n..total)
    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_split_files_floors() {
        let files = vec!["a", "b", "c", "d", "e"];
        let (train, test) = split_files(&files, 0.5);
        assert_eq!(train, vec!["a", "b"]);
        assert_eq!(test, vec!["c", "d", "e"]);
    }

    #[test]
    fn test_split_files_extremes() {
        let files = vec![1, 2, 3];
        assert_eq!(split_files(&files, 1.0).0.len(), 3);
        assert_eq!(split_files(&files, 0.0).1.len(), 3);
    }

    #[test]
    fn test_correct_split_sizes() {
        let mut rng = StdRng::seed_from_u64(1);
        let items: Vec<usize> = (0..100).collect();
        let (train, val) = split_train_val(items, 0.2, &mut rng);
        assert_eq!(train.len(), 80);
        assert_eq!(val.len(),   20);
    }

    #[test]
    fn test_all_items_preserved() {
        let mut rng = StdRng::seed_from_u64(2);
        let items: Vec<usize> = (0..50).collect();
        let (train, val) = split_train_val(items, 0.3, &mut rng);
        let mut all: Vec<usize> = train.into_iter().chain(val).collect();
        all.sort();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_validation() {
        let mut rng = StdRng::seed_from_u64(3);
        let items: Vec<usize> = (0..10).collect();
        let (train, val) = split_train_val(items, 0.0, &mut rng);
        assert_eq!(train.len(), 10);
        assert!(val.is_empty());
    }
}

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One training example: a pre-padded context and the word that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextWordSample {
    pub context: Vec<u32>,
    pub target:  u32,
}

pub struct NextWordDataset {
    samples: Vec<NextWordSample>,
}

impl NextWordDataset {
    pub fn new(samples: Vec<NextWordSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<NextWordSample> for NextWordDataset {
    fn get(&self, index: usize) -> Option<NextWordSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_access() {
        let ds = NextWordDataset::new(vec![
            NextWordSample { context: vec![0, 0, 3], target: 1 },
            NextWordSample { context: vec![2, 5, 3], target: 4 },
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(1).map(|s| s.target), Some(4));
        assert!(ds.get(2).is_none());
    }
}

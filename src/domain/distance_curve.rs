// ============================================================
// Layer 3 — DistanceCurve Domain Type
// ============================================================
// For one vocabulary word, records two probabilities at each
// distance d (measured in words):
//
//   model:     mean P(word | random sequence of d words)
//   test_data: fraction of gaps between consecutive occurrences
//              of the word in held-out text that are exactly d
//              words long
//
// Plotting both series against d shows whether the model has
// learned anything about how far apart repeats of a word tend
// to be.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// One point on the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistancePoint {
    pub distance:  usize,
    pub model:     f64,
    pub test_data: f64,
}

/// All measured points for a single word, in ascending distance order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceCurve {
    pub word:   String,
    pub points: Vec<DistancePoint>,
}

impl DistanceCurve {
    pub fn new(word: impl Into<String>) -> Self {
        Self { word: word.into(), points: Vec::new() }
    }

    pub fn push(&mut self, distance: usize, model: f64, test_data: f64) {
        self.points.push(DistancePoint { distance, model, test_data });
    }

    /// The distance where the model assigns the highest probability
    pub fn model_peak(&self) -> Option<DistancePoint> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.model.total_cmp(&b.model))
    }

    /// The distance that occurs most often in the test data
    pub fn test_data_peak(&self) -> Option<DistancePoint> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.test_data.total_cmp(&b.test_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peaks() {
        let mut c = DistanceCurve::new("the");
        c.push(3, 0.10, 0.02);
        c.push(4, 0.30, 0.01);
        c.push(5, 0.20, 0.05);

        assert_eq!(c.model_peak().map(|p| p.distance), Some(4));
        assert_eq!(c.test_data_peak().map(|p| p.distance), Some(5));
    }

    #[test]
    fn test_empty_curve_has_no_peak() {
        let c = DistanceCurve::new("a");
        assert!(c.model_peak().is_none());
        assert!(c.test_data_peak().is_none());
    }
}

// ============================================================
// Layer 4 — Next-Word Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec of
// NextWordSamples into tensors for one forward pass.
//
//   Input:  Vec of N samples, each context of length S
//   Output: inputs  [N, S]  word ids
//           targets [N]     id of the word that follows
//
// Contexts are already padded to the same length by the
// sequence builder, so stacking is a flatten + reshape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::NextWordSample;

#[derive(Debug, Clone)]
pub struct NextWordBatch<B: Backend> {
    /// Context word ids — shape: [batch_size, input_len]
    pub inputs: Tensor<B, 2, Int>,

    /// Target word ids — shape: [batch_size]
    pub targets: Tensor<B, 1, Int>,
}

#[derive(Clone, Debug)]
pub struct NextWordBatcher<B: Backend> {
    /// The device to create tensors on
    pub device: B::Device,
}

impl<B: Backend> NextWordBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<NextWordSample, NextWordBatch<B>> for NextWordBatcher<B> {
    fn batch(&self, items: Vec<NextWordSample>) -> NextWordBatch<B> {
        let batch_size = items.len();
        let input_len  = items.first().map(|s| s.context.len()).unwrap_or(0);

        // Burn Int tensors are built from i32
        let input_flat: Vec<i32> = items
            .iter()
            .flat_map(|s| s.context.iter().map(|&x| x as i32))
            .collect();

        let targets: Vec<i32> = items
            .iter()
            .map(|s| s.target as i32)
            .collect();

        let inputs = Tensor::<B, 1, Int>::from_ints(
            input_flat.as_slice(), &self.device
        ).reshape([batch_size, input_len]);

        let targets = Tensor::<B, 1, Int>::from_ints(
            targets.as_slice(), &self.device
        );

        NextWordBatch { inputs, targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes_and_values() {
        let batcher = NextWordBatcher::<NdArray>::new(Default::default());
        let batch = batcher.batch(vec![
            NextWordSample { context: vec![0, 1, 2], target: 3 },
            NextWordSample { context: vec![4, 5, 6], target: 7 },
        ]);

        assert_eq!(batch.inputs.dims(), [2, 3]);
        assert_eq!(batch.targets.dims(), [2]);

        let inputs: Vec<i64> = batch.inputs.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(inputs, vec![0, 1, 2, 4, 5, 6]);
        let targets: Vec<i64> = batch.targets.into_data().convert::<i64>().to_vec().unwrap();
        assert_eq!(targets, vec![3, 7]);
    }
}

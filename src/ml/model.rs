use burn::{
    nn::{
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig,
    },
    prelude::*,
    tensor::backend::AutodiffBackend,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct NextWordLstmConfig {
    /// Number of output classes: kept words + the padding id
    pub vocab_size: usize,
    /// Context length fed to the model
    pub input_len:  usize,
    #[config(default = 32)]
    pub embedding_dim: usize,
    #[config(default = 75)]
    pub hidden_size: usize,
}

/// Hidden layer size used when none is given: two thirds of
/// input + output width.
pub fn default_hidden_size(vocab_size: usize, input_len: usize) -> usize {
    ((vocab_size + input_len) * 2 / 3).max(1)
}

impl NextWordLstmConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> NextWordLstm<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        let lstm      = LstmConfig::new(self.embedding_dim, self.hidden_size, true).init(device);
        let output    = LinearConfig::new(self.hidden_size, self.vocab_size).init(device);
        NextWordLstm {
            embedding, lstm, output,
            input_len: self.input_len,
        }
    }
}

#[derive(Module, Debug)]
pub struct NextWordLstm<B: Backend> {
    pub embedding: Embedding<B>,
    pub lstm:      Lstm<B>,
    pub output:    Linear<B>,
    pub input_len: usize,
}

impl<B: Backend> NextWordLstm<B> {
    /// inputs: [batch, input_len] → logits: [batch, vocab_size]
    pub fn forward(&self, inputs: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let x = self.embedding.forward(inputs); // [batch, seq, embedding_dim]

        // Only the hidden state after the last word feeds the classifier.
        let (_, state) = self.lstm.forward(x, None);
        self.output.forward(state.hidden) // [batch, vocab_size]
    }

    /// Softmax over the vocabulary: [batch, vocab_size]
    pub fn probabilities(&self, inputs: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        burn::tensor::activation::softmax(self.forward(inputs), 1)
    }

    /// Cross-entropy between the logits and the target word ids.
    pub fn loss(&self, logits: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> Tensor<B, 1> {
        burn::nn::loss::CrossEntropyLossConfig::new()
            .init(&logits.device())
            .forward(logits, targets)
    }

    /// Number of rows whose argmax equals the target.
    pub fn correct(&self, logits: Tensor<B, 2>, targets: Tensor<B, 1, Int>) -> usize {
        // argmax(1) returns [batch, 1] — flatten to [batch] before comparing
        let predicted = logits.argmax(1).flatten::<1>(0, 1);
        predicted
            .equal(targets)
            .int()
            .sum()
            .into_scalar()
            .elem::<i64>() as usize
    }

    pub fn forward_loss(
        &self,
        inputs:  Tensor<B, 2, Int>,
        targets: Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>)
    where
        B: AutodiffBackend,
    {
        let logits = self.forward(inputs);
        let loss   = self.loss(logits.clone(), targets);
        (loss, logits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_default_hidden_size() {
        assert_eq!(default_hidden_size(100, 24), 82);
        assert_eq!(default_hidden_size(0, 0), 1);
    }

    #[test]
    fn test_forward_shapes() {
        let device = Default::default();
        let model: NextWordLstm<TestBackend> = NextWordLstmConfig::new(10, 4)
            .with_hidden_size(8)
            .init(&device);

        let inputs = Tensor::<TestBackend, 1, Int>::from_ints([0, 0, 1, 2, 3, 4, 5, 6], &device)
            .reshape([2, 4]);
        let logits = model.forward(inputs);
        assert_eq!(logits.dims(), [2, 10]);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let device = Default::default();
        let model: NextWordLstm<TestBackend> = NextWordLstmConfig::new(6, 3).init(&device);

        let inputs = Tensor::<TestBackend, 1, Int>::from_ints([0, 1, 2], &device)
            .reshape([1, 3]);
        let probs: Vec<f32> = model.probabilities(inputs).into_data().to_vec().unwrap();
        assert_eq!(probs.len(), 6);
        let total: f32 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-4);
        assert!(probs.iter().all(|&p| p > 0.0));
    }
}

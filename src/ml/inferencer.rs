// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::Result;
use burn::prelude::*;

use crate::domain::traits::NextWordModel;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::NextWordLstm;
use crate::ml::InnerBackend;

pub struct Predictor<B: Backend = InnerBackend> {
    model:          NextWordLstm<B>,
    output_classes: usize,
    device:         B::Device,
}

impl Predictor<InnerBackend> {
    /// Rebuild the architecture from model_config.json and load the
    /// latest saved weights into it.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let device    = <InnerBackend as Backend>::Device::default();
        let model_cfg = ckpt_manager.load_model_config()?;
        let model: NextWordLstm<InnerBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;

        tracing::info!(
            "Model loaded: vocab={}, input_len={}, hidden={}",
            model_cfg.vocab_size, model_cfg.input_len, model_cfg.hidden_size,
        );
        Ok(Self::new(model, model_cfg.vocab_size, device))
    }
}

impl<B: Backend> Predictor<B> {
    pub fn new(model: NextWordLstm<B>, output_classes: usize, device: B::Device) -> Self {
        Self { model, output_classes, device }
    }
}

impl<B: Backend> NextWordModel for Predictor<B> {
    fn input_len(&self) -> usize {
        self.model.input_len
    }

    fn output_classes(&self) -> usize {
        self.output_classes
    }

    fn next_word_probabilities(&self, sequences: &[Vec<u32>]) -> Result<Vec<Vec<f32>>> {
        if sequences.is_empty() {
            return Ok(Vec::new());
        }

        let input_len = self.input_len();
        if let Some(bad) = sequences.iter().find(|s| s.len() != input_len) {
            anyhow::bail!(
                "Sequence of length {} does not match model input length {}",
                bad.len(),
                input_len
            );
        }

        let flat: Vec<i32> = sequences
            .iter()
            .flat_map(|s| s.iter().map(|&x| x as i32))
            .collect();
        let inputs = Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([sequences.len(), input_len]);

        let probs: Vec<f32> = self
            .model
            .probabilities(inputs)
            .into_data()
            .convert::<f32>()
            .to_vec()
            .map_err(|e| anyhow::anyhow!("Cannot read model output: {e:?}"))?;

        Ok(probs
            .chunks(self.output_classes)
            .map(<[f32]>::to_vec)
            .collect())
    }
}

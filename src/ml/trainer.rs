// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Train (+ optional validation) loop using Burn's DataLoader
// and Adam.
//
//   - Training runs on an Autodiff backend for gradients
//   - model.valid() returns the model on the inner backend,
//     so validation batches are built on the inner backend too
//   - the loss is cross-entropy over word ids, which is
//     categorical cross-entropy against one-hot targets
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::NextWordBatcher, dataset::NextWordDataset};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{NextWordLstm, NextWordLstmConfig};
use crate::ml::TrainBackend;

pub fn run_training(
    cfg:           &TrainConfig,
    model_cfg:     &NextWordLstmConfig,
    train_dataset: NextWordDataset,
    val_dataset:   NextWordDataset,
    ckpt_manager:  &CheckpointManager,
) -> Result<Vec<EpochMetrics>> {
    let device = <TrainBackend as Backend>::Device::default();
    tracing::info!("Using device: {:?}", device);
    train_loop::<TrainBackend>(cfg, model_cfg, train_dataset, val_dataset, ckpt_manager, device)
        .map(|(_, history)| history)
}

/// Train a fresh model and return it with the per-epoch metrics.
pub fn train_loop<B: AutodiffBackend>(
    cfg:           &TrainConfig,
    model_cfg:     &NextWordLstmConfig,
    train_dataset: NextWordDataset,
    val_dataset:   NextWordDataset,
    ckpt_manager:  &CheckpointManager,
    device:        B::Device,
) -> Result<(NextWordLstm<B>, Vec<EpochMetrics>)> {

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: NextWordLstm<B> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: vocab={}, input_len={}, embedding={}, hidden={}",
        model_cfg.vocab_size, model_cfg.input_len,
        model_cfg.embedding_dim, model_cfg.hidden_size,
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let mut optim = AdamConfig::new().with_epsilon(1e-7).init();

    let train_samples = train_dataset.sample_count();
    let has_val       = val_dataset.sample_count() > 0;

    // ── Training data loader (AutodiffBackend) ────────────────────────────────
    let train_batcher = NextWordBatcher::<B>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(cfg.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (InnerBackend — no autodiff overhead) ──────────
    let val_batcher = NextWordBatcher::<B::InnerBackend>::new(device.clone());
    let val_loader  = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let metrics_logger = MetricsLogger::new(ckpt_manager.dir())?;
    let mut history    = Vec::with_capacity(cfg.epochs);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {

        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;
        let mut correct  = 0usize;

        for batch in train_loader.iter() {
            let targets     = batch.targets.clone();
            let (loss, out) = model.forward_loss(batch.inputs, batch.targets);

            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;
            correct  += model.correct(out, targets);

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let train_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
        let train_acc  = ratio(correct, train_samples);

        // ── Validation phase ──────────────────────────────────────────────────
        let (val_loss, val_acc) = if has_val {
            let model_valid = model.valid();

            let mut loss_sum = 0.0f64;
            let mut batches  = 0usize;
            let mut correct  = 0usize;
            let mut total    = 0usize;

            for batch in val_loader.iter() {
                let logits = model_valid.forward(batch.inputs);
                total     += batch.targets.dims()[0];
                loss_sum  += model_valid
                    .loss(logits.clone(), batch.targets.clone())
                    .into_scalar()
                    .elem::<f64>();
                batches   += 1;
                correct   += model_valid.correct(logits, batch.targets);
            }

            let loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
            (Some(loss), Some(ratio(correct, total)))
        } else {
            (None, None)
        };

        let metrics = EpochMetrics::new(epoch, train_loss, train_acc, val_loss, val_acc);
        println!("Epoch {:>4}/{} | {}", epoch, cfg.epochs, metrics.summary());
        metrics_logger.log(&metrics)?;
        history.push(metrics);

        if epoch == cfg.epochs || (cfg.checkpoint_every > 0 && epoch % cfg.checkpoint_every == 0) {
            ckpt_manager.save_model(&model, epoch)?;
            tracing::info!("Checkpoint saved for epoch {}", epoch);
        }
    }

    tracing::info!("Training complete!");
    Ok((model, history))
}

fn ratio(n: usize, d: usize) -> f64 {
    if d > 0 { n as f64 / d as f64 } else { 0.0 }
}

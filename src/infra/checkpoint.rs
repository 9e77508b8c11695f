// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores everything needed to rebuild the trained
// network:
//
//   artifacts/
//     model_epoch_50.mpk.gz   ← weights (Burn CompactRecorder)
//     model_epoch_100.mpk.gz
//     ...
//     latest_epoch.json       ← number of the newest weights file
//     model_config.json       ← NextWordLstmConfig (architecture)
//     train_config.json       ← the run's TrainConfig
//
// The architecture config is needed before loading: Burn loads
// weights into an existing model, and loading fails if the
// shapes don't match.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::{NextWordLstm, NextWordLstmConfig};

pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create the manager, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create artifacts directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    /// Open an existing artifacts directory without creating it.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            anyhow::bail!(
                "Artifacts directory '{}' not found. Have you run 'train' first?",
                dir.display()
            );
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save model weights for `epoch` and point latest_epoch.json at them.
    pub fn save_model<B: Backend>(&self, model: &NextWordLstm<B>, epoch: usize) -> Result<()> {
        // Recorder adds the .mpk.gz extension
        let path = self.dir.join(format!("model_epoch_{epoch}"));

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .map_err(|e| anyhow::anyhow!(
                "Failed to save checkpoint to '{}': {e:?}", path.display()
            ))?;

        let latest_path = self.dir.join("latest_epoch.json");
        fs::write(&latest_path, serde_json::to_string(&epoch)?)
            .with_context(|| format!("Failed to write '{}'", latest_path.display()))?;

        tracing::debug!("Saved checkpoint: epoch {}", epoch);
        Ok(())
    }

    /// Load the latest weights into `model` (which must have the saved architecture).
    pub fn load_model<B: Backend>(
        &self,
        model:  NextWordLstm<B>,
        device: &B::Device,
    ) -> Result<NextWordLstm<B>> {
        let epoch = self.latest_epoch()?;
        let path  = self.dir.join(format!("model_epoch_{epoch}"));

        tracing::info!("Loading checkpoint from epoch {}", epoch);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .map_err(|e| anyhow::anyhow!(
                "Cannot load checkpoint '{}': {e:?}", path.display()
            ))?;

        Ok(model.load_record(record))
    }

    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        self.write_json("train_config.json", &serde_json::to_string_pretty(cfg)?)
    }

    pub fn load_config(&self) -> Result<TrainConfig> {
        Ok(serde_json::from_str(&self.read_json("train_config.json")?)?)
    }

    pub fn save_model_config(&self, cfg: &NextWordLstmConfig) -> Result<()> {
        self.write_json("model_config.json", &serde_json::to_string_pretty(cfg)?)
    }

    pub fn load_model_config(&self) -> Result<NextWordLstmConfig> {
        Ok(serde_json::from_str(&self.read_json("model_config.json")?)?)
    }

    /// Epoch number of the newest saved weights.
    pub fn latest_epoch(&self) -> Result<usize> {
        Ok(serde_json::from_str::<usize>(&self.read_json("latest_epoch.json")?)?)
    }

    fn write_json(&self, name: &str, json: &str) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Saved '{}'", path.display());
        Ok(())
    }

    fn read_json(&self, name: &str) -> Result<String> {
        let path = self.dir.join(name);
        fs::read_to_string(&path).with_context(|| {
            format!("Cannot read '{}'. Have you run 'train' first?", path.display())
        })
    }
}

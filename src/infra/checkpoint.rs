// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves model weights with Burn's CompactRecorder.
//
// Layout of the model directory:
//
//   trained_idiom_model/
//     tokenizer.json          ← written by TokenizerStore
//     train_config.json       ← hyperparameters of the run
//     metrics.csv             ← written by MetricsLogger
//     checkpoints/
//       model_epoch_2.mpk     ← rolling per-epoch checkpoints,
//       model_epoch_3.mpk       only the newest `save_total_limit` kept
//       latest_epoch.json
//     model.mpk               ← final weights
//
// Reference: Burn Book §5 (Records and Checkpointing)

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::CausalLmModel;

const CHECKPOINT_SUBDIR: &str = "checkpoints";
const EPOCH_PREFIX:      &str = "model_epoch_";

pub struct CheckpointManager {
    dir:              PathBuf,
    save_total_limit: usize,
}

impl CheckpointManager {
    /// `save_total_limit` of 0 keeps every epoch checkpoint.
    pub fn new(dir: impl AsRef<Path>, save_total_limit: usize) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(dir.join(CHECKPOINT_SUBDIR))
            .with_context(|| format!("Cannot create model directory '{}'", dir.display()))?;
        Ok(Self { dir, save_total_limit })
    }

    fn checkpoint_dir(&self) -> PathBuf {
        self.dir.join(CHECKPOINT_SUBDIR)
    }

    /// Save weights after `epoch`, update the latest-epoch pointer and
    /// drop checkpoints that fall outside the retention window.
    pub fn save_epoch<B: Backend>(&self, model: &CausalLmModel<B>, epoch: usize) -> Result<()> {
        let path = self.checkpoint_dir().join(format!("{EPOCH_PREFIX}{epoch}"));
        self.record(model, &path)?;

        fs::write(
            self.checkpoint_dir().join("latest_epoch.json"),
            serde_json::to_string(&epoch)?,
        )
        .context("Cannot write latest_epoch.json")?;

        self.prune(epoch)
    }

    /// Save the final weights at the top of the model directory
    pub fn save_final<B: Backend>(&self, model: &CausalLmModel<B>) -> Result<()> {
        self.record(model, &self.dir.join("model"))
    }

    fn record<B: Backend>(&self, model: &CausalLmModel<B>, path: &Path) -> Result<()> {
        CompactRecorder::new()
            .record(model.clone().into_record(), path.to_path_buf())
            .with_context(|| format!("Failed to save weights to '{}'", path.display()))?;
        tracing::debug!("Saved weights to '{}'", path.display());
        Ok(())
    }

    fn prune(&self, latest: usize) -> Result<()> {
        if self.save_total_limit == 0 || latest < self.save_total_limit {
            return Ok(());
        }
        let oldest_kept = latest + 1 - self.save_total_limit;

        for entry in fs::read_dir(self.checkpoint_dir())? {
            let path = entry?.path();
            if let Some(epoch) = checkpoint_epoch(&path) {
                if epoch < oldest_kept {
                    fs::remove_file(&path)
                        .with_context(|| format!("Cannot remove '{}'", path.display()))?;
                    tracing::debug!("Removed old checkpoint '{}'", path.display());
                }
            }
        }
        Ok(())
    }

    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        fs::write(&path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join("train_config.json");
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Epochs that currently have a checkpoint, ascending
    pub fn saved_epochs(&self) -> Result<Vec<usize>> {
        let mut epochs: Vec<usize> = fs::read_dir(self.checkpoint_dir())?
            .filter_map(|e| e.ok())
            .filter_map(|e| checkpoint_epoch(&e.path()))
            .collect();
        epochs.sort_unstable();
        epochs.dedup();
        Ok(epochs)
    }
}

/// "model_epoch_7.mpk" → Some(7)
fn checkpoint_epoch(path: &Path) -> Option<usize> {
    let name = path.file_name()?.to_str()?;
    let rest = name.strip_prefix(EPOCH_PREFIX)?;
    let end  = rest.find('.').unwrap_or(rest.len());
    rest[..end].parse().ok()
}

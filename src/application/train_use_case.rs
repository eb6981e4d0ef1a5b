// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the fine-tuning job in order:
//
//   Step 1: Flatten idiom files into samples   (Layer 4 - data)
//   Step 2: Load or build tokenizer            (Layer 6 - infra)
//   Step 3: Tokenise, pad, mirror labels       (Layer 4 - data)
//   Step 4: Split train/validation             (Layer 4 - data)
//   Step 5: Save config                        (Layer 6 - infra)
//   Step 6: Run training loop                  (Layer 5 - ml)
//
// Nothing here touches the detector's store.

use std::path::PathBuf;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    corpus::build_corpus,
    dataset::{encode_all, CausalLmDataset},
    splitter::split_train_val,
};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::MetricsLogger,
    tokenizer_store::TokenizerStore,
};
use crate::ml::trainer::{run_training, VocabInfo};

// ─── Training Configuration ──────────────────────────────────────────────────
// Saved next to the model as train_config.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_dir:         PathBuf,
    pub model_dir:        PathBuf,
    pub max_seq_len:      usize,
    pub batch_size:       usize,
    pub epochs:           usize,
    pub lr:               f64,
    pub train_fraction:   f64,
    pub logging_steps:    usize,
    pub save_total_limit: usize,
    pub d_model:          usize,
    pub num_heads:        usize,
    pub num_layers:       usize,
    pub d_ff:             usize,
    pub dropout:          f64,
    pub vocab_size:       usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_dir:         PathBuf::from("Gemma"),
            model_dir:        PathBuf::from("trained_idiom_model"),
            max_seq_len:      256,
            batch_size:       2,
            epochs:           3,
            lr:               5e-5,
            train_fraction:   0.9,
            logging_steps:    50,
            save_total_limit: 2,
            d_model:          256,
            num_heads:        4,
            num_layers:       4,
            d_ff:             1024,
            dropout:          0.1,
            vocab_size:       8000,
        }
    }
}

impl TrainConfig {
    /// Reject settings the model or loss cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_seq_len < 2 {
            bail!("max_seq_len must be at least 2 for next-token training");
        }
        if self.batch_size == 0 {
            bail!("batch_size must be positive");
        }
        if self.num_heads == 0 || self.d_model % self.num_heads != 0 {
            bail!("d_model ({}) must be divisible by num_heads ({})", self.d_model, self.num_heads);
        }
        if !(0.0..=1.0).contains(&self.train_fraction) {
            bail!("train_fraction must be within [0, 1]");
        }
        Ok(())
    }
}

pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Flatten idiom files ──────────────────────────────────────
        let samples = build_corpus(&cfg.data_dir)?;
        if samples.is_empty() {
            bail!("No training samples found in '{}'", cfg.data_dir.display());
        }

        // ── Step 2: Tokenizer ────────────────────────────────────────────────
        let texts: Vec<String> = samples.iter().map(|s| s.as_str().to_string()).collect();
        let tok_store = TokenizerStore::new(&cfg.model_dir);
        let tokenizer = tok_store.load_or_build(&texts, cfg.vocab_size)?;
        let vocab = VocabInfo {
            vocab_size: TokenizerStore::vocab_size(&tokenizer),
            pad_id:     TokenizerStore::pad_id(&tokenizer) as usize,
        };

        // ── Step 3: Encode ───────────────────────────────────────────────────
        let items = encode_all(&samples, &tokenizer, cfg.max_seq_len, vocab.pad_id as u32)?;
        let truncated = items.iter().filter(|i| i.token_count() == cfg.max_seq_len).count();
        if truncated > 0 {
            tracing::warn!("{} samples filled the {}-token window and may be truncated", truncated, cfg.max_seq_len);
        }

        // ── Step 4: Split ────────────────────────────────────────────────────
        let (train_items, val_items) = split_train_val(items, cfg.train_fraction);
        tracing::info!("Split: {} train, {} validation", train_items.len(), val_items.len());

        // ── Step 5: Persist run config ───────────────────────────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.model_dir, cfg.save_total_limit)?;
        if let Ok(previous) = ckpt_manager.load_config() {
            if previous != *cfg {
                tracing::warn!("Replacing the run config of a previous, different run in '{}'", cfg.model_dir.display());
            }
        }
        ckpt_manager.save_config(cfg)?;
        let metrics = MetricsLogger::new(&cfg.model_dir)?;

        // ── Step 6: Train ────────────────────────────────────────────────────
        tracing::info!("Training started");
        run_training(
            cfg,
            vocab,
            CausalLmDataset::new(train_items),
            CausalLmDataset::new(val_items),
            &ckpt_manager,
            &metrics,
        )?;

        tracing::info!(
            "Kept epoch checkpoints {:?}; metrics in '{}'",
            ckpt_manager.saved_epochs()?,
            metrics.csv_path().display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_head_split() {
        let cfg = TrainConfig { d_model: 250, num_heads: 4, ..TrainConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_single_token_window() {
        let cfg = TrainConfig { max_seq_len: 1, ..TrainConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_empty_corpus_fails_before_training() {
        let dir = tempfile::TempDir::new().unwrap();
        let cfg = TrainConfig {
            data_dir:  dir.path().to_path_buf(),
            model_dir: dir.path().join("model"),
            ..TrainConfig::default()
        };
        let err = TrainUseCase::new(cfg).execute().unwrap_err();
        assert!(err.to_string().contains("No training samples"));
    }
}

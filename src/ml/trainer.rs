// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Causal LM fine-tuning with Burn's DataLoader and Adam.
//
//   - Training runs on MyBackend (Autodiff<Wgpu>) for gradients
//   - model.valid() gives the same model on MyInnerBackend (Wgpu)
//     with dropout disabled; the validation batcher must match it
//   - Mean loss is logged every `logging_steps` batches
//   - A checkpoint is written after every epoch; CheckpointManager
//     keeps only the newest `save_total_limit` of them
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::CausalLmBatcher, dataset::CausalLmDataset};
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EpochMetrics, MetricsLogger},
};
use crate::ml::model::{CausalLmConfig, CausalLmModel};

type MyBackend      = burn::backend::Autodiff<burn::backend::Wgpu>;
type MyInnerBackend = burn::backend::Wgpu;

/// Vocabulary facts the model needs from the tokenizer
#[derive(Debug, Clone, Copy)]
pub struct VocabInfo {
    pub vocab_size: usize,
    pub pad_id:     usize,
}

pub fn run_training(
    cfg:           &TrainConfig,
    vocab:         VocabInfo,
    train_dataset: CausalLmDataset,
    val_dataset:   CausalLmDataset,
    ckpt_manager:  &CheckpointManager,
    metrics:       &MetricsLogger,
) -> Result<()> {
    let device = burn::backend::wgpu::WgpuDevice::default();
    tracing::info!("Using WGPU device: {:?}", device);

    // ── Build model ───────────────────────────────────────────────────────────
    let model_cfg = CausalLmConfig::new(
        vocab.vocab_size, cfg.max_seq_len, cfg.d_model,
        cfg.num_heads, cfg.num_layers, cfg.d_ff, cfg.dropout,
    );
    let mut model: CausalLmModel<MyBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {} layers, d_model={}, vocab={}",
        cfg.num_layers, cfg.d_model, vocab.vocab_size
    );

    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

    let has_validation = val_dataset.sample_count() > 0;

    let train_loader = DataLoaderBuilder::new(CausalLmBatcher::<MyBackend>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(train_dataset);

    let val_loader = DataLoaderBuilder::new(CausalLmBatcher::<MyInnerBackend>::new(device.clone()))
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let mut global_step = 0usize;

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut epoch_loss_sum = 0.0f64;
        let mut epoch_batches  = 0usize;
        let mut window_loss    = 0.0f64;
        let mut window_batches = 0usize;
        let mut epoch_tokens   = 0i64;

        for batch in train_loader.iter() {
            epoch_tokens += batch.attention_mask.clone().sum().into_scalar().elem::<i64>();
            let loss = model.forward_loss(batch.input_ids, batch.labels, vocab.pad_id);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            epoch_loss_sum += loss_val;
            epoch_batches  += 1;
            window_loss    += loss_val;
            window_batches += 1;
            global_step    += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);

            if cfg.logging_steps > 0 && global_step % cfg.logging_steps == 0 {
                tracing::info!(
                    "step {:>6} | epoch {} | loss={:.4}",
                    global_step, epoch, window_loss / window_batches as f64
                );
                window_loss    = 0.0;
                window_batches = 0;
            }
        }

        let avg_train_loss = if epoch_batches > 0 {
            epoch_loss_sum / epoch_batches as f64
        } else { f64::NAN };

        // ── Validation phase ──────────────────────────────────────────────────
        let val_loss = if has_validation {
            let model_valid = model.valid();
            let mut sum     = 0.0f64;
            let mut batches = 0usize;

            for batch in val_loader.iter() {
                let loss = model_valid.forward_loss(batch.input_ids, batch.labels, vocab.pad_id);
                sum     += loss.into_scalar().elem::<f64>();
                batches += 1;
            }
            (batches > 0).then(|| sum / batches as f64)
        } else {
            None
        };

        let row = EpochMetrics::new(epoch, avg_train_loss, val_loss);
        match row.perplexity() {
            Some(ppl) => println!(
                "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | perplexity={:.2}",
                epoch, cfg.epochs, avg_train_loss, val_loss.unwrap_or(f64::NAN), ppl,
            ),
            None => println!(
                "Epoch {:>3}/{} | train_loss={:.4}",
                epoch, cfg.epochs, avg_train_loss,
            ),
        }
        tracing::debug!("Epoch {} saw {} non-padding tokens", epoch, epoch_tokens);
        metrics.log(&row)?;

        ckpt_manager.save_epoch(&model, epoch)?;
        tracing::info!("Checkpoint saved for epoch {}", epoch);
    }

    ckpt_manager.save_final(&model)?;
    tracing::info!("Training complete!");
    Ok(())
}

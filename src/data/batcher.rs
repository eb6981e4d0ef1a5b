// ============================================================
// Layer 4 — Causal LM Batcher
// ============================================================
// Implements Burn's Batcher trait to stack CausalLmItems into
// tensors the model can consume.
//
//   Input:  Vec of N items, each with sequences of length S
//   Output: CausalLmBatch with Int tensors of shape [N, S]
//
// Items are already padded to the same length by the dataset, so
// batching is flatten-then-reshape:
//   [s1_t1, ..., s1_tS, s2_t1, ..., sN_tS] → [N, S]
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::CausalLmItem;

// ─── CausalLmBatch ────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct CausalLmBatch<B: Backend> {
    /// Token ids, shape [batch_size, seq_len]
    pub input_ids: Tensor<B, 2, Int>,

    /// 1 = real token, 0 = padding, shape [batch_size, seq_len]
    pub attention_mask: Tensor<B, 2, Int>,

    /// Next-token targets before shifting, shape [batch_size, seq_len]
    pub labels: Tensor<B, 2, Int>,
}

// ─── CausalLmBatcher ──────────────────────────────────────────────────────────
/// Holds the target device so tensors are created in the right place.
#[derive(Clone, Debug)]
pub struct CausalLmBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> CausalLmBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    fn stack(&self, rows: Vec<&[u32]>, seq_len: usize) -> Tensor<B, 2, Int> {
        let batch_size = rows.len();
        let flat: Vec<i32> = rows
            .into_iter()
            .flat_map(|row| row.iter().map(|&x| x as i32))
            .collect();

        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len])
    }
}

impl<B: Backend> Batcher<CausalLmItem, CausalLmBatch<B>> for CausalLmBatcher<B> {
    fn batch(&self, items: Vec<CausalLmItem>) -> CausalLmBatch<B> {
        // All sequences share the dataset's max_seq_len
        let seq_len = items[0].input_ids.len();

        let input_ids = self.stack(
            items.iter().map(|i| i.input_ids.as_slice()).collect(),
            seq_len,
        );
        let attention_mask = self.stack(
            items.iter().map(|i| i.attention_mask.as_slice()).collect(),
            seq_len,
        );
        let labels = self.stack(
            items.iter().map(|i| i.labels.as_slice()).collect(),
            seq_len,
        );

        CausalLmBatch { input_ids, attention_mask, labels }
    }
}

// ============================================================
// Layer 5 — Causal Language Model
// ============================================================
// Decoder-only transformer (GPT-style):
//
//   token + position embedding
//     → N × [masked self-attention → add & norm → GELU FFN → add & norm]
//     → final LayerNorm → lm_head over the vocabulary
//
// The autoregressive mask keeps every position blind to the tokens
// after it, so logits at t depend only on tokens 0..=t.
//
// Reference: Vaswani et al. (2017), Radford et al. (2019)

use burn::{
    nn::{
        attention::{generate_autoregressive_mask, MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        loss::CrossEntropyLossConfig,
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

// #[derive(Config)] already provides Clone and serde impls.
#[derive(Config, Debug)]
pub struct CausalLmConfig {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
    pub dropout:     f64,
}

impl CausalLmConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> CausalLmModel<B> {
        let token_embedding    = EmbeddingConfig::new(self.vocab_size, self.d_model).init(device);
        let position_embedding = EmbeddingConfig::new(self.max_seq_len, self.d_model).init(device);
        let layers: Vec<DecoderBlock<B>> = (0..self.num_layers)
            .map(|_| self.build_decoder_block(device))
            .collect();
        let final_norm = LayerNormConfig::new(self.d_model).init(device);
        let lm_head    = LinearConfig::new(self.d_model, self.vocab_size).init(device);
        let dropout    = DropoutConfig::new(self.dropout).init();
        CausalLmModel {
            token_embedding, position_embedding, layers,
            final_norm, lm_head, dropout,
            max_seq_len: self.max_seq_len,
        }
    }

    fn build_decoder_block<B: Backend>(&self, device: &B::Device) -> DecoderBlock<B> {
        let self_attn   = MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
            .with_dropout(self.dropout)
            .init(device);
        let ffn_linear1 = LinearConfig::new(self.d_model, self.d_ff).init(device);
        let ffn_linear2 = LinearConfig::new(self.d_ff, self.d_model).init(device);
        let norm1   = LayerNormConfig::new(self.d_model).init(device);
        let norm2   = LayerNormConfig::new(self.d_model).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        DecoderBlock { self_attn, ffn_linear1, ffn_linear2, norm1, norm2, dropout }
    }
}

#[derive(Module, Debug)]
pub struct DecoderBlock<B: Backend> {
    pub self_attn:   MultiHeadAttention<B>,
    pub ffn_linear1: Linear<B>,
    pub ffn_linear2: Linear<B>,
    pub norm1:       LayerNorm<B>,
    pub norm2:       LayerNorm<B>,
    pub dropout:     Dropout,
}

impl<B: Backend> DecoderBlock<B> {
    /// `causal_mask` is true where attention is forbidden (future positions)
    pub fn forward(&self, x: Tensor<B, 3>, causal_mask: Tensor<B, 3, Bool>) -> Tensor<B, 3> {
        let attn_output = self
            .self_attn
            .forward(MhaInput::self_attn(x.clone()).mask_attn(causal_mask))
            .context;
        let x = self.norm1.forward(x + self.dropout.forward(attn_output));
        let ffn_out = self.ffn_linear2.forward(
            burn::tensor::activation::gelu(self.ffn_linear1.forward(x.clone()))
        );
        self.norm2.forward(x + self.dropout.forward(ffn_out))
    }
}

#[derive(Module, Debug)]
pub struct CausalLmModel<B: Backend> {
    pub token_embedding:    Embedding<B>,
    pub position_embedding: Embedding<B>,
    pub layers:             Vec<DecoderBlock<B>>,
    pub final_norm:         LayerNorm<B>,
    pub lm_head:            Linear<B>,
    pub dropout:            Dropout,
    pub max_seq_len:        usize,
}

impl<B: Backend> CausalLmModel<B> {
    /// input_ids: [batch, seq_len] → logits: [batch, seq_len, vocab_size]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> Tensor<B, 3> {
        let [batch_size, seq_len] = input_ids.dims();
        let device = input_ids.device();

        let tok_emb = self.token_embedding.forward(input_ids);

        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &device)
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let pos_emb = self.position_embedding.forward(positions);

        // Each position may only attend to itself and earlier positions
        let causal_mask = generate_autoregressive_mask::<B>(batch_size, seq_len, &device);

        let mut x = self.dropout.forward(tok_emb + pos_emb);
        for layer in &self.layers {
            x = layer.forward(x, causal_mask.clone());
        }
        let x = self.final_norm.forward(x);

        self.lm_head.forward(x)
    }

    /// Next-token cross entropy: logits at position t are scored
    /// against labels at t + 1. Targets equal to `pad_id` are ignored.
    pub fn forward_loss(
        &self,
        input_ids: Tensor<B, 2, Int>,
        labels:    Tensor<B, 2, Int>,
        pad_id:    usize,
    ) -> Tensor<B, 1> {
        let logits = self.forward(input_ids);
        let [batch_size, seq_len, vocab_size] = logits.dims();
        let steps = seq_len - 1;

        let logits = logits
            .slice([0..batch_size, 0..steps, 0..vocab_size])
            .reshape([batch_size * steps, vocab_size]);
        let targets = labels
            .slice([0..batch_size, 1..seq_len])
            .reshape([batch_size * steps]);

        CrossEntropyLossConfig::new()
            .with_pad_tokens(Some(vec![pad_id]))
            .init(&logits.device())
            .forward(logits, targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn tiny() -> CausalLmModel<TestBackend> {
        CausalLmConfig::new(16, 8, 8, 2, 2, 16, 0.0).init(&Default::default())
    }

    fn ids(rows: [[i32; 6]; 2]) -> Tensor<TestBackend, 2, Int> {
        let flat: Vec<i32> = rows.iter().flatten().copied().collect();
        Tensor::<TestBackend, 1, Int>::from_ints(flat.as_slice(), &Default::default())
            .reshape([2, 6])
    }

    #[test]
    fn test_forward_shape() {
        let logits = tiny().forward(ids([[2, 3, 4, 5, 0, 0], [6, 7, 8, 0, 0, 0]]));
        assert_eq!(logits.dims(), [2, 6, 16]);
    }

    #[test]
    fn test_loss_is_finite_and_positive() {
        let input = ids([[2, 3, 4, 5, 0, 0], [6, 7, 8, 0, 0, 0]]);
        let loss  = tiny().forward_loss(input.clone(), input, 0);
        let value: f64 = loss.into_scalar().elem::<f64>();
        assert!(value.is_finite());
        assert!(value > 0.0);
    }

    #[test]
    fn test_future_tokens_do_not_change_earlier_logits() {
        let model = tiny();
        let a = model.forward(ids([[2, 3, 4, 5, 6, 7], [2, 3, 4, 5, 6, 7]]));
        let b = model.forward(ids([[2, 3, 4, 9, 9, 9], [2, 3, 4, 5, 6, 7]]));

        let prefix = |t: Tensor<TestBackend, 3>| t.slice([0..1, 0..3, 0..16]).into_data();
        prefix(a).assert_approx_eq(&prefix(b), 4);
    }
}

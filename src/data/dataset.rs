// ============================================================
// Layer 4 — Causal LM Dataset
// ============================================================
// Turns TrainingSamples into fixed-length token sequences and
// exposes them through Burn's Dataset trait.
//
//   "Idiom: ...\nMeaning: ...\n###\n"
//       → tokenizer.encode → truncate(max_seq_len) → pad(pad_id)
//       → CausalLmItem { input_ids, attention_mask, labels }
//
// Reference: Burn Book §4 (Datasets)

use anyhow::Result;
use burn::data::dataset::Dataset;
use tokenizers::Tokenizer;

use crate::data::corpus::TrainingSample;

/// One tokenised training unit, padded to a fixed length.
/// `labels` mirrors `input_ids`: the model learns to predict its own
/// input shifted by one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CausalLmItem {
    pub input_ids:      Vec<u32>,
    pub attention_mask: Vec<u32>,
    pub labels:         Vec<u32>,
}

impl CausalLmItem {
    /// Number of real (non-padding) tokens
    pub fn token_count(&self) -> usize {
        self.attention_mask.iter().filter(|&&m| m == 1).count()
    }
}

/// Tokenise one sample, truncating to `max_seq_len` and right-padding
/// with `pad_id`. Padding positions get attention mask 0.
pub fn encode_sample(
    sample:      &TrainingSample,
    tokenizer:   &Tokenizer,
    max_seq_len: usize,
    pad_id:      u32,
) -> Result<CausalLmItem> {
    let enc = tokenizer
        .encode(sample.as_str(), false)
        .map_err(|e| anyhow::anyhow!("Tokenisation error: {e}"))?;

    let mut input_ids: Vec<u32> = enc.get_ids().to_vec();
    input_ids.truncate(max_seq_len);

    let mut attention_mask = vec![1u32; input_ids.len()];
    input_ids.resize(max_seq_len, pad_id);
    attention_mask.resize(max_seq_len, 0);

    Ok(CausalLmItem {
        labels: input_ids.clone(),
        input_ids,
        attention_mask,
    })
}

pub fn encode_all(
    samples:     &[TrainingSample],
    tokenizer:   &Tokenizer,
    max_seq_len: usize,
    pad_id:      u32,
) -> Result<Vec<CausalLmItem>> {
    samples
        .iter()
        .map(|s| encode_sample(s, tokenizer, max_seq_len, pad_id))
        .collect()
}

pub struct CausalLmDataset {
    items: Vec<CausalLmItem>,
}

impl CausalLmDataset {
    pub fn new(items: Vec<CausalLmItem>) -> Self { Self { items } }

    pub fn sample_count(&self) -> usize { self.items.len() }
}

impl Dataset<CausalLmItem> for CausalLmDataset {
    fn get(&self, index: usize) -> Option<CausalLmItem> {
        self.items.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::tokenizer_store::TokenizerStore;
    use tempfile::TempDir;

    fn tokenizer_for(samples: &[TrainingSample]) -> (TempDir, Tokenizer, u32) {
        let dir   = TempDir::new().unwrap();
        let store = TokenizerStore::new(dir.path());
        let texts: Vec<String> = samples.iter().map(|s| s.as_str().to_string()).collect();
        let tok   = store.load_or_build(&texts, 100).unwrap();
        let pad   = TokenizerStore::pad_id(&tok);
        (dir, tok, pad)
    }

    #[test]
    fn test_pads_to_max_len_and_mirrors_labels() {
        let samples = vec![TrainingSample::new("kick the bucket", "to die", "")];
        let (_dir, tok, pad) = tokenizer_for(&samples);

        let item = encode_sample(&samples[0], &tok, 64, pad).unwrap();
        assert_eq!(item.input_ids.len(), 64);
        assert_eq!(item.attention_mask.len(), 64);
        assert_eq!(item.labels, item.input_ids);

        let real = item.token_count();
        assert!(real > 0 && real < 64);
        assert!(item.input_ids[real..].iter().all(|&id| id == pad));
        assert!(item.attention_mask[real..].iter().all(|&m| m == 0));
    }

    #[test]
    fn test_truncates_long_samples() {
        let samples = vec![TrainingSample::new("a b c d e f g h", "i j k l m n", "o p q r s")];
        let (_dir, tok, pad) = tokenizer_for(&samples);

        let item = encode_sample(&samples[0], &tok, 4, pad).unwrap();
        assert_eq!(item.input_ids.len(), 4);
        assert_eq!(item.token_count(), 4);
    }

    #[test]
    fn test_dataset_len_and_get() {
        let samples = vec![
            TrainingSample::new("a", "b", "c"),
            TrainingSample::new("d", "e", "f"),
        ];
        let (_dir, tok, pad) = tokenizer_for(&samples);

        let ds = CausalLmDataset::new(encode_all(&samples, &tok, 16, pad).unwrap());
        assert_eq!(ds.len(), 2);
        assert!(ds.get(1).is_some());
        assert!(ds.get(2).is_none());
    }
}

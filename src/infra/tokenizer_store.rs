// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Provides the tokenizer used to encode training samples, kept in
// the model directory so the saved model and its vocabulary travel
// together.
//
//   model_dir/tokenizer.json exists  → load it (a pretrained GPT-2
//                                      tokenizer.json works here)
//   otherwise                        → build a word-level vocabulary
//                                      from the corpus and save it
//
// The end-of-text token doubles as the padding token, as is usual
// for GPT-style causal models.
//
// A built tokenizer is written as HuggingFace JSON and loaded back
// through Tokenizer::from_file. Word counts go through the same
// normalizer and pre-tokenizer objects that are serialised into that
// JSON, so every counted word is a token the encoder can produce.
//
// Accents and combining marks are kept ("café", "स्वर्ग"); CJK text
// is split into single characters.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tokenizers::{
    normalizers::BertNormalizer,
    pre_tokenizers::whitespace::Whitespace,
    Normalizer, OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer, Tokenizer,
};

/// End-of-text marker, also used for padding
pub const EOS_TOKEN: &str = "<|endoftext|>";
pub const UNK_TOKEN: &str = "[UNK]";

const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKENIZER_FILE)
    }

    /// Load an existing tokenizer or build one from `texts`
    pub fn load_or_build(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        if self.path().exists() {
            tracing::info!("Loading existing tokenizer from '{}'", self.path().display());
            self.load()
        } else {
            tracing::info!("Building new tokenizer (vocab_size={})", vocab_size);
            self.build_and_save(texts, vocab_size)
        }
    }

    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.path();
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e))
    }

    /// Id of the padding token: the end-of-text token, or 0 when the
    /// tokenizer has no such token.
    pub fn pad_id(tokenizer: &Tokenizer) -> u32 {
        tokenizer.token_to_id(EOS_TOKEN).unwrap_or(0)
    }

    /// Embedding table size needed for this tokenizer: highest id + 1.
    pub fn vocab_size(tokenizer: &Tokenizer) -> usize {
        tokenizer
            .get_vocab(true)
            .values()
            .max()
            .map_or(0, |&id| id as usize + 1)
    }

    fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let normalizer    = corpus_normalizer();
        let pre_tokenizer = Whitespace::default();

        // ── Word frequencies ─────────────────────────────────────────────────
        let mut freq: HashMap<String, usize> = HashMap::new();
        for text in texts {
            for piece in split_words(&normalizer, &pre_tokenizer, text)? {
                *freq.entry(piece).or_insert(0) += 1;
            }
        }

        // Most frequent first; ties broken alphabetically so rebuilds agree
        let mut words: Vec<(String, usize)> = freq.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(vocab_size.saturating_sub(2));

        let mut vocab = serde_json::Map::new();
        vocab.insert(EOS_TOKEN.to_string(), 0.into());
        vocab.insert(UNK_TOKEN.to_string(), 1.into());

        let mut next_id = 2usize;
        for (word, _) in &words {
            if !vocab.contains_key(word) {
                vocab.insert(word.clone(), next_id.into());
                next_id += 1;
            }
        }

        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                {"id": 0, "content": EOS_TOKEN, "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true},
                {"id": 1, "content": UNK_TOKEN, "single_word": false, "lstrip": false, "rstrip": false, "normalized": false, "special": true}
            ],
            "normalizer": serde_json::to_value(&normalizer)?,
            "pre_tokenizer": serde_json::to_value(&pre_tokenizer)?,
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": UNK_TOKEN
            }
        });

        let path = self.path();
        fs::write(&path, serde_json::to_string_pretty(&tokenizer_json)?)
            .with_context(|| format!("Cannot write tokenizer to '{}'", path.display()))?;

        tracing::info!("Tokenizer built with {} tokens, saved to '{}'", next_id, path.display());

        Tokenizer::from_file(&path).map_err(|e| anyhow::anyhow!("Cannot reload tokenizer: {e}"))
    }
}

/// Lowercasing without accent stripping, so marks that carry meaning
/// in Indic and other scripts survive.
fn corpus_normalizer() -> BertNormalizer {
    BertNormalizer::new(true, true, Some(false), true)
}

/// Normalise and pre-tokenise `text` exactly as the saved tokenizer
/// will at encode time, returning the word pieces.
fn split_words(
    normalizer:    &BertNormalizer,
    pre_tokenizer: &Whitespace,
    text:          &str,
) -> Result<Vec<String>> {
    let mut pretok = PreTokenizedString::from(text);
    pretok
        .normalize(|n| normalizer.normalize(n))
        .map_err(|e| anyhow::anyhow!("Normalisation error: {e}"))?;
    pre_tokenizer
        .pre_tokenize(&mut pretok)
        .map_err(|e| anyhow::anyhow!("Pre-tokenisation error: {e}"))?;

    Ok(pretok
        .get_splits(OffsetReferential::Original, OffsetType::Byte)
        .into_iter()
        .map(|(piece, _, _)| piece.to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_split_words_lowercases_and_splits_punctuation() {
        let pieces = split_words(&corpus_normalizer(), &Whitespace::default(), "Idiom: It's ###").unwrap();
        assert_eq!(pieces, vec!["idiom", ":", "it", "'", "s", "###"]);
        assert!(split_words(&corpus_normalizer(), &Whitespace::default(), "   ").unwrap().is_empty());
    }

    #[test]
    fn test_non_ascii_words_encode_without_unknowns() {
        let words = ["café", "स्वर्ग", "画蛇添足", "கண்", "Übermut"];
        let texts: Vec<String> = words.iter().map(|w| format!("Idiom: {w}\n###\n")).collect();

        let dir = TempDir::new().unwrap();
        let tok = TokenizerStore::new(dir.path()).load_or_build(&texts, 100).unwrap();

        for w in words {
            let enc = tok.encode(w, false).unwrap();
            assert!(!enc.get_ids().is_empty(), "{w} produced no tokens");
            assert!(!enc.get_ids().contains(&1), "{w} encoded as {:?}", enc.get_tokens());
        }

        // Accents are kept, CJK is split per character
        assert_eq!(tok.encode("café", false).unwrap().get_tokens(), &["café".to_string()]);
        assert_eq!(tok.encode("画蛇添足", false).unwrap().get_ids().len(), 4);
    }

    #[test]
    fn test_build_then_reload() {
        let dir   = TempDir::new().unwrap();
        let store = TokenizerStore::new(dir.path());
        let texts = vec!["Idiom: spill the beans\nMeaning: reveal a secret\n###\n".to_string()];

        let built = store.load_or_build(&texts, 50).unwrap();
        assert!(store.path().exists());
        assert_eq!(TokenizerStore::pad_id(&built), 0);

        let enc = built.encode("Idiom: spill the beans", false).unwrap();
        assert_eq!(enc.get_ids().len(), 5);
        assert!(!enc.get_ids().contains(&1), "every word should be in vocabulary");

        let unk = built.encode("zebra", false).unwrap();
        assert_eq!(unk.get_ids(), &[1]);

        let reloaded = store.load_or_build(&[], 50).unwrap();
        assert_eq!(TokenizerStore::vocab_size(&reloaded), TokenizerStore::vocab_size(&built));
    }

    #[test]
    fn test_vocab_size_is_capped() {
        let dir   = TempDir::new().unwrap();
        let texts = vec!["a b c d e f g h i j".to_string()];
        let tok   = TokenizerStore::new(dir.path()).load_or_build(&texts, 5).unwrap();
        assert_eq!(TokenizerStore::vocab_size(&tok), 5);
    }
}

// ============================================================
// Layer 4 — Training Corpus Builder
// ============================================================
// Flattens idiom JSON files into plain-text training samples for
// causal language-model fine-tuning.
//
// This path shares nothing with the detector beyond the directory
// walk: it reads a different field set and a wider file shape.
//
//   file is a list    → one sample per element
//   file is an object → exactly one sample
//   anything else     → ignored, silently
//
// Fields read: idiom, meaning, example. The detector's loader reads
// `figurative_meaning` instead; the two schemas are kept apart.
//
// Each sample is rendered with a fixed template:
//
//   Idiom: {idiom}
//   Meaning: {meaning}
//   Example: {example}
//   ###
//
// The trailing "###" line marks the end of one training unit.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::data::loader::{json_files_in, read_json};

/// Line that closes every training unit
pub const SAMPLE_DELIMITER: &str = "###";

/// One flattened idiom in the fixed training template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSample {
    text: String,
}

impl TrainingSample {
    pub fn new(idiom: &str, meaning: &str, example: &str) -> Self {
        Self {
            text: format!(
                "Idiom: {idiom}\nMeaning: {meaning}\nExample: {example}\n{SAMPLE_DELIMITER}\n"
            ),
        }
    }

    fn from_value(value: &Value) -> Self {
        Self::new(
            raw_field(value, "idiom"),
            raw_field(value, "meaning"),
            raw_field(value, "example"),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Walk `dir` (non-recursive, file-name order) and flatten every idiom
/// record found into a training sample.
///
/// Files that cannot be read or parsed are logged and skipped; only a
/// failure to list the directory itself is an error.
pub fn build_corpus(dir: &Path) -> Result<Vec<TrainingSample>> {
    tracing::info!("Loading JSON files from '{}'", dir.display());

    let files = json_files_in(dir)
        .with_context(|| format!("Cannot read directory '{}'", dir.display()))?;

    let mut samples = Vec::new();

    for path in files {
        let value = match read_json(&path) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Skipping training file: {}", e);
                continue;
            }
        };

        match &value {
            Value::Array(items) => samples.extend(items.iter().map(TrainingSample::from_value)),
            Value::Object(_)    => samples.push(TrainingSample::from_value(&value)),
            _ => {}
        }
    }

    tracing::info!("Total training samples: {}", samples.len());
    Ok(samples)
}

/// String field as written in the file (no trimming), "" when absent.
fn raw_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_template_layout() {
        let s = TrainingSample::new("kick the bucket", "to die", "He kicked the bucket.");
        assert_eq!(
            s.as_str(),
            "Idiom: kick the bucket\nMeaning: to die\nExample: He kicked the bucket.\n###\n"
        );
    }

    #[test]
    fn test_lists_objects_and_other_shapes() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"[{"idiom": "a", "meaning": "m1"}, {"idiom": "b", "figurative_meaning": "not read"}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("b.json"), r#"{"idiom": "c", "meaning": "m3", "example": "e3"}"#).unwrap();
        fs::write(dir.path().join("c.json"), r#""just a string""#).unwrap();
        fs::write(dir.path().join("d.json"), "not json at all").unwrap();

        let samples = build_corpus(dir.path()).unwrap();
        assert_eq!(samples.len(), 3);
        assert!(samples[0].as_str().starts_with("Idiom: a\nMeaning: m1\n"));
        // `figurative_meaning` is not a training field
        assert!(samples[1].as_str().contains("Meaning: \n"));
        assert_eq!(samples[2], TrainingSample::new("c", "m3", "e3"));
    }

    #[test]
    fn test_missing_directory_gives_empty_corpus() {
        let dir = TempDir::new().unwrap();
        assert!(build_corpus(&dir.path().join("absent")).unwrap().is_empty());
    }
}

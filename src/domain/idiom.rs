// ============================================================
// Layer 3 — Idiom Domain Types
// ============================================================
// The records the detector works with:
//
//   IdiomRecord      — one dictionary entry, keyed by its phrase
//   DetectionResult  — the outcome of analysing one sentence
//
// Both are plain data. The store that owns IdiomRecords lives in
// Layer 4 (data::store); the orchestrator that builds
// DetectionResults lives in Layer 2 (application).
//
// Reference: Rust Book §5 (Structs and Methods)

/// One idiom entry as it sits in the store.
///
/// `phrase` is always lowercased and trimmed; the loader guarantees
/// it is non-empty. The three descriptive fields may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdiomRecord {
    /// Lowercase, trimmed idiom text. The unique store key.
    pub phrase: String,

    /// Word-for-word reading of the phrase
    pub literal_meaning: String,

    /// The idiomatic meaning
    pub figurative_meaning: String,

    /// Example sentence using the idiom
    pub example: String,
}

impl IdiomRecord {
    /// Build a record, normalising the phrase to its key form.
    ///
    /// Example:
    ///   let r = IdiomRecord::new("  Kick the Bucket ", "", "to die", "");
    ///   assert_eq!(r.phrase, "kick the bucket");
    pub fn new(
        phrase:             impl AsRef<str>,
        literal_meaning:    impl Into<String>,
        figurative_meaning: impl Into<String>,
        example:            impl Into<String>,
    ) -> Self {
        Self {
            phrase:             normalize_phrase(phrase.as_ref()),
            literal_meaning:    literal_meaning.into(),
            figurative_meaning: figurative_meaning.into(),
            example:            example.into(),
        }
    }
}

/// Key form of an idiom phrase: trimmed, then lowercased.
pub fn normalize_phrase(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Message shown by every surface when a sentence has no idiom
pub const NO_IDIOM_MESSAGE: &str = "No idiom found.";

// ─── DetectionResult ──────────────────────────────────────────────────────────
/// Outcome of analysing a single sentence.
///
/// When `found` is false every other field is `None`: no metadata is
/// attached and no language detection was run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionResult {
    pub found:    bool,
    pub idiom:    Option<String>,
    pub literal:  Option<String>,
    pub meaning:  Option<String>,
    pub example:  Option<String>,
    pub language: Option<String>,
}

impl DetectionResult {
    /// The "no idiom in this sentence" outcome
    pub fn not_found() -> Self {
        Self::default()
    }

    /// A positive match carrying the record's metadata and the tagged language
    pub fn found(record: &IdiomRecord, language: impl Into<String>) -> Self {
        Self {
            found:    true,
            idiom:    Some(record.phrase.clone()),
            literal:  Some(record.literal_meaning.clone()),
            meaning:  Some(record.figurative_meaning.clone()),
            example:  Some(record.example.clone()),
            language: Some(language.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalises_phrase() {
        let r = IdiomRecord::new("  Break The ICE\t", "lit", "fig", "ex");
        assert_eq!(r.phrase, "break the ice");
        assert_eq!(r.figurative_meaning, "fig");
    }

    #[test]
    fn test_not_found_carries_nothing() {
        let r = DetectionResult::not_found();
        assert!(!r.found);
        assert!(r.idiom.is_none());
        assert!(r.language.is_none());
    }

    #[test]
    fn test_found_copies_record_fields() {
        let rec = IdiomRecord::new("spill the beans", "drop beans", "reveal a secret", "He spilled the beans.");
        let r   = DetectionResult::found(&rec, "en");
        assert!(r.found);
        assert_eq!(r.idiom.as_deref(),    Some("spill the beans"));
        assert_eq!(r.literal.as_deref(),  Some("drop beans"));
        assert_eq!(r.meaning.as_deref(),  Some("reveal a secret"));
        assert_eq!(r.example.as_deref(),  Some("He spilled the beans."));
        assert_eq!(r.language.as_deref(), Some("en"));
    }
}

// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The two seams the detector is built around:
//
//   IdiomSource      — anything that can produce an IdiomStore
//                      (JsonIdiomLoader reads a directory of .json files)
//   LanguageDetector — anything that can guess a sentence's language
//                      (WhatlangDetector wraps the whatlang crate)
//
// The application layer only sees these traits, so tests can hand
// DetectUseCase an in-memory store and a scripted detector.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::data::store::IdiomStore;

// ─── IdiomSource ──────────────────────────────────────────────────────────────
/// Any component that can build the idiom dictionary.
///
/// Loading is infallible at this level: per-file problems are logged
/// and skipped by the implementation, and a source with nothing in it
/// yields an empty store.
pub trait IdiomSource {
    fn load_all(&self) -> IdiomStore;
}

// ─── LanguageDetector ─────────────────────────────────────────────────────────
/// Text in, language code or failure out.
///
/// Implementations report failure as `None`; callers map it to the
/// `"unknown"` sentinel via [`tag_language`].
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Option<String>;
}

/// Sentinel returned when no language could be determined
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Run a detector and fall back to [`UNKNOWN_LANGUAGE`] on failure.
pub fn tag_language(detector: &dyn LanguageDetector, text: &str) -> String {
    detector
        .detect(text)
        .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
}

// ============================================================
// Layer 2 — Detect Use Case
// ============================================================
// The single orchestration path behind every delivery surface
// (console loop, one-shot CLI, HTTP endpoint):
//
//   1. matcher::find over the store
//   2. not found → DetectionResult::not_found(), nothing else runs
//   3. found     → fetch the record, tag the ORIGINAL sentence's
//                  language, assemble the result
//
// The store is loaded once and shared behind an Arc; nothing here
// mutates it.

use std::{path::Path, sync::Arc};

use crate::data::{loader::JsonIdiomLoader, matcher, store::IdiomStore};
use crate::domain::{
    idiom::DetectionResult,
    traits::{tag_language, IdiomSource, LanguageDetector},
};
use crate::infra::language::WhatlangDetector;

pub struct DetectUseCase {
    store:    Arc<IdiomStore>,
    detector: Box<dyn LanguageDetector>,
}

impl DetectUseCase {
    pub fn new(store: Arc<IdiomStore>, detector: Box<dyn LanguageDetector>) -> Self {
        Self { store, detector }
    }

    /// Load every idiom file in `dir` and pair the store with the
    /// whatlang detector.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let store = JsonIdiomLoader::new(dir.as_ref()).load_all();
        if store.is_empty() {
            tracing::warn!(
                "No idioms loaded from '{}'; every sentence will report no idiom",
                dir.as_ref().display()
            );
        }
        Self::new(Arc::new(store), Box::new(WhatlangDetector::new()))
    }

    pub fn store(&self) -> &IdiomStore {
        &self.store
    }

    pub fn analyze(&self, sentence: &str) -> DetectionResult {
        analyze(&self.store, self.detector.as_ref(), sentence)
    }
}

/// Find the first idiom in `sentence` and describe it.
pub fn analyze(
    store:    &IdiomStore,
    detector: &dyn LanguageDetector,
    sentence: &str,
) -> DetectionResult {
    let Some(phrase) = matcher::find(store, sentence) else {
        tracing::debug!("No idiom in {:?}", sentence);
        return DetectionResult::not_found();
    };

    // The phrase came from the store, so the lookup cannot miss
    let Some(record) = store.get(phrase) else {
        return DetectionResult::not_found();
    };

    let language = tag_language(detector, sentence);
    tracing::debug!("Matched '{}' (language={})", phrase, language);

    DetectionResult::found(record, language)
}

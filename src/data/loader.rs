// ============================================================
// Layer 4 — Idiom Loader
// ============================================================
// Loads idiom records from every .json file directly inside a
// directory (non-recursive) into an IdiomStore.
//
// Expected file shape:
//   [
//     { "idiom": "kick the bucket",
//       "literal_meaning": "...",
//       "figurative_meaning": "...",
//       "example": "..." },
//     ...
//   ]
//
// Files are visited in file-name order so two loads of the same
// directory always produce the same store, including which record
// wins on duplicate phrases (the later file).
//
// A bad file never aborts the load. Each failure is classified as
// a LoadError, logged, and the loader moves on.
//
// Reference: Rust Book §9 (Error Handling)

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::Value;
use thiserror::Error;

use crate::data::store::IdiomStore;
use crate::domain::idiom::IdiomRecord;
use crate::domain::traits::IdiomSource;

// ─── LoadError ────────────────────────────────────────────────────────────────
/// Why a single idiom file was skipped.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read '{}': {source}", path.display())]
    Unreadable {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed JSON in '{}': {source}", path.display())]
    MalformedJson {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a JSON list in '{}', found {found}", path.display())]
    WrongShape {
        path:  PathBuf,
        found: &'static str,
    },
}

// ─── JsonIdiomLoader ──────────────────────────────────────────────────────────
/// Reads a directory of idiom JSON files.
/// Implements the IdiomSource trait from Layer 3.
pub struct JsonIdiomLoader {
    dir: PathBuf,
}

impl JsonIdiomLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl IdiomSource for JsonIdiomLoader {
    fn load_all(&self) -> IdiomStore {
        tracing::info!("Loading idiom files from '{}'", self.dir.display());
        if !self.dir.exists() {
            tracing::warn!("Idiom directory '{}' does not exist", self.dir.display());
        }

        let files = match json_files_in(&self.dir) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(
                    "Cannot list idiom directory '{}': {}; starting with an empty store",
                    self.dir.display(),
                    e
                );
                return IdiomStore::new();
            }
        };

        let mut store = IdiomStore::new();

        for path in files {
            match load_file(&path) {
                Ok(records) => {
                    tracing::debug!("{}: {} idioms", path.display(), records.len());
                    for record in records {
                        store.insert(record);
                    }
                }
                Err(e) => tracing::warn!("Skipping idiom file: {}", e),
            }
        }

        tracing::info!("Loaded {} idioms", store.len());
        store
    }
}

/// Every `*.json` file directly inside `dir`, sorted by file name.
///
/// A missing directory is not an error: it yields no files.
pub(crate) fn json_files_in(dir: &Path) -> io::Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read and parse one file as JSON, keeping the I/O and syntax
/// failures distinguishable.
pub(crate) fn read_json(path: &Path) -> Result<Value, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&text).map_err(|source| LoadError::MalformedJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse one idiom file into records, in file order.
fn load_file(path: &Path) -> Result<Vec<IdiomRecord>, LoadError> {
    let value = read_json(path)?;

    let Value::Array(entries) = value else {
        return Err(LoadError::WrongShape {
            path:  path.to_path_buf(),
            found: json_kind(&value),
        });
    };

    Ok(entries.iter().filter_map(record_from_entry).collect())
}

/// Turn one list element into a record.
/// Returns None when the element has no usable `idiom` phrase.
fn record_from_entry(entry: &Value) -> Option<IdiomRecord> {
    let phrase = str_field(entry, "idiom");
    if phrase.is_empty() {
        return None;
    }

    Some(IdiomRecord::new(
        phrase,
        str_field(entry, "literal_meaning"),
        str_field(entry, "figurative_meaning"),
        str_field(entry, "example"),
    ))
}

/// A trimmed string field, or "" when missing or not a string.
pub(crate) fn str_field<'a>(entry: &'a Value, key: &str) -> &'a str {
    entry.get(key).and_then(Value::as_str).unwrap_or("").trim()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null      => "null",
        Value::Bool(_)   => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_)  => "a list",
        Value::Object(_) => "an object",
    }
}

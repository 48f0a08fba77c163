//! Persisted language preference.
//!
//! The store hands back the raw saved value; deciding whether it is a
//! recognized language is the resolver's job, so a stale or hand-edited
//! value degrades to locale detection instead of an error.

use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("failed to write preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where the language choice survives between sessions.
pub trait PreferenceStore: Send {
    /// The raw saved language value, if any.
    fn load_language(&self) -> Option<String>;

    /// Persist an explicit language choice.
    fn save_language(&mut self, language: Language) -> Result<(), PreferenceError>;
}

/// In-memory store.
///
/// Used by tests and by the HTTP host, which seeds it from the request cookie
/// and turns a recorded write into a `Set-Cookie` header.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    saved: Option<String>,
    written: Option<Language>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously saved raw value.
    pub fn with_saved(raw: impl Into<String>) -> Self {
        Self {
            saved: Some(raw.into()),
            written: None,
        }
    }

    /// The last language written through `save_language`, if any.
    pub fn written(&self) -> Option<Language> {
        self.written
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_language(&self) -> Option<String> {
        self.saved.clone()
    }

    fn save_language(&mut self, language: Language) -> Result<(), PreferenceError> {
        self.saved = Some(language.code().to_string());
        self.written = Some(language);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PreferenceFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

/// JSON file store (`{"language": "fr"}`), used by the command-line host.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Option<PreferenceFile> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No preference file at {}", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read preference file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!("Ignoring malformed preference file {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load_language(&self) -> Option<String> {
        self.read().and_then(|file| file.language)
    }

    fn save_language(&mut self, language: Language) -> Result<(), PreferenceError> {
        let file = PreferenceFile {
            language: Some(language.code().to_string()),
        };
        let json = serde_json::to_string_pretty(&file)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PreferenceError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, json).map_err(|source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ==================== Memory Store Tests ====================

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.load_language(), None);
        assert_eq!(store.written(), None);
    }

    #[test]
    fn test_memory_store_seeded_value_is_raw() {
        let store = MemoryPreferenceStore::with_saved("de");
        assert_eq!(store.load_language(), Some("de".to_string()));
    }

    #[test]
    fn test_memory_store_records_writes() {
        let mut store = MemoryPreferenceStore::with_saved("en");
        store.save_language(Language::Fr).expect("Should save");
        assert_eq!(store.load_language(), Some("fr".to_string()));
        assert_eq!(store.written(), Some(Language::Fr));
    }

    // ==================== File Store Tests ====================

    #[test]
    fn test_file_store_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FilePreferenceStore::new(temp_dir.path().join("language.json"));
        assert_eq!(store.load_language(), None);
    }

    #[test]
    fn test_file_store_roundtrip_creates_parent_dirs() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("language.json");
        let mut store = FilePreferenceStore::new(&path);

        store.save_language(Language::Fr).expect("Should save");
        assert!(path.exists());

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(reopened.load_language(), Some("fr".to_string()));
    }

    #[test]
    fn test_file_store_malformed_file_is_ignored() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("language.json");
        fs::write(&path, "not json").expect("write");

        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.load_language(), None);
    }

    #[test]
    fn test_file_store_file_without_language() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("language.json");
        fs::write(&path, "{}").expect("write");

        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.load_language(), None);
    }

    #[test]
    fn test_file_store_write_error_is_typed() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        // A directory where the file should be makes the write fail
        let path = temp_dir.path().join("language.json");
        fs::create_dir(&path).expect("mkdir");

        let mut store = FilePreferenceStore::new(&path);
        let err = store.save_language(Language::En).unwrap_err();
        assert!(matches!(err, PreferenceError::Io { .. }));
    }
}

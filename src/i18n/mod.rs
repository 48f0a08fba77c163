//! Translation resolution for the site's two languages.
//!
//! - `language`: the closed `Language` set and locale-hint mapping
//! - `dictionary`: immutable per-language JSON trees and tagged lookup
//! - `resolver`: `Translator`, the active language with key-fallback resolution
//! - `preferences`: where the explicit language choice is persisted
//! - `validator`: cross-language dictionary checks
//! - `metrics`: resolution and lead counters
//!
//! # Example
//!
//! ```rust,ignore
//! use coris_site::i18n::{MemoryPreferenceStore, TranslationDictionary, Translator};
//!
//! let mut store = MemoryPreferenceStore::new();
//! let t = Translator::initialize(TranslationDictionary::bundled(), &mut store, Some("fr-FR"));
//! assert_eq!(t.resolve("nav.doesnotexist"), "nav.doesnotexist");
//! ```

mod dictionary;
mod language;
mod metrics;
mod preferences;
mod resolver;
mod validator;

pub use dictionary::{Lookup, Miss, TranslationDictionary};
pub use language::{Language, DEFAULT_LANGUAGE};
pub use metrics::{MetricsReport, TranslationMetrics};
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceError, PreferenceStore};
pub use resolver::Translator;
pub use validator::{DictionaryValidator, ValidationReport};

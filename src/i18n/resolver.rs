//! Translation resolver: the active language plus total key resolution.
//!
//! A `Translator` is the application-level handle every page composition
//! reads display text through. Resolution never fails: a key that does not
//! lead to a string comes back verbatim and a warning is logged, so a missing
//! translation shows up on the page as its own key.

use crate::i18n::{Language, Lookup, Miss, PreferenceStore, TranslationDictionary, TranslationMetrics};
use tracing::{info, warn};

pub struct Translator<'a> {
    dictionary: &'a TranslationDictionary,
    store: &'a mut dyn PreferenceStore,
    metrics: &'a TranslationMetrics,
    language: Language,
}

impl<'a> Translator<'a> {
    /// Pick the starting language.
    ///
    /// A saved preference wins when it is a recognized code; otherwise the
    /// locale hint decides (any "fr" variant is French, everything else is
    /// English); with neither, the default language applies. Nothing is
    /// written to the store here.
    pub fn initialize(
        dictionary: &'a TranslationDictionary,
        store: &'a mut dyn PreferenceStore,
        locale_hint: Option<&str>,
    ) -> Self {
        let saved = store
            .load_language()
            .and_then(|raw| match Language::from_code(&raw) {
                Ok(language) => Some(language),
                Err(e) => {
                    warn!("Ignoring saved language preference: {}", e);
                    None
                }
            });

        let language = match (saved, locale_hint) {
            (Some(language), _) => {
                info!("Using saved language preference: {}", language);
                language
            }
            (None, Some(hint)) => {
                let language = Language::from_locale_hint(hint);
                info!("Detected language {} from locale hint '{}'", language, hint);
                language
            }
            (None, None) => Language::default(),
        };

        Self {
            dictionary,
            store,
            metrics: TranslationMetrics::global(),
            language,
        }
    }

    /// Record into the given metrics instead of the process-wide counters.
    pub fn with_metrics(mut self, metrics: &'a TranslationMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn dictionary(&self) -> &'a TranslationDictionary {
        self.dictionary
    }

    /// Tagged lookup in the active language, without fallback or logging.
    pub fn lookup(&self, key: &str) -> Lookup<'a> {
        self.dictionary.lookup(self.language, key)
    }

    /// Resolve a dotted key to display text, falling back to the key itself.
    pub fn resolve(&self, key: &str) -> String {
        match self.lookup(key) {
            Lookup::Found(value) => {
                self.metrics.record_resolution_hit();
                value.to_string()
            }
            Lookup::Missing(miss) => {
                self.metrics.record_resolution_miss();
                match miss {
                    Miss::NoDictionary => warn!(
                        key,
                        language = %self.language,
                        "Translation key not found: no dictionary for language"
                    ),
                    Miss::StoppedAt { segment } => warn!(
                        key,
                        language = %self.language,
                        stopped_at = %segment,
                        "Translation key not found"
                    ),
                    Miss::NotAString => warn!(
                        key,
                        language = %self.language,
                        "Translation key does not lead to a string"
                    ),
                }
                key.to_string()
            }
        }
    }

    /// Resolve a key and replace each literal `{name}` placeholder with its value.
    ///
    /// Placeholders without a value are left untouched.
    pub fn resolve_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut text = self.resolve(key);
        for (name, value) in params {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }

    /// Switch the active language and persist the choice.
    ///
    /// A failing store is logged; the switch still takes effect for this session.
    pub fn set_language(&mut self, language: Language) {
        if let Err(e) = self.store.save_language(language) {
            warn!("Failed to persist language preference: {}", e);
        }
        if language != self.language {
            info!("Language changed: {} -> {}", self.language, language);
        }
        self.language = language;
        self.metrics.record_language_change();
    }
}

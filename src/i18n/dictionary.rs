//! Translation dictionary: per-language JSON trees addressed by dotted keys.
//!
//! Each language owns a tree of string leaves (`{"nav": {"home": "Home"}}`).
//! A key is first tried verbatim as a top-level entry, which lets a dictionary
//! carry flat keys such as `"brand.name"`, and is otherwise walked segment by
//! segment. The dictionary never mutates after loading.

use crate::i18n::Language;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Why a lookup did not produce a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Miss {
    /// No tree is loaded for the language.
    NoDictionary,
    /// The walk stopped because `segment` was absent or its parent was not a mapping.
    StoppedAt { segment: String },
    /// The walk completed on a mapping, number, bool or null.
    NotAString,
}

/// Outcome of a dictionary lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a str),
    Missing(Miss),
}

/// Immutable set of translation trees, one per language.
#[derive(Debug, Clone, Default)]
pub struct TranslationDictionary {
    trees: HashMap<Language, Value>,
}

static BUNDLED: OnceLock<TranslationDictionary> = OnceLock::new();

impl TranslationDictionary {
    /// The dictionaries compiled into the binary (`i18n/*.json`).
    ///
    /// # Panics
    /// Panics if a bundled file is not valid JSON. The bundled files are
    /// checked by the test suite and by the `check-translations` binary.
    pub fn bundled() -> &'static TranslationDictionary {
        BUNDLED.get_or_init(|| {
            TranslationDictionary::from_sources(&[
                (Language::Fr, include_str!("../../i18n/fr.json")),
                (Language::En, include_str!("../../i18n/en.json")),
            ])
            .expect("bundled dictionaries should be valid JSON")
        })
    }

    /// Parse a dictionary from raw JSON sources.
    pub fn from_sources(sources: &[(Language, &str)]) -> Result<Self> {
        let mut trees = HashMap::with_capacity(sources.len());
        for (language, raw) in sources {
            let tree: Value = serde_json::from_str(raw)
                .with_context(|| format!("Failed to parse {} dictionary", language.code()))?;
            trees.insert(*language, tree);
        }
        Ok(Self { trees })
    }

    /// Build a dictionary from already-parsed trees.
    pub fn from_trees(trees: impl IntoIterator<Item = (Language, Value)>) -> Self {
        Self {
            trees: trees.into_iter().collect(),
        }
    }

    /// Raw tree for a language, if loaded.
    pub fn tree(&self, language: Language) -> Option<&Value> {
        self.trees.get(&language)
    }

    pub fn has_language(&self, language: Language) -> bool {
        self.trees.contains_key(&language)
    }

    /// Look up a dotted key in one language.
    ///
    /// Resolution order:
    /// 1. the key verbatim as a top-level entry whose value is a string
    /// 2. a segment-by-segment walk over nested mappings ending on a string
    pub fn lookup(&self, language: Language, key: &str) -> Lookup<'_> {
        let Some(root) = self.trees.get(&language) else {
            return Lookup::Missing(Miss::NoDictionary);
        };

        if let Some(Value::String(value)) = root.get(key) {
            return Lookup::Found(value);
        }

        let mut node = root;
        for segment in key.split('.') {
            match node {
                Value::Object(map) => match map.get(segment) {
                    Some(child) => node = child,
                    None => {
                        return Lookup::Missing(Miss::StoppedAt {
                            segment: segment.to_string(),
                        })
                    }
                },
                _ => {
                    return Lookup::Missing(Miss::StoppedAt {
                        segment: segment.to_string(),
                    })
                }
            }
        }

        match node {
            Value::String(value) => Lookup::Found(value),
            _ => Lookup::Missing(Miss::NotAString),
        }
    }

    /// Every leaf key of a language as a dotted path, sorted.
    ///
    /// Top-level keys that already contain dots are reported verbatim.
    pub fn keys(&self, language: Language) -> Vec<String> {
        let mut keys = Vec::new();
        if let Some(root) = self.trees.get(&language) {
            collect_leaf_keys(root, "", &mut keys);
        }
        keys.sort();
        keys
    }
}

fn collect_leaf_keys(node: &Value, prefix: &str, out: &mut Vec<String>) {
    match node {
        Value::Object(map) => {
            for (segment, child) in map {
                let path = if prefix.is_empty() {
                    segment.clone()
                } else {
                    format!("{}.{}", prefix, segment)
                };
                collect_leaf_keys(child, &path, out);
            }
        }
        _ => out.push(prefix.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> TranslationDictionary {
        TranslationDictionary::from_trees([
            (
                Language::En,
                json!({
                    "brand.name": "Flat Brand",
                    "nav": { "home": "Home", "count": 3 },
                    "deep": { "a": { "b": { "c": "leaf" } } },
                    "plain": "text"
                }),
            ),
            (Language::Fr, json!({ "nav": { "home": "Accueil" } })),
        ])
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_lookup_flat_key_first() {
        let dict = sample();
        assert_eq!(
            dict.lookup(Language::En, "brand.name"),
            Lookup::Found("Flat Brand")
        );
    }

    #[test]
    fn test_lookup_nested_key() {
        let dict = sample();
        assert_eq!(dict.lookup(Language::En, "nav.home"), Lookup::Found("Home"));
        assert_eq!(dict.lookup(Language::Fr, "nav.home"), Lookup::Found("Accueil"));
        assert_eq!(dict.lookup(Language::En, "deep.a.b.c"), Lookup::Found("leaf"));
    }

    #[test]
    fn test_lookup_missing_segment_reports_where_walk_stopped() {
        let dict = sample();
        assert_eq!(
            dict.lookup(Language::En, "nav.doesnotexist"),
            Lookup::Missing(Miss::StoppedAt {
                segment: "doesnotexist".to_string()
            })
        );
        assert_eq!(
            dict.lookup(Language::En, "missing.key"),
            Lookup::Missing(Miss::StoppedAt {
                segment: "missing".to_string()
            })
        );
    }

    #[test]
    fn test_lookup_walk_through_string_aborts() {
        let dict = sample();
        assert_eq!(
            dict.lookup(Language::En, "plain.more"),
            Lookup::Missing(Miss::StoppedAt {
                segment: "more".to_string()
            })
        );
    }

    #[test]
    fn test_lookup_non_string_terminal() {
        let dict = sample();
        assert_eq!(
            dict.lookup(Language::En, "nav"),
            Lookup::Missing(Miss::NotAString)
        );
        assert_eq!(
            dict.lookup(Language::En, "nav.count"),
            Lookup::Missing(Miss::NotAString)
        );
    }

    #[test]
    fn test_lookup_without_language_tree() {
        let dict = TranslationDictionary::from_trees([(Language::En, json!({"a": "b"}))]);
        assert_eq!(
            dict.lookup(Language::Fr, "a"),
            Lookup::Missing(Miss::NoDictionary)
        );
        assert!(!dict.has_language(Language::Fr));
    }

    #[test]
    fn test_lookup_empty_key() {
        let dict = sample();
        assert!(matches!(dict.lookup(Language::En, ""), Lookup::Missing(_)));
    }

    // ==================== Keys Tests ====================

    #[test]
    fn test_keys_enumerates_leaves_sorted() {
        let dict = sample();
        assert_eq!(
            dict.keys(Language::En),
            vec!["brand.name", "deep.a.b.c", "nav.count", "nav.home", "plain"]
        );
        assert!(dict.keys(Language::Fr).contains(&"nav.home".to_string()));
    }

    // ==================== Loading Tests ====================

    #[test]
    fn test_from_sources_rejects_invalid_json() {
        let result = TranslationDictionary::from_sources(&[(Language::En, "{ not json")]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("en dictionary"));
    }

    #[test]
    fn test_bundled_dictionaries_load() {
        let dict = TranslationDictionary::bundled();
        for language in Language::ALL {
            assert!(dict.has_language(language));
            assert!(!dict.keys(language).is_empty());
        }
        assert!(std::ptr::eq(dict, TranslationDictionary::bundled()));
    }

    #[test]
    fn test_bundled_flat_key() {
        let dict = TranslationDictionary::bundled();
        assert_eq!(
            dict.lookup(Language::En, "brand.name"),
            Lookup::Found("Coris Digital®")
        );
    }
}

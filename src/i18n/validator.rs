//! Dictionary validation.
//!
//! Compares the language trees of a `TranslationDictionary` so that a key
//! rendered by any page resolves in every language. Structural problems are
//! errors; differences that are usually deliberate (brand names left
//! untranslated) or suspicious (placeholder sets that drifted apart) are
//! warnings.

use crate::i18n::{Language, Lookup, TranslationDictionary};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Problems that make a key render as its raw text in some language
    pub errors: Vec<String>,

    /// Non-critical findings worth a look
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

pub struct DictionaryValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl DictionaryValidator {
    /// Validate every supported language of `dictionary` against the others.
    pub fn validate(dictionary: &TranslationDictionary) -> ValidationReport {
        let mut report = ValidationReport::new();

        for language in Language::ALL {
            match dictionary.tree(language) {
                None => report
                    .errors
                    .push(format!("No dictionary loaded for {}", language)),
                Some(tree) => Self::check_leaves(language, tree, "", &mut report),
            }
        }

        let [first, second] = Language::ALL;
        let first_keys: BTreeSet<String> = dictionary.keys(first).into_iter().collect();
        let second_keys: BTreeSet<String> = dictionary.keys(second).into_iter().collect();

        for key in first_keys.difference(&second_keys) {
            report.errors.push(format!(
                "Key '{}' present in {} but missing in {}",
                key, first, second
            ));
        }
        for key in second_keys.difference(&first_keys) {
            report.errors.push(format!(
                "Key '{}' present in {} but missing in {}",
                key, second, first
            ));
        }

        for key in first_keys.intersection(&second_keys) {
            let (Lookup::Found(a), Lookup::Found(b)) =
                (dictionary.lookup(first, key), dictionary.lookup(second, key))
            else {
                continue;
            };

            let a_placeholders = Self::extract_placeholders(a);
            let b_placeholders = Self::extract_placeholders(b);
            if a_placeholders != b_placeholders {
                report.warnings.push(format!(
                    "Placeholder mismatch for '{}': {} has {:?}, {} has {:?}",
                    key, first, a_placeholders, second, b_placeholders
                ));
            }

            if a == b {
                report.warnings.push(format!(
                    "Key '{}' has the same value in {} and {}: {:?}",
                    key, first, second, a
                ));
            }
        }

        report
    }

    fn check_leaves(language: Language, node: &Value, path: &str, report: &mut ValidationReport) {
        match node {
            Value::Object(map) => {
                if map.is_empty() && !path.is_empty() {
                    report
                        .errors
                        .push(format!("Key '{}' in {} is an empty section", path, language));
                }
                for (segment, child) in map {
                    let child_path = if path.is_empty() {
                        segment.clone()
                    } else {
                        format!("{}.{}", path, segment)
                    };
                    Self::check_leaves(language, child, &child_path, report);
                }
            }
            Value::String(value) if value.trim().is_empty() => {
                report
                    .errors
                    .push(format!("Key '{}' in {} is an empty string", path, language));
            }
            Value::String(_) => {}
            other => report.errors.push(format!(
                "Key '{}' in {} is not a string: {}",
                path, language, other
            )),
        }
    }

    /// Distinct `{placeholder}` names in a value.
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{(\w+)\}").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

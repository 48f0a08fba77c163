//! Language type: the closed set of languages the site is published in.
//!
//! Unlike a free-form locale string, a `Language` can only ever be one of the
//! languages that have a bundled dictionary, so every lookup site can rely on
//! a dictionary tree existing for it.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// French.
    Fr,
    /// English (default).
    En,
}

/// Language used when neither a saved preference nor a locale hint applies.
pub const DEFAULT_LANGUAGE: Language = Language::En;

impl Language {
    /// All supported languages in switcher order.
    pub const ALL: [Language; 2] = [Language::Fr, Language::En];

    /// Two-letter code (e.g. "fr", "en").
    pub const fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }

    /// English name of the language.
    pub const fn name(self) -> &'static str {
        match self {
            Language::Fr => "French",
            Language::En => "English",
        }
    }

    /// Name of the language in the language itself.
    pub const fn native_name(self) -> &'static str {
        match self {
            Language::Fr => "Français",
            Language::En => "English",
        }
    }

    /// Parse an exact language code.
    ///
    /// Only the bare codes are accepted; this is the check applied to a
    /// persisted preference, which is always written by `code()`.
    ///
    /// # Returns
    /// * `Ok(Language)` for "fr" or "en"
    /// * `Err` for anything else, including region-qualified tags
    pub fn from_code(code: &str) -> Result<Language> {
        match code {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            other => bail!("Unknown language code: '{}'", other),
        }
    }

    /// Map an environment locale hint (e.g. "fr-FR", "en_US", "de") to a
    /// language.
    ///
    /// Any tag whose primary subtag is "fr" maps to French; everything else,
    /// including an empty hint, maps to English.
    pub fn from_locale_hint(hint: &str) -> Language {
        let primary = hint
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        if primary == "fr" {
            Language::Fr
        } else {
            Language::En
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        DEFAULT_LANGUAGE
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Language::from_code(s)
    }
}

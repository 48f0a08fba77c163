//! Check the translation dictionaries for keys that would render raw.
//!
//! Usage:
//!   cargo run --bin check-translations                 # bundled dictionaries
//!   cargo run --bin check-translations -- --dir i18n   # edited copies on disk
//!   cargo run --bin check-translations -- --json       # machine-readable report
//!
//! Exits with status 1 when the report contains errors.

use anyhow::{Context, Result};
use coris_site::i18n::{DictionaryValidator, Language, TranslationDictionary};
use std::fs;
use std::path::Path;

fn load_dir(dir: &Path) -> Result<TranslationDictionary> {
    let mut sources = Vec::new();
    for language in Language::ALL {
        let path = dir.join(format!("{}.json", language.code()));
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        sources.push((language, raw));
    }

    let borrowed: Vec<(Language, &str)> = sources
        .iter()
        .map(|(language, raw)| (*language, raw.as_str()))
        .collect();
    TranslationDictionary::from_sources(&borrowed)
}

fn main() -> Result<()> {
    let mut dir = None;
    let mut json = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--dir" => dir = Some(args.next().context("--dir needs a path")?),
            "--json" => json = true,
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    let loaded;
    let dictionary = match &dir {
        Some(dir) => {
            loaded = load_dir(Path::new(dir))?;
            &loaded
        }
        None => TranslationDictionary::bundled(),
    };

    let report = DictionaryValidator::validate(dictionary);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for language in Language::ALL {
            println!("{}: {} keys", language.name(), dictionary.keys(language).len());
        }
        for error in &report.errors {
            println!("ERROR   {}", error);
        }
        for warning in &report.warnings {
            println!("WARNING {}", warning);
        }
        println!(
            "{} error(s), {} warning(s)",
            report.errors.len(),
            report.warnings.len()
        );
    }

    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

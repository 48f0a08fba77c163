//! Preview strategy binary - runs the AI planner from the terminal
//!
//! Usage:
//!   cargo run --bin preview-strategy -- "I run a bakery and want online orders"
//!   echo "..." | cargo run --bin preview-strategy
//!   cargo run --bin preview-strategy -- --lang fr "Je gère une boulangerie"
//!
//! Required environment variables:
//! - GEMINI_API_KEY
//!
//! Optional:
//! - GEMINI_MODEL (defaults to gemini-3-pro-preview)
//! - LANGUAGE_FILE (defaults to data/language.json)
//! - PLANNER_DELAY_MS (defaults to 800)

use anyhow::{Context, Result};
use coris_site::config::Config;
use coris_site::i18n::{FilePreferenceStore, Language, TranslationDictionary, Translator};
use coris_site::strategy::{GeminiClient, Planner, PlannerRefusal, StrategyLine};
use std::io::Read;
use std::time::Duration;
use tracing::info;

struct Args {
    language: Option<Language>,
    context: String,
}

fn parse_args() -> Result<Args> {
    let mut language = None;
    let mut words = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--lang" {
            let code = args.next().context("--lang needs a value (fr or en)")?;
            language = Some(Language::from_code(&code)?);
        } else {
            words.push(arg);
        }
    }

    let context = if words.is_empty() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read business context from stdin")?;
        buf
    } else {
        words.join(" ")
    };

    Ok(Args { language, context })
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("coris_site=info".parse()?),
        )
        .init();

    let args = parse_args()?;
    let config = Config::from_env()?;

    let mut store = FilePreferenceStore::new(&config.language_file);
    let locale_hint = std::env::var("LANG").ok();
    let mut translator = Translator::initialize(
        TranslationDictionary::bundled(),
        &mut store,
        locale_hint.as_deref(),
    );
    if let Some(language) = args.language {
        translator.set_language(language);
    }

    info!(
        "Planner language: {} (preference file {})",
        translator.language(),
        config.language_file
    );

    let completer = GeminiClient::new(&config)?;
    let mut planner = Planner::new(Duration::from_millis(config.planner_delay_ms));
    planner.set_input(&args.context);

    println!("{}", translator.resolve("planner.title"));
    println!("{}", translator.resolve("planner.analyzing"));

    match planner.generate(&completer).await {
        Ok(_) => {}
        Err(PlannerRefusal::EmptyInput) => {
            eprintln!("{}", translator.resolve("planner.empty"));
            std::process::exit(2);
        }
        Err(PlannerRefusal::Busy) => anyhow::bail!("Planner is already running"),
    }

    println!("\n{}\n", translator.resolve("planner.complete"));
    for line in planner.lines() {
        match line {
            StrategyLine::Heading(text) => println!("\n{}", text),
            StrategyLine::Bullet(text) => println!("  • {}", text),
            StrategyLine::Step(text) => println!("  {}", text),
            StrategyLine::Text(text) => println!("{}", text),
        }
    }
    println!("\n{}", translator.resolve("planner.nextStep"));

    Ok(())
}

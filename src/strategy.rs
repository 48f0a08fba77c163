//! Strategy generation: the Gemini text completion client, the prompt, the
//! planner state and the parser for the light markup the model answers in.

use crate::config::Config;
use crate::i18n::TranslationMetrics;
use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{error, info, warn};

/// Shown when the model answers with no text.
pub const EMPTY_RESPONSE_MESSAGE: &str =
    "Sorry, I couldn't generate a strategy at the moment. Please try again.";

/// Shown when the call itself fails.
pub const ERROR_RESPONSE_MESSAGE: &str =
    "An error occurred while analyzing your request. Please check your connection or try again later.";

/// Capability that turns a prompt into text.
///
/// Implementations never fail: a failure is reported as an apologetic text,
/// which callers display like any other answer.
#[async_trait]
pub trait StrategyCompleter: Send + Sync {
    async fn complete(&self, prompt: &str) -> String;
}

/// Prompt asking for a three-part recommendation for `context`.
pub fn build_strategy_prompt(context: &str) -> String {
    format!(
        r#"You are "Coris Digital® AI", a senior software architect and digital strategist at the Coris Digital® agency.

A prospective client described their business situation:
"{}"

Answer in English with a short, professional recommendation in exactly three parts:

**1. Quick analysis**
Two or three sentences on the real bottleneck behind the situation.

**2. Recommended solutions**
Three concrete digital solutions (website, custom software, automation or app), one bullet each, starting with "-".

**3. Expected impact**
Numbered steps ("1.", "2.", ...) describing the measurable results the client can expect.

Start every section heading with "**". Stay under 250 words. Do not add any closing remarks."#,
        context.trim()
    )
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Gemini `generateContent` client.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: config.gemini_api_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .context("GEMINI_API_KEY not set")?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.api_url, self.model))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error ({}): {}", status, body);
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        Ok(generated.text())
    }
}

#[async_trait]
impl StrategyCompleter for GeminiClient {
    async fn complete(&self, prompt: &str) -> String {
        let metrics = TranslationMetrics::global();
        metrics.record_strategy_request();

        match self.generate(prompt).await {
            Ok(text) if text.trim().is_empty() => {
                warn!("Gemini returned an empty strategy");
                metrics.record_strategy_failure();
                EMPTY_RESPONSE_MESSAGE.to_string()
            }
            Ok(text) => {
                info!("Generated strategy ({} chars)", text.len());
                text
            }
            Err(e) => {
                error!("Strategy generation failed: {:#}", e);
                metrics.record_strategy_failure();
                ERROR_RESPONSE_MESSAGE.to_string()
            }
        }
    }
}

/// One presentational line of a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum StrategyLine {
    /// `**Heading**`, markers removed and upper-cased
    Heading(String),
    /// `- item`, dash removed
    Bullet(String),
    /// `1. step`, kept verbatim
    Step(String),
    /// Anything else, `**` removed
    Text(String),
}

static STEP_REGEX: OnceLock<Regex> = OnceLock::new();

/// Split a strategy into presentational lines. Blank lines are dropped.
pub fn parse_strategy(text: &str) -> Vec<StrategyLine> {
    let step = STEP_REGEX.get_or_init(|| Regex::new(r"^\d\.").unwrap());

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.starts_with("**") {
                StrategyLine::Heading(line.replace("**", "").trim().to_uppercase())
            } else if let Some(rest) = line.strip_prefix('-') {
                StrategyLine::Bullet(rest.trim().to_string())
            } else if step.is_match(line) {
                StrategyLine::Step(line.to_string())
            } else {
                StrategyLine::Text(line.replace("**", ""))
            }
        })
        .collect()
}

/// Why the planner did not produce a new answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerRefusal {
    /// The description is blank.
    EmptyInput,
    /// A generation is already running.
    Busy,
}

/// State of the AI planner panel.
#[derive(Debug, Clone)]
pub struct Planner {
    input: String,
    in_flight: bool,
    response: Option<String>,
    delay: Duration,
}

impl Planner {
    /// `delay` is the pause before dispatch that keeps the "analyzing" state visible.
    pub fn new(delay: Duration) -> Self {
        Self {
            input: String::new(),
            in_flight: false,
            response: None,
            delay,
        }
    }

    pub fn set_input(&mut self, input: &str) {
        self.input = input.to_string();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight && !self.input.trim().is_empty()
    }

    pub fn response(&self) -> Option<&str> {
        self.response.as_deref()
    }

    pub fn lines(&self) -> Vec<StrategyLine> {
        self.response.as_deref().map(parse_strategy).unwrap_or_default()
    }

    /// Run one generation. The previous answer is cleared when dispatching.
    pub async fn generate(
        &mut self,
        completer: &dyn StrategyCompleter,
    ) -> Result<&str, PlannerRefusal> {
        if self.in_flight {
            return Err(PlannerRefusal::Busy);
        }
        if self.input.trim().is_empty() {
            return Err(PlannerRefusal::EmptyInput);
        }

        self.in_flight = true;
        self.response = None;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let prompt = build_strategy_prompt(&self.input);
        let text = completer.complete(&prompt).await;

        self.in_flight = false;
        Ok(self.response.insert(text).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    // ==================== Helper Functions ====================

    fn create_test_config(api_url: &str, api_key: Option<&str>) -> Config {
        Config {
            port: 8080,
            emailjs_service_id: None,
            emailjs_template_id: None,
            emailjs_public_key: None,
            emailjs_api_url: "http://localhost".to_string(),
            lead_recipient: "hello@corisdigital.com".to_string(),
            gemini_api_key: api_key.map(str::to_string),
            gemini_model: "gemini-3-pro-preview".to_string(),
            gemini_api_url: api_url.to_string(),
            planner_delay_ms: 0,
            http_timeout_secs: 5,
            api_key: None,
            language_file: "data/language.json".to_string(),
        }
    }

    fn create_gemini_response(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{ "text": text }]
                    },
                    "finishReason": "STOP"
                }
            ]
        })
    }

    struct EchoCompleter {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl StrategyCompleter for EchoCompleter {
        async fn complete(&self, prompt: &str) -> String {
            self.prompts.lock().unwrap().push(prompt.to_string());
            "**Analysis**\n- Build a site\n1. Grow".to_string()
        }
    }

    // ==================== Prompt Tests ====================

    #[test]
    fn test_prompt_quotes_context_and_structure() {
        let prompt = build_strategy_prompt("  I run a bakery  ");
        assert!(prompt.contains("\"I run a bakery\""));
        assert!(prompt.contains("Coris Digital® AI"));
        assert!(prompt.contains("Quick analysis"));
        assert!(prompt.contains("Recommended solutions"));
        assert!(prompt.contains("Expected impact"));
        assert!(prompt.contains("in English"));
    }

    // ==================== Parser Tests ====================

    #[test]
    fn test_parse_strategy_line_kinds() {
        let text = "**1. Quick analysis**\nYour **checkout** is slow.\n\n- Rebuild the store\n-Automate invoices\n2. Revenue up 30%\n10 clients";
        assert_eq!(
            parse_strategy(text),
            vec![
                StrategyLine::Heading("1. QUICK ANALYSIS".to_string()),
                StrategyLine::Text("Your checkout is slow.".to_string()),
                StrategyLine::Bullet("Rebuild the store".to_string()),
                StrategyLine::Bullet("Automate invoices".to_string()),
                StrategyLine::Step("2. Revenue up 30%".to_string()),
                StrategyLine::Text("10 clients".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_strategy_apology_is_plain_text() {
        assert_eq!(
            parse_strategy(ERROR_RESPONSE_MESSAGE),
            vec![StrategyLine::Text(ERROR_RESPONSE_MESSAGE.to_string())]
        );
    }

    #[test]
    fn test_strategy_line_serialization() {
        let json = serde_json::to_value(StrategyLine::Bullet("x".to_string())).expect("serialize");
        assert_eq!(json, serde_json::json!({"kind": "bullet", "text": "x"}));
    }

    // ==================== Gemini Client Tests ====================

    #[tokio::test]
    async fn test_complete_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-3-pro-preview:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "parts": [{ "text": "hello" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(create_gemini_response("**Plan**")))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = GeminiClient::new(&create_test_config(&mock_server.uri(), Some("test-key")))
            .expect("client");
        assert_eq!(client.complete("hello").await, "**Plan**");
    }

    #[tokio::test]
    async fn test_complete_empty_candidates_apologizes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})))
            .mount(&mock_server)
            .await;

        let client = GeminiClient::new(&create_test_config(&mock_server.uri(), Some("k"))).expect("client");
        assert_eq!(client.complete("hello").await, EMPTY_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn test_complete_api_error_apologizes() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal error"))
            .mount(&mock_server)
            .await;

        let client = GeminiClient::new(&create_test_config(&mock_server.uri(), Some("k"))).expect("client");
        assert_eq!(client.complete("hello").await, ERROR_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn test_complete_without_key_apologizes_without_calling() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = GeminiClient::new(&create_test_config(&mock_server.uri(), None)).expect("client");
        assert_eq!(client.complete("hello").await, ERROR_RESPONSE_MESSAGE);
    }

    // ==================== Planner Tests ====================

    #[tokio::test]
    async fn test_planner_refuses_blank_input() {
        let completer = EchoCompleter {
            prompts: Mutex::new(Vec::new()),
        };
        let mut planner = Planner::new(Duration::ZERO);
        planner.set_input("   ");

        assert!(!planner.can_submit());
        assert_eq!(
            planner.generate(&completer).await,
            Err(PlannerRefusal::EmptyInput)
        );
        assert!(completer.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_planner_generates_and_parses() {
        let completer = EchoCompleter {
            prompts: Mutex::new(Vec::new()),
        };
        let mut planner = Planner::new(Duration::ZERO);
        planner.set_input("I run a bakery");

        let text = planner.generate(&completer).await.expect("Should generate").to_string();
        assert!(text.starts_with("**Analysis**"));
        assert!(!planner.is_in_flight());
        assert_eq!(planner.lines().len(), 3);
        assert!(completer.prompts.lock().unwrap()[0].contains("I run a bakery"));
    }

    #[tokio::test]
    async fn test_planner_waits_before_dispatch() {
        let completer = EchoCompleter {
            prompts: Mutex::new(Vec::new()),
        };
        let mut planner = Planner::new(Duration::from_millis(50));
        planner.set_input("I run a bakery");

        let started = std::time::Instant::now();
        planner.generate(&completer).await.expect("Should generate");
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}

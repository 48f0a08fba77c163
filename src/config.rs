use anyhow::{Context, Result};

pub const DEFAULT_EMAILJS_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const DEFAULT_LEAD_RECIPIENT: &str = "hello@corisdigital.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // EmailJS relay (all three must be set for lead delivery)
    pub emailjs_service_id: Option<String>,
    pub emailjs_template_id: Option<String>,
    pub emailjs_public_key: Option<String>,
    pub emailjs_api_url: String,
    pub lead_recipient: String,

    // Gemini
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_url: String,

    // Planner / outbound calls
    pub planner_delay_ms: u64,
    pub http_timeout_secs: u64,

    // Internal endpoints
    pub api_key: Option<String>,

    // CLI language preference
    pub language_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: match std::env::var("PORT") {
                Ok(raw) => raw
                    .parse()
                    .with_context(|| format!("PORT is not a valid port: {}", raw))?,
                Err(_) => 8080,
            },

            // EmailJS
            emailjs_service_id: non_empty_var("EMAILJS_SERVICE_ID"),
            emailjs_template_id: non_empty_var("EMAILJS_TEMPLATE_ID"),
            emailjs_public_key: non_empty_var("EMAILJS_PUBLIC_KEY"),
            emailjs_api_url: std::env::var("EMAILJS_API_URL")
                .unwrap_or_else(|_| DEFAULT_EMAILJS_API_URL.to_string()),
            lead_recipient: std::env::var("LEAD_RECIPIENT")
                .unwrap_or_else(|_| DEFAULT_LEAD_RECIPIENT.to_string()),

            // Gemini
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),

            planner_delay_ms: std::env::var("PLANNER_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(800),
            http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),

            api_key: non_empty_var("SITE_API_KEY"),

            language_file: std::env::var("LANGUAGE_FILE")
                .unwrap_or_else(|_| "data/language.json".to_string()),
        })
    }

    /// Names of the EmailJS variables that are still unset.
    pub fn missing_emailjs_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.emailjs_service_id.is_none() {
            missing.push("EMAILJS_SERVICE_ID");
        }
        if self.emailjs_template_id.is_none() {
            missing.push("EMAILJS_TEMPLATE_ID");
        }
        if self.emailjs_public_key.is_none() {
            missing.push("EMAILJS_PUBLIC_KEY");
        }
        missing
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

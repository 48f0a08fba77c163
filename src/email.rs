//! Lead delivery through the EmailJS relay.
//!
//! `send` is total: a missing configuration, a transport error and a non-2xx
//! answer all come back as `false` after being logged, so every form handles
//! delivery failure through the same path.

use crate::config::Config;
use crate::i18n::TranslationMetrics;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

/// A lead as issued by one of the site's forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// "hero", "contact" or "service-detail"
    #[serde(default, alias = "formType", skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,
}

/// Capability that delivers a lead to the agency.
#[async_trait]
pub trait LeadSender: Send + Sync {
    /// `true` only on confirmed delivery.
    async fn send(&self, lead: &LeadSubmission) -> bool;
}

#[derive(Debug, Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct TemplateParams {
    to_email: String,
    from_name: String,
    from_email: String,
    phone: String,
    message: String,
    service: String,
    form_type: String,
    reply_to: String,
    submitted_at: String,
}

impl TemplateParams {
    fn build(lead: &LeadSubmission, recipient: &str, submitted_at: String) -> Self {
        fn or_default(value: &Option<String>, default: &str) -> String {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
                .to_string()
        }

        Self {
            to_email: recipient.to_string(),
            from_name: lead.name.clone(),
            from_email: lead.email.clone(),
            phone: or_default(&lead.phone, "Not provided"),
            message: or_default(&lead.message, "No message"),
            service: or_default(&lead.service, "Not specified"),
            form_type: or_default(&lead.form_type, "Form"),
            reply_to: lead.email.clone(),
            submitted_at,
        }
    }
}

#[derive(Debug, Clone)]
struct Credentials {
    service_id: String,
    template_id: String,
    public_key: String,
}

/// EmailJS-backed `LeadSender`.
#[derive(Debug, Clone)]
pub struct EmailRelay {
    client: reqwest::Client,
    api_url: String,
    recipient: String,
    credentials: Option<Credentials>,
    missing: Vec<&'static str>,
}

impl EmailRelay {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let credentials = match (
            &config.emailjs_service_id,
            &config.emailjs_template_id,
            &config.emailjs_public_key,
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => Some(Credentials {
                service_id: service_id.clone(),
                template_id: template_id.clone(),
                public_key: public_key.clone(),
            }),
            _ => None,
        };

        Ok(Self {
            client,
            api_url: config.emailjs_api_url.clone(),
            recipient: config.lead_recipient.clone(),
            credentials,
            missing: config.missing_emailjs_vars(),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn deliver(&self, credentials: &Credentials, lead: &LeadSubmission) -> Result<()> {
        let request = EmailJsRequest {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.public_key,
            template_params: TemplateParams::build(
                lead,
                &self.recipient,
                chrono::Utc::now().to_rfc3339(),
            ),
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to EmailJS")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("EmailJS API error ({}): {}", status, body);
        }

        Ok(())
    }
}

#[async_trait]
impl LeadSender for EmailRelay {
    async fn send(&self, lead: &LeadSubmission) -> bool {
        let metrics = TranslationMetrics::global();

        let Some(credentials) = &self.credentials else {
            error!(
                "EmailJS is not configured, missing: {}",
                self.missing.join(", ")
            );
            metrics.record_lead_failure();
            return false;
        };

        let form_type = lead.form_type.as_deref().unwrap_or("Form");
        match self.deliver(credentials, lead).await {
            Ok(()) => {
                info!("Lead delivered (form: {})", form_type);
                metrics.record_lead_delivery();
                true
            }
            Err(e) => {
                error!("Failed to deliver lead (form: {}): {:#}", form_type, e);
                metrics.record_lead_failure();
                false
            }
        }
    }
}

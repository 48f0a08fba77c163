//! HTTP host for the site.
//!
//! Each page request builds an `App` from the request's language context,
//! renders the requested view and serialises it to HTML. The JSON endpoints
//! drive lead forms and the planner with the same state types the pages use.

use crate::app::App;
use crate::config::Config;
use crate::email::{EmailRelay, LeadSender, LeadSubmission};
use crate::forms::{FormKind, LeadForm, SubmitOutcome};
use crate::html;
use crate::i18n::{Language, MemoryPreferenceStore, TranslationDictionary, TranslationMetrics, Translator};
use crate::pages::compose_tag;
use crate::router::{Navigator, View};
use crate::security::constant_time_compare;
use crate::strategy::{parse_strategy, GeminiClient, Planner, PlannerRefusal, StrategyCompleter, StrategyLine};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::{
        header::{ACCEPT_LANGUAGE, AUTHORIZATION, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Cookie holding the persisted language choice.
pub const LANGUAGE_COOKIE: &str = "lang";

const LANGUAGE_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 365;

#[derive(Clone)]
pub struct AppState {
    pub dictionary: &'static TranslationDictionary,
    pub leads: Arc<dyn LeadSender>,
    pub strategist: Arc<dyn StrategyCompleter>,
    pub planner_delay: Duration,
    pub api_key: Option<String>,
}

impl AppState {
    /// State backed by the bundled dictionaries and the configured collaborators.
    pub fn from_config(config: &Config) -> Result<Self> {
        let relay = EmailRelay::new(config)?;
        if !relay.is_configured() {
            info!(
                "EmailJS not configured ({} missing), lead forms will report failure",
                config.missing_emailjs_vars().join(", ")
            );
        }

        Ok(Self {
            dictionary: TranslationDictionary::bundled(),
            leads: Arc::new(relay),
            strategist: Arc::new(GeminiClient::new(config)?),
            planner_delay: Duration::from_millis(config.planner_delay_ms),
            api_key: config.api_key.clone(),
        })
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    DeliveryFailed(String),

    #[error("{0}")]
    Busy(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::DeliveryFailed(_) => StatusCode::BAD_GATEWAY,
            ApiError::Busy(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = LeadResponse {
            success: false,
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Language inputs carried by one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageContext {
    /// `?lang=` selection, applied as an explicit choice
    pub explicit: Option<Language>,
    /// Raw `lang` cookie value
    pub saved: Option<String>,
    /// Preferred `Accept-Language` tag
    pub hint: Option<String>,
}

impl LanguageContext {
    pub fn from_request(headers: &HeaderMap, lang_param: Option<&str>) -> Self {
        let explicit = lang_param.and_then(|raw| match Language::from_code(raw) {
            Ok(language) => Some(language),
            Err(e) => {
                debug!("Ignoring lang parameter: {}", e);
                None
            }
        });

        let saved = headers
            .get(COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|raw| cookie_value(raw, LANGUAGE_COOKIE));

        let hint = headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .and_then(preferred_language_tag);

        Self {
            explicit,
            saved,
            hint,
        }
    }

    fn store(&self) -> MemoryPreferenceStore {
        match &self.saved {
            Some(raw) => MemoryPreferenceStore::with_saved(raw.clone()),
            None => MemoryPreferenceStore::new(),
        }
    }
}

/// Value of cookie `name` in a `Cookie` header.
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().to_string())
}

/// Highest-weighted tag of an `Accept-Language` header (first wins on ties).
pub fn preferred_language_tag(header: &str) -> Option<String> {
    let mut best: Option<(&str, f64)> = None;

    for part in header.split(',') {
        let mut segments = part.trim().split(';');
        let tag = segments.next().unwrap_or_default().trim();
        if tag.is_empty() || tag == "*" {
            continue;
        }
        let q = segments
            .filter_map(|s| s.trim().strip_prefix("q="))
            .find_map(|v| v.parse::<f64>().ok())
            .unwrap_or(1.0);

        if best.map_or(true, |(_, best_q)| q > best_q) {
            best = Some((tag, q));
        }
    }

    best.map(|(tag, _)| tag.to_string())
}

fn language_cookie(language: Language) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        LANGUAGE_COOKIE,
        language.code(),
        LANGUAGE_COOKIE_MAX_AGE
    ))
    .ok()
}

/// Build the site router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/health", get(health))
        .route("/api/leads", post(submit_lead))
        .route("/api/strategy", post(generate_strategy))
        .route("/internal/i18n-metrics", get(i18n_metrics))
        .route("/:view", get(view_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    lang: Option<String>,
}

async fn home_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let context = LanguageContext::from_request(&headers, query.lang.as_deref());
    render(&state, View::Home.tag(), "/", &context)
}

async fn view_page(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let context = LanguageContext::from_request(&headers, query.lang.as_deref());
    render(&state, &tag, &format!("/{}", tag), &context)
}

fn render(state: &AppState, tag: &str, path: &str, context: &LanguageContext) -> Response {
    let view = View::from_tag(tag);
    if view.is_none() {
        debug!("Unknown view tag: {}", tag);
    }
    let mut store = context.store();

    let body = {
        let translator = Translator::initialize(state.dictionary, &mut store, context.hint.as_deref());
        let mut app = App::new(translator);
        if let Some(language) = context.explicit {
            app.set_language(language);
        }

        let page = match view {
            Some(view) => {
                app.navigate(view);
                app.render()
            }
            None => compose_tag(tag, app.translator()),
        };

        let t = app.translator();
        html::render_page(&page, path, &t.resolve("forms.sending"), &t.resolve("forms.error"))
    };

    let status = if view.is_some() {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };

    let mut response = (status, Html(body)).into_response();
    if let Some(cookie) = store.written().and_then(language_cookie) {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }
    response
}

/// Resolve one key in the request's language.
fn localized(state: &AppState, context: &LanguageContext, key: &str, params: &[(&str, &str)]) -> String {
    let mut store = context.store();
    let translator = Translator::initialize(state.dictionary, &mut store, context.hint.as_deref());
    translator.resolve_with(key, params)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeadResponse {
    pub success: bool,
    pub message: String,
}

async fn submit_lead(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(lead): Json<LeadSubmission>,
) -> Result<Json<LeadResponse>, ApiError> {
    let context = LanguageContext::from_request(&headers, None);
    // Picks required fields and the acknowledgment; the raw tag is forwarded as is
    let kind = lead
        .form_type
        .as_deref()
        .and_then(FormKind::from_tag)
        .unwrap_or(FormKind::Contact);

    let mut form = LeadForm::from_submission(kind, &lead);
    let outcome = form.submit(state.leads.as_ref()).await;

    let mut store = context.store();
    let translator = Translator::initialize(state.dictionary, &mut store, context.hint.as_deref());
    let message = outcome.acknowledgment(kind, &translator);

    match outcome {
        SubmitOutcome::Sent { .. } => Ok(Json(LeadResponse {
            success: true,
            message,
        })),
        SubmitOutcome::Failed => Err(ApiError::DeliveryFailed(message)),
        SubmitOutcome::Invalid { .. } => Err(ApiError::Validation(message)),
        SubmitOutcome::Busy => Err(ApiError::Busy(message)),
    }
}

#[derive(Debug, Deserialize)]
struct StrategyRequest {
    #[serde(default)]
    context: String,
}

#[derive(Debug, Serialize)]
struct StrategyResponse {
    text: String,
    lines: Vec<StrategyLine>,
}

async fn generate_strategy(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<StrategyRequest>,
) -> Result<Json<StrategyResponse>, ApiError> {
    let mut planner = Planner::new(state.planner_delay);
    planner.set_input(&request.context);

    let result = planner
        .generate(state.strategist.as_ref())
        .await
        .map(str::to_string);

    match result {
        Ok(text) => Ok(Json(StrategyResponse {
            lines: parse_strategy(&text),
            text,
        })),
        Err(refusal) => {
            let context = LanguageContext::from_request(&headers, None);
            let message = match refusal {
                PlannerRefusal::EmptyInput => localized(&state, &context, "planner.empty", &[]),
                PlannerRefusal::Busy => localized(&state, &context, "planner.analyzing", &[]),
            };
            Err(match refusal {
                PlannerRefusal::EmptyInput => ApiError::Validation(message),
                PlannerRefusal::Busy => ApiError::Busy(message),
            })
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn i18n_metrics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let Some(expected) = state.api_key.as_deref() else {
        return Err(ApiError::NotFound);
    };

    let provided = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    if !constant_time_compare(provided, expected) {
        return Err(ApiError::Unauthorized);
    }

    Ok(Json(TranslationMetrics::global().report()).into_response())
}

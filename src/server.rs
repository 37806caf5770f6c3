//! Thin HTTP surface over the core operations.
//!
//! Handlers validate parameters and delegate; no translation or aggregation
//! logic lives here. The only hard error a caller can trigger is an
//! unsupported language code (400); upstream failures have already been
//! absorbed by the core.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::aggregator::{AggregationResult, Aggregator};
use crate::areas;
use crate::guide::{SafetyGuide, SafetyGuideGenerator};
use crate::language::{Language, LanguageRegistry};
use crate::translator::HybridTranslator;
use crate::warnings::{Severity, WarningRecord, WarningService};

#[derive(Clone)]
pub struct AppState {
    pub translator: HybridTranslator,
    pub warnings: WarningService,
    pub aggregator: Aggregator<WarningService>,
    pub guides: SafetyGuideGenerator,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/languages", get(languages))
        .route("/translate", get(translate))
        .route("/warnings", get(all_warnings))
        .route("/warnings/:area_code", get(area_warnings))
        .route("/guide", get(safety_guide))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

type ApiError = (StatusCode, String);

fn parse_language(code: &str) -> Result<Language, ApiError> {
    Language::from_code(code).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "bousai-alert",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Serialize)]
struct LanguageEntry {
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
}

async fn languages() -> Json<Vec<LanguageEntry>> {
    let entries = LanguageRegistry::get()
        .list_all()
        .into_iter()
        .map(|config| LanguageEntry {
            code: config.code,
            name: config.name,
            native_name: config.native_name,
        })
        .collect();
    Json(entries)
}

#[derive(Debug, Deserialize)]
struct TranslateParams {
    text: String,
    lang: String,
}

#[derive(Debug, Serialize)]
struct TranslatedMessage {
    original: String,
    translated: String,
    source_lang: &'static str,
    target_lang: &'static str,
}

async fn translate(
    State(state): State<AppState>,
    Query(params): Query<TranslateParams>,
) -> Result<Json<TranslatedMessage>, ApiError> {
    let language = parse_language(&params.lang)?;
    let translated = state.translator.translate(&params.text, language).await;

    Ok(Json(TranslatedMessage {
        original: params.text,
        translated,
        source_lang: Language::source().code(),
        target_lang: language.code(),
    }))
}

#[derive(Debug, Deserialize)]
struct WarningsParams {
    #[serde(default = "default_lang")]
    lang: String,
    /// Drop records below this severity (e.g. "extreme" for the special
    /// warnings banner)
    #[serde(default)]
    min_severity: Option<String>,
}

fn default_lang() -> String {
    "ja".to_string()
}

fn parse_min_severity(params: &WarningsParams) -> Result<Option<Severity>, ApiError> {
    match params.min_severity.as_deref() {
        None => Ok(None),
        Some(raw) => Severity::parse(raw).map(Some).ok_or_else(|| {
            (
                StatusCode::BAD_REQUEST,
                format!("Unknown severity: '{}'", raw),
            )
        }),
    }
}

async fn area_warnings(
    State(state): State<AppState>,
    Path(area_code): Path<String>,
    Query(params): Query<WarningsParams>,
) -> Result<Json<Vec<WarningRecord>>, ApiError> {
    let language = parse_language(&params.lang)?;
    if !areas::is_valid_area_code(&area_code) {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Unknown area code: '{}'", area_code),
        ));
    }

    // A failed upstream fetch degrades to an empty list for this area; the
    // nationwide endpoint reports per-area errors instead.
    match state.warnings.get_warnings(&area_code, language).await {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            error!("Warning fetch for {} failed: {}", area_code, e);
            Ok(Json(Vec::new()))
        }
    }
}

async fn all_warnings(
    State(state): State<AppState>,
    Query(params): Query<WarningsParams>,
) -> Result<Json<AggregationResult>, ApiError> {
    let language = parse_language(&params.lang)?;
    let minimum = parse_min_severity(&params)?;

    let mut result = state.aggregator.aggregate(language).await;
    if let Some(minimum) = minimum {
        result.records = result
            .at_least(minimum)
            .into_iter()
            .cloned()
            .collect();
    }
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct GuideParams {
    #[serde(rename = "type")]
    disaster_type: String,
    #[serde(default = "default_lang")]
    lang: String,
    location: Option<String>,
    #[serde(default)]
    severity: Option<String>,
}

async fn safety_guide(
    State(state): State<AppState>,
    Query(params): Query<GuideParams>,
) -> Result<Json<SafetyGuide>, ApiError> {
    let language = parse_language(&params.lang)?;
    let severity = params
        .severity
        .as_deref()
        .map(Severity::from_str_or_medium)
        .unwrap_or(Severity::Medium);

    let guide = state
        .guides
        .generate(
            &params.disaster_type,
            language,
            params.location.as_deref(),
            severity,
        )
        .await;
    Ok(Json(guide))
}

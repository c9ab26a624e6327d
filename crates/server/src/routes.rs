//! Routes: `GET /`, `POST /analyze`, `POST /lead`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use seoscope_core::{AuditError, AuditRequest, Auditor};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::notify::{Lead, LeadNotifier};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auditor: Arc<Auditor>,
    pub notifier: Arc<dyn LeadNotifier>,
}

impl AppState {
    pub fn new(auditor: Auditor, notifier: Arc<dyn LeadNotifier>) -> Self {
        Self { auditor: Arc::new(auditor), notifier }
    }
}

/// Body of `POST /analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub keyword: Option<String>,
    /// Visitor e-mail; when present a lead notification is sent in the background.
    #[serde(default)]
    pub email: Option<String>,
}

/// Builds the CORS layer for the given origins.
///
/// An empty list allows any origin. Origins that are not valid header values
/// are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Create the application router
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/analyze", post(analyze))
        .route("/lead", post(lead))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn audit_error_status(err: &AuditError) -> StatusCode {
    match err {
        AuditError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AuditError::FetchFailed(_) => StatusCode::BAD_GATEWAY,
        AuditError::HtmlParseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "OK", "message": "SEO audit API running" }))
}

async fn analyze(State(state): State<AppState>, payload: Result<Json<AnalyzeRequest>, JsonRejection>) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let span = tracing::info_span!("analyze", request_id = %Uuid::new_v4(), url = %payload.url);
    let request = AuditRequest { url: payload.url, keyword: payload.keyword };

    let report = match state.auditor.audit(&request).instrument(span.clone()).await {
        Ok(report) => report,
        Err(e) => {
            span.in_scope(|| tracing::info!(error = %e, "audit failed"));
            return error_response(audit_error_status(&e), e.to_string());
        }
    };

    if let Some(email) = payload.email.filter(|e| !e.trim().is_empty()) {
        let lead = Lead {
            name: None,
            email: Some(email.trim().to_string()),
            message: Some(format!(
                "Audited {} with keyword {}: score {} ({})",
                report.url,
                report.keyword.as_deref().unwrap_or("N/A"),
                report.breakdown.score,
                report.breakdown.verdict
            )),
        };
        let notifier = Arc::clone(&state.notifier);
        tokio::spawn(
            async move {
                if let Err(e) = notifier.notify(&lead).await {
                    tracing::warn!(error = %e, "lead notification failed");
                }
            }
            .instrument(span),
        );
    }

    Json(report.to_json()).into_response()
}

async fn lead(State(state): State<AppState>, payload: Result<Json<Lead>, JsonRejection>) -> Response {
    let Json(lead) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "ok": false, "error": rejection.body_text() })))
                .into_response();
        }
    };

    match state.notifier.notify(&lead).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "lead notification failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "ok": false, "error": e.to_string() }))).into_response()
        }
    }
}

//! HTTP route handlers for Axum.

use std::fmt::Display;

use axum::{extract::State, http::StatusCode, Json};
use tracing::warn;

use crate::{
    api::types::{HealthResponse, KeywordRequest, KeywordResponse, TranscriptRequest},
    clinical::soap::{self, SoapNote},
    pipeline::PipelineResult,
    transcript,
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

fn internal<E: Display>(err: E) -> (StatusCode, String) {
    let message = format!("{err:#}");
    warn!(%message, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, message)
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<TranscriptRequest>,
) -> ApiResult<PipelineResult> {
    let mut pipeline = state.pipeline;
    if let Some(name) = request.patient_name {
        let mut fields = pipeline.report_fields().clone();
        fields.patient_name = name;
        pipeline = pipeline.with_report_fields(fields);
    }
    let transcript = request.transcript;
    let result = tokio::task::spawn_blocking(move || pipeline.run(&transcript))
        .await
        .map_err(internal)?
        .map_err(internal)?;
    Ok(Json(result))
}

pub async fn soap(Json(request): Json<TranscriptRequest>) -> ApiResult<SoapNote> {
    let dialogue = transcript::parse(&request.transcript);
    Ok(Json(soap::generate(&dialogue)))
}

pub async fn keywords(
    State(state): State<AppState>,
    Json(request): Json<KeywordRequest>,
) -> ApiResult<KeywordResponse> {
    let top_n = request.top_n.unwrap_or(state.settings.keyword_top_n);
    let extractor = state.keywords;
    let text = request.text;
    let keywords = tokio::task::spawn_blocking(move || extractor.extract(&text, top_n))
        .await
        .map_err(internal)?
        .map_err(internal)?;
    Ok(Json(KeywordResponse { keywords }))
}

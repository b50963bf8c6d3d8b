use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use docqa::{AnswerResult, AnswerService, Corpus, CorpusLoader, DirectoryLoader, QaError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::{config::ServerSettings, providers};

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AnswerService>,
    pub corpus: Arc<Corpus>,
}

impl AppState {
    pub fn new(service: AnswerService, corpus: Corpus) -> Self {
        Self { service: Arc::new(service), corpus: Arc::new(corpus) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub source: Vec<String>,
    pub confidence: f32,
}

impl From<AnswerResult> for AskResponse {
    fn from(result: AnswerResult) -> Self {
        Self { answer: result.answer_text, source: result.sources, confidence: result.confidence }
    }
}

/// Errors surfaced to HTTP clients as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Qa(#[from] QaError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Qa(err) if err.is_collaborator_failure() => StatusCode::SERVICE_UNAVAILABLE,
            Self::Qa(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "ask failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/ask", post(ask))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Load the corpus, wire the collaborators and serve until Ctrl-C.
pub async fn run_server(settings: ServerSettings) -> anyhow::Result<()> {
    let documents = DirectoryLoader::new(&settings.documents_dir)
        .load_corpus()
        .with_context(|| format!("failed to load documents from {}", settings.documents_dir.display()))?;
    if documents.is_empty() {
        warn!(dir = %settings.documents_dir.display(), "no documents found; every query will get the fallback answer");
    }

    let embedder = providers::embedding_provider(&settings.embedding)?;
    let corpus = Corpus::embed(documents, embedder.as_ref())
        .await
        .context("failed to embed corpus")?;
    info!(documents = corpus.len(), dimensions = corpus.dimensions(), "corpus ready");

    let service = AnswerService::builder()
        .config(settings.answer.clone())
        .embedding_provider(embedder)
        .generator(providers::generator(&settings.generation)?)
        .build()?;

    let app = app_router(AppState::new(service, corpus), settings.request_timeout());
    let addr: SocketAddr = settings
        .bind_address()
        .parse()
        .with_context(|| "invalid host/port for docqa server")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("docqa listening on http://{}", addr);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}

async fn index() -> impl IntoResponse {
    Json(json!({ "message": "This is the RAG QA backend." }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "documents": state.corpus.len() }))
}

async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload?;
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }

    let result = state.service.answer(query, &state.corpus).await?;
    info!(sources = ?result.sources, confidence = result.confidence, "answered");
    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_failures_map_to_503() {
        let err = ApiError::from(QaError::GenerationUnavailable {
            provider: "test".into(),
            message: "down".into(),
        });
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn internal_errors_map_to_500() {
        let err = ApiError::from(QaError::DimensionMismatch { left: 2, right: 3 });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn response_shape_uses_source_field() {
        let response = AskResponse::from(AnswerResult {
            answer_text: "blue".into(),
            sources: vec!["a.txt".into()],
            confidence: 0.9,
        });
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["source"], json!(["a.txt"]));
        assert_eq!(value["answer"], "blue");
    }
}

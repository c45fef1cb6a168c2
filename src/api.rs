//! HTTP API.
//!
//! ## Routes
//!
//! - `GET /api/faqs/?lang=<code>` - every FAQ projected for `lang`
//! - `POST /api/faqs/` - add a FAQ, body `{question, answer}`
//! - `PUT /api/faqs/:question` - replace an answer, body `{answer}`
//! - `DELETE /api/faqs/:question` - remove a FAQ
//! - `GET /health` - liveness plus service metrics

use crate::service::{FaqError, FaqService, FaqUpdate, NewFaq};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

pub fn router(service: Arc<FaqService>) -> Router {
    Router::new()
        .route("/api/faqs/", get(list_faqs).post(add_faq))
        .route("/api/faqs/:question", put(update_faq).delete(delete_faq))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve the API on `addr` (e.g. `"0.0.0.0:8080"`) until ctrl-c.
pub async fn serve(service: Arc<FaqService>, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Error response: a status plus `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn invalid_input() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid input data".to_string(),
        }
    }
}

impl From<FaqError> for ApiError {
    fn from(err: FaqError) -> Self {
        let (status, message) = match &err {
            FaqError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            FaqError::NotFound(_) => (StatusCode::NOT_FOUND, "FAQ not found".to_string()),
            FaqError::Conflict(_) => (StatusCode::CONFLICT, "FAQ already exists".to_string()),
            FaqError::Translation(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Translation failed".to_string(),
            ),
            FaqError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        if status.is_server_error() {
            error!("Request failed: {}", err);
        }
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ListParams {
    lang: Option<String>,
}

async fn list_faqs(
    State(service): State<Arc<FaqService>>,
    Query(params): Query<ListParams>,
) -> Result<Response, ApiError> {
    let views = service.list(params.lang.as_deref()).await?;
    Ok(Json(views).into_response())
}

async fn add_faq(
    State(service): State<Arc<FaqService>>,
    body: Result<Json<NewFaq>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body.map_err(|_| ApiError::invalid_input())?;
    service.add(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "FAQ added successfully" })),
    )
        .into_response())
}

async fn update_faq(
    State(service): State<Arc<FaqService>>,
    Path(question): Path<String>,
    body: Result<Json<FaqUpdate>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body.map_err(|_| ApiError::invalid_input())?;
    service.update(&question, request).await?;
    Ok(Json(json!({ "message": "FAQ updated successfully" })).into_response())
}

async fn delete_faq(
    State(service): State<Arc<FaqService>>,
    Path(question): Path<String>,
) -> Result<Response, ApiError> {
    service.delete(&question).await?;
    Ok(Json(json!({ "message": "FAQ deleted successfully" })).into_response())
}

async fn health(State(service): State<Arc<FaqService>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "metrics": service.metrics().report(),
    }))
}

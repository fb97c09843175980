//! HTTP route handlers

use axum::{
    body::Bytes,
    extract::{Extension, Path, Query},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::error::Error;
use crate::server::AppState;
use crate::storage::{NewQuote, Quote};

/// Query string of `GET /quotes`
#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub author: Option<String>,
}

/// Quote list response
#[derive(Debug, Serialize, Deserialize)]
pub struct QuotesResponse {
    pub quotes: Vec<Quote>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub quotes: usize,
    pub partitions: usize,
    pub last_id: u64,
    pub uptime_seconds: u64,
    pub timestamp: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Error::Config(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Parse a create request body, insisting on a JSON content type
pub fn parse_new_quote(headers: &HeaderMap, body: &[u8]) -> Result<NewQuote, Error> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    if !mime.eq_ignore_ascii_case("application/json") {
        return Err(Error::InvalidArgument(format!(
            "invalid content type: {}",
            content_type
        )));
    }

    serde_json::from_slice(body)
        .map_err(|e| Error::InvalidArgument(format!("failed to decode request body: {}", e)))
}

/// Add a quote
///
/// POST /quotes
/// Body: {"author": "...", "quote": "..."}
#[instrument(skip(state, headers, body))]
pub async fn add_quote(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    match parse_new_quote(&headers, &body) {
        Ok(new_quote) => {
            let quote = state.service.add(new_quote);
            (StatusCode::CREATED, Json(quote)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Rejected quote");
            e.into_response()
        }
    }
}

/// List quotes, optionally filtered by author
///
/// GET /quotes
/// GET /quotes?author=...
#[instrument(skip(state))]
pub async fn list_quotes(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Response {
    match query.author {
        Some(author) => match state.service.by_author(&author) {
            Some(quotes) => Json(QuotesResponse { quotes }).into_response(),
            None => {
                debug!(author = %author, "No quotes for author");
                StatusCode::NO_CONTENT.into_response()
            }
        },
        None => Json(QuotesResponse {
            quotes: state.service.all(),
        })
        .into_response(),
    }
}

/// GET /quotes/random
#[instrument(skip(state))]
pub async fn random_quote(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.service.random() {
        Some(quote) => Json(quote).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// GET /quotes/:id
#[instrument(skip(state))]
pub async fn get_quote(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.service.get(&id) {
        Some(quote) => Json(quote).into_response(),
        None => Error::NotFound(format!("quote {}", id)).into_response(),
    }
}

/// DELETE /quotes/:id
#[instrument(skip(state))]
pub async fn delete_quote(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match state.service.delete(&id) {
        Ok(()) => Json(DeleteResponse { success: true, id }).into_response(),
        Err(e) => {
            warn!(error = %e, "Delete failed");
            e.into_response()
        }
    }
}

/// Health check
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<HealthResponse> {
    let stats = state.service.stats();
    Json(HealthResponse {
        status: "healthy",
        version: crate::VERSION,
        quotes: stats.quotes,
        partitions: stats.partitions,
        last_id: stats.last_id,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Metrics endpoint (Prometheus format)
///
/// The stored-quote gauge is read from the store at scrape time.
pub async fn metrics(Extension(state): Extension<Arc<AppState>>) -> String {
    crate::metrics::set_quote_count(state.service.stats().quotes);
    crate::metrics::export_metrics()
}

use std::any::Any;

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tracing::{debug, error, info, instrument, warn};

use crate::api::models::{ArticleRequest, SummaryResult};
use crate::api::response;
use crate::error::{AppError, Result};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/summarize", post(summarize_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
        .with_state(app_state)
}

async fn summarize_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let start_time = std::time::Instant::now();
    let result = process_summarize_request(&state, &body).await;
    debug!(elapsed = ?start_time.elapsed(), "Request processed");

    match result {
        Ok(summary) => response::success(summary).into_response(),
        Err(err) => {
            if matches!(err, AppError::Summarization(_) | AppError::Config(_)) {
                error!(error = %err, "An error occurred");
            }
            err.into_response()
        }
    }
}

/// Runs one request through cache lookup, extraction, summarization and
/// cache write-back. Cache failures never surface; every other stage stops
/// the request at its first failure.
#[instrument(level = "info", skip_all)]
pub async fn process_summarize_request(state: &AppState, body: &[u8]) -> Result<SummaryResult> {
    let url = match ArticleRequest::parse_url(body) {
        Ok(url) => url,
        Err(err) => {
            warn!(error = %err, "Rejected request");
            return Err(err);
        }
    };
    info!(%url, "Received request to summarize");

    match state.cache.get(&url).await {
        Ok(Some(entry)) => {
            info!(%url, stored_at = ?entry.stored_at, "Cache hit");
            return Ok(SummaryResult {
                url,
                summary: entry.summary,
                cached: true,
            });
        }
        Ok(None) => debug!(%url, "Cache miss"),
        Err(err) => warn!(error = %err, %url, "Cache lookup failed; continuing"),
    }

    let text = match state.extractor.extract(&url).await {
        Ok(text) => text,
        Err(err) => {
            if err.is_not_found() {
                warn!(error = %err, %url, "Not enough article text");
            } else {
                warn!(error = %err, %url, "Error extracting content from URL");
            }
            return Err(err.into());
        }
    };
    info!(chars = text.chars().count(), "Extracted article text");

    let summary = state.summarizer.summarize(&text).await?;

    match state.cache.put(&url, &summary).await {
        Ok(()) => info!(%url, "Stored new summary in cache"),
        Err(err) => warn!(error = %err, %url, "Cache write failed"),
    }

    Ok(SummaryResult {
        url,
        summary,
        cached: false,
    })
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(%details, "Handler panicked");
    response::internal(details).into_response()
}

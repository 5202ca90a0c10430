use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::models::SummaryResult;

pub const MISSING_URL: &str = "Missing \"url\" in request body";
pub const EXTRACTION_FAILED: &str = "Could not extract enough text from the provided URL";
pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub fn success(result: SummaryResult) -> (StatusCode, Json<SummaryResult>) {
    (StatusCode::OK, Json(result))
}

pub fn error(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
            details: None,
        }),
    )
}

pub fn internal(details: String) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: INTERNAL_ERROR.to_string(),
            details: Some(details),
        }),
    )
}

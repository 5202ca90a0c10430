use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::response;

/// Failures while turning a URL into article text.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Failed to fetch page: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Page returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("No <body> element found in the HTML")]
    NoBody,

    #[error("Only found {chars} characters of article text")]
    InsufficientContent { chars: usize },
}

impl ExtractError {
    /// True when the page was fetched fine but held no usable article.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExtractError::NoBody | ExtractError::InsufficientContent { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("Summarization request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Summarization service returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("{0}")]
    Summarization(#[from] SummarizeError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(_) => {
                response::error(StatusCode::BAD_REQUEST, response::MISSING_URL).into_response()
            }
            AppError::Extraction(_) => {
                response::error(StatusCode::BAD_REQUEST, response::EXTRACTION_FAILED)
                    .into_response()
            }
            other => response::internal(other.to_string()).into_response(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

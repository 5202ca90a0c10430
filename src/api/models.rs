use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Deserialize)]
pub struct ArticleRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl ArticleRequest {
    /// Parses a raw request body and returns the requested URL.
    ///
    /// The URL is returned exactly as sent; it doubles as the cache key.
    pub fn parse_url(body: &[u8]) -> Result<String> {
        let request: ArticleRequest = serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("Unparseable request body: {}", e)))?;

        match request.url {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(AppError::Validation("url is missing or empty".to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryResult {
    pub url: String,
    pub summary: String,
    pub cached: bool,
}

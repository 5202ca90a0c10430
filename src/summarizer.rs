use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, ClientBuilder};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::SummarizeError;

pub const DEFAULT_API_URL: &str = "https://api.nlpcloud.io/v1/bart-large-cnn/summarization";

/// Upstream payload limit, in characters.
pub const MAX_INPUT_CHARS: usize = 2000;

pub const MAX_SUMMARY_LENGTH: u32 = 150;

/// Returned (and cached) when the service answers without a summary.
// TODO: surface a missing summary_text as a SummarizeError once callers can tell it apart from a real summary.
pub const MISSING_SUMMARY: &str = "Error: Summary not generated.";

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    text: &'a str,
    max_length: u32,
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError>;
}

/// Client for an NLP Cloud style summarization endpoint.
pub struct NlpCloudSummarizer {
    client: Client,
    api_url: String,
    api_key: String,
}

impl NlpCloudSummarizer {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = ClientBuilder::new().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl Summarizer for NlpCloudSummarizer {
    #[instrument(level = "info", skip_all, fields(chars = text.chars().count()))]
    async fn summarize(&self, text: &str) -> Result<String, SummarizeError> {
        let input = truncate_chars(text, MAX_INPUT_CHARS);
        if input.len() < text.len() {
            info!(max_chars = MAX_INPUT_CHARS, "Truncated article for summarization");
        }

        let res = self
            .client
            .post(&self.api_url)
            .header(AUTHORIZATION, format!("Token {}", self.api_key))
            .json(&SummarizeRequest {
                text: input,
                max_length: MAX_SUMMARY_LENGTH,
            })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SummarizeError::Status { status, body });
        }

        let json: serde_json::Value = res.json().await?;
        let summary = match json["summary_text"].as_str() {
            Some(summary) => summary.to_string(),
            None => {
                warn!("Summarization response had no summary_text; using placeholder");
                MISSING_SUMMARY.to_string()
            }
        };
        Ok(summary)
    }
}

/// Cuts `text` to at most `max_chars` characters without splitting one.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

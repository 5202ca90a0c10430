//! Article text extraction.
//!
//! Fetches a page and keeps only the paragraph text of the element most
//! likely to hold the article body.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

use crate::error::ExtractError;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Paragraphs at or below this many characters are treated as boilerplate.
pub const MIN_PARAGRAPH_CHARS: usize = 50;

/// Joined text shorter than this is not considered an article.
pub const MIN_ARTICLE_CHARS: usize = 200;

/// Candidate article containers, tried in order. The first rule with a match wins.
static CONTAINER_RULES: Lazy<Vec<(&'static str, Selector)>> = Lazy::new(|| {
    [
        "article",
        "main",
        "div.article-body",
        "div.article-content",
        "div.main-content",
        "body",
    ]
    .into_iter()
    .map(|css| {
        let selector = Selector::parse(css).expect("Failed to parse container selector");
        (css, selector)
    })
    .collect()
});

static NOISE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("script, style, header, footer, nav").expect("Failed to parse noise selector")
});

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("Failed to parse paragraph selector"));

#[async_trait]
pub trait ArticleExtractor: Send + Sync {
    /// Returns the cleaned article text found at `url`.
    async fn extract(&self, url: &str) -> Result<String, ExtractError>;
}

/// Fetches pages over HTTP and runs [`extract_article_text`] on them.
pub struct HtmlExtractor {
    client: Client,
}

impl HtmlExtractor {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;
        Ok(Self { client })
    }

    pub async fn fetch_html(&self, url: &str) -> Result<String, ExtractError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status(status));
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ArticleExtractor for HtmlExtractor {
    #[instrument(level = "info", skip(self))]
    async fn extract(&self, url: &str) -> Result<String, ExtractError> {
        let html = self.fetch_html(url).await?;
        debug!(bytes = html.len(), "Fetched page");
        extract_article_text(&html)
    }
}

/// Pulls the article text out of a full HTML document.
///
/// Noise elements inside the chosen container are dropped before paragraph
/// text is collected, so their contents never reach the result.
pub fn extract_article_text(html: &str) -> Result<String, ExtractError> {
    let mut document = Html::parse_document(html);

    let (rule, container_id) = CONTAINER_RULES
        .iter()
        .find_map(|(css, selector)| document.select(selector).next().map(|el| (*css, el.id())))
        .ok_or(ExtractError::NoBody)?;
    debug!(container = rule, "Selected article container");

    let noise: Vec<_> = document
        .tree
        .get(container_id)
        .and_then(ElementRef::wrap)
        .map(|container| container.select(&NOISE_SELECTOR).map(|el| el.id()).collect())
        .unwrap_or_default();
    for id in noise {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    let container = document
        .tree
        .get(container_id)
        .and_then(ElementRef::wrap)
        .ok_or(ExtractError::NoBody)?;

    let text = container
        .select(&PARAGRAPH_SELECTOR)
        .map(paragraph_text)
        .filter(|text| text.chars().count() > MIN_PARAGRAPH_CHARS)
        .collect::<Vec<_>>()
        .join(" ");

    let chars = text.chars().count();
    if chars < MIN_ARTICLE_CHARS {
        return Err(ExtractError::InsufficientContent { chars });
    }
    Ok(text)
}

// Text nodes concatenated, ends trimmed. Interior whitespace is left alone.
fn paragraph_text(paragraph: ElementRef<'_>) -> String {
    paragraph.text().collect::<String>().trim().to_string()
}

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod extractor;
pub mod summarizer;

use std::sync::Arc;

use cache::SummaryCache;
use extractor::ArticleExtractor;
use summarizer::Summarizer;

/// Collaborators shared by every request. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<dyn SummaryCache>,
    pub extractor: Arc<dyn ArticleExtractor>,
    pub summarizer: Arc<dyn Summarizer>,
}

impl AppState {
    pub fn new(
        cache: Arc<dyn SummaryCache>,
        extractor: Arc<dyn ArticleExtractor>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            cache,
            extractor,
            summarizer,
        }
    }
}

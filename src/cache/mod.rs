//! Summary cache keyed by the exact article URL.
//!
//! Callers treat the cache as best-effort: a failed lookup is a miss and a
//! failed write is ignored.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::{CacheBackend, Config};
use crate::error::{CacheError, Result};

#[cfg(feature = "dynamodb")]
mod dynamo;

#[cfg(feature = "dynamodb")]
pub use dynamo::DynamoCache;

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub article_url: String,
    pub summary: String,
    /// Missing for entries written without a timestamp.
    pub stored_at: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait SummaryCache: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<Option<CacheEntry>, CacheError>;

    async fn put(&self, url: &str, summary: &str) -> std::result::Result<(), CacheError>;
}

/// Process-local cache. Entries live as long as the process.
#[derive(Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SummaryCache for InMemoryCache {
    async fn get(&self, url: &str) -> std::result::Result<Option<CacheEntry>, CacheError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        Ok(entries.get(url).cloned())
    }

    async fn put(&self, url: &str, summary: &str) -> std::result::Result<(), CacheError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CacheError::Backend(e.to_string()))?;
        entries.insert(
            url.to_string(),
            CacheEntry {
                article_url: url.to_string(),
                summary: summary.to_string(),
                stored_at: Some(Utc::now()),
            },
        );
        Ok(())
    }
}

/// Builds the cache selected by `config`. Called once at startup.
pub async fn build_cache(config: &Config) -> Result<Arc<dyn SummaryCache>> {
    match config.cache_backend {
        CacheBackend::Memory => {
            info!("Using in-memory summary cache");
            Ok(Arc::new(InMemoryCache::new()))
        }
        #[cfg(feature = "dynamodb")]
        CacheBackend::DynamoDb => {
            info!(table = %config.cache_table, "Using DynamoDB summary cache");
            Ok(Arc::new(DynamoCache::from_env(config.cache_table.clone()).await))
        }
        #[cfg(not(feature = "dynamodb"))]
        CacheBackend::DynamoDb => Err(crate::error::AppError::Config(
            "CACHE_BACKEND=dynamodb requires the `dynamodb` feature".to_string(),
        )),
    }
}

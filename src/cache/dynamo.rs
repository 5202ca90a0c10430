use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, types::AttributeValue, Client};
use chrono::{DateTime, Utc};

use super::{CacheEntry, SummaryCache};
use crate::error::CacheError;

const KEY_ATTR: &str = "ArticleUrl";
const SUMMARY_ATTR: &str = "Summary";
const STORED_AT_ATTR: &str = "StoredAt";

/// DynamoDB table with the article URL as its string partition key.
pub struct DynamoCache {
    client: Client,
    table: String,
}

impl DynamoCache {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Loads AWS credentials and region from the environment.
    pub async fn from_env(table: impl Into<String>) -> Self {
        let shared_config = aws_config::from_env().load().await;
        Self::new(Client::new(&shared_config), table)
    }
}

#[async_trait]
impl SummaryCache for DynamoCache {
    async fn get(&self, url: &str) -> Result<Option<CacheEntry>, CacheError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(KEY_ATTR, AttributeValue::S(url.to_string()))
            .send()
            .await
            .map_err(|e| CacheError::Backend(DisplayErrorContext(e).to_string()))?;

        match output.item {
            Some(item) => entry_from_item(url, &item).map(Some),
            None => Ok(None),
        }
    }

    async fn put(&self, url: &str, summary: &str) -> Result<(), CacheError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .item(KEY_ATTR, AttributeValue::S(url.to_string()))
            .item(SUMMARY_ATTR, AttributeValue::S(summary.to_string()))
            .item(STORED_AT_ATTR, AttributeValue::S(Utc::now().to_rfc3339()))
            .send()
            .await
            .map_err(|e| CacheError::Backend(DisplayErrorContext(e).to_string()))?;
        Ok(())
    }
}

fn entry_from_item(
    url: &str,
    item: &HashMap<String, AttributeValue>,
) -> Result<CacheEntry, CacheError> {
    let summary = item
        .get(SUMMARY_ATTR)
        .and_then(|value| value.as_s().ok())
        .ok_or_else(|| {
            CacheError::Backend(format!("item for {} has no string {} attribute", url, SUMMARY_ATTR))
        })?;
    let stored_at = item
        .get(STORED_AT_ATTR)
        .and_then(|value| value.as_s().ok())
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|time| time.with_timezone(&Utc));

    Ok(CacheEntry {
        article_url: url.to_string(),
        summary: summary.clone(),
        stored_at,
    })
}

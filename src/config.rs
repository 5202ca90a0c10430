use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppError, Result};
use crate::summarizer::DEFAULT_API_URL;

pub const DEFAULT_CACHE_TABLE: &str = "NewsSummaryCache";

/// Where summaries are persisted between requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheBackend {
    Memory,
    DynamoDb,
}

impl FromStr for CacheBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(CacheBackend::Memory),
            "dynamodb" => Ok(CacheBackend::DynamoDb),
            other => Err(AppError::Config(format!("Unknown cache backend: {}", other))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub nlp_api_url: String,
    pub nlp_api_key: String,
    pub cache_backend: CacheBackend,
    pub cache_table: String,
    pub fetch_timeout: Duration,
    pub summarize_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let nlp_api_key = env::var("NLP_API_KEY")
            .map_err(|e| AppError::Config(format!("NLP_API_KEY: {}", e)))?;
        let nlp_api_url = env::var("NLP_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host)
            .map_err(|e| AppError::Config(format!("Invalid host address: {}", e)))?;

        let cache_backend = match env::var("CACHE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => CacheBackend::Memory,
        };
        let cache_table = env::var("CACHE_TABLE").unwrap_or_else(|_| DEFAULT_CACHE_TABLE.to_string());

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            nlp_api_url,
            nlp_api_key,
            cache_backend,
            cache_table,
            fetch_timeout: timeout_var("FETCH_TIMEOUT_SECS", 10)?,
            summarize_timeout: timeout_var("SUMMARIZE_TIMEOUT_SECS", 30)?,
        })
    }
}

fn timeout_var(name: &str, default_secs: u64) -> Result<Duration> {
    match env::var(name) {
        Ok(value) => value
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

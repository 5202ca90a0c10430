use std::sync::Arc;

use news_summarizer::{
    api::routes::create_router,
    cache::build_cache,
    config::Config,
    error::AppError,
    extractor::HtmlExtractor,
    summarizer::NlpCloudSummarizer,
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt as tfmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let config = Config::load()?;

    let extractor = HtmlExtractor::new(config.fetch_timeout)
        .map_err(|e| AppError::Config(format!("Failed to build fetch client: {}", e)))?;
    let summarizer = NlpCloudSummarizer::new(
        config.nlp_api_url.clone(),
        config.nlp_api_key.clone(),
        config.summarize_timeout,
    )
    .map_err(|e| AppError::Config(format!("Failed to build summarizer client: {}", e)))?;
    let cache = build_cache(&config).await?;

    let app_state = AppState::new(cache, Arc::new(extractor), Arc::new(summarizer));
    let app = create_router(app_state);

    let listener = TcpListener::bind(config.server_addr).await?;
    info!(addr = %config.server_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}

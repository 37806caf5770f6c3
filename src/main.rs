use anyhow::Result;
use tracing::info;

use bousai_alert::aggregator::Aggregator;
use bousai_alert::cache::TranslationCache;
use bousai_alert::config::Config;
use bousai_alert::guide::SafetyGuideGenerator;
use bousai_alert::provider::AiProvider;
use bousai_alert::server::{self, AppState};
use bousai_alert::translator::HybridTranslator;
use bousai_alert::warnings::WarningService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bousai_alert=info".parse()?),
        )
        .init();

    info!("Starting disaster alert service");

    // Load configuration from environment
    let config = Config::from_env()?;

    match AiProvider::new(&config).active_provider() {
        Some(provider) => info!("AI provider: {} (fallbacks follow config order)", provider),
        None => info!("No AI provider configured; running on static tables and cache only"),
    }

    let cache = TranslationCache::new(&config.cache_file);
    let ai = AiProvider::new(&config);
    let translator = HybridTranslator::new(cache.clone(), ai.clone());
    let warnings = WarningService::new(&config, translator.clone());

    let state = AppState {
        translator,
        warnings: warnings.clone(),
        aggregator: Aggregator::new(warnings, config.aggregate_concurrency),
        guides: SafetyGuideGenerator::new(ai, cache),
    };

    let app = server::router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    // Environment
    pub environment: String,

    // Upstream JMA API
    pub jma_base_url: String,
    pub api_timeout: Duration,

    // AI provider selection: "gemini", "claude", or "auto"
    // auto: Gemini when keyed, otherwise Claude
    pub ai_provider: String,

    // Gemini API
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,

    // Claude API
    pub anthropic_api_key: Option<String>,
    pub anthropic_model: String,
    pub anthropic_api_version: String,
    pub anthropic_base_url: String,

    // AI call timeouts: short translate calls vs. longer guidance generation
    pub ai_timeout_translate: Duration,
    pub ai_timeout_generate: Duration,

    // In-process AI attempts; 1 = no retries (extension point)
    pub ai_max_attempts: u32,

    // Aggregator admission gate: simultaneous upstream fetches
    pub aggregate_concurrency: usize,

    // Translation cache
    pub cache_file: PathBuf,

    // Server
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            jma_base_url: std::env::var("JMA_BASE_URL")
                .unwrap_or_else(|_| "https://www.jma.go.jp/bosai".to_string()),
            api_timeout: duration_from_env("API_TIMEOUT_SECS", 10),

            ai_provider: std::env::var("AI_PROVIDER").unwrap_or_else(|_| "auto".to_string()),

            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash-exp".to_string()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),

            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            anthropic_model: std::env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| "claude-3-haiku-20240307".to_string()),
            anthropic_api_version: std::env::var("ANTHROPIC_API_VERSION")
                .unwrap_or_else(|_| "2023-06-01".to_string()),
            anthropic_base_url: std::env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| "https://api.anthropic.com".to_string()),

            ai_timeout_translate: duration_from_env("AI_TIMEOUT_TRANSLATE_SECS", 15),
            ai_timeout_generate: duration_from_env("AI_TIMEOUT_GENERATE_SECS", 30),

            ai_max_attempts: std::env::var("AI_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v >= 1)
                .unwrap_or(1),

            aggregate_concurrency: std::env::var("AGGREGATE_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v| *v >= 1)
                .unwrap_or(10),

            cache_file: std::env::var("TRANSLATION_CACHE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/translation_cache.json")),

            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn duration_from_env(key: &str, default_secs: u64) -> Duration {
    let secs = std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default_secs);
    Duration::from_secs(secs)
}

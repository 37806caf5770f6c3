//! Disaster safety guide generation.
//!
//! Guides are produced through the AI JSON path with the longer generation
//! timeout, cached under a composite key, and fall back to a fixed Japanese
//! guide when no provider is available. Content is advisory boilerplate,
//! not real-time data, so a cached guide never expires.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{TranslationCache, TranslationKey};
use crate::extract;
use crate::language::Language;
use crate::provider::AiProvider;
use crate::warnings::Severity;

/// Disaster types a guide can be generated for.
pub const DISASTER_TYPES: [&str; 6] = [
    "earthquake",
    "tsunami",
    "flood",
    "typhoon",
    "volcano",
    "landslide",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SafetyGuide {
    pub disaster_type: String,
    pub severity: Severity,
    pub location: Option<String>,
    pub language: String,
    pub title: String,
    pub summary: String,
    pub immediate_actions: Vec<String>,
    #[serde(default)]
    pub preparation_tips: Vec<String>,
    #[serde(default)]
    pub evacuation_info: Option<String>,
    #[serde(default)]
    pub emergency_contacts: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    pub generated_at: String,
    /// Whether this guide came from the cache
    #[serde(default)]
    pub cached: bool,
}

#[derive(Clone)]
pub struct SafetyGuideGenerator {
    ai: AiProvider,
    cache: TranslationCache,
}

impl SafetyGuideGenerator {
    pub fn new(ai: AiProvider, cache: TranslationCache) -> Self {
        Self { ai, cache }
    }

    /// Generate (or recall) a safety guide. Never fails: with no provider
    /// and no cache entry, the fixed Japanese fallback guide is returned.
    pub async fn generate(
        &self,
        disaster_type: &str,
        language: Language,
        location: Option<&str>,
        severity: Severity,
    ) -> SafetyGuide {
        let composite = format!(
            "safety:{}:{}:{}",
            disaster_type,
            location.unwrap_or(""),
            severity.as_str()
        );
        let key = TranslationKey::new(&composite, language);

        if let Some(cached) = self.cache.get(&key) {
            match serde_json::from_str::<SafetyGuide>(&cached) {
                Ok(mut guide) => {
                    guide.cached = true;
                    return guide;
                }
                Err(e) => debug!("Discarding unparsable cached safety guide: {}", e),
            }
        }

        let prompt = build_guide_prompt(disaster_type, language, location, severity);
        match self.generate_with_ai(&prompt).await {
            Ok(value) => {
                let guide = guide_from_value(value, disaster_type, language, location, severity);
                if let Ok(serialized) = serde_json::to_string(&guide) {
                    self.cache.put(&key, &serialized);
                }
                guide
            }
            Err(e) => {
                warn!(
                    "Safety guide generation for {} ({}) failed: {}",
                    disaster_type,
                    language.code(),
                    e
                );
                fallback_guide(disaster_type, language, location, severity)
            }
        }
    }

    async fn generate_with_ai(
        &self,
        prompt: &str,
    ) -> Result<serde_json::Value, crate::translator::AiTierError> {
        let raw = self.ai.generate_json(prompt, 1500).await?;
        let value = extract::extract_json(&raw)?;
        Ok(value)
    }
}

fn build_guide_prompt(
    disaster_type: &str,
    language: Language,
    location: Option<&str>,
    severity: Severity,
) -> String {
    let severity_desc = match severity {
        Severity::Low => "minor risk, general awareness needed",
        Severity::Medium => "moderate risk, caution advised",
        Severity::High => "serious risk, immediate precautions needed",
        Severity::Extreme => "life-threatening emergency, immediate action required",
    };
    let location_context = match location {
        Some(loc) => format!(" in {}", loc),
        None => String::new(),
    };

    format!(
        r#"Generate a comprehensive safety guide for {disaster_type}{location_context} in {target}.

Severity level: {severity}

Return ONLY a JSON object with these exact keys (no markdown, no explanation):
{{
  "title": "Safety guide title in {target}",
  "summary": "Brief 1-2 sentence summary of what to do",
  "immediate_actions": ["action 1", "action 2", "action 3", "action 4", "action 5"],
  "preparation_tips": ["tip 1", "tip 2", "tip 3"],
  "evacuation_info": "Information about when and where to evacuate",
  "emergency_contacts": "Emergency numbers and resources (use Japan numbers: Police 110, Fire/Ambulance 119, Coast Guard 118)",
  "additional_notes": "Any additional important information"
}}

Important guidelines:
- All text must be in {target}
- For Easy Japanese, use simple hiragana and basic vocabulary with spaces between words
- immediate_actions should be specific, actionable steps in order of priority
- Include Japan-specific emergency information
- Focus on life-saving information first"#,
        disaster_type = disaster_type,
        location_context = location_context,
        target = language.name(),
        severity = severity_desc,
    )
}

fn guide_from_value(
    value: serde_json::Value,
    disaster_type: &str,
    language: Language,
    location: Option<&str>,
    severity: Severity,
) -> SafetyGuide {
    let string_list = |key: &str| -> Vec<String> {
        value
            .get(key)
            .and_then(serde_json::Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    };
    let string_field = |key: &str| -> Option<String> {
        value
            .get(key)
            .and_then(serde_json::Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_owned)
    };

    SafetyGuide {
        disaster_type: disaster_type.to_owned(),
        severity,
        location: location.map(str::to_owned),
        language: language.code().to_owned(),
        title: string_field("title").unwrap_or_else(|| disaster_type.to_owned()),
        summary: string_field("summary").unwrap_or_default(),
        immediate_actions: string_list("immediate_actions"),
        preparation_tips: string_list("preparation_tips"),
        evacuation_info: string_field("evacuation_info"),
        emergency_contacts: string_field("emergency_contacts"),
        additional_notes: string_field("additional_notes"),
        generated_at: Utc::now().to_rfc3339(),
        cached: false,
    }
}

/// Fixed Japanese guide used when no AI provider is reachable.
fn fallback_guide(
    disaster_type: &str,
    language: Language,
    location: Option<&str>,
    severity: Severity,
) -> SafetyGuide {
    let disaster_name = match disaster_type {
        "earthquake" => "地震",
        "tsunami" => "津波",
        "flood" => "洪水",
        "typhoon" => "台風",
        "volcano" => "火山",
        "landslide" => "土砂災害",
        other => other,
    };

    SafetyGuide {
        disaster_type: disaster_type.to_owned(),
        severity,
        location: location.map(str::to_owned),
        language: language.code().to_owned(),
        title: format!("{}の安全ガイド", disaster_name),
        summary: format!(
            "{}が発生した場合の安全対策です。落ち着いて行動してください。",
            disaster_name
        ),
        immediate_actions: vec![
            "身の安全を確保してください".to_owned(),
            "最新の情報を確認してください".to_owned(),
            "必要に応じて避難してください".to_owned(),
        ],
        preparation_tips: vec![
            "非常用持ち出し袋を準備しておきましょう".to_owned(),
            "避難場所を確認しておきましょう".to_owned(),
        ],
        evacuation_info: Some("市区町村の指示に従って避難してください".to_owned()),
        emergency_contacts: Some("警察: 110 / 消防・救急: 119 / 海上保安庁: 118".to_owned()),
        additional_notes: Some("正確な情報は公式発表をご確認ください".to_owned()),
        generated_at: Utc::now().to_rfc3339(),
        cached: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn unconfigured_config() -> Config {
        Config {
            environment: "test".to_string(),
            jma_base_url: "https://www.jma.go.jp/bosai".to_string(),
            api_timeout: Duration::from_secs(10),
            ai_provider: "auto".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash-exp".to_string(),
            gemini_base_url: "https://generativelanguage.googleapis.com".to_string(),
            anthropic_api_key: None,
            anthropic_model: "claude-3-haiku-20240307".to_string(),
            anthropic_api_version: "2023-06-01".to_string(),
            anthropic_base_url: "https://api.anthropic.com".to_string(),
            ai_timeout_translate: Duration::from_secs(2),
            ai_timeout_generate: Duration::from_secs(2),
            ai_max_attempts: 1,
            aggregate_concurrency: 10,
            cache_file: "data/translation_cache.json".into(),
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }

    #[tokio::test]
    async fn test_fallback_guide_without_provider() {
        let generator = SafetyGuideGenerator::new(
            AiProvider::new(&unconfigured_config()),
            TranslationCache::in_memory(),
        );

        let guide = generator
            .generate("earthquake", Language::ENGLISH, None, Severity::High)
            .await;

        assert_eq!(guide.title, "地震の安全ガイド");
        assert_eq!(guide.immediate_actions.len(), 3);
        assert!(guide.emergency_contacts.as_deref().unwrap().contains("119"));
        assert!(!guide.cached);
    }

    #[tokio::test]
    async fn test_guide_from_ai_and_cache_flag_on_second_call() {
        let mock_server = MockServer::start().await;
        let payload = serde_json::json!({
            "title": "Earthquake Safety Guide",
            "summary": "Protect yourself first.",
            "immediate_actions": ["Drop", "Cover", "Hold on"],
            "preparation_tips": ["Keep a go-bag"],
            "evacuation_info": "Follow municipal instructions.",
            "emergency_contacts": "Police 110, Fire/Ambulance 119",
            "additional_notes": "Check official sources."
        });
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [{ "text": payload.to_string() }] } }
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut config = unconfigured_config();
        config.gemini_api_key = Some("test-key".to_string());
        config.gemini_base_url = mock_server.uri();
        let generator =
            SafetyGuideGenerator::new(AiProvider::new(&config), TranslationCache::in_memory());

        let first = generator
            .generate("earthquake", Language::ENGLISH, Some("東京都"), Severity::High)
            .await;
        assert_eq!(first.title, "Earthquake Safety Guide");
        assert_eq!(first.immediate_actions, vec!["Drop", "Cover", "Hold on"]);
        assert!(!first.cached);

        // Mock allows a single request: the second guide must be cached
        let second = generator
            .generate("earthquake", Language::ENGLISH, Some("東京都"), Severity::High)
            .await;
        assert!(second.cached);
        assert_eq!(second.title, first.title);
    }

    #[tokio::test]
    async fn test_guide_cache_key_varies_by_severity() {
        let generator = SafetyGuideGenerator::new(
            AiProvider::new(&unconfigured_config()),
            TranslationCache::in_memory(),
        );

        let high = generator
            .generate("flood", Language::JAPANESE, None, Severity::High)
            .await;
        let low = generator
            .generate("flood", Language::JAPANESE, None, Severity::Low)
            .await;

        assert_eq!(high.severity, Severity::High);
        assert_eq!(low.severity, Severity::Low);
    }

    #[test]
    fn test_prompt_carries_severity_and_language() {
        let prompt =
            build_guide_prompt("tsunami", Language::KOREAN, Some("沖縄県"), Severity::Extreme);
        assert!(prompt.contains("tsunami in 沖縄県"));
        assert!(prompt.contains("Korean"));
        assert!(prompt.contains("life-threatening emergency"));
        assert!(prompt.contains("110"));
    }

    #[test]
    fn test_disaster_types_cover_the_common_set() {
        assert!(DISASTER_TYPES.contains(&"earthquake"));
        assert!(DISASTER_TYPES.contains(&"volcano"));
        assert_eq!(DISASTER_TYPES.len(), 6);
    }
}

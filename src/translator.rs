//! Hybrid translator: static table → cache → AI, in that order.
//!
//! Each tier is only consulted when the previous one misses. The AI tier is
//! the only one that can fail, and its failure is absorbed: a disaster alert
//! must always display something, so `translate` returns the original
//! Japanese text rather than an error. Concurrent requests for the same
//! uncached pair may race into duplicate AI calls; the cache treats that as
//! last-write-wins rather than serializing on a per-key lock.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::{TranslationCache, TranslationKey};
use crate::extract::{self, MalformedTranslationError};
use crate::language::Language;
use crate::phrases;
use crate::provider::{AiProvider, ProviderError};
use crate::warnings::Severity;

/// Failure of the AI tier; recovered locally by falling back to the
/// original text.
#[derive(Debug, Error)]
pub enum AiTierError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Malformed(#[from] MalformedTranslationError),
}

/// AI-generated warning text for languages outside the static tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WarningText {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub action: String,
}

#[derive(Clone)]
pub struct HybridTranslator {
    cache: TranslationCache,
    ai: AiProvider,
}

impl HybridTranslator {
    pub fn new(cache: TranslationCache, ai: AiProvider) -> Self {
        Self { cache, ai }
    }

    /// Translate arbitrary disaster-report text. Never fails: on any AI-tier
    /// problem the original text is returned and the failure is logged.
    pub async fn translate(&self, text: &str, language: Language) -> String {
        let text = text.trim();
        if text.is_empty() || language.is_source() {
            return text.to_owned();
        }

        // Tier 1: static tables
        if let Some(hit) = phrases::lookup(text, language) {
            return hit.to_owned();
        }

        // Tier 2: cache
        let key = TranslationKey::new(text, language);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        // Tier 3: AI, write-through on success
        match self.translate_with_ai(text, language, None).await {
            Ok(translated) => {
                self.cache.put(&key, &translated);
                translated
            }
            Err(e) => {
                warn!(
                    "AI translation of {:?} to {} failed, returning original: {}",
                    text,
                    language.code(),
                    e
                );
                text.to_owned()
            }
        }
    }

    /// Translate an epicenter/region name. Same tiers as `translate`, with a
    /// location hint attached to the AI prompt.
    pub async fn translate_location(&self, location: &str, language: Language) -> String {
        let location = location.trim();
        if location.is_empty() || language.is_source() {
            return location.to_owned();
        }

        if let Some(hit) = phrases::location_name(location, language) {
            return hit.to_owned();
        }

        let key = TranslationKey::new(location, language);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }

        let context = "Japanese earthquake epicenter or region name";
        match self.translate_with_ai(location, language, Some(context)).await {
            Ok(translated) => {
                self.cache.put(&key, &translated);
                translated
            }
            Err(e) => {
                warn!(
                    "AI location translation of {:?} to {} failed, returning original: {}",
                    location,
                    language.code(),
                    e
                );
                location.to_owned()
            }
        }
    }

    /// Translate a seismic intensity value ("5弱"). Static mapping only,
    /// never an API call. A miss returns the input unchanged.
    pub fn translate_intensity(&self, intensity: &str, language: Language) -> String {
        if language.is_source() {
            return intensity.to_owned();
        }
        phrases::intensity_label(intensity.trim(), language)
            .map(str::to_owned)
            .unwrap_or_else(|| intensity.to_owned())
    }

    /// Translate a tsunami warning level. Static mapping only.
    pub fn translate_tsunami_warning(&self, warning: &str, language: Language) -> String {
        if language.is_source() {
            return warning.to_owned();
        }
        phrases::tsunami_label(warning.trim(), language)
            .map(str::to_owned)
            .unwrap_or_else(|| warning.to_owned())
    }

    /// Generate the localized name/description/action for a warning in a
    /// language outside the static tables. Results are cached under a
    /// composite key so each (warning, area, severity, language) is paid
    /// for once.
    pub async fn generate_warning_text(
        &self,
        warning_name_ja: &str,
        language: Language,
        area_name: Option<&str>,
        severity: Severity,
    ) -> WarningText {
        if language.is_source() {
            let description = match area_name {
                Some(area) => format!("{}に{}が発表されています。", area, warning_name_ja),
                None => format!("{}が発表されています。", warning_name_ja),
            };
            return WarningText {
                name: warning_name_ja.to_owned(),
                description,
                action: default_action_ja(severity).to_owned(),
            };
        }

        let composite = format!(
            "warning:{}:{}:{}",
            warning_name_ja,
            area_name.unwrap_or(""),
            severity.as_str()
        );
        let key = TranslationKey::new(&composite, language);

        if let Some(cached) = self.cache.get(&key) {
            match serde_json::from_str::<WarningText>(&cached) {
                Ok(text) => return text,
                Err(e) => debug!("Discarding unparsable cached warning text: {}", e),
            }
        }

        let prompt = build_warning_prompt(warning_name_ja, language, area_name, severity);
        match self.generate_json_with_ai(&prompt, 500).await {
            Ok(value) => {
                let text = WarningText {
                    name: value
                        .get("name")
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or(warning_name_ja)
                        .to_owned(),
                    description: value
                        .get("description")
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or_default()
                        .to_owned(),
                    action: value
                        .get("action")
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or_default()
                        .to_owned(),
                };
                if let Ok(serialized) = serde_json::to_string(&text) {
                    self.cache.put(&key, &serialized);
                }
                text
            }
            Err(e) => {
                warn!(
                    "Warning text generation for {:?} ({}) failed: {}",
                    warning_name_ja,
                    language.code(),
                    e
                );
                // Fall back to a bare name translation through the normal tiers
                WarningText {
                    name: self.translate(warning_name_ja, language).await,
                    description: String::new(),
                    action: String::new(),
                }
            }
        }
    }

    /// Fill the per-language earthquake message skeleton. Pure templating,
    /// no network.
    pub fn format_earthquake_message(
        &self,
        language: Language,
        location: &str,
        magnitude: f64,
        intensity: &str,
        depth: u32,
        tsunami_warning_ja: &str,
        tsunami_warning_translated: &str,
    ) -> String {
        let template = phrases::earthquake_template(language);

        let tsunami_info = if matches!(tsunami_warning_ja, "なし" | "None" | "") {
            template.tsunami_safe.to_owned()
        } else {
            template
                .tsunami_warning
                .replace("{warning}", tsunami_warning_translated)
        };

        template
            .body
            .replace("{location}", location)
            .replace("{magnitude}", &format!("{}", magnitude))
            .replace("{intensity}", intensity)
            .replace("{depth}", &format!("{}", depth))
            .replace("{tsunami_info}", &tsunami_info)
    }

    /// How many curated locations the static tier covers.
    pub fn static_location_count(&self) -> usize {
        phrases::static_location_count()
    }

    async fn translate_with_ai(
        &self,
        text: &str,
        language: Language,
        context: Option<&str>,
    ) -> Result<String, AiTierError> {
        let raw = self.ai.translate_text(text, language, context).await?;
        let translated = extract::extract_translation(&raw)?;
        Ok(translated)
    }

    async fn generate_json_with_ai(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<serde_json::Value, AiTierError> {
        let raw = self.ai.generate_json(prompt, max_tokens).await?;
        let value = extract::extract_json(&raw)?;
        Ok(value)
    }
}

fn build_warning_prompt(
    warning_name_ja: &str,
    language: Language,
    area_name: Option<&str>,
    severity: Severity,
) -> String {
    let severity_desc = match severity {
        Severity::Low => "minor advisory",
        Severity::Medium => "advisory requiring attention",
        Severity::High => "serious warning requiring caution",
        Severity::Extreme => "emergency warning requiring immediate action",
    };
    let area_context = match area_name {
        Some(area) => format!(" for {}", area),
        None => String::new(),
    };

    format!(
        r#"Translate and generate disaster warning information in {target}.

Japanese warning name: {name}
Severity level: {severity}
Area: {area}

Return ONLY a JSON object with these exact keys (no markdown, no explanation):
{{
  "name": "translated warning name",
  "description": "brief explanation of this warning type{area_context} (1 sentence)",
  "action": "recommended immediate action for people in affected area (1-2 sentences)"
}}

Important:
- Keep translations accurate and culturally appropriate
- For Easy Japanese, use simple hiragana and basic vocabulary
- Action should be practical and specific to this warning type"#,
        target = language.name(),
        name = warning_name_ja,
        severity = severity_desc,
        area = area_name.unwrap_or("general"),
        area_context = area_context,
    )
}

fn default_action_ja(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "最新の情報に注意してください。",
        Severity::Medium => "今後の情報に注意し、必要に応じて安全な場所へ移動してください。",
        Severity::High => "屋外での活動を控え、安全な場所で待機してください。",
        Severity::Extreme => "直ちに安全な場所へ避難してください。命を守る行動を取ってください。",
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

    fn translator_without_ai() -> HybridTranslator {
        HybridTranslator::new(
            TranslationCache::in_memory(),
            AiProvider::new(&unconfigured_config()),
        )
    }

    fn gemini_translation_response(translation: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                {
                    "content": {
                        "parts": [
                            { "text": format!("```json\n{{\"translation\": \"{}\"}}\n```", translation) }
                        ]
                    }
                }
            ]
        })
    }

    async fn translator_with_mock_ai(mock_server: &MockServer) -> HybridTranslator {
        let mut config = unconfigured_config();
        config.gemini_api_key = Some("test-key".to_string());
        config.gemini_base_url = mock_server.uri();
        HybridTranslator::new(TranslationCache::in_memory(), AiProvider::new(&config))
    }

    // ==================== Tier order ====================

    #[tokio::test]
    async fn test_japanese_target_short_circuits() {
        let translator = translator_without_ai();
        assert_eq!(
            translator.translate("福島県沖", Language::JAPANESE).await,
            "福島県沖"
        );
    }

    #[tokio::test]
    async fn test_static_tier_resolves_known_location() {
        // No AI configured; a static hit must still resolve fully
        let translator = translator_without_ai();
        assert_eq!(
            translator.translate("福島県沖", Language::ENGLISH).await,
            "Off the coast of Fukushima Prefecture"
        );
    }

    #[tokio::test]
    async fn test_static_tier_resolves_intensity_phrase() {
        let translator = translator_without_ai();
        assert_eq!(
            translator.translate("震度5弱", Language::ENGLISH).await,
            "Intensity 5 Lower"
        );
    }

    #[tokio::test]
    async fn test_cache_tier_hit_avoids_ai() {
        let cache = TranslationCache::in_memory();
        let key = TranslationKey::new("未知の地名", Language::ENGLISH);
        cache.put(&key, "Unknown Place");

        // AI unconfigured: only the cache can answer
        let translator =
            HybridTranslator::new(cache, AiProvider::new(&unconfigured_config()));
        assert_eq!(
            translator.translate("未知の地名", Language::ENGLISH).await,
            "Unknown Place"
        );
    }

    #[tokio::test]
    async fn test_ai_tier_failure_falls_back_to_original() {
        let translator = translator_without_ai();
        assert_eq!(
            translator.translate("謎の文章です", Language::ENGLISH).await,
            "謎の文章です"
        );
    }

    #[tokio::test]
    async fn test_ai_tier_success_writes_through_to_cache() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(gemini_translation_response("Tsunami Warning")),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator = translator_with_mock_ai(&mock_server).await;

        let first = translator.translate("津波警報です", Language::ENGLISH).await;
        assert_eq!(first, "Tsunami Warning");

        // Second call must come from the cache; the mock allows one request
        let second = translator.translate("津波警報です", Language::ENGLISH).await;
        assert_eq!(second, "Tsunami Warning");
    }

    #[tokio::test]
    async fn test_malformed_ai_response_falls_back_to_original() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "no json in this reply" }] } }
                ]
            })))
            .mount(&mock_server)
            .await;

        let translator = translator_with_mock_ai(&mock_server).await;
        assert_eq!(
            translator.translate("不明な文", Language::ENGLISH).await,
            "不明な文"
        );
    }

    // ==================== Location / intensity / tsunami ====================

    #[tokio::test]
    async fn test_translate_location_static() {
        let translator = translator_without_ai();
        assert_eq!(
            translator
                .translate_location("北海道北西沖", Language::ENGLISH)
                .await,
            "Off the northwest coast of Hokkaido"
        );
    }

    #[tokio::test]
    async fn test_translate_location_same_language() {
        let translator = translator_without_ai();
        assert_eq!(
            translator.translate_location("東京", Language::JAPANESE).await,
            "東京"
        );
    }

    #[test]
    fn test_translate_intensity_static_only() {
        let translator = translator_without_ai();
        assert_eq!(
            translator.translate_intensity("5弱", Language::ENGLISH),
            "Intensity 5 Lower"
        );
        // Unknown scale: input unchanged, no error
        assert_eq!(translator.translate_intensity("9", Language::ENGLISH), "9");
    }

    #[test]
    fn test_translate_tsunami_warning_static_only() {
        let translator = translator_without_ai();
        assert_eq!(
            translator.translate_tsunami_warning("津波警報", Language::ENGLISH),
            "Tsunami Warning"
        );
        assert_eq!(
            translator.translate_tsunami_warning("なし", Language::ENGLISH),
            "None"
        );
    }

    // ==================== Warning text generation ====================

    #[tokio::test]
    async fn test_generate_warning_text_japanese_needs_no_ai() {
        let translator = translator_without_ai();
        let text = translator
            .generate_warning_text("大雨警報", Language::JAPANESE, Some("東京地方"), Severity::High)
            .await;

        assert_eq!(text.name, "大雨警報");
        assert_eq!(text.description, "東京地方に大雨警報が発表されています。");
        assert!(text.action.contains("安全な場所"));
    }

    #[tokio::test]
    async fn test_generate_warning_text_uses_cache() {
        let cache = TranslationCache::in_memory();
        let cached = WarningText {
            name: "Heavy Rain Warning".to_string(),
            description: "Heavy rain is expected.".to_string(),
            action: "Stay away from rivers.".to_string(),
        };
        let composite = "warning:大雨警報:東京地方:high";
        let key = TranslationKey::new(composite, Language::ENGLISH);
        cache.put(&key, &serde_json::to_string(&cached).unwrap());

        let translator =
            HybridTranslator::new(cache, AiProvider::new(&unconfigured_config()));
        let text = translator
            .generate_warning_text("大雨警報", Language::ENGLISH, Some("東京地方"), Severity::High)
            .await;
        assert_eq!(text, cached);
    }

    #[tokio::test]
    async fn test_generate_warning_text_ai_failure_keeps_name_resolvable() {
        let translator = translator_without_ai();
        let text = translator
            .generate_warning_text("大雨警報", Language::ENGLISH, None, Severity::High)
            .await;

        // AI unavailable: the name still resolves (here via fallback to the
        // original), and the optional fields stay empty
        assert_eq!(text.name, "大雨警報");
        assert!(text.description.is_empty());
        assert!(text.action.is_empty());
    }

    #[tokio::test]
    async fn test_generate_warning_text_from_ai_and_caches() {
        let mock_server = MockServer::start().await;
        let payload = r#"{"name": "Flood Warning", "description": "Rivers may overflow.", "action": "Move to higher floors."}"#;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [{ "text": payload }] } }
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let translator = translator_with_mock_ai(&mock_server).await;

        let first = translator
            .generate_warning_text("洪水警報", Language::ENGLISH, Some("大阪府"), Severity::High)
            .await;
        assert_eq!(first.name, "Flood Warning");
        assert_eq!(first.action, "Move to higher floors.");

        // Cached now; mock allows a single request
        let second = translator
            .generate_warning_text("洪水警報", Language::ENGLISH, Some("大阪府"), Severity::High)
            .await;
        assert_eq!(second, first);
    }

    // ==================== Earthquake message ====================

    #[test]
    fn test_format_earthquake_message_english_no_tsunami() {
        let translator = translator_without_ai();
        let message = translator.format_earthquake_message(
            Language::ENGLISH,
            "Off the coast of Fukushima Prefecture",
            7.4,
            "Intensity 6 Upper",
            60,
            "なし",
            "None",
        );

        assert!(message.contains("Off the coast of Fukushima Prefecture"));
        assert!(message.contains("7.4"));
        assert!(message.contains("Intensity 6 Upper"));
        assert!(message.contains("60km"));
        assert!(message.contains("no tsunami risk"));
    }

    #[test]
    fn test_format_earthquake_message_with_tsunami_warning() {
        let translator = translator_without_ai();
        let message = translator.format_earthquake_message(
            Language::ENGLISH,
            "Sagami Bay",
            6.1,
            "Intensity 5 Lower",
            30,
            "津波警報",
            "Tsunami Warning",
        );

        assert!(message.contains("Tsunami information: Tsunami Warning."));
        assert!(!message.contains("{warning}"));
    }

    #[test]
    fn test_format_earthquake_message_japanese() {
        let translator = translator_without_ai();
        let message = translator.format_earthquake_message(
            Language::JAPANESE,
            "福島県沖",
            7.4,
            "6強",
            60,
            "津波警報",
            "津波警報",
        );

        assert!(message.contains("福島県沖で地震が発生しました"));
        assert!(message.contains("津波情報: 津波警報。"));
    }
}

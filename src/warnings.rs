//! JMA warning and advisory fetch.
//!
//! One request per prefecture against the JMA warning endpoint, parsed into
//! `WarningRecord`s. Warning names are statically mapped for the languages
//! the vocabulary is maintained in (ja, en, zh, ko, vi, easy_ja); the
//! remaining languages are produced through the translator's AI tier and
//! cached there.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::language::Language;
use crate::translator::HybridTranslator;

/// Warning severity, ordered extreme > high > medium > low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Extreme,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Extreme => "extreme",
        }
    }

    pub fn parse(value: &str) -> Option<Severity> {
        match value {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            "extreme" => Some(Severity::Extreme),
            _ => None,
        }
    }

    pub fn from_str_or_medium(value: &str) -> Severity {
        Severity::parse(value).unwrap_or(Severity::Medium)
    }
}

/// Alert classification derived from severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    SpecialWarning,
    Warning,
    Advisory,
    Watch,
}

impl From<Severity> for AlertKind {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Extreme => AlertKind::SpecialWarning,
            Severity::High => AlertKind::Warning,
            Severity::Medium => AlertKind::Advisory,
            Severity::Low => AlertKind::Watch,
        }
    }
}

/// One active warning for one area, optionally translated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningRecord {
    pub id: String,
    pub kind: AlertKind,
    pub area_code: String,
    pub area: String,
    pub title: String,
    pub title_translated: Option<String>,
    pub description: String,
    pub description_translated: Option<String>,
    pub severity: Severity,
    pub issued_at: String,
    pub action: Option<String>,
}

/// A per-area fetch failed: timeout, non-2xx, or unparsable body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Languages whose warning vocabulary is statically mapped.
const STATIC_LANGUAGES: [&str; 6] = ["ja", "en", "zh", "ko", "vi", "easy_ja"];

fn is_static_language(language: Language) -> bool {
    STATIC_LANGUAGES.contains(&language.code())
}

/// JMA warning code table: (code, ja, en, zh, ko, vi, easy_ja, severity).
const WARNING_CODES: [(&str, &str, &str, &str, &str, &str, &str, Severity); 30] = [
    ("02", "暴風雪警報", "Blizzard Warning", "暴风雪警报", "폭풍설 경보", "Cảnh báo bão tuyết", "ふぶき けいほう", Severity::High),
    ("03", "大雨警報", "Heavy Rain Warning", "大雨警报", "호우 경보", "Cảnh báo mưa lớn", "おおあめ けいほう", Severity::High),
    ("04", "洪水警報", "Flood Warning", "洪水警报", "홍수 경보", "Cảnh báo lũ lụt", "こうずい けいほう", Severity::High),
    ("05", "暴風警報", "Storm Warning", "暴风警报", "폭풍 경보", "Cảnh báo bão", "ぼうふう けいほう", Severity::High),
    ("06", "大雪警報", "Heavy Snow Warning", "大雪警报", "대설 경보", "Cảnh báo tuyết lớn", "おおゆき けいほう", Severity::High),
    ("07", "波浪警報", "High Waves Warning", "海浪警报", "파랑 경보", "Cảnh báo sóng lớn", "なみ けいほう", Severity::High),
    ("08", "高潮警報", "Storm Surge Warning", "风暴潮警报", "해일 경보", "Cảnh báo triều cường", "たかしお けいほう", Severity::High),
    ("10", "大雨注意報", "Heavy Rain Advisory", "大雨注意报", "호우 주의보", "Chú ý mưa lớn", "おおあめ ちゅういほう", Severity::Medium),
    ("12", "大雪注意報", "Heavy Snow Advisory", "大雪注意报", "대설 주의보", "Chú ý tuyết lớn", "おおゆき ちゅういほう", Severity::Medium),
    ("13", "風雪注意報", "Wind Snow Advisory", "风雪注意报", "풍설 주의보", "Chú ý gió tuyết", "ふうせつ ちゅういほう", Severity::Medium),
    ("14", "雷注意報", "Thunder Advisory", "雷电注意报", "뇌우 주의보", "Chú ý sấm sét", "かみなり ちゅういほう", Severity::Medium),
    ("15", "強風注意報", "Strong Wind Advisory", "强风注意报", "강풍 주의보", "Chú ý gió mạnh", "つよいかぜ ちゅういほう", Severity::Medium),
    ("16", "波浪注意報", "High Waves Advisory", "海浪注意报", "파랑 주의보", "Chú ý sóng lớn", "なみ ちゅういほう", Severity::Medium),
    ("17", "融雪注意報", "Snowmelt Advisory", "融雪注意报", "융설 주의보", "Chú ý tan tuyết", "ゆきどけ ちゅういほう", Severity::Medium),
    ("18", "洪水注意報", "Flood Advisory", "洪水注意报", "홍수 주의보", "Chú ý lũ lụt", "こうずい ちゅういほう", Severity::Medium),
    ("19", "高潮注意報", "Storm Surge Advisory", "风暴潮注意报", "해일 주의보", "Chú ý triều cường", "たかしお ちゅういほう", Severity::Medium),
    ("20", "濃霧注意報", "Dense Fog Advisory", "浓雾注意报", "짙은 안개 주의보", "Chú ý sương mù dày", "きり ちゅういほう", Severity::Low),
    ("21", "乾燥注意報", "Dry Air Advisory", "干燥注意报", "건조 주의보", "Chú ý không khí khô", "かんそう ちゅういほう", Severity::Low),
    ("22", "なだれ注意報", "Avalanche Advisory", "雪崩注意报", "눈사태 주의보", "Chú ý lở tuyết", "なだれ ちゅういほう", Severity::Medium),
    ("23", "低温注意報", "Low Temperature Advisory", "低温注意报", "저온 주의보", "Chú ý nhiệt độ thấp", "さむさ ちゅういほう", Severity::Low),
    ("24", "霜注意報", "Frost Advisory", "霜冻注意报", "서리 주의보", "Chú ý sương giá", "しも ちゅういほう", Severity::Low),
    ("25", "着氷注意報", "Icing Advisory", "结冰注意报", "착빙 주의보", "Chú ý đóng băng", "こおり ちゅういほう", Severity::Low),
    ("26", "着雪注意報", "Snow Accretion Advisory", "积雪注意报", "착설 주의보", "Chú ý tuyết bám", "ゆき ちゅういほう", Severity::Low),
    ("32", "暴風雪特別警報", "Blizzard Emergency Warning", "暴风雪特别警报", "폭풍설 특별 경보", "Cảnh báo khẩn cấp bão tuyết", "ふぶき とくべつけいほう", Severity::Extreme),
    ("33", "大雨特別警報", "Heavy Rain Emergency Warning", "大雨特别警报", "호우 특별 경보", "Cảnh báo khẩn cấp mưa lớn", "おおあめ とくべつけいほう", Severity::Extreme),
    ("35", "暴風特別警報", "Storm Emergency Warning", "暴风特别警报", "폭풍 특별 경보", "Cảnh báo khẩn cấp bão", "ぼうふう とくべつけいほう", Severity::Extreme),
    ("36", "大雪特別警報", "Heavy Snow Emergency Warning", "大雪特别警报", "대설 특별 경보", "Cảnh báo khẩn cấp tuyết lớn", "おおゆき とくべつけいほう", Severity::Extreme),
    ("37", "波浪特別警報", "High Waves Emergency Warning", "海浪特别警报", "파랑 특별 경보", "Cảnh báo khẩn cấp sóng lớn", "なみ とくべつけいほう", Severity::Extreme),
    ("38", "高潮特別警報", "Storm Surge Emergency Warning", "风暴潮特别警报", "해일 특별 경보", "Cảnh báo khẩn cấp triều cường", "たかしお とくべつけいほう", Severity::Extreme),
    ("39", "津波特別警報", "Tsunami Emergency Warning", "海啸特别警报", "쓰나미 특별 경보", "Cảnh báo khẩn cấp sóng thần", "つなみ とくべつけいほう", Severity::Extreme),
];

struct WarningInfo {
    ja: &'static str,
    en: &'static str,
    zh: &'static str,
    ko: &'static str,
    vi: &'static str,
    easy_ja: &'static str,
    severity: Severity,
}

fn warning_info(code: &str) -> Option<WarningInfo> {
    WARNING_CODES
        .iter()
        .find(|(c, ..)| *c == code)
        .map(|&(_, ja, en, zh, ko, vi, easy_ja, severity)| WarningInfo {
            ja,
            en,
            zh,
            ko,
            vi,
            easy_ja,
            severity,
        })
}

impl WarningInfo {
    /// Name in a statically mapped language, falling back en → ja.
    fn name(&self, language: Language) -> &'static str {
        match language.code() {
            "ja" => self.ja,
            "en" => self.en,
            "zh" => self.zh,
            "ko" => self.ko,
            "vi" => self.vi,
            "easy_ja" => self.easy_ja,
            _ => self.en,
        }
    }
}

/// Description sentence templates for the statically mapped languages.
/// Placeholders: {area}, {warning}.
fn description_template(language: Language) -> &'static str {
    match language.code() {
        "ja" => "{area}に{warning}が発表されています。",
        "zh" => "{area}发布了{warning}。",
        "ko" => "{area}에 {warning}이(가) 발령되었습니다.",
        "vi" => "{warning} đã được ban hành cho {area}.",
        "easy_ja" => "{area}に {warning}が でています。",
        _ => "{warning} has been issued for {area}.",
    }
}

fn describe(area: &str, warning: &str, language: Language) -> String {
    description_template(language)
        .replace("{area}", area)
        .replace("{warning}", warning)
}

/// Stable record id: area, warning code and the upstream report timestamp
/// reduced to digits.
fn record_id(area_code: &str, warning_code: &str, report_datetime: &str) -> String {
    let stamp: String = report_datetime
        .chars()
        .filter(char::is_ascii_digit)
        .take(12)
        .collect();
    format!("{}_{}_{}", area_code, warning_code, stamp)
}

/// Client for the JMA per-prefecture warning endpoint.
#[derive(Clone)]
pub struct WarningService {
    client: reqwest::Client,
    base_url: String,
    timeout: std::time::Duration,
    translator: HybridTranslator,
}

impl WarningService {
    pub fn new(config: &Config, translator: HybridTranslator) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.jma_base_url.clone(),
            timeout: config.api_timeout,
            translator,
        }
    }

    /// Fetch and parse the active warnings for one area.
    ///
    /// The upstream's ordering within the area is preserved. For languages
    /// outside the static set, names and descriptions come from the
    /// translator's AI tier (cached across calls).
    pub async fn get_warnings(
        &self,
        area_code: &str,
        language: Language,
    ) -> Result<Vec<WarningRecord>, FetchError> {
        let url = format!("{}/warning/data/warning/{}.json", self.base_url, area_code);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.text().await?;
        let data: serde_json::Value = serde_json::from_str(&body)?;

        if is_static_language(language) {
            Ok(self.parse_warnings(&data, area_code, language))
        } else {
            Ok(self.parse_warnings_with_ai(&data, area_code, language).await)
        }
    }

    /// Walk the JMA payload, keeping announced warnings with known codes.
    fn parse_warnings(
        &self,
        data: &serde_json::Value,
        area_code: &str,
        language: Language,
    ) -> Vec<WarningRecord> {
        let mut records = Vec::new();
        let report_datetime = data
            .get("reportDatetime")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("");

        for (area_name_ja, warning_code) in announced_warnings(data) {
            let Some(info) = warning_info(&warning_code) else {
                continue;
            };

            let title_ja = info.ja;
            let area_translated = if language.is_source() {
                area_name_ja.clone()
            } else {
                crate::phrases::location_name(&area_name_ja, language)
                    .map(str::to_owned)
                    .unwrap_or_else(|| area_name_ja.clone())
            };

            let (title_translated, description_translated) = if language.is_source() {
                (None, None)
            } else {
                let name = info.name(language);
                (
                    Some(name.to_owned()),
                    Some(describe(&area_translated, name, language)),
                )
            };

            records.push(WarningRecord {
                id: record_id(area_code, &warning_code, report_datetime),
                kind: AlertKind::from(info.severity),
                area_code: area_code.to_owned(),
                area: area_translated,
                title: title_ja.to_owned(),
                title_translated,
                description: describe(&area_name_ja, title_ja, Language::JAPANESE),
                description_translated,
                severity: info.severity,
                issued_at: report_datetime.to_owned(),
                action: None,
            });
        }

        records
    }

    /// Same walk for languages outside the static set; names, descriptions
    /// and recommended actions come from the AI tier.
    async fn parse_warnings_with_ai(
        &self,
        data: &serde_json::Value,
        area_code: &str,
        language: Language,
    ) -> Vec<WarningRecord> {
        let mut records = Vec::new();
        let report_datetime = data
            .get("reportDatetime")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("");

        for (area_name_ja, warning_code) in announced_warnings(data) {
            let Some(info) = warning_info(&warning_code) else {
                continue;
            };
            let title_ja = info.ja;

            let generated = self
                .translator
                .generate_warning_text(title_ja, language, Some(&area_name_ja), info.severity)
                .await;
            let area_translated = self
                .translator
                .translate_location(&area_name_ja, language)
                .await;

            let description_translated = if generated.description.is_empty() {
                // AI unavailable: fall back to the English static wording
                describe(&area_translated, info.en, Language::ENGLISH)
            } else {
                generated.description.clone()
            };

            records.push(WarningRecord {
                id: record_id(area_code, &warning_code, report_datetime),
                kind: AlertKind::from(info.severity),
                area_code: area_code.to_owned(),
                area: area_translated,
                title: title_ja.to_owned(),
                title_translated: Some(generated.name),
                description: describe(&area_name_ja, title_ja, Language::JAPANESE),
                description_translated: Some(description_translated),
                severity: info.severity,
                issued_at: report_datetime.to_owned(),
                action: if generated.action.is_empty() {
                    None
                } else {
                    Some(generated.action)
                },
            });
        }

        records
    }
}

/// (area name, warning code) pairs for every announced warning, in upstream
/// order.
fn announced_warnings(data: &serde_json::Value) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    let Some(area_types) = data.get("areaTypes").and_then(serde_json::Value::as_array) else {
        return pairs;
    };

    for area_type in area_types {
        let Some(areas) = area_type.get("areas").and_then(serde_json::Value::as_array) else {
            continue;
        };
        for area in areas {
            let name = area
                .get("name")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("");
            let Some(warnings) = area.get("warnings").and_then(serde_json::Value::as_array)
            else {
                continue;
            };
            for warning in warnings {
                let code = warning
                    .get("code")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("");
                let status = warning
                    .get("status")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("");

                // Only warnings currently announced
                if status == "発表" && !code.is_empty() {
                    pairs.push((name.to_owned(), code.to_owned()));
                }
            }
        }
    }

    pairs
}

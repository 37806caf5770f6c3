//! Language registry: single source of truth for the 16 supported languages.
//!
//! Disaster reports originate in Japanese; every other language is a
//! translation target. The registry is initialized once behind `OnceLock`
//! and is immutable afterwards. An unknown language code is a hard error;
//! callers validate at the boundary and carry a checked `Language` from
//! then on.

use std::sync::OnceLock;

use anyhow::{bail, Result};

/// Metadata for one supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Language code used in API requests and cache keys (e.g., "en", "zh-TW")
    pub code: &'static str,

    /// English name, used when prompting the AI provider (e.g., "Traditional Chinese")
    pub name: &'static str,

    /// Native name shown in language pickers (e.g., "繁體中文")
    pub native_name: &'static str,

    /// Whether this is the source language of upstream reports (Japanese only)
    pub is_source: bool,
}

/// Global language registry.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global registry, initializing it on first access.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: supported_languages(),
        })
    }

    /// Look up a language configuration by code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All supported languages, in registry order.
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// The source language of upstream disaster reports (Japanese).
    ///
    /// # Panics
    /// Panics if the registry does not contain exactly one source language;
    /// that would be a build-time data error.
    pub fn source(&self) -> &LanguageConfig {
        let sources: Vec<_> = self.languages.iter().filter(|lang| lang.is_source).collect();

        match sources.len() {
            0 => panic!("No source language found in registry"),
            1 => sources[0],
            _ => panic!("Multiple source languages found in registry"),
        }
    }
}

/// A validated language.
///
/// Can only be constructed from a code present in the registry, so holders
/// never need to re-check support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    code: &'static str,
}

impl Language {
    pub const JAPANESE: Language = Language { code: "ja" };
    pub const EASY_JAPANESE: Language = Language { code: "easy_ja" };
    pub const ENGLISH: Language = Language { code: "en" };
    pub const CHINESE: Language = Language { code: "zh" };
    pub const KOREAN: Language = Language { code: "ko" };
    pub const VIETNAMESE: Language = Language { code: "vi" };

    /// Create a `Language` from its code.
    ///
    /// Returns an error for any code outside the 16-language set. This is
    /// the only fallible path; everything downstream treats the language as
    /// trusted.
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) => Ok(Language { code: config.code }),
            None => bail!("Unsupported language code: '{}'", code),
        }
    }

    /// The source language (Japanese).
    pub fn source() -> Language {
        let config = LanguageRegistry::get().source();
        Language { code: config.code }
    }

    /// All 16 supported languages, in registry order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_all()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// The language code (e.g., "en", "zh-TW").
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// The full configuration from the registry.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// English name, as used in AI prompts.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Native name.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Whether this is the source language of upstream reports.
    pub fn is_source(&self) -> bool {
        self.config().is_source
    }
}

/// The 16 supported languages.
///
/// "easy_ja" is simplified Japanese (やさしい日本語) for residents still
/// learning the language; it is a translation target, not a source.
fn supported_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "ja",
            name: "Japanese",
            native_name: "日本語",
            is_source: true,
        },
        LanguageConfig {
            code: "easy_ja",
            name: "Easy Japanese",
            native_name: "やさしい にほんご",
            is_source: false,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_source: false,
        },
        LanguageConfig {
            code: "zh",
            name: "Simplified Chinese",
            native_name: "简体中文",
            is_source: false,
        },
        LanguageConfig {
            code: "zh-TW",
            name: "Traditional Chinese",
            native_name: "繁體中文",
            is_source: false,
        },
        LanguageConfig {
            code: "ko",
            name: "Korean",
            native_name: "한국어",
            is_source: false,
        },
        LanguageConfig {
            code: "vi",
            name: "Vietnamese",
            native_name: "Tiếng Việt",
            is_source: false,
        },
        LanguageConfig {
            code: "th",
            name: "Thai",
            native_name: "ไทย",
            is_source: false,
        },
        LanguageConfig {
            code: "id",
            name: "Indonesian",
            native_name: "Bahasa Indonesia",
            is_source: false,
        },
        LanguageConfig {
            code: "ms",
            name: "Malay",
            native_name: "Bahasa Melayu",
            is_source: false,
        },
        LanguageConfig {
            code: "tl",
            name: "Tagalog",
            native_name: "Tagalog",
            is_source: false,
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            is_source: false,
        },
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_source: false,
        },
        LanguageConfig {
            code: "it",
            name: "Italian",
            native_name: "Italiano",
            is_source: false,
        },
        LanguageConfig {
            code: "es",
            name: "Spanish",
            native_name: "Español",
            is_source: false,
        },
        LanguageConfig {
            code: "ne",
            name: "Nepali",
            native_name: "नेपाली",
            is_source: false,
        },
    ]
}

//! Persistent translation cache.
//!
//! A single JSON document on disk maps md5-hashed (source text, target
//! language) keys to translation entries, so every AI translation is paid
//! for at most once. The file is loaded lazily on first access and is
//! fail-open: a missing or corrupt file just starts an empty cache. Writes
//! rewrite the document through a temp-file rename so a crash mid-write
//! cannot corrupt the store.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::language::Language;

/// Which tier produced a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedVia {
    Static,
    Cache,
    Ai,
}

/// Identity of one cached translation: exact source text (trimmed) plus
/// target language. No other normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationKey {
    source_text: String,
    target_language: Language,
}

impl TranslationKey {
    pub fn new(source_text: &str, target_language: Language) -> Self {
        Self {
            source_text: source_text.trim().to_owned(),
            target_language,
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn target_language(&self) -> Language {
        self.target_language
    }

    /// The md5 hash the store is keyed by.
    pub fn hash(&self) -> String {
        let digest = md5::compute(format!(
            "{}:{}",
            self.source_text,
            self.target_language.code()
        ));
        format!("{:x}", digest)
    }
}

/// One persisted translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationEntry {
    pub source_text: String,
    pub target_language: String,
    pub value: String,
    pub resolved_via: ResolvedVia,
    pub created_at: DateTime<Utc>,
}

/// `None` until the first access triggers a load.
struct CacheState {
    entries: Option<HashMap<String, TranslationEntry>>,
}

/// Cloneable handle to the shared cache.
#[derive(Clone)]
pub struct TranslationCache {
    state: Arc<Mutex<CacheState>>,
    file: Option<PathBuf>,
}

impl TranslationCache {
    /// Cache backed by a JSON file. The file is not touched until the first
    /// `get`/`put`.
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            state: Arc::new(Mutex::new(CacheState { entries: None })),
            file: Some(file.into()),
        }
    }

    /// Ephemeral cache for tests; nothing is persisted.
    pub fn in_memory() -> Self {
        Self {
            state: Arc::new(Mutex::new(CacheState { entries: None })),
            file: None,
        }
    }

    /// Look up a cached translation.
    pub fn get(&self, key: &TranslationKey) -> Option<String> {
        let mut state = self.state.lock().expect("cache lock poisoned");
        let entries = self.loaded(&mut state);
        entries.get(&key.hash()).map(|entry| entry.value.clone())
    }

    /// Store a translation. Overwrites any existing value for the key;
    /// regenerated AI output is not guaranteed byte-identical and last
    /// write wins. A failed disk write is logged and swallowed; it costs a
    /// future AI call, not correctness.
    pub fn put(&self, key: &TranslationKey, value: &str) {
        let entry = TranslationEntry {
            source_text: key.source_text().to_owned(),
            target_language: key.target_language().code().to_owned(),
            value: value.to_owned(),
            resolved_via: ResolvedVia::Ai,
            created_at: Utc::now(),
        };

        let mut state = self.state.lock().expect("cache lock poisoned");
        self.loaded(&mut state).insert(key.hash(), entry);
        self.persist(&state);
    }

    /// Whether the key has a cached translation.
    pub fn contains(&self, key: &TranslationKey) -> bool {
        self.get(key).is_some()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        let mut state = self.state.lock().expect("cache lock poisoned");
        self.loaded(&mut state).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ensure the backing file has been loaded, then hand out the map.
    fn loaded<'a>(&self, state: &'a mut CacheState) -> &'a mut HashMap<String, TranslationEntry> {
        if state.entries.is_none() {
            state.entries = Some(self.load_from_disk());
        }
        state.entries.as_mut().expect("entries just initialized")
    }

    /// Fail-open load: any problem yields an empty cache and a warning,
    /// never an error.
    fn load_from_disk(&self) -> HashMap<String, TranslationEntry> {
        let Some(file) = &self.file else {
            return HashMap::new();
        };

        if !file.exists() {
            return HashMap::new();
        }

        match fs::read_to_string(file) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        "Translation cache {} is malformed ({}), starting empty",
                        file.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read translation cache {} ({}), starting empty",
                    file.display(),
                    e
                );
                HashMap::new()
            }
        }
    }

    /// Atomic rewrite: serialize to a temp sibling, then rename over the
    /// real file.
    fn persist(&self, state: &CacheState) {
        let Some(file) = &self.file else {
            return;
        };
        let Some(entries) = &state.entries else {
            return;
        };

        if let Some(parent) = file.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!("Failed to create cache directory {}: {}", parent.display(), e);
                    return;
                }
            }
        }

        let serialized = match serde_json::to_string_pretty(entries) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize translation cache: {}", e);
                return;
            }
        };

        let tmp = file.with_extension("json.tmp");
        if let Err(e) = fs::write(&tmp, serialized) {
            warn!("Failed to write translation cache {}: {}", tmp.display(), e);
            return;
        }
        if let Err(e) = fs::rename(&tmp, file) {
            warn!("Failed to replace translation cache {}: {}", file.display(), e);
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::GenerationConfig;
use crate::error::CommentError;
use crate::filters::{FilterLists, PhraseFilters};

/// Environment variable that supplies the API key when settings carry none.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Persisted user settings. Field names match the extension's storage keys,
/// so an exported `chrome.storage.sync` blob loads as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub gemini_api_key: String,
    #[serde(flatten)]
    pub generation: GenerationConfig,
    pub filters: FilterLists,
}

impl Settings {
    /// Returns the path to the settings file: <config dir>/commentron/settings.json
    pub fn file_path() -> Result<PathBuf, CommentError> {
        let base = dirs::config_dir().ok_or_else(|| {
            CommentError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no config directory on this platform",
            ))
        })?;
        Ok(base.join("commentron").join("settings.json"))
    }

    /// Load settings from the default location. Returns defaults if the file
    /// doesn't exist or can't be parsed.
    pub fn load() -> Self {
        match Self::file_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                warn!(error = %e, "could not determine settings path");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Self::default();
        }

        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read settings file");
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse settings file");
                Self::default()
            }
        }
    }

    /// Save settings to the default location.
    pub fn save(&self) -> Result<(), CommentError> {
        self.save_to(&Self::file_path()?)
    }

    /// Save settings, creating the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), CommentError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// The configured key, or the environment's when the stored one is blank.
    pub fn api_key(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key(&self, env: Option<String>) -> Option<String> {
        let stored = self.gemini_api_key.trim();
        if !stored.is_empty() {
            return Some(stored.to_string());
        }
        env.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation
    }

    /// Compile the configured phrase lists.
    pub fn phrase_filters(&self) -> Result<PhraseFilters, CommentError> {
        PhraseFilters::compile(&self.filters)
    }
}

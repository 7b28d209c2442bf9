// Configuration Storage Service
// Handles the settings file read/write and version backup

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MAX_BACKUPS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub humanizer: HumanizerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            humanizer: HumanizerSettings::default(),
        }
    }
}

/// Tunables for the humanizer pipeline and the processing layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HumanizerSettings {
    #[serde(default = "default_intensity")]
    pub default_intensity: f64,
    /// Inputs shorter than this (trimmed, in chars) are returned unchanged
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    #[serde(default = "default_recency_capacity")]
    pub recency_capacity: usize,
    #[serde(default = "default_recency_window")]
    pub recency_window: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for HumanizerSettings {
    fn default() -> Self {
        Self {
            default_intensity: default_intensity(),
            min_text_chars: default_min_text_chars(),
            max_text_chars: default_max_text_chars(),
            recency_capacity: default_recency_capacity(),
            recency_window: default_recency_window(),
            seed: None,
        }
    }
}

fn default_version() -> String { env!("CARGO_PKG_VERSION").to_string() }
fn default_intensity() -> f64 { 0.6 }
fn default_min_text_chars() -> usize { 10 }
fn default_max_text_chars() -> usize { 10_000 }
fn default_recency_capacity() -> usize { 50 }
fn default_recency_window() -> usize { 5 }

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("clearify"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<(), String> {
        fs::create_dir_all(&self.config_dir)
            .map_err(|e| format!("Failed to create config dir: {}", e))
    }

    /// Load configuration; a missing file yields defaults
    pub fn load(&self) -> Result<AppConfig, String> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file)
            .map_err(|e| format!("Failed to read config: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Save configuration, backing up the previous file first
    pub fn save(&self, config: &AppConfig) -> Result<(), String> {
        self.ensure_dir()?;

        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        fs::write(&self.config_file, content)
            .map_err(|e| format!("Failed to write config: {}", e))
    }

    pub fn humanizer_settings(&self) -> Result<HumanizerSettings, String> {
        Ok(self.load()?.humanizer)
    }

    pub fn set_humanizer_settings(&self, settings: HumanizerSettings) -> Result<(), String> {
        let mut config = self.load()?;
        config.humanizer = settings;
        self.save(&config)
    }

    fn backup_dir(&self) -> PathBuf {
        self.config_dir.join("backups")
    }

    fn create_backup(&self) -> Result<(), String> {
        let backup_dir = self.backup_dir();
        fs::create_dir_all(&backup_dir)
            .map_err(|e| format!("Failed to create backup dir: {}", e))?;

        // Millisecond precision keeps back-to-back saves from overwriting each other
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));

        fs::copy(&self.config_file, &backup_file)
            .map_err(|e| format!("Failed to create backup: {}", e))?;

        self.cleanup_old_backups(&backup_dir, MAX_BACKUPS)
    }

    /// Remove old backups, keeping only the most recent `keep`
    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), String> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)
            .map_err(|e| format!("Failed to read backup dir: {}", e))?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().map_or(false, |ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Names embed the timestamp, so lexical order is chronological
        entries.sort_by_key(|e| e.file_name());

        for entry in entries.iter().take(entries.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}

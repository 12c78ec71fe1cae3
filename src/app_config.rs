use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;

/// Application configuration module
/// This module handles loading and validating `config.json`: the data and
/// result folders, the inference endpoint and the selectable model profiles.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Folder locations
    pub global_settings: GlobalSettings,

    /// Full URL of the generation endpoint
    #[serde(default = "default_llm_engine_url")]
    pub llm_engine_url: String,

    /// Selectable model profiles, keyed by menu choice
    pub models: BTreeMap<String, ModelProfile>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Input and output folder settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GlobalSettings {
    /// Folder holding the `.json` documents to translate
    pub data_folder: PathBuf,

    /// Folder receiving the `.txt` translations
    pub result_folder: PathBuf,
}

/// Direction of a translation, used to pick the prompt template
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TranslationDirection {
    // @direction: source language into English
    ToEnglish,
    // @direction: source language into Urdu
    ToUrdu,
    // @direction: segment sent as-is
    #[default]
    Passthrough,
}

impl TranslationDirection {
    /// Derive a direction from the model identifier markers used by older
    /// configs (`GTE` = German to English, `GTU` = German to Urdu).
    pub fn from_model_marker(base_model: &str) -> Self {
        if base_model.contains("GTE") {
            Self::ToEnglish
        } else if base_model.contains("GTU") {
            Self::ToUrdu
        } else {
            Self::Passthrough
        }
    }
}

/// A selectable translation model and its output naming
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ModelProfile {
    // @field: Display name for the menu
    pub name: String,

    // @field: Model identifier sent to the endpoint
    pub base_model: String,

    // @field: Appended to the input stem to form the output name
    pub file_suffix: String,

    // @field: Declared translation direction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<TranslationDirection>,

    // @field: Language named in the prompt
    #[serde(default = "default_source_language")]
    pub source_language: String,
}

impl ModelProfile {
    // @returns: Profile with derived direction and default source language
    pub fn new(
        name: impl Into<String>,
        base_model: impl Into<String>,
        file_suffix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_model: base_model.into(),
            file_suffix: file_suffix.into(),
            direction: None,
            source_language: default_source_language(),
        }
    }

    // @returns: Same profile with an explicit direction
    pub fn with_direction(mut self, direction: TranslationDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    /// The effective direction: the declared one, or the legacy marker guess
    pub fn direction(&self) -> TranslationDirection {
        self.direction
            .unwrap_or_else(|| TranslationDirection::from_model_marker(&self.base_model))
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_llm_engine_url() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_source_language() -> String {
    "German".to_string()
}

impl Config {
    /// Load the configuration from a JSON file.
    ///
    /// A missing file is reported as [`ConfigError::Missing`] so the caller can
    /// tell absence apart from a broken file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::Missing(path.to_path_buf()).into());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.llm_engine_url).map_err(|e| {
            ConfigError::Invalid(format!("llm_engine_url '{}': {}", self.llm_engine_url, e))
        })?;

        if self.models.is_empty() {
            return Err(ConfigError::Invalid("no model profiles configured".to_string()));
        }

        for (key, profile) in &self.models {
            if profile.base_model.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "model profile '{}' has an empty base_model",
                    key
                )));
            }
        }

        if self.global_settings.data_folder.as_os_str().is_empty()
            || self.global_settings.result_folder.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid(
                "data_folder and result_folder must be set".to_string(),
            ));
        }

        Ok(())
    }

    /// Make relative folders relative to `base_dir` (normally the config file's directory)
    pub fn resolve_paths<P: AsRef<Path>>(&mut self, base_dir: P) {
        let base_dir = base_dir.as_ref();
        for folder in [
            &mut self.global_settings.data_folder,
            &mut self.global_settings.result_folder,
        ] {
            if folder.is_relative() {
                *folder = base_dir.join(&*folder);
            }
        }
    }

    /// Look up a model profile by its selection key
    pub fn profile(&self, key: &str) -> Result<&ModelProfile, ConfigError> {
        self.models
            .get(key)
            .ok_or_else(|| ConfigError::UnknownProfile(key.to_string()))
    }
}

//! Configuration management for mmif-nlp using the prefer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default minimum confidence passed to the entity linker.
pub const DEFAULT_LINKER_CONFIDENCE: f64 = 0.5;

/// Default cap on `POST /` bodies. Transcripts with token views run large.
pub const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024 * 1024;

/// Application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Address the HTTP server binds to.
    pub host: String,
    /// Port the HTTP server listens on.
    pub port: u16,
    /// Base URL of a DBpedia Spotlight compatible service. Linking is
    /// unavailable when unset.
    pub linker_endpoint: Option<String>,
    /// Minimum confidence for linked entities.
    pub linker_confidence: f64,
    /// Timeout for outbound HTTP requests, in seconds.
    pub request_timeout: u64,
    /// Pretty-print responses unless the request says otherwise.
    pub pretty: bool,
    /// Largest request body the server accepts.
    pub max_body_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            linker_endpoint: None,
            linker_confidence: DEFAULT_LINKER_CONFIDENCE,
            request_timeout: 30,
            pretty: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, prefer::FromValue)]
pub struct Config {
    /// Bind host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Listen port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Entity linking service base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linker_endpoint: Option<String>,
    /// Entity linking confidence threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linker_confidence: Option<f64>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Default for the `pretty` parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
    /// Request body cap in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_body_bytes: Option<usize>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    #[prefer(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers mmif-nlp config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("mmif-nlp").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => match Self::load_from_path(path).await {
                    Ok(config) => config,
                    Err(e) => {
                        tracing::warn!("{}", e);
                        Self::default()
                    }
                },
                None => Self::default(),
            },
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply file values on top of `settings`.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(endpoint) = &self.linker_endpoint {
            settings.linker_endpoint = Some(endpoint.clone());
        }
        if let Some(confidence) = self.linker_confidence {
            settings.linker_confidence = confidence;
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(pretty) = self.pretty {
            settings.pretty = pretty;
        }
        if let Some(limit) = self.max_body_bytes {
            settings.max_body_bytes = limit;
        }
    }
}

/// Read a non-empty environment variable.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Apply environment overrides, which take precedence over the config file.
pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(host) = lookup("MMIF_NLP_HOST").or_else(|| lookup("IP")) {
        tracing::debug!("Using host from environment: {}", host);
        settings.host = host;
    }

    if let Some(port) = lookup("MMIF_NLP_PORT").or_else(|| lookup("PORT")) {
        match port.parse() {
            Ok(port) => settings.port = port,
            Err(_) => tracing::warn!("Ignoring invalid port from environment: {}", port),
        }
    }

    if let Some(endpoint) = lookup("MMIF_NLP_LINKER_ENDPOINT") {
        tracing::debug!("Using linker endpoint from environment: {}", endpoint);
        settings.linker_endpoint = Some(endpoint);
    }

    if let Some(confidence) = lookup("MMIF_NLP_LINKER_CONFIDENCE") {
        match confidence.parse() {
            Ok(value) => settings.linker_confidence = value,
            Err(_) => tracing::warn!("Ignoring invalid linker confidence: {}", confidence),
        }
    }

    if let Some(timeout) = lookup("MMIF_NLP_REQUEST_TIMEOUT") {
        match timeout.parse() {
            Ok(value) => settings.request_timeout = value,
            Err(_) => tracing::warn!("Ignoring invalid request timeout: {}", timeout),
        }
    }

    if let Some(limit) = lookup("MMIF_NLP_MAX_BODY_BYTES") {
        match limit.parse() {
            Ok(value) => settings.max_body_bytes = value,
            Err(_) => tracing::warn!("Ignoring invalid body size limit: {}", limit),
        }
    }
}

/// Load settings from an explicit config file, or a discovered one, then
/// the environment.
pub async fn load_settings(config_path: Option<&Path>) -> Settings {
    let config = match config_path {
        Some(path) => match Config::load_from_path(path).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}", e);
                Config::default()
            }
        },
        None => Config::load().await,
    };

    match &config.source_path {
        Some(path) => tracing::info!("Loaded configuration from {}", path.display()),
        None => tracing::debug!("No configuration file found, using defaults"),
    }

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings);
    apply_env_overrides(&mut settings, env_value);
    settings
}

//! Layered server configuration.
//!
//! Settings are merged from built-in defaults, an optional TOML file
//! (`docqa.toml` unless another path is given), and `DOCQA_`-prefixed
//! environment variables. Nested keys use `__`, so `DOCQA_ANSWER__TOP_N=5`
//! sets `answer.top_n`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use docqa::AnswerConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Config file read when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "docqa.toml";

/// Top-level server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Directory of `.txt` documents loaded at startup.
    pub documents_dir: PathBuf,
    /// Upper bound on a single request, generation included.
    pub request_timeout_secs: u64,
    pub log: LogSettings,
    pub answer: AnswerConfig,
    pub embedding: EmbeddingSettings,
    pub generation: GenerationSettings,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            documents_dir: PathBuf::from("documents"),
            request_timeout_secs: 60,
            log: LogSettings::default(),
            answer: AnswerConfig::default(),
            embedding: EmbeddingSettings::default(),
            generation: GenerationSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogSettings {
    /// An `EnvFilter` directive such as `info` or `docqa=debug`.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

/// Which embedding backend to use.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    /// Offline feature hashing; no network access.
    #[default]
    Hashing,
    /// An OpenAI-compatible `/embeddings` endpoint.
    Openai,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub backend: EmbeddingBackend,
    pub model: Option<String>,
    pub base_url: Option<String>,
    /// Vector size; for OpenAI this requests Matryoshka truncation.
    pub dimensions: Option<usize>,
}

/// Settings for the OpenAI-compatible chat completions generator.
///
/// The API key is always read from `OPENAI_API_KEY`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GenerationSettings {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
}

impl ServerSettings {
    /// Build the layered figment without extracting it.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let file = config_file.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("DOCQA_").split("__"))
    }

    /// Load and validate settings.
    ///
    /// A missing default config file is fine; a missing explicit one is not.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = config_file {
            anyhow::ensure!(path.is_file(), "config file not found: {}", path.display());
        }
        let settings: Self =
            Self::figment(config_file).extract().context("failed to load docqa configuration")?;
        settings.answer.validate().context("invalid [answer] settings")?;
        Ok(settings)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

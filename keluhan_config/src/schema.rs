use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use keluhan_core::ExtractionConfig;

/// Process configuration, read once at start.
///
/// Sources, later wins: built-in defaults, `~/keluhan/config.json` (optional),
/// then the `LM_BASE_URL`, `LM_API_KEY`, `LM_MODEL` and `PORT` variables.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Completion service settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "LlmConfig::default_base_url")]
    pub base_url: String,
    #[serde(default = "LlmConfig::default_api_key")]
    pub api_key: String,
    #[serde(default = "LlmConfig::default_model")]
    pub model: String,
    #[serde(default = "LlmConfig::default_temperature")]
    pub temperature: f32,
    #[serde(default = "LlmConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            api_key: Self::default_api_key(),
            model: Self::default_model(),
            temperature: Self::default_temperature(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    fn default_base_url() -> String {
        "http://localhost:1234/v1".to_string()
    }

    fn default_api_key() -> String {
        "lm-studio".to_string()
    }

    fn default_model() -> String {
        "qwen2.5-7b-instruct-1m".to_string()
    }

    const fn default_temperature() -> f32 {
        0.2
    }

    const fn default_timeout_secs() -> u64 {
        60
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn extraction_config(&self) -> ExtractionConfig {
        ExtractionConfig {
            model: self.model.clone(),
            temperature: self.temperature,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_host")]
    pub host: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl ServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    const fn default_port() -> u16 {
        5000
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load the effective configuration: file (if present) plus environment.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_dir()?.join("config.json");

        let mut config = if config_path.exists() {
            info!("Loading config from {}", config_path.display());
            Self::load_from(&config_path)?
        } else {
            info!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Apply `LM_BASE_URL`, `LM_API_KEY`, `LM_MODEL` and `PORT` from `lookup`.
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_url) = var("LM_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Some(api_key) = var("LM_API_KEY") {
            self.llm.api_key = api_key;
        }
        if let Some(model) = var("LM_MODEL") {
            self.llm.model = model;
        }
        if let Some(port) = var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT value '{port}': {e}"))?;
        }
        Ok(())
    }

    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("keluhan"))
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(&config_path, config_template)?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Next steps:");
        println!("   1. Point llm.base_url at your OpenAI-compatible server (LM Studio, vLLM, ...)");
        println!("   2. Set llm.model to a model loaded on that server");
        println!("   3. Run 'keluhan serve' and POST complaints to /chat");
        println!();
        println!("Environment overrides: LM_BASE_URL, LM_API_KEY, LM_MODEL, PORT");
        println!();
        Ok(())
    }
}

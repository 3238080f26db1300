mod defaults;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::NurseError;
use defaults::*;

/// Environment variable that overrides `provider.openai.api_key`.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Environment variable that overrides `session.secret`.
pub const ENV_SESSION_SECRET: &str = "NURSEBOT_SESSION_SECRET";

/// Top-level NurseBot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub nursebot: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
        }
    }
}

/// HTTP / WebSocket listener.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Verbose logging.
    #[serde(default)]
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            debug: false,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider")]
    pub default: String,
    #[serde(default)]
    pub openai: OpenAiConfig,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            default: default_provider(),
            openai: OpenAiConfig::default(),
        }
    }
}

/// OpenAI-compatible completion endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Request timeout in seconds; expiry counts as a provider failure.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_openai_base_url(),
            model: default_openai_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Session cookie configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// HMAC key for signing session cookies. Must be supplied externally.
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Cookie lifetime in seconds.
    #[serde(default = "default_session_max_age")]
    pub max_age_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            cookie_name: default_cookie_name(),
            max_age_secs: default_session_max_age(),
        }
    }
}

/// Transcript memory config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Per-user transcript cap; older entries are evicted first.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

impl Config {
    /// Apply environment overrides for secrets using the given lookup.
    ///
    /// Empty values are ignored so a blank variable cannot wipe a configured key.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_OPENAI_API_KEY).filter(|v| !v.is_empty()) {
            self.provider.openai.api_key = key;
        }
        if let Some(secret) = lookup(ENV_SESSION_SECRET).filter(|v| !v.is_empty()) {
            self.session.secret = secret;
        }
    }

    /// Check the values the server cannot start without.
    pub fn validate_for_serve(&self) -> Result<(), NurseError> {
        if self.session.secret.is_empty() {
            return Err(NurseError::Config(format!(
                "session.secret is empty. Set it in config.toml or the {ENV_SESSION_SECRET} env var."
            )));
        }
        if self.provider.default == "openai" && self.provider.openai.api_key.is_empty() {
            return Err(NurseError::Config(format!(
                "provider.openai.api_key is empty. Set it in config.toml or the {ENV_OPENAI_API_KEY} env var."
            )));
        }
        if self.memory.max_entries == 0 {
            return Err(NurseError::Config(
                "memory.max_entries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, NurseError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| NurseError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| NurseError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}

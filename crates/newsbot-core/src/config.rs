//! NewsBot configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{NewsBotError, Result};

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsBotConfig {
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub telegram: Option<TelegramChannelConfig>,
}

fn default_bot_name() -> String { "NewsBot".into() }

impl Default for NewsBotConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            gateway: GatewayConfig::default(),
            dashboard: DashboardConfig::default(),
            telegram: None,
        }
    }
}

impl NewsBotConfig {
    /// Load config from the default path (~/.newsbot/config.toml).
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NewsBotError::Config(format!("Failed to read config: {e}")))?;
        Self::parse(&content)
    }

    /// Parse config from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| NewsBotError::Config(format!("Failed to parse config: {e}")))
    }

    /// Save config to the given path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| NewsBotError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the NewsBot home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".newsbot")
    }

    /// Bot token, if a Telegram channel is configured and enabled.
    pub fn bot_token(&self) -> Option<&str> {
        self.telegram
            .as_ref()
            .filter(|tg| tg.enabled && !tg.bot_token.trim().is_empty())
            .map(|tg| tg.bot_token.as_str())
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 { 3000 }
fn default_host() -> String { "127.0.0.1".into() }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Dashboard behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// How many pending broadcasts the overview lists.
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
    /// How long the "scheduled" confirmation stays visible.
    #[serde(default = "default_confirmation_secs")]
    pub confirmation_secs: u64,
}

fn default_upcoming_limit() -> usize { 3 }
fn default_confirmation_secs() -> u64 { 3 }

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            upcoming_limit: default_upcoming_limit(),
            confirmation_secs: default_confirmation_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramChannelConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub bot_token: String,
}

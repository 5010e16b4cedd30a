use crate::providers::{alpha_vantage, proxy, yahoo_finance};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fmt, fs, path::PathBuf};
use tracing::debug;

/// Environment variable holding the Alpha Vantage credential.
pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

#[derive(Deserialize, Serialize, Clone)]
pub struct AlphaVantageConfig {
    #[serde(default = "default_alpha_vantage_url")]
    pub base_url: String,
    pub api_key: Option<String>,
}

// Config is logged at debug level; the key must not end up in logs.
impl fmt::Debug for AlphaVantageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlphaVantageConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProxyConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct YahooProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub alpha_vantage: Option<AlphaVantageConfig>,
    pub proxy: Option<ProxyConfig>,
    pub yahoo: Option<YahooProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            alpha_vantage: Some(AlphaVantageConfig {
                base_url: default_alpha_vantage_url(),
                api_key: None,
            }),
            proxy: Some(ProxyConfig {
                base_url: proxy::DEFAULT_BASE_URL.to_string(),
            }),
            yahoo: Some(YahooProviderConfig {
                base_url: yahoo_finance::DEFAULT_BASE_URL.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3030,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

fn default_alpha_vantage_url() -> String {
    alpha_vantage::DEFAULT_BASE_URL.to_string()
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_request_timeout_secs() -> u64 {
    5
}

fn default_refresh_interval_secs() -> u64 {
    300
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            server: ServerConfig::default(),
            cache_ttl_secs: default_cache_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when
    /// it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "finsnap", "finsnap")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Credential for the primary provider. The environment wins over the
    /// file so keys can stay out of config files.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with_env(std::env::var(API_KEY_ENV).ok())
    }

    pub(crate) fn api_key_with_env(&self, env_value: Option<String>) -> Option<String> {
        env_value.filter(|k| !k.trim().is_empty()).or_else(|| {
            self.providers
                .alpha_vantage
                .as_ref()
                .and_then(|c| c.api_key.clone())
        })
    }

    pub fn alpha_vantage_url(&self) -> &str {
        self.providers
            .alpha_vantage
            .as_ref()
            .map_or(alpha_vantage::DEFAULT_BASE_URL, |c| &c.base_url)
    }

    pub fn proxy_url(&self) -> &str {
        self.providers
            .proxy
            .as_ref()
            .map_or(proxy::DEFAULT_BASE_URL, |c| &c.base_url)
    }

    pub fn yahoo_url(&self) -> &str {
        self.providers
            .yahoo
            .as_ref()
            .map_or(yahoo_finance::DEFAULT_BASE_URL, |c| &c.base_url)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

pub const DEFAULT_SHORTENER: &str = "is.gd";
pub const DEFAULT_PASTEBIN: &str = "hastebin";

/// Web plugin configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub http: HttpConfig,
    pub shorteners: ShortenerConfig,
    pub pastebins: PastebinConfig,
    pub pagecheck: PageCheckConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ShortenerConfig {
    pub default: String,
    pub isgd_url: String,
    pub googl_url: String,
    /// Used when the caller does not pass a key
    pub googl_key: Option<String>,
    pub gitio_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PastebinConfig {
    pub default: String,
    pub hastebin_server: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PageCheckConfig {
    pub isup_url: String,
    pub down_markers: Vec<String>,
    pub up_markers: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: format!("carik-web/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_SHORTENER.to_string(),
            isgd_url: "https://is.gd".to_string(),
            googl_url: "https://www.googleapis.com/urlshortener/v1/url".to_string(),
            googl_key: None,
            gitio_url: "https://git.io".to_string(),
        }
    }
}

impl Default for PastebinConfig {
    fn default() -> Self {
        Self {
            default: DEFAULT_PASTEBIN.to_string(),
            hastebin_server: "https://hastebin.com".to_string(),
        }
    }
}

impl Default for PageCheckConfig {
    fn default() -> Self {
        Self {
            isup_url: "https://isup.me".to_string(),
            down_markers: vec!["not just you".to_string()],
            up_markers: vec!["is up".to_string()],
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to render config: {}", e)))
    }

    pub fn load_env() -> Self {
        // Load from environment variables
        let mut config = Config::default();

        if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
            config.shorteners.googl_key = Some(key);
        }

        if let Ok(server) = std::env::var("HASTEBIN_SERVER") {
            config.pastebins.hastebin_server = server;
        }

        if let Ok(name) = std::env::var("WEB_DEFAULT_SHORTENER") {
            config.shorteners.default = name;
        }

        if let Ok(name) = std::env::var("WEB_DEFAULT_PASTEBIN") {
            config.pastebins.default = name;
        }

        if let Ok(timeout) = std::env::var("WEB_HTTP_TIMEOUT") {
            match timeout.parse() {
                Ok(secs) => config.http.timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid WEB_HTTP_TIMEOUT: {}", timeout),
            }
        }

        config
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("http.timeout-secs must be positive".to_string()));
        }
        if self.pagecheck.down_markers.is_empty() || self.pagecheck.up_markers.is_empty() {
            return Err(ConfigError::InvalidValue("pagecheck markers must not be empty".to_string()));
        }
        Ok(())
    }
}

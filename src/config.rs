use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::BestiaryResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub client: ClientConfig,
    pub server: ServerConfig,
}

/// Matching and pagination constants shared by the matcher and ranker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Minimum query length before any matching is attempted.
    pub min_chars: usize,
    /// Default per-tier cap for autocomplete suggestions.
    pub suggest_limit: usize,
    /// Rows per page on the full results view.
    pub page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Trailing-edge debounce window for keystrokes, in milliseconds.
    pub debounce_ms: u64,
    /// How long a cached suggestion response stays valid, in milliseconds.
    pub cache_ttl_ms: u64,
    /// How long the transient error notice stays visible, in milliseconds.
    pub notice_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Optional JSON dataset to serve instead of the bundled sample.
    pub dataset: Option<PathBuf>,
}

#[allow(clippy::derivable_impls)]
impl Default for Config {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            client: ClientConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_chars: 2,
            suggest_limit: 5,
            page_size: 5,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            cache_ttl_ms: 300_000,
            notice_ms: 3_000,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            dataset: None,
        }
    }
}

impl ClientConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn notice(&self) -> Duration {
        Duration::from_millis(self.notice_ms)
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Missing file falls back to defaults; a present-but-invalid file is an error.
    pub fn load() -> BestiaryResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> BestiaryResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default config path: `<config dir>/bestiary/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bestiary").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.search.min_chars, 2);
        assert_eq!(config.search.suggest_limit, 5);
        assert_eq!(config.search.page_size, 5);
        assert_eq!(config.client.debounce_ms, 300);
        assert_eq!(config.client.cache_ttl_ms, 300_000);
        assert_eq!(config.client.notice_ms, 3_000);
        assert_eq!(config.server.port, 3000);
        assert!(config.server.dataset.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [search]
            page_size = 10

            [server]
            port = 8080
            "#,
        )
        .unwrap();

        assert_eq!(config.search.page_size, 10);
        assert_eq!(config.search.min_chars, 2);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.client.debounce_ms, 300);
    }

    #[test]
    fn test_durations() {
        let client = ClientConfig::default();
        assert_eq!(client.debounce(), Duration::from_millis(300));
        assert_eq!(client.cache_ttl(), Duration::from_secs(300));
        assert_eq!(client.notice(), Duration::from_secs(3));
    }
}

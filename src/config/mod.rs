use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

static CONFIG: OnceCell<Config> = OnceCell::const_new();

mod config_dir;
pub use config_dir::{CONFIG_FILE, app_dir, app_dir_in, find_config_file, read_config};

mod error;
pub use error::{ConfigError, ConfigResult};
use tokio::sync::OnceCell;

/// Overrides `api.base_url`, can be put into `.env`.
pub const API_URL_ENV: &str = "UNIPORTAL_API_URL";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

pub const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    api: Api,
    #[serde(skip)]
    dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Api {
    base_url: String,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Reads `config.toml`, falling back to defaults when there is none.
    #[tracing::instrument]
    pub fn load(use_local: bool) -> ConfigResult<Self> {
        let filename = find_config_file(use_local);
        let mut config = match read_config(&filename) {
            Ok(bytes) => toml::from_slice::<Self>(&bytes)?,
            Err(ConfigError::ConfigNotFound) => {
                tracing::debug!("config not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };

        config.dir = match filename.parent() {
            Some(parent) if filename.exists() => parent.to_path_buf(),
            _ => app_dir(use_local),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            tracing::debug!("{} overrides api.base_url", API_URL_ENV);
            config.api.base_url = url;
        }

        config.api.parsed_base_url()?;
        Ok(config)
    }

    /// Process-wide configuration; exits when it cannot be loaded.
    #[tracing::instrument]
    pub async fn get_or_init(use_local: bool) -> &'static Config {
        CONFIG
            .get_or_init(|| async {
                match Self::load(use_local) {
                    Ok(c) => c,
                    Err(e) => {
                        crate::error::log_error(&e);
                        tracing::error!("Config is invalid.");
                        std::process::exit(1);
                    }
                }
            })
            .await
    }

    /// Writes the default configuration into `dir`, returning the written path.
    pub fn write_default(dir: &Path) -> ConfigResult<PathBuf> {
        let config = Self::default();
        let body = toml::to_string_pretty(&config)?;

        std::fs::create_dir_all(dir)?;
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, body)?;
        Ok(path)
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.api.base_url = base_url.into();
        self
    }

    pub fn with_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.dir = dir.into();
        self
    }

    #[inline]
    pub fn api(&self) -> &Api {
        &self.api
    }

    /// Where the session file lives.
    #[inline]
    pub fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: Api::default(),
            dir: PathBuf::from("."),
        }
    }
}

impl Api {
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn parsed_base_url(&self) -> ConfigResult<Url> {
        Url::parse(&self.base_url).map_err(|error| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            error,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn config_test() {
        let config = Config::load(true).unwrap();
        if std::env::var(API_URL_ENV).is_err() {
            assert_eq!(config.api().base_url(), "http://127.0.0.1:8000/api"); // defaults
        }
        assert!(config.session_path().ends_with("session.json"));
    }

    #[test]
    fn config_parses_api_section() {
        let config: Config =
            toml::from_str("[api]\nbase_url = \"http://example.org/api\"").unwrap();
        assert_eq!(config.api().base_url(), "http://example.org/api");

        let empty: Config = toml::from_str("").unwrap();
        assert_eq!(empty.api().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let config = Config::default().with_base_url("not a url");
        assert!(matches!(
            config.api().parsed_base_url(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn write_default_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::write_default(&dir.path().join("uniportal")).unwrap();

        let bytes = read_config(&path).unwrap();
        let config: Config = toml::from_slice(&bytes).unwrap();
        assert_eq!(config.api().base_url(), DEFAULT_BASE_URL);
    }
}

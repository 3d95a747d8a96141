use crate::preferences::Theme;
use cheapshark_api::{ClientOptions, BASE_URL};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_use_system_proxy")]
    pub use_system_proxy: bool,
    #[serde(default)]
    pub default_theme: Theme,
    /// Root for preferences and logs. Defaults to `<config_dir>/dealdash`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_use_system_proxy() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            use_system_proxy: default_use_system_proxy(),
            default_theme: Theme::default(),
            data_dir: None,
        }
    }
}

impl Settings {
    /// Load from `DEALDASH_CONFIG` (default `config.toml`), then `DEALDASH__*`
    /// environment variables.
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("DEALDASH_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::from_file(&config_path)
    }

    pub fn from_file(config_path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("DEALDASH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.api_base_url.starts_with("http") {
            return Err("api_base_url must be a valid HTTP(S) URL".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            use_system_proxy: self.use_system_proxy,
        }
    }

    /// `None` only when no data dir is configured and the platform has no
    /// config directory.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::config_dir().map(|dir| dir.join("dealdash")))
    }

    pub fn preferences_dir(&self) -> Option<PathBuf> {
        self.base_dir().map(|dir| dir.join("preferences"))
    }

    pub fn logs_dir(&self) -> Option<PathBuf> {
        self.base_dir().map(|dir| dir.join("logs"))
    }
}

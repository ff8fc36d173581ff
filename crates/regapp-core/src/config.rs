//! Client configuration
//!
//! Settings come from environment variables, with front ends free to override
//! individual fields (the CLI maps its flags onto them).

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

pub const ENV_API_BASE_URL: &str = "REGAPP_API_BASE_URL";
pub const ENV_DATA_DIR: &str = "REGAPP_DATA_DIR";
pub const ENV_TIMEOUT_SECS: &str = "REGAPP_TIMEOUT_SECS";

/// Backend address used when nothing is configured
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

const STORAGE_FILE: &str = "storage.json";

/// Where a configuration value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Default,
    Env,
    Flag,
}

impl ConfigSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigSource::Default => "default",
            ConfigSource::Env => "env",
            ConfigSource::Flag => "flag",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_base_url_source: ConfigSource,
    pub data_dir: PathBuf,
    pub data_dir_source: ConfigSource,
    /// `None` keeps the HTTP client's own defaults
    pub timeout: Option<Duration>,
}

impl Config {
    /// Build configuration from `REGAPP_*` environment variables
    pub fn from_env() -> Result<Self> {
        let (api_base_url, api_base_url_source) = match non_empty_env(ENV_API_BASE_URL) {
            Some(url) => (normalize_base_url(&url)?, ConfigSource::Env),
            None => (DEFAULT_API_BASE_URL.to_string(), ConfigSource::Default),
        };

        let (data_dir, data_dir_source) = match non_empty_env(ENV_DATA_DIR) {
            Some(dir) => (expand_path(&dir), ConfigSource::Env),
            None => (default_data_dir()?, ConfigSource::Default),
        };

        let timeout = match non_empty_env(ENV_TIMEOUT_SECS) {
            Some(secs) => Some(parse_timeout(&secs)?),
            None => None,
        };

        Ok(Self {
            api_base_url,
            api_base_url_source,
            data_dir,
            data_dir_source,
            timeout,
        })
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.api_base_url = normalize_base_url(url)?;
        self.api_base_url_source = ConfigSource::Flag;
        Ok(self)
    }

    /// Override the data directory
    pub fn with_data_dir(mut self, dir: &str) -> Self {
        self.data_dir = expand_path(dir);
        self.data_dir_source = ConfigSource::Flag;
        self
    }

    /// Full URL of an API path such as `/user_login`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }

    /// File backing the durable key-value store
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim trailing slashes and require an http(s) scheme
pub fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(Error::config(format!(
            "API base URL must start with http:// or https://, got '{}'",
            url
        )));
    }
    Ok(url.to_string())
}

fn parse_timeout(secs: &str) -> Result<Duration> {
    match secs.parse::<u64>() {
        Ok(n) if n > 0 => Ok(Duration::from_secs(n)),
        _ => Err(Error::config(format!(
            "{} must be a positive number of seconds, got '{}'",
            ENV_TIMEOUT_SECS, secs
        ))),
    }
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = dirs::data_dir() {
        return Ok(dir.join("regapp"));
    }
    dirs::home_dir()
        .map(|home| home.join(".regapp"))
        .ok_or_else(|| Error::config("Cannot determine a data directory; set REGAPP_DATA_DIR"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_base_url_source: ConfigSource::Default,
            data_dir: PathBuf::from("/tmp/regapp"),
            data_dir_source: ConfigSource::Default,
            timeout: None,
        }
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://api.example.com/").unwrap(),
            "https://api.example.com"
        );
        assert_eq!(
            normalize_base_url("  http://localhost:5000//  ").unwrap(),
            "http://localhost:5000"
        );
        assert!(matches!(
            normalize_base_url("localhost:5000"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let cfg = config();
        assert_eq!(cfg.endpoint("/user_login"), "http://127.0.0.1:5000/user_login");
        assert_eq!(cfg.endpoint("user_profile"), "http://127.0.0.1:5000/user_profile");
    }

    #[test]
    fn test_overrides_record_source() {
        let cfg = config()
            .with_base_url("https://api.example.com/v1/")
            .unwrap()
            .with_data_dir("/var/lib/regapp");
        assert_eq!(cfg.api_base_url, "https://api.example.com/v1");
        assert_eq!(cfg.api_base_url_source, ConfigSource::Flag);
        assert_eq!(cfg.storage_path(), PathBuf::from("/var/lib/regapp/storage.json"));
        assert_eq!(cfg.data_dir_source.as_str(), "flag");
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("30").unwrap(), Duration::from_secs(30));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_expand_path_tilde() {
        assert_eq!(expand_path("/srv/regapp"), PathBuf::from("/srv/regapp"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/regapp"), home.join("regapp"));
        }
    }
}

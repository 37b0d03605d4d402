//! Client configuration loaded with figment
//!
//! Sources are merged in precedence order (later sources override earlier ones):
//! 1. Default values
//! 2. `~/.taskboard/config.{toml,yaml,yml,json}`
//! 3. `./.taskboard/config.{toml,yaml,yml,json}`
//! 4. `TASKBOARD_*` environment variables

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use taskboard_common::{ErrorSeverity, Severity};
use thiserror::Error;
use tracing::{debug, trace};
use url::Url;

/// Directory holding config files, both in the home and working directories
pub const CONFIG_DIR: &str = ".taskboard";

/// Prefix of environment variables read as configuration
pub const ENV_PREFIX: &str = "TASKBOARD_";

const CONFIG_STEM: &str = "config";
const CONFIG_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration parsing failed
    #[error("failed to parse configuration: {source}")]
    Parse { source: figment::Error },

    /// A value parsed but is not usable
    #[error("invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(source: figment::Error) -> Self {
        Self::Parse { source }
    }
}

impl Severity for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }
}

/// Settings for talking to the persistence service
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL of the service; API paths are appended to it
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Bearer token sent with board requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
            user_agent: format!("taskboard/{}", env!("CARGO_PKG_VERSION")),
            token: None,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ClientConfig {
    /// Load from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load()
    }

    /// Check that the values can be used to build a client
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.url()?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }

    /// Parsed base URL
    pub fn url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ConfigError::invalid("base_url", e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::invalid(
                "base_url",
                format!("unsupported scheme '{other}'"),
            )),
        }
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Finds config files and merges them with defaults and the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    global_dir: Option<PathBuf>,
    project_dir: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader reading `~/.taskboard` and `./.taskboard`
    pub fn new() -> Self {
        Self {
            global_dir: dirs::home_dir().map(|home| home.join(CONFIG_DIR)),
            project_dir: std::env::current_dir().ok().map(|cwd| cwd.join(CONFIG_DIR)),
        }
    }

    /// Loader reading explicit directories; either may be absent
    pub fn with_dirs(global_dir: Option<PathBuf>, project_dir: Option<PathBuf>) -> Self {
        Self {
            global_dir,
            project_dir,
        }
    }

    /// Existing config files, lowest precedence first
    pub fn discover(&self) -> Vec<PathBuf> {
        [&self.global_dir, &self.project_dir]
            .into_iter()
            .flatten()
            .flat_map(|dir| {
                CONFIG_EXTENSIONS
                    .iter()
                    .map(move |ext| dir.join(format!("{CONFIG_STEM}.{ext}")))
            })
            .filter(|path| path.is_file())
            .collect()
    }

    /// Build the merged figment
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(ClientConfig::default()));
        for path in self.discover() {
            trace!(path = %path.display(), "loading config file");
            figment = figment.merge(file_provider(&path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }

    /// Extract and validate the configuration
    pub fn load(&self) -> Result<ClientConfig, ConfigError> {
        let config: ClientConfig = self.figment().extract()?;
        config.validate()?;
        debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "configuration loaded");
        Ok(config)
    }
}

fn file_provider(path: &Path) -> Figment {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Figment::from(Toml::file(path)),
        Some("json") => Figment::from(Json::file(path)),
        _ => Figment::from(Yaml::file(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        config.validate().unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("taskboard/"));
    }

    #[test]
    fn test_validation() {
        let config = ClientConfig {
            base_url: "not a url".into(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "base_url"
        ));

        let config = ClientConfig {
            base_url: "ftp://example.com".into(),
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "timeout_secs"
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig {
            token: Some("s3cr3t".into()),
            ..ClientConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("<redacted>"));
    }
}

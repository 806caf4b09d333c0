//! Configuration System
//!
//! Layered configuration for the facade: built-in defaults, then an optional
//! TOML file, then `QUILL_`-prefixed environment variables. Values are read
//! once at load time and handed to the facade explicitly.

use crate::error::ContentError;
use crate::logging::LoggingConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Legacy variable holding the site URL, honoured when nothing else sets it.
pub const LEGACY_SITE_URL_ENV: &str = "WORDPRESS_URL";

/// Browser-exposed spelling of the legacy variable, checked after
/// [`LEGACY_SITE_URL_ENV`].
pub const PUBLIC_SITE_URL_ENV: &str = "NEXT_PUBLIC_WORDPRESS_URL";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuillConfig {
    /// Base URL of the WordPress site (comments endpoint lives under it)
    #[serde(default)]
    pub site_url: String,

    /// GraphQL endpoint; defaults to `{site_url}/graphql`
    #[serde(default)]
    pub graphql_endpoint: Option<String>,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Timeouts applied by the bundled reqwest transports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            site_url: String::new(),
            graphql_endpoint: None,
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl QuillConfig {
    pub fn with_site_url(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            ..Self::default()
        }
    }

    /// Site URL without a trailing slash.
    pub fn site_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }

    /// Explicit endpoint, or `{site_url}/graphql`.
    pub fn graphql_endpoint(&self) -> String {
        match self.graphql_endpoint.as_deref() {
            Some(endpoint) if !endpoint.is_empty() => endpoint.to_string(),
            _ => format!("{}/graphql", self.site_url()),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.site_url.trim().is_empty() {
            return Err(ContentError::Config(format!(
                "site_url is not set (set QUILL_SITE_URL, {}, {} or site_url in config.toml)",
                LEGACY_SITE_URL_ENV, PUBLIC_SITE_URL_ENV
            )));
        }
        validate_http_url("site_url", self.site_url())?;
        validate_http_url("graphql_endpoint", &self.graphql_endpoint())?;

        if self.http.timeout_secs == 0 {
            return Err(ContentError::Config(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ContentError> {
    let url = Url::parse(value)
        .map_err(|e| ContentError::Config(format!("{} '{}' is not a valid URL: {}", field, value, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ContentError::Config(format!(
            "{} must use http or https, got '{}'",
            field, other
        ))),
    }
}

/// Path to the user config file: $XDG_CONFIG_HOME/quill/config.toml
/// (or the platform equivalent).
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "quill")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Loads [`QuillConfig`] from defaults, file and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration. An explicit `path` must exist; otherwise the
    /// user config file is used when present.
    pub fn load(path: Option<&Path>) -> Result<QuillConfig, ContentError> {
        let mut builder = Self::builder_with_defaults()?;

        match path {
            Some(path) => {
                debug!(config_path = %path.display(), "Loading explicit config file");
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                if let Some(global) = global_config_path().filter(|p| p.exists()) {
                    debug!(config_path = %global.display(), "Loading user config file");
                    builder = builder.add_source(File::from(global).required(false));
                }
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix("QUILL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load from a single file, without environment overrides.
    pub fn load_from_file(path: &Path) -> Result<QuillConfig, ContentError> {
        let config = Self::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ContentError> {
        let legacy_site_url = [LEGACY_SITE_URL_ENV, PUBLIC_SITE_URL_ENV]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .find(|value| !value.trim().is_empty())
            .unwrap_or_default();
        Ok(Config::builder()
            .set_default("site_url", legacy_site_url)?
            .set_default("http.timeout_secs", default_timeout_secs())?
            .set_default("http.connect_timeout_secs", default_connect_timeout_secs())?)
    }
}

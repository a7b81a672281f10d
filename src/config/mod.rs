//! Configuration management
//!
//! Loads portal configuration from `config.yml`, with environment
//! variable overrides and sensible defaults for every field. The
//! portal holds no data of its own, so configuration is mostly the
//! addresses and tokens of its collaborators.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Church backend API configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// National events / locations provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// IP geolocation service configuration
    #[serde(default)]
    pub geoip: GeoIpConfig,
    /// Admin session configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin for the admin dashboard
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
    /// Directory holding the tera templates
    #[serde(default = "default_templates_glob")]
    pub templates: String,
    /// Directory served under /static
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            templates: default_templates_glob(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_templates_glob() -> String {
    "templates/**/*.html".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

/// Church backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// API base URL, no trailing slash
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_backend_timeout")]
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_seconds: default_backend_timeout(),
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_backend_timeout() -> u64 {
    15
}

/// National events / locations provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider base URL, no trailing slash
    #[serde(default = "default_provider_url")]
    pub base_url: String,
    /// Static provider token (never the visitor's credential)
    #[serde(default)]
    pub token: String,
    /// How long provider responses are cached, in seconds
    #[serde(default = "default_provider_ttl")]
    pub cache_ttl_seconds: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            token: String::new(),
            cache_ttl_seconds: default_provider_ttl(),
        }
    }
}

fn default_provider_url() -> String {
    "https://financas.ada.org.mz/api/v1".to_string()
}

fn default_provider_ttl() -> u64 {
    3600
}

/// IP geolocation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoIpConfig {
    /// Lookup base URL; the visitor IP is appended as a path segment
    #[serde(default = "default_geoip_url")]
    pub base_url: String,
    /// Country used when lookup fails or returns nothing
    #[serde(default = "default_country")]
    pub default_country: String,
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            base_url: default_geoip_url(),
            default_country: default_country(),
        }
    }
}

fn default_geoip_url() -> String {
    "https://ipapi.co".to_string()
}

fn default_country() -> String {
    "MZ".to_string()
}

/// Admin session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Inactivity timeout in seconds; a request after this clears the
    /// credential and reports a timeout to the login view
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Age after which the cached admin update snapshot is refreshed
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_seconds: default_idle_timeout(),
            poll_interval_seconds: default_poll_interval(),
        }
    }
}

fn default_idle_timeout() -> u64 {
    180
}

fn default_poll_interval() -> u64 {
    120
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file.
    ///
    /// A missing or empty file yields the defaults; invalid YAML is an
    /// error with the location included.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: format_yaml_error(&e),
        })?;

        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Variables follow the `ADA_SECTION_FIELD` pattern:
    /// - ADA_SERVER_HOST / ADA_SERVER_PORT
    /// - ADA_BACKEND_BASE_URL
    /// - ADA_PROVIDER_BASE_URL / ADA_PROVIDER_TOKEN
    /// - ADA_GEOIP_BASE_URL
    /// - ADA_SESSION_IDLE_TIMEOUT_SECONDS
    /// - ADA_SESSION_POLL_INTERVAL_SECONDS
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("ADA_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("ADA_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(origin) = std::env::var("ADA_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = origin;
        }
        if let Ok(url) = std::env::var("ADA_BACKEND_BASE_URL") {
            self.backend.base_url = url;
        }
        if let Ok(url) = std::env::var("ADA_PROVIDER_BASE_URL") {
            self.provider.base_url = url;
        }
        if let Ok(token) = std::env::var("ADA_PROVIDER_TOKEN") {
            self.provider.token = token;
        }
        if let Ok(url) = std::env::var("ADA_GEOIP_BASE_URL") {
            self.geoip.base_url = url;
        }
        if let Ok(secs) = std::env::var("ADA_SESSION_IDLE_TIMEOUT_SECONDS") {
            if let Ok(secs) = secs.parse::<u64>() {
                self.session.idle_timeout_seconds = secs;
            }
        }
        if let Ok(secs) = std::env::var("ADA_SESSION_POLL_INTERVAL_SECONDS") {
            if let Ok(secs) = secs.parse::<u64>() {
                self.session.poll_interval_seconds = secs;
            }
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner())
    }

    const ENV_VARS: &[&str] = &[
        "ADA_SERVER_HOST",
        "ADA_SERVER_PORT",
        "ADA_SERVER_CORS_ORIGIN",
        "ADA_BACKEND_BASE_URL",
        "ADA_PROVIDER_BASE_URL",
        "ADA_PROVIDER_TOKEN",
        "ADA_GEOIP_BASE_URL",
        "ADA_SESSION_IDLE_TIMEOUT_SECONDS",
        "ADA_SESSION_POLL_INTERVAL_SECONDS",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let config = Config::load(std::path::Path::new("nonexistent_config.yml")).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.backend.base_url, "http://localhost:8000/api");
        assert_eq!(config.session.idle_timeout_seconds, 180);
        assert_eq!(config.session.poll_interval_seconds, 120);
        assert_eq!(config.provider.cache_ttl_seconds, 3600);
        assert_eq!(config.geoip.default_country, "MZ");
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "session:\n  idle_timeout_seconds: 60\n").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.session.idle_timeout_seconds, 60);
        assert_eq!(config.session.poll_interval_seconds, 120);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
server:
  host: "127.0.0.1"
  port: 9000
backend:
  base_url: "https://api.ada.org.mz/api"
  timeout_seconds: 30
provider:
  base_url: "https://financas.ada.org.mz/api/v1"
  token: "secret"
  cache_ttl_seconds: 600
geoip:
  base_url: "https://geo.example.com"
  default_country: "ZA"
session:
  idle_timeout_seconds: 300
  poll_interval_seconds: 90
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.backend.base_url, "https://api.ada.org.mz/api");
        assert_eq!(config.backend.timeout_seconds, 30);
        assert_eq!(config.provider.token, "secret");
        assert_eq!(config.provider.cache_ttl_seconds, 600);
        assert_eq!(config.geoip.default_country, "ZA");
        assert_eq!(config.session.idle_timeout_seconds, 300);
        assert_eq!(config.session.poll_interval_seconds, 90);
    }

    #[test]
    fn test_load_invalid_yaml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: not_a_number\n").unwrap();

        let result = Config::load(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_env_override() {
        let _guard = lock_env();
        clear_env();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 8080\n").unwrap();

        std::env::set_var("ADA_SERVER_PORT", "4000");
        std::env::set_var("ADA_PROVIDER_TOKEN", "env-token");

        let config = Config::load_with_env(file.path()).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.provider.token, "env-token");

        clear_env();
    }

    #[test]
    fn test_env_override_invalid_port_ignored() {
        let _guard = lock_env();
        clear_env();

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 8080\n").unwrap();

        std::env::set_var("ADA_SERVER_PORT", "not_a_number");

        let config = Config::load_with_env(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);

        clear_env();
    }
}

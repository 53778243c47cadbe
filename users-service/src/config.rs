//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: USERS_, nested keys separated by `__`)
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/users-service/config.toml
//! 4. System directory: /etc/users-service/config.toml
//! 5. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "USERS_";

const APP_DIR: &str = "users-service";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Route layout
    #[serde(default)]
    pub api: ApiConfig,

    /// Middleware configuration
    #[serde(default)]
    pub middleware: MiddlewareConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level or full `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment (dev, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl ServiceConfig {
    /// Request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// API route layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefix every route is mounted under
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
        }
    }
}

impl ApiConfig {
    /// Base path with a leading slash and no trailing slash.
    ///
    /// Returns an empty string when routes are mounted at the root.
    pub fn normalized_base_path(&self) -> String {
        let trimmed = self.base_path.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Reject base paths the router would read as captures or wildcards
    pub fn validate(&self) -> Result<()> {
        if self.base_path.contains(['{', '}', '*']) {
            let message = format!(
                "api.base_path must be a literal path, got {:?}",
                self.base_path
            );
            return Err(Error::Config(Box::new(figment::Error::from(message))));
        }
        Ok(())
    }
}

/// Middleware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Request body size limit in MB
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,

    /// Enable panic recovery middleware
    #[serde(default = "default_true")]
    pub catch_panic: bool,

    /// Enable compression
    #[serde(default = "default_true")]
    pub compression: bool,

    /// CORS mode (permissive, restrictive, disabled)
    #[serde(default = "default_cors_mode")]
    pub cors_mode: String,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            body_limit_mb: default_body_limit_mb(),
            catch_panic: true,
            compression: true,
            cors_mode: default_cors_mode(),
        }
    }
}

impl MiddlewareConfig {
    /// Body limit in bytes
    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_mb * 1024 * 1024
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_base_path() -> String {
    "/api".to_string()
}

fn default_true() -> bool {
    true
}

fn default_body_limit_mb() -> usize {
    1
}

fn default_cors_mode() -> String {
    "permissive".to_string()
}

impl Config {
    /// Load configuration from all sources
    ///
    /// Searches for config files in this order (first found wins per key):
    /// 1. Current working directory: ./config.toml
    /// 2. XDG config directory: ~/.config/users-service/config.toml
    /// 3. System directory: /etc/users-service/config.toml
    ///
    /// Environment variables (USERS_ prefix) override all file-based configs.
    pub fn load() -> Result<Self> {
        let config_paths = Self::find_config_paths();

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first so higher priority files override
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.api.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Bypasses the XDG and system directories. Environment variables still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.api.validate()?;
        Ok(config)
    }

    /// Find all possible config file paths, highest priority first
    fn find_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_DIR);
        if let Some(path) = xdg_dirs.find_config_file("config.toml") {
            paths.push(path);
        }

        paths.push(PathBuf::from("/etc").join(APP_DIR).join("config.toml"));

        paths
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: APP_DIR.to_string(),
                host: default_host(),
                port: default_port(),
                log_level: default_log_level(),
                timeout_secs: default_timeout(),
                environment: default_environment(),
            },
            api: ApiConfig::default(),
            middleware: MiddlewareConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.api.base_path, "/api");
        assert_eq!(config.middleware.cors_mode, "permissive");
        assert_eq!(config.middleware.body_limit_bytes(), 1024 * 1024);
    }

    #[test]
    fn test_normalized_base_path() {
        let mut api = ApiConfig::default();
        assert_eq!(api.normalized_base_path(), "/api");

        api.base_path = "v1/".to_string();
        assert_eq!(api.normalized_base_path(), "/v1");

        api.base_path = "/".to_string();
        assert_eq!(api.normalized_base_path(), "");
    }

    #[test]
    fn test_base_path_must_be_literal() {
        let mut api = ApiConfig::default();
        assert!(api.validate().is_ok());

        for bad in ["/{x}", "/api/*rest", "/v1}"] {
            api.base_path = bad.to_string();
            assert!(matches!(api.validate(), Err(Error::Config(_))), "{bad}");
        }
    }

    #[test]
    fn test_load_from_file_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "service.toml",
                r#"
                [service]
                name = "users-test"
                port = 9000

                [api]
                base_path = "/v1"
                "#,
            )?;
            jail.set_env("USERS_SERVICE__LOG_LEVEL", "debug");
            jail.set_env("USERS_MIDDLEWARE__CORS_MODE", "restrictive");

            let config = Config::load_from("service.toml").expect("config loads");
            assert_eq!(config.service.name, "users-test");
            assert_eq!(config.service.port, 9000);
            assert_eq!(config.service.log_level, "debug");
            assert_eq!(config.service.timeout_secs, 30);
            assert_eq!(config.api.base_path, "/v1");
            assert_eq!(config.middleware.cors_mode, "restrictive");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("USERS_SERVICE__PORT", "not-a-port");
            let result = Config::load_from("missing.toml");
            assert!(matches!(result, Err(crate::error::Error::Config(_))));
            Ok(())
        });
    }

    #[test]
    fn test_capture_in_base_path_is_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("USERS_API__BASE_PATH", "/{x}");
            let result = Config::load_from("missing.toml");
            assert!(matches!(result, Err(Error::Config(_))));
            Ok(())
        });
    }
}

//! Configuration management for the Unsplash MCP service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings
//! except the Unsplash access key, which has no default.

use crate::core::error::{Error, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub unsplash: UnsplashConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream Unsplash API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnsplashConfig {
    /// Client-ID access key (required, no default)
    #[serde(default)]
    pub access_key: String,

    /// API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_base() -> String {
    "https://api.unsplash.com".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            api_base: default_api_base(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// File locations follow the XDG Base Directory specification.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. UNSPLASH_MCP_CONFIG env var (explicit file path)
    /// 2. XDG config file (~/.config/unsplash-mcp/config.toml)
    /// 3. ./unsplash-mcp.toml in the working directory
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("UNSPLASH_MCP_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("unsplash-mcp.toml").exists() {
                Self::from_file("unsplash-mcp.toml")?
            } else {
                Self::default()
            }
        };

        // Override with environment variables
        config.merge_env();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Server configuration
        if let Ok(host) = env::var("UNSPLASH_MCP_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Upstream configuration
        if let Ok(key) = env::var("UNSPLASH_ACCESS_KEY") {
            self.unsplash.access_key = key;
        }
        if let Ok(base) = env::var("UNSPLASH_API_BASE") {
            self.unsplash.api_base = base;
        }
    }

    /// Validate configuration values
    ///
    /// The access key is required; a server without one cannot make
    /// a single successful upstream call, so startup fails instead.
    pub fn validate(&self) -> Result<()> {
        if self.unsplash.access_key.trim().is_empty() {
            return Err(Error::Config(
                "UNSPLASH_ACCESS_KEY environment variable is required".to_string(),
            ));
        }

        if self.unsplash.api_base.trim().is_empty() {
            return Err(Error::Config(
                "Unsplash API base URL must be non-empty".to_string(),
            ));
        }

        if self.server.host.trim().is_empty() {
            return Err(Error::Config("Bind host must be non-empty".to_string()));
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Host: {}", self.server.host);
        tracing::info!("  Port: {}", self.server.port);
        tracing::info!("  API base: {}", self.unsplash.api_base);
        tracing::info!("  Access key: {}", redact(&self.unsplash.access_key));
    }
}

/// Redact a secret, keeping only a short prefix for identification
fn redact(secret: &str) -> String {
    if secret.is_empty() {
        return "<unset>".to_string();
    }

    let prefix: String = secret.chars().take(4).collect();
    format!("{prefix}...")
}

//! XDG Base Directory Support
//!
//! Resolves the configuration directory per the XDG Base Directory
//! specification. Only config is needed here; the service keeps no
//! data, state, or cache on disk.

use std::env;
use std::path::PathBuf;

/// XDG directory structure for the service
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure with proper resolution order
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit UNSPLASH_MCP_CONFIG_DIR env var
    /// 2. XDG_CONFIG_HOME
    /// 3. XDG default (~/.config/unsplash-mcp)
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(dir) = env::var("UNSPLASH_MCP_CONFIG_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("unsplash-mcp");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("unsplash-mcp")
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        // UNSPLASH_MCP_CONFIG_FILE is an explicit override
        if let Ok(file) = env::var("UNSPLASH_MCP_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

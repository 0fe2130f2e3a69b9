//! Unified service container
//!
//! Provides shared access to all core services.

use crate::core::config::Config;
use crate::core::unsplash::UnsplashClient;
use std::sync::Arc;

/// Unified services container
///
/// All adapters use this same struct for service access.
#[derive(Clone)]
pub struct Services {
    /// Upstream Unsplash search client
    pub unsplash: Arc<UnsplashClient>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    pub fn new(config: Config) -> Self {
        let unsplash = Arc::new(UnsplashClient::new(
            config.unsplash.api_base.clone(),
            config.unsplash.access_key.clone(),
        ));

        Self {
            unsplash,
            config: Arc::new(config),
        }
    }
}

//! Centralized configuration for the storefront core.
//!
//! Constants live on unit structs grouped by concern. The runtime
//! [`StorefrontConfig`] carries the handful of values that differ between
//! deployments, with defaults taken from those constants.

use crate::error::{Result, StorefrontError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "Ghia Gym";
    pub const CONFIG_DIR_NAME: &'static str = "ghia-gym";
    pub const PREFERENCES_FILENAME: &'static str = "preferences.json";
}

/// Cache timing.
pub struct CacheConfig;

impl CacheConfig {
    /// Default freshness window for cached fetches (5 minutes).
    pub const DEFAULT_TTL: Duration = Duration::from_millis(300_000);
}

/// Network-related configuration.
pub struct NetworkConfig;

impl NetworkConfig {
    pub const DEFAULT_API_BASE_URL: &'static str = "http://localhost:5000/api";
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
    pub const USER_AGENT: &'static str = "Ghia-Storefront/1.0";
}

/// Product catalog bounds and choices.
pub struct CatalogConfig;

impl CatalogConfig {
    pub const PRICE_MIN: f64 = 0.0;
    pub const PRICE_MAX: f64 = 1000.0;
    pub const CATEGORIES: [&'static str; 5] =
        ["Necklaces", "Rings", "Bracelets", "Earrings", "Accessories"];
}

/// Well-known cache keys shared between consumers.
pub struct CacheKeys;

impl CacheKeys {
    pub const ALL_ITEMS: &'static str = "all-items";
    pub const FEATURED: &'static str = "featured-classes";
    pub const PRODUCTS_COUNT: &'static str = "products-count";
    pub const USERS_COUNT: &'static str = "users-count";
    pub const ORDERS_COUNT: &'static str = "orders-count";
}

/// Keys used in the persisted preference store.
pub struct PreferenceKeys;

impl PreferenceKeys {
    pub const ANIMATIONS_ENABLED: &'static str = "footerAnimationsEnabled";
}

/// Booking page configuration.
pub struct BookingConfig;

impl BookingConfig {
    pub const DEFAULT_WHATSAPP_PHONE: &'static str = "15551234567";
    pub const WHATSAPP_BASE_URL: &'static str = "https://wa.me";
}

/// Environment variables read by [`StorefrontConfig::from_env`].
pub struct EnvVars;

impl EnvVars {
    pub const API_BASE_URL: &'static str = "GHIA_API_BASE_URL";
    pub const API_TOKEN: &'static str = "GHIA_API_TOKEN";
    pub const CACHE_TTL_MS: &'static str = "GHIA_CACHE_TTL_MS";
}

/// Runtime configuration for a [`Storefront`](crate::Storefront).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StorefrontConfig {
    /// Base URL of the JSON API. Default: [`NetworkConfig::DEFAULT_API_BASE_URL`].
    pub api_base_url: String,
    /// Bearer token sent on authenticated endpoints. Default: none.
    pub auth_token: Option<String>,
    /// Per-request timeout. Default: [`NetworkConfig::REQUEST_TIMEOUT`].
    pub request_timeout: Duration,
    /// Freshness window given to cached fetches. Default: [`CacheConfig::DEFAULT_TTL`].
    pub cache_ttl: Duration,
    /// Preference store location. Default: `<config_dir>/ghia-gym/preferences.json`.
    pub preferences_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: NetworkConfig::DEFAULT_API_BASE_URL.to_string(),
            auth_token: None,
            request_timeout: NetworkConfig::REQUEST_TIMEOUT,
            cache_ttl: CacheConfig::DEFAULT_TTL,
            preferences_path: None,
        }
    }
}

impl StorefrontConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(EnvVars::API_BASE_URL) {
            config.api_base_url = url;
        }
        if let Ok(token) = std::env::var(EnvVars::API_TOKEN) {
            if !token.is_empty() {
                config.auth_token = Some(token);
            }
        }
        if let Ok(ttl) = std::env::var(EnvVars::CACHE_TTL_MS) {
            let millis = ttl.parse::<u64>().map_err(|_| StorefrontError::Config {
                message: format!(
                    "{} must be a number of milliseconds, got {:?}",
                    EnvVars::CACHE_TTL_MS,
                    ttl
                ),
            })?;
            config.cache_ttl = Duration::from_millis(millis);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_preferences_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preferences_path = Some(path.into());
        self
    }

    /// Check that the base URL parses as an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_base_url).map_err(|e| StorefrontError::Config {
            message: format!("Invalid API base URL {:?}: {}", self.api_base_url, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(StorefrontError::Config {
                message: format!("API base URL must be http or https, got {}", url.scheme()),
            });
        }
        Ok(())
    }

    /// The preference file to use, resolving the platform default when unset.
    pub fn resolved_preferences_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.preferences_path {
            return Ok(path.clone());
        }
        dirs::config_dir()
            .map(|dir| {
                dir.join(AppConfig::CONFIG_DIR_NAME)
                    .join(AppConfig::PREFERENCES_FILENAME)
            })
            .ok_or_else(|| StorefrontError::Config {
                message: "Could not determine the user config directory".to_string(),
            })
    }
}

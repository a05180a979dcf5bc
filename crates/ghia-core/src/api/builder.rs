//! Builder for configuring Storefront initialization.

use std::sync::Arc;

use crate::cache::{Clock, DataCache};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::network::{HttpClient, StorefrontClient};
use crate::preferences::Preferences;
use crate::Storefront;

/// Builder for configuring Storefront initialization.
///
/// # Example
///
/// ```rust,ignore
/// use ghia_core::{Storefront, StorefrontConfig};
///
/// let storefront = Storefront::builder()
///     .with_config(StorefrontConfig::from_env()?)
///     .build()?;
/// ```
#[derive(Default)]
pub struct StorefrontBuilder {
    config: StorefrontConfig,
    cache: Option<Arc<DataCache>>,
    clock: Option<Arc<dyn Clock>>,
}

impl StorefrontBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: StorefrontConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing cache instead of creating a fresh one.
    ///
    /// Takes precedence over [`with_clock`](Self::with_clock).
    pub fn with_cache(mut self, cache: Arc<DataCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Time source for the cache created by [`build`](Self::build).
    ///
    /// Default: the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the Storefront instance.
    pub fn build(self) -> Result<Storefront> {
        self.config.validate()?;

        let http = HttpClient::with_options(
            self.config.api_base_url.clone(),
            self.config.auth_token.clone(),
            self.config.request_timeout,
        )?;
        let client = StorefrontClient::new(Arc::new(http));

        let cache = match (self.cache, self.clock) {
            (Some(cache), _) => cache,
            (None, Some(clock)) => Arc::new(DataCache::with_clock(clock)),
            (None, None) => Arc::new(DataCache::new()),
        };

        let preferences_path = self.config.resolved_preferences_path()?;
        let preferences = Arc::new(Preferences::open(preferences_path));

        tracing::debug!(
            "Storefront ready: api={} ttl={:?}",
            self.config.api_base_url,
            self.config.cache_ttl
        );

        Ok(Storefront {
            config: self.config,
            cache,
            client,
            preferences,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use tempfile::TempDir;

    fn prefs_config(dir: &TempDir) -> StorefrontConfig {
        StorefrontConfig::default().with_preferences_path(dir.path().join("p.json"))
    }

    #[test]
    fn test_build_with_defaults_and_custom_prefs() {
        let dir = TempDir::new().unwrap();
        let storefront = StorefrontBuilder::new()
            .with_config(prefs_config(&dir))
            .build()
            .unwrap();

        assert_eq!(storefront.client().http().base_url(), "http://localhost:5000/api");
        assert!(storefront.preferences().animations_enabled());
        assert!(storefront.cache().is_empty());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = StorefrontBuilder::new()
            .with_config(
                StorefrontConfig::default()
                    .with_api_base_url("ftp://example.com")
                    .with_preferences_path(dir.path().join("p.json")),
            )
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_shared_cache_is_used() {
        let dir = TempDir::new().unwrap();
        let cache = Arc::new(DataCache::with_clock(Arc::new(ManualClock::new(1_000))));
        cache.set("seed", 1u64);

        let storefront = StorefrontBuilder::new()
            .with_config(prefs_config(&dir))
            .with_cache(cache.clone())
            .build()
            .unwrap();
        assert!(Arc::ptr_eq(storefront.cache(), &cache));
        assert_eq!(storefront.cache().now_millis(), 1_000);
    }
}

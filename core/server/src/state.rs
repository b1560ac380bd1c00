//! Shared handler state.

use axum::http::HeaderValue;
use std::sync::Arc;
use tracing::info;

use driveindex_common::{Error, Result, SiteConfig};
use driveindex_scope::ItemResolver;
use driveindex_storage::{ItemSource, TokenProvider};

/// State handed to every handler. Cheap to clone; everything is read-only.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<ItemResolver>,
    pub cache_control: HeaderValue,
}

impl AppState {
    /// Build state from configuration and the two upstream collaborators.
    ///
    /// # Errors
    /// - `Config` if the configured cache-control value is not a valid header
    pub fn new(
        config: Arc<SiteConfig>,
        source: Arc<dyn ItemSource>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self> {
        let cache_control = HeaderValue::from_str(&config.cache_control)
            .map_err(|e| Error::Config(format!("Invalid cache_control: {}", e)))?;
        info!(
            source = source.name(),
            base = %config.base_directory,
            "Resolving items"
        );
        let resolver = Arc::new(ItemResolver::new(config, source, tokens));

        Ok(Self {
            resolver,
            cache_control,
        })
    }
}

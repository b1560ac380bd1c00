//! Item resolution within the exposed subtree.

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use driveindex_common::{ItemId, Result, SiteConfig};
use driveindex_storage::{DriveItem, ItemSource, TokenProvider};

/// Outcome of a successful lookup.
///
/// `OutOfScope` serializes to `null`, the same payload a caller would get
/// for an item that does not exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolution {
    /// Item inside the base directory, parent path rewritten.
    Item(DriveItem),
    /// Item outside the base directory.
    OutOfScope,
}

impl Resolution {
    /// The exposed item, if any.
    pub fn item(&self) -> Option<&DriveItem> {
        match self {
            Self::Item(item) => Some(item),
            Self::OutOfScope => None,
        }
    }
}

/// Apply the base-directory boundary to an upstream item.
///
/// The parent path must start with `drive_root + base_directory`. The
/// `base_directory` part is removed once, right after `drive_root`; later
/// occurrences are left alone. Items without a parent path (the drive root)
/// are out of scope.
pub fn scope_item(config: &SiteConfig, mut item: DriveItem) -> Resolution {
    let prefix = config.scope_prefix();

    let rewritten = match item.parent_path().and_then(|path| path.strip_prefix(&prefix)) {
        Some(rest) => format!("{}{}", config.drive_root, rest),
        None => return Resolution::OutOfScope,
    };

    if let Some(parent) = item.parent_reference.as_mut() {
        parent.path = Some(rewritten);
    }
    Resolution::Item(item)
}

/// Resolves untrusted item IDs against the upstream drive.
pub struct ItemResolver {
    config: Arc<SiteConfig>,
    source: Arc<dyn ItemSource>,
    tokens: Arc<dyn TokenProvider>,
}

impl ItemResolver {
    /// Create a resolver.
    pub fn new(
        config: Arc<SiteConfig>,
        source: Arc<dyn ItemSource>,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            config,
            source,
            tokens,
        }
    }

    /// Get the configuration this resolver enforces.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Resolve an ID to scoped item metadata.
    ///
    /// # Preconditions
    /// - None: `raw_id` is untrusted caller input
    ///
    /// # Postconditions
    /// - Invalid IDs never reach the token provider or the upstream
    /// - Exactly one upstream lookup is made for a valid ID
    ///
    /// # Errors
    /// - `InvalidIdentifier` if `raw_id` is not `[A-Za-z0-9]+`
    /// - `Authentication` if no token could be obtained
    /// - `Upstream` / `Network` if the lookup failed
    pub async fn resolve(&self, raw_id: &str) -> Result<Resolution> {
        let id = ItemId::parse(raw_id)?;
        let token = self.tokens.access_token().await?;
        let item = self.source.get_item(&id, &token).await?;

        let resolution = scope_item(&self.config, item);
        if resolution == Resolution::OutOfScope {
            debug!(item = %id, "Item outside base directory");
        }

        Ok(resolution)
    }
}

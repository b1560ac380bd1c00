//! In-memory item source for testing.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use driveindex_common::{AccessToken, Error, ItemId, Result};

use crate::provider::{DriveItem, ItemSource, ParentReference};

/// In-memory item source.
///
/// Unknown IDs answer like Graph does, with a 404 `itemNotFound` body.
/// Every lookup is counted, so tests can assert that nothing reached the
/// upstream.
pub struct MemoryDrive {
    items: RwLock<HashMap<String, DriveItem>>,
    failures: RwLock<HashMap<String, (u16, Value)>>,
    calls: AtomicUsize,
}

impl MemoryDrive {
    /// Create a new empty drive.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Store an item, replacing any item with the same ID.
    pub fn insert(&self, item: DriveItem) {
        if let Ok(mut items) = self.items.write() {
            items.insert(item.id.clone(), item);
        }
    }

    /// Convenience: store a file whose parent lives at `parent_path`.
    pub fn insert_file(&self, id: &str, name: &str, parent_path: &str) {
        self.insert(DriveItem {
            id: id.to_string(),
            name: name.to_string(),
            parent_reference: Some(ParentReference {
                path: Some(parent_path.to_string()),
                ..ParentReference::default()
            }),
            file: Some(json!({})),
            folder: None,
        });
    }

    /// Convenience: store a folder whose parent lives at `parent_path`.
    pub fn insert_folder(&self, id: &str, name: &str, parent_path: &str) {
        self.insert(DriveItem {
            id: id.to_string(),
            name: name.to_string(),
            parent_reference: Some(ParentReference {
                path: Some(parent_path.to_string()),
                ..ParentReference::default()
            }),
            file: None,
            folder: Some(json!({ "childCount": 0 })),
        });
    }

    /// Make lookups of `id` fail with the given upstream status and body.
    pub fn fail_with(&self, id: &str, status: u16, body: Value) {
        if let Ok(mut failures) = self.failures.write() {
            failures.insert(id.to_string(), (status, body));
        }
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MemoryDrive {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemSource for MemoryDrive {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get_item(&self, id: &ItemId, _token: &AccessToken) -> Result<DriveItem> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let failures = self
            .failures
            .read()
            .map_err(|_| Error::Network("Memory drive lock poisoned".to_string()))?;
        if let Some((status, body)) = failures.get(id.as_str()) {
            return Err(Error::Upstream {
                status: *status,
                body: body.clone(),
            });
        }
        drop(failures);

        let items = self
            .items
            .read()
            .map_err(|_| Error::Network("Memory drive lock poisoned".to_string()))?;
        items.get(id.as_str()).cloned().ok_or_else(|| Error::Upstream {
            status: 404,
            body: json!({
                "error": {
                    "code": "itemNotFound",
                    "message": "The resource could not be found."
                }
            }),
        })
    }
}

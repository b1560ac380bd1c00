//! Upstream item source trait and drive item metadata.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use driveindex_common::{AccessToken, ItemId, Result};

/// Fields requested from the upstream item endpoint.
///
/// Nothing beyond these is ever fetched, so nothing beyond these can leak.
pub const ITEM_SELECT: &str = "id,name,parentReference,file,folder";

/// Location of an item's parent in the upstream drive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParentReference {
    /// Absolute upstream path of the parent folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Remaining members (`driveId`, `driveType`, `id`, ...), passed through.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Drive item metadata as returned by the upstream API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    /// Item ID.
    pub id: String,
    /// Item name.
    pub name: String,
    /// Parent location; absent for the drive root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_reference: Option<ParentReference>,
    /// File facet, present for files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<Value>,
    /// Folder facet, present for folders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<Value>,
}

impl DriveItem {
    /// Check if this is a folder.
    pub fn is_folder(&self) -> bool {
        self.folder.is_some()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.file.is_some()
    }

    /// Upstream path of the parent folder, if known.
    pub fn parent_path(&self) -> Option<&str> {
        self.parent_reference
            .as_ref()
            .and_then(|parent| parent.path.as_deref())
    }
}

/// Source of item metadata.
///
/// Implementations perform exactly one upstream lookup per call and do not
/// retry; retry policy belongs to the caller.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Get the source name (e.g., "onedrive", "memory").
    fn name(&self) -> &str;

    /// Fetch metadata for one item.
    ///
    /// # Errors
    /// - `Upstream` when the API answered with an error status
    /// - `Network` when no usable answer was received
    async fn get_item(&self, id: &ItemId, token: &AccessToken) -> Result<DriveItem>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_drive_item_from_graph_payload() {
        let payload = json!({
            "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#items/$entity",
            "id": "01ABC",
            "name": "Reports",
            "parentReference": {
                "driveId": "b!xyz",
                "driveType": "personal",
                "id": "01PARENT",
                "path": "/drive/root:/Documents"
            },
            "folder": { "childCount": 3 }
        });

        let item: DriveItem = serde_json::from_value(payload).unwrap();
        assert_eq!(item.id, "01ABC");
        assert!(item.is_folder());
        assert!(!item.is_file());
        assert_eq!(item.parent_path(), Some("/drive/root:/Documents"));

        let parent = item.parent_reference.as_ref().unwrap();
        assert_eq!(parent.extra.get("driveType"), Some(&json!("personal")));
    }

    #[test]
    fn test_drive_item_serializes_only_selected_fields() {
        let item: DriveItem = serde_json::from_value(json!({
            "@odata.context": "ignored",
            "id": "01F",
            "name": "a.docx",
            "parentReference": { "path": "/drive/root:/Documents", "driveId": "d1" },
            "file": { "mimeType": "application/msword" }
        }))
        .unwrap();

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "01F",
                "name": "a.docx",
                "parentReference": { "path": "/drive/root:/Documents", "driveId": "d1" },
                "file": { "mimeType": "application/msword" }
            })
        );
    }

    #[test]
    fn test_root_item_has_no_parent_path() {
        let item: DriveItem =
            serde_json::from_value(json!({ "id": "root", "name": "root", "folder": {} })).unwrap();
        assert_eq!(item.parent_path(), None);
    }
}

//! Microsoft Graph drive API client.

use async_trait::async_trait;
use reqwest::{header, Client};

use driveindex_common::{AccessToken, Error, ItemId, Result};

use crate::provider::{DriveItem, ItemSource, ITEM_SELECT};

/// Graph drive API client.
pub struct GraphClient {
    http: Client,
    drive_api: String,
}

impl GraphClient {
    /// Create a new client for a drive API base such as
    /// `https://graph.microsoft.com/v1.0/me/drive`.
    pub fn new(drive_api: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("driveindex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            drive_api: drive_api.into().trim_end_matches('/').to_string(),
        })
    }

    /// URL of the item endpoint for `id`.
    fn item_url(&self, id: &ItemId) -> String {
        format!("{}/items/{}", self.drive_api, id)
    }

    /// Handle API response with error checking.
    ///
    /// Error bodies are kept as JSON when they parse, otherwise as a string.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| Error::Network(format!("Failed to parse response: {}", e)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read error body: {}", e)))?;
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));

        Err(Error::Upstream {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ItemSource for GraphClient {
    fn name(&self) -> &str {
        "onedrive"
    }

    async fn get_item(&self, id: &ItemId, token: &AccessToken) -> Result<DriveItem> {
        let response = self
            .http
            .get(self.item_url(id))
            .header(header::AUTHORIZATION, format!("Bearer {}", token.secret()))
            .query(&[("select", ITEM_SELECT)])
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to get item: {}", e)))?;

        tracing::debug!(item = %id, status = %response.status(), "Upstream item lookup");

        self.handle_response(response).await
    }
}

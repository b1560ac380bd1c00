//! Server test utilities.

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use driveindex_common::{AccessToken, SiteConfig};
use driveindex_server::{create_router, AppState};
use driveindex_storage::{MemoryDrive, StaticTokenProvider};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Cache header configured for every test server.
pub const TEST_CACHE_CONTROL: &str = "max-age=0, s-maxage=60, stale-while-revalidate";

/// A test server wrapper with an in-memory drive behind it.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub drive: Arc<MemoryDrive>,
}

/// Raw response parts.
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).expect("response body is not JSON")
    }
}

#[allow(dead_code)]
impl TestServer {
    /// Serve `/Documents` with plain (rootless) upstream paths.
    pub fn new() -> Self {
        Self::with_config(SiteConfig {
            base_directory: "/Documents".to_string(),
            drive_root: String::new(),
            base_url: "https://files.example.com".to_string(),
            cache_control: TEST_CACHE_CONTROL.to_string(),
            ..SiteConfig::default()
        })
    }

    pub fn with_config(config: SiteConfig) -> Self {
        let config = Arc::new(config.validated().expect("invalid test config"));
        let drive = Arc::new(MemoryDrive::new());
        let tokens = Arc::new(StaticTokenProvider::new(AccessToken::new("test-token")));

        let state = AppState::new(config, drive.clone(), tokens).expect("failed to build state");

        Self {
            router: create_router(state),
            drive,
        }
    }

    /// Issue a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse {
            status,
            headers,
            bytes,
        }
    }
}

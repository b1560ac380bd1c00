//! Preview URLs for embedded document renderers.
//!
//! The renderer fetches file bytes itself, so the URL it receives has to
//! carry the protected-route token. The token is percent-encoded into the
//! query string, then the whole URL is percent-encoded again because the
//! renderer takes it as a single opaque component and decodes it once.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use std::fmt;

use driveindex_common::{AccessToken, SiteConfig};

/// Raw-content endpoint the renderer is pointed at.
pub const RAW_ENDPOINT: &str = "/api/raw";
/// Query parameter carrying the protected-route token.
pub const TOKEN_PARAM: &str = "odpt";
/// Width used until the container has been measured.
pub const DEFAULT_CONTAINER_WIDTH: u32 = 600;
/// Fixed renderer height.
pub const PREVIEW_HEIGHT: &str = "600";

/// Characters left alone by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Same as [`URI_COMPONENT`] but keeps path separators.
const URI_PATH: &AsciiSet = &URI_COMPONENT.remove(b'/');

/// Percent-encode a string as a single URI component.
pub fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, URI_COMPONENT).to_string()
}

/// Percent-encode a decoded path, leaving `/` in place.
pub fn encode_path(input: &str) -> String {
    utf8_percent_encode(input, URI_PATH).to_string()
}

/// Compose the raw-content URL for `current_path`.
///
/// `current_path` is the decoded browsed path; it is encoded back into
/// request-path form so it stays a single `path` parameter. The token, if
/// any, is encoded once.
pub fn raw_url(base_url: &str, current_path: &str, token: Option<&AccessToken>) -> String {
    let mut url = format!(
        "{}{}?path={}",
        base_url,
        RAW_ENDPOINT,
        encode_path(current_path)
    );
    if let Some(token) = token {
        url.push_str(&format!("&{}={}", TOKEN_PARAM, encode_component(token.secret())));
    }
    url
}

/// Compose the raw-content URL and encode the whole of it once more.
pub fn build_url(base_url: &str, current_path: &str, token: Option<&AccessToken>) -> String {
    encode_component(&raw_url(base_url, current_path, token))
}

/// Rendering container width, measured once per mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerWidth(u32);

impl ContainerWidth {
    /// Take the measured width, or the default if the container is not
    /// mounted yet.
    pub fn measure(measured: Option<u32>) -> Self {
        Self(measured.unwrap_or(DEFAULT_CONTAINER_WIDTH))
    }

    /// Width in pixels.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for ContainerWidth {
    fn default() -> Self {
        Self(DEFAULT_CONTAINER_WIDTH)
    }
}

impl fmt::Display for ContainerWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything needed to build one renderer embed.
#[derive(Debug, Clone)]
pub struct PreviewRequest {
    /// Path being browsed, e.g. `/Reports/file.docx`.
    pub current_path: String,
    /// Protected-route token, if the path needs one.
    pub token: Option<AccessToken>,
    /// Measured container width.
    pub width: ContainerWidth,
}

impl PreviewRequest {
    /// Create a request, measuring the container from `measured_width`.
    pub fn new(
        current_path: impl Into<String>,
        token: Option<AccessToken>,
        measured_width: Option<u32>,
    ) -> Self {
        Self {
            current_path: current_path.into(),
            token,
            width: ContainerWidth::measure(measured_width),
        }
    }

    /// Build the renderer embed for this request.
    pub fn embed(&self, config: &SiteConfig) -> PreviewEmbed {
        let token = self.token.as_ref();
        PreviewEmbed {
            url: build_url(&config.base_url, &self.current_path, token),
            width: self.width.to_string(),
            height: PREVIEW_HEIGHT.to_string(),
            download_url: raw_url(&config.base_url, &self.current_path, token),
        }
    }
}

/// Arguments for the document renderer plus the download link shown
/// beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewEmbed {
    /// Doubly encoded raw-content URL.
    pub url: String,
    pub width: String,
    pub height: String,
    /// Singly encoded raw-content URL for the download button.
    pub download_url: String,
}

//! Request handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, RawQuery, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use driveindex_common::AccessToken;
use driveindex_scope::{PreviewEmbed, PreviewRequest};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Last value of `name` in a raw query string.
///
/// Decoding is lossy, so a malformed query never fails extraction; it just
/// produces an identifier the resolver rejects.
fn query_value(raw: Option<&str>, name: &str) -> Option<String> {
    let raw = raw?;
    url::form_urlencoded::parse(raw.as_bytes())
        .filter(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .last()
}

/// `GET /api/item?id=<id>`
///
/// Answers with the scoped item, or `null` for items outside the base
/// directory. Both carry the configured `Cache-Control` header.
pub async fn get_item(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> ApiResult<Response> {
    let id = query_value(raw.as_deref(), "id").unwrap_or_default();
    let resolution = state.resolver.resolve(&id).await?;

    Ok((
        [(header::CACHE_CONTROL, state.cache_control.clone())],
        Json(resolution),
    )
        .into_response())
}

/// Query for `GET /api/preview`.
#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(default = "root_path")]
    pub path: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
}

fn root_path() -> String {
    "/".to_string()
}

/// `GET /api/preview?path=<path>[&token=<t>][&width=<px>]`
pub async fn get_preview(
    State(state): State<AppState>,
    query: Result<Query<PreviewQuery>, QueryRejection>,
) -> ApiResult<Json<PreviewEmbed>> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let token = query
        .token
        .filter(|t| !t.is_empty())
        .map(AccessToken::new);
    let request = PreviewRequest::new(query.path, token, query.width);

    Ok(Json(request.embed(state.resolver.config())))
}

/// `GET /api/health`
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_value_last_wins() {
        assert_eq!(
            query_value(Some("id=a&id=b"), "id").as_deref(),
            Some("b")
        );
    }

    #[test]
    fn test_query_value_decodes() {
        assert_eq!(
            query_value(Some("id=abc%21&x=1"), "id").as_deref(),
            Some("abc!")
        );
    }

    #[test]
    fn test_query_value_missing() {
        assert_eq!(query_value(None, "id"), None);
        assert_eq!(query_value(Some("other=1"), "id"), None);
    }
}

//! Access token providers.
//!
//! Obtaining and refreshing credentials happens elsewhere; this module only
//! defines the seam the resolver awaits on.

use async_trait::async_trait;
use std::future::Future;

use driveindex_common::{AccessToken, Error, Result};

/// Environment variable read by [`StaticTokenProvider::from_env`].
pub const ACCESS_TOKEN_ENV: &str = "DRIVEINDEX_ACCESS_TOKEN";

/// Supplier of a currently valid upstream access token.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Get a valid access token.
    ///
    /// # Errors
    /// - `Authentication` if no token can be produced
    async fn access_token(&self) -> Result<AccessToken>;
}

/// Provider that always hands out the same token.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Create a provider for a fixed token.
    pub fn new(token: AccessToken) -> Self {
        Self { token }
    }

    /// Read the token from `DRIVEINDEX_ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self> {
        match std::env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.is_empty() => Ok(Self::new(AccessToken::new(token))),
            _ => Err(Error::Authentication(format!(
                "{} is not set",
                ACCESS_TOKEN_ENV
            ))),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<AccessToken> {
        if self.token.is_empty() {
            return Err(Error::Authentication("Access token is empty".to_string()));
        }
        Ok(self.token.clone())
    }
}

/// Provider backed by an async function, e.g. a call into a token store.
pub struct FnTokenProvider<F> {
    fetch: F,
}

impl<F, Fut> FnTokenProvider<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<AccessToken>> + Send,
{
    /// Wrap an async token function.
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

#[async_trait]
impl<F, Fut> TokenProvider for FnTokenProvider<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<AccessToken>> + Send,
{
    async fn access_token(&self) -> Result<AccessToken> {
        (self.fetch)().await
    }
}

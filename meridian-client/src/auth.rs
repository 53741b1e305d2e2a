//! Token providers
//!
//! Every request carries a bearer token obtained from a [`TokenProvider`].
//! Two implementations are provided: a static pre-acquired token, and an
//! authenticator that exchanges a long-lived API key for short-lived access
//! tokens and caches them until close to expiry.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::error::{ClientError, Result};

/// Supplies the bearer token attached to each request
#[async_trait]
pub trait TokenProvider: Send + Sync + fmt::Debug {
    /// Returns a token currently valid for the target service
    async fn token(&self) -> Result<String>;
}

/// A static, pre-acquired bearer token
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

#[async_trait]
impl TokenProvider for BearerToken {
    async fn token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Refresh when less than this much lifetime remains
const REFRESH_WINDOW: Duration = Duration::from_secs(60);

/// Exchanges an API key for access tokens at the platform token endpoint
///
/// Tokens are cached and shared across concurrent requests; a new exchange
/// is performed only when the cached token is missing or about to expire.
pub struct ApiKeyAuthenticator {
    token_url: String,
    api_key: String,
    client: reqwest::Client,
    cache: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

impl ApiKeyAuthenticator {
    pub fn new(token_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            token_url: token_url.into(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
            cache: Mutex::new(None),
        }
    }

    async fn exchange(&self) -> Result<CachedToken> {
        let response = self
            .client
            .post(&self.token_url)
            .form(&[("grant_type", "api_key"), ("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::AuthFailed(format!(
                "token endpoint returned status {}: {}",
                status.as_u16(),
                detail
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ClientError::AuthFailed(format!("malformed token response: {}", e)))?;

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}

impl fmt::Debug for ApiKeyAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuthenticator")
            .field("token_url", &self.token_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenProvider for ApiKeyAuthenticator {
    async fn token(&self) -> Result<String> {
        let mut cache = self.cache.lock().await;

        if let Some(cached) = cache.as_ref()
            && Instant::now() + REFRESH_WINDOW < cached.expires_at
        {
            return Ok(cached.access_token.clone());
        }

        tracing::debug!(token_url = %self.token_url, "exchanging API key for access token");
        let fresh = self.exchange().await?;
        let token = fresh.access_token.clone();
        *cache = Some(fresh);
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bearer_token_returns_configured_value() {
        let provider = BearerToken::new("secret-token");
        assert_eq!(provider.token().await.unwrap(), "secret-token");
    }

    #[test]
    fn test_debug_output_redacts_secrets() {
        let bearer = format!("{:?}", BearerToken::new("secret-token"));
        assert!(!bearer.contains("secret-token"));

        let authenticator = format!(
            "{:?}",
            ApiKeyAuthenticator::new("https://auth.example.com/token", "very-secret")
        );
        assert!(!authenticator.contains("very-secret"));
        assert!(authenticator.contains("auth.example.com"));
    }
}

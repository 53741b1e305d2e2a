//! Shared HTTP transport
//!
//! Both service clients delegate request construction, authentication, and
//! response handling to this module so status handling stays uniform:
//! 404 maps to [`ClientError::NotFound`], every other non-success status
//! surfaces the status code and response body, and success bodies are
//! deserialized into typed results.

use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use crate::auth::TokenProvider;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone)]
pub(crate) struct Transport {
    base_url: String,
    client: Client,
    auth: Arc<dyn TokenProvider>,
}

impl Transport {
    pub(crate) fn new(
        base_url: impl Into<String>,
        auth: Arc<dyn TokenProvider>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            auth,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn builder(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "sending request");
        let token = self.auth.token().await?;
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.builder(Method::GET, path).await?.send().await?;
        self.handle_response(response).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .builder(Method::GET, path)
            .await?
            .query(query)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .builder(Method::POST, path)
            .await?
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// POST without a request body, for action endpoints that return nothing
    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        let response = self.builder(Method::POST, path).await?.send().await?;
        self.handle_empty_response(response).await
    }

    /// POST without a request body, for action endpoints that return the
    /// affected resource
    pub(crate) async fn post_no_body<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.builder(Method::POST, path).await?.send().await?;
        self.handle_response(response).await
    }

    /// POST with a request body, ignoring the response body
    pub(crate) async fn post_no_content<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let response = self
            .builder(Method::POST, path)
            .await?
            .json(body)
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .builder(Method::PUT, path)
            .await?
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .builder(Method::PATCH, path)
            .await?
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let response = self.builder(Method::DELETE, path).await?.send().await?;
        self.handle_empty_response(response).await
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            return Err(self.error_for(status, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g. DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            return Err(self.error_for(status, response).await);
        }

        Ok(())
    }

    async fn error_for(&self, status: StatusCode, response: reqwest::Response) -> ClientError {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == StatusCode::NOT_FOUND {
            ClientError::NotFound(message)
        } else {
            ClientError::api_error(status.as_u16(), message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::BearerToken;

    fn transport(base_url: &str) -> Transport {
        Transport::new(base_url, Arc::new(BearerToken::new("t")), Client::new())
    }

    #[test]
    fn test_transport_trims_trailing_slash() {
        assert_eq!(
            transport("https://api.example.com/").base_url(),
            "https://api.example.com"
        );
        assert_eq!(
            transport("https://api.example.com").base_url(),
            "https://api.example.com"
        );
    }
}

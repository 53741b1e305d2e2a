//! Meridian HTTP Clients
//!
//! Type-safe async clients for the two Meridian platform APIs: the Delivery
//! Pipeline service (pipelines, definitions, properties, triggers, runs) and
//! the IAM Policy service (policies, roles, templates, assignments, account
//! settings).
//!
//! Both clients share one transport layer, one error taxonomy, and one
//! authentication seam, so behavior is uniform across services: 404 is
//! distinguishable from other failures, every error carries the response
//! body, and tokens are acquired through a pluggable [`auth::TokenProvider`].
//!
//! # Example
//!
//! ```no_run
//! use meridian_client::PipelineClient;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PipelineClient::new("https://pipelines.example.com", "token");
//!
//!     let pipeline = client
//!         .get_pipeline(Uuid::parse_str("94619026-912b-4d92-8f51-6c74f0692d90")?)
//!         .await?;
//!
//!     println!("{} is {}", pipeline.name, pipeline.status);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod wait;

mod assignments;
mod definitions;
mod http;
mod pipelines;
mod policies;
mod properties;
mod roles;
mod runs;
mod settings;
mod templates;
mod triggers;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use wait::WaitOptions;

use reqwest::Client;
use std::sync::Arc;

use crate::auth::{BearerToken, TokenProvider};
use crate::http::Transport;

/// HTTP client for the Delivery Pipeline service
///
/// Methods are grouped by resource:
/// - Pipelines (create, get, update, delete)
/// - Definitions, properties, and triggers of a pipeline
/// - Trigger properties
/// - Pipeline runs (start, list, cancel, rerun)
#[derive(Debug, Clone)]
pub struct PipelineClient {
    transport: Transport,
}

impl PipelineClient {
    /// Create a client using a static bearer token
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_auth(base_url, Arc::new(BearerToken::new(token)))
    }

    /// Create a client using a custom token provider (e.g. an
    /// [`auth::ApiKeyAuthenticator`])
    pub fn with_auth(base_url: impl Into<String>, auth: Arc<dyn TokenProvider>) -> Self {
        Self {
            transport: Transport::new(base_url, auth, Client::new()),
        }
    }

    /// Create a client with a pre-configured reqwest client, for custom
    /// timeouts, proxies, or TLS settings
    pub fn with_client(
        base_url: impl Into<String>,
        auth: Arc<dyn TokenProvider>,
        client: Client,
    ) -> Self {
        Self {
            transport: Transport::new(base_url, auth, client),
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }
}

/// HTTP client for the IAM Policy service
///
/// Methods are grouped by resource:
/// - Policies (access and authorization)
/// - Custom roles
/// - Policy templates and template versions
/// - Policy assignments, including waiters for their asynchronous
///   propagation
/// - Account access-management settings
#[derive(Debug, Clone)]
pub struct IamClient {
    transport: Transport,
}

impl IamClient {
    /// Create a client using a static bearer token
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_auth(base_url, Arc::new(BearerToken::new(token)))
    }

    /// Create a client using a custom token provider
    pub fn with_auth(base_url: impl Into<String>, auth: Arc<dyn TokenProvider>) -> Self {
        Self {
            transport: Transport::new(base_url, auth, Client::new()),
        }
    }

    /// Create a client with a pre-configured reqwest client
    pub fn with_client(
        base_url: impl Into<String>,
        auth: Arc<dyn TokenProvider>,
        client: Client,
    ) -> Self {
        Self {
            transport: Transport::new(base_url, auth, client),
        }
    }

    /// Get the base URL of the service
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PipelineClient::new("https://pipelines.example.com", "token");
        assert_eq!(client.base_url(), "https://pipelines.example.com");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = IamClient::new("https://iam.example.com/", "token");
        assert_eq!(client.base_url(), "https://iam.example.com");
    }

    #[test]
    fn test_client_with_custom_auth() {
        let auth = Arc::new(BearerToken::new("token"));
        let client = IamClient::with_auth("https://iam.example.com", auth);
        assert_eq!(client.base_url(), "https://iam.example.com");
    }
}

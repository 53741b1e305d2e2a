//! Configuration module
//!
//! Handles CLI configuration: service URLs and credentials, plus client
//! construction shared by every command handler.

use std::sync::Arc;

use meridian_client::auth::{ApiKeyAuthenticator, BearerToken, TokenProvider};
use meridian_client::{IamClient, PipelineClient};

/// How the CLI authenticates
#[derive(Clone)]
pub enum Credentials {
    /// Pre-acquired bearer token
    Token(String),
    /// API key exchanged at the token endpoint
    ApiKey(String),
}

/// CLI configuration
#[derive(Clone)]
pub struct Config {
    /// URL of the Delivery Pipeline service
    pub pipelines_url: String,
    /// URL of the IAM Policy service
    pub iam_url: String,
    /// Token endpoint used with API-key credentials
    pub token_url: String,
    pub credentials: Credentials,
}

impl Config {
    fn auth(&self) -> Arc<dyn TokenProvider> {
        match &self.credentials {
            Credentials::Token(token) => Arc::new(BearerToken::new(token.clone())),
            Credentials::ApiKey(key) => {
                Arc::new(ApiKeyAuthenticator::new(self.token_url.clone(), key.clone()))
            }
        }
    }

    pub fn pipeline_client(&self) -> PipelineClient {
        PipelineClient::with_auth(&self.pipelines_url, self.auth())
    }

    pub fn iam_client(&self) -> IamClient {
        IamClient::with_auth(&self.iam_url, self.auth())
    }
}

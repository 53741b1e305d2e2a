//! Policy API endpoints

use serde::Deserialize;

use crate::IamClient;
use crate::error::Result;
use meridian_core::domain::policy::Policy;
use meridian_core::dto::policy::PolicyRequest;

#[derive(Deserialize)]
struct PolicyCollection {
    policies: Vec<Policy>,
}

impl IamClient {
    /// List the policies in an account
    pub async fn list_policies(&self, account_id: &str) -> Result<Vec<Policy>> {
        let collection: PolicyCollection = self
            .transport()
            .get_with_query("/v2/policies", &[("account_id", account_id)])
            .await?;
        Ok(collection.policies)
    }

    /// Create an access or authorization policy
    pub async fn create_policy(&self, req: PolicyRequest) -> Result<Policy> {
        req.validate()?;
        self.transport().post("/v2/policies", &req).await
    }

    /// Get a policy by ID
    pub async fn get_policy(&self, policy_id: &str) -> Result<Policy> {
        self.transport()
            .get(&format!("/v2/policies/{}", policy_id))
            .await
    }

    /// Replace a policy
    ///
    /// The whole policy is replaced; fields absent from the request are
    /// cleared, not preserved.
    pub async fn replace_policy(&self, policy_id: &str, req: PolicyRequest) -> Result<Policy> {
        req.validate()?;
        self.transport()
            .put(&format!("/v2/policies/{}", policy_id), &req)
            .await
    }

    /// Delete a policy
    pub async fn delete_policy(&self, policy_id: &str) -> Result<()> {
        self.transport()
            .delete(&format!("/v2/policies/{}", policy_id))
            .await
    }
}

//! Custom role API endpoints

use serde::Deserialize;

use crate::IamClient;
use crate::error::Result;
use meridian_core::domain::role::CustomRole;
use meridian_core::dto::policy::{CreateRole, UpdateRole};

#[derive(Deserialize)]
struct RoleCollection {
    custom_roles: Vec<CustomRole>,
}

impl IamClient {
    /// List the custom roles in an account
    pub async fn list_roles(&self, account_id: &str) -> Result<Vec<CustomRole>> {
        let collection: RoleCollection = self
            .transport()
            .get_with_query("/v2/roles", &[("account_id", account_id)])
            .await?;
        Ok(collection.custom_roles)
    }

    /// Create a custom role
    pub async fn create_role(&self, req: CreateRole) -> Result<CustomRole> {
        req.validate()?;
        self.transport().post("/v2/roles", &req).await
    }

    /// Get a custom role by ID
    pub async fn get_role(&self, role_id: &str) -> Result<CustomRole> {
        self.transport().get(&format!("/v2/roles/{}", role_id)).await
    }

    /// Replace the mutable fields of a custom role
    ///
    /// Name, account, and service are fixed at creation and cannot change.
    pub async fn replace_role(&self, role_id: &str, req: UpdateRole) -> Result<CustomRole> {
        req.validate()?;
        self.transport()
            .put(&format!("/v2/roles/{}", role_id), &req)
            .await
    }

    /// Delete a custom role
    pub async fn delete_role(&self, role_id: &str) -> Result<()> {
        self.transport()
            .delete(&format!("/v2/roles/{}", role_id))
            .await
    }
}

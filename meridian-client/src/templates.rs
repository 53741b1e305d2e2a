//! Policy template API endpoints

use serde::Deserialize;

use crate::IamClient;
use crate::error::Result;
use meridian_core::domain::template::PolicyTemplate;
use meridian_core::dto::template::{CreateTemplate, CreateTemplateVersion};

#[derive(Deserialize)]
struct TemplateCollection {
    policy_templates: Vec<PolicyTemplate>,
}

#[derive(Deserialize)]
struct VersionCollection {
    versions: Vec<PolicyTemplate>,
}

impl IamClient {
    /// List the policy templates in an account
    pub async fn list_templates(&self, account_id: &str) -> Result<Vec<PolicyTemplate>> {
        let collection: TemplateCollection = self
            .transport()
            .get_with_query("/v1/policy_templates", &[("account_id", account_id)])
            .await?;
        Ok(collection.policy_templates)
    }

    /// Create a policy template; the request body becomes version 1
    pub async fn create_template(&self, req: CreateTemplate) -> Result<PolicyTemplate> {
        req.validate()?;
        self.transport().post("/v1/policy_templates", &req).await
    }

    /// Get the latest version of a template
    pub async fn get_template(&self, template_id: &str) -> Result<PolicyTemplate> {
        self.transport()
            .get(&format!("/v1/policy_templates/{}", template_id))
            .await
    }

    /// Delete a template and all its versions
    ///
    /// Fails while any assignment still references the template.
    pub async fn delete_template(&self, template_id: &str) -> Result<()> {
        self.transport()
            .delete(&format!("/v1/policy_templates/{}", template_id))
            .await
    }

    /// List all versions of a template
    pub async fn list_template_versions(&self, template_id: &str) -> Result<Vec<PolicyTemplate>> {
        let collection: VersionCollection = self
            .transport()
            .get(&format!("/v1/policy_templates/{}/versions", template_id))
            .await?;
        Ok(collection.versions)
    }

    /// Add a version to a template
    pub async fn create_template_version(
        &self,
        template_id: &str,
        req: CreateTemplateVersion,
    ) -> Result<PolicyTemplate> {
        req.validate()?;
        self.transport()
            .post(&format!("/v1/policy_templates/{}/versions", template_id), &req)
            .await
    }

    /// Get a specific version of a template
    pub async fn get_template_version(
        &self,
        template_id: &str,
        version: &str,
    ) -> Result<PolicyTemplate> {
        self.transport()
            .get(&format!(
                "/v1/policy_templates/{}/versions/{}",
                template_id, version
            ))
            .await
    }

    /// Delete one version of a template
    pub async fn delete_template_version(&self, template_id: &str, version: &str) -> Result<()> {
        self.transport()
            .delete(&format!(
                "/v1/policy_templates/{}/versions/{}",
                template_id, version
            ))
            .await
    }

    /// Commit a template version, making it immutable and assignable
    pub async fn commit_template_version(&self, template_id: &str, version: &str) -> Result<()> {
        self.transport()
            .post_empty(&format!(
                "/v1/policy_templates/{}/versions/{}/commit",
                template_id, version
            ))
            .await
    }
}

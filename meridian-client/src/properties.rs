//! Pipeline environment property API endpoints

use serde::Deserialize;
use uuid::Uuid;

use crate::PipelineClient;
use crate::error::Result;
use meridian_core::domain::property::Property;
use meridian_core::dto::pipeline::PropertyRequest;

#[derive(Deserialize)]
struct PropertyCollection {
    properties: Vec<Property>,
}

impl PipelineClient {
    /// List the environment properties of a pipeline
    pub async fn list_properties(&self, pipeline_id: Uuid) -> Result<Vec<Property>> {
        let collection: PropertyCollection = self
            .transport()
            .get(&format!("/tekton_pipelines/{}/properties", pipeline_id))
            .await?;
        Ok(collection.properties)
    }

    /// Create a pipeline property
    pub async fn create_property(
        &self,
        pipeline_id: Uuid,
        req: PropertyRequest,
    ) -> Result<Property> {
        req.validate()?;
        self.transport()
            .post(&format!("/tekton_pipelines/{}/properties", pipeline_id), &req)
            .await
    }

    /// Get a pipeline property by name
    pub async fn get_property(&self, pipeline_id: Uuid, name: &str) -> Result<Property> {
        self.transport()
            .get(&format!("/tekton_pipelines/{}/properties/{}", pipeline_id, name))
            .await
    }

    /// Replace a pipeline property
    ///
    /// The name in the path and the name in the body must match; properties
    /// cannot be renamed.
    pub async fn replace_property(
        &self,
        pipeline_id: Uuid,
        name: &str,
        req: PropertyRequest,
    ) -> Result<Property> {
        req.validate()?;
        self.transport()
            .put(
                &format!("/tekton_pipelines/{}/properties/{}", pipeline_id, name),
                &req,
            )
            .await
    }

    /// Delete a pipeline property
    pub async fn delete_property(&self, pipeline_id: Uuid, name: &str) -> Result<()> {
        self.transport()
            .delete(&format!("/tekton_pipelines/{}/properties/{}", pipeline_id, name))
            .await
    }
}

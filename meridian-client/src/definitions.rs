//! Pipeline definition API endpoints

use serde::Deserialize;
use uuid::Uuid;

use crate::PipelineClient;
use crate::error::Result;
use meridian_core::domain::pipeline::Definition;
use meridian_core::dto::pipeline::CreateDefinition;

#[derive(Deserialize)]
struct DefinitionCollection {
    definitions: Vec<Definition>,
}

impl PipelineClient {
    /// List the definitions of a pipeline
    pub async fn list_definitions(&self, pipeline_id: Uuid) -> Result<Vec<Definition>> {
        let collection: DefinitionCollection = self
            .transport()
            .get(&format!("/tekton_pipelines/{}/definitions", pipeline_id))
            .await?;
        Ok(collection.definitions)
    }

    /// Add a definition to a pipeline
    pub async fn create_definition(
        &self,
        pipeline_id: Uuid,
        req: CreateDefinition,
    ) -> Result<Definition> {
        req.validate()?;
        self.transport()
            .post(&format!("/tekton_pipelines/{}/definitions", pipeline_id), &req)
            .await
    }

    /// Get a definition by ID
    pub async fn get_definition(
        &self,
        pipeline_id: Uuid,
        definition_id: &str,
    ) -> Result<Definition> {
        self.transport()
            .get(&format!(
                "/tekton_pipelines/{}/definitions/{}",
                pipeline_id, definition_id
            ))
            .await
    }

    /// Replace a definition's source
    pub async fn replace_definition(
        &self,
        pipeline_id: Uuid,
        definition_id: &str,
        req: CreateDefinition,
    ) -> Result<Definition> {
        req.validate()?;
        self.transport()
            .put(
                &format!(
                    "/tekton_pipelines/{}/definitions/{}",
                    pipeline_id, definition_id
                ),
                &req,
            )
            .await
    }

    /// Delete a definition
    pub async fn delete_definition(&self, pipeline_id: Uuid, definition_id: &str) -> Result<()> {
        self.transport()
            .delete(&format!(
                "/tekton_pipelines/{}/definitions/{}",
                pipeline_id, definition_id
            ))
            .await
    }
}

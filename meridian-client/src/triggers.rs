//! Trigger and trigger property API endpoints

use serde::Deserialize;
use uuid::Uuid;

use crate::PipelineClient;
use crate::error::Result;
use meridian_core::domain::property::TriggerProperty;
use meridian_core::domain::trigger::Trigger;
use meridian_core::dto::pipeline::PropertyRequest;
use meridian_core::dto::trigger::{CreateTrigger, DuplicateTrigger, UpdateTrigger};

#[derive(Deserialize)]
struct TriggerCollection {
    triggers: Vec<Trigger>,
}

#[derive(Deserialize)]
struct TriggerPropertyCollection {
    properties: Vec<TriggerProperty>,
}

impl PipelineClient {
    // =============================================================================
    // Triggers
    // =============================================================================

    /// List the triggers of a pipeline
    pub async fn list_triggers(&self, pipeline_id: Uuid) -> Result<Vec<Trigger>> {
        let collection: TriggerCollection = self
            .transport()
            .get(&format!("/tekton_pipelines/{}/triggers", pipeline_id))
            .await?;
        Ok(collection.triggers)
    }

    /// Create a trigger
    pub async fn create_trigger(&self, pipeline_id: Uuid, req: CreateTrigger) -> Result<Trigger> {
        req.validate()?;
        self.transport()
            .post(&format!("/tekton_pipelines/{}/triggers", pipeline_id), &req)
            .await
    }

    /// Get a trigger by ID
    pub async fn get_trigger(&self, pipeline_id: Uuid, trigger_id: &str) -> Result<Trigger> {
        self.transport()
            .get(&format!(
                "/tekton_pipelines/{}/triggers/{}",
                pipeline_id, trigger_id
            ))
            .await
    }

    /// Update a trigger; only the fields present in the request change
    pub async fn update_trigger(
        &self,
        pipeline_id: Uuid,
        trigger_id: &str,
        req: UpdateTrigger,
    ) -> Result<Trigger> {
        self.transport()
            .patch(
                &format!("/tekton_pipelines/{}/triggers/{}", pipeline_id, trigger_id),
                &req,
            )
            .await
    }

    /// Delete a trigger
    pub async fn delete_trigger(&self, pipeline_id: Uuid, trigger_id: &str) -> Result<()> {
        self.transport()
            .delete(&format!(
                "/tekton_pipelines/{}/triggers/{}",
                pipeline_id, trigger_id
            ))
            .await
    }

    /// Duplicate a trigger under a new name, copying its configuration and
    /// properties
    pub async fn duplicate_trigger(
        &self,
        pipeline_id: Uuid,
        trigger_id: &str,
        name: impl Into<String>,
    ) -> Result<Trigger> {
        self.transport()
            .post(
                &format!(
                    "/tekton_pipelines/{}/triggers/{}/duplicate",
                    pipeline_id, trigger_id
                ),
                &DuplicateTrigger { name: name.into() },
            )
            .await
    }

    // =============================================================================
    // Trigger properties
    // =============================================================================

    /// List the properties of a trigger
    pub async fn list_trigger_properties(
        &self,
        pipeline_id: Uuid,
        trigger_id: &str,
    ) -> Result<Vec<TriggerProperty>> {
        let collection: TriggerPropertyCollection = self
            .transport()
            .get(&format!(
                "/tekton_pipelines/{}/triggers/{}/properties",
                pipeline_id, trigger_id
            ))
            .await?;
        Ok(collection.properties)
    }

    /// Create a trigger property
    pub async fn create_trigger_property(
        &self,
        pipeline_id: Uuid,
        trigger_id: &str,
        req: PropertyRequest,
    ) -> Result<TriggerProperty> {
        req.validate()?;
        self.transport()
            .post(
                &format!(
                    "/tekton_pipelines/{}/triggers/{}/properties",
                    pipeline_id, trigger_id
                ),
                &req,
            )
            .await
    }

    /// Get a trigger property by name
    pub async fn get_trigger_property(
        &self,
        pipeline_id: Uuid,
        trigger_id: &str,
        name: &str,
    ) -> Result<TriggerProperty> {
        self.transport()
            .get(&format!(
                "/tekton_pipelines/{}/triggers/{}/properties/{}",
                pipeline_id, trigger_id, name
            ))
            .await
    }

    /// Replace a trigger property
    pub async fn replace_trigger_property(
        &self,
        pipeline_id: Uuid,
        trigger_id: &str,
        name: &str,
        req: PropertyRequest,
    ) -> Result<TriggerProperty> {
        req.validate()?;
        self.transport()
            .put(
                &format!(
                    "/tekton_pipelines/{}/triggers/{}/properties/{}",
                    pipeline_id, trigger_id, name
                ),
                &req,
            )
            .await
    }

    /// Delete a trigger property
    pub async fn delete_trigger_property(
        &self,
        pipeline_id: Uuid,
        trigger_id: &str,
        name: &str,
    ) -> Result<()> {
        self.transport()
            .delete(&format!(
                "/tekton_pipelines/{}/triggers/{}/properties/{}",
                pipeline_id, trigger_id, name
            ))
            .await
    }
}

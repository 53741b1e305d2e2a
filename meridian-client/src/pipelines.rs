//! Pipeline API endpoints

use uuid::Uuid;

use crate::PipelineClient;
use crate::error::Result;
use meridian_core::domain::pipeline::Pipeline;
use meridian_core::dto::pipeline::{CreatePipeline, UpdatePipeline};

impl PipelineClient {
    /// Create a new pipeline
    ///
    /// The request ID must reference the pipeline tool in the parent
    /// toolchain. The returned pipeline starts in `configuring` status while
    /// the service fetches its definitions.
    pub async fn create_pipeline(&self, req: CreatePipeline) -> Result<Pipeline> {
        req.validate()?;
        self.transport().post("/tekton_pipelines", &req).await
    }

    /// Get a pipeline by ID
    pub async fn get_pipeline(&self, pipeline_id: Uuid) -> Result<Pipeline> {
        self.transport()
            .get(&format!("/tekton_pipelines/{}", pipeline_id))
            .await
    }

    /// Update a pipeline; only the fields present in the request change
    pub async fn update_pipeline(&self, pipeline_id: Uuid, req: UpdatePipeline) -> Result<Pipeline> {
        self.transport()
            .patch(&format!("/tekton_pipelines/{}", pipeline_id), &req)
            .await
    }

    /// Delete a pipeline and everything it owns (definitions, properties,
    /// triggers, runs)
    pub async fn delete_pipeline(&self, pipeline_id: Uuid) -> Result<()> {
        self.transport()
            .delete(&format!("/tekton_pipelines/{}", pipeline_id))
            .await
    }
}

//! Pipeline run API endpoints

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::PipelineClient;
use crate::error::Result;
use meridian_core::domain::run::PipelineRun;
use meridian_core::dto::run::CreateRun;

#[derive(Deserialize)]
struct RunCollection {
    pipeline_runs: Vec<PipelineRun>,
}

#[derive(Serialize)]
struct CancelRun {
    force: bool,
}

impl PipelineClient {
    /// List the runs of a pipeline, newest first
    pub async fn list_runs(&self, pipeline_id: Uuid) -> Result<Vec<PipelineRun>> {
        let collection: RunCollection = self
            .transport()
            .get(&format!("/tekton_pipelines/{}/pipeline_runs", pipeline_id))
            .await?;
        Ok(collection.pipeline_runs)
    }

    /// Start a run by firing a manual or generic trigger
    pub async fn start_run(&self, pipeline_id: Uuid, req: CreateRun) -> Result<PipelineRun> {
        req.validate()?;
        self.transport()
            .post(&format!("/tekton_pipelines/{}/pipeline_runs", pipeline_id), &req)
            .await
    }

    /// Get a run by ID
    pub async fn get_run(&self, pipeline_id: Uuid, run_id: Uuid) -> Result<PipelineRun> {
        self.transport()
            .get(&format!(
                "/tekton_pipelines/{}/pipeline_runs/{}",
                pipeline_id, run_id
            ))
            .await
    }

    /// Delete a run record
    pub async fn delete_run(&self, pipeline_id: Uuid, run_id: Uuid) -> Result<()> {
        self.transport()
            .delete(&format!(
                "/tekton_pipelines/{}/pipeline_runs/{}",
                pipeline_id, run_id
            ))
            .await
    }

    /// Cancel a running run
    ///
    /// With `force`, the run's pods are stopped immediately instead of
    /// waiting for the current task to finish.
    pub async fn cancel_run(&self, pipeline_id: Uuid, run_id: Uuid, force: bool) -> Result<()> {
        self.transport()
            .post_no_content(
                &format!(
                    "/tekton_pipelines/{}/pipeline_runs/{}/cancel",
                    pipeline_id, run_id
                ),
                &CancelRun { force },
            )
            .await
    }

    /// Start a new run with the same configuration as an earlier one
    pub async fn rerun(&self, pipeline_id: Uuid, run_id: Uuid) -> Result<PipelineRun> {
        self.transport()
            .post_no_body(&format!(
                "/tekton_pipelines/{}/pipeline_runs/{}/rerun",
                pipeline_id, run_id
            ))
            .await
    }
}

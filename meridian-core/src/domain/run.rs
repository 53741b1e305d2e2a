//! Pipeline run domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::property::TriggerProperty;
use crate::domain::trigger::Trigger;

/// A single execution of a pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    pub id: Uuid,
    pub status: RunStatus,
    /// Sequential build number of this run within the pipeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_number: Option<i64>,
    /// Snapshot of the trigger that started the run
    pub trigger: Trigger,
    /// Properties the run was started with, after trigger overrides
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<TriggerProperty>,
    /// Webhook payload fields the listener extracted for the run
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub event_params: HashMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<crate::domain::pipeline::Worker>,
    /// URL of the run details page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Run lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Waiting,
    Queued,
    Running,
    Cancelled,
    Succeeded,
    Failed,
    /// The run could not be executed at all (e.g. definition fetch failed)
    Error,
}

impl RunStatus {
    /// True once the run can no longer change status
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Cancelled | RunStatus::Succeeded | RunStatus::Failed | RunStatus::Error
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Pending => "pending",
            RunStatus::Waiting => "waiting",
            RunStatus::Queued => "queued",
            RunStatus::Running => "running",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Succeeded => "succeeded",
            RunStatus::Failed => "failed",
            RunStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(RunStatus::Succeeded.is_terminal());
        assert!(RunStatus::Error.is_terminal());
        assert!(!RunStatus::Queued.is_terminal());
        assert!(!RunStatus::Running.is_terminal());
    }
}

//! Pipeline domain types
//!
//! A pipeline is the root resource of the Delivery Pipeline service. It is
//! created against a toolchain, owns definitions (references to repositories
//! holding the Tekton YAML), environment properties, and triggers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::property::Property;
use crate::domain::trigger::Trigger;

/// A delivery pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    /// Pipeline ID, identical to the pipeline tool ID in the parent toolchain
    pub id: Uuid,
    pub name: String,
    pub status: PipelineStatus,
    pub resource_group: ResourceGroupReference,
    pub toolchain: ToolchainReference,
    pub definitions: Vec<Definition>,
    /// Environment properties shared by every run of this pipeline
    pub properties: Vec<Property>,
    pub triggers: Vec<Trigger>,
    /// Worker assigned to run the pipeline; the shared public worker when
    /// no private worker is configured
    pub worker: Worker,
    /// URL of the page listing this pipeline's runs
    pub runs_url: String,
    /// API URL for interacting with the pipeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Latest run build number; absent if the pipeline has never run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_build_number: Option<i64>,
    /// Publish run events to the toolchain's configured notification targets
    #[serde(default)]
    pub enable_notifications: bool,
    /// Clone only the paths referenced by definitions instead of whole repos
    #[serde(default)]
    pub enable_partial_cloning: bool,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pipeline provisioning status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    /// Ready to run
    Configured,
    /// Definitions are still being fetched and parsed
    Configuring,
    Failed,
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStatus::Configured => write!(f, "configured"),
            PipelineStatus::Configuring => write!(f, "configuring"),
            PipelineStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Resource group holding the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceGroupReference {
    pub id: String,
}

/// Parent toolchain of the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainReference {
    pub id: Uuid,
    pub crn: String,
}

/// A pipeline definition: a reference to a repository (and path within it)
/// containing Tekton YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Definition {
    /// The aggregated definition ID
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub source: DefinitionSource,
}

/// Source repository of a definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionSource {
    /// The only supported source type is `git`
    #[serde(rename = "type")]
    pub source_type: String,
    pub properties: DefinitionSourceProperties,
}

/// Repository coordinates of a definition source
///
/// At most one of `branch` and `tag` may be set; the service rejects
/// requests carrying both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionSourceProperties {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Path to the YAML files inside the repository
    pub path: String,
    /// Repository tool in the parent toolchain backing this source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<Tool>,
}

/// Worker that executes pipeline runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    /// Computed from the worker ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Computed from the worker ID
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub worker_type: Option<String>,
}

/// Reference to a repository tool instance in the parent toolchain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_status_wire_format() {
        let json = serde_json::to_string(&PipelineStatus::Configuring).unwrap();
        assert_eq!(json, "\"configuring\"");

        let parsed: PipelineStatus = serde_json::from_str("\"configured\"").unwrap();
        assert_eq!(parsed, PipelineStatus::Configured);
    }

    #[test]
    fn test_definition_source_optional_fields_omitted() {
        let source = DefinitionSource {
            source_type: "git".to_string(),
            properties: DefinitionSourceProperties {
                url: "https://example.com/org/repo".to_string(),
                branch: Some("main".to_string()),
                tag: None,
                path: ".tekton".to_string(),
                tool: None,
            },
        };

        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["type"], "git");
        assert_eq!(json["properties"]["branch"], "main");
        assert!(json["properties"].get("tag").is_none());
        assert!(json["properties"].get("tool").is_none());
    }
}

//! Pipeline, definition, and property request bodies

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::pipeline::DefinitionSource;
use crate::domain::property::PropertyType;
use crate::dto::ValidationError;

/// Request to create a pipeline
///
/// The ID must be the ID of the pipeline tool in the parent toolchain; the
/// service derives everything else from the toolchain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePipeline {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_build_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_partial_cloning: Option<bool>,
}

impl CreatePipeline {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(n) = self.next_build_number
            && n < 1
        {
            return Err(ValidationError::new(
                "next_build_number",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Request to update a pipeline; every field is optional and only present
/// fields are changed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePipeline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_build_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_partial_cloning: Option<bool>,
}

/// Worker selection by ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerIdentity {
    pub id: String,
}

/// Request to create or replace a definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDefinition {
    pub source: DefinitionSource,
}

impl CreateDefinition {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let props = &self.source.properties;
        if props.url.is_empty() {
            return Err(ValidationError::new("source.properties.url", "must not be empty"));
        }
        if props.branch.is_some() && props.tag.is_some() {
            return Err(ValidationError::new(
                "source.properties",
                "specify one of branch or tag only",
            ));
        }
        Ok(())
    }
}

/// Request to create or replace a pipeline property or trigger property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "Vec::is_empty", rename = "enum")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl PropertyRequest {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            property_type: PropertyType::Text,
            options: Vec::new(),
            locked: None,
            path: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_property_name(&self.name) {
            return Err(ValidationError::new(
                "name",
                "must be 1-253 characters from [-0-9a-zA-Z_.]",
            ));
        }
        match self.property_type {
            PropertyType::SingleSelect => {
                if self.options.is_empty() {
                    return Err(ValidationError::new(
                        "enum",
                        "single_select properties require at least one option",
                    ));
                }
            }
            _ => {
                if !self.options.is_empty() {
                    return Err(ValidationError::new(
                        "enum",
                        "options are only valid for single_select properties",
                    ));
                }
            }
        }
        if self.path.is_some() && self.property_type != PropertyType::Integration {
            return Err(ValidationError::new(
                "path",
                "only valid for integration properties",
            ));
        }
        Ok(())
    }
}

fn is_valid_property_name(name: &str) -> bool {
    (1..=253).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_name_rules() {
        assert!(PropertyRequest::text("API_KEY.v2", "x").validate().is_ok());

        let empty = PropertyRequest::text("", "x");
        assert!(empty.validate().is_err());

        let spaces = PropertyRequest::text("has space", "x");
        assert!(spaces.validate().is_err());

        let long = PropertyRequest::text("a".repeat(254), "x");
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_single_select_requires_options() {
        let mut req = PropertyRequest::text("target", "staging");
        req.property_type = PropertyType::SingleSelect;
        assert!(req.validate().is_err());

        req.options = vec!["staging".to_string(), "production".to_string()];
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_options_rejected_on_text_property() {
        let mut req = PropertyRequest::text("target", "staging");
        req.options = vec!["staging".to_string()];
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_path_only_for_integration() {
        let mut req = PropertyRequest::text("repo", "value");
        req.path = Some("parameters.repo_url".to_string());
        assert!(req.validate().is_err());

        req.property_type = PropertyType::Integration;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_definition_branch_and_tag_exclusive() {
        let mut req = CreateDefinition {
            source: DefinitionSource {
                source_type: "git".to_string(),
                properties: crate::domain::pipeline::DefinitionSourceProperties {
                    url: "https://example.com/org/repo".to_string(),
                    branch: Some("main".to_string()),
                    tag: None,
                    path: ".tekton".to_string(),
                    tool: None,
                },
            },
        };
        assert!(req.validate().is_ok());

        req.source.properties.tag = Some("v1.0".to_string());
        assert!(req.validate().is_err());
    }
}

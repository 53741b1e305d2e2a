//! Pipeline run request bodies

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::dto::ValidationError;

/// Request to start a pipeline run through a manual or generic trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRun {
    /// Name of the trigger to fire
    pub trigger_name: String,
    /// Property overrides for this run; rejected if any named property is
    /// locked at pipeline level
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub trigger_properties: HashMap<String, serde_json::Value>,
    /// Overrides for secure properties; values are redacted in responses
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub secure_trigger_properties: HashMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateRun {
    pub fn new(trigger_name: impl Into<String>) -> Self {
        Self {
            trigger_name: trigger_name.into(),
            trigger_properties: HashMap::new(),
            secure_trigger_properties: HashMap::new(),
            description: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.trigger_name.is_empty() {
            return Err(ValidationError::new("trigger_name", "must not be empty"));
        }
        Ok(())
    }
}

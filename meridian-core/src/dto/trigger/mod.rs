//! Trigger request bodies

use serde::{Deserialize, Serialize};

use crate::domain::trigger::{GenericSecret, TriggerEvent, TriggerSource, TriggerType};
use crate::dto::ValidationError;
use crate::dto::pipeline::WorkerIdentity;

/// Request to create a trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrigger {
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    pub name: String,
    pub event_listener: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_runs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<TriggerSource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<TriggerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_events_from_forks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<GenericSecret>,
}

impl CreateTrigger {
    /// Minimal manual trigger
    pub fn manual(name: impl Into<String>, event_listener: impl Into<String>) -> Self {
        Self {
            trigger_type: TriggerType::Manual,
            name: name.into(),
            event_listener: event_listener.into(),
            tags: Vec::new(),
            worker: None,
            max_concurrent_runs: None,
            enabled: None,
            favorite: None,
            source: None,
            events: Vec::new(),
            filter: None,
            enable_events_from_forks: None,
            cron: None,
            timezone: None,
            secret: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() || self.name.len() > 253 {
            return Err(ValidationError::new("name", "must be 1-253 characters"));
        }
        if self.event_listener.is_empty() {
            return Err(ValidationError::new("event_listener", "must not be empty"));
        }
        if let Some(max) = self.max_concurrent_runs
            && max < 1
        {
            return Err(ValidationError::new(
                "max_concurrent_runs",
                "must be at least 1",
            ));
        }

        match self.trigger_type {
            TriggerType::Manual => Ok(()),
            TriggerType::Scm => self.validate_scm(),
            TriggerType::Timer => self.validate_timer(),
            TriggerType::Generic => {
                if self.secret.is_none() {
                    return Err(ValidationError::new(
                        "secret",
                        "generic webhook triggers require a secret",
                    ));
                }
                Ok(())
            }
        }
    }

    fn validate_scm(&self) -> Result<(), ValidationError> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| ValidationError::new("source", "scm triggers require a source"))?;
        if source.properties.branch.is_some() && source.properties.pattern.is_some() {
            return Err(ValidationError::new(
                "source.properties",
                "specify one of branch or pattern only",
            ));
        }
        if self.events.is_empty() && self.filter.is_none() {
            return Err(ValidationError::new(
                "events",
                "scm triggers require events or a filter",
            ));
        }
        Ok(())
    }

    fn validate_timer(&self) -> Result<(), ValidationError> {
        let cron = self
            .cron
            .as_deref()
            .ok_or_else(|| ValidationError::new("cron", "timer triggers require a cron expression"))?;
        if cron.split_whitespace().count() != 5 {
            return Err(ValidationError::new(
                "cron",
                "expected 5 fields: minute hour day-of-month month day-of-week",
            ));
        }
        Ok(())
    }
}

/// Request to update a trigger; only present fields are changed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTrigger {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_listener: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<WorkerIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_runs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<TriggerSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<TriggerEvent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_events_from_forks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<GenericSecret>,
}

/// Request to duplicate a trigger under a new name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateTrigger {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trigger::TriggerSourceProperties;

    fn scm_source(branch: Option<&str>, pattern: Option<&str>) -> TriggerSource {
        TriggerSource {
            source_type: "git".to_string(),
            properties: TriggerSourceProperties {
                url: "https://example.com/org/repo".to_string(),
                branch: branch.map(str::to_string),
                pattern: pattern.map(str::to_string),
                blind_connection: false,
                hook_id: None,
                tool: None,
            },
        }
    }

    #[test]
    fn test_manual_trigger_valid() {
        assert!(CreateTrigger::manual("run-it", "listener").validate().is_ok());
    }

    #[test]
    fn test_scm_trigger_requires_source_and_events() {
        let mut req = CreateTrigger::manual("on-push", "listener");
        req.trigger_type = TriggerType::Scm;
        assert!(req.validate().is_err());

        req.source = Some(scm_source(Some("main"), None));
        assert!(req.validate().is_err());

        req.events = vec![TriggerEvent::Push];
        assert!(req.validate().is_ok());

        // a CEL filter alone also satisfies the requirement
        req.events.clear();
        req.filter = Some("event.ref == 'refs/heads/main'".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_scm_branch_and_pattern_exclusive() {
        let mut req = CreateTrigger::manual("on-push", "listener");
        req.trigger_type = TriggerType::Scm;
        req.events = vec![TriggerEvent::Push];
        req.source = Some(scm_source(Some("main"), Some("*master")));
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_timer_trigger_cron_shape() {
        let mut req = CreateTrigger::manual("nightly", "listener");
        req.trigger_type = TriggerType::Timer;
        assert!(req.validate().is_err());

        req.cron = Some("0 4 * * *".to_string());
        assert!(req.validate().is_ok());

        req.cron = Some("0 4 *".to_string());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_generic_trigger_requires_secret() {
        let mut req = CreateTrigger::manual("webhook", "listener");
        req.trigger_type = TriggerType::Generic;
        assert!(req.validate().is_err());
    }
}

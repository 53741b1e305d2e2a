//! Trigger domain types
//!
//! Triggers start pipeline runs. Four kinds exist: manual triggers fired by
//! an explicit request, SCM triggers fired by repository webhook events,
//! timer triggers fired on a CRON schedule, and generic webhook triggers
//! fired by an authenticated POST to a generated URL.
//!
//! The wire shape is a single object discriminated by `type`, with the
//! kind-specific fields present only on the matching kind.

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::{Tool, Worker};
use crate::domain::property::TriggerProperty;

/// Trigger kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Manual,
    Scm,
    Timer,
    Generic,
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TriggerType::Manual => "manual",
            TriggerType::Scm => "scm",
            TriggerType::Timer => "timer",
            TriggerType::Generic => "generic",
        };
        write!(f, "{}", s)
    }
}

/// Repository events an SCM trigger listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    Push,
    PullRequest,
    PullRequestClosed,
}

/// A pipeline trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    pub id: String,
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    pub name: String,
    /// Event listener this trigger is bound to; event listeners are declared
    /// in the pipeline's definition repositories
    pub event_listener: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<TriggerProperty>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<Worker>,
    /// Concurrency limit for runs started by this trigger; unlimited when
    /// absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_runs: Option<i64>,
    pub enabled: bool,
    #[serde(default)]
    pub favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    // SCM triggers only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<TriggerSource>,
    /// One of `events` or `filter` is required for SCM triggers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<TriggerEvent>,
    /// CEL expression evaluated against the webhook payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Run the pipeline for pull request events coming from forks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_events_from_forks: Option<bool>,

    // Timer triggers only
    /// UNIX crontab expression (minute, hour, day of month, month, day of
    /// week); maximum frequency is every 5 minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
    /// IANA timezone the CRON expression is evaluated in; UTC when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    // Generic webhook triggers only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<GenericSecret>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
}

/// Source repository an SCM trigger listens to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerSource {
    /// The only supported source type is `git`
    #[serde(rename = "type")]
    pub source_type: String,
    pub properties: TriggerSourceProperties,
}

/// Repository coordinates of a trigger source
///
/// At most one of `branch` and `pattern` may be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerSourceProperties {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Glob matched against branch and tag names, e.g. `!test` or `*master`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// True if the repository server is not reachable from the public
    /// internet, in which case connection details cannot be validated
    #[serde(default)]
    pub blind_connection: bool,
    /// Repository webhook ID, generated on trigger creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<Tool>,
}

/// Secret kind guarding a generic webhook trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretType {
    TokenMatches,
    DigestMatches,
    InternalValidation,
}

/// Secret configuration of a generic webhook trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericSecret {
    #[serde(rename = "type")]
    pub secret_type: SecretType,
    /// Not needed for `internal_validation`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Where the webhook carries the secret (header or payload)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    /// Digest algorithm, for `digest_matches` only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_type_discriminator() {
        let json = r#"{
            "id": "f6a7b8c9",
            "type": "timer",
            "name": "nightly",
            "event_listener": "listener",
            "enabled": true,
            "cron": "0 4 * * *",
            "timezone": "Europe/Berlin"
        }"#;

        let trigger: Trigger = serde_json::from_str(json).unwrap();
        assert_eq!(trigger.trigger_type, TriggerType::Timer);
        assert_eq!(trigger.cron.as_deref(), Some("0 4 * * *"));
        assert!(trigger.source.is_none());
        assert!(trigger.events.is_empty());
    }

    #[test]
    fn test_scm_trigger_events() {
        let json = r#"{
            "id": "a1",
            "type": "scm",
            "name": "on-push",
            "event_listener": "listener",
            "enabled": true,
            "events": ["push", "pull_request_closed"],
            "source": {
                "type": "git",
                "properties": {
                    "url": "https://example.com/org/repo",
                    "branch": "main",
                    "blind_connection": false
                }
            }
        }"#;

        let trigger: Trigger = serde_json::from_str(json).unwrap();
        assert_eq!(
            trigger.events,
            vec![TriggerEvent::Push, TriggerEvent::PullRequestClosed]
        );
        let source = trigger.source.unwrap();
        assert_eq!(source.properties.branch.as_deref(), Some("main"));
        assert!(source.properties.pattern.is_none());
    }
}

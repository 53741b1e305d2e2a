//! Policy template domain types
//!
//! A template captures a policy definition that can be stamped out across
//! accounts through assignments. Templates are versioned; only committed
//! versions can be assigned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::policy::{Control, PolicyResource, PolicyRule, PolicySubject, PolicyType};

/// A policy template (one version of it)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyTemplate {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Enterprise account that owns the template
    pub account_id: String,
    pub version: String,
    /// Committed versions are immutable and assignable
    #[serde(default)]
    pub committed: bool,
    pub policy: TemplatePolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified_by_id: Option<String>,
}

/// The policy definition carried by a template
///
/// Same shape as a policy, minus instance state: the subject is supplied by
/// the assignment target, not the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatePolicy {
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<PolicySubject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<PolicyResource>,
    pub control: Control,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<PolicyRule>,
}

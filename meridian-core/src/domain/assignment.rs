//! Policy assignment domain types
//!
//! An assignment propagates a committed template version to a target account,
//! account group, or enterprise. Propagation is asynchronous: the service
//! accepts the request and reports progress through `status` until every
//! target resource has been processed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Propagation status of an assignment
///
/// `accepted` and `in_progress` are transient; `succeeded` and `failed` are
/// terminal. The catch-all variant absorbs statuses introduced after this
/// crate was built so deserialization never fails on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Accepted,
    InProgress,
    Succeeded,
    Failed,
    #[serde(other)]
    Unknown,
}

impl AssignmentStatus {
    /// True once the status can no longer change
    pub fn is_terminal(&self) -> bool {
        matches!(self, AssignmentStatus::Succeeded | AssignmentStatus::Failed)
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AssignmentStatus::Accepted => "accepted",
            AssignmentStatus::InProgress => "in_progress",
            AssignmentStatus::Succeeded => "succeeded",
            AssignmentStatus::Failed => "failed",
            AssignmentStatus::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// A policy assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyAssignment {
    pub id: String,
    pub template: AssignmentTemplate,
    pub target: AssignmentTarget,
    pub status: AssignmentStatus,
    /// Per-target-resource outcomes, populated as propagation proceeds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<AssignmentResource>,
    pub account_id: String,
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

impl PolicyAssignment {
    /// Collects the error messages of every failed target resource
    pub fn failure_details(&self) -> Vec<String> {
        self.resources
            .iter()
            .filter_map(|r| r.error_message.as_ref())
            .cloned()
            .collect()
    }
}

/// Template version an assignment propagates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentTemplate {
    pub id: String,
    pub version: String,
}

/// Kind of entity an assignment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    Account,
    AccountGroup,
    Enterprise,
}

/// Entity the template is propagated to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentTarget {
    #[serde(rename = "type")]
    pub target_type: TargetType,
    pub id: String,
}

/// Outcome of propagating the template to one target resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResource {
    pub target: AssignmentTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssignmentStatus>,
    /// ID of the policy created in the target, once propagation succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let parsed: AssignmentStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(parsed, AssignmentStatus::InProgress);
        assert!(!parsed.is_terminal());
        assert!(AssignmentStatus::Failed.is_terminal());
    }

    #[test]
    fn test_unrecognized_status_parses_as_unknown() {
        let parsed: AssignmentStatus = serde_json::from_str("\"superseded\"").unwrap();
        assert_eq!(parsed, AssignmentStatus::Unknown);
        assert!(!parsed.is_terminal());
    }

    #[test]
    fn test_failure_details() {
        let assignment = PolicyAssignment {
            id: "assignment-1".to_string(),
            template: AssignmentTemplate {
                id: "template-1".to_string(),
                version: "1".to_string(),
            },
            target: AssignmentTarget {
                target_type: TargetType::AccountGroup,
                id: "group-1".to_string(),
            },
            status: AssignmentStatus::Failed,
            resources: vec![
                AssignmentResource {
                    target: AssignmentTarget {
                        target_type: TargetType::Account,
                        id: "acct-1".to_string(),
                    },
                    status: Some(AssignmentStatus::Succeeded),
                    policy_id: Some("policy-1".to_string()),
                    error_message: None,
                },
                AssignmentResource {
                    target: AssignmentTarget {
                        target_type: TargetType::Account,
                        id: "acct-2".to_string(),
                    },
                    status: Some(AssignmentStatus::Failed),
                    policy_id: None,
                    error_message: Some("conflicting policy exists".to_string()),
                },
            ],
            account_id: "enterprise-acct".to_string(),
            href: None,
            created_at: None,
            created_by_id: None,
            last_modified_at: None,
            last_modified_by_id: None,
        };

        assert_eq!(
            assignment.failure_details(),
            vec!["conflicting policy exists".to_string()]
        );
    }
}

//! Policy and role request bodies

use serde::{Deserialize, Serialize};

use crate::domain::policy::{Control, PolicyResource, PolicyRule, PolicySubject, PolicyType};
use crate::dto::ValidationError;

/// Request to create or replace a policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRequest {
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub subject: PolicySubject,
    pub resource: PolicyResource,
    pub control: Control,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<PolicyRule>,
}

impl PolicyRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subject.attributes.is_empty() {
            return Err(ValidationError::new(
                "subject",
                "at least one subject attribute is required",
            ));
        }
        if self.resource.attributes.is_empty() {
            return Err(ValidationError::new(
                "resource",
                "at least one resource attribute is required",
            ));
        }
        if self.control.grant.roles.is_empty() {
            return Err(ValidationError::new(
                "control.grant.roles",
                "at least one role is required",
            ));
        }
        if self.rule.is_some() && self.pattern.is_none() {
            return Err(ValidationError::new(
                "pattern",
                "required when a rule is present",
            ));
        }
        Ok(())
    }
}

/// Request to create a custom role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRole {
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub actions: Vec<String>,
    pub account_id: String,
    pub service_name: String,
}

impl CreateRole {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_valid_role_name(&self.name) {
            return Err(ValidationError::new(
                "name",
                "must start with an uppercase letter, be alphanumeric, and be at most 30 characters",
            ));
        }
        if self.display_name.is_empty() {
            return Err(ValidationError::new("display_name", "must not be empty"));
        }
        if self.actions.is_empty() {
            return Err(ValidationError::new(
                "actions",
                "at least one action is required",
            ));
        }
        if self.account_id.is_empty() {
            return Err(ValidationError::new("account_id", "must not be empty"));
        }
        if self.service_name.is_empty() {
            return Err(ValidationError::new("service_name", "must not be empty"));
        }
        Ok(())
    }
}

/// Request to replace the mutable fields of a custom role
///
/// Name, account, and service are fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRole {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub actions: Vec<String>,
}

impl UpdateRole {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.display_name.is_empty() {
            return Err(ValidationError::new("display_name", "must not be empty"));
        }
        if self.actions.is_empty() {
            return Err(ValidationError::new(
                "actions",
                "at least one action is required",
            ));
        }
        Ok(())
    }
}

fn is_valid_role_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {}
        _ => return false,
    }
    name.len() <= 30 && chars.all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::{AttributeCondition, Grant, RoleRef};

    fn role_request() -> CreateRole {
        CreateRole {
            name: "PipelineOperator".to_string(),
            display_name: "Pipeline Operator".to_string(),
            description: None,
            actions: vec!["delivery-pipeline.run.trigger".to_string()],
            account_id: "acct-1".to_string(),
            service_name: "delivery-pipeline".to_string(),
        }
    }

    #[test]
    fn test_role_name_rules() {
        assert!(role_request().validate().is_ok());

        let mut req = role_request();
        req.name = "lowercase".to_string();
        assert!(req.validate().is_err());

        req.name = "Has-Dash".to_string();
        assert!(req.validate().is_err());

        req.name = "X".repeat(31);
        assert!(req.validate().is_err());

        req.name = "R".to_string();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_policy_request_requires_roles() {
        let req = PolicyRequest {
            policy_type: PolicyType::Access,
            description: None,
            subject: PolicySubject {
                attributes: vec![AttributeCondition::equals("iam_id", "user-1")],
            },
            resource: PolicyResource {
                attributes: vec![AttributeCondition::equals("accountId", "acct-1")],
                tags: Vec::new(),
            },
            control: Control {
                grant: Grant { roles: Vec::new() },
            },
            pattern: None,
            rule: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rule_requires_pattern() {
        let mut req = PolicyRequest {
            policy_type: PolicyType::Access,
            description: None,
            subject: PolicySubject {
                attributes: vec![AttributeCondition::equals("iam_id", "user-1")],
            },
            resource: PolicyResource {
                attributes: vec![AttributeCondition::equals("accountId", "acct-1")],
                tags: Vec::new(),
            },
            control: Control {
                grant: Grant {
                    roles: vec![RoleRef {
                        role_id: "crn:role:viewer".to_string(),
                    }],
                },
            },
            pattern: None,
            rule: Some(PolicyRule {
                key: Some("{{environment.attributes.day_of_week}}".to_string()),
                operator: Some("dayOfWeekAnyOf".to_string()),
                value: Some(serde_json::json!([1, 2, 3, 4, 5])),
                conditions: Vec::new(),
            }),
        };
        assert!(req.validate().is_err());

        req.pattern = Some("time-based-conditions:weekly:all-day".to_string());
        assert!(req.validate().is_ok());
    }
}

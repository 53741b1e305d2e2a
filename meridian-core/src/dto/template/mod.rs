//! Policy template and assignment request bodies

use serde::{Deserialize, Serialize};

use crate::domain::assignment::{AssignmentTarget, AssignmentTemplate};
use crate::domain::template::TemplatePolicy;
use crate::dto::ValidationError;

/// Request to create a policy template (its first version)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub account_id: String,
    pub policy: TemplatePolicy,
    /// Commit immediately, making this version assignable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed: Option<bool>,
}

impl CreateTemplate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if self.account_id.is_empty() {
            return Err(ValidationError::new("account_id", "must not be empty"));
        }
        validate_template_policy(&self.policy)
    }
}

/// Request to add a version to an existing template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplateVersion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub policy: TemplatePolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed: Option<bool>,
}

impl CreateTemplateVersion {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_template_policy(&self.policy)
    }
}

fn validate_template_policy(policy: &TemplatePolicy) -> Result<(), ValidationError> {
    if policy.control.grant.roles.is_empty() {
        return Err(ValidationError::new(
            "policy.control.grant.roles",
            "at least one role is required",
        ));
    }
    Ok(())
}

/// Request to assign a committed template version to a target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignment {
    pub template: AssignmentTemplate,
    pub target: AssignmentTarget,
}

impl CreateAssignment {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.template.id.is_empty() {
            return Err(ValidationError::new("template.id", "must not be empty"));
        }
        if self.template.version.is_empty() {
            return Err(ValidationError::new("template.version", "must not be empty"));
        }
        if self.target.id.is_empty() {
            return Err(ValidationError::new("target.id", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assignment::TargetType;
    use crate::domain::policy::{Control, Grant, PolicyType};

    #[test]
    fn test_template_requires_roles() {
        let req = CreateTemplate {
            name: "baseline-viewer".to_string(),
            description: None,
            account_id: "acct-1".to_string(),
            policy: TemplatePolicy {
                policy_type: PolicyType::Access,
                description: None,
                subject: None,
                resource: None,
                control: Control {
                    grant: Grant { roles: Vec::new() },
                },
                pattern: None,
                rule: None,
            },
            committed: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_assignment_request() {
        let mut req = CreateAssignment {
            template: AssignmentTemplate {
                id: "template-1".to_string(),
                version: "1".to_string(),
            },
            target: AssignmentTarget {
                target_type: TargetType::Account,
                id: "acct-2".to_string(),
            },
        };
        assert!(req.validate().is_ok());

        req.target.id.clear();
        assert!(req.validate().is_err());
    }
}

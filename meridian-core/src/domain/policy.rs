//! IAM policy domain types
//!
//! A policy grants a subject a set of roles over a resource. Access policies
//! grant users, service IDs, or access groups roles over service resources;
//! authorization policies grant one service's identities roles over another
//! service. Both share the same wire shape, discriminated by `type`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Policy kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    Access,
    Authorization,
}

impl std::fmt::Display for PolicyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyType::Access => write!(f, "access"),
            PolicyType::Authorization => write!(f, "authorization"),
        }
    }
}

/// Policy lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyState {
    Active,
    Deleted,
}

/// An IAM policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Who the policy grants access to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<PolicySubject>,
    /// What the policy grants access over
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<PolicyResource>,
    pub control: Control,
    /// Condition pattern, e.g. `time-based-conditions:weekly:custom-hours`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Additional access conditions; shape depends on `pattern`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<PolicyRule>,
    pub state: PolicyState,
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
    /// Populated when listing with `format=include_last_permit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_permit_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_permit_frequency: Option<i64>,
}

/// Subject attributes a policy applies to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicySubject {
    pub attributes: Vec<AttributeCondition>,
}

/// Resource attributes a policy applies to
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyResource {
    pub attributes: Vec<AttributeCondition>,
    /// Access-management tags further scoping the resources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<ResourceTag>,
}

/// One attribute comparison, e.g. `serviceName stringEquals cloud-object-storage`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeCondition {
    pub key: String,
    pub operator: String,
    pub value: serde_json::Value,
}

impl AttributeCondition {
    /// Shorthand for the common `stringEquals` comparison
    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator: "stringEquals".to_string(),
            value: serde_json::Value::String(value.into()),
        }
    }
}

/// Tag condition on a policy resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceTag {
    pub name: String,
    pub value: String,
    pub operator: String,
}

/// What the policy grants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Control {
    pub grant: Grant,
}

/// The roles granted by a policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grant {
    pub roles: Vec<RoleRef>,
}

/// Reference to a role by its ID (CRN for system and service roles)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRef {
    pub role_id: String,
}

/// A policy condition: either a single attribute comparison or a boolean
/// combination of nested conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Nested conditions for `and`/`or` operators
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<PolicyRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&PolicyType::Authorization).unwrap(),
            "\"authorization\""
        );
    }

    #[test]
    fn test_attribute_condition_equals() {
        let cond = AttributeCondition::equals("serviceName", "delivery-pipeline");
        assert_eq!(cond.operator, "stringEquals");
        assert_eq!(cond.value, serde_json::json!("delivery-pipeline"));
    }

    #[test]
    fn test_nested_rule_round_trip() {
        let json = r#"{
            "operator": "and",
            "conditions": [
                {"key": "{{environment.attributes.day_of_week}}", "operator": "dayOfWeekAnyOf", "value": [1, 2, 3, 4, 5]},
                {"key": "{{environment.attributes.current_time}}", "operator": "timeGreaterThanOrEquals", "value": "09:00:00+00:00"}
            ]
        }"#;

        let rule: PolicyRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.operator.as_deref(), Some("and"));
        assert_eq!(rule.conditions.len(), 2);
        assert!(rule.conditions[0].conditions.is_empty());
    }
}

//! Custom role domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer-defined role scoped to one service in one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRole {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name used in policies; starts with an uppercase letter, alphanumeric,
    /// at most 30 characters
    pub name: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Service actions the role grants, e.g. `delivery-pipeline.run.trigger`
    pub actions: Vec<String>,
    pub account_id: String,
    pub service_name: String,
    /// Role CRN, assigned by the service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
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

//! Account access-management settings

use serde::{Deserialize, Serialize};

/// Account-level access management settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessManagementSettings {
    pub external_account_identity_interaction: ExternalAccountIdentityInteraction,
}

/// Controls which identities from outside the account may be granted access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalAccountIdentityInteraction {
    pub identity_types: IdentityTypes,
}

/// Per-identity-kind interaction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityTypes {
    pub user: IdentityTypeDetails,
    pub service_id: IdentityTypeDetails,
    pub service: IdentityTypeDetails,
}

/// Settings for one identity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityTypeDetails {
    pub state: IdentityInteractionState,
    /// Accounts whose identities of this kind may be granted access when the
    /// state is `limited`
    #[serde(default)]
    pub external_allowed_accounts: Vec<String>,
}

/// How external identities of a kind are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityInteractionState {
    /// Any external identity may be granted access
    Enabled,
    /// Grants are permitted but reported
    Monitor,
    /// Only identities from `external_allowed_accounts` may be granted access
    Limited,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip() {
        let json = r#"{
            "external_account_identity_interaction": {
                "identity_types": {
                    "user": {"state": "enabled", "external_allowed_accounts": []},
                    "service_id": {"state": "limited", "external_allowed_accounts": ["acct-1"]},
                    "service": {"state": "monitor", "external_allowed_accounts": []}
                }
            }
        }"#;

        let settings: AccessManagementSettings = serde_json::from_str(json).unwrap();
        let types = &settings.external_account_identity_interaction.identity_types;
        assert_eq!(types.user.state, IdentityInteractionState::Enabled);
        assert_eq!(types.service_id.external_allowed_accounts, vec!["acct-1"]);
        assert_eq!(types.service.state, IdentityInteractionState::Monitor);
    }
}

//! Account access-management settings endpoints

use crate::IamClient;
use crate::error::Result;
use meridian_core::domain::settings::AccessManagementSettings;

impl IamClient {
    /// Get the access-management settings of an account
    pub async fn get_access_settings(&self, account_id: &str) -> Result<AccessManagementSettings> {
        self.transport()
            .get(&format!(
                "/v1/accounts/{}/settings/access_management",
                account_id
            ))
            .await
    }

    /// Update the access-management settings of an account
    pub async fn update_access_settings(
        &self,
        account_id: &str,
        settings: &AccessManagementSettings,
    ) -> Result<AccessManagementSettings> {
        self.transport()
            .patch(
                &format!("/v1/accounts/{}/settings/access_management", account_id),
                settings,
            )
            .await
    }
}

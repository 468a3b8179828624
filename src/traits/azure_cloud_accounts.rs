//! Azure cloud account operations.

use async_trait::async_trait;

use crate::client::{ApiResponse, ResponseMeta};
use crate::error::Result;
use crate::models::{
    AzureAccountNameMode, AzureAccountOperationMode, AzureCloudAccount,
    CloudAccountMissingPermissions, MissingPermission,
};

/// Onboard and manage Azure subscriptions in Dome9.
#[async_trait]
pub trait AzureCloudAccountsApi: Send + Sync {
    /// List all onboarded Azure accounts.
    async fn list(&self) -> Result<ApiResponse<Vec<AzureCloudAccount>>>;

    /// Onboard an Azure account. The server must answer exactly 200.
    async fn create(&self, account: &AzureCloudAccount) -> Result<ResponseMeta>;

    /// Remove an account from Dome9 (the Azure subscription itself is
    /// untouched). The server must answer exactly 204.
    async fn delete(&self, account_id: &str) -> Result<ResponseMeta>;

    /// Permissions Dome9 lacks for the account.
    async fn get_missing_permissions(
        &self,
        account_id: &str,
    ) -> Result<ApiResponse<CloudAccountMissingPermissions>>;

    /// Permissions Dome9 lacks for one entity type and sub type.
    async fn get_missing_permissions_by_entity_type(
        &self,
        account_id: &str,
        entity_type: &str,
        sub_type: &str,
    ) -> Result<ApiResponse<Vec<MissingPermission>>>;

    /// Clear the missing-permission state so Dome9 re-validates it. The
    /// server must answer exactly 204.
    async fn reset_missing_permissions(&self, account_id: &str) -> Result<ResponseMeta>;

    /// Switch between read-only and manage mode.
    async fn update_operation_mode(
        &self,
        account_id: &str,
        mode: &AzureAccountOperationMode,
    ) -> Result<ApiResponse<AzureCloudAccount>>;

    /// Rename the account inside Dome9.
    async fn update_account_name(
        &self,
        account_id: &str,
        name: &AzureAccountNameMode,
    ) -> Result<ApiResponse<AzureCloudAccount>>;
}

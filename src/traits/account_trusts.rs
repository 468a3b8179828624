//! Account trust operations.

use async_trait::async_trait;

use crate::client::{ApiResponse, ResponseMeta};
use crate::error::Result;
use crate::models::{
    AccountTrust, AccountTrustAssumableRoles, AccountTrustCreateRequest,
    AccountTrustUpdateRequest, TrustDirection,
};

/// Manage trust relationships between Dome9 accounts.
///
/// A trust lets users in one account operate on another account.
///
/// # Example
///
/// ```ignore
/// use dome9::{AccountTrustsApi, Client, TrustDirection};
///
/// let client = Client::from_env()?;
/// let trusts = client.account_trusts().list(TrustDirection::MyAccountIsTarget).await?;
/// for trust in trusts.data {
///     println!("{} trusts us", trust.source_account_name);
/// }
/// ```
#[async_trait]
pub trait AccountTrustsApi: Send + Sync {
    /// List the roles this account may assume in trusting accounts.
    async fn get_assumable_roles(&self) -> Result<ApiResponse<Vec<AccountTrustAssumableRoles>>>;

    /// List trusts in the given direction.
    async fn list(&self, direction: TrustDirection) -> Result<ApiResponse<Vec<AccountTrust>>>;

    /// Create a trust. The server must answer exactly 200.
    async fn create(&self, request: &AccountTrustCreateRequest) -> Result<ResponseMeta>;

    /// Update a trust. The server must answer exactly 200.
    async fn update(
        &self,
        trust_id: &str,
        request: &AccountTrustUpdateRequest,
    ) -> Result<ResponseMeta>;

    /// Delete a trust. The server must answer exactly 204.
    async fn delete(&self, trust_id: &str) -> Result<ResponseMeta>;
}

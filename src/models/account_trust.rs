//! Account trust models and service.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::client::{ApiResponse, Client, ResponseMeta, NO_BODY};
use crate::error::Result;
use crate::traits::AccountTrustsApi;

const BASE_PATH: &str = "v2/AccountTrust";

/// Roles this account may assume in another account that trusts it.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTrustAssumableRoles {
    /// Name of the trusting account.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub account_name: String,
    /// Dome9 id of the trusting account.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub account_id: i64,
    /// Roles available to assume.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub roles: Vec<String>,
}

/// A trust relationship between two Dome9 accounts.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTrust {
    /// Trust id.
    pub id: String,
    /// Name of the trusting (target) account.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub target_account_name: String,
    /// Name of the trusted (source) account.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub source_account_name: String,
    /// Id of the trusted (source) account.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub source_account_id: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Roles the source account is limited to.
    #[serde(default)]
    pub restrictions: Option<AccountTrustRestrictions>,
}

/// Limits applied to a trust.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTrustRestrictions {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Body for creating a trust.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTrustCreateRequest {
    /// Account being granted access.
    pub source_account_id: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<AccountTrustRestrictions>,
}

/// Body for updating a trust.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTrustUpdateRequest {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<AccountTrustRestrictions>,
}

/// Which side of the trust relationship to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrustDirection {
    /// Accounts this account trusts.
    MyAccountIsTarget,
    /// Accounts that trust this account.
    MyAccountIsSource,
}

impl TrustDirection {
    /// Wire name used in the `trustDirection` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MyAccountIsTarget => "MyAccountIsTarget",
            Self::MyAccountIsSource => "MyAccountIsSource",
        }
    }
}

impl fmt::Display for TrustDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrustDirection {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "myaccountistarget" | "target" => Ok(Self::MyAccountIsTarget),
            "myaccountissource" | "source" => Ok(Self::MyAccountIsSource),
            other => Err(format!(
                "unknown trust direction '{other}', expected 'target' or 'source'"
            )),
        }
    }
}

/// Account trust endpoints, borrowed from a [`Client`].
#[derive(Debug, Clone, Copy)]
pub struct AccountTrusts<'a> {
    client: &'a Client,
}

impl<'a> AccountTrusts<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountTrustsApi for AccountTrusts<'_> {
    #[tracing::instrument(skip(self))]
    async fn get_assumable_roles(&self) -> Result<ApiResponse<Vec<AccountTrustAssumableRoles>>> {
        let path = format!("{BASE_PATH}/assumable-roles");
        let request = self.client.new_request(Method::GET, &path, NO_BODY)?;
        self.client.execute_json(request).await
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, direction: TrustDirection) -> Result<ApiResponse<Vec<AccountTrust>>> {
        let path = format!("{BASE_PATH}?trustDirection={direction}");
        let request = self.client.new_request(Method::GET, &path, NO_BODY)?;
        self.client.execute_json(request).await
    }

    #[tracing::instrument(skip(self))]
    async fn create(&self, body: &AccountTrustCreateRequest) -> Result<ResponseMeta> {
        let request = self.client.new_request(Method::POST, BASE_PATH, Some(body))?;
        // Create answers 200 with an empty body.
        self.client.execute_expecting(request, StatusCode::OK).await
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, trust_id: &str, body: &AccountTrustUpdateRequest) -> Result<ResponseMeta> {
        let path = format!("{BASE_PATH}/{trust_id}");
        let request = self.client.new_request(Method::PUT, &path, Some(body))?;
        self.client.execute_expecting(request, StatusCode::OK).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, trust_id: &str) -> Result<ResponseMeta> {
        let path = format!("{BASE_PATH}/{trust_id}");
        let request = self.client.new_request(Method::DELETE, &path, NO_BODY)?;
        self.client
            .execute_expecting(request, StatusCode::NO_CONTENT)
            .await
    }
}

//! Azure cloud account models and service.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::client::{ApiResponse, Client, ResponseMeta, NO_BODY};
use crate::error::Result;
use crate::models::cloud_account::{CloudAccountMissingPermissions, MissingPermission};
use crate::models::timestamp;
use crate::traits::AzureCloudAccountsApi;

const BASE_PATH: &str = "v2/AzureCloudAccount";

/// An Azure subscription onboarded to Dome9.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureCloudAccount {
    /// Dome9 id. Assigned by the server; left empty when onboarding.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,
    /// Display name inside Dome9.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub subscription_id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, alias = "tenantID")]
    pub tenant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<AzureAccountCredentials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_mode: Option<OperationMode>,
    /// Last onboarding or sync error reported by Dome9.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_date: Option<DateTime<Utc>>,
}

/// Service principal Dome9 uses to access the subscription.
#[serde_as]
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureAccountCredentials {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_password: String,
}

impl fmt::Debug for AzureAccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureAccountCredentials")
            .field("client_id", &self.client_id)
            .field("client_password", &"<redacted>")
            .finish()
    }
}

/// How much Dome9 may change in the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationMode {
    /// Monitor only.
    Read,
    /// Dome9 may manage network security groups.
    Manage,
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "Read",
            Self::Manage => "Manage",
        })
    }
}

impl FromStr for OperationMode {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "read" | "readonly" | "read-only" => Ok(Self::Read),
            "manage" => Ok(Self::Manage),
            other => Err(format!(
                "unknown operation mode '{other}', expected 'read' or 'manage'"
            )),
        }
    }
}

/// Body for [`update_operation_mode`](AzureCloudAccountsApi::update_operation_mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureAccountOperationMode {
    pub operation_mode: OperationMode,
}

/// Body for [`update_account_name`](AzureCloudAccountsApi::update_account_name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AzureAccountNameMode {
    pub name: String,
}

/// Azure cloud account endpoints, borrowed from a [`Client`].
#[derive(Debug, Clone, Copy)]
pub struct AzureCloudAccounts<'a> {
    client: &'a Client,
}

impl<'a> AzureCloudAccounts<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AzureCloudAccountsApi for AzureCloudAccounts<'_> {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<ApiResponse<Vec<AzureCloudAccount>>> {
        let request = self.client.new_request(Method::GET, BASE_PATH, NO_BODY)?;
        self.client.execute_json(request).await
    }

    #[tracing::instrument(skip(self, account), fields(name = %account.name))]
    async fn create(&self, account: &AzureCloudAccount) -> Result<ResponseMeta> {
        let request = self.client.new_request(Method::POST, BASE_PATH, Some(account))?;
        // Onboarding answers 200 with an empty body.
        self.client.execute_expecting(request, StatusCode::OK).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, account_id: &str) -> Result<ResponseMeta> {
        let path = format!("{BASE_PATH}/{account_id}");
        let request = self.client.new_request(Method::DELETE, &path, NO_BODY)?;
        self.client
            .execute_expecting(request, StatusCode::NO_CONTENT)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn get_missing_permissions(
        &self,
        account_id: &str,
    ) -> Result<ApiResponse<CloudAccountMissingPermissions>> {
        let path = format!("{BASE_PATH}/{account_id}/MissingPermissions");
        let request = self.client.new_request(Method::GET, &path, NO_BODY)?;
        self.client.execute_json(request).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_missing_permissions_by_entity_type(
        &self,
        account_id: &str,
        entity_type: &str,
        sub_type: &str,
    ) -> Result<ApiResponse<Vec<MissingPermission>>> {
        let path = format!(
            "{BASE_PATH}/{account_id}/MissingPermissions?entityType={entity_type}&subType={sub_type}"
        );
        let request = self.client.new_request(Method::GET, &path, NO_BODY)?;
        self.client.execute_json(request).await
    }

    #[tracing::instrument(skip(self))]
    async fn reset_missing_permissions(&self, account_id: &str) -> Result<ResponseMeta> {
        let path = format!("{BASE_PATH}/{account_id}/MissingPermissions/Reset");
        let request = self.client.new_request(Method::PUT, &path, NO_BODY)?;
        self.client
            .execute_expecting(request, StatusCode::NO_CONTENT)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn update_operation_mode(
        &self,
        account_id: &str,
        mode: &AzureAccountOperationMode,
    ) -> Result<ApiResponse<AzureCloudAccount>> {
        let path = format!("{BASE_PATH}/{account_id}/OperationMode");
        let request = self.client.new_request(Method::PUT, &path, Some(mode))?;
        self.client
            .execute_json_expecting(request, StatusCode::OK)
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn update_account_name(
        &self,
        account_id: &str,
        name: &AzureAccountNameMode,
    ) -> Result<ApiResponse<AzureCloudAccount>> {
        let path = format!("{BASE_PATH}/{account_id}/AccountName");
        let request = self.client.new_request(Method::PUT, &path, Some(name))?;
        self.client
            .execute_json_expecting(request, StatusCode::OK)
            .await
    }
}

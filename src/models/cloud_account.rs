//! Permission diagnostics shared by every cloud account vendor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::models::timestamp;

/// Permissions Dome9 is missing for a cloud account, grouped by action.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudAccountMissingPermissions {
    /// Cloud account id.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub actions: Vec<CloudAccountExternalActionStatus>,
}

impl CloudAccountMissingPermissions {
    /// Whether any action reported a failure.
    pub fn has_failures(&self) -> bool {
        self.actions.iter().any(|a| a.error.is_some())
    }
}

/// Outcome of one action Dome9 performed against the cloud account.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudAccountExternalActionStatus {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "type", default)]
    pub action_type: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub sub_type: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub error: Option<CloudAccountActionFailure>,
}

/// Error code and message from a failed action.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudAccountActionFailure {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub code: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub message: String,
}

/// A missing permission for one entity type and sub type.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPermission {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,
    /// Dome9 resource locator of the affected entity.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub srl: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub consecutive_fails: i32,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub last_fail: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub last_success: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub first_fail: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_fail_error_code: Option<String>,
    #[serde(default)]
    pub last_fail_message: Option<String>,
    #[serde(default)]
    pub retry_metadata: Option<MissingPermissionMetadata>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub cloud_account_id: String,
    /// Cloud vendor, e.g. `aws` or `azure`.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub vendor: String,
}

/// Which permissions are missing for an entity type and sub type.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPermissionMetadata {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub entity_type: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub sub_type: String,
}

//! Assessment history models and service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::client::{ApiResponse, Client, ResponseMeta, NO_BODY};
use crate::error::Result;
use crate::models::assessment::{AssessmentCftRequest, RuleTestResult};
use crate::models::timestamp;
use crate::traits::AssessmentHistoriesApi;

const BASE_PATH: &str = "v2/AssessmentHistoryV2";

/// A stored assessment run.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentHistoryResult {
    /// History id, used to fetch or delete this result.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: i64,
    /// What started the run, e.g. `Manual` or `ContinuousCompliancePolicy`.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub triggered_by: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub tests: Vec<RuleTestResult>,
    #[serde(default)]
    pub test_entities: serde_json::Value,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub assessment_passed: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub has_errors: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub stats: AssessmentHistoryStats,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub request: AssessmentHistoryBundleRequest,
}

/// Pass/fail counters of a stored run.
#[serde_as]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentHistoryStats {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub passed: i32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub failed: i32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub error: i32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub failed_tests: i32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub logically_tested: i32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub failed_entities: i32,
}

/// The bundle request a stored run was started with.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentHistoryBundleRequest {
    #[serde(rename = "isTemplate")]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub template: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub id: i64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub name: String,
    pub description: Option<String>,
    pub cft: Option<AssessmentCftRequest>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub is_cft: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub dome9_cloud_account_id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub external_cloud_account_id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub cloud_account_id: String,
    pub region: Option<String>,
    pub cloud_network: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub cloud_account_type: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub request_id: String,
}

/// Filter for [`get_bundle_results`](AssessmentHistoriesApi::get_bundle_results).
///
/// Values are placed into the query string as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleResultsQuery {
    pub bundle_id: String,
    /// Comma-separated cloud account ids.
    pub cloud_account_ids: String,
    /// Start of the window, RFC 3339.
    pub from_time: String,
    /// Tolerance around `from_time`.
    pub epsilon_in_minutes: String,
    pub request_id: String,
}

impl BundleResultsQuery {
    fn to_query_string(&self) -> String {
        format!(
            "bundleId={}&cloudAccountIds={}&fromTime={}&epsilonInMinutes={}&requestId={}",
            self.bundle_id,
            self.cloud_account_ids,
            self.from_time,
            self.epsilon_in_minutes,
            self.request_id
        )
    }
}

/// Assessment history endpoints, borrowed from a [`Client`].
#[derive(Debug, Clone, Copy)]
pub struct AssessmentHistories<'a> {
    client: &'a Client,
}

impl<'a> AssessmentHistories<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssessmentHistoriesApi for AssessmentHistories<'_> {
    #[tracing::instrument(skip(self))]
    async fn get_bundle_results(
        &self,
        query: &BundleResultsQuery,
    ) -> Result<ApiResponse<Vec<AssessmentHistoryResult>>> {
        let path = format!("{BASE_PATH}?{}", query.to_query_string());
        let request = self.client.new_request(Method::GET, &path, NO_BODY)?;
        self.client.execute_json(request).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_assessment_result(
        &self,
        history_id: i64,
    ) -> Result<ApiResponse<AssessmentHistoryResult>> {
        let path = format!("{BASE_PATH}/{history_id}");
        let request = self.client.new_request(Method::GET, &path, NO_BODY)?;
        self.client.execute_json(request).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_assessment_result(&self, history_id: i64) -> Result<ResponseMeta> {
        let path = format!("{BASE_PATH}?historyId={history_id}");
        let request = self.client.new_request(Method::DELETE, &path, NO_BODY)?;
        self.client
            .execute_expecting(request, StatusCode::NO_CONTENT)
            .await
    }
}

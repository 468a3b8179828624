//! Assessment history operations.

use async_trait::async_trait;

use crate::client::{ApiResponse, ResponseMeta};
use crate::error::Result;
use crate::models::{AssessmentHistoryResult, BundleResultsQuery};

/// Query and prune stored compliance assessment results.
#[async_trait]
pub trait AssessmentHistoriesApi: Send + Sync {
    /// List results of a bundle over a time window.
    async fn get_bundle_results(
        &self,
        query: &BundleResultsQuery,
    ) -> Result<ApiResponse<Vec<AssessmentHistoryResult>>>;

    /// Fetch one stored result.
    async fn get_assessment_result(
        &self,
        history_id: i64,
    ) -> Result<ApiResponse<AssessmentHistoryResult>>;

    /// Delete one stored result. The server must answer exactly 204.
    async fn delete_assessment_result(&self, history_id: i64) -> Result<ResponseMeta>;
}

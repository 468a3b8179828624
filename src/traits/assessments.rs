//! Compliance assessment operations.

use async_trait::async_trait;

use crate::client::ApiResponse;
use crate::error::Result;
use crate::models::{AssessmentBundleRequest, AssessmentResult};

/// Run compliance assessments against cloud environments.
#[async_trait]
pub trait AssessmentsApi: Send + Sync {
    /// Run a rule bundle synchronously and return its results.
    async fn run_bundle(
        &self,
        request: &AssessmentBundleRequest,
    ) -> Result<ApiResponse<AssessmentResult>>;
}

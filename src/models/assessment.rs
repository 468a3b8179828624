//! Compliance assessment models and service.

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::client::{ApiResponse, Client};
use crate::error::Result;
use crate::traits::AssessmentsApi;

const BASE_PATH: &str = "v2/assessment";

/// Request to run a rule bundle against a cloud environment.
///
/// Either a cloud account (`cloud_account_id` with `cloud_account_type`) or
/// a CloudFormation template (`cft` with `is_cft`) is assessed.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentBundleRequest {
    /// Rule bundle id.
    pub id: i64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cft: Option<AssessmentCftRequest>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub is_cft: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub dome9_cloud_account_id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub external_cloud_account_id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub cloud_account_id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub region: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub cloud_network: String,
    /// Vendor, e.g. `Aws` or `Azure`.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub cloud_account_type: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub request_id: String,
}

/// A CloudFormation template to assess.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentCftRequest {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub root_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub params: Vec<CftParameterRequest>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub files: Vec<CftFileRequest>,
}

/// A template parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CftParameterRequest {
    pub key: String,
    pub value: String,
}

/// A template file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CftFileRequest {
    pub name: String,
    pub template: String,
}

/// Aggregated results of every rule in an assessment.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub request: BaseAssessmentRequest,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub tests: Vec<RuleTestResult>,
    #[serde(default)]
    pub location_metadata: Option<LocationMetadata>,
    /// Entities tested, keyed by entity type. Shape varies per vendor.
    #[serde(default)]
    pub test_entities: serde_json::Value,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub assessment_passed: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub has_errors: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: i64,
}

impl AssessmentResult {
    /// Tests whose rule did not pass.
    pub fn failed_tests(&self) -> impl Iterator<Item = &RuleTestResult> {
        self.tests.iter().filter(|t| !t.test_passed)
    }
}

/// The cloud environment an assessment ran against.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseAssessmentRequest {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub dome9_cloud_account_id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub external_cloud_account_id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub cloud_account_id: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub cloud_network: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub cloud_account_type: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub request_id: String,
}

/// Result of one rule.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTestResult {
    #[serde(default)]
    pub error: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, alias = "testesCount")]
    pub tested_count: i32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub relevant_count: i32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub non_complying_count: i32,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub entity_results: Vec<ValidationResult>,
    #[serde(default)]
    pub rule: Option<RuleEntity>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub test_passed: bool,
}

/// Result of one rule against one entity.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isRelevant", default)]
    pub relevant: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isValid", default)]
    pub valid: bool,
    #[serde(default)]
    pub error: Option<String>,
    /// The entity as evaluated by the rule.
    #[serde(default)]
    pub test_obj: serde_json::Value,
}

/// A compliance rule.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEntity {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    /// `Low`, `Medium` or `High`.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub severity: String,
    /// GSL expression.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub logic: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub remediation: Option<String>,
    #[serde(default)]
    pub compliance_tag: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub control_title: Option<String>,
    #[serde(default)]
    pub rule_id: Option<String>,
    #[serde(default)]
    pub logic_hash: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "isDefault", default)]
    pub default: bool,
}

/// Where the assessed entities live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMetadata {
    #[serde(default)]
    pub account: Option<LocationConventionMetadata>,
    #[serde(default)]
    pub region: Option<LocationConventionMetadata>,
    #[serde(default)]
    pub cloud_network: Option<LocationConventionMetadata>,
}

/// Identifiers of one location level.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationConventionMetadata {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub srl: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub id: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub external_id: String,
}

/// Assessment endpoints, borrowed from a [`Client`].
#[derive(Debug, Clone, Copy)]
pub struct Assessments<'a> {
    client: &'a Client,
}

impl<'a> Assessments<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AssessmentsApi for Assessments<'_> {
    #[tracing::instrument(skip(self, body), fields(bundle_id = body.id))]
    async fn run_bundle(&self, body: &AssessmentBundleRequest) -> Result<ApiResponse<AssessmentResult>> {
        let path = format!("{BASE_PATH}/bundleV2");
        let request = self.client.new_request(Method::POST, &path, Some(body))?;
        self.client.execute_json(request).await
    }
}

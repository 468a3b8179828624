//! Dome9 API client library.
//!
//! A typed async binding for the Dome9 v2 REST API. A single [`Client`]
//! owns credentials and the base URL, builds authenticated JSON requests
//! and classifies responses. Resource families are exposed as service
//! handles borrowed from the client, each implementing a service trait.
//!
//! # Quick Start
//!
//! ```no_run
//! use dome9::{AccountTrustsApi, AzureCloudAccountsApi, Client, TrustDirection};
//!
//! #[tokio::main]
//! async fn main() -> dome9::Result<()> {
//!     // Create client from environment variables
//!     let client = Client::from_env()?;
//!
//!     // List onboarded Azure subscriptions
//!     let accounts = client.azure_cloud_accounts().list().await?.into_inner();
//!     println!("Found {} Azure accounts", accounts.len());
//!
//!     // List accounts trusted by this one
//!     let trusts = client
//!         .account_trusts()
//!         .list(TrustDirection::MyAccountIsTarget)
//!         .await?;
//!     println!("Found {} trusts", trusts.data.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around four service traits:
//!
//! - [`AccountTrustsApi`] - trust relationships between Dome9 accounts
//! - [`AssessmentHistoriesApi`] - stored compliance assessment results
//! - [`AssessmentsApi`] - synchronous compliance assessments
//! - [`AzureCloudAccountsApi`] - Azure onboarding and permission diagnostics
//!
//! Every operation performs exactly one HTTP request. Nothing is retried,
//! paginated or cached. Dropping a returned future aborts the request.
//!
//! # Configuration
//!
//! [`Client::from_env`] reads:
//!
//! - `DOME9_ACCESS_ID` (required) - API key id
//! - `DOME9_SECRET_KEY` (required) - API key secret
//! - `DOME9_BASE_URL` (optional) - Base URL (defaults to `https://api.dome9.com/`)

mod client;
mod error;
mod models;
mod traits;

pub mod cli;
mod output;

// Re-export core types
pub use client::{
    ApiResponse, Client, ClientBuilder, ClientOption, Credentials, ResponseMeta,
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, NO_BODY,
};
pub use error::{Dome9Error, Result};
pub use output::PrettyPrint;

// Re-export traits
pub use traits::{AccountTrustsApi, AssessmentHistoriesApi, AssessmentsApi, AzureCloudAccountsApi};

// Re-export models
pub use models::{
    // Account trust types
    AccountTrust,
    AccountTrustAssumableRoles,
    AccountTrustCreateRequest,
    AccountTrustRestrictions,
    AccountTrustUpdateRequest,
    AccountTrusts,
    TrustDirection,
    // Assessment types
    AssessmentBundleRequest,
    AssessmentCftRequest,
    AssessmentResult,
    Assessments,
    BaseAssessmentRequest,
    CftFileRequest,
    CftParameterRequest,
    LocationConventionMetadata,
    LocationMetadata,
    RuleEntity,
    RuleTestResult,
    ValidationResult,
    // Assessment history types
    AssessmentHistories,
    AssessmentHistoryBundleRequest,
    AssessmentHistoryResult,
    AssessmentHistoryStats,
    BundleResultsQuery,
    // Azure types
    AzureAccountCredentials,
    AzureAccountNameMode,
    AzureAccountOperationMode,
    AzureCloudAccount,
    AzureCloudAccounts,
    OperationMode,
    // Permission diagnostics
    CloudAccountActionFailure,
    CloudAccountExternalActionStatus,
    CloudAccountMissingPermissions,
    MissingPermission,
    MissingPermissionMetadata,
};

// Re-export the HTTP method type used by `Client::new_request`
pub use reqwest::Method;

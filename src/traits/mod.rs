//! Service trait definitions for Dome9 resource families.
//!
//! Each resource family is exposed as a trait so callers can depend on the
//! operations rather than on [`Client`](crate::Client), and substitute
//! their own implementation in tests.

mod account_trusts;
mod assessment_histories;
mod assessments;
mod azure_cloud_accounts;

pub use account_trusts::AccountTrustsApi;
pub use assessment_histories::AssessmentHistoriesApi;
pub use assessments::AssessmentsApi;
pub use azure_cloud_accounts::AzureCloudAccountsApi;

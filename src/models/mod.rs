//! Dome9 API model types and the services that exchange them.

mod account_trust;
mod assessment;
mod assessment_history;
mod azure_account;
mod cloud_account;
mod timestamp;

pub use account_trust::*;
pub use assessment::*;
pub use assessment_history::*;
pub use azure_account::*;
pub use cloud_account::*;

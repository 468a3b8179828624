//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::models::{
    AccountTrust, AssessmentHistoryResult, AzureCloudAccount, CloudAccountMissingPermissions,
};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for AzureCloudAccount {
    fn pretty_print(&self) -> String {
        let header = format!("Azure Account: {}", self.name);
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("ID:             {}", self.id),
            format!("Subscription:   {}", self.subscription_id),
            format!("Tenant:         {}", self.tenant_id),
        ];

        if let Some(mode) = self.operation_mode {
            lines.push(format!("Mode:           {mode}"));
        }

        if let Some(ref created) = self.creation_date {
            lines.push(format!("Created:        {}", created.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        if let Some(ref error) = self.error {
            if !error.is_empty() {
                lines.push(format!("Error:          {error}"));
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for AccountTrust {
    fn pretty_print(&self) -> String {
        let header = format!("Trust: {}", self.id);
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Source:         {} ({})", self.source_account_name, self.source_account_id),
            format!("Target:         {}", self.target_account_name),
        ];

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {description}"));
        }

        if let Some(ref restrictions) = self.restrictions {
            lines.push(format!("Roles:          {}", restrictions.roles.join(", ")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for AssessmentHistoryResult {
    fn pretty_print(&self) -> String {
        let header = format!("Assessment #{}", self.id);
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Bundle:         {} ({})", self.request.name, self.request.id),
            format!(
                "Result:         {}",
                if self.assessment_passed { "passed" } else { "failed" }
            ),
            format!(
                "Stats:          {} passed, {} failed, {} errors",
                self.stats.passed, self.stats.failed, self.stats.error
            ),
        ];

        if !self.triggered_by.is_empty() {
            lines.push(format!("Triggered By:   {}", self.triggered_by));
        }

        if let Some(ref created) = self.created_time {
            lines.push(format!("Created:        {}", created.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        if self.has_errors {
            lines.push("Errors:         yes".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for CloudAccountMissingPermissions {
    fn pretty_print(&self) -> String {
        let header = format!("Missing Permissions: {}", self.id);
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![header, divider];

        if self.actions.is_empty() {
            lines.push("None".to_string());
        }

        for action in &self.actions {
            let mut line = format!("{}/{}: {}", action.action_type, action.sub_type, action.total);
            if let Some(ref failure) = action.error {
                line.push_str(&format!(" ({}: {})", failure.code, failure.message));
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_azure_account_pretty_print_format() {
        let account: AzureCloudAccount = serde_json::from_value(serde_json::json!({
            "id": "acct-1",
            "name": "Production",
            "subscriptionId": "sub-1",
            "tenantId": "tenant-1",
            "operationMode": "Manage"
        }))
        .unwrap();

        let output = account.pretty_print();
        assert!(output.starts_with("Azure Account: Production"));
        assert!(output.contains("Mode:           Manage"));
        assert!(!output.contains("Error:"));
    }

    #[test]
    fn test_missing_permissions_pretty_print_lists_failures() {
        let perms: CloudAccountMissingPermissions = serde_json::from_value(serde_json::json!({
            "id": "acct-1",
            "actions": [{
                "type": "NetworkSecurityGroup",
                "subType": "Write",
                "total": 2,
                "error": {"code": "AuthorizationFailed", "message": "denied"}
            }]
        }))
        .unwrap();

        let output = perms.pretty_print();
        assert!(output.contains("NetworkSecurityGroup/Write: 2 (AuthorizationFailed: denied)"));
    }
}

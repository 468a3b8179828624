//! CLI output formatting tests.
//!
//! - JSON output with --json flag
//! - Pretty-print output as default

use dome9::{
    AccountTrust, AccountTrustRestrictions, AssessmentHistoryResult, AzureCloudAccount,
    OperationMode, PrettyPrint,
};

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_output_uses_wire_field_names() {
    let account = make_test_account();
    let json_output = serde_json::to_string_pretty(&account).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert!(parsed.is_object());
    assert_eq!(parsed["subscriptionId"], "sub-1");
    assert_eq!(parsed["tenantId"], "tenant-1");
    assert_eq!(parsed["operationMode"], "Read");
}

#[test]
fn test_json_output_for_list_is_array() {
    let trusts = vec![make_test_trust(), make_test_trust()];
    let json_output = serde_json::to_string_pretty(&trusts).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    assert_eq!(parsed[0]["restrictions"]["roles"][0], "Auditor");
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_trust_pretty_print_format() {
    let output = make_test_trust().pretty_print();

    assert!(output.starts_with("Trust: trust-1"));
    assert!(output.contains("Source:         Staging (acct-2)"));
    assert!(output.contains("Target:         Production"));
    assert!(output.contains("Roles:          Auditor"));
}

#[test]
fn test_trust_pretty_print_omits_missing_fields() {
    let trust = AccountTrust {
        description: None,
        restrictions: None,
        ..make_test_trust()
    };
    let output = trust.pretty_print();

    assert!(!output.contains("Description:"));
    assert!(!output.contains("Roles:"));
}

#[test]
fn test_history_pretty_print_format() {
    let result: AssessmentHistoryResult = serde_json::from_value(serde_json::json!({
        "id": 42,
        "triggeredBy": "Manual",
        "assessmentPassed": false,
        "hasErrors": true,
        "stats": {"passed": 3, "failed": 2, "error": 1},
        "request": {"id": 7, "name": "CIS Azure"}
    }))
    .unwrap();

    let output = result.pretty_print();
    assert!(output.starts_with("Assessment #42"));
    assert!(output.contains("Bundle:         CIS Azure (7)"));
    assert!(output.contains("Result:         failed"));
    assert!(output.contains("3 passed, 2 failed, 1 errors"));
    assert!(output.contains("Triggered By:   Manual"));
    assert!(output.contains("Errors:         yes"));
}

#[test]
fn test_account_pretty_print_includes_creation_date() {
    let output = make_test_account().pretty_print();
    assert!(output.contains("Created:        2018-08-26 16:11:12 UTC"));
}

// ============================================================================
// Test Helpers
// ============================================================================

fn make_test_account() -> AzureCloudAccount {
    AzureCloudAccount {
        id: "acct-1".to_string(),
        name: "Production".to_string(),
        subscription_id: "sub-1".to_string(),
        tenant_id: "tenant-1".to_string(),
        operation_mode: Some(OperationMode::Read),
        creation_date: Some("2018-08-26T16:11:12Z".parse().unwrap()),
        ..Default::default()
    }
}

fn make_test_trust() -> AccountTrust {
    AccountTrust {
        id: "trust-1".to_string(),
        target_account_name: "Production".to_string(),
        source_account_name: "Staging".to_string(),
        source_account_id: "acct-2".to_string(),
        description: Some("read-only audit".to_string()),
        restrictions: Some(AccountTrustRestrictions {
            roles: vec!["Auditor".to_string()],
        }),
    }
}

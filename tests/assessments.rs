//! Assessment and assessment history service tests.
//!
//! Uses wiremock to mock the Dome9 API and test actual execution flow.

use dome9::{
    AssessmentBundleRequest, AssessmentHistoriesApi, AssessmentsApi, BundleResultsQuery, Client,
    Credentials, Dome9Error,
};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .credentials(Credentials::new("foo", "bar"))
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn history_json(id: i64) -> serde_json::Value {
    serde_json::json!({
        "triggeredBy": "Unknown",
        "tests": [{
            "error": null,
            "testedCount": 1,
            "relevantCount": 1,
            "nonComplyingCount": 0,
            "entityResults": [],
            "rule": {"name": "string", "severity": "Low", "logic": "string", "isDefault": true},
            "testPassed": true
        }],
        "testEntities": {},
        "createdTime": "2018-08-26T16:11:12Z",
        "id": id,
        "assessmentPassed": true,
        "hasErrors": false,
        "stats": {
            "passed": 1, "failed": 0, "error": 0,
            "failedTests": 0, "logicallyTested": 1, "failedEntities": 0
        },
        "request": {
            "isTemplate": false,
            "id": 123,
            "name": "string",
            "description": "string",
            "isCft": false,
            "dome9CloudAccountId": "string",
            "externalCloudAccountId": "string",
            "cloudAccountId": "string",
            "cloudAccountType": "Aws",
            "requestId": "string"
        }
    })
}

#[tokio::test]
async fn test_run_bundle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/assessment/bundleV2"))
        .and(body_partial_json(serde_json::json!({
            "id": 123,
            "cloudAccountId": "acct",
            "cloudAccountType": "Aws"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "request": {"cloudAccountId": "acct", "cloudAccountType": "Aws", "requestId": "r-1"},
            "tests": [
                {"testesCount": 2, "relevantCount": 2, "nonComplyingCount": 0, "testPassed": true},
                {"testedCount": 5, "relevantCount": 4, "nonComplyingCount": 1, "testPassed": false,
                 "rule": {"name": "No open SSH", "severity": "High", "logic": "x", "isDefault": false}}
            ],
            "locationMetadata": {
                "account": {"srl": "1|acct", "name": "prod", "id": "acct", "externalId": "1111"}
            },
            "testEntities": {},
            "assessmentPassed": false,
            "hasErrors": false,
            "id": 99
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let body = AssessmentBundleRequest {
        id: 123,
        cloud_account_id: "acct".to_string(),
        cloud_account_type: "Aws".to_string(),
        ..Default::default()
    };
    let result = client
        .assessments()
        .run_bundle(&body)
        .await
        .unwrap()
        .into_inner();

    assert_eq!(result.id, 99);
    assert_eq!(result.request.request_id, "r-1");
    assert_eq!(result.tests[0].tested_count, 2);
    assert_eq!(result.tests[1].tested_count, 5);
    let failed: Vec<_> = result.failed_tests().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(
        failed[0].rule.as_ref().map(|r| r.name.as_str()),
        Some("No open SSH")
    );
    let location = result.location_metadata.unwrap();
    assert_eq!(location.account.unwrap().external_id, "1111");
}

#[tokio::test]
async fn test_run_bundle_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/assessment/bundleV2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("bundle exploded"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .assessments()
        .run_bundle(&AssessmentBundleRequest::default())
        .await
        .unwrap_err();

    match err {
        Dome9Error::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "bundle exploded");
        }
        other => panic!("Expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_bundle_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/AssessmentHistoryV2"))
        .and(query_param("bundleId", "123"))
        .and(query_param("cloudAccountIds", "abc,def"))
        .and(query_param("fromTime", "2018-08-26T16:11:12Z"))
        .and(query_param("epsilonInMinutes", "1"))
        .and(query_param("requestId", "0000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([history_json(7)])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = BundleResultsQuery {
        bundle_id: "123".to_string(),
        cloud_account_ids: "abc,def".to_string(),
        from_time: "2018-08-26T16:11:12Z".to_string(),
        epsilon_in_minutes: "1".to_string(),
        request_id: "0000".to_string(),
    };
    let results = client
        .assessment_histories()
        .get_bundle_results(&query)
        .await
        .unwrap()
        .into_inner();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 7);
    assert_eq!(results[0].request.id, 123);
    assert_eq!(results[0].stats.logically_tested, 1);
}

#[tokio::test]
async fn test_get_assessment_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/AssessmentHistoryV2/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_json(123)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .assessment_histories()
        .get_assessment_result(123)
        .await
        .unwrap();

    assert_eq!(result.meta.status.as_u16(), 200);
    let result = result.into_inner();
    assert_eq!(result.id, 123);
    assert!(result.assessment_passed);
    assert_eq!(result.triggered_by, "Unknown");
    assert!(result.tests[0].rule.as_ref().is_some_and(|r| r.default));
}

#[tokio::test]
async fn test_get_assessment_result_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/AssessmentHistoryV2/404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .assessment_histories()
        .get_assessment_result(404)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_delete_assessment_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/AssessmentHistoryV2"))
        .and(query_param("historyId", "123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let meta = client
        .assessment_histories()
        .delete_assessment_result(123)
        .await
        .unwrap();

    assert_eq!(meta.status.as_u16(), 204);
}

#[tokio::test]
async fn test_delete_assessment_result_rejects_200() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/AssessmentHistoryV2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .assessment_histories()
        .delete_assessment_result(123)
        .await
        .unwrap_err();

    assert!(matches!(err, Dome9Error::Status { status: 200, .. }));
}

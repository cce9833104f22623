//! Built-in suites against the fake users service

use crate::integration::{MockUsersServer, API_PREFIX, INVALID_TOKEN, VALID_TOKEN};
use gorest_users_client::{suites, ApiClientConfig, ScenarioRunner};
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_all_suites_pass_and_leave_no_users() {
    let mock = MockUsersServer::start().await;
    let runner = ScenarioRunner::new(mock.config()).expect("Runner creation failed");

    let reports = runner.run_all(&suites::all()).await;

    assert_eq!(reports.len(), suites::NAMES.len());
    for (report, name) in reports.iter().zip(suites::NAMES) {
        assert_eq!(report.name, *name);
        assert!(report.passed(), "{}", report);
    }
    assert_eq!(mock.fake().user_count(), 0, "Suites clean up after themselves");
}

#[tokio::test]
async fn test_suites_are_repeatable() {
    let mock = MockUsersServer::start().await;
    let runner = ScenarioRunner::new(mock.config()).unwrap();

    for _ in 0..2 {
        let report = runner.run(&suites::duplicate_email()).await;
        assert!(report.passed(), "{}", report);
    }
}

#[tokio::test]
async fn test_suites_tolerate_existing_data() {
    let mock = MockUsersServer::start().await;
    mock.fake().seed("Existing", "existing@example.com");
    let runner = ScenarioRunner::new(mock.config()).unwrap();

    for name in suites::NAMES {
        let scenario = suites::by_name(name).unwrap();
        let report = runner.run(&scenario).await;
        assert!(report.passed(), "{}", report);
    }
    assert_eq!(mock.fake().user_count(), 1);
}

#[tokio::test]
async fn test_crud_lifecycle_against_rejecting_service() {
    let mock = MockUsersServer::start().await;
    let runner = ScenarioRunner::new(mock.config_with_token("revoked")).unwrap();

    let report = runner.run(&suites::crud_lifecycle()).await;

    assert!(!report.passed());
    assert_eq!(report.first_failure().unwrap().name, "create user");
    assert!(report.steps[1..].iter().all(|s| s.is_skipped()));
    assert!(report.teardown[0].is_skipped(), "Nothing was created");
}

#[tokio::test]
async fn test_invalid_token_suite_ignores_default_credential() {
    let mock = MockUsersServer::start().await;
    let runner = ScenarioRunner::new(mock.config()).unwrap();

    let report = runner.run(&suites::invalid_token()).await;

    assert!(report.passed(), "{}", report);
    assert_eq!(report.steps.len(), 5);
    assert!(report.steps.iter().all(|s| s.status == Some(401)));
    assert!(report.teardown[0].is_skipped(), "Nothing was created");
}

#[tokio::test]
async fn test_invalid_token_suite_reports_accepted_creation() {
    let server = MockServer::start().await;

    // A service that wrongly accepts the bogus token on creation only
    Mock::given(method("POST"))
        .and(path(format!("{}/users", API_PREFIX)))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 9 })))
        .mount(&server)
        .await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": INVALID_TOKEN })),
        )
        .mount(&server)
        .await;

    let config = ApiClientConfig::builder()
        .base_url(format!("{}{}", server.uri(), API_PREFIX))
        .unwrap()
        .token(VALID_TOKEN)
        .build()
        .unwrap();
    let report = ScenarioRunner::new(config)
        .unwrap()
        .run(&suites::invalid_token())
        .await;

    assert!(!report.passed());
    assert_eq!(report.first_failure().unwrap().name, "create user");

    // The leftover user shows up in the teardown
    let teardown = &report.teardown[0];
    assert_eq!(teardown.path, "/users/9");
    assert!(!teardown.is_skipped());
}

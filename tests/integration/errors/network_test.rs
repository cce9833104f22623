//! Integration tests for network error handling

use std::net::TcpListener;
use std::time::Duration;

use crate::integration::{MockUsersServer, API_PREFIX, VALID_TOKEN};
use gorest_users_client::scenario::StepFailure;
use gorest_users_client::{
    ApiClient, ApiClientConfig, ApiError, Expectation, Scenario, ScenarioRunner, Step,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// A local URL nothing is listening on
fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Bind failed");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, API_PREFIX)
}

fn config_for(url: &str) -> ApiClientConfig {
    ApiClientConfig::builder()
        .base_url(url)
        .expect("Valid URL")
        .token(VALID_TOKEN)
        .timeout(Duration::from_secs(2))
        .build()
        .expect("Valid config")
}

#[tokio::test]
async fn test_connection_refused() {
    let client = ApiClient::new(config_for(&refused_url())).expect("Client creation failed");

    let result = client.get("/users").await;

    let err = result.expect_err("Should fail with connection refused");
    assert!(
        matches!(err, ApiError::Http(_)),
        "Should be HTTP error, got: {:?}",
        err
    );
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_request_timeout() {
    let mock = MockUsersServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/slow", API_PREFIX)))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(mock.inner())
        .await;

    let config = ApiClientConfig::builder()
        .base_url(mock.url())
        .expect("Valid URL")
        .token(VALID_TOKEN)
        .timeout(Duration::from_millis(100))
        .build()
        .expect("Valid config");
    let client = ApiClient::new(config).expect("Client creation failed");

    let err = client.get("/slow").await.expect_err("Should time out");
    match err {
        ApiError::Http(e) => assert!(e.is_timeout(), "Should be a timeout, got: {:?}", e),
        other => panic!("Should be HTTP error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_dns_resolution_failure() {
    let client = ApiClient::new(config_for(
        "http://this-domain-definitely-does-not-exist-12345.invalid/public/v2",
    ))
    .expect("Client creation failed");

    let result = client.get("/users").await;

    assert!(
        matches!(result, Err(ApiError::Http(_))),
        "Should fail with DNS error, got: {:?}",
        result
    );
}

#[tokio::test]
async fn test_transport_failure_fails_scenario_step() {
    let runner = ScenarioRunner::new(config_for(&refused_url())).expect("Runner creation failed");

    let scenario = Scenario::new("unreachable")
        .step(Step::get("list", "/users").expect(Expectation::status(200)))
        .step(Step::get("again", "/users").expect(Expectation::status(200)));

    let report = runner.run(&scenario).await;

    assert!(!report.passed());
    let first = &report.steps[0];
    assert_eq!(first.status, None);
    assert!(
        matches!(first.failure(), Some(StepFailure::Transport(ApiError::Http(_)))),
        "Should fail with a transport error, got: {}",
        first
    );
    assert!(report.steps[1].is_skipped());
}

#[test]
fn test_malformed_base_url() {
    assert!(matches!(
        ApiClientConfig::builder().base_url("not a url"),
        Err(url::ParseError::RelativeUrlWithoutBase)
    ));

    let err = ApiClientConfig::builder()
        .base_url("ftp://example.com/public/v2")
        .unwrap()
        .token(VALID_TOKEN)
        .build()
        .expect_err("Only http and https are accepted");
    assert!(err.is_config(), "Should be a config error, got: {:?}", err);
}

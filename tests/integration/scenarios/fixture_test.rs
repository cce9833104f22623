//! Integration tests for scoped fixture users

use crate::integration::{MockUsersServer, API_PREFIX, VALID_TOKEN};
use gorest_users_client::fixture::{cleanup_user, sample_user, with_user};
use gorest_users_client::{ApiClient, ApiClientConfig, ApiError, User, UsersApi};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_with_user_deletes_after_success() {
    let mock = MockUsersServer::start().await;
    let users = mock.users();
    let fake = mock.fake().clone();

    let created: User = with_user(&users, sample_user(), move |user| async move {
        assert_eq!(fake.user_count(), 1, "User exists while the body runs");
        user
    })
    .await
    .expect("with_user failed");

    assert_eq!(created.name, "Test User");
    assert_eq!(mock.fake().user_count(), 0);
    assert!(mock.fake().user(created.id).is_none());
}

#[tokio::test]
async fn test_with_user_deletes_after_error_value() {
    let mock = MockUsersServer::start().await;
    let users = mock.users();

    let outcome = with_user(&users, sample_user(), |user| async move {
        Err::<(), String>(format!("user {} rejected by the test", user.id))
    })
    .await
    .expect("Creation and cleanup succeed");

    assert!(outcome.is_err());
    assert_eq!(mock.fake().user_count(), 0);
}

#[tokio::test]
async fn test_with_user_deletes_after_panic() {
    let mock = MockUsersServer::start().await;
    let users = mock.users();

    let handle = tokio::spawn(async move {
        with_user(&users, sample_user(), |user| async move {
            assert_eq!(user.name, "someone else");
        })
        .await
    });

    let err = handle.await.expect_err("The body panic is resumed");
    assert!(err.is_panic());
    assert_eq!(mock.fake().user_count(), 0, "User deleted before the panic resumed");
}

#[tokio::test]
async fn test_with_user_rejected_creation() {
    let mock = MockUsersServer::start().await;
    let users = mock.users();
    let payload = sample_user().with_email("invalid-email");

    let result = with_user(&users, payload, |user| async move { user.id }).await;

    let err = result.unwrap_err();
    assert!(
        matches!(
            err,
            ApiError::UnexpectedStatus {
                expected: 201,
                actual: 422,
                ..
            }
        ),
        "Should return UnexpectedStatus, got: {:?}",
        err
    );
    assert_eq!(mock.fake().user_count(), 0);
}

#[tokio::test]
async fn test_cleanup_tolerates_missing_user() {
    let mock = MockUsersServer::start().await;
    let users = mock.users();
    let id = mock.fake().seed("Leftover", "leftover@example.com");

    assert!(cleanup_user(&users, id).await);
    assert!(cleanup_user(&users, id).await, "Already gone counts as clean");
}

#[tokio::test]
async fn test_cleanup_reports_rejection() {
    let mock = MockUsersServer::start().await;
    let id = mock.fake().seed("Guarded", "guarded@example.com");
    let client = ApiClient::new(mock.config_with_token("invalid-token"))
        .expect("Client creation failed");
    let users = UsersApi::new(client);

    assert!(!cleanup_user(&users, id).await);
    assert_eq!(mock.fake().user_count(), 1);
}

#[tokio::test]
async fn test_with_user_deletes_partial_creation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("{}/users", API_PREFIX)))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 5, "name": "Test User" })),
        )
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{}/users/5", API_PREFIX)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiClientConfig::builder()
        .base_url(format!("{}{}", server.uri(), API_PREFIX))
        .expect("Valid URL")
        .token(VALID_TOKEN)
        .build()
        .expect("Valid config");
    let users = UsersApi::new(ApiClient::new(config).expect("Client creation failed"));

    let result = with_user(&users, sample_user(), |user| async move { user.id }).await;

    assert!(
        matches!(result, Err(ApiError::Json(_))),
        "Should fail to decode the user, got: {:?}",
        result
    );

    let deletes = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.method.as_str() == "DELETE")
        .count();
    assert_eq!(deletes, 1, "The half-decoded user is still removed");
}

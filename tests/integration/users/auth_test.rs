//! Integration tests for bearer token rejection

use crate::integration::{MockUsersServer, INVALID_TOKEN};
use gorest_users_client::fixture::sample_user;
use gorest_users_client::{ApiClient, RemoteError, UserUpdate, UsersApi};

#[tokio::test]
async fn test_invalid_token_rejected_on_every_verb() {
    let mock = MockUsersServer::start().await;
    let id = mock.fake().seed("Protected", "protected@example.com");

    let client = ApiClient::new(mock.config_with_token("invalid-token"))
        .expect("Client creation failed");
    let users = UsersApi::new(client);

    let responses = [
        users.list().await.unwrap(),
        users.create(&sample_user()).await.unwrap(),
        users.get(id).await.unwrap(),
        users
            .update(id, &UserUpdate::new().name("Hijacked"))
            .await
            .unwrap(),
        users.delete(id).await.unwrap(),
    ];

    for response in responses {
        assert_eq!(response.status(), 401);
        assert!(
            matches!(
                response.error(),
                Some(RemoteError::Unauthorized(ref m)) if m.message == INVALID_TOKEN
            ),
            "Should return Unauthorized, got: {:?}",
            response
        );
    }

    // Nothing changed remotely
    assert_eq!(mock.fake().user_count(), 1);
    assert_eq!(mock.fake().user(id).unwrap()["name"], "Protected");
}

#[tokio::test]
async fn test_rejected_even_for_unknown_user() {
    let mock = MockUsersServer::start().await;
    let client = ApiClient::new(mock.config_with_token("expired-token")).unwrap();

    let response = client.get("/users/424242").await.unwrap();

    assert_eq!(response.status(), 401);
    assert_eq!(response.error().unwrap().message(), Some(INVALID_TOKEN));
}

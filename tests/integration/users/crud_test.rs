// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests for the create / retrieve / update / delete cycle

use crate::integration::{MockUsersServer, NOT_FOUND};
use gorest_users_client::fixture::sample_user;
use gorest_users_client::{RemoteError, User, UserUpdate};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_list_users_returns_array() {
    let mock = MockUsersServer::start().await;
    mock.fake().seed("First", "first@example.com");
    mock.fake().seed("Second", "second@example.com");

    let response = mock.users().list().await.expect("list failed");

    assert_eq!(response.status(), 200);
    let users: Vec<User> = response.json().expect("Array of users");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "First");
}

#[tokio::test]
async fn test_user_lifecycle() {
    let mock = MockUsersServer::start().await;
    let users = mock.users();
    let payload = sample_user();

    // Create
    let response = users.create(&payload).await.expect("create failed");
    assert_eq!(response.status(), 201);
    assert!(response.field("id").is_some(), "User ID should exist");
    let created: User = response.json().expect("User body");
    assert_eq!(created.email, payload.email);

    // Retrieve
    let response = users.get(created.id).await.expect("get failed");
    assert_eq!(response.status(), 200);
    assert_eq!(response.json::<User>().unwrap(), created);

    // Update
    let update = UserUpdate::new().name("Updated Test User");
    let response = users.update(created.id, &update).await.expect("update failed");
    assert_eq!(response.status(), 200);
    let updated: User = response.json().unwrap();
    assert_eq!(updated.name, "Updated Test User");
    assert_eq!(updated.email, created.email, "Untouched fields are kept");

    // Delete
    let response = users.delete(created.id).await.expect("delete failed");
    assert_eq!(response.status(), 204);

    // Retrieve deleted user
    let response = users.get(created.id).await.expect("get failed");
    assert_eq!(response.status(), 404);
    assert_eq!(response.error().unwrap().message(), Some(NOT_FOUND));
}

#[tokio::test]
async fn test_unknown_user_is_not_found_for_every_verb() {
    let mock = MockUsersServer::start().await;
    let users = mock.users();
    let missing = 999_999;

    let responses = [
        users.get(missing).await.unwrap(),
        users
            .update(missing, &UserUpdate::new().status("inactive"))
            .await
            .unwrap(),
        users.delete(missing).await.unwrap(),
    ];

    for response in responses {
        assert_eq!(response.status(), 404);
        assert!(matches!(response.error(), Some(RemoteError::NotFound(_))));
    }
}

#[tokio::test]
async fn test_delete_twice() {
    let mock = MockUsersServer::start().await;
    let users = mock.users();
    let id = mock.fake().seed("Short Lived", "short-lived@example.com");

    assert_eq!(users.delete(id).await.unwrap().status(), 204);
    assert_eq!(users.delete(id).await.unwrap().status(), 404);
    assert_eq!(mock.fake().user_count(), 0);
}

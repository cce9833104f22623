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

//! Typed access to the `users` resource.
//!
//! [`UsersApi`] issues the five `users` requests through an [`ApiClient`].
//! Like the client, it resolves every status code to an [`ApiResponse`] so
//! callers can assert on validation, not-found and auth failures.

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{ApiResponse, NewUser, UserUpdate};

/// Path of the users collection.
pub const COLLECTION_PATH: &str = "/users";

/// Path of the users collection.
pub fn collection_path() -> &'static str {
    COLLECTION_PATH
}

/// Path of a single user.
pub fn member_path(id: impl std::fmt::Display) -> String {
    format!("{}/{}", COLLECTION_PATH, id)
}

/// Operations on the `users` resource.
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    /// Wrap an authenticated client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// `GET /users`: 200 with a JSON array of users.
    pub async fn list(&self) -> Result<ApiResponse> {
        self.client.get(collection_path()).await
    }

    /// `POST /users`: 201 with the created user, or 422 with field errors.
    pub async fn create(&self, user: &NewUser) -> Result<ApiResponse> {
        self.client.post(collection_path(), user).await
    }

    /// `GET /users/{id}`: 200 with the user, or 404.
    pub async fn get(&self, id: u64) -> Result<ApiResponse> {
        self.client.get(&member_path(id)).await
    }

    /// `PUT /users/{id}`: 200 with the updated user, 404 or 422.
    pub async fn update(&self, id: u64, update: &UserUpdate) -> Result<ApiResponse> {
        self.client.put(&member_path(id), update).await
    }

    /// `DELETE /users/{id}`: 204, or 404.
    pub async fn delete(&self, id: u64) -> Result<ApiResponse> {
        self.client.delete(&member_path(id)).await
    }
}

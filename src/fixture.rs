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

//! Test data helpers for a shared, persistent remote service.
//!
//! The remote service keeps users across runs, so every payload built here
//! carries a unique email, and [`with_user`] deletes what it creates on every
//! exit path.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ApiError, Result};
use crate::types::{NewUser, User};
use crate::users::UsersApi;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generate an email address that is unique per call and per run.
///
/// The result has the shape `{prefix}{unix_millis}{sequence}@example.com`.
pub fn unique_email(prefix: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);

    format!("{}{}{}@example.com", prefix, millis, seq)
}

/// The canonical valid creation payload, with a fresh email.
pub fn sample_user() -> NewUser {
    NewUser::new("Test User", unique_email("testuser"), "male", "active")
}

/// Create a user, run `body` with it, then delete the user.
///
/// Creation must answer 201 with a user object; a 201 whose body is not a
/// full user is deleted before the error is returned. The user is deleted after
/// `body` completes, returns an error value, or panics; a panic is resumed
/// once cleanup has run. `body` runs as its own task, so it must own what it
/// uses (clone the [`UsersApi`] into it).
///
/// Dropping the returned future while `body` runs skips cleanup: the body
/// task keeps running detached and the user is left on the service.
///
/// # Errors
///
/// Returns an error if the creation request fails or is rejected, or if the
/// task running `body` is cancelled.
pub async fn with_user<F, Fut, T>(users: &UsersApi, user: NewUser, body: F) -> Result<T>
where
    F: FnOnce(User) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let response = users.create(&user).await?;
    response.expect_status(201)?;

    let created: User = match response.json() {
        Ok(user) => user,
        Err(e) => {
            // Created but undecodable: still remove it when the id is known
            if let Some(id) = response.field("id").and_then(serde_json::Value::as_u64) {
                cleanup_user(users, id).await;
            }
            return Err(e);
        }
    };
    let id = created.id;
    tracing::debug!("Created fixture user {}", id);

    let outcome = tokio::spawn(body(created)).await;

    cleanup_user(users, id).await;

    match outcome {
        Ok(value) => Ok(value),
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(err) => Err(ApiError::Cancelled(err.to_string())),
    }
}

/// Delete a user, treating "already gone" as success.
///
/// Returns true if the user no longer exists remotely. Failures are logged,
/// not returned, so cleanup never masks the outcome it follows.
pub async fn cleanup_user(users: &UsersApi, id: u64) -> bool {
    match users.delete(id).await {
        Ok(response) if matches!(response.status(), 204 | 404) => true,
        Ok(response) => {
            tracing::warn!(
                "Cleanup of user {} answered {}: {}",
                id,
                response.status(),
                response.body()
            );
            false
        }
        Err(e) => {
            tracing::warn!("Cleanup of user {} failed: {}", id, e);
            false
        }
    }
}
